//! Integration tests for the typed port accessors.
//!
//! Every test drives a `Port` over a user-mode fake of the driver and
//! checks both the decoded value and the exact control request issued.

mod common;

use common::{DISABLED, FakeCard, Recorded, Scripted};
use std::io;

use serialfc::{
    CardKind, ControlChannel, ControlRequest, DeviceFault, Port, SerialFcError, Setting,
    SettingValue, TransportError,
};
use shared::Operation;
use shared::ioctl::*;

#[test]
fn rs485_reads_back_what_was_set() {
    let mut card = FakeCard::new();
    let mut port = Port::new(&mut card);

    port.set_rs485(true).unwrap();
    assert!(port.rs485().unwrap());

    port.set_rs485(false).unwrap();
    assert!(!port.rs485().unwrap());

    drop(port);
    assert_eq!(
        card.codes(),
        vec![
            IOCTL_FASTCOM_ENABLE_RS485,
            IOCTL_FASTCOM_GET_RS485,
            IOCTL_FASTCOM_DISABLE_RS485,
            IOCTL_FASTCOM_GET_RS485,
        ]
    );
}

#[test]
fn flag_requests_carry_no_payload() {
    let mut card = FakeCard::new();
    let mut port = Port::new(&mut card);

    port.set_echo_cancel(true).unwrap();
    port.termination().unwrap();

    drop(port);
    assert_eq!(
        card.requests,
        vec![
            Recorded { code: IOCTL_FASTCOM_ENABLE_ECHO_CANCEL, input: None, output_len: 0 },
            Recorded { code: IOCTL_FASTCOM_GET_TERMINATION, input: None, output_len: 1 },
        ]
    );
}

#[test]
fn nonzero_flag_byte_is_true() {
    let mut card = FakeCard::new();
    card.force(Operation::Get9Bit, vec![0x7F]);
    let mut port = Port::new(&mut card);
    assert!(port.nine_bit().unwrap());
}

#[test]
fn set_sample_rate_issues_one_encoded_request() {
    let mut card = FakeCard::new();
    Port::new(&mut card).set_sample_rate(16).unwrap();

    assert_eq!(card.requests.len(), 1);
    let request = &card.requests[0];
    assert_eq!(request.code, IOCTL_FASTCOM_SET_SAMPLE_RATE);
    assert_eq!(request.output_len, 0);

    let payload: [u8; 4] = request.input.as_deref().unwrap().try_into().unwrap();
    assert_eq!(u32::from_le_bytes(payload), 16);
}

#[test]
fn registers_round_trip_through_the_card() {
    let mut card = FakeCard::new();
    let mut port = Port::new(&mut card);

    port.set_tx_trigger(32).unwrap();
    port.set_rx_trigger(u32::MAX).unwrap();
    port.set_frame_length(0).unwrap();

    assert_eq!(port.tx_trigger().unwrap(), 32);
    assert_eq!(port.rx_trigger().unwrap(), u32::MAX);
    assert_eq!(port.frame_length().unwrap(), 0);
}

#[test]
fn clock_rate_is_sent_little_endian() {
    let mut card = FakeCard::new();
    Port::new(&mut card).set_clock_rate(18_432_000).unwrap();

    assert_eq!(
        card.requests,
        vec![Recorded {
            code:       IOCTL_FASTCOM_SET_CLOCK_RATE,
            input:      Some(18_432_000u32.to_le_bytes().to_vec()),
            output_len: 0,
        }]
    );
}

#[test]
fn isochronous_enable_then_disable() {
    let mut card = FakeCard::new();
    let mut port = Port::new(&mut card);

    port.enable_isochronous(3).unwrap();
    assert_eq!(port.isochronous().unwrap(), 3);

    port.disable_isochronous().unwrap();
    assert_eq!(port.isochronous().unwrap(), DISABLED);
}

#[test]
fn negative_mode_parameters_survive() {
    let mut card = FakeCard::new();
    let mut port = Port::new(&mut card);

    port.enable_external_transmit(i32::MIN).unwrap();
    assert_eq!(port.external_transmit().unwrap(), i32::MIN);

    port.enable_fixed_baud_rate(1_000_000).unwrap();
    assert_eq!(port.fixed_baud_rate().unwrap(), 1_000_000);
    port.disable_fixed_baud_rate().unwrap();
    assert_eq!(port.fixed_baud_rate().unwrap(), DISABLED);
}

#[test]
fn card_type_maps_known_ordinals() {
    let mut card = FakeCard::with_card_type(2);
    assert_eq!(Port::new(&mut card).card_type().unwrap(), CardKind::Fscc);

    let mut card = FakeCard::with_card_type(3);
    assert_eq!(Port::new(&mut card).card_type().unwrap(), CardKind::Unknown);
}

#[test]
fn card_type_out_of_range_is_an_error() {
    let mut card = FakeCard::with_card_type(9);
    let err = Port::new(&mut card).card_type().unwrap_err();
    assert!(matches!(err, SerialFcError::UnrecognizedCardType(9)), "{err}");
}

#[test]
fn short_reply_is_a_device_error() {
    let mut card = FakeCard::new();
    card.force(Operation::GetSampleRate, vec![16, 0]);

    let err = Port::new(&mut card).sample_rate().unwrap_err();
    match err {
        SerialFcError::Device { code, source: DeviceFault::LengthMismatch { expected, actual } } => {
            assert_eq!(code, IOCTL_FASTCOM_GET_SAMPLE_RATE);
            assert_eq!((expected, actual), (4, 2));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn long_flag_reply_is_rejected() {
    // A driver answering with a 4-byte BOOL must not be silently accepted.
    let mut channel = Scripted::replying(&[1, 0, 0, 0]);
    let err = Port::new(&mut channel).rs485().unwrap_err();
    assert!(matches!(
        err.fault(),
        Some(DeviceFault::LengthMismatch { expected: 1, actual: 4 })
    ));
}

#[test]
fn set_with_unexpected_reply_fails() {
    let mut channel = Scripted::replying(&[0]);
    let err = Port::new(&mut channel).set_termination(true).unwrap_err();
    assert!(matches!(
        err.fault(),
        Some(DeviceFault::LengthMismatch { expected: 0, actual: 1 })
    ));
}

#[test]
fn driver_faults_keep_the_failing_code() {
    let mut card = FakeCard::new();
    card.reject(Operation::EnableTermination);

    let err = Port::new(&mut card).set_termination(true).unwrap_err();
    assert!(err.is_unsupported());
    match &err {
        SerialFcError::Device { code, .. } => assert_eq!(*code, IOCTL_FASTCOM_ENABLE_TERMINATION),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("IOCTL_FASTCOM_ENABLE_TERMINATION"));
}

#[test]
fn each_accessor_is_a_single_round_trip() {
    let mut channel = Scripted::failing(|| DeviceFault::InvalidHandle);
    {
        let mut port = Port::new(&mut channel);
        assert!(port.card_type().is_err());
        assert!(port.disable_isochronous().is_err());
    }
    assert_eq!(channel.calls, 2);
}

#[test]
fn write_only_settings_cannot_be_read_at_runtime() {
    let mut channel = Scripted::replying(&[]);
    let clock = Setting::ALL
        .into_iter()
        .find(|s| s.name() == "clock_rate")
        .unwrap();

    let err = Port::new(&mut channel).read(clock).unwrap_err();
    assert!(matches!(err, SerialFcError::UnsupportedOperation("clock_rate")));
    assert_eq!(channel.calls, 0);
}

#[test]
fn snapshot_reports_each_readable_setting() {
    let mut card = FakeCard::with_card_type(1);
    card.reject(Operation::GetTermination);
    card.force(Operation::GetSampleRate, 8u32.to_le_bytes().to_vec());

    let snapshot = Port::new(&mut card).snapshot();
    assert_eq!(snapshot.len(), 12);
    assert!(snapshot.iter().all(|(name, _)| *name != "clock_rate"));

    let lookup = |wanted: &str| {
        snapshot
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, value)| value)
            .unwrap()
    };
    assert_eq!(*lookup("sample_rate").as_ref().unwrap(), SettingValue::Word(8));
    assert_eq!(*lookup("card_type").as_ref().unwrap(), SettingValue::Card(CardKind::Pcie));
    assert!(lookup("termination").as_ref().unwrap_err().is_unsupported());
}

/// Accepts every request but cannot release its handle.
struct StuckHandle;

impl ControlChannel for StuckHandle {
    fn control(&mut self, _request: &ControlRequest<'_>) -> Result<Vec<u8>, DeviceFault> {
        Ok(Vec::new())
    }

    fn close(self) -> Result<(), TransportError> {
        Err(TransportError::Io {
            target: "COM1".into(),
            source: io::Error::other("close failed"),
        })
    }
}

#[test]
fn close_errors_surface() {
    let err = Port::new(StuckHandle).close().unwrap_err();
    assert!(matches!(err, SerialFcError::Transport(TransportError::Io { .. })), "{err}");
}

#[test]
fn boxed_channel_close_errors_surface() {
    let err = Port::new(Box::new(StuckHandle)).close().unwrap_err();
    assert!(matches!(err, SerialFcError::Transport(TransportError::Io { .. })), "{err}");
}
