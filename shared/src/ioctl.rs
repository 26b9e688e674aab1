//! SerialFC IOCTL registry.
//!
//! Every control operation the driver understands is listed in
//! [`Operation`]; its code is derived with the Windows `CTL_CODE` layout:
//!
//!   31            16 15  14 13              2 1    0
//!   ┌───────────────┬──────┬─────────────────┬──────┐
//!   │  device type  │access│    function     │method│
//!   └───────────────┴──────┴─────────────────┴──────┘
//!
//! The values are interpreted by the vendor driver, so the layout must stay
//! bit-for-bit identical to the C headers shipped with the card.

use core::fmt;

use crate::constants::{FILE_ANY_ACCESS, METHOD_BUFFERED, SERIALFC_IOCTL_MAGIC};

/// Opaque 32-bit IOCTL identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlCode(u32);

/// Rust equivalent of the `CTL_CODE` macro.
///
/// Out-of-range fields are a programming error; all registry codes are
/// constants, so they fail at compile time.
pub const fn ctl_code(device_type: u32, function: u32, method: u32, access: u32) -> ControlCode {
    assert!(device_type < (1 << 16), "device type must fit in 16 bits");
    assert!(function < (1 << 12), "function number must fit in 12 bits");
    assert!(method < 4, "method must fit in 2 bits");
    assert!(access < 4, "access must fit in 2 bits");
    ControlCode((device_type << 16) | (access << 14) | (function << 2) | method)
}

impl ControlCode {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Split back into `(device_type, function, method, access)`.
    pub const fn fields(self) -> (u32, u32, u32, u32) {
        (
            self.0 >> 16,
            (self.0 >> 2) & 0x0FFF,
            self.0 & 0b11,
            (self.0 >> 14) & 0b11,
        )
    }

    /// The registry entry this code belongs to, if any.
    pub fn operation(self) -> Option<Operation> {
        Operation::from_code(self)
    }
}

impl From<ControlCode> for u32 {
    fn from(code: ControlCode) -> Self {
        code.0
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation() {
            Some(op) => write!(f, "{} (0x{:08X})", op.name(), self.0),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

/// Closed set of driver operations. The discriminant is the function number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Operation {
    EnableRs485 = 0x800,
    DisableRs485 = 0x801,
    GetRs485 = 0x802,
    EnableEchoCancel = 0x803,
    DisableEchoCancel = 0x804,
    GetEchoCancel = 0x805,
    EnableTermination = 0x806,
    DisableTermination = 0x807,
    GetTermination = 0x808,
    SetSampleRate = 0x809,
    GetSampleRate = 0x80A,
    SetTxTrigger = 0x80B,
    GetTxTrigger = 0x80C,
    SetRxTrigger = 0x80D,
    GetRxTrigger = 0x80E,
    SetClockRate = 0x80F,
    EnableIsochronous = 0x810,
    DisableIsochronous = 0x811,
    GetIsochronous = 0x812,
    EnableExternalTransmit = 0x813,
    DisableExternalTransmit = 0x814,
    GetExternalTransmit = 0x815,
    SetFrameLength = 0x816,
    GetFrameLength = 0x817,
    GetCardType = 0x818,
    Enable9Bit = 0x819,
    Disable9Bit = 0x81A,
    Get9Bit = 0x81B,
    EnableFixedBaudRate = 0x81C,
    DisableFixedBaudRate = 0x81D,
    GetFixedBaudRate = 0x81E,
}

impl Operation {
    /// Every operation, in function-number order.
    pub const ALL: [Operation; 31] = [
        Operation::EnableRs485,
        Operation::DisableRs485,
        Operation::GetRs485,
        Operation::EnableEchoCancel,
        Operation::DisableEchoCancel,
        Operation::GetEchoCancel,
        Operation::EnableTermination,
        Operation::DisableTermination,
        Operation::GetTermination,
        Operation::SetSampleRate,
        Operation::GetSampleRate,
        Operation::SetTxTrigger,
        Operation::GetTxTrigger,
        Operation::SetRxTrigger,
        Operation::GetRxTrigger,
        Operation::SetClockRate,
        Operation::EnableIsochronous,
        Operation::DisableIsochronous,
        Operation::GetIsochronous,
        Operation::EnableExternalTransmit,
        Operation::DisableExternalTransmit,
        Operation::GetExternalTransmit,
        Operation::SetFrameLength,
        Operation::GetFrameLength,
        Operation::GetCardType,
        Operation::Enable9Bit,
        Operation::Disable9Bit,
        Operation::Get9Bit,
        Operation::EnableFixedBaudRate,
        Operation::DisableFixedBaudRate,
        Operation::GetFixedBaudRate,
    ];

    pub const fn function(self) -> u32 {
        self as u32
    }

    pub const fn code(self) -> ControlCode {
        ctl_code(SERIALFC_IOCTL_MAGIC, self.function(), METHOD_BUFFERED, FILE_ANY_ACCESS)
    }

    /// Name as it appears in the vendor headers.
    pub const fn name(self) -> &'static str {
        match self {
            Operation::EnableRs485 => "IOCTL_FASTCOM_ENABLE_RS485",
            Operation::DisableRs485 => "IOCTL_FASTCOM_DISABLE_RS485",
            Operation::GetRs485 => "IOCTL_FASTCOM_GET_RS485",
            Operation::EnableEchoCancel => "IOCTL_FASTCOM_ENABLE_ECHO_CANCEL",
            Operation::DisableEchoCancel => "IOCTL_FASTCOM_DISABLE_ECHO_CANCEL",
            Operation::GetEchoCancel => "IOCTL_FASTCOM_GET_ECHO_CANCEL",
            Operation::EnableTermination => "IOCTL_FASTCOM_ENABLE_TERMINATION",
            Operation::DisableTermination => "IOCTL_FASTCOM_DISABLE_TERMINATION",
            Operation::GetTermination => "IOCTL_FASTCOM_GET_TERMINATION",
            Operation::SetSampleRate => "IOCTL_FASTCOM_SET_SAMPLE_RATE",
            Operation::GetSampleRate => "IOCTL_FASTCOM_GET_SAMPLE_RATE",
            Operation::SetTxTrigger => "IOCTL_FASTCOM_SET_TX_TRIGGER",
            Operation::GetTxTrigger => "IOCTL_FASTCOM_GET_TX_TRIGGER",
            Operation::SetRxTrigger => "IOCTL_FASTCOM_SET_RX_TRIGGER",
            Operation::GetRxTrigger => "IOCTL_FASTCOM_GET_RX_TRIGGER",
            Operation::SetClockRate => "IOCTL_FASTCOM_SET_CLOCK_RATE",
            Operation::EnableIsochronous => "IOCTL_FASTCOM_ENABLE_ISOCHRONOUS",
            Operation::DisableIsochronous => "IOCTL_FASTCOM_DISABLE_ISOCHRONOUS",
            Operation::GetIsochronous => "IOCTL_FASTCOM_GET_ISOCHRONOUS",
            Operation::EnableExternalTransmit => "IOCTL_FASTCOM_ENABLE_EXTERNAL_TRANSMIT",
            Operation::DisableExternalTransmit => "IOCTL_FASTCOM_DISABLE_EXTERNAL_TRANSMIT",
            Operation::GetExternalTransmit => "IOCTL_FASTCOM_GET_EXTERNAL_TRANSMIT",
            Operation::SetFrameLength => "IOCTL_FASTCOM_SET_FRAME_LENGTH",
            Operation::GetFrameLength => "IOCTL_FASTCOM_GET_FRAME_LENGTH",
            Operation::GetCardType => "IOCTL_FASTCOM_GET_CARD_TYPE",
            Operation::Enable9Bit => "IOCTL_FASTCOM_ENABLE_9BIT",
            Operation::Disable9Bit => "IOCTL_FASTCOM_DISABLE_9BIT",
            Operation::Get9Bit => "IOCTL_FASTCOM_GET_9BIT",
            Operation::EnableFixedBaudRate => "IOCTL_FASTCOM_ENABLE_FIXED_BAUD_RATE",
            Operation::DisableFixedBaudRate => "IOCTL_FASTCOM_DISABLE_FIXED_BAUD_RATE",
            Operation::GetFixedBaudRate => "IOCTL_FASTCOM_GET_FIXED_BAUD_RATE",
        }
    }

    pub fn from_code(code: ControlCode) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.code() == code)
    }
}

/* ── named codes, for callers that think in header terms ─────────────────── */

pub const IOCTL_FASTCOM_ENABLE_RS485: ControlCode = Operation::EnableRs485.code();
pub const IOCTL_FASTCOM_DISABLE_RS485: ControlCode = Operation::DisableRs485.code();
pub const IOCTL_FASTCOM_GET_RS485: ControlCode = Operation::GetRs485.code();

pub const IOCTL_FASTCOM_ENABLE_ECHO_CANCEL: ControlCode = Operation::EnableEchoCancel.code();
pub const IOCTL_FASTCOM_DISABLE_ECHO_CANCEL: ControlCode = Operation::DisableEchoCancel.code();
pub const IOCTL_FASTCOM_GET_ECHO_CANCEL: ControlCode = Operation::GetEchoCancel.code();

pub const IOCTL_FASTCOM_ENABLE_TERMINATION: ControlCode = Operation::EnableTermination.code();
pub const IOCTL_FASTCOM_DISABLE_TERMINATION: ControlCode = Operation::DisableTermination.code();
pub const IOCTL_FASTCOM_GET_TERMINATION: ControlCode = Operation::GetTermination.code();

pub const IOCTL_FASTCOM_SET_SAMPLE_RATE: ControlCode = Operation::SetSampleRate.code();
pub const IOCTL_FASTCOM_GET_SAMPLE_RATE: ControlCode = Operation::GetSampleRate.code();

pub const IOCTL_FASTCOM_SET_TX_TRIGGER: ControlCode = Operation::SetTxTrigger.code();
pub const IOCTL_FASTCOM_GET_TX_TRIGGER: ControlCode = Operation::GetTxTrigger.code();

pub const IOCTL_FASTCOM_SET_RX_TRIGGER: ControlCode = Operation::SetRxTrigger.code();
pub const IOCTL_FASTCOM_GET_RX_TRIGGER: ControlCode = Operation::GetRxTrigger.code();

pub const IOCTL_FASTCOM_SET_CLOCK_RATE: ControlCode = Operation::SetClockRate.code();

pub const IOCTL_FASTCOM_ENABLE_ISOCHRONOUS: ControlCode = Operation::EnableIsochronous.code();
pub const IOCTL_FASTCOM_DISABLE_ISOCHRONOUS: ControlCode = Operation::DisableIsochronous.code();
pub const IOCTL_FASTCOM_GET_ISOCHRONOUS: ControlCode = Operation::GetIsochronous.code();

pub const IOCTL_FASTCOM_ENABLE_EXTERNAL_TRANSMIT: ControlCode = Operation::EnableExternalTransmit.code();
pub const IOCTL_FASTCOM_DISABLE_EXTERNAL_TRANSMIT: ControlCode = Operation::DisableExternalTransmit.code();
pub const IOCTL_FASTCOM_GET_EXTERNAL_TRANSMIT: ControlCode = Operation::GetExternalTransmit.code();

pub const IOCTL_FASTCOM_SET_FRAME_LENGTH: ControlCode = Operation::SetFrameLength.code();
pub const IOCTL_FASTCOM_GET_FRAME_LENGTH: ControlCode = Operation::GetFrameLength.code();

pub const IOCTL_FASTCOM_GET_CARD_TYPE: ControlCode = Operation::GetCardType.code();

pub const IOCTL_FASTCOM_ENABLE_9BIT: ControlCode = Operation::Enable9Bit.code();
pub const IOCTL_FASTCOM_DISABLE_9BIT: ControlCode = Operation::Disable9Bit.code();
pub const IOCTL_FASTCOM_GET_9BIT: ControlCode = Operation::Get9Bit.code();

pub const IOCTL_FASTCOM_ENABLE_FIXED_BAUD_RATE: ControlCode = Operation::EnableFixedBaudRate.code();
pub const IOCTL_FASTCOM_DISABLE_FIXED_BAUD_RATE: ControlCode = Operation::DisableFixedBaudRate.code();
pub const IOCTL_FASTCOM_GET_FIXED_BAUD_RATE: ControlCode = Operation::GetFixedBaudRate.code();
