// src/port/mod.rs
//! Typed access to SerialFC hardware settings.
//!
//! `Port` owns a [`ControlChannel`] and turns each setting into a typed
//! accessor. The request layout for every setting shape is written once in
//! the descriptor methods (`flag`, `set_register`, `enable_mode`, ...); the
//! named accessors just pick a descriptor from [`settings`].
//!
//! Every accessor performs exactly one control request, never retries and
//! never caches.

pub mod profile;
pub mod settings;

use shared::ControlCode;

use crate::comms::{ControlChannel, ControlRequest, wire::Wire};
use crate::error::{DeviceFault, Result, SerialFcError};
use settings::*;

pub use profile::{ApplyReport, ModeConfig, PortProfile};
pub use settings::{CardKind, Setting, SettingValue};

pub struct Port<C: ControlChannel> {
    channel: C,
}

#[cfg(windows)]
impl Port<crate::comms::ioctl::ComPort> {
    /// Open `\\.\COM<port_number>`.
    pub fn connect(port_number: u32) -> Result<Self> {
        Ok(Self::new(crate::comms::ioctl::ComPort::connect(port_number)?))
    }

    pub fn open(path: &str) -> Result<Self> {
        Ok(Self::new(crate::comms::ioctl::ComPort::open(path)?))
    }
}

impl<C: ControlChannel> Port<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Release the handle now, surfacing any close error.
    pub fn close(self) -> Result<()> {
        self.channel.close().map_err(SerialFcError::from)
    }

    /* ── request plumbing ───────────────────────────────────────────────── */

    fn exchange(&mut self, code: ControlCode, input: Option<&[u8]>, expected: usize) -> Result<Vec<u8>> {
        let request = ControlRequest::new(code, input, expected);
        log::debug!("{code}: {} byte(s) in, {expected} expected", request.input_len());

        let reply = self.channel.control(&request).map_err(|source| {
            log::debug!("{code} rejected: {source}");
            SerialFcError::Device { code, source }
        })?;

        if reply.len() != expected {
            log::warn!("{code} returned {} byte(s), expected {expected}", reply.len());
            return Err(SerialFcError::Device {
                code,
                source: DeviceFault::LengthMismatch { expected, actual: reply.len() },
            });
        }
        Ok(reply)
    }

    fn command(&mut self, code: ControlCode, input: Option<&[u8]>) -> Result<()> {
        self.exchange(code, input, 0).map(drop)
    }

    fn query<T: Wire>(&mut self, code: ControlCode) -> Result<T> {
        let reply = self.exchange(code, None, T::LEN)?;
        T::decode(&reply).ok_or(SerialFcError::Device {
            code,
            source: DeviceFault::LengthMismatch { expected: T::LEN, actual: reply.len() },
        })
    }

    /* ── descriptor-driven access ───────────────────────────────────────── */

    pub fn flag(&mut self, setting: Flag) -> Result<bool> {
        self.query(setting.get)
    }

    pub fn set_flag(&mut self, setting: Flag, on: bool) -> Result<()> {
        let code = if on { setting.enable } else { setting.disable };
        self.command(code, None)
    }

    pub fn register(&mut self, setting: Register) -> Result<u32> {
        self.query(setting.get)
    }

    pub fn set_register(&mut self, setting: Register, value: u32) -> Result<()> {
        self.command(setting.set, Some(value.encode().as_slice()))
    }

    pub fn write_only(&mut self, setting: WriteOnly, value: u32) -> Result<()> {
        self.command(setting.set, Some(value.encode().as_slice()))
    }

    /// Raw mode value as the driver reports it; disabled sentinels are
    /// passed through untouched.
    pub fn mode(&mut self, setting: Mode) -> Result<i32> {
        self.query(setting.get)
    }

    pub fn enable_mode(&mut self, setting: Mode, parameter: i32) -> Result<()> {
        self.command(setting.enable, Some(parameter.encode().as_slice()))
    }

    pub fn disable_mode(&mut self, setting: Mode) -> Result<()> {
        self.command(setting.disable, None)
    }

    pub fn classify(&mut self, setting: Classification) -> Result<CardKind> {
        let raw: u32 = self.query(setting.get)?;
        CardKind::try_from(raw)
    }

    /// Read any setting by descriptor. Write-only settings fail with
    /// `UnsupportedOperation` without touching the device.
    pub fn read(&mut self, setting: Setting) -> Result<SettingValue> {
        match setting {
            Setting::Flag(s) => self.flag(s).map(SettingValue::Flag),
            Setting::Register(s) => self.register(s).map(SettingValue::Word),
            Setting::WriteOnly(s) => Err(SerialFcError::UnsupportedOperation(s.name)),
            Setting::Mode(s) => self.mode(s).map(SettingValue::Mode),
            Setting::Classification(s) => self.classify(s).map(SettingValue::Card),
        }
    }

    /// Read every readable setting, one result each, so a feature the card
    /// lacks does not hide the others.
    pub fn snapshot(&mut self) -> Vec<(&'static str, Result<SettingValue>)> {
        Setting::ALL
            .into_iter()
            .filter(Setting::is_readable)
            .map(|setting| (setting.name(), self.read(setting)))
            .collect()
    }

    /* ── named accessors ────────────────────────────────────────────────── */

    pub fn rs485(&mut self) -> Result<bool> {
        self.flag(RS485)
    }

    pub fn set_rs485(&mut self, on: bool) -> Result<()> {
        self.set_flag(RS485, on)
    }

    pub fn echo_cancel(&mut self) -> Result<bool> {
        self.flag(ECHO_CANCEL)
    }

    pub fn set_echo_cancel(&mut self, on: bool) -> Result<()> {
        self.set_flag(ECHO_CANCEL, on)
    }

    pub fn termination(&mut self) -> Result<bool> {
        self.flag(TERMINATION)
    }

    pub fn set_termination(&mut self, on: bool) -> Result<()> {
        self.set_flag(TERMINATION, on)
    }

    pub fn nine_bit(&mut self) -> Result<bool> {
        self.flag(NINE_BIT)
    }

    pub fn set_nine_bit(&mut self, on: bool) -> Result<()> {
        self.set_flag(NINE_BIT, on)
    }

    pub fn sample_rate(&mut self) -> Result<u32> {
        self.register(SAMPLE_RATE)
    }

    pub fn set_sample_rate(&mut self, rate: u32) -> Result<()> {
        self.set_register(SAMPLE_RATE, rate)
    }

    pub fn tx_trigger(&mut self) -> Result<u32> {
        self.register(TX_TRIGGER)
    }

    pub fn set_tx_trigger(&mut self, level: u32) -> Result<()> {
        self.set_register(TX_TRIGGER, level)
    }

    pub fn rx_trigger(&mut self) -> Result<u32> {
        self.register(RX_TRIGGER)
    }

    pub fn set_rx_trigger(&mut self, level: u32) -> Result<()> {
        self.set_register(RX_TRIGGER, level)
    }

    pub fn frame_length(&mut self) -> Result<u32> {
        self.register(FRAME_LENGTH)
    }

    pub fn set_frame_length(&mut self, num_chars: u32) -> Result<()> {
        self.set_register(FRAME_LENGTH, num_chars)
    }

    /// Clock generator rate in Hz (FSCC: 200 Hz - 270 MHz, Async-335:
    /// 6 MHz - 200 MHz). There is no way to read it back.
    pub fn set_clock_rate(&mut self, rate: u32) -> Result<()> {
        self.write_only(CLOCK_RATE, rate)
    }

    pub fn isochronous(&mut self) -> Result<i32> {
        self.mode(ISOCHRONOUS)
    }

    /// `mode` selects one of the card's clock source combinations (0-8).
    pub fn enable_isochronous(&mut self, mode: i32) -> Result<()> {
        self.enable_mode(ISOCHRONOUS, mode)
    }

    pub fn disable_isochronous(&mut self) -> Result<()> {
        self.disable_mode(ISOCHRONOUS)
    }

    pub fn external_transmit(&mut self) -> Result<i32> {
        self.mode(EXTERNAL_TRANSMIT)
    }

    pub fn enable_external_transmit(&mut self, num_frames: i32) -> Result<()> {
        self.enable_mode(EXTERNAL_TRANSMIT, num_frames)
    }

    pub fn disable_external_transmit(&mut self) -> Result<()> {
        self.disable_mode(EXTERNAL_TRANSMIT)
    }

    pub fn fixed_baud_rate(&mut self) -> Result<i32> {
        self.mode(FIXED_BAUD_RATE)
    }

    pub fn enable_fixed_baud_rate(&mut self, rate: i32) -> Result<()> {
        self.enable_mode(FIXED_BAUD_RATE, rate)
    }

    pub fn disable_fixed_baud_rate(&mut self) -> Result<()> {
        self.disable_mode(FIXED_BAUD_RATE)
    }

    pub fn card_type(&mut self) -> Result<CardKind> {
        self.classify(CARD_TYPE)
    }
}
