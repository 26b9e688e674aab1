//! Descriptor table for every hardware setting the card exposes.
//!
//! Each setting belongs to exactly one shape, and the shape decides the
//! request layout:
//!
//! | shape            | write                         | read          |
//! |------------------|-------------------------------|---------------|
//! | `Flag`           | enable / disable, no payload  | 1 byte bool   |
//! | `Register`       | set, 4 byte u32               | 4 byte u32    |
//! | `WriteOnly`      | set, 4 byte u32               | (none)        |
//! | `Mode`           | enable(i32) / disable         | 4 byte i32    |
//! | `Classification` | (none)                        | 4 byte u32    |

use std::fmt;

use shared::ControlCode;
use shared::ioctl::*;

use crate::error::SerialFcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub name:    &'static str,
    pub enable:  ControlCode,
    pub disable: ControlCode,
    pub get:     ControlCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub name: &'static str,
    pub set:  ControlCode,
    pub get:  ControlCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOnly {
    pub name: &'static str,
    pub set:  ControlCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub name:    &'static str,
    pub enable:  ControlCode,
    pub disable: ControlCode,
    pub get:     ControlCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub name: &'static str,
    pub get:  ControlCode,
}

pub const RS485: Flag = Flag {
    name:    "rs485",
    enable:  IOCTL_FASTCOM_ENABLE_RS485,
    disable: IOCTL_FASTCOM_DISABLE_RS485,
    get:     IOCTL_FASTCOM_GET_RS485,
};

pub const ECHO_CANCEL: Flag = Flag {
    name:    "echo_cancel",
    enable:  IOCTL_FASTCOM_ENABLE_ECHO_CANCEL,
    disable: IOCTL_FASTCOM_DISABLE_ECHO_CANCEL,
    get:     IOCTL_FASTCOM_GET_ECHO_CANCEL,
};

/// Only the Async-PCIe family implements software termination.
pub const TERMINATION: Flag = Flag {
    name:    "termination",
    enable:  IOCTL_FASTCOM_ENABLE_TERMINATION,
    disable: IOCTL_FASTCOM_DISABLE_TERMINATION,
    get:     IOCTL_FASTCOM_GET_TERMINATION,
};

pub const NINE_BIT: Flag = Flag {
    name:    "nine_bit",
    enable:  IOCTL_FASTCOM_ENABLE_9BIT,
    disable: IOCTL_FASTCOM_DISABLE_9BIT,
    get:     IOCTL_FASTCOM_GET_9BIT,
};

/// Valid values depend on the family: FSCC 4-16, Async-335 8 or 16,
/// Async-PCIe 4, 8 or 16.
pub const SAMPLE_RATE: Register = Register {
    name: "sample_rate",
    set:  IOCTL_FASTCOM_SET_SAMPLE_RATE,
    get:  IOCTL_FASTCOM_GET_SAMPLE_RATE,
};

pub const TX_TRIGGER: Register = Register {
    name: "tx_trigger",
    set:  IOCTL_FASTCOM_SET_TX_TRIGGER,
    get:  IOCTL_FASTCOM_GET_TX_TRIGGER,
};

pub const RX_TRIGGER: Register = Register {
    name: "rx_trigger",
    set:  IOCTL_FASTCOM_SET_RX_TRIGGER,
    get:  IOCTL_FASTCOM_GET_RX_TRIGGER,
};

pub const FRAME_LENGTH: Register = Register {
    name: "frame_length",
    set:  IOCTL_FASTCOM_SET_FRAME_LENGTH,
    get:  IOCTL_FASTCOM_GET_FRAME_LENGTH,
};

pub const CLOCK_RATE: WriteOnly = WriteOnly {
    name: "clock_rate",
    set:  IOCTL_FASTCOM_SET_CLOCK_RATE,
};

/// Apply external clocks only after enabling, and remove them before
/// disabling, or the card floods the host with interrupts.
pub const ISOCHRONOUS: Mode = Mode {
    name:    "isochronous",
    enable:  IOCTL_FASTCOM_ENABLE_ISOCHRONOUS,
    disable: IOCTL_FASTCOM_DISABLE_ISOCHRONOUS,
    get:     IOCTL_FASTCOM_GET_ISOCHRONOUS,
};

pub const EXTERNAL_TRANSMIT: Mode = Mode {
    name:    "external_transmit",
    enable:  IOCTL_FASTCOM_ENABLE_EXTERNAL_TRANSMIT,
    disable: IOCTL_FASTCOM_DISABLE_EXTERNAL_TRANSMIT,
    get:     IOCTL_FASTCOM_GET_EXTERNAL_TRANSMIT,
};

pub const FIXED_BAUD_RATE: Mode = Mode {
    name:    "fixed_baud_rate",
    enable:  IOCTL_FASTCOM_ENABLE_FIXED_BAUD_RATE,
    disable: IOCTL_FASTCOM_DISABLE_FIXED_BAUD_RATE,
    get:     IOCTL_FASTCOM_GET_FIXED_BAUD_RATE,
};

pub const CARD_TYPE: Classification = Classification {
    name: "card_type",
    get:  IOCTL_FASTCOM_GET_CARD_TYPE,
};

/// Any setting, for code that walks the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Flag(Flag),
    Register(Register),
    WriteOnly(WriteOnly),
    Mode(Mode),
    Classification(Classification),
}

impl Setting {
    pub const ALL: [Setting; 13] = [
        Setting::Flag(RS485),
        Setting::Flag(ECHO_CANCEL),
        Setting::Flag(TERMINATION),
        Setting::Flag(NINE_BIT),
        Setting::Register(SAMPLE_RATE),
        Setting::Register(TX_TRIGGER),
        Setting::Register(RX_TRIGGER),
        Setting::Register(FRAME_LENGTH),
        Setting::WriteOnly(CLOCK_RATE),
        Setting::Mode(ISOCHRONOUS),
        Setting::Mode(EXTERNAL_TRANSMIT),
        Setting::Mode(FIXED_BAUD_RATE),
        Setting::Classification(CARD_TYPE),
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Setting::Flag(s) => s.name,
            Setting::Register(s) => s.name,
            Setting::WriteOnly(s) => s.name,
            Setting::Mode(s) => s.name,
            Setting::Classification(s) => s.name,
        }
    }

    /// Get code, if the setting can be read back.
    pub fn get_code(&self) -> Option<ControlCode> {
        match self {
            Setting::Flag(s) => Some(s.get),
            Setting::Register(s) => Some(s.get),
            Setting::WriteOnly(_) => None,
            Setting::Mode(s) => Some(s.get),
            Setting::Classification(s) => Some(s.get),
        }
    }

    pub fn is_readable(&self) -> bool {
        self.get_code().is_some()
    }

    pub fn codes(&self) -> Vec<ControlCode> {
        match *self {
            Setting::Flag(s) => vec![s.enable, s.disable, s.get],
            Setting::Register(s) => vec![s.set, s.get],
            Setting::WriteOnly(s) => vec![s.set],
            Setting::Mode(s) => vec![s.enable, s.disable, s.get],
            Setting::Classification(s) => vec![s.get],
        }
    }
}

/// Card family reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CardKind {
    Pci = 0,
    Pcie = 1,
    Fscc = 2,
    Unknown = 3,
}

impl TryFrom<u32> for CardKind {
    type Error = SerialFcError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(CardKind::Pci),
            1 => Ok(CardKind::Pcie),
            2 => Ok(CardKind::Fscc),
            3 => Ok(CardKind::Unknown),
            other => Err(SerialFcError::UnrecognizedCardType(other)),
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CardKind::Pci => "PCI",
            CardKind::Pcie => "PCIe",
            CardKind::Fscc => "FSCC",
            CardKind::Unknown => "Unknown",
        })
    }
}

/// A value read back from any readable setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Word(u32),
    Mode(i32),
    Card(CardKind),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Flag(on) => write!(f, "{}", if *on { "on" } else { "off" }),
            SettingValue::Word(v) => write!(f, "{v}"),
            SettingValue::Mode(v) => write!(f, "{v}"),
            SettingValue::Card(kind) => write!(f, "{kind}"),
        }
    }
}
