// src/error.rs
//! Error taxonomy for the control layer.
//!
//! `TransportError` covers acquiring and releasing the port handle,
//! `DeviceFault` is why a single control request failed, and
//! `SerialFcError` is what every `Port` accessor returns.

use shared::ControlCode;
use std::io;
use thiserror::Error;

/// Opening or closing the port failed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("port '{0}' not found")]
    NotFound(String),

    #[error("insufficient permissions to open '{0}'")]
    PermissionDenied(String),

    #[error("I/O error on '{target}': {source}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// Why the driver rejected (or garbled) a control request.
#[derive(Debug, Error)]
pub enum DeviceFault {
    #[error("operation not supported by this card")]
    Unsupported,

    #[error("handle is closed or invalid")]
    InvalidHandle,

    #[error("insufficient privilege")]
    PermissionDenied,

    #[error("expected {expected} response byte(s), driver returned {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("OS error: {0}")]
    Os(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum SerialFcError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("control request {code} failed: {source}")]
    Device {
        code: ControlCode,
        #[source]
        source: DeviceFault,
    },

    #[error("card reported unrecognized type {0}")]
    UnrecognizedCardType(u32),

    #[error("'{0}' cannot be read back")]
    UnsupportedOperation(&'static str),
}

impl SerialFcError {
    /// The device-level cause, when a control request was issued.
    pub fn fault(&self) -> Option<&DeviceFault> {
        match self {
            SerialFcError::Device { source, .. } => Some(source),
            _ => None,
        }
    }

    /// True when the card does not implement the requested feature.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.fault(), Some(DeviceFault::Unsupported))
    }
}

pub type Result<T> = std::result::Result<T, SerialFcError>;
