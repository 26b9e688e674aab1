// src/lib.rs
// ────────────────────────────────────────────────────────────────────────────
// Public library entry point.  Re-export everything for both `main.rs` and
// integration tests.

pub mod comms;
pub mod config;
pub mod error;
pub mod port;

pub use comms::{ControlChannel, ControlRequest};
pub use error::{DeviceFault, Result, SerialFcError, TransportError};
pub use port::{CardKind, Port, PortProfile, Setting, SettingValue};
