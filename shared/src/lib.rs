#![cfg_attr(not(feature = "std"), no_std)]

//! Control-code registry shared by everything that talks to the SerialFC
//! driver. No allocation, no dependencies.

pub mod constants;
pub mod ioctl;

pub use ioctl::{ControlCode, Operation, ctl_code};
