//! Control-channel plumbing between a `Port` and the driver.
//!
//! `ControlChannel` is the only capability the port layer consumes: one
//! synchronous request/response exchange per call. The Windows
//! implementation lives in [`ioctl`]; tests drive `Port` through fakes.

#[cfg(windows)]
pub mod ioctl;
pub mod wire;

use crate::error::{DeviceFault, TransportError};
use shared::ControlCode;

/// One outbound control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRequest<'a> {
    pub code:       ControlCode,
    pub input:      Option<&'a [u8]>,
    pub output_len: usize,
}

impl<'a> ControlRequest<'a> {
    pub fn new(code: ControlCode, input: Option<&'a [u8]>, output_len: usize) -> Self {
        Self { code, input, output_len }
    }

    pub fn input_len(&self) -> usize {
        self.input.map_or(0, <[u8]>::len)
    }
}

/// A handle that can carry driver control requests.
///
/// `control` returns exactly the bytes the driver produced, which may be
/// fewer than `output_len`; length validation is the caller's job.
/// Implementations see one request at a time (`&mut self`).
pub trait ControlChannel {
    fn control(&mut self, request: &ControlRequest<'_>) -> Result<Vec<u8>, DeviceFault>;

    /// Release the underlying handle, reporting failures.
    fn close(self) -> Result<(), TransportError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

impl<C: ControlChannel + ?Sized> ControlChannel for &mut C {
    fn control(&mut self, request: &ControlRequest<'_>) -> Result<Vec<u8>, DeviceFault> {
        (**self).control(request)
    }
}

impl<C: ControlChannel> ControlChannel for Box<C> {
    fn control(&mut self, request: &ControlRequest<'_>) -> Result<Vec<u8>, DeviceFault> {
        (**self).control(request)
    }

    fn close(self) -> Result<(), TransportError> {
        (*self).close()
    }
}
