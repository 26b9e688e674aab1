//! IOCTL communication with the SerialFC driver.
//!
//! Wraps `CreateFileW` / `DeviceIoControl` / `CloseHandle` behind
//! [`ControlChannel`], mapping Win32 error codes onto [`DeviceFault`] and
//! [`TransportError`].

use std::{
    ffi::{OsStr, c_void},
    io, mem,
    os::windows::prelude::OsStrExt,
    ptr,
};

use shared::constants::device_path;
use windows_sys::Win32::{
    Foundation::{
        CloseHandle, ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_INVALID_FUNCTION,
        ERROR_INVALID_HANDLE, ERROR_NOT_SUPPORTED, ERROR_PATH_NOT_FOUND, GENERIC_READ,
        GENERIC_WRITE, HANDLE, INVALID_HANDLE_VALUE,
    },
    Storage::FileSystem::{
        CreateFileW, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
    },
    System::IO::DeviceIoControl,
};

use super::{ControlChannel, ControlRequest};
use crate::error::{DeviceFault, TransportError};

/// RAII wrapper around an open COM port handle: opened on construction,
/// closed on drop unless `close` already did it.
pub struct ComPort {
    handle: HANDLE,
    path:   String,
}

// The handle is owned exclusively; requests are serialized through `&mut self`.
unsafe impl Send for ComPort {}

impl ComPort {
    /// Open `\\.\COM<port_number>`.
    pub fn connect(port_number: u32) -> Result<Self, TransportError> {
        Self::open(&device_path(port_number))
    }

    /// Open an arbitrary device path for synchronous read/write.
    pub fn open(path: &str) -> Result<Self, TransportError> {
        let wide: Vec<u16> = OsStr::new(path)
            .encode_wide()
            .chain(Some(0))
            .collect();

        let handle = unsafe {
            CreateFileW(
                wide.as_ptr(),
                GENERIC_READ | GENERIC_WRITE,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                ptr::null(),
                OPEN_EXISTING,
                FILE_ATTRIBUTE_NORMAL,
                ptr::null_mut(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(open_error(path, io::Error::last_os_error()));
        }

        log::info!("Opened {path}");
        Ok(Self { handle, path: path.to_owned() })
    }
}

impl ControlChannel for ComPort {
    fn control(&mut self, request: &ControlRequest<'_>) -> Result<Vec<u8>, DeviceFault> {
        let (in_ptr, in_len): (*const c_void, u32) = match request.input {
            Some(bytes) => (bytes.as_ptr().cast(), bytes.len() as u32),
            None => (ptr::null(), 0),
        };

        let mut out = vec![0u8; request.output_len];
        let out_ptr: *mut c_void = if out.is_empty() {
            ptr::null_mut()
        } else {
            out.as_mut_ptr().cast()
        };
        let mut returned: u32 = 0;

        let ok = unsafe {
            DeviceIoControl(
                self.handle,
                request.code.raw(),
                in_ptr,
                in_len,
                out_ptr,
                out.len() as u32,
                &mut returned,
                ptr::null_mut(),
            )
        };
        if ok == 0 {
            return Err(device_fault(io::Error::last_os_error()));
        }

        out.truncate(returned as usize);
        Ok(out)
    }

    fn close(mut self) -> Result<(), TransportError> {
        let handle = mem::replace(&mut self.handle, INVALID_HANDLE_VALUE);
        if unsafe { CloseHandle(handle) } == 0 {
            return Err(TransportError::Io {
                target: self.path.clone(),
                source: io::Error::last_os_error(),
            });
        }
        log::info!("Closed {}", self.path);
        Ok(())
    }
}

impl Drop for ComPort {
    fn drop(&mut self) {
        if self.handle != INVALID_HANDLE_VALUE && unsafe { CloseHandle(self.handle) } == 0 {
            log::warn!(
                "CloseHandle on {} failed: {}",
                self.path,
                io::Error::last_os_error()
            );
        }
    }
}

fn open_error(path: &str, err: io::Error) -> TransportError {
    match err.raw_os_error().map(|code| code as u32) {
        Some(ERROR_FILE_NOT_FOUND | ERROR_PATH_NOT_FOUND) => TransportError::NotFound(path.into()),
        Some(ERROR_ACCESS_DENIED) => TransportError::PermissionDenied(path.into()),
        _ => TransportError::Io { target: path.into(), source: err },
    }
}

fn device_fault(err: io::Error) -> DeviceFault {
    match err.raw_os_error().map(|code| code as u32) {
        Some(ERROR_NOT_SUPPORTED | ERROR_INVALID_FUNCTION) => DeviceFault::Unsupported,
        Some(ERROR_INVALID_HANDLE) => DeviceFault::InvalidHandle,
        Some(ERROR_ACCESS_DENIED) => DeviceFault::PermissionDenied,
        _ => DeviceFault::Os(err),
    }
}
