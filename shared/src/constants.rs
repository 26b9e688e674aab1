/// Device-type tag the SerialFC driver registers its IOCTLs under.
pub const SERIALFC_IOCTL_MAGIC: u32 = 0x8019;
/// `METHOD_BUFFERED`
pub const METHOD_BUFFERED: u32 = 0;
/// `FILE_ANY_ACCESS`
pub const FILE_ANY_ACCESS: u32 = 0;
/// First vendor function number; the rest follow sequentially.
pub const FUNCTION_BASE: u32 = 0x800;

/// Win32 device namespace prefix for COM ports.
pub const COM_PREFIX: &str = r"\\.\COM";

/// Wire sizes understood by the driver.
pub const BOOL_LEN: usize = 1;
pub const WORD_LEN: usize = 4;

/// `\\.\COM<n>` for the given port number.
#[cfg(feature = "std")]
pub fn device_path(port_number: u32) -> String {
    format!("{COM_PREFIX}{port_number}")
}
