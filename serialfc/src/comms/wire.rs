//! Fixed-width payload encodings expected by the driver.
//!
//! No framing: booleans are one byte, 32-bit values four bytes
//! little-endian. The driver does not validate lengths beyond what it reads.

use shared::constants::{BOOL_LEN, WORD_LEN};

pub trait Wire: Sized + Copy {
    const LEN: usize;

    fn encode(self) -> Vec<u8>;

    /// `None` unless `bytes` is exactly `LEN` long.
    fn decode(bytes: &[u8]) -> Option<Self>;
}

impl Wire for bool {
    const LEN: usize = BOOL_LEN;

    fn encode(self) -> Vec<u8> {
        vec![u8::from(self)]
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b] => Some(*b != 0),
            _ => None,
        }
    }
}

impl Wire for u32 {
    const LEN: usize = WORD_LEN;

    fn encode(self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(u32::from_le_bytes)
    }
}

impl Wire for i32 {
    const LEN: usize = WORD_LEN;

    fn encode(self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(i32::from_le_bytes)
    }
}
