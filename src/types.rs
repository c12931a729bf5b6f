//! Small value types shared across the profile header, tag directory,
//! and tag payloads.

use core::fmt;

/// A 4-byte ICC signature (tag type, device class, color space, ...),
/// stored host-endian but always read from big-endian bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub u32);

impl Signature {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Signature(u32::from_be_bytes(bytes))
    }

    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes)
    }

    pub fn as_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.as_bytes();
        match core::str::from_utf8(&bytes) {
            Ok(s) if s.chars().all(|c| c.is_ascii_graphic() || c == ' ') => {
                write!(f, "Signature({s:?})")
            }
            _ => write!(f, "Signature(0x{:08x})", self.0),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.as_bytes();
        match core::str::from_utf8(&bytes) {
            Ok(s) if s.chars().all(|c| c.is_ascii_graphic() || c == ' ') => write!(f, "{s}"),
            _ => write!(f, "0x{:08x}", self.0),
        }
    }
}

macro_rules! signature_const {
    ($name:ident, $bytes:expr) => {
        pub const $name: Signature = Signature::new(*$bytes);
    };
}

impl Signature {
    signature_const!(ACSP, b"acsp");
    signature_const!(RTRC, b"rTRC");
    signature_const!(GTRC, b"gTRC");
    signature_const!(BTRC, b"bTRC");
    signature_const!(KTRC, b"kTRC");
    signature_const!(RXYZ, b"rXYZ");
    signature_const!(GXYZ, b"gXYZ");
    signature_const!(BXYZ, b"bXYZ");
    signature_const!(A2B0, b"A2B0");
    signature_const!(A2B1, b"A2B1");
    signature_const!(A2B2, b"A2B2");

    signature_const!(TYPE_XYZ, b"XYZ ");
    signature_const!(TYPE_CURV, b"curv");
    signature_const!(TYPE_PARA, b"para");
    signature_const!(TYPE_MFT1, b"mft1");
    signature_const!(TYPE_MFT2, b"mft2");
    signature_const!(TYPE_MAB, b"mAB ");
}

/// An s15.16 fixed-point XYZ triple, decoded to floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// The 12-byte dateTimeNumber record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}
