//! The 132-byte fixed header: everything before the tag directory.

use crate::error::ParseError;
use crate::reader::{date_time, signature, u32_be, u64_be, xyz};
use crate::types::{DateTime, Signature, Xyz};

pub const HEADER_SIZE: usize = 132;

const D50: Xyz = Xyz {
    x: 0.9642,
    y: 1.0,
    z: 0.8249,
};
const D50_TOLERANCE: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub size: usize,
    pub cmm_type: Signature,
    pub version: u32,
    pub profile_class: Signature,
    pub data_color_space: Signature,
    pub pcs: Signature,
    pub creation_date_time: DateTime,
    pub platform: Signature,
    pub flags: u32,
    pub device_manufacturer: Signature,
    pub device_model: Signature,
    pub device_attributes: u64,
    pub rendering_intent: u32,
    pub illuminant: Xyz,
    pub creator: Signature,
    pub profile_id: [u8; 16],
    pub tag_count: u32,
}

impl Header {
    pub fn version_major(&self) -> u8 {
        (self.version >> 24) as u8
    }

    pub fn parse(buf: &[u8]) -> Result<Header, ParseError> {
        if buf.len() < HEADER_SIZE {
            return Err(ParseError::Truncated {
                expected: HEADER_SIZE,
                actual: buf.len(),
            });
        }

        if signature(buf, 36) != Signature::ACSP {
            return Err(ParseError::BadSignature);
        }

        let version = u32_be(buf, 8);
        let major = (version >> 24) as u8;
        if major > 4 {
            return Err(ParseError::UnsupportedVersion { major });
        }

        let size = u32_be(buf, 0) as usize;
        let tag_count = u32_be(buf, 128);
        // Wide accumulator: tag_count is attacker-controlled.
        let min_size = HEADER_SIZE as u64 + tag_count as u64 * 12;
        if (size as u64) < min_size || size > buf.len() {
            return Err(ParseError::BadProfileSize {
                declared: size,
                min: min_size as usize,
                buffer_len: buf.len(),
            });
        }

        let illuminant = xyz(buf, 68);
        if (illuminant.x - D50.x).abs() > D50_TOLERANCE
            || (illuminant.y - D50.y).abs() > D50_TOLERANCE
            || (illuminant.z - D50.z).abs() > D50_TOLERANCE
        {
            return Err(ParseError::NonD50Illuminant {
                x: illuminant.x,
                y: illuminant.y,
                z: illuminant.z,
            });
        }

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&buf[84..100]);

        Ok(Header {
            size,
            cmm_type: signature(buf, 4),
            version,
            profile_class: signature(buf, 12),
            data_color_space: signature(buf, 16),
            pcs: signature(buf, 20),
            creation_date_time: date_time(buf, 24),
            platform: signature(buf, 40),
            flags: u32_be(buf, 44),
            device_manufacturer: signature(buf, 48),
            device_model: signature(buf, 52),
            device_attributes: u64_be(buf, 56),
            rendering_intent: u32_be(buf, 64),
            illuminant,
            creator: signature(buf, 80),
            profile_id,
            tag_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_valid_header() -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&(HEADER_SIZE as u32).to_be_bytes());
        buf[36..40].copy_from_slice(b"acsp");
        buf[68..72].copy_from_slice(&0x0000F6D6i32.to_be_bytes());
        buf[72..76].copy_from_slice(&0x00010000i32.to_be_bytes());
        buf[76..80].copy_from_slice(&0x0000D32Di32.to_be_bytes());
        buf
    }

    #[test]
    fn parses_minimal_header() {
        let buf = minimal_valid_header();
        let header = Header::parse(&buf).unwrap();
        assert_eq!(header.tag_count, 0);
        assert_eq!(header.size, HEADER_SIZE);
    }

    #[test]
    fn rejects_truncated_buffer() {
        let buf = [0u8; 50];
        assert!(matches!(
            Header::parse(&buf),
            Err(ParseError::Truncated { .. })
        ));
    }

    #[test]
    fn rejects_missing_acsp_signature() {
        let mut buf = minimal_valid_header();
        buf[36..40].copy_from_slice(b"xxxx");
        assert!(matches!(
            Header::parse(&buf),
            Err(ParseError::BadSignature)
        ));
    }

    #[test]
    fn rejects_version_above_four() {
        let mut buf = minimal_valid_header();
        buf[8] = 5;
        assert!(matches!(
            Header::parse(&buf),
            Err(ParseError::UnsupportedVersion { major: 5 })
        ));
    }

    #[test]
    fn rejects_non_d50_illuminant() {
        let mut buf = minimal_valid_header();
        buf[68..72].copy_from_slice(&0i32.to_be_bytes());
        assert!(matches!(
            Header::parse(&buf),
            Err(ParseError::NonD50Illuminant { .. })
        ));
    }

    #[test]
    fn rejects_declared_size_smaller_than_directory() {
        let mut buf = minimal_valid_header();
        buf[128..132].copy_from_slice(&1u32.to_be_bytes()); // tag_count = 1, but size unchanged
        assert!(matches!(
            Header::parse(&buf),
            Err(ParseError::BadProfileSize { .. })
        ));
    }
}
