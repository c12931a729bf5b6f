//! The tag directory: a flat table of (signature, offset, size)
//! entries starting at byte 132, pointing at payloads elsewhere in the
//! profile buffer. Entries are never materialized into a collection —
//! every lookup re-scans the raw bytes directly, so the whole module
//! allocates nothing.

use crate::error::ParseError;
use crate::reader::{signature, u32_be};
use crate::types::Signature;

pub const DIRECTORY_START: usize = 132;
const ENTRY_SIZE: usize = 12;

/// One directory entry together with its payload, borrowed straight
/// out of the profile buffer.
#[derive(Clone, Copy)]
pub struct Tag<'a> {
    pub signature: Signature,
    pub ty: Signature,
    pub buf: &'a [u8],
}

impl Tag<'_> {
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl core::fmt::Debug for Tag<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tag")
            .field("signature", &self.signature)
            .field("ty", &self.ty)
            .field("size", &self.buf.len())
            .finish()
    }
}

struct RawEntry {
    signature: Signature,
    offset: usize,
    size: usize,
}

fn entry_at(buf: &[u8], index: usize) -> RawEntry {
    let entry_offset = DIRECTORY_START + index * ENTRY_SIZE;
    RawEntry {
        signature: signature(buf, entry_offset),
        offset: u32_be(buf, entry_offset + 4) as usize,
        size: u32_be(buf, entry_offset + 8) as usize,
    }
}

fn tag_from_entry<'a>(buf: &'a [u8], entry: &RawEntry) -> Tag<'a> {
    let payload = &buf[entry.offset..entry.offset + entry.size];
    Tag {
        signature: entry.signature,
        ty: signature(payload, 0),
        buf: payload,
    }
}

/// Validates every directory entry against `profile_size` without
/// storing any of them. This check applies unconditionally to every
/// entry, not only to the tags later pre-parsed: an out-of-bounds
/// entry anywhere in the directory fails the whole profile.
pub(crate) fn validate_directory(
    buf: &[u8],
    tag_count: u32,
    profile_size: usize,
) -> Result<(), ParseError> {
    for i in 0..tag_count as usize {
        let entry = entry_at(buf, i);
        if entry.size < 4 {
            return Err(ParseError::TagTooSmall {
                signature: entry.signature,
                size: entry.size,
            });
        }
        // Wide accumulator: offset/size are attacker-controlled u32s.
        let tag_end = entry.offset as u64 + entry.size as u64;
        if tag_end > profile_size as u64 {
            return Err(ParseError::TagOutOfBounds {
                signature: entry.signature,
                offset: entry.offset,
                size: entry.size,
                profile_size,
            });
        }
    }
    Ok(())
}

/// Direct indexing into the directory. Out-of-range is a no-op
/// (`None`), which subsumes the reference's documented off-by-one
/// tolerance (`index == tag_count`): both read nothing.
pub(crate) fn tag_by_index<'a>(buf: &'a [u8], tag_count: u32, index: u32) -> Option<Tag<'a>> {
    if index >= tag_count {
        return None;
    }
    let entry = entry_at(buf, index as usize);
    Some(tag_from_entry(buf, &entry))
}

/// Linear scan of the directory; first match wins.
pub(crate) fn tag_by_signature<'a>(
    buf: &'a [u8],
    tag_count: u32,
    sig: Signature,
) -> Option<Tag<'a>> {
    (0..tag_count as usize)
        .map(|i| entry_at(buf, i))
        .find(|e| e.signature == sig)
        .map(|e| tag_from_entry(buf, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_header_with_tags(tags: &[(Signature, u32, u32)]) -> Vec<u8> {
        let mut buf = vec![0u8; 132];
        buf[36..40].copy_from_slice(b"acsp");
        for (i, (sig, offset, size)) in tags.iter().enumerate() {
            let e = 132 + i * 12;
            buf.resize(buf.len().max(e + 12), 0);
            buf[e..e + 4].copy_from_slice(&sig.as_bytes());
            buf[e + 4..e + 8].copy_from_slice(&offset.to_be_bytes());
            buf[e + 8..e + 12].copy_from_slice(&size.to_be_bytes());
        }
        buf
    }

    #[test]
    fn directory_rejects_out_of_bounds_entry() {
        let buf = minimal_header_with_tags(&[(Signature::RTRC, 1000, 4)]);
        let err = validate_directory(&buf, 1, buf.len()).unwrap_err();
        assert!(matches!(err, ParseError::TagOutOfBounds { .. }));
    }

    #[test]
    fn directory_rejects_size_below_four() {
        let buf = minimal_header_with_tags(&[(Signature::RTRC, 132, 2)]);
        let err = validate_directory(&buf, 1, buf.len()).unwrap_err();
        assert!(matches!(err, ParseError::TagTooSmall { .. }));
    }

    #[test]
    fn find_by_signature_returns_first_match() {
        let mut buf = minimal_header_with_tags(&[(Signature::RTRC, 132, 4)]);
        buf[132..136].copy_from_slice(b"curv");
        validate_directory(&buf, 1, buf.len()).unwrap();
        let tag = tag_by_signature(&buf, 1, Signature::RTRC).unwrap();
        assert_eq!(tag.ty, Signature::TYPE_CURV);
    }

    #[test]
    fn tag_by_index_is_a_no_op_past_the_end() {
        let buf = minimal_header_with_tags(&[(Signature::RTRC, 132, 4)]);
        assert!(tag_by_index(&buf, 1, 1).is_none());
        assert!(tag_by_index(&buf, 1, 999).is_none());
        assert!(tag_by_index(&buf, 1, 0).is_some());
    }
}
