//! The single entry point: validates a buffer's header and tag
//! directory, pre-parses the tags downstream code reaches for most
//! (TRC, toXYZD50, A2B), and hands back an immutable, borrowed view.

use crate::a2b;
use crate::a2b::A2B;
use crate::curve::{parse_curve, Curve};
use crate::error::ParseError;
use crate::header::Header;
use crate::tag::{self, Tag};
use crate::types::{DateTime, Signature, Xyz};
use crate::xyz as xyz_tag;

/// A parsed, validated ICC profile borrowing from the buffer it was
/// parsed out of. Immutable after construction; owns no heap memory.
#[derive(Clone, Copy)]
pub struct Profile<'a> {
    header: Header,
    buf: &'a [u8],
    trc: Option<[Curve<'a>; 3]>,
    to_xyz_d50: Option<[[f32; 3]; 3]>,
    a2b: Option<A2B<'a>>,
}

impl<'a> Profile<'a> {
    /// Validates the header, walks and bounds-checks the tag
    /// directory, then pre-parses TRC/toXYZD50/A2B. Any structural
    /// problem — including a malformed tag among those pre-parsed —
    /// fails the whole parse; there is no partial result.
    pub fn parse(buf: &'a [u8]) -> Result<Profile<'a>, ParseError> {
        let header = Header::parse(buf)?;
        tag::validate_directory(buf, header.tag_count, header.size)?;

        let mut trc = None;
        let mut to_xyz_d50 = None;

        if let Some(ktrc) = tag::tag_by_signature(buf, header.tag_count, Signature::KTRC) {
            let (curve, _) = parse_curve(ktrc.buf)?;
            trc = Some([curve, curve, curve]);
            to_xyz_d50 = Some(diag(header.illuminant));
        } else if let (Some(r), Some(g), Some(b)) = (
            tag::tag_by_signature(buf, header.tag_count, Signature::RTRC),
            tag::tag_by_signature(buf, header.tag_count, Signature::GTRC),
            tag::tag_by_signature(buf, header.tag_count, Signature::BTRC),
        ) {
            let (r, _) = parse_curve(r.buf)?;
            let (g, _) = parse_curve(g.buf)?;
            let (b, _) = parse_curve(b.buf)?;
            trc = Some([r, g, b]);
        }

        if let (Some(r), Some(g), Some(b)) = (
            tag::tag_by_signature(buf, header.tag_count, Signature::RXYZ),
            tag::tag_by_signature(buf, header.tag_count, Signature::GXYZ),
            tag::tag_by_signature(buf, header.tag_count, Signature::BXYZ),
        ) {
            let r = xyz_tag::parse(r.buf)?;
            let g = xyz_tag::parse(g.buf)?;
            let b = xyz_tag::parse(b.buf)?;
            to_xyz_d50 = Some([[r.x, g.x, b.x], [r.y, g.y, b.y], [r.z, g.z, b.z]]);
        }

        // Relative colorimetric (A2B1) preferred over perceptual
        // (A2B0) — a deliberate deviation from ICC precedence, kept
        // because downstream consumers reason in relative-colorimetric
        // terms. A present-but-malformed A2B1 is fatal; A2B0 is only
        // tried when A2B1 is absent from the directory entirely.
        let a2b = if let Some(t) = tag::tag_by_signature(buf, header.tag_count, Signature::A2B1) {
            Some(a2b::parse(&t)?)
        } else if let Some(t) = tag::tag_by_signature(buf, header.tag_count, Signature::A2B0) {
            Some(a2b::parse(&t)?)
        } else {
            None
        };

        Ok(Profile {
            header,
            buf,
            trc,
            to_xyz_d50,
            a2b,
        })
    }

    pub fn size(&self) -> usize {
        self.header.size
    }
    pub fn cmm_type(&self) -> Signature {
        self.header.cmm_type
    }
    pub fn version(&self) -> u32 {
        self.header.version
    }
    pub fn profile_class(&self) -> Signature {
        self.header.profile_class
    }
    pub fn data_color_space(&self) -> Signature {
        self.header.data_color_space
    }
    pub fn pcs(&self) -> Signature {
        self.header.pcs
    }
    pub fn creation_date_time(&self) -> DateTime {
        self.header.creation_date_time
    }
    pub fn platform(&self) -> Signature {
        self.header.platform
    }
    pub fn flags(&self) -> u32 {
        self.header.flags
    }
    pub fn device_manufacturer(&self) -> Signature {
        self.header.device_manufacturer
    }
    pub fn device_model(&self) -> Signature {
        self.header.device_model
    }
    pub fn device_attributes(&self) -> u64 {
        self.header.device_attributes
    }
    pub fn rendering_intent(&self) -> u32 {
        self.header.rendering_intent
    }
    pub fn illuminant(&self) -> Xyz {
        self.header.illuminant
    }
    pub fn creator(&self) -> Signature {
        self.header.creator
    }
    pub fn profile_id(&self) -> [u8; 16] {
        self.header.profile_id
    }

    pub fn tag_count(&self) -> u32 {
        self.header.tag_count
    }

    pub fn tag_by_index(&self, index: u32) -> Option<Tag<'a>> {
        tag::tag_by_index(self.buf, self.header.tag_count, index)
    }

    pub fn tag_by_signature(&self, sig: Signature) -> Option<Tag<'a>> {
        tag::tag_by_signature(self.buf, self.header.tag_count, sig)
    }

    pub fn has_trc(&self) -> bool {
        self.trc.is_some()
    }

    pub fn trc(&self) -> Option<&[Curve<'a>; 3]> {
        self.trc.as_ref()
    }

    pub fn has_to_xyz_d50(&self) -> bool {
        self.to_xyz_d50.is_some()
    }

    pub fn to_xyz_d50(&self) -> Option<[[f32; 3]; 3]> {
        self.to_xyz_d50
    }

    pub fn has_a2b(&self) -> bool {
        self.a2b.is_some()
    }

    pub fn a2b(&self) -> Option<&A2B<'a>> {
        self.a2b.as_ref()
    }
}

impl core::fmt::Debug for Profile<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Profile")
            .field("size", &self.header.size)
            .field("tag_count", &self.header.tag_count)
            .field("has_trc", &self.has_trc())
            .field("has_to_xyz_d50", &self.has_to_xyz_d50())
            .field("has_a2b", &self.has_a2b())
            .finish()
    }
}

fn diag(illuminant: Xyz) -> [[f32; 3]; 3] {
    [
        [illuminant.x, 0.0, 0.0],
        [0.0, illuminant.y, 0.0],
        [0.0, 0.0, illuminant.z],
    ]
}
