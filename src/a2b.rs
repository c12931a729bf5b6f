//! The "device color → profile connection space" pipeline: optional
//! input curves, an optional multi-dimensional lookup table, an
//! optional affine matrix with its own curves, then mandatory output
//! curves. Assembled from one of three tag formats (`mft1`, `mft2`,
//! `mAB `).

use crate::curve::{parse_curve, Curve, Parametric};
use crate::error::ParseError;
use crate::reader::{fixed, u16_be, u32_be};
use crate::tag::Tag;
use crate::types::Signature;

pub const MAX_CHANNELS: usize = 4;

/// The CLUT's samples, exactly one width.
#[derive(Debug, Clone, Copy)]
pub enum Clut<'a> {
    Grid8(&'a [u8]),
    Grid16(&'a [u8]),
}

#[derive(Debug, Clone, Copy)]
pub struct A2B<'a> {
    /// 0 means "no input stage" (either truly absent in `mft*`, or the
    /// `mAB ` pass-through sentinel when A-curves/CLUT are absent).
    pub input_channels: u8,
    /// Always 3.
    pub output_channels: u8,
    /// 0 or 3.
    pub matrix_channels: u8,
    pub grid_points: [u8; MAX_CHANNELS],
    pub input_curves: [Curve<'a>; MAX_CHANNELS],
    pub matrix_curves: [Curve<'a>; 3],
    pub output_curves: [Curve<'a>; 3],
    pub matrix: [[f32; 4]; 3],
    pub clut: Option<Clut<'a>>,
}

fn identity_curve_array<const N: usize>() -> [Curve<'static>; N] {
    [Curve::Parametric(Parametric::IDENTITY); N]
}

fn identity_3x4() -> [[f32; 4]; 3] {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
    ]
}

/// Dispatches on the tag's type signature to the legacy (`mft1`/`mft2`)
/// or modern (`mAB `) reader. Failure here is fatal to the enclosing
/// profile parse.
pub fn parse<'a>(tag: &Tag<'a>) -> Result<A2B<'a>, ParseError> {
    if tag.ty == Signature::TYPE_MFT1 {
        parse_legacy_lut(tag.buf, 1)
    } else if tag.ty == Signature::TYPE_MFT2 {
        parse_legacy_lut(tag.buf, 2)
    } else if tag.ty == Signature::TYPE_MAB {
        parse_mab(tag.buf)
    } else {
        Err(ParseError::UnexpectedTagType {
            signature: tag.signature,
            found: tag.ty,
            expected: &[Signature::TYPE_MFT1, Signature::TYPE_MFT2, Signature::TYPE_MAB],
        })
    }
}

fn sampled(entries: u32, table: &[u8], width: usize) -> Curve<'_> {
    if width == 1 {
        Curve::Sampled8 { entries, table }
    } else {
        Curve::Sampled16 { entries, table }
    }
}

/// `mft1` (width 1, fixed 256-entry tables) and `mft2` (width 2,
/// explicit entry counts) share everything but those two details.
fn parse_legacy_lut(data: &[u8], width: usize) -> Result<A2B<'_>, ParseError> {
    if data.len() < 48 {
        return Err(ParseError::Truncated {
            expected: 48,
            actual: data.len(),
        });
    }
    let input_channels = data[8];
    let output_channels = data[9];
    let grid_points = data[10];
    // data[11] reserved; matrix at 12..48 (9 s15.16 values) is parsed
    // to stay faithful to the byte layout but is never applied: the
    // PCS-XYZ-input case it would support is an explicit non-goal.

    if output_channels != 3 {
        return Err(ParseError::BadOutputChannels {
            found: output_channels,
        });
    }
    if !(1..=4).contains(&input_channels) {
        return Err(ParseError::BadInputChannels {
            found: input_channels,
        });
    }
    if grid_points < 2 {
        return Err(ParseError::BadGridPoints {
            axis: 0,
            found: grid_points,
        });
    }

    let (in_entries, out_entries, table_offset) = if width == 2 {
        if data.len() < 52 {
            return Err(ParseError::Truncated {
                expected: 52,
                actual: data.len(),
            });
        }
        let ie = u16_be(data, 48) as u32;
        let oe = u16_be(data, 50) as u32;
        if !(2..=4096).contains(&ie) {
            return Err(ParseError::BadTableEntries { found: ie });
        }
        if !(2..=4096).contains(&oe) {
            return Err(ParseError::BadTableEntries { found: oe });
        }
        (ie, oe, 52usize)
    } else {
        (256u32, 256u32, 48usize)
    };

    let in_ch = input_channels as usize;
    let out_ch = output_channels as usize;

    let in_table_bytes = in_ch * in_entries as usize * width;
    let out_table_bytes = out_ch * out_entries as usize * width;
    // Wide accumulator: grid_points/in_ch are attacker-controlled.
    let grid_size = (grid_points as u64).pow(in_ch as u32);
    let clut_bytes = grid_size
        .saturating_mul(out_ch as u64)
        .saturating_mul(width as u64);

    let total = table_offset as u64
        + in_table_bytes as u64
        + clut_bytes
        + out_table_bytes as u64;
    if total > data.len() as u64 {
        return Err(ParseError::Truncated {
            expected: total as usize,
            actual: data.len(),
        });
    }

    let mut input_curves = identity_curve_array::<MAX_CHANNELS>();
    let mut pos = table_offset;
    for slot in input_curves.iter_mut().take(in_ch) {
        let len = in_entries as usize * width;
        *slot = sampled(in_entries, &data[pos..pos + len], width);
        pos += len;
    }

    let clut_len = clut_bytes as usize;
    let clut = if width == 1 {
        Clut::Grid8(&data[pos..pos + clut_len])
    } else {
        Clut::Grid16(&data[pos..pos + clut_len])
    };
    pos += clut_len;

    let mut output_curves = identity_curve_array::<3>();
    for slot in output_curves.iter_mut().take(out_ch) {
        let len = out_entries as usize * width;
        *slot = sampled(out_entries, &data[pos..pos + len], width);
        pos += len;
    }

    let mut grid_points_arr = [0u8; MAX_CHANNELS];
    grid_points_arr[..in_ch].fill(grid_points);

    Ok(A2B {
        input_channels,
        output_channels,
        matrix_channels: 0,
        grid_points: grid_points_arr,
        input_curves,
        matrix_curves: identity_curve_array::<3>(),
        output_curves,
        matrix: identity_3x4(),
        clut: Some(clut),
    })
}

/// Reads `count` curves starting at `start_offset` (relative to the
/// start of `data`, the tag's own buffer), rounding the running
/// position up to the next multiple of 4 after each one.
fn parse_curve_chain<'a>(
    data: &'a [u8],
    start_offset: usize,
    count: usize,
    out: &mut [Curve<'a>],
) -> Result<(), ParseError> {
    let mut pos = start_offset;
    for slot in out.iter_mut().take(count) {
        if pos > data.len() {
            return Err(ParseError::Truncated {
                expected: pos,
                actual: data.len(),
            });
        }
        let (curve, consumed) = parse_curve(&data[pos..])?;
        *slot = curve;
        pos = (pos + consumed + 3) & !3;
    }
    Ok(())
}

fn parse_matrix_3x4(data: &[u8], offset: usize) -> Result<[[f32; 4]; 3], ParseError> {
    if data.len() < offset + 48 {
        return Err(ParseError::Truncated {
            expected: offset + 48,
            actual: data.len(),
        });
    }
    let mut m = identity_3x4();
    let mut pos = offset;
    for row in m.iter_mut() {
        for col in row.iter_mut().take(3) {
            *col = fixed(data, pos);
            pos += 4;
        }
    }
    for row in m.iter_mut() {
        row[3] = fixed(data, pos);
        pos += 4;
    }
    Ok(m)
}

fn parse_clut(
    data: &[u8],
    offset: usize,
    input_channels: usize,
    output_channels: usize,
) -> Result<(Clut<'_>, [u8; MAX_CHANNELS]), ParseError> {
    if data.len() < offset + 20 {
        return Err(ParseError::Truncated {
            expected: offset + 20,
            actual: data.len(),
        });
    }
    let mut grid_points = [0u8; MAX_CHANNELS];
    grid_points[..input_channels].copy_from_slice(&data[offset..offset + input_channels]);
    for (axis, &g) in grid_points.iter().take(input_channels).enumerate() {
        if g < 2 {
            return Err(ParseError::BadGridPoints { axis, found: g });
        }
    }
    let byte_width = data[offset + 16];
    if byte_width != 1 && byte_width != 2 {
        return Err(ParseError::BadByteWidth { found: byte_width });
    }
    // data[offset+17..offset+20] reserved.
    let data_start = offset + 20;
    let grid_size: u64 = grid_points[..input_channels]
        .iter()
        .fold(1u64, |acc, &g| acc.saturating_mul(g as u64));
    let total = grid_size
        .saturating_mul(output_channels as u64)
        .saturating_mul(byte_width as u64);
    if data_start as u64 + total > data.len() as u64 {
        return Err(ParseError::Truncated {
            expected: (data_start as u64 + total) as usize,
            actual: data.len(),
        });
    }
    let bytes = &data[data_start..data_start + total as usize];
    let clut = if byte_width == 1 {
        Clut::Grid8(bytes)
    } else {
        Clut::Grid16(bytes)
    };
    Ok((clut, grid_points))
}

fn parse_mab(data: &[u8]) -> Result<A2B<'_>, ParseError> {
    if data.len() < 32 {
        return Err(ParseError::Truncated {
            expected: 32,
            actual: data.len(),
        });
    }
    let input_channels = data[8];
    let output_channels = data[9];
    if output_channels != 3 {
        return Err(ParseError::BadOutputChannels {
            found: output_channels,
        });
    }
    if input_channels > 4 {
        return Err(ParseError::BadInputChannels {
            found: input_channels,
        });
    }

    let b_offset = u32_be(data, 12) as usize;
    let matrix_offset = u32_be(data, 16) as usize;
    let m_offset = u32_be(data, 20) as usize;
    let clut_offset = u32_be(data, 24) as usize;
    let a_offset = u32_be(data, 28) as usize;

    if b_offset == 0 {
        return Err(ParseError::MissingBCurve);
    }
    let mut output_curves = identity_curve_array::<3>();
    parse_curve_chain(data, b_offset, 3, &mut output_curves)?;

    let (matrix_channels, matrix_curves, matrix) = if matrix_offset != 0 || m_offset != 0 {
        if matrix_offset == 0 || m_offset == 0 {
            return Err(ParseError::MOrMatrixMismatch);
        }
        let mut m_curves = identity_curve_array::<3>();
        parse_curve_chain(data, m_offset, 3, &mut m_curves)?;
        let matrix = parse_matrix_3x4(data, matrix_offset)?;
        (3u8, m_curves, matrix)
    } else {
        (0u8, identity_curve_array::<3>(), identity_3x4())
    };

    let (input_channels, input_curves, clut, grid_points) = if clut_offset != 0 || a_offset != 0 {
        if clut_offset == 0 || a_offset == 0 {
            return Err(ParseError::AOrClutMismatch);
        }
        let mut a_curves = identity_curve_array::<MAX_CHANNELS>();
        parse_curve_chain(data, a_offset, input_channels as usize, &mut a_curves)?;
        let (clut, grid_points) = parse_clut(
            data,
            clut_offset,
            input_channels as usize,
            output_channels as usize,
        )?;
        (input_channels, a_curves, Some(clut), grid_points)
    } else {
        if input_channels != output_channels {
            return Err(ParseError::AOrClutMismatch);
        }
        (
            0u8,
            identity_curve_array::<MAX_CHANNELS>(),
            None,
            [0u8; MAX_CHANNELS],
        )
    };

    Ok(A2B {
        input_channels,
        output_channels,
        matrix_channels,
        grid_points,
        input_curves,
        matrix_curves,
        output_curves,
        matrix,
        clut,
    })
}
