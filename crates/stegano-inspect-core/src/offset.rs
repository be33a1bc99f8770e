//! Estimates where pixel data starts inside an encoded image file.
//!
//! These are structural guesses from a few marker bytes, compressed streams
//! are never decoded. For PNG and JPEG the result points somewhere into the
//! compressed data, not at a decoded pixel. The estimate may even lie beyond
//! the end of a malformed file, callers must check bounds before use.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use memchr::memmem;

/// PNG without an `IDAT` chunk
pub const PNG_FALLBACK_OFFSET: usize = 100;
/// Skip from the `IDAT` marker
pub const PNG_IDAT_SKIP: usize = 8;
/// JPEG without a start of scan marker
pub const JPEG_FALLBACK_OFFSET: usize = 200;
/// Skip from the `FF DA` start of scan marker over its segment header
pub const JPEG_SOS_SKIP: usize = 12;
/// BMP too short to carry the pixel array offset field, the standard header size
pub const BMP_FALLBACK_OFFSET: usize = 54;
/// Anything that is not recognized
pub const DEFAULT_OFFSET: usize = 100;

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const BMP_MAGIC: &[u8] = b"BM";
const PNG_IDAT: &[u8] = b"IDAT";
const JPEG_SOS: &[u8] = &[0xFF, 0xDA];
const BMP_PIXEL_OFFSET_FIELD: usize = 10;
const BMP_FILE_HEADER_LEN: usize = 14;

/// Container formats with a dedicated offset rule, told apart by their leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    Png,
    Jpeg,
    Bmp,
    Unknown,
}

impl ContainerFormat {
    pub fn detect(buffer: &[u8]) -> Self {
        if buffer.starts_with(PNG_MAGIC) {
            Self::Png
        } else if buffer.starts_with(JPEG_MAGIC) {
            Self::Jpeg
        } else if buffer.starts_with(BMP_MAGIC) {
            Self::Bmp
        } else {
            Self::Unknown
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Bmp => "BMP",
            Self::Unknown => "Unknown",
        }
    }
}

/// There is no exact level, the engine never parses compressed streams fully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Heuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetEstimate {
    pub data_start_offset: usize,
    pub format: ContainerFormat,
    pub confidence: Confidence,
}

impl OffsetEstimate {
    fn heuristic(format: ContainerFormat, data_start_offset: usize) -> Self {
        Self {
            data_start_offset,
            format,
            confidence: Confidence::Heuristic,
        }
    }
}

/// Dispatches on the leading bytes of `buffer` to the rule of its container format.
pub fn resolve(buffer: &[u8]) -> OffsetEstimate {
    let format = ContainerFormat::detect(buffer);
    let offset = match format {
        ContainerFormat::Png => png_data_start(buffer),
        ContainerFormat::Jpeg => jpeg_data_start(buffer),
        ContainerFormat::Bmp => bmp_data_start(buffer),
        ContainerFormat::Unknown => DEFAULT_OFFSET,
    };
    debug!("estimated {} pixel data start at {offset}", format.name());

    OffsetEstimate::heuristic(format, offset)
}

fn png_data_start(buffer: &[u8]) -> usize {
    memmem::find(buffer, PNG_IDAT)
        .map(|pos| pos + PNG_IDAT_SKIP)
        .unwrap_or(PNG_FALLBACK_OFFSET)
}

fn jpeg_data_start(buffer: &[u8]) -> usize {
    memmem::find(buffer, JPEG_SOS)
        .map(|pos| pos + JPEG_SOS_SKIP)
        .unwrap_or(JPEG_FALLBACK_OFFSET)
}

fn bmp_data_start(buffer: &[u8]) -> usize {
    if buffer.len() < BMP_FILE_HEADER_LEN {
        return BMP_FALLBACK_OFFSET;
    }
    LittleEndian::read_u32(&buffer[BMP_PIXEL_OFFSET_FIELD..BMP_FILE_HEADER_LEN]) as usize
}

#[cfg(test)]
mod offset_tests {
    use super::*;

    #[test]
    fn should_skip_past_the_png_idat_marker() {
        let mut png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        png.extend_from_slice(&[0; 25]);
        png.extend_from_slice(&[0x00, 0x00, 0x01, 0x00]);
        let idat_pos = png.len();
        png.extend_from_slice(b"IDAT");
        png.extend_from_slice(&[0x78, 0x9C, 0x00, 0x00]);

        let estimate = resolve(&png);
        assert_eq!(estimate.format, ContainerFormat::Png);
        assert_eq!(estimate.data_start_offset, idat_pos + 8);
        assert_eq!(estimate.confidence, Confidence::Heuristic);
    }

    #[test]
    fn should_fall_back_for_a_png_without_idat() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

        assert_eq!(resolve(&png).data_start_offset, 100);
    }

    #[test]
    fn should_skip_past_the_jpeg_start_of_scan() {
        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        jpeg.extend_from_slice(&[0x00; 20]);
        jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x0C]);

        let estimate = resolve(&jpeg);
        assert_eq!(estimate.format, ContainerFormat::Jpeg);
        assert_eq!(estimate.data_start_offset, 26 + 12);
    }

    #[test]
    fn should_fall_back_for_a_jpeg_without_start_of_scan() {
        assert_eq!(resolve(&[0xFF, 0xD8, 0xFF, 0xE0]).data_start_offset, 200);
    }

    #[test]
    fn should_read_the_bmp_pixel_array_offset() {
        let mut bmp = vec![0x42, 0x4D, 0x46, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        bmp.extend_from_slice(&[0x36, 0x00, 0x00, 0x00]);

        let estimate = resolve(&bmp);
        assert_eq!(estimate.format, ContainerFormat::Bmp);
        assert_eq!(estimate.data_start_offset, 54);

        bmp[10..14].copy_from_slice(&[0x8A, 0x04, 0x00, 0x00]);
        assert_eq!(resolve(&bmp).data_start_offset, 0x048A);
    }

    #[test]
    fn should_fall_back_for_a_truncated_bmp_header() {
        assert_eq!(resolve(b"BM\x00\x00\x00").data_start_offset, 54);
    }

    #[test]
    fn should_use_the_default_for_unknown_headers() {
        let estimate = resolve(b"GIF89a");

        assert_eq!(estimate.format, ContainerFormat::Unknown);
        assert_eq!(estimate.data_start_offset, 100);
        assert_eq!(resolve(&[]).data_start_offset, 100);
    }

    #[test]
    fn should_keep_an_estimate_beyond_the_buffer() {
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&[0; 8]);
        bmp.extend_from_slice(&0xFFFFu32.to_le_bytes());

        assert_eq!(resolve(&bmp).data_start_offset, 0xFFFF);
    }
}
