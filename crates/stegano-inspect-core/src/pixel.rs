//! Correlates a pixel of the decoded image with its approximate position in
//! the raw file.
//!
//! The channel values come from the decoded image, the offset is only an
//! estimate of where they probably live in the file. Nothing is read back from
//! the raw bytes, under compression both layouts diverge.

use std::fmt;

use image::{ColorType, DynamicImage, GenericImageView};

use crate::error::{InspectError, Result};
use crate::offset::OffsetEstimate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Gray,
    Rgb,
    Rgba,
    /// any other layout, inspected after conversion to RGB
    Other,
}

impl ColorMode {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb | ColorMode::Other => 3,
            ColorMode::Rgba => 4,
        }
    }
}

impl From<ColorType> for ColorMode {
    fn from(color: ColorType) -> Self {
        match color {
            ColorType::L8 => ColorMode::Gray,
            ColorType::Rgb8 => ColorMode::Rgb,
            ColorType::Rgba8 => ColorMode::Rgba,
            _ => ColorMode::Other,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorMode::Gray => "Grayscale",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::Other => "Other (inspected as RGB)",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
    pub bytes_per_pixel: usize,
}

impl ImageDescriptor {
    pub fn new(width: u32, height: u32, color_mode: ColorMode) -> Self {
        Self {
            width,
            height,
            color_mode,
            bytes_per_pixel: color_mode.bytes_per_pixel(),
        }
    }

    pub fn of(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.color().into())
    }

    fn ensure_contains(&self, x: u32, y: u32) -> Result<()> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(InspectError::CoordinateOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelHexInfo {
    pub x: u32,
    pub y: u32,
    /// one value per byte of the pixel, in channel order
    pub channel_values: Vec<u8>,
    /// `None` when the estimate falls at or beyond the end of the file
    pub file_offset: Option<usize>,
    pub bytes_per_pixel: usize,
    pub color_mode: ColorMode,
}

impl PixelHexInfo {
    /// Channel values as space separated hex pairs, e.g. `FF 80 00`
    pub fn hex_values(&self) -> String {
        self.channel_values
            .iter()
            .map(|c| format!("{c:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PixelHexInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pixel Coordinates: ({}, {})", self.x, self.y)?;
        match (self.color_mode, self.channel_values.as_slice()) {
            (ColorMode::Gray, [gray]) => {
                writeln!(f, "Grayscale Value: {gray}")?;
                writeln!(f, "Hex Value: {gray:02X}")?;
            }
            (ColorMode::Rgba, [r, g, b, a]) => {
                writeln!(f, "RGBA Values: R={r}, G={g}, B={b}, A={a}")?;
                writeln!(f, "Hex Values: {}", self.hex_values())?;
            }
            (_, [r, g, b]) => {
                writeln!(f, "RGB Values: R={r}, G={g}, B={b}")?;
                writeln!(f, "Hex Values: {}", self.hex_values())?;
            }
            _ => writeln!(f, "Hex Values: {}", self.hex_values())?,
        }
        match self.file_offset {
            Some(offset) => write!(f, "Approx. File Offset: 0x{offset:08X} ({offset})"),
            None => write!(f, "Offset: Beyond file bounds"),
        }
    }
}

/// Approximate file offset of pixel `(x, y)`: the estimated data start plus
/// the pixel's position in an uncompressed row major layout.
///
/// Returns `Ok(None)` when that offset is not inside a buffer of `buffer_len` bytes.
pub fn locate_pixel(
    x: u32,
    y: u32,
    descriptor: &ImageDescriptor,
    estimate: &OffsetEstimate,
    buffer_len: usize,
) -> Result<Option<usize>> {
    descriptor.ensure_contains(x, y)?;

    let pixel_index = (y as usize)
        .saturating_mul(descriptor.width as usize)
        .saturating_add(x as usize)
        .saturating_mul(descriptor.bytes_per_pixel);
    let file_offset = estimate.data_start_offset.saturating_add(pixel_index);

    Ok((file_offset < buffer_len).then_some(file_offset))
}

/// Channel values of pixel `(x, y)` in the decoded `image`, as many as `mode` has bytes per pixel.
pub fn sample_channels(image: &DynamicImage, x: u32, y: u32, mode: ColorMode) -> Vec<u8> {
    let rgba = image.get_pixel(x, y).0;
    match mode {
        ColorMode::Gray => match image.as_luma8() {
            Some(gray) => vec![gray.get_pixel(x, y).0[0]],
            None => vec![rgba[0]],
        },
        ColorMode::Rgb | ColorMode::Other => rgba[..3].to_vec(),
        ColorMode::Rgba => rgba.to_vec(),
    }
}

/// Reads the channel values of `(x, y)` from the decoded `image` and estimates
/// where that pixel lives in a file of `buffer_len` bytes.
pub fn map_pixel(
    image: &DynamicImage,
    x: u32,
    y: u32,
    descriptor: &ImageDescriptor,
    estimate: &OffsetEstimate,
    buffer_len: usize,
) -> Result<PixelHexInfo> {
    let file_offset = locate_pixel(x, y, descriptor, estimate, buffer_len)?;

    Ok(PixelHexInfo {
        x,
        y,
        channel_values: sample_channels(image, x, y, descriptor.color_mode),
        file_offset,
        bytes_per_pixel: descriptor.bytes_per_pixel,
        color_mode: descriptor.color_mode,
    })
}
