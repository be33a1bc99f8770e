use std::fmt;
use std::fs::Metadata;
use std::path::Path;

use chrono::{DateTime, Local};
use image::{DynamicImage, GenericImageView};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::offset::ContainerFormat;
use crate::pixel::ColorMode;

const RULE_WIDTH: usize = 60;
const TIMESTAMP_FORMAT: &str = "%A, %B %d, %Y, %I:%M:%S %p";

#[derive(Debug, Clone, PartialEq)]
pub struct ImageDetails {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
    /// format as recognized by the image decoder, if any
    pub format: Option<String>,
}

/// Filesystem times of a file, each one missing where the platform has none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timestamps {
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub accessed: Option<DateTime<Local>>,
}

impl Timestamps {
    pub fn of(metadata: &Metadata) -> Self {
        Self {
            created: metadata.created().ok().map(DateTime::from),
            modified: metadata.modified().ok().map(DateTime::from),
            accessed: metadata.accessed().ok().map(DateTime::from),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_none() && self.modified.is_none() && self.accessed.is_none()
    }
}

/// File and image facts worth a look before a steganography analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct FileProperties {
    pub name: String,
    pub location: String,
    pub size: usize,
    pub container: ContainerFormat,
    pub timestamps: Timestamps,
    pub image: Option<ImageDetails>,
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

impl FileProperties {
    /// `metadata` is only used for the timestamps, without it they show as not available.
    pub fn collect(
        path: &Path,
        bytes: &[u8],
        image: Option<&DynamicImage>,
        metadata: Option<&Metadata>,
    ) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let location = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let image = image.map(|img| {
            let (width, height) = img.dimensions();
            ImageDetails {
                width,
                height,
                color_mode: img.color().into(),
                format: image::guess_format(bytes).ok().map(|f| format!("{f:?}")),
            }
        });

        Self {
            name,
            location,
            size: bytes.len(),
            container: ContainerFormat::detect(bytes),
            timestamps: metadata.map(Timestamps::of).unwrap_or_default(),
            image,
            md5: digest_hex::<Md5>(bytes),
            sha1: digest_hex::<Sha1>(bytes),
            sha256: digest_hex::<Sha256>(bytes),
        }
    }
}

impl fmt::Display for FileProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "FILE PROPERTIES - {}", self.name)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(
            f,
            "Size: {} bytes ({:.2} KB)",
            self.size,
            self.size as f64 / 1024.0
        )?;
        writeln!(f, "Container: {}", self.container.name())?;
        if self.timestamps.is_empty() {
            writeln!(f, "Timestamps: Not available")?;
        } else {
            for (label, time) in [
                ("Created", self.timestamps.created),
                ("Modified", self.timestamps.modified),
                ("Accessed", self.timestamps.accessed),
            ] {
                if let Some(time) = time {
                    writeln!(f, "{label}: {}", time.format(TIMESTAMP_FORMAT))?;
                }
            }
        }
        writeln!(f)?;

        writeln!(f, "IMAGE DETAILS")?;
        writeln!(f, "{}", "-".repeat(30))?;
        match &self.image {
            Some(img) => {
                writeln!(f, "Dimensions: {} x {} pixels", img.width, img.height)?;
                writeln!(f, "Color depth: {}", img.color_mode)?;
                writeln!(f, "Format: {}", img.format.as_deref().unwrap_or("Unknown"))?;
                if img.height != 0 {
                    writeln!(
                        f,
                        "Aspect ratio: {:.3}:1",
                        img.width as f64 / img.height as f64
                    )?;
                }
            }
            None => writeln!(f, "Not decodable as an image")?,
        }
        writeln!(f)?;

        writeln!(f, "SECURITY & INTEGRITY")?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "MD5: {}", self.md5)?;
        writeln!(f, "SHA-1: {}", self.sha1)?;
        write!(f, "SHA-256: {}", self.sha256)
    }
}

fn digest_hex<D: Digest>(bytes: &[u8]) -> String {
    D::digest(bytes).iter().map(|b| format!("{b:02x}")).collect()
}
