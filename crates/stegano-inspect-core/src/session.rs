use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{debug, warn};

use crate::error::{InspectError, Result};
use crate::hex_dump::HexDump;
use crate::offset::{self, OffsetEstimate};
use crate::pixel::{self, ImageDescriptor, PixelHexInfo};
use crate::properties::FileProperties;
use crate::search::{self, PatternQuery};
use crate::window::{self, DumpWindow, HighlightRegion};

/// Reads the whole file at `path`.
pub fn load(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| InspectError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads at most `length` bytes starting at `start_offset` of the file at `path`.
/// Fewer bytes come back when the file ends earlier.
pub fn read_range(path: &Path, start_offset: usize, length: usize) -> Result<Vec<u8>> {
    let unreadable = |source: std::io::Error| InspectError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;
    file.seek(SeekFrom::Start(start_offset as u64))
        .map_err(unreadable)?;

    let mut data = Vec::with_capacity(length.min(64 * 1024));
    file.take(length as u64)
        .read_to_end(&mut data)
        .map_err(unreadable)?;

    Ok(data)
}

/// A file opened for inspection.
///
/// The full content stays in memory, the decoded image, its descriptor and the
/// data start estimate are derived once per load. Files that do not decode as
/// an image can still be dumped and searched.
///
/// ## Example of usage
/// ```rust
/// use stegano_inspect_core::{DumpWindow, Inspection};
///
/// let dir = tempfile::tempdir().expect("Cannot create temporary directory");
/// let path = dir.path().join("carrier.png");
/// image::RgbImage::new(4, 4)
///     .save(&path)
///     .expect("Cannot write carrier image");
///
/// let inspection = Inspection::open(&path).expect("Cannot open carrier image");
/// let pixel = inspection.pixel(1, 1).expect("Pixel is inside of the image");
/// assert_eq!(pixel.channel_values, vec![0, 0, 0]);
///
/// let dump = inspection.dump(DumpWindow::new(0, 16));
/// assert!(dump.contains("Found PNG image signature at offset +0"));
/// ```
#[derive(Debug)]
pub struct Inspection {
    path: PathBuf,
    bytes: Vec<u8>,
    image: Option<(DynamicImage, ImageDescriptor)>,
    estimate: OffsetEstimate,
}

impl Inspection {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = load(&path)?;

        Ok(Self::from_bytes(path, bytes))
    }

    /// For content that is already in memory, `path` only names it.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let image = match image::load_from_memory(&bytes) {
            Ok(img) => {
                let descriptor = ImageDescriptor::of(&img);
                debug!(
                    "{path:?}: {}x{} {} image",
                    descriptor.width, descriptor.height, descriptor.color_mode
                );
                Some((img, descriptor))
            }
            Err(e) => {
                warn!("{path:?} is not decodable as an image: {e}");
                None
            }
        };
        let estimate = offset::resolve(&bytes);

        Self {
            path,
            bytes,
            image,
            estimate,
        }
    }

    /// Re-reads the whole file, everything derived from it is replaced.
    pub fn reload(&mut self) -> Result<()> {
        let bytes = load(&self.path)?;
        *self = Self::from_bytes(self.path.clone(), bytes);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn estimate(&self) -> &OffsetEstimate {
        &self.estimate
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref().map(|(img, _)| img)
    }

    pub fn descriptor(&self) -> Option<&ImageDescriptor> {
        self.image.as_ref().map(|(_, descriptor)| descriptor)
    }

    /// Name of the file as shown in reports
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// The dump report of `window`
    pub fn dump(&self, window: DumpWindow) -> String {
        let name = self.name();
        HexDump::new(&self.bytes, window).named(&name).to_string()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Result<PixelHexInfo> {
        let (image, descriptor) = self.image.as_ref().ok_or(InspectError::InvalidImageMedia)?;

        pixel::map_pixel(image, x, y, descriptor, &self.estimate, self.bytes.len())
    }

    /// Where pixel `(x, y)` shows up in `window`, `Ok(None)` if it has no
    /// file offset or the offset is not visible.
    pub fn highlight_pixel(
        &self,
        x: u32,
        y: u32,
        window: &DumpWindow,
    ) -> Result<Option<HighlightRegion>> {
        let info = self.pixel(x, y)?;

        Ok(info
            .file_offset
            .and_then(|offset| window::map_to_window(offset, info.bytes_per_pixel, window)))
    }

    /// The window of `length` bytes that shows pixel `(x, y)` with some context before it.
    pub fn jump_to_pixel(&self, x: u32, y: u32, length: usize) -> Result<Option<DumpWindow>> {
        Ok(self
            .pixel(x, y)?
            .file_offset
            .map(|offset| DumpWindow::around(offset, length)))
    }

    pub fn search(&self, query: &PatternQuery) -> Vec<usize> {
        search::search(&self.bytes, query)
    }

    pub fn search_hex(&self, hex_digits: &str) -> Result<Vec<usize>> {
        search::search_hex(&self.bytes, hex_digits)
    }

    /// File properties; timestamps come from the file on disk as it is now.
    pub fn properties(&self) -> FileProperties {
        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| debug!("no metadata for {}: {e}", self.path.display()))
            .ok();
        FileProperties::collect(&self.path, &self.bytes, self.image(), metadata.as_ref())
    }
}
