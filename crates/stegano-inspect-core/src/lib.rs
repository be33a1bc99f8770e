//! # Stegano Inspect Core
//!
//! The binary inspection engine behind the stegano inspection tools. It works
//! on the bytes of a cover or stego file that are already in memory and
//! answers the questions that come up when comparing them:
//! - [`hex_dump`] renders an offset/hex/ASCII dump of any byte range, with the
//!   [`signature`]s and the [`entropy`] indicator of that range
//! - [`offset`] estimates where the pixel data starts inside an encoded image
//! - [`pixel`] maps a pixel of the decoded image to its approximate file offset
//! - [`search`] finds every, possibly overlapping, occurrence of a hex pattern
//! - [`window`] maps a file offset onto the rows of a displayed dump
//!
//! All of these are pure functions over a byte slice and small value types.
//! [`Inspection`] ties them together for one opened file.
//!
//! Offsets for compressed formats (PNG, JPEG) are approximate by design, the
//! engine never decodes compressed pixel streams.
//!
//! # Usage Examples
//!
//! ```rust
//! use stegano_inspect_core::{hex_dump, offset, search};
//!
//! let bmp_header = [
//!     0x42, 0x4D, 0x46, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x36, 0x00, 0x00, 0x00,
//! ];
//!
//! assert_eq!(offset::resolve(&bmp_header).data_start_offset, 54);
//! assert_eq!(search::search_hex(&bmp_header, "00 00").unwrap().len(), 8);
//! assert!(hex_dump::format(&bmp_header, 0, 16).contains("Found BMP image signature"));
//! ```

#![warn(clippy::redundant_else)]

pub mod entropy;
pub mod error;
pub mod hex_dump;
pub mod offset;
pub mod pixel;
pub mod properties;
pub mod search;
pub mod session;
pub mod signature;
pub mod window;

pub use crate::error::{InspectError, Result};
pub use crate::hex_dump::HexDump;
pub use crate::offset::{ContainerFormat, OffsetEstimate};
pub use crate::pixel::{ColorMode, ImageDescriptor, PixelHexInfo};
pub use crate::properties::{FileProperties, Timestamps};
pub use crate::search::PatternQuery;
pub use crate::session::Inspection;
pub use crate::window::{DumpWindow, HighlightRegion};
