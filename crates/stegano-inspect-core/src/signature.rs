//! Known magic byte sequences and the scan for them.
//!
//! Signatures are searched anywhere in the given range, not only at its
//! start, so a PNG carrying an appended ZIP reports both.

use memchr::memmem;

/// A magic byte sequence and the label of the format it identifies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub magic: &'static [u8],
    pub label: &'static str,
}

/// The catalog in reporting order.
pub const SIGNATURES: &[Signature] = &[
    Signature {
        magic: &[0xFF, 0xD8, 0xFF],
        label: "JPEG image",
    },
    Signature {
        magic: &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        label: "PNG image",
    },
    Signature {
        magic: b"BM",
        label: "BMP image",
    },
    Signature {
        magic: b"GIF8",
        label: "GIF image",
    },
    Signature {
        magic: b"RIFF",
        label: "RIFF container (WAV/AVI)",
    },
    Signature {
        magic: b"%PDF",
        label: "PDF document",
    },
    Signature {
        magic: &[0x50, 0x4B, 0x03, 0x04],
        label: "ZIP/JAR archive",
    },
    Signature {
        magic: &[0x7F, 0x45, 0x4C, 0x46],
        label: "ELF executable",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMatch {
    /// position relative to the start of the scanned range
    pub offset_in_range: usize,
    pub label: &'static str,
}

/// Reports the first occurrence of every catalog signature found in `data`,
/// in catalog order.
pub fn find_signatures(data: &[u8]) -> Vec<SignatureMatch> {
    SIGNATURES
        .iter()
        .filter_map(|sig| {
            memmem::find(data, sig.magic).map(|pos| SignatureMatch {
                offset_in_range: pos,
                label: sig.label,
            })
        })
        .collect()
}
