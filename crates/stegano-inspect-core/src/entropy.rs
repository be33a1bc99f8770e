//! A cheap randomness indicator: the share of the 256 byte values that occur
//! at least once. This is not Shannon entropy.

use std::fmt;

/// Indicator above which a range counts as high entropy.
pub const HIGH_ENTROPY_THRESHOLD: f64 = 0.8;
/// Indicator below which a range counts as low entropy.
pub const LOW_ENTROPY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntropyReport {
    /// distinct byte values present, `0..=256`
    pub unique_byte_count: usize,
    /// `unique_byte_count / 256`, always within `[0, 1]`
    pub indicator: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyClass {
    High,
    Medium,
    Low,
}

impl EntropyReport {
    pub fn class(&self) -> EntropyClass {
        if self.indicator > HIGH_ENTROPY_THRESHOLD {
            EntropyClass::High
        } else if self.indicator < LOW_ENTROPY_THRESHOLD {
            EntropyClass::Low
        } else {
            EntropyClass::Medium
        }
    }
}

impl fmt::Display for EntropyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyClass::High => write!(f, "High entropy - possible compressed/encrypted data"),
            EntropyClass::Medium => write!(f, "Medium entropy - mixed data"),
            EntropyClass::Low => write!(f, "Low entropy - repetitive data pattern"),
        }
    }
}

/// Counts the distinct byte values of `data`.
///
/// Returns `None` for an empty range, there is nothing to classify.
pub fn estimate(data: &[u8]) -> Option<EntropyReport> {
    if data.is_empty() {
        return None;
    }

    let mut seen = [false; 256];
    for b in data {
        seen[*b as usize] = true;
    }
    let unique_byte_count = seen.iter().filter(|s| **s).count();

    Some(EntropyReport {
        unique_byte_count,
        indicator: unique_byte_count as f64 / 256.0,
    })
}
