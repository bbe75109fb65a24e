//! Raw identifier configuration and the thresholds derived from it.

use crate::encoding::{CandidateSet, Encoding, SANGER_OFFSET};
use crate::error::IdentError;
use crate::identifier::Identifier;
use crate::policy::ReaderOptions;
use crate::sampler::SampleSelector;
use std::fmt;
use std::str::FromStr;

/// Anecdotal maximum quality of an Illumina run.
pub const DEFAULT_MAX_QUALITY: u32 = 40;
pub const DEFAULT_NUCLEOTIDE_BUDGET: u64 = 50_000;
pub const DEFAULT_START: u64 = 0;
pub const DEFAULT_STRIDE: u64 = 4;

/// A minimum ASCII offset given either as a number or as the character itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinOffset {
    Code(u32),
    Char(char),
}

impl MinOffset {
    pub fn code_point(self) -> Result<u32, IdentError> {
        match self {
            MinOffset::Code(c) => Ok(c),
            MinOffset::Char(c) if c.is_ascii() => Ok(c as u32),
            MinOffset::Char(c) => Err(IdentError::config(format!(
                "minimum offset character {c:?} is not ASCII"
            ))),
        }
    }
}

impl From<u8> for MinOffset {
    fn from(v: u8) -> Self {
        MinOffset::Code(u32::from(v))
    }
}

impl From<u32> for MinOffset {
    fn from(v: u32) -> Self {
        MinOffset::Code(v)
    }
}

impl From<char> for MinOffset {
    fn from(c: char) -> Self {
        MinOffset::Char(c)
    }
}

impl FromStr for MinOffset {
    type Err = IdentError;

    /// Integers win over characters, so `"5"` is code point 5, not `'5'`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Ok(MinOffset::Code(n));
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => Ok(MinOffset::Char(c)),
            _ => Err(IdentError::config(format!(
                "minimum offset {s:?} is neither a non-negative integer nor a single ASCII character"
            ))),
        }
    }
}

impl fmt::Display for MinOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinOffset::Code(c) => write!(f, "{c}"),
            MinOffset::Char(c) => write!(f, "{c:?}"),
        }
    }
}

/// Thresholds on sanger-decoded scores that rule encodings out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    /// Anything above this cannot be sanger.
    pub max_quality: i64,
    /// Anything below this cannot be solexa.
    pub solexa_threshold: i64,
    /// Anything below this cannot be illumina.
    pub illumina_threshold: i64,
}

impl ThresholdConfig {
    pub fn resolve(
        max_quality: u32,
        sanger_min: MinOffset,
        solexa_min: MinOffset,
        illumina_min: MinOffset,
    ) -> Result<Self, IdentError> {
        let sanger = i64::from(sanger_min.code_point()?);
        let solexa = i64::from(solexa_min.code_point()?);
        let illumina = i64::from(illumina_min.code_point()?);
        Ok(Self {
            max_quality: i64::from(max_quality),
            solexa_threshold: solexa - sanger,
            illumina_threshold: illumina - sanger,
        })
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        let base = i64::from(SANGER_OFFSET);
        Self {
            max_quality: i64::from(DEFAULT_MAX_QUALITY),
            solexa_threshold: i64::from(Encoding::Solexa.min_offset()) - base,
            illumina_threshold: i64::from(Encoding::Illumina.min_offset()) - base,
        }
    }
}

/// Everything needed to build an [`Identifier`], before validation.
#[derive(Debug, Clone)]
pub struct IdentifierConfig {
    pub max_quality: u32,
    /// Comma-separated candidate encodings.
    pub encodings: String,
    pub sanger_min: MinOffset,
    pub solexa_min: MinOffset,
    pub illumina_min: MinOffset,
    /// Records skipped before the first sample.
    pub start: u64,
    /// Records skipped between samples.
    pub stride: u64,
    /// Nucleotides to examine per file; 0 means no limit.
    pub nucleotide_budget: u64,
    pub reader: ReaderOptions,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            max_quality: DEFAULT_MAX_QUALITY,
            encodings: "sanger,solexa,illumina".to_string(),
            sanger_min: Encoding::Sanger.min_offset().into(),
            solexa_min: Encoding::Solexa.min_offset().into(),
            illumina_min: Encoding::Illumina.min_offset().into(),
            start: DEFAULT_START,
            stride: DEFAULT_STRIDE,
            nucleotide_budget: DEFAULT_NUCLEOTIDE_BUDGET,
            reader: ReaderOptions::default(),
        }
    }
}

impl IdentifierConfig {
    /// Validate once and produce a reusable identifier.
    pub fn build(&self) -> Result<Identifier, IdentError> {
        let candidates = CandidateSet::parse_list(&self.encodings)?;
        let thresholds = ThresholdConfig::resolve(
            self.max_quality,
            self.sanger_min,
            self.solexa_min,
            self.illumina_min,
        )?;
        let selector = SampleSelector::new(self.start, self.stride, self.nucleotide_budget);
        log::debug!(
            "candidates {candidates}; max quality {}, solexa threshold {}, illumina threshold {}; {selector}",
            thresholds.max_quality,
            thresholds.solexa_threshold,
            thresholds.illumina_threshold,
        );
        Ok(Identifier::new(thresholds, candidates, selector, self.reader))
    }
}
