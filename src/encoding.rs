//! The three historical FASTQ quality encodings and sets of them.

use crate::error::IdentError;
use std::fmt;
use std::str::FromStr;

/// ASCII code of the lowest quality character under the sanger convention.
pub const SANGER_OFFSET: u8 = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Encoding {
    /// Phred+33 (Sanger, Illumina 1.8+).
    Sanger,
    /// Solexa scale, +64, lowest character ';' (Solexa / Illumina 1.0).
    Solexa,
    /// Phred+64 (Illumina 1.3 to 1.7).
    Illumina,
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [Encoding::Sanger, Encoding::Solexa, Encoding::Illumina];

    pub fn name(self) -> &'static str {
        match self {
            Encoding::Sanger => "sanger",
            Encoding::Solexa => "solexa",
            Encoding::Illumina => "illumina",
        }
    }

    /// Format name in the `fastq-<encoding>` style used by sequence I/O libraries.
    pub fn format_name(self) -> &'static str {
        match self {
            Encoding::Sanger => "fastq-sanger",
            Encoding::Solexa => "fastq-solexa",
            Encoding::Illumina => "fastq-illumina",
        }
    }

    /// Documented lowest ASCII code of a quality character.
    pub fn min_offset(self) -> u8 {
        match self {
            Encoding::Sanger => SANGER_OFFSET,
            Encoding::Solexa => 59,
            Encoding::Illumina => 64,
        }
    }

    /// Convert a sanger-decoded score to a Phred score under this encoding.
    ///
    /// Solexa scores live on an odds scale and are mapped to Phred with
    /// `10 * log10(10^(q/10) + 1)`.
    pub fn phred_from_sanger(self, q: u8) -> u8 {
        match self {
            Encoding::Sanger => q,
            Encoding::Illumina => q.saturating_sub(64 - SANGER_OFFSET),
            Encoding::Solexa => {
                let solexa = f64::from(q) - f64::from(64 - SANGER_OFFSET);
                let phred = 10.0 * (10f64.powf(solexa / 10.0) + 1.0).log10();
                phred.round().clamp(0.0, f64::from(u8::MAX)) as u8
            }
        }
    }

    fn bit(self) -> u8 {
        match self {
            Encoding::Sanger => 0b001,
            Encoding::Solexa => 0b010,
            Encoding::Illumina => 0b100,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Encoding::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                IdentError::config(format!(
                    "unknown encoding '{s}'; the only known encodings are sanger, solexa, and illumina"
                ))
            })
    }
}

/// Encodings that are still consistent with the data seen so far.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateSet(u8);

impl CandidateSet {
    pub const fn empty() -> Self {
        CandidateSet(0)
    }

    pub const fn all() -> Self {
        CandidateSet(0b111)
    }

    /// Parse a comma-separated list such as `"sanger, illumina"`.
    ///
    /// Every unknown name is reported in one error, sorted.
    pub fn parse_list(list: &str) -> Result<Self, IdentError> {
        let mut set = CandidateSet::empty();
        let mut unknown = Vec::new();
        for name in list.split(',').map(str::trim) {
            match name.parse::<Encoding>() {
                Ok(e) => set.insert(e),
                Err(_) => unknown.push(name),
            }
        }
        if !unknown.is_empty() {
            unknown.sort_unstable();
            unknown.dedup();
            return Err(IdentError::config(format!(
                "the only known encodings are sanger, solexa, and illumina; unknown: {}",
                unknown.join(",")
            )));
        }
        if set.is_empty() {
            return Err(IdentError::config("no candidate encodings given"));
        }
        Ok(set)
    }

    pub fn insert(&mut self, e: Encoding) {
        self.0 |= e.bit();
    }

    /// Returns whether `e` was present.
    pub fn remove(&mut self, e: Encoding) -> bool {
        let had = self.contains(e);
        self.0 &= !e.bit();
        had
    }

    pub fn contains(self, e: Encoding) -> bool {
        self.0 & e.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The single remaining candidate, if exactly one is left.
    pub fn only(self) -> Option<Encoding> {
        if self.len() == 1 { self.iter().next() } else { None }
    }

    pub fn is_subset(self, other: CandidateSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Encoding> {
        Encoding::ALL.into_iter().filter(move |&e| self.contains(e))
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        CandidateSet::all()
    }
}

impl FromIterator<Encoding> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = Encoding>>(iter: T) -> Self {
        let mut set = CandidateSet::empty();
        for e in iter {
            set.insert(e);
        }
        set
    }
}

impl fmt::Debug for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Encoding::name).collect();
        f.write_str(&names.join(","))
    }
}
