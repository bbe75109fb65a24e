//! Lazy strided selection of records.
//!
//! The sampler only decides *which* records are looked at. The nucleotide
//! budget travels with the selector but is enforced by the classifier, which
//! is the one counting bases.

use std::fmt;

/// Which records of a stream are examined, and when to stop early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSelector {
    /// Zero-based index of the first examined record.
    pub start: u64,
    /// Records skipped between two examined records; 0 examines every record.
    pub stride: u64,
    /// Stop once more than this many nucleotides were examined.
    pub nucleotide_budget: Option<u64>,
}

impl SampleSelector {
    /// A budget of 0 means unbounded.
    pub fn new(start: u64, stride: u64, nucleotide_budget: u64) -> Self {
        Self {
            start,
            stride,
            nucleotide_budget: (nucleotide_budget > 0).then_some(nucleotide_budget),
        }
    }

    /// Every record, no budget.
    pub fn exhaustive() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn sample<I: IntoIterator>(&self, records: I) -> Sampled<I::IntoIter> {
        Sampled {
            inner: records.into_iter(),
            cursor: Cursor::new(self.start, self.stride),
        }
    }

    /// Like [`sample`](Self::sample), but errors are yielded as soon as the
    /// underlying stream produces them, whatever their position.
    pub fn sample_fallible<I, T, E>(&self, records: I) -> SampledFallible<I::IntoIter>
    where
        I: IntoIterator<Item = Result<T, E>>,
    {
        SampledFallible {
            inner: records.into_iter(),
            cursor: Cursor::new(self.start, self.stride),
        }
    }
}

impl Default for SampleSelector {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_START,
            crate::config::DEFAULT_STRIDE,
            crate::config::DEFAULT_NUCLEOTIDE_BUDGET,
        )
    }
}

impl fmt::Display for SampleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "start {}, stride {}, budget ", self.start, self.stride)?;
        match self.nucleotide_budget {
            Some(n) => write!(f, "{n} nt"),
            None => f.write_str("unbounded"),
        }
    }
}

/// Running record index and the selection rule
/// `index >= start && (index - start) % (stride + 1) == 0`.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: u64,
    start: u64,
    step: u64,
}

impl Cursor {
    fn new(start: u64, stride: u64) -> Self {
        Self {
            index: 0,
            start,
            step: stride.saturating_add(1),
        }
    }

    /// Consume one index; true if that record is selected.
    fn advance(&mut self) -> bool {
        let i = self.index;
        self.index += 1;
        i >= self.start && (i - self.start) % self.step == 0
    }
}

/// Iterator returned by [`SampleSelector::sample`].
#[derive(Debug, Clone)]
pub struct Sampled<I> {
    inner: I,
    cursor: Cursor,
}

impl<I: Iterator> Iterator for Sampled<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.inner.next()?;
            if self.cursor.advance() {
                return Some(item);
            }
        }
    }
}

/// Iterator returned by [`SampleSelector::sample_fallible`].
#[derive(Debug, Clone)]
pub struct SampledFallible<I> {
    inner: I,
    cursor: Cursor,
}

impl<I, T, E> Iterator for SampledFallible<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Err(e) => return Some(Err(e)),
                Ok(rec) if self.cursor.advance() => return Some(Ok(rec)),
                Ok(_) => {}
            }
        }
    }
}
