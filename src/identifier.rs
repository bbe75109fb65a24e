use crate::classifier::{Classifier, ClassifierState, Outcome};
use crate::config::ThresholdConfig;
use crate::encoding::{CandidateSet, Encoding, SANGER_OFFSET};
use crate::error::{FastqError, IdentError};
use crate::policy::ReaderOptions;
use crate::reader::FastqReader;
use crate::record::FastqRecord;
use crate::sampler::SampleSelector;

use std::io::BufRead;
use std::path::Path;

/// Successful identification of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub encoding: Encoding,
    /// True when the sample ran out before elimination left a single
    /// candidate and the fallback rule picked the answer.
    pub fallback: bool,
    pub samples_seen: u64,
    pub nucleotides_seen: u64,
    /// Lowest sanger-decoded score examined.
    pub min_seen: i64,
    /// Highest sanger-decoded score examined.
    pub max_seen: i64,
}

/// Detects quality encodings with one fixed configuration.
///
/// Cheap to share between threads; every call starts from a fresh
/// classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identifier {
    thresholds: ThresholdConfig,
    candidates: CandidateSet,
    selector: SampleSelector,
    reader: ReaderOptions,
}

impl Identifier {
    pub fn new(
        thresholds: ThresholdConfig,
        candidates: CandidateSet,
        selector: SampleSelector,
        reader: ReaderOptions,
    ) -> Self {
        Self {
            thresholds,
            candidates,
            selector,
            reader,
        }
    }

    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    pub fn candidates(&self) -> CandidateSet {
        self.candidates
    }

    pub fn selector(&self) -> &SampleSelector {
        &self.selector
    }

    pub fn reader_options(&self) -> ReaderOptions {
        self.reader
    }

    /// Identify the encoding of a FASTQ file (plain or gzip).
    pub fn detect_path<P: AsRef<Path>>(&self, path: P) -> Result<Detection, IdentError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let reader = FastqReader::from_path(path, self.reader).map_err(|source| {
            IdentError::UnreadableFile {
                name: name.clone(),
                source,
            }
        })?;
        self.detect_records(&name, reader)
    }

    pub fn detect_reader<R: BufRead + Send + 'static>(
        &self,
        name: &str,
        reader: R,
    ) -> Result<Detection, IdentError> {
        self.detect_records(name, FastqReader::from_bufread(reader, self.reader))
    }

    /// Identify from an already-parsed record stream. `name` only labels
    /// errors and log lines.
    pub fn detect_records<I>(&self, name: &str, records: I) -> Result<Detection, IdentError>
    where
        I: IntoIterator<Item = Result<FastqRecord, FastqError>>,
    {
        let mut classifier = Classifier::new(
            &self.thresholds,
            self.candidates,
            self.selector.nucleotide_budget,
        );
        for rec in self.selector.sample_fallible(records) {
            let rec = rec.map_err(|source| IdentError::UnreadableFile {
                name: name.to_string(),
                source,
            })?;
            if classifier.observe(&rec.qual).is_some() {
                break;
            }
        }
        let (outcome, state) = classifier.finish();
        report(name, outcome, state)
    }

    /// Detect the encoding of `path`, then reopen it from the start so the
    /// whole file can be read with [`FastqRecord::phred_scores`].
    pub fn open_autodetected<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<(Detection, FastqReader), IdentError> {
        let path = path.as_ref();
        let detection = self.detect_path(path)?;
        let reader = FastqReader::from_path(path, self.reader).map_err(|source| {
            IdentError::UnreadableFile {
                name: path.display().to_string(),
                source,
            }
        })?;
        Ok((detection, reader))
    }
}

fn report(name: &str, outcome: Outcome, state: ClassifierState) -> Result<Detection, IdentError> {
    let offset = i64::from(SANGER_OFFSET);
    let (encoding, fallback) = match outcome {
        Outcome::Decided(e) => (e, false),
        Outcome::FallbackDecided(e) => (e, true),
        Outcome::Failed => {
            return Err(IdentError::AmbiguousEncoding {
                name: name.to_string(),
                min_seen: state.min_seen,
                max_seen: state.max_seen,
            });
        }
    };
    log::debug!(
        "{name}: {encoding}{} after {} records / {} nt; min ASCII {}, max ASCII {}",
        if fallback { " (fallback)" } else { "" },
        state.samples_seen,
        state.nucleotides_seen,
        state.min_seen + offset,
        state.max_seen + offset,
    );
    Ok(Detection {
        encoding,
        fallback,
        samples_seen: state.samples_seen,
        nucleotides_seen: state.nucleotides_seen,
        min_seen: state.min_seen,
        max_seen: state.max_seen,
    })
}
