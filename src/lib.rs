//! Detect the quality encoding of FASTQ files.
//!
//! - Sanger, Solexa and Illumina 1.3+ encodings.
//! - Strided sampling of records with a nucleotide budget; no full-file buffering.
//! - Candidates are eliminated from the observed score range; the first time a
//!   single candidate is left the file is decided.
//! - Plain and `.gz` input (auto-detect); optional `mmap` for plain files.
//! - Batches of files run on a rayon pool with per-file error isolation.
//!
//! ```no_run
//! use fastqident::IdentifierConfig;
//!
//! let identifier = IdentifierConfig::default().build()?;
//! let detection = identifier.detect_path("reads.fastq.gz")?;
//! println!("{}", detection.encoding);
//! # Ok::<(), fastqident::IdentError>(())
//! ```

pub mod batch;
pub mod classifier;
pub mod config;
pub mod encoding;
pub mod error;
pub mod identifier;
pub mod logging;
pub mod policy;
pub mod reader;
pub mod record;
pub mod sampler;

pub use crate::batch::{BatchReport, FileVerdict, detect_encodings, detect_encodings_serial};
pub use crate::classifier::{Classifier, ClassifierState, Outcome, classify};
pub use crate::config::{IdentifierConfig, MinOffset, ThresholdConfig};
pub use crate::encoding::{CandidateSet, Encoding};
pub use crate::error::{FastqError, FormatError, IdentError, IoContext};
pub use crate::identifier::{Detection, Identifier};
pub use crate::policy::{ErrorPolicy, LineMode, ReaderOptions};
pub use crate::reader::{FastqReader, Source};
pub use crate::record::FastqRecord;
pub use crate::sampler::SampleSelector;
