use crate::encoding::SANGER_OFFSET;
use std::fmt;
use std::io;
use thiserror::Error;

/// Position in the input stream at which a record-level error was noticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

impl fmt::Display for IoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} (byte {})", self.line_num, self.byte_pos)
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected header '@' at start of record")]
    MissingHeader,
    #[error("found FASTA header '>' where FASTQ '@' expected")]
    FastaHeaderDetected,
    #[error("missing '+' separator line")]
    MissingPlus,
    #[error("unexpected EOF inside record")]
    UnexpectedEof,
    #[error("quality length ({qual}) does not match sequence length ({seq})")]
    LengthMismatch { seq: usize, qual: usize },
    #[error("empty sequence")]
    EmptySequence,
    #[error("blank line where quality was expected")]
    EmptyQuality,
    #[error("quality byte 0x{byte:02X} at position {pos} is outside the printable range '!'..='~'")]
    InvalidQuality { byte: u8, pos: usize },
    #[error("gzip input found but the `gzip` feature is disabled")]
    GzipDisabled,
}

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("I/O error at {ctx}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at {ctx}: {source}")]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
}

impl FastqError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }

    pub fn context(&self) -> IoContext {
        match self {
            Self::Io { ctx, .. } | Self::Format { ctx, .. } => *ctx,
        }
    }
}

/// Errors raised while identifying a quality encoding.
///
/// `InvalidConfiguration` is fatal to a whole run and is produced before any
/// input is touched. The other two variants belong to a single input and are
/// reported per file by the batch runner.
#[derive(Debug, Error)]
pub enum IdentError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(
        "could not identify {name}: eliminated all possible encodings \
         (min ASCII {}, max ASCII {})",
        .min_seen + i64::from(SANGER_OFFSET),
        .max_seen + i64::from(SANGER_OFFSET)
    )]
    AmbiguousEncoding {
        name: String,
        min_seen: i64,
        max_seen: i64,
    },
    #[error("cannot read {name}: {source}")]
    UnreadableFile {
        name: String,
        #[source]
        source: FastqError,
    },
}

impl IdentError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Short marker printed in place of an encoding name.
    ///
    /// The binary aborts on configuration errors before printing any
    /// results, so `INVALID_CONFIGURATION` only reaches library callers
    /// that collect errors themselves.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::AmbiguousEncoding { .. } => "INVALID",
            Self::UnreadableFile { .. } => "UNREADABLE",
        }
    }
}
