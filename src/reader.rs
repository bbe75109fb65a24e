use crate::encoding::SANGER_OFFSET;
use crate::error::{FastqError, FormatError, IoContext};
use crate::policy::{ErrorPolicy, LineMode, ReaderOptions};
use crate::record::FastqRecord;

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

const BUF_CAPACITY: usize = 256 * 1024;
/// Highest printable ASCII character ('~').
const QUAL_MAX: u8 = 126;

#[derive(Debug, Clone)]
pub enum Source {
    Path(PathBuf),
    Reader,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Reader => f.write_str("<reader>"),
        }
    }
}

/// Streaming FASTQ reader (plain/.gz) yielding sanger-decoded records.
pub struct FastqReader {
    src: Source,
    rdr: Box<dyn BufRead + Send>,
    opts: ReaderOptions,
    line_num: u64,
    byte_pos: u64,
    // Header line found while resyncing after a skipped record.
    pending_header: Option<String>,
    line: String,
}

impl FastqReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, opts: ReaderOptions) -> Result<Self, FastqError> {
        let path = path.as_ref();
        let start = IoContext::default();
        let mut f = File::open(path).map_err(|e| FastqError::io_err(e, start))?;

        let is_gz = path.extension().and_then(|s| s.to_str()) == Some("gz")
            || looks_like_gzip(&mut f).unwrap_or(false);

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            gzip_reader(f)?
        } else {
            plain_reader(f)?
        };

        Ok(Self::with_source(Source::Path(path.to_path_buf()), rdr, opts))
    }

    /// Wrap an arbitrary `BufRead` (stdin, in-memory buffers, ...).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, opts: ReaderOptions) -> Self {
        Self::with_source(Source::Reader, Box::new(reader), opts)
    }

    fn with_source(src: Source, rdr: Box<dyn BufRead + Send>, opts: ReaderOptions) -> Self {
        Self {
            src,
            rdr,
            opts,
            line_num: 0,
            byte_pos: 0,
            pending_header: None,
            line: String::with_capacity(256),
        }
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Iterator-style `next` record.
    pub fn next_record(&mut self) -> Option<Result<FastqRecord, FastqError>> {
        loop {
            match self.read_one() {
                Ok(Some(rec)) => return Some(Ok(rec)),
                Ok(None) => return None,
                Err(err) if self.opts.error_policy == ErrorPolicy::Skip => {
                    log::warn!("{}: skipping malformed record: {err}", self.src);
                    if !self.resync_to_next_header() {
                        return None;
                    }
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }

    /// Read into `self.line`, stripping the line terminator.
    fn read_line(&mut self) -> Result<usize, FastqError> {
        self.line.clear();
        let n = self
            .rdr
            .read_line(&mut self.line)
            .map_err(|e| FastqError::io_err(e, self.ctx()))?;
        if n > 0 {
            self.line_num += 1;
            self.byte_pos += n as u64;
            if self.line.ends_with('\n') {
                self.line.pop();
            }
            if self.line.ends_with('\r') {
                self.line.pop();
            }
        }
        Ok(n)
    }

    /// Like `read_line`, but EOF is an error.
    fn expect_line(&mut self) -> Result<(), FastqError> {
        if self.read_line()? == 0 {
            return Err(self.format_err(FormatError::UnexpectedEof));
        }
        Ok(())
    }

    fn read_one(&mut self) -> Result<Option<FastqRecord>, FastqError> {
        let header = match self.pending_header.take() {
            Some(h) => h,
            None => loop {
                if self.read_line()? == 0 {
                    return Ok(None);
                }
                if !self.line.is_empty() {
                    break self.line.clone();
                }
            },
        };

        let Some(name) = header.strip_prefix('@') else {
            let kind = if header.starts_with('>') {
                FormatError::FastaHeaderDetected
            } else {
                FormatError::MissingHeader
            };
            return Err(self.format_err(kind));
        };
        let mut parts = name.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts.next().map(|s| s.trim().to_string());

        let (seq, raw_qual) = match self.opts.line_mode {
            LineMode::Single => self.read_single_line_body()?,
            LineMode::Multi => self.read_multi_line_body()?,
        };

        if raw_qual.len() != seq.len() {
            return Err(self.format_err(FormatError::LengthMismatch {
                seq: seq.len(),
                qual: raw_qual.len(),
            }));
        }
        let qual = self.decode_quality(raw_qual)?;

        Ok(Some(FastqRecord {
            id,
            desc,
            seq,
            qual,
        }))
    }

    fn read_single_line_body(&mut self) -> Result<(Vec<u8>, Vec<u8>), FastqError> {
        self.expect_line()?;
        if self.line.is_empty() {
            return Err(self.format_err(FormatError::EmptySequence));
        }
        let seq = self.line.as_bytes().to_vec();

        self.expect_line()?;
        if !self.line.starts_with('+') {
            return Err(self.format_err(FormatError::MissingPlus));
        }

        self.expect_line()?;
        Ok((seq, self.line.as_bytes().to_vec()))
    }

    fn read_multi_line_body(&mut self) -> Result<(Vec<u8>, Vec<u8>), FastqError> {
        let mut seq = Vec::<u8>::with_capacity(256);
        loop {
            self.expect_line()?;
            if self.line.starts_with('+') {
                break;
            }
            seq.extend_from_slice(self.line.as_bytes());
        }
        if seq.is_empty() {
            return Err(self.format_err(FormatError::EmptySequence));
        }

        // Quality lines may start with '@', so stop on length, not content.
        let mut qual = Vec::<u8>::with_capacity(seq.len());
        while qual.len() < seq.len() {
            self.expect_line()?;
            if self.line.is_empty() {
                return Err(self.format_err(FormatError::EmptyQuality));
            }
            qual.extend_from_slice(self.line.as_bytes());
        }
        Ok((seq, qual))
    }

    /// Subtract the sanger offset in place, rejecting non-printable bytes.
    fn decode_quality(&self, mut qual: Vec<u8>) -> Result<Vec<u8>, FastqError> {
        for (pos, q) in qual.iter_mut().enumerate() {
            let byte = *q;
            if !(SANGER_OFFSET..=QUAL_MAX).contains(&byte) {
                return Err(self.format_err(FormatError::InvalidQuality { byte, pos }));
            }
            *q = byte - SANGER_OFFSET;
        }
        Ok(qual)
    }

    /// Resynchronize to next header line starting with '@'.
    /// Returns true if a header was found and stored in `pending_header`.
    fn resync_to_next_header(&mut self) -> bool {
        loop {
            match self.read_line() {
                Ok(0) | Err(_) => return false,
                Ok(_) if self.line.starts_with('@') => {
                    self.pending_header = Some(self.line.clone());
                    return true;
                }
                Ok(_) => {}
            }
        }
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }

    fn format_err(&self, kind: FormatError) -> FastqError {
        FastqError::fmt_err(kind, self.ctx())
    }
}

impl Iterator for FastqReader {
    type Item = Result<FastqRecord, FastqError>;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

fn looks_like_gzip<R: Read + Seek>(r: &mut R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let pos = r.stream_position()?;
    let n = r.read(&mut magic)?;
    r.seek(SeekFrom::Start(pos))?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}

#[cfg(feature = "gzip")]
fn gzip_reader(f: File) -> Result<Box<dyn BufRead + Send>, FastqError> {
    Ok(Box::new(BufReader::with_capacity(
        BUF_CAPACITY,
        MultiGzDecoder::new(f),
    )))
}

#[cfg(not(feature = "gzip"))]
fn gzip_reader(_f: File) -> Result<Box<dyn BufRead + Send>, FastqError> {
    Err(FastqError::fmt_err(
        FormatError::GzipDisabled,
        IoContext::default(),
    ))
}

#[cfg(feature = "mmap")]
fn plain_reader(f: File) -> Result<Box<dyn BufRead + Send>, FastqError> {
    use memmap2::Mmap;
    use std::io::Cursor;
    // SAFETY: the map is read-only; concurrent truncation of the file by
    // another process is outside what this reader guards against.
    let mmap = unsafe { Mmap::map(&f) }.map_err(|e| FastqError::io_err(e, IoContext::default()))?;
    Ok(Box::new(Cursor::new(mmap)))
}

#[cfg(not(feature = "mmap"))]
fn plain_reader(f: File) -> Result<Box<dyn BufRead + Send>, FastqError> {
    Ok(Box::new(BufReader::with_capacity(BUF_CAPACITY, f)))
}
