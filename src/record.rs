use crate::encoding::Encoding;

/// One FASTQ record.
///
/// `qual` holds quality scores already decoded with the sanger offset (33).
/// Every supported encoding has an offset of at least 33, so this decoding
/// never underflows whatever the file's real encoding turns out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
    pub qual: Vec<u8>,
}

impl FastqRecord {
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Phred scores of this record, assuming its file uses `encoding`.
    pub fn phred_scores(&self, encoding: Encoding) -> Vec<u8> {
        self.qual
            .iter()
            .map(|&q| encoding.phred_from_sanger(q))
            .collect()
    }
}
