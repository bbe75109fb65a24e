/// What the reader does with a record it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Hand the error to the caller. Identification of that input stops.
    #[default]
    Return,
    /// Log the record at warn level, resync on the next '@' line and carry on.
    Skip,
}

/// How sequence/quality lines are laid out in FASTQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Sequence and quality occupy exactly one line each.
    Single,
    /// Sequence/quality may be wrapped over several lines.
    #[default]
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderOptions {
    pub error_policy: ErrorPolicy,
    pub line_mode: LineMode,
}

impl ReaderOptions {
    pub fn lenient(mut self) -> Self {
        self.error_policy = ErrorPolicy::Skip;
        self
    }

    pub fn single_line(mut self) -> Self {
        self.line_mode = LineMode::Single;
        self
    }
}
