//! Independent identification of many files.

use crate::error::IdentError;
use crate::identifier::{Detection, Identifier};

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub type FileVerdict = Result<Detection, IdentError>;

/// One verdict per distinct input path, ordered by path.
#[derive(Debug, Default)]
pub struct BatchReport {
    entries: BTreeMap<PathBuf, FileVerdict>,
}

impl BatchReport {
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&FileVerdict> {
        self.entries.get(path.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &FileVerdict)> {
        self.entries.iter().map(|(p, v)| (p.as_path(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.entries.values().filter(|v| v.is_err()).count()
    }
}

impl IntoIterator for BatchReport {
    type Item = (PathBuf, FileVerdict);
    type IntoIter = std::collections::btree_map::IntoIter<PathBuf, FileVerdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Identify every file on rayon's pool. A failure only affects its own entry.
pub fn detect_encodings<P>(identifier: &Identifier, paths: &[P]) -> BatchReport
where
    P: AsRef<Path> + Sync,
{
    let entries = paths
        .par_iter()
        .map(|p| {
            let path = p.as_ref();
            let verdict = identifier.detect_path(path);
            if let Err(e) = &verdict {
                log::warn!("{e}");
            }
            (path.to_path_buf(), verdict)
        })
        .collect();
    BatchReport { entries }
}

/// Sequential variant of [`detect_encodings`] for callers that own the thread.
pub fn detect_encodings_serial<P: AsRef<Path>>(
    identifier: &Identifier,
    paths: &[P],
) -> BatchReport {
    let entries = paths
        .iter()
        .map(|p| {
            let verdict = identifier.detect_path(p);
            if let Err(e) = &verdict {
                log::warn!("{e}");
            }
            (p.as_ref().to_path_buf(), verdict)
        })
        .collect();
    BatchReport { entries }
}
