/// Directory scanning: turn matching file names into records.
use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use super::errors::FitError;
use super::name::{FileNamePattern, NameMatch};
use super::record::Record;

/// Collect a record for every entry of `source` whose name matches `pattern`.
///
/// Only the immediate entries are examined; subdirectories are never entered,
/// though a subdirectory with a matching name is collected like a file.
/// Records come back sorted by file name.
///
/// # Errors
///
/// - `FitError::DirectoryRead` — `source` (or one of its entries) cannot be read
/// - `FitError::NoMatchingFiles` — nothing in `source` matches
pub fn collect(source: &Path, pattern: &FileNamePattern) -> Result<Vec<Record>, FitError> {
    let read_error = |source_err| FitError::DirectoryRead {
        path: source.to_path_buf(),
        source: source_err,
    };

    let mut names = fs::read_dir(source)
        .map_err(read_error)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    names.sort();

    let mut records = Vec::new();
    for name in names {
        let Some(name) = name.to_str() else {
            trace!(name = ?name, "skipping non-UTF-8 entry");
            continue;
        };
        match pattern.classify(name) {
            NameMatch::Matched(meta) => {
                debug!(name, "collected");
                records.push(Record::new(source.join(name), meta));
            }
            NameMatch::NotMatched => trace!(name, "ignored"),
        }
    }

    if records.is_empty() {
        return Err(FitError::NoMatchingFiles {
            path: source.to_path_buf(),
            pattern: pattern.as_str().to_owned(),
        });
    }

    debug!(count = records.len(), dir = %source.display(), "collection complete");
    Ok(records)
}
