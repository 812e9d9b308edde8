/// One collected data file and, once fitted, its `plfit` parameters.
use std::path::{Path, PathBuf};

/// Metadata encoded in a data file's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Frame number.
    pub frame: u64,
    /// Structure type token (e.g., "H2", "Ht").
    pub kind: String,
    /// Period number.
    pub period: u64,
    /// Structure number within the frame.
    pub struct_no: u64,
}

/// Parameters extracted from a successful `plfit` run.
///
/// The default (all zeros) doubles as the "not fitted" sentinel when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitValues {
    /// Power-law exponent, already shifted down by one.
    pub alpha: f64,
    /// Lower cutoff of the power-law regime.
    pub xmin: f64,
    /// Log-likelihood of the fit.
    pub likelihood: f64,
}

/// A recognised data file.
#[derive(Debug, Clone)]
pub struct Record {
    path: PathBuf,
    meta: FileMeta,
    fit: Option<FitValues>,
}

impl Record {
    /// Build an unfitted record.
    #[must_use]
    pub fn new(path: PathBuf, meta: FileMeta) -> Self {
        Self {
            path,
            meta,
            fit: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn meta(&self) -> &FileMeta {
        &self.meta
    }

    /// Fitted values, or zeros when the fit never succeeded.
    #[must_use]
    pub fn fit(&self) -> FitValues {
        self.fit.unwrap_or_default()
    }

    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fit.is_some()
    }

    /// Commit fitted values. The first commit sticks; later ones are refused
    /// and return `false`.
    pub(crate) fn set_fit(&mut self, values: FitValues) -> bool {
        if self.fit.is_some() {
            return false;
        }
        self.fit = Some(values);
        true
    }
}
