/// File name classification.
///
/// Data files are named `<tag>_<frame>_<type>_<period>_<tag>_<struct>.dat`,
/// e.g. `batch_007_H2_3_run-a_12.dat`. Tags and the type are runs of
/// `[A-Za-z0-9_-]`; frame, period and struct are decimal digit runs. The whole
/// base name must conform.
use regex::Regex;

use super::errors::FitError;
use super::record::FileMeta;

/// Anchored naming pattern. ASCII classes only: `\w`/`\d` would admit Unicode.
pub const NAME_PATTERN: &str = concat!(
    r"^[A-Za-z0-9_-]+_(?P<frame>[0-9]+)_(?P<kind>[A-Za-z0-9_-]+)_",
    r"(?P<period>[0-9]+)_[A-Za-z0-9_-]+_(?P<struct_no>[0-9]+)\.dat$",
);

/// Outcome of classifying a base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Matched(FileMeta),
    NotMatched,
}

/// The compiled naming pattern. Build once and pass by reference.
#[derive(Debug, Clone)]
pub struct FileNamePattern {
    regex: Regex,
}

impl FileNamePattern {
    /// Compile [`NAME_PATTERN`].
    ///
    /// # Errors
    ///
    /// Returns `FitError::Pattern` if the pattern fails to compile.
    pub fn new() -> Result<Self, FitError> {
        Ok(Self {
            regex: Regex::new(NAME_PATTERN)?,
        })
    }

    /// The pattern text, for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether `name` follows the naming pattern. Collection goes through
    /// [`classify`](Self::classify) instead, which also yields the fields.
    #[cfg(test)]
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        matches!(self.classify(name), NameMatch::Matched(_))
    }

    /// Match `name` and extract its fields in one step.
    ///
    /// A digit run too large for `u64` is treated as a non-match.
    #[must_use]
    pub fn classify(&self, name: &str) -> NameMatch {
        let Some(caps) = self.regex.captures(name) else {
            return NameMatch::NotMatched;
        };

        let number = |group: &str| caps.name(group).and_then(|m| m.as_str().parse::<u64>().ok());

        match (
            number("frame"),
            caps.name("kind"),
            number("period"),
            number("struct_no"),
        ) {
            (Some(frame), Some(kind), Some(period), Some(struct_no)) => {
                NameMatch::Matched(FileMeta {
                    frame,
                    kind: kind.as_str().to_owned(),
                    period,
                    struct_no,
                })
            }
            _ => NameMatch::NotMatched,
        }
    }
}
