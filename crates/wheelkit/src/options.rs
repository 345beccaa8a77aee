use derive_more::{AsRef, Deref, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Option text is blank")]
    Blank,
    #[error("No option at index {index} (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered wheel options. Order decides slice position; duplicates are fine.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct OptionList(Vec<String>);

impl OptionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the trimmed `raw` text and returns the stored value.
    pub fn add(&mut self, raw: &str) -> Result<&str, OptionError> {
        let item = raw.trim();
        if item.is_empty() {
            return Err(OptionError::Blank);
        }
        self.0.push(item.to_string());
        Ok(self.0.last().map(String::as_str).unwrap_or_default())
    }

    pub fn remove(&mut self, index: usize) -> Result<String, OptionError> {
        if index >= self.0.len() {
            return Err(OptionError::OutOfRange {
                index,
                len: self.0.len(),
            });
        }
        Ok(self.0.remove(index))
    }

    pub fn can_spin(&self) -> bool {
        self.0.len() >= 2
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for OptionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
