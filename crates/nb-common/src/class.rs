//! Class identifiers.
//!
//! Callers speak in signed integers; the classifier indexes dense arrays.
//! `ClassId` is the validated bridge between the two.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, non-negative class identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub usize);

impl ClassId {
    /// Validate a caller-supplied class id.
    ///
    /// Fails with [`Error::InvalidClass`] for negative ids and for ids that do
    /// not fit in an index on this platform.
    pub fn from_raw(raw: i64) -> Result<Self> {
        usize::try_from(raw)
            .map(ClassId)
            .map_err(|_| Error::InvalidClass { class: raw })
    }

    /// Like [`ClassId::from_raw`], but returns `None` instead of an error.
    pub fn checked(raw: i64) -> Option<Self> {
        usize::try_from(raw).ok().map(ClassId)
    }

    /// Index into dense per-class storage.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ClassId {
    fn from(index: usize) -> Self {
        ClassId(index)
    }
}

impl TryFrom<i64> for ClassId {
    type Error = Error;

    fn try_from(raw: i64) -> Result<Self> {
        ClassId::from_raw(raw)
    }
}
