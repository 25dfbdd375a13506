use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a stored book.
///
/// Assigned by the store on insert and never reused, so it is the only
/// stable handle a client has on a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Placeholder id carried by a book that has not been inserted yet.
    pub fn unassigned() -> Self {
        Self(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Store-assigned ids start at 1.
    pub fn is_valid(&self) -> bool {
        self.0 >= 1
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<BookId> for i64 {
    fn from(id: BookId) -> Self {
        id.0
    }
}

/// Error returned when text is not a positive integer id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid book id: {0:?}")]
pub struct ParseBookIdError(pub String);

impl FromStr for BookId {
    type Err = ParseBookIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) if id >= 1 => Ok(Self(id)),
            _ => Err(ParseBookIdError(s.to_string())),
        }
    }
}
