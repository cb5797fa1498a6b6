//! Journal model
//!
//! A bank or cash journal a payment can be recorded through.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::JournalId;

/// A selectable payment journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: JournalId,
    pub name: String,
}

impl Journal {
    pub fn new(id: JournalId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Journal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
