//! Institutions: the owners and providers of curated data.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordCore};

/// A curating or data-providing institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Shared record fields.
    pub core: RecordCore,
}

impl Institution {
    /// Creates an institution with the given short label.
    #[must_use]
    pub fn new(short_label: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(short_label),
        }
    }
}

impl Record for Institution {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}
