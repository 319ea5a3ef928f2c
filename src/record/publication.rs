//! Publications.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordCore};

/// A publication.
///
/// By store convention the short label is the publication identifier (a
/// PubMed id such as `15630443`), which makes it the store-wide key the
/// publication strategy resolves against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Shared record fields.
    pub core: RecordCore,
}

impl Publication {
    /// Creates a publication with the given short label.
    #[must_use]
    pub fn new(short_label: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(short_label),
        }
    }
}

impl Record for Publication {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}
