//! Free-text annotations.

use serde::{Deserialize, Serialize};

/// A free-text annotation with a topic and a text value.
///
/// Annotations never contribute to a record's identity directly; a few
/// strategies use annotation-set equality as a tie-break discriminator, and
/// the interactor strategy treats the `no-external-update` topic as a
/// curation lock.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Annotation {
    /// Controlled topic of the annotation (e.g. `comment`, `caution`).
    pub topic: String,

    /// Free-text value.
    pub text: String,
}

impl Annotation {
    /// Creates an annotation.
    #[must_use]
    pub fn new(topic: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            text: text.into(),
        }
    }
}
