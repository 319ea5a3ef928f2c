//! Components and features: the kinds that are never deduplicated.
//!
//! A component (one interactor's participation in one interaction) and a
//! feature (a region on a participant) only make sense inside their parents,
//! so an "equivalent existing record" does not exist for them. They are
//! modelled so the dispatcher can accept and decline them, nothing more.

use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordCore};

/// A participant of a specific interaction. Always resolves to not-found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Shared record fields.
    pub core: RecordCore,

    /// Identity of the participating interactor.
    pub interactor_id: String,
}

impl Component {
    /// Creates a component.
    #[must_use]
    pub fn new(short_label: impl Into<String>, interactor_id: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(short_label),
            interactor_id: interactor_id.into(),
        }
    }
}

impl Record for Component {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}

/// A sequence feature on a participant. Always resolves to not-found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Shared record fields.
    pub core: RecordCore,

    /// Feature type label (e.g. `binding site`), when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
}

impl Feature {
    /// Creates a feature.
    #[must_use]
    pub fn new(short_label: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(short_label),
            feature_type: None,
        }
    }

    /// Sets the feature type label.
    pub fn set_feature_type(&mut self, feature_type: impl Into<String>) {
        self.feature_type = Some(feature_type.into());
    }
}

impl Record for Feature {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}
