//! Interactions.

use serde::{Deserialize, Serialize};

use crate::record::{CvTerm, Record, RecordCore};

/// One participant of an interaction, referenced by its interactor's
/// identity (a store accession or an external primary id, whatever the
/// upstream builder keys participants by).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Identity of the participating interactor.
    pub interactor_id: String,
}

impl Participant {
    /// Creates a participant.
    #[must_use]
    pub fn new(interactor_id: impl Into<String>) -> Self {
        Self {
            interactor_id: interactor_id.into(),
        }
    }
}

/// A molecular interaction: an ordered participant list plus an interaction
/// type.
///
/// Identity is the content checksum over the canonical participant/type
/// data; labels and annotations never contribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Shared record fields.
    pub core: RecordCore,

    /// Interaction type (e.g. direct interaction, physical association).
    pub interaction_type: CvTerm,

    /// Participants, in curation order.
    pub participants: Vec<Participant>,
}

impl Interaction {
    /// Creates an interaction with the given label and type and no
    /// participants.
    #[must_use]
    pub fn new(short_label: impl Into<String>, interaction_type: CvTerm) -> Self {
        Self {
            core: RecordCore::new(short_label),
            interaction_type,
            participants: Vec::new(),
        }
    }

    /// Adds a participant.
    pub fn add_participant(&mut self, participant: Participant) {
        self.participants.push(participant);
    }
}

impl Record for Interaction {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}
