//! The canonical content hasher.
//!
//! An interaction's identity is its structure: which interactors participate
//! and under which interaction type. This module serialises exactly that
//! (participant ids in sorted order, then an explicit type token) and runs a
//! 64-bit cyclic-redundancy checksum over the bytes. Labels, annotations,
//! and every other non-identity field stay out of the input, so the checksum
//! is a pure function of the canonical structural data.

use std::fmt;

use crc::{Crc, CRC_64_GO_ISO};
use serde::{Deserialize, Serialize};

use crate::record::Interaction;

const CRC_64: Crc<u64> = Crc::<u64>::new(&CRC_64_GO_ISO);

/// A 64-bit content checksum of an interaction's canonical structure.
///
/// Used as an exact-identity key: the store keeps one per interaction and
/// the interaction strategy queries by it. Two checksums are comparable
/// across processes and store snapshots because the canonicalisation is
/// deterministic.
///
/// # Examples
///
/// ```
/// use curamatch::{ContentChecksum, CvClass, CvTerm, Interaction, Participant};
///
/// let kind = CvTerm::with_identifier(CvClass::InteractionType, "direct interaction", "MI:0407");
/// let mut ab = Interaction::new("a-b", kind.clone());
/// ab.add_participant(Participant::new("EBI-1"));
/// ab.add_participant(Participant::new("EBI-2"));
///
/// let mut ba = Interaction::new("b-a", kind);
/// ba.add_participant(Participant::new("EBI-2"));
/// ba.add_participant(Participant::new("EBI-1"));
///
/// // Participant order never changes the checksum; the label does not either.
/// assert_eq!(ContentChecksum::of(&ab), ContentChecksum::of(&ba));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContentChecksum(u64);

impl ContentChecksum {
    /// Computes the checksum of an interaction's canonical structure.
    #[must_use]
    pub fn of(interaction: &Interaction) -> Self {
        Self(CRC_64.checksum(canonical_text(interaction).as_bytes()))
    }

    /// Wraps a raw checksum value, e.g. one read back from a store column.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw checksum value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContentChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Builds the canonical textual serialisation the checksum runs over.
///
/// Participant interactor ids are sorted lexicographically with duplicates
/// kept (a homodimer has two entries), each terminated by `|`; the trailing
/// token is `type:` plus the interaction type's controlled identifier, or
/// its label when no identifier is assigned.
#[must_use]
pub fn canonical_text(interaction: &Interaction) -> String {
    let mut ids: Vec<&str> = interaction
        .participants
        .iter()
        .map(|p| p.interactor_id.as_str())
        .collect();
    ids.sort_unstable();

    let type_token = interaction
        .interaction_type
        .identifier
        .as_deref()
        .unwrap_or(&interaction.interaction_type.core.short_label);

    let mut text = String::with_capacity(ids.iter().map(|id| id.len() + 1).sum::<usize>() + 5 + type_token.len());
    for id in ids {
        text.push_str(id);
        text.push('|');
    }
    text.push_str("type:");
    text.push_str(type_token);
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CvClass, CvTerm, Participant};

    fn direct_interaction() -> CvTerm {
        CvTerm::with_identifier(CvClass::InteractionType, "direct interaction", "MI:0407")
    }

    fn interaction_with(ids: &[&str]) -> Interaction {
        let mut interaction = Interaction::new("test", direct_interaction());
        for id in ids {
            interaction.add_participant(Participant::new(*id));
        }
        interaction
    }

    #[test]
    fn test_crc64_go_iso_check_vector() {
        // Catalogue check value for CRC-64/GO-ISO over "123456789".
        assert_eq!(CRC_64.checksum(b"123456789"), 0xb909_56c7_75a4_1001);
    }

    #[test]
    fn test_canonical_text_sorts_participants() {
        let interaction = interaction_with(&["EBI-2", "EBI-1"]);
        assert_eq!(canonical_text(&interaction), "EBI-1|EBI-2|type:MI:0407");
    }

    #[test]
    fn test_canonical_text_keeps_duplicates() {
        let homodimer = interaction_with(&["EBI-1", "EBI-1"]);
        assert_eq!(canonical_text(&homodimer), "EBI-1|EBI-1|type:MI:0407");
        assert_ne!(
            ContentChecksum::of(&homodimer),
            ContentChecksum::of(&interaction_with(&["EBI-1"]))
        );
    }

    #[test]
    fn test_canonical_text_falls_back_to_type_label() {
        let mut interaction = interaction_with(&["EBI-1"]);
        interaction.interaction_type = CvTerm::new(CvClass::InteractionType, "direct interaction");
        assert_eq!(
            canonical_text(&interaction),
            "EBI-1|type:direct interaction"
        );
    }

    #[test]
    fn test_checksum_ignores_participant_order() {
        let ab = interaction_with(&["P1", "P2"]);
        let ba = interaction_with(&["P2", "P1"]);
        assert_eq!(ContentChecksum::of(&ab), ContentChecksum::of(&ba));
    }

    #[test]
    fn test_checksum_ignores_non_identity_fields() {
        use crate::record::Annotation;

        let plain = interaction_with(&["P1", "P2"]);
        let mut decorated = interaction_with(&["P1", "P2"]);
        decorated.core.short_label = "entirely different label".to_string();
        decorated
            .core
            .add_annotation(Annotation::new("comment", "curated twice"));

        assert_eq!(ContentChecksum::of(&plain), ContentChecksum::of(&decorated));
    }

    #[test]
    fn test_checksum_tracks_participants_and_type() {
        let base = interaction_with(&["P1", "P2"]);
        let other_participants = interaction_with(&["P1", "P3"]);
        assert_ne!(
            ContentChecksum::of(&base),
            ContentChecksum::of(&other_participants)
        );

        let mut other_type = interaction_with(&["P1", "P2"]);
        other_type.interaction_type =
            CvTerm::with_identifier(CvClass::InteractionType, "physical association", "MI:0915");
        assert_ne!(ContentChecksum::of(&base), ContentChecksum::of(&other_type));
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        let checksum = ContentChecksum::from_raw(0x00ab_cdef_0123_4567);
        assert_eq!(format!("{checksum}"), "00abcdef01234567");
    }
}
