//! Cross-references: the identity claims a record makes about itself.
//!
//! A cross-reference asserts that a record is known to an external database
//! under a given primary identifier. Which cross-references count as identity
//! evidence is decided by an [`IdentityFilter`](crate::identity::IdentityFilter),
//! never by the reference itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lightweight reference to a controlled-vocabulary term.
///
/// Used where a full [`CvTerm`](crate::record::CvTerm) would be overkill: the
/// database and qualifier slots of a cross-reference. Carries the term's
/// short label and, when known, its controlled identifier (e.g. `MI:0356`).
///
/// # Examples
///
/// ```
/// use curamatch::TermRef;
///
/// let identity = TermRef::with_identifier("identity", "MI:0356");
/// assert!(identity.is_term("MI:0356", "identity"));
/// assert!(!identity.is_term("MI:0360", "secondary-ac"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRef {
    /// Short label of the term.
    pub label: String,

    /// Controlled identifier, when the term has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl TermRef {
    /// Creates a term reference with a label only.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            identifier: None,
        }
    }

    /// Creates a term reference with a label and a controlled identifier.
    #[must_use]
    pub fn with_identifier(label: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            identifier: Some(identifier.into()),
        }
    }

    /// Checks whether this reference denotes the given term.
    ///
    /// A reference carrying an identifier matches by identifier alone; one
    /// without an identifier falls back to case-insensitive label equality.
    /// An identifier that disagrees is never rescued by a matching label.
    #[must_use]
    pub fn is_term(&self, identifier: &str, label: &str) -> bool {
        match self.identifier.as_deref() {
            Some(id) => id.eq_ignore_ascii_case(identifier),
            None => self.label.eq_ignore_ascii_case(label),
        }
    }
}

impl fmt::Display for TermRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(id) => write!(f, "{} ({id})", self.label),
            None => write!(f, "{}", self.label),
        }
    }
}

/// A cross-reference from a record into a database.
///
/// The owning record is positional: a cross-reference lives inside its
/// owner's [`RecordCore`](crate::record::RecordCore). Two cross-references
/// are identity-equivalent when their primary ids match and their qualifiers
/// fall inside the configured identity-or-secondary set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    /// The database the primary id belongs to.
    pub database: TermRef,

    /// How the reference relates the record to the primary id, when stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<TermRef>,

    /// The accession within the database.
    pub primary_id: String,
}

impl CrossReference {
    /// Creates a cross-reference.
    #[must_use]
    pub fn new(database: TermRef, qualifier: Option<TermRef>, primary_id: impl Into<String>) -> Self {
        Self {
            database,
            qualifier,
            primary_id: primary_id.into(),
        }
    }

    /// Creates an identity-qualified cross-reference.
    ///
    /// Convenience for the most common identity claim: "this record *is*
    /// `primary_id` in `database`".
    #[must_use]
    pub fn identity(database: TermRef, primary_id: impl Into<String>) -> Self {
        Self::new(
            database,
            Some(TermRef::with_identifier(
                crate::record::vocab::IDENTITY_LABEL,
                crate::record::vocab::IDENTITY_MI,
            )),
            primary_id,
        )
    }
}

impl fmt::Display for CrossReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}:{} [{q}]", self.database.label, self.primary_id),
            None => write!(f, "{}:{}", self.database.label, self.primary_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::vocab;

    #[test]
    fn test_term_ref_matches_by_identifier() {
        let term = TermRef::with_identifier("identity", "MI:0356");
        assert!(term.is_term("MI:0356", "identity"));
        assert!(term.is_term("mi:0356", "something else"));
        assert!(!term.is_term("MI:0360", "identity"));
    }

    #[test]
    fn test_term_ref_matches_by_label_when_identifier_absent() {
        let term = TermRef::new("Identity");
        assert!(term.is_term("MI:0356", "identity"));
        assert!(!term.is_term("MI:0356", "secondary-ac"));
    }

    #[test]
    fn test_identity_constructor_sets_identity_qualifier() {
        let xref = CrossReference::identity(
            TermRef::with_identifier(vocab::UNIPROTKB_LABEL, vocab::UNIPROTKB_MI),
            "P12345",
        );
        let qualifier = xref.qualifier.expect("identity qualifier");
        assert!(qualifier.is_term(vocab::IDENTITY_MI, vocab::IDENTITY_LABEL));
        assert_eq!(xref.primary_id, "P12345");
    }

    #[test]
    fn test_display() {
        let xref = CrossReference::identity(TermRef::new("uniprotkb"), "P12345");
        assert_eq!(format!("{xref}"), "uniprotkb:P12345 [identity (MI:0356)]");
    }

    #[test]
    fn test_serde_round_trip() {
        let xref = CrossReference::new(
            TermRef::with_identifier("pubmed", "MI:0446"),
            None,
            "15630443",
        );
        let json = serde_json::to_string(&xref).unwrap();
        let decoded: CrossReference = serde_json::from_str(&json).unwrap();
        assert_eq!(xref, decoded);
    }
}
