//! Resolver configuration.
//!
//! Everything the strategies need to know about the surrounding store is an
//! explicit value threaded in at construction: the accession prefix that
//! marks "own-namespace" cross-references and the owning institution used for
//! self-referential checks. There is no hidden process-wide state.

use serde::{Deserialize, Serialize};

use crate::record::RecordAc;

/// Configuration for a [`Resolver`](crate::resolver::Resolver).
///
/// # Examples
///
/// ```
/// use curamatch::ResolverConfig;
///
/// let config = ResolverConfig::new("EBI-", "ebi");
/// assert!(config.is_own_accession("EBI-12345"));
/// assert!(!config.is_own_accession("P12345"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Prefix of accessions minted by the surrounding store (e.g. `EBI-`).
    /// A cross-reference whose primary id starts with this prefix points back
    /// into our own namespace.
    pub accession_prefix: String,

    /// Short label of the institution that owns the store.
    pub owner_label: String,

    /// Accession of the owning institution, when it is already persisted.
    /// Enables the institution strategy's self-referential short-circuit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_ac: Option<RecordAc>,

    /// Opt-in degraded behavior: when several stored interactions share one
    /// content checksum, return the first match (in accession order) instead
    /// of failing as ambiguous. Every use is logged at error level. Off by
    /// default.
    #[serde(default)]
    pub allow_checksum_collision_fallback: bool,
}

impl ResolverConfig {
    /// Creates a configuration with the given accession prefix and owning
    /// institution label.
    #[must_use]
    pub fn new(accession_prefix: impl Into<String>, owner_label: impl Into<String>) -> Self {
        Self {
            accession_prefix: accession_prefix.into(),
            owner_label: owner_label.into(),
            owner_ac: None,
            allow_checksum_collision_fallback: false,
        }
    }

    /// Sets the accession of the owning institution.
    #[must_use]
    pub fn with_owner_ac(mut self, ac: RecordAc) -> Self {
        self.owner_ac = Some(ac);
        self
    }

    /// Enables the degraded checksum-collision fallback.
    #[must_use]
    pub const fn with_checksum_collision_fallback(mut self) -> Self {
        self.allow_checksum_collision_fallback = true;
        self
    }

    /// Returns true if the given primary id lives in our own accession
    /// namespace.
    ///
    /// An empty prefix never matches: it would claim every id as our own.
    #[must_use]
    pub fn is_own_accession(&self, primary_id: &str) -> bool {
        !self.accession_prefix.is_empty() && primary_id.starts_with(&self.accession_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_accession_prefix_match() {
        let config = ResolverConfig::new("EBI-", "ebi");
        assert!(config.is_own_accession("EBI-1"));
        assert!(config.is_own_accession("EBI-210456"));
        assert!(!config.is_own_accession("P12345"));
        assert!(!config.is_own_accession("ebi-1")); // prefixes are case-sensitive
    }

    #[test]
    fn test_empty_prefix_never_matches() {
        let config = ResolverConfig::new("", "ebi");
        assert!(!config.is_own_accession("EBI-1"));
        assert!(!config.is_own_accession(""));
    }

    #[test]
    fn test_fluent_construction() {
        let config = ResolverConfig::new("EBI-", "ebi")
            .with_owner_ac(RecordAc::new("EBI-10"))
            .with_checksum_collision_fallback();
        assert_eq!(config.owner_ac, Some(RecordAc::new("EBI-10")));
        assert!(config.allow_checksum_collision_fallback);
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ResolverConfig::new("EBI-", "ebi").with_owner_ac(RecordAc::new("EBI-10"));
        let json = serde_json::to_string(&config).unwrap();
        let decoded: ResolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, decoded);
    }
}
