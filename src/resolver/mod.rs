//! The reconciliation resolver: dispatcher and per-kind strategies.
//!
//! Given a candidate record, [`Resolver::resolve`] selects the strategy for
//! the candidate's kind, queries the store gateway through the strategy's
//! primary key, narrows multi-hit sets with the kind's tie-break rules, and
//! returns a [`Resolution`]. The strategy set is closed over
//! [`CandidateRecord`]'s variants and dispatched by exhaustive match, so "a
//! kind with no strategy" is a compile error rather than a runtime
//! configuration fault.
//!
//! Resolution is exact-or-fail: a candidate that cannot be pinned to exactly
//! one stored record resolves to [`Resolution::NotFound`] (safe to insert) or
//! [`Resolution::Ambiguous`] (abort persistence for this record), never to a
//! guessed match.

mod biosource;
mod cvterm;
mod experiment;
mod institution;
mod interaction;
mod interactor;
mod publication;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::ResolveResult;
use crate::record::{CandidateRecord, RecordAc, RecordKind};
use crate::storage::StoreGateway;

/// Why a resolution attempt could not be settled to zero-or-one record.
///
/// Carried by [`Resolution::Ambiguous`]. Ambiguity is a hard failure for the
/// record being persisted; the diagnostic rendering is meant for curators and
/// operators, not for programmatic recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ambiguity {
    /// More than one stored record survived every applicable tie-break.
    MultipleMatches {
        /// Kind of the records that matched.
        kind: RecordKind,
        /// The key that produced the set, as a human diagnostic.
        key: String,
        /// How many records survived.
        count: usize,
    },

    /// A cv term candidate carries a controlled identifier the store does not
    /// know, yet its label matches a different stored term. A data-entry
    /// problem, not a transient race: either the candidate's identifier or
    /// the stored term is wrong, and a human has to decide which.
    IdentifierLabelConflict {
        /// The candidate's controlled identifier, unknown to the store.
        identifier: String,
        /// The candidate's short label.
        label: String,
        /// Accession of the stored term the label collides with.
        label_match: RecordAc,
    },
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MultipleMatches { kind, key, count } => {
                write!(f, "{count} {kind} records match {key}")
            }
            Self::IdentifierLabelConflict {
                identifier,
                label,
                label_match,
            } => write!(
                f,
                "identifier/label mismatch: identifier {identifier} matches no stored term \
                 but label '{label}' matches {label_match}"
            ),
        }
    }
}

/// Outcome of resolving one candidate record.
///
/// # Examples
///
/// ```
/// use curamatch::{RecordAc, Resolution};
///
/// let found = Resolution::Found(RecordAc::new("EBI-12345"));
/// assert!(found.is_found());
/// assert_eq!(found.found(), Some(&RecordAc::new("EBI-12345")));
/// assert!(Resolution::NotFound.is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// An equivalent record exists; merge into it instead of inserting.
    Found(RecordAc),

    /// No equivalent record exists; the candidate is safe to insert.
    NotFound,

    /// More than one record remained plausible. Fatal for this record:
    /// callers must abort its persistence, never guess.
    Ambiguous(Ambiguity),
}

impl Resolution {
    /// Returns true if an equivalent record was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns true if no equivalent record exists.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns true if the attempt was ambiguous.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    /// Returns the matched accession, when one was found.
    #[must_use]
    pub const fn found(&self) -> Option<&RecordAc> {
        match self {
            Self::Found(ac) => Some(ac),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(ac) => write!(f, "found {ac}"),
            Self::NotFound => write!(f, "not found"),
            Self::Ambiguous(reason) => write!(f, "ambiguous: {reason}"),
        }
    }
}

/// The reconciliation resolver.
///
/// Owns no persistent state: all record state lives behind the store gateway,
/// and everything else the strategies need (accession prefix, owning
/// institution) is explicit configuration passed at construction. Resolution
/// is a pure read: the gateway is a read-only trait, so a resolve call
/// provably cannot mutate the store.
///
/// Each call runs on the caller's thread inside the caller's ambient
/// transaction; the resolver issues sequential queries and never parallelizes
/// them. Resolve-then-insert is not atomic across sessions (see
/// [`StoreGateway`]).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use curamatch::{
///     CandidateRecord, InMemoryStore, Institution, RecordAc, Resolution, Resolver,
///     ResolverConfig,
/// };
///
/// let store = Arc::new(InMemoryStore::new());
/// let mut ebi = Institution::new("ebi");
/// ebi.core.set_ac(RecordAc::new("EBI-10"));
/// store.insert_institution(ebi).unwrap();
///
/// let resolver = Resolver::new(store, ResolverConfig::new("EBI-", "ebi"));
/// let outcome = resolver
///     .resolve(&CandidateRecord::from(Institution::new("ebi")))
///     .unwrap();
/// assert_eq!(outcome, Resolution::Found(RecordAc::new("EBI-10")));
/// ```
pub struct Resolver {
    store: Arc<dyn StoreGateway>,
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver over the given store gateway and configuration.
    #[must_use]
    pub fn new(store: Arc<dyn StoreGateway>, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// Returns the configuration this resolver was built with.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves one candidate record against the store.
    ///
    /// Returns an error only for malformed candidates (precondition failures,
    /// raised before any query) and gateway failures, which propagate
    /// unchanged; the resolver performs no retries. Every well-formed
    /// candidate gets a [`Resolution`], ambiguity included.
    pub fn resolve(&self, candidate: &CandidateRecord) -> ResolveResult<Resolution> {
        let store = self.store.as_ref();
        let resolution = match candidate {
            CandidateRecord::Institution(r) => institution::resolve(r, store, &self.config)?,
            CandidateRecord::Publication(r) => publication::resolve(r, store)?,
            CandidateRecord::CvTerm(r) => cvterm::resolve(r, store)?,
            CandidateRecord::Experiment(r) => experiment::resolve(r, store)?,
            CandidateRecord::Interaction(r) => interaction::resolve(r, store, &self.config)?,
            CandidateRecord::Interactor(r) => interactor::resolve(r, store, &self.config)?,
            CandidateRecord::BioSource(r) => biosource::resolve(r, store)?,
            // Components and features only exist inside their parent records;
            // there is no store-wide identity to reconcile against.
            CandidateRecord::Component(_) | CandidateRecord::Feature(_) => Resolution::NotFound,
        };
        debug!(
            target: "curamatch::resolve",
            kind = %candidate.kind(),
            label = %candidate.short_label(),
            outcome = %resolution,
            "candidate resolved"
        );
        Ok(resolution)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
