//! # curamatch - Reconciliation resolver for curated interaction stores
//!
//! Given a freshly-built, not-yet-persisted candidate record (an interactor,
//! interaction, controlled-vocabulary term, experiment, biological source,
//! publication, or institution), decide whether an equivalent record already
//! exists in the store and, if so, return its stable accession so the
//! persistence layer can update in place instead of inserting a duplicate.
//!
//! Equivalence is not one equality test. Each record kind has its own notion
//! of sameness (a content checksum, a cross-reference identity, a composite
//! key, or a tie-break among several imperfect candidates) and the resolver
//! is exact-or-fail throughout: a false-positive merge corrupts curated data,
//! so indecision is reported explicitly as [`Resolution::Ambiguous`] rather
//! than guessed away.
//!
//! ## Core Concepts
//!
//! - **Candidate record**: an in-memory record awaiting a "new vs already
//!   exists" decision, modelled as the closed [`CandidateRecord`] union
//! - **Store gateway**: the read-only query trait the strategies ask for
//!   stored records; resolution provably never writes
//! - **Identity filter**: the inclusion sets deciding which cross-references
//!   count as identity evidence for a given strategy
//! - **Content checksum**: the canonical 64-bit key over an interaction's
//!   participants and type
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use curamatch::{
//!     CandidateRecord, InMemoryStore, Interactor, InteractorKind, RecordAc, Resolution,
//!     Resolver, ResolverConfig,
//! };
//!
//! // A store holding one protein under EBI-1.
//! let store = Arc::new(InMemoryStore::new());
//! let mut p53 = Interactor::new("p53_human", InteractorKind::Protein);
//! p53.core.set_ac(RecordAc::new("EBI-1"));
//! store.insert_interactor(p53).unwrap();
//!
//! // A label-only candidate resolves to the stored accession.
//! let resolver = Resolver::new(store, ResolverConfig::new("EBI-", "ebi"));
//! let candidate = CandidateRecord::from(Interactor::new("p53_human", InteractorKind::Protein));
//! assert_eq!(
//!     resolver.resolve(&candidate).unwrap(),
//!     Resolution::Found(RecordAc::new("EBI-1"))
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ambiguity;
pub mod checksum;
pub mod config;
pub mod error;
pub mod identity;
pub mod record;
pub mod resolver;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use checksum::ContentChecksum;
pub use config::ResolverConfig;
pub use error::{PreconditionError, ResolveError, ResolveResult};
pub use identity::IdentityFilter;
pub use record::{
    Annotation, BioSource, CandidateRecord, Component, CrossReference, CvClass, CvTerm,
    Experiment, Feature, Institution, Interaction, Interactor, InteractorKind, Participant,
    Publication, Record, RecordAc, RecordCore, RecordKind, TermRef,
};
pub use resolver::{Ambiguity, Resolution, Resolver};
pub use storage::{InMemoryStore, StoreError, StoreGateway};
