//! The candidate record model.
//!
//! A candidate record is an in-memory, not-yet-persisted object awaiting a
//! decision of "new" vs "already exists". Every kind shares a common core
//! (optional accession, short label, cross-references, annotations) plus
//! kind-specific fields. [`CandidateRecord`] is the closed tagged union the
//! dispatcher matches over: every kind provably has a strategy at compile
//! time.

mod annotation;
mod biosource;
mod component;
mod cv;
mod experiment;
mod institution;
mod interaction;
mod interactor;
mod publication;
mod xref;

pub use annotation::Annotation;
pub use biosource::BioSource;
pub use component::{Component, Feature};
pub use cv::{same_optional_term, CvClass, CvTerm};
pub use experiment::Experiment;
pub use institution::Institution;
pub use interaction::{Interaction, Participant};
pub use interactor::{Interactor, InteractorKind};
pub use publication::Publication;
pub use xref::{CrossReference, TermRef};

pub use cv::vocab;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::IdentityFilter;

/// A stable store accession, such as `EBI-210456`.
///
/// Minted by the store on insert; a candidate record has none until it is
/// resolved or persisted. Accessions order lexicographically, which is the
/// determinism anchor for multi-result queries.
///
/// # Examples
///
/// ```
/// use curamatch::RecordAc;
///
/// let ac = RecordAc::new("EBI-12345");
/// assert_eq!(ac.as_str(), "EBI-12345");
/// assert_eq!(format!("{ac}"), "EBI-12345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordAc(String);

impl RecordAc {
    /// Creates an accession from a string.
    #[must_use]
    pub fn new(ac: impl Into<String>) -> Self {
        Self(ac.into())
    }

    /// Returns the accession as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordAc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordAc {
    fn from(ac: String) -> Self {
        Self(ac)
    }
}

impl From<&str> for RecordAc {
    fn from(ac: &str) -> Self {
        Self(ac.to_string())
    }
}

/// The kind tag of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A curating or data-providing institution.
    Institution,
    /// A publication, keyed by its store-wide short label.
    Publication,
    /// A controlled-vocabulary term.
    CvTerm,
    /// An experiment.
    Experiment,
    /// A molecular interaction.
    Interaction,
    /// An interactor (protein, nucleic acid, small molecule, gene).
    Interactor,
    /// A biological source (organism, optionally cell type and tissue).
    BioSource,
    /// A participant of an interaction. Never deduplicated.
    Component,
    /// A sequence feature on a participant. Never deduplicated.
    Feature,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Institution => write!(f, "institution"),
            Self::Publication => write!(f, "publication"),
            Self::CvTerm => write!(f, "cv term"),
            Self::Experiment => write!(f, "experiment"),
            Self::Interaction => write!(f, "interaction"),
            Self::Interactor => write!(f, "interactor"),
            Self::BioSource => write!(f, "biosource"),
            Self::Component => write!(f, "component"),
            Self::Feature => write!(f, "feature"),
        }
    }
}

/// Fields shared by every record kind.
///
/// # Examples
///
/// ```
/// use curamatch::{Annotation, RecordCore};
///
/// let mut core = RecordCore::new("p53_human");
/// core.add_annotation(Annotation::new("comment", "reviewed 2024"));
/// assert!(core.has_annotation_topic("comment"));
/// assert!(core.ac.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCore {
    /// Stable accession, absent until the record is resolved or persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ac: Option<RecordAc>,

    /// Short display label.
    pub short_label: String,

    /// Cross-references into external databases (or back into our own).
    #[serde(default)]
    pub xrefs: Vec<CrossReference>,

    /// Free-text annotations, each with a topic and a text value.
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl RecordCore {
    /// Creates a core with the given short label and nothing else.
    #[must_use]
    pub fn new(short_label: impl Into<String>) -> Self {
        Self {
            ac: None,
            short_label: short_label.into(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Sets the stable accession.
    pub fn set_ac(&mut self, ac: RecordAc) {
        self.ac = Some(ac);
    }

    /// Adds a cross-reference.
    pub fn add_xref(&mut self, xref: CrossReference) {
        self.xrefs.push(xref);
    }

    /// Adds an annotation.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Returns the cross-references that count as identity evidence under
    /// the given filter, in insertion order.
    #[must_use]
    pub fn select_xrefs(&self, filter: &IdentityFilter) -> Vec<&CrossReference> {
        filter.select(&self.xrefs)
    }

    /// Returns the annotations as a sorted (topic, text) multiset.
    ///
    /// Order-independent: two cores with the same pairs in different order
    /// produce equal sets.
    #[must_use]
    pub fn annotation_set(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .annotations
            .iter()
            .map(|a| (a.topic.as_str(), a.text.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Returns true if both cores carry exactly the same (topic, text) pairs,
    /// in any order.
    #[must_use]
    pub fn same_annotations(&self, other: &Self) -> bool {
        self.annotation_set() == other.annotation_set()
    }

    /// Returns true if any annotation carries the given topic
    /// (case-insensitive).
    #[must_use]
    pub fn has_annotation_topic(&self, topic: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.topic.eq_ignore_ascii_case(topic))
    }

    /// Returns the text of the first annotation with the given topic.
    #[must_use]
    pub fn annotation_text(&self, topic: &str) -> Option<&str> {
        self.annotations
            .iter()
            .find(|a| a.topic.eq_ignore_ascii_case(topic))
            .map(|a| a.text.as_str())
    }
}

/// Common access to the fields every record kind shares.
///
/// Implemented by each kind struct so generic helpers (ambiguity narrowing,
/// store plumbing) can reach the accession and label without knowing the
/// kind.
pub trait Record {
    /// Shared fields of this record.
    fn core(&self) -> &RecordCore;

    /// Stable accession, when the record is persisted.
    fn ac(&self) -> Option<&RecordAc> {
        self.core().ac.as_ref()
    }

    /// Short display label.
    fn short_label(&self) -> &str {
        &self.core().short_label
    }
}

/// A candidate record: the closed tagged union over the supported kinds.
///
/// Constructed in memory by upstream builders, passed once through the
/// resolver, then either discarded (an existing accession was found and the
/// caller merges into the stored record) or handed to the insert path.
///
/// # Examples
///
/// ```
/// use curamatch::{CandidateRecord, Institution, RecordKind};
///
/// let candidate = CandidateRecord::from(Institution::new("ebi"));
/// assert_eq!(candidate.kind(), RecordKind::Institution);
/// assert_eq!(candidate.short_label(), "ebi");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateRecord {
    /// An institution candidate.
    Institution(Institution),
    /// A publication candidate.
    Publication(Publication),
    /// A controlled-vocabulary term candidate.
    CvTerm(CvTerm),
    /// An experiment candidate.
    Experiment(Experiment),
    /// An interaction candidate.
    Interaction(Interaction),
    /// An interactor candidate.
    Interactor(Interactor),
    /// A biological-source candidate.
    BioSource(BioSource),
    /// A component candidate. Never deduplicated.
    Component(Component),
    /// A feature candidate. Never deduplicated.
    Feature(Feature),
}

impl CandidateRecord {
    /// Returns the kind tag of this candidate.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Institution(_) => RecordKind::Institution,
            Self::Publication(_) => RecordKind::Publication,
            Self::CvTerm(_) => RecordKind::CvTerm,
            Self::Experiment(_) => RecordKind::Experiment,
            Self::Interaction(_) => RecordKind::Interaction,
            Self::Interactor(_) => RecordKind::Interactor,
            Self::BioSource(_) => RecordKind::BioSource,
            Self::Component(_) => RecordKind::Component,
            Self::Feature(_) => RecordKind::Feature,
        }
    }

    /// Returns the shared core of this candidate.
    #[must_use]
    pub const fn core(&self) -> &RecordCore {
        match self {
            Self::Institution(r) => &r.core,
            Self::Publication(r) => &r.core,
            Self::CvTerm(r) => &r.core,
            Self::Experiment(r) => &r.core,
            Self::Interaction(r) => &r.core,
            Self::Interactor(r) => &r.core,
            Self::BioSource(r) => &r.core,
            Self::Component(r) => &r.core,
            Self::Feature(r) => &r.core,
        }
    }

    /// Returns the stable accession, when present.
    #[must_use]
    pub fn ac(&self) -> Option<&RecordAc> {
        self.core().ac.as_ref()
    }

    /// Returns the short display label.
    #[must_use]
    pub fn short_label(&self) -> &str {
        &self.core().short_label
    }
}

impl Record for CandidateRecord {
    fn core(&self) -> &RecordCore {
        self.core()
    }
}

impl From<Institution> for CandidateRecord {
    fn from(record: Institution) -> Self {
        Self::Institution(record)
    }
}

impl From<Publication> for CandidateRecord {
    fn from(record: Publication) -> Self {
        Self::Publication(record)
    }
}

impl From<CvTerm> for CandidateRecord {
    fn from(record: CvTerm) -> Self {
        Self::CvTerm(record)
    }
}

impl From<Experiment> for CandidateRecord {
    fn from(record: Experiment) -> Self {
        Self::Experiment(record)
    }
}

impl From<Interaction> for CandidateRecord {
    fn from(record: Interaction) -> Self {
        Self::Interaction(record)
    }
}

impl From<Interactor> for CandidateRecord {
    fn from(record: Interactor) -> Self {
        Self::Interactor(record)
    }
}

impl From<BioSource> for CandidateRecord {
    fn from(record: BioSource) -> Self {
        Self::BioSource(record)
    }
}

impl From<Component> for CandidateRecord {
    fn from(record: Component) -> Self {
        Self::Component(record)
    }
}

impl From<Feature> for CandidateRecord {
    fn from(record: Feature) -> Self {
        Self::Feature(record)
    }
}
