//! Controlled-vocabulary terms.
//!
//! Cv terms name databases, xref qualifiers, interaction types, detection
//! methods, cell types, and tissues. Term equivalence is the workhorse of the
//! BioSource and Experiment strategies: a controlled identifier wins when
//! both sides have one, identity cross-references come next, and a bare label
//! is only trusted when the candidate term carries nothing stronger.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::IdentityFilter;
use crate::record::{Record, RecordCore};

/// PSI-MI accessions and labels the strategies rely on.
pub mod vocab {
    /// `identity` xref qualifier.
    pub const IDENTITY_MI: &str = "MI:0356";
    /// Label of [`IDENTITY_MI`].
    pub const IDENTITY_LABEL: &str = "identity";

    /// `secondary-ac` xref qualifier.
    pub const SECONDARY_AC_MI: &str = "MI:0360";
    /// Label of [`SECONDARY_AC_MI`].
    pub const SECONDARY_AC_LABEL: &str = "secondary-ac";

    /// UniProtKB database.
    pub const UNIPROTKB_MI: &str = "MI:0486";
    /// Label of [`UNIPROTKB_MI`].
    pub const UNIPROTKB_LABEL: &str = "uniprotkb";

    /// ChEBI database.
    pub const CHEBI_MI: &str = "MI:0474";
    /// Label of [`CHEBI_MI`].
    pub const CHEBI_LABEL: &str = "chebi";

    /// Ensembl database.
    pub const ENSEMBL_MI: &str = "MI:0476";
    /// Label of [`ENSEMBL_MI`].
    pub const ENSEMBL_LABEL: &str = "ensembl";

    /// `isoform-parent` xref qualifier: marks an isoform's parent entry.
    pub const ISOFORM_PARENT_MI: &str = "MI:0243";
    /// Label of [`ISOFORM_PARENT_MI`].
    pub const ISOFORM_PARENT_LABEL: &str = "isoform-parent";

    /// `chain-parent` xref qualifier: marks a chain's parent entry.
    pub const CHAIN_PARENT_MI: &str = "MI:0951";
    /// Label of [`CHAIN_PARENT_MI`].
    pub const CHAIN_PARENT_LABEL: &str = "chain-parent";

    /// PubMed database.
    pub const PUBMED_MI: &str = "MI:0446";
    /// Label of [`PUBMED_MI`].
    pub const PUBMED_LABEL: &str = "pubmed";

    /// `primary-reference` xref qualifier.
    pub const PRIMARY_REFERENCE_MI: &str = "MI:0358";
    /// Label of [`PRIMARY_REFERENCE_MI`].
    pub const PRIMARY_REFERENCE_LABEL: &str = "primary-reference";

    /// Annotation topic marking a record as curation-locked: external
    /// accessions must not overwrite it.
    pub const NO_EXTERNAL_UPDATE_TOPIC: &str = "no-external-update";
}

/// Classification of a controlled-vocabulary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvClass {
    /// An external database (uniprotkb, chebi, pubmed, ...).
    Database,
    /// An xref qualifier (identity, secondary-ac, isoform-parent, ...).
    Qualifier,
    /// An annotation topic.
    Topic,
    /// An interaction type (direct interaction, physical association, ...).
    InteractionType,
    /// An interaction detection method.
    InteractionDetection,
    /// A participant identification method.
    ParticipantIdentification,
    /// A cell type.
    CellType,
    /// A tissue.
    Tissue,
}

impl fmt::Display for CvClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database => write!(f, "database"),
            Self::Qualifier => write!(f, "qualifier"),
            Self::Topic => write!(f, "topic"),
            Self::InteractionType => write!(f, "interaction type"),
            Self::InteractionDetection => write!(f, "interaction detection"),
            Self::ParticipantIdentification => write!(f, "participant identification"),
            Self::CellType => write!(f, "cell type"),
            Self::Tissue => write!(f, "tissue"),
        }
    }
}

/// A controlled-vocabulary term.
///
/// # Examples
///
/// ```
/// use curamatch::{CvClass, CvTerm};
///
/// let direct = CvTerm::with_identifier(CvClass::InteractionType, "direct interaction", "MI:0407");
/// assert_eq!(direct.identifier.as_deref(), Some("MI:0407"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvTerm {
    /// Shared record fields.
    pub core: RecordCore,

    /// Classification of the term.
    pub class: CvClass,

    /// Controlled identifier (e.g. `MI:0407`), when assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl CvTerm {
    /// Creates a term with a label only.
    #[must_use]
    pub fn new(class: CvClass, short_label: impl Into<String>) -> Self {
        Self {
            core: RecordCore::new(short_label),
            class,
            identifier: None,
        }
    }

    /// Creates a term with a label and a controlled identifier.
    #[must_use]
    pub fn with_identifier(
        class: CvClass,
        short_label: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            core: RecordCore::new(short_label),
            class,
            identifier: Some(identifier.into()),
        }
    }

    /// Decides whether this candidate term denotes the same concept as a
    /// stored term.
    ///
    /// The comparison is candidate-sided: `self` is the not-yet-persisted
    /// term. Rules, in order:
    ///
    /// 1. different class: never the same;
    /// 2. both carry a controlled identifier: identifiers decide, a
    ///    disagreeing identifier is never rescued by a matching label;
    /// 3. the candidate carries identity/secondary cross-references: the
    ///    terms must share a primary id under that filter;
    /// 4. the candidate carries no cross-references at all: fall back to
    ///    case-insensitive label equality.
    ///
    /// A candidate with only non-identity cross-references matches nothing:
    /// it claims an identity the store cannot corroborate.
    #[must_use]
    pub fn is_same_term(&self, stored: &Self) -> bool {
        if self.class != stored.class {
            return false;
        }
        if let (Some(mine), Some(theirs)) = (self.identifier.as_deref(), stored.identifier.as_deref())
        {
            return mine.eq_ignore_ascii_case(theirs);
        }
        let filter = IdentityFilter::identity_or_secondary();
        if !self.core.select_xrefs(&filter).is_empty() {
            return filter.primary_id_overlap(&self.core.xrefs, &stored.core.xrefs);
        }
        if !self.core.xrefs.is_empty() {
            return false;
        }
        self.core
            .short_label
            .eq_ignore_ascii_case(&stored.core.short_label)
    }
}

impl Record for CvTerm {
    fn core(&self) -> &RecordCore {
        &self.core
    }
}

impl fmt::Display for CvTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(id) => write!(f, "{} ({id})", self.core.short_label),
            None => write!(f, "{}", self.core.short_label),
        }
    }
}

/// Compares two optional terms the way the BioSource and Experiment
/// strategies need: absent terms must be absent on both sides.
#[must_use]
pub fn same_optional_term(candidate: Option<&CvTerm>, stored: Option<&CvTerm>) -> bool {
    match (candidate, stored) {
        (None, None) => true,
        (Some(c), Some(s)) => c.is_same_term(s),
        _ => false,
    }
}
