//! The cross-reference identity matcher.
//!
//! Not every cross-reference is an identity claim: a `see-also` pointer or a
//! GO annotation says something *about* a record, while a uniprotkb xref with
//! an `identity` qualifier says what the record *is*. An [`IdentityFilter`]
//! holds the pair of inclusion sets (acceptable databases and acceptable
//! qualifiers) that decide which cross-references count as identity evidence
//! for a given strategy. Distinct filters exist for external-identity checks
//! (uniprot/chebi/ensembl accessions) and lineage checks (isoform/chain
//! parent pointers); own-namespace checks are prefix checks on the primary id
//! and live in [`ResolverConfig`](crate::config::ResolverConfig).

use serde::{Deserialize, Serialize};

use crate::record::{vocab, CrossReference, TermRef};

/// Inclusion sets deciding which cross-references count as identity evidence.
///
/// An empty set accepts any term, so `IdentityFilter::new(vec![], vec![])` is
/// the all-pass filter. A set entry with an identifier matches a term by
/// identifier; an entry without one matches by case-insensitive label.
///
/// # Examples
///
/// ```
/// use curamatch::{CrossReference, IdentityFilter, TermRef};
/// use curamatch::record::vocab;
///
/// let uniprot = TermRef::with_identifier(vocab::UNIPROTKB_LABEL, vocab::UNIPROTKB_MI);
/// let xrefs = vec![
///     CrossReference::identity(uniprot, "P12345"),
///     CrossReference::new(TermRef::new("go"), None, "GO:0005634"),
/// ];
///
/// let selected = IdentityFilter::external_identity().select(&xrefs);
/// assert_eq!(selected.len(), 1);
/// assert_eq!(selected[0].primary_id, "P12345");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFilter {
    /// Acceptable databases. Empty accepts any database.
    databases: Vec<TermRef>,

    /// Acceptable qualifiers. Empty accepts any qualifier, including none.
    qualifiers: Vec<TermRef>,
}

impl IdentityFilter {
    /// Creates a filter from custom inclusion sets.
    #[must_use]
    pub const fn new(databases: Vec<TermRef>, qualifiers: Vec<TermRef>) -> Self {
        Self {
            databases,
            qualifiers,
        }
    }

    /// Any database, `identity` qualifier only.
    #[must_use]
    pub fn identity_only() -> Self {
        Self::new(
            Vec::new(),
            vec![TermRef::with_identifier(
                vocab::IDENTITY_LABEL,
                vocab::IDENTITY_MI,
            )],
        )
    }

    /// Any database, `identity` or `secondary-ac` qualifier.
    #[must_use]
    pub fn identity_or_secondary() -> Self {
        Self::new(
            Vec::new(),
            vec![
                TermRef::with_identifier(vocab::IDENTITY_LABEL, vocab::IDENTITY_MI),
                TermRef::with_identifier(vocab::SECONDARY_AC_LABEL, vocab::SECONDARY_AC_MI),
            ],
        )
    }

    /// External identity databases (uniprotkb, chebi, ensembl) with the
    /// `identity` qualifier.
    #[must_use]
    pub fn external_identity() -> Self {
        Self::new(
            vec![
                TermRef::with_identifier(vocab::UNIPROTKB_LABEL, vocab::UNIPROTKB_MI),
                TermRef::with_identifier(vocab::CHEBI_LABEL, vocab::CHEBI_MI),
                TermRef::with_identifier(vocab::ENSEMBL_LABEL, vocab::ENSEMBL_MI),
            ],
            vec![TermRef::with_identifier(
                vocab::IDENTITY_LABEL,
                vocab::IDENTITY_MI,
            )],
        )
    }

    /// Any database, lineage qualifiers (`isoform-parent`, `chain-parent`).
    #[must_use]
    pub fn lineage() -> Self {
        Self::new(
            Vec::new(),
            vec![
                TermRef::with_identifier(vocab::ISOFORM_PARENT_LABEL, vocab::ISOFORM_PARENT_MI),
                TermRef::with_identifier(vocab::CHAIN_PARENT_LABEL, vocab::CHAIN_PARENT_MI),
            ],
        )
    }

    /// Returns true if the cross-reference falls inside both inclusion sets.
    ///
    /// A non-empty qualifier set rejects cross-references without a
    /// qualifier: an unqualified xref asserts nothing.
    #[must_use]
    pub fn matches(&self, xref: &CrossReference) -> bool {
        if !self.databases.is_empty() && !contains_term(&self.databases, &xref.database) {
            return false;
        }
        if self.qualifiers.is_empty() {
            return true;
        }
        match &xref.qualifier {
            Some(qualifier) => contains_term(&self.qualifiers, qualifier),
            None => false,
        }
    }

    /// Returns the ordered subset of cross-references matching this filter.
    #[must_use]
    pub fn select<'a>(&self, xrefs: &'a [CrossReference]) -> Vec<&'a CrossReference> {
        xrefs.iter().filter(|x| self.matches(x)).collect()
    }

    /// Returns true if any primary id appears in both selected sets.
    ///
    /// This is the "two records claim the same identity" test every
    /// xref-based strategy builds on.
    #[must_use]
    pub fn primary_id_overlap(&self, a: &[CrossReference], b: &[CrossReference]) -> bool {
        let selected = self.select(a);
        if selected.is_empty() {
            return false;
        }
        self.select(b)
            .iter()
            .any(|x| selected.iter().any(|y| y.primary_id == x.primary_id))
    }
}

fn contains_term(set: &[TermRef], term: &TermRef) -> bool {
    set.iter().any(|entry| match (&entry.identifier, &term.identifier) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => entry.label.eq_ignore_ascii_case(&term.label),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniprot() -> TermRef {
        TermRef::with_identifier(vocab::UNIPROTKB_LABEL, vocab::UNIPROTKB_MI)
    }

    fn identity_qualifier() -> TermRef {
        TermRef::with_identifier(vocab::IDENTITY_LABEL, vocab::IDENTITY_MI)
    }

    #[test]
    fn test_empty_sets_accept_everything() {
        let filter = IdentityFilter::new(Vec::new(), Vec::new());
        let unqualified = CrossReference::new(TermRef::new("go"), None, "GO:0005634");
        assert!(filter.matches(&unqualified));
    }

    #[test]
    fn test_qualifier_set_rejects_unqualified_xrefs() {
        let filter = IdentityFilter::identity_only();
        let unqualified = CrossReference::new(uniprot(), None, "P12345");
        let qualified = CrossReference::identity(uniprot(), "P12345");
        assert!(!filter.matches(&unqualified));
        assert!(filter.matches(&qualified));
    }

    #[test]
    fn test_term_set_matches_by_label_when_identifier_absent() {
        // A store that never loaded the MI ontology still labels its
        // qualifier terms; the filter must recognise them.
        let filter = IdentityFilter::identity_only();
        let labelled_only = CrossReference::new(
            uniprot(),
            Some(TermRef::new("Identity")),
            "P12345",
        );
        assert!(filter.matches(&labelled_only));
    }

    #[test]
    fn test_external_identity_requires_database_and_qualifier() {
        let filter = IdentityFilter::external_identity();

        let uniprot_identity = CrossReference::identity(uniprot(), "P12345");
        assert!(filter.matches(&uniprot_identity));

        let pubmed_identity = CrossReference::identity(
            TermRef::with_identifier(vocab::PUBMED_LABEL, vocab::PUBMED_MI),
            "15630443",
        );
        assert!(!filter.matches(&pubmed_identity));

        let uniprot_secondary = CrossReference::new(
            uniprot(),
            Some(TermRef::with_identifier(
                vocab::SECONDARY_AC_LABEL,
                vocab::SECONDARY_AC_MI,
            )),
            "Q00000",
        );
        assert!(!filter.matches(&uniprot_secondary));
    }

    #[test]
    fn test_select_keeps_input_order() {
        let filter = IdentityFilter::identity_only();
        let xrefs = vec![
            CrossReference::identity(uniprot(), "P2"),
            CrossReference::new(TermRef::new("go"), None, "GO:1"),
            CrossReference::identity(uniprot(), "P1"),
        ];
        let selected = filter.select(&xrefs);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].primary_id, "P2");
        assert_eq!(selected[1].primary_id, "P1");
    }

    #[test]
    fn test_lineage_filter() {
        let filter = IdentityFilter::lineage();
        let isoform = CrossReference::new(
            uniprot(),
            Some(TermRef::with_identifier(
                vocab::ISOFORM_PARENT_LABEL,
                vocab::ISOFORM_PARENT_MI,
            )),
            "P04637",
        );
        let identity = CrossReference::new(uniprot(), Some(identity_qualifier()), "P04637-2");
        assert!(filter.matches(&isoform));
        assert!(!filter.matches(&identity));
    }

    #[test]
    fn test_primary_id_overlap() {
        let filter = IdentityFilter::identity_or_secondary();
        let a = vec![CrossReference::identity(uniprot(), "P12345")];
        let b = vec![
            CrossReference::new(TermRef::new("go"), None, "P12345"),
            CrossReference::identity(uniprot(), "P12345"),
        ];
        let c = vec![CrossReference::identity(uniprot(), "Q99999")];

        assert!(filter.primary_id_overlap(&a, &b));
        assert!(!filter.primary_id_overlap(&a, &c));
        assert!(!filter.primary_id_overlap(&[], &b));
    }
}
