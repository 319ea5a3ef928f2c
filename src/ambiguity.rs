//! Ambiguity narrowing.
//!
//! When a primary key returns more than one stored candidate, strategies
//! apply secondary discriminators (annotation-set equality, parent-lineage
//! equality, sequence equality) to narrow the set. Narrowing is pure
//! filtering over immutable candidate lists: each step returns a new list,
//! nothing is removed in place. [`settle`] turns whatever survives into a
//! final [`Resolution`].

use crate::record::{Record, RecordKind};
use crate::resolver::{Ambiguity, Resolution};

/// Keeps the candidates satisfying a discriminator.
///
/// # Examples
///
/// ```
/// use curamatch::ambiguity::narrow;
///
/// let values = [1, 2, 3, 4];
/// let refs: Vec<&i32> = values.iter().collect();
/// let even = narrow(refs, |v| v % 2 == 0);
/// assert_eq!(even, vec![&2, &4]);
/// ```
#[must_use]
pub fn narrow<'a, T, F>(candidates: Vec<&'a T>, keep: F) -> Vec<&'a T>
where
    F: Fn(&T) -> bool,
{
    candidates.into_iter().filter(|c| keep(c)).collect()
}

/// Turns the survivors of narrowing into a final resolution.
///
/// Zero survivors is a clean not-found; exactly one is a match; anything
/// else is ambiguous and reported with the key that produced the set.
/// `key` should read as a human diagnostic, e.g. `label p53_human`.
#[must_use]
pub fn settle<T: Record>(kind: RecordKind, key: &str, survivors: &[&T]) -> Resolution {
    let acs: Vec<_> = survivors.iter().filter_map(|r| r.ac()).collect();
    match acs.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Found(acs[0].clone()),
        count => Resolution::Ambiguous(Ambiguity::MultipleMatches {
            kind,
            key: key.to_string(),
            count,
        }),
    }
}
