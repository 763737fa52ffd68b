//! Recognition label sets.
//!
//! Both the detector output and a craft's material labels are compared as sets:
//! surrounding whitespace is trimmed, blank labels are dropped and duplicates collapse.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A de-duplicated, ordered set of recognition labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a label, returning `false` if it was blank or already present.
    pub fn insert(&mut self, label: impl AsRef<str>) -> bool {
        let label = label.as_ref().trim();
        if label.is_empty() {
            return false;
        }
        self.0.insert(label.to_owned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when `labels`, taken as a set, equals this set.
    ///
    /// An empty `labels` input never matches: a craft without materials has no
    /// detection signature.
    pub fn is_exactly<I, S>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let other: Self = labels.into_iter().collect();
        !other.is_empty() && other == *self
    }

    /// Labels in ascending order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for LabelSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for label in iter {
            self.insert(label);
        }
    }
}
