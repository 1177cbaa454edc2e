//! Builds whose snap artifacts have already been mapped.

use std::collections::HashSet;

use crate::config::KnownBuildEntry;

/// `(version, build number)` pairs handled before this tool existed.
#[rustfmt::skip]
pub const KNOWN_BUILDS: &[(&str, u32)] = &[
    ("59.0b12", 1), ("59.0b14", 1), ("59.0rc", 1), ("59.0rc", 4),
    ("59.0rc", 5), ("59.0.1", 1), ("59.0.2", 1), ("59.0.3", 1),
    ("59.0b13", 1), ("60.0.1", 1), ("60.0.1", 2), ("60.0.1esr", 1),
    ("60.0.2", 1), ("60.0.2esr", 1), ("60.0.2esr", 2), ("60.0", 1),
    ("60.0", 2), ("60.0b10", 1), ("60.0b11", 1), ("60.0b11", 2),
    ("60.0b12", 1), ("60.0b13", 1), ("60.0b14", 2), ("60.0b15", 1),
    ("60.0b16", 1), ("60.0b3", 1), ("60.0b4", 1), ("60.0b5", 1),
    ("60.0b6", 1), ("60.0b7", 1), ("60.0b8", 1), ("60.0b9", 1),
    ("60.0esr", 3), ("60.0esr", 5), ("60.0esr", 6), ("60.1.0esr", 1),
    ("60.1.0esr", 2), ("60.2.0esr", 1), ("60.2.0esr", 2), ("60.2.1esr", 1),
    ("60.2.2esr", 1), ("60.3.0esr", 2), ("60.4.0esr", 2), ("61.0.1", 1),
    ("61.0.2", 1), ("61.0", 1), ("61.0", 2), ("61.0", 3),
    ("61.0b10", 1), ("61.0b11", 1), ("61.0b12", 1), ("61.0b13", 1),
    ("61.0b14", 1), ("61.0b3", 1), ("61.0b4", 1), ("61.0b5", 1),
    ("61.0b6", 1), ("61.0b7", 1), ("61.0b8", 1), ("61.0b9", 1),
    ("62.0.2", 1), ("62.0.3", 1), ("62.0", 1), ("62.0", 2),
    ("62.0b10", 1), ("62.0b11", 1), ("62.0b12", 1), ("62.0b13", 1),
    ("62.0b14", 1), ("62.0b15", 2), ("62.0b16", 1), ("62.0b17", 1),
    ("62.0b18", 1), ("62.0b19", 1), ("62.0b20", 1), ("62.0b3", 1),
    ("62.0b4", 1), ("62.0b5", 1), ("62.0b6", 1), ("62.0b7", 1),
    ("62.0b8", 1), ("62.0b9", 1), ("63.0.1", 4), ("63.0.3", 1),
    ("63.0b10", 1), ("63.0b11", 1), ("63.0b12", 1), ("63.0b12", 2),
    ("63.0b13", 1), ("63.0b14", 1), ("63.0b3", 1), ("63.0b4", 1),
    ("63.0b5", 1), ("63.0b6", 1), ("63.0b7", 1), ("63.0b8", 1),
    ("63.0b9", 1), ("63.0rc", 1), ("63.0rc", 2), ("64.0", 1),
    ("64.0", 2), ("64.0", 3), ("64.0b10", 1), ("64.0b11", 1),
    ("64.0b12", 1), ("64.0b13", 1), ("64.0b14", 1), ("64.0b3", 1),
    ("64.0b4", 1), ("64.0b4", 2), ("64.0b5", 1), ("64.0b6", 1),
    ("64.0b7", 1), ("64.0b8", 1), ("64.0b9", 1), ("65.0b3", 1),
    ("65.0b4", 1),
];

/// Skip-list consulted before any queue call for a build.
#[derive(Debug, Clone)]
pub struct KnownBuilds {
    entries: HashSet<(String, u32)>,
}

impl Default for KnownBuilds {
    fn default() -> Self {
        Self::with_extra(&[])
    }
}

impl KnownBuilds {
    /// A table with no entries; nothing is skipped.
    pub fn empty() -> Self {
        Self {
            entries: HashSet::new(),
        }
    }

    /// The compiled-in table plus `extra` (from config).
    pub fn with_extra(extra: &[KnownBuildEntry]) -> Self {
        let entries = KNOWN_BUILDS
            .iter()
            .map(|(v, b)| ((*v).to_string(), *b))
            .chain(extra.iter().map(|e| (e.version.clone(), e.build_number)))
            .collect();
        Self { entries }
    }

    pub fn contains(&self, version: &str, build_number: u32) -> bool {
        self.entries.contains(&(version.to_string(), build_number))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by version then build, for display.
    pub fn sorted(&self) -> Vec<(&str, u32)> {
        let mut out: Vec<_> = self.entries.iter().map(|(v, b)| (v.as_str(), *b)).collect();
        out.sort_unstable();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_table_has_no_duplicates() {
        assert_eq!(KnownBuilds::default().len(), KNOWN_BUILDS.len());
    }

    #[test]
    fn contains_matches_version_and_build() {
        let known = KnownBuilds::default();
        assert!(known.contains("59.0rc", 4));
        assert!(known.contains("60.0", 2));
        assert!(!known.contains("60.0", 3));
        assert!(!known.contains("59.0", 4));
    }

    #[test]
    fn extra_entries_extend_the_table() {
        let known = KnownBuilds::with_extra(&[KnownBuildEntry {
            version: "66.0b1".to_string(),
            build_number: 2,
        }]);
        assert!(known.contains("66.0b1", 2));
        assert_eq!(known.len(), KNOWN_BUILDS.len() + 1);
    }

    #[test]
    fn sorted_orders_by_version_then_build() {
        let known = KnownBuilds::default();
        let sorted = known.sorted();
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(sorted.first(), Some(&("59.0.1", 1)));
    }
}
