//! The technique catalog.
//!
//! An ordered, read-only list of techniques handed to the engine at
//! construction. Entries that fail validation are rejected one by one; the
//! rest of the catalog stays usable.

use tracing::warn;

use super::technique::{Technique, TechniqueSpec};
use crate::error::BreatheError;

/// Ordered list of validated techniques.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    techniques: Vec<Technique>,
}

/// Result of loading a catalog from configuration.
#[derive(Debug)]
pub struct CatalogLoad {
    /// The usable catalog.
    pub catalog: Catalog,
    /// Entries that were rejected, with the reason.
    pub rejected: Vec<BreatheError>,
}

impl Catalog {
    /// Build a catalog from already validated techniques.
    #[must_use]
    pub const fn new(techniques: Vec<Technique>) -> Self {
        Self { techniques }
    }

    /// The built-in techniques.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            (
                "4-7-8 Breathing",
                "Inhale for 4 seconds, hold for 7 seconds, exhale for 8 seconds. Repeat 4 times.",
                vec![4, 7, 8],
                4,
            ),
            (
                "Box Breathing",
                "Inhale, hold, exhale, and hold again - each for 4 seconds.",
                vec![4, 4, 4, 4],
                5,
            ),
            (
                "Deep Breathing",
                "Simple deep breathing with equal inhale and exhale.",
                vec![5, 0, 5],
                6,
            ),
        ];

        let techniques = entries
            .into_iter()
            .filter_map(|(name, description, pattern, cycles)| {
                Technique::new(name, description, pattern, cycles).ok()
            })
            .collect();

        Self { techniques }
    }

    /// The built-in techniques followed by the valid entries of `specs`.
    #[must_use]
    pub fn with_custom(specs: &[TechniqueSpec]) -> CatalogLoad {
        let mut load = Self::from_specs(specs);
        let mut techniques = Self::builtin().techniques;
        techniques.append(&mut load.catalog.techniques);
        load.catalog.techniques = techniques;
        load
    }

    /// Validate each spec, keeping the valid ones in order.
    #[must_use]
    pub fn from_specs(specs: &[TechniqueSpec]) -> CatalogLoad {
        let mut techniques = Vec::with_capacity(specs.len());
        let mut rejected = Vec::new();

        for spec in specs {
            match Technique::try_from(spec) {
                Ok(technique) => techniques.push(technique),
                Err(err) => {
                    warn!(technique = %spec.name, error = %err, "rejecting catalog entry");
                    rejected.push(err);
                }
            }
        }

        CatalogLoad {
            catalog: Self { techniques },
            rejected,
        }
    }

    /// Technique at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Technique> {
        self.techniques.get(index)
    }

    /// Number of techniques.
    #[must_use]
    pub fn len(&self) -> usize {
        self.techniques.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty()
    }

    /// Iterate over techniques in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Technique> {
        self.techniques.iter()
    }

    /// Find a technique by 1-based number or case-insensitive name prefix.
    ///
    /// An exact name match wins over a prefix match.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Option<usize> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Ok(number) = query.parse::<usize>() {
            if (1..=self.len()).contains(&number) {
                return Some(number - 1);
            }
        }

        let needle = query.to_lowercase();
        self.techniques
            .iter()
            .position(|t| t.name().to_lowercase() == needle)
            .or_else(|| {
                self.techniques
                    .iter()
                    .position(|t| t.name().to_lowercase().starts_with(&needle))
            })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Technique;
    type IntoIter = std::slice::Iter<'a, Technique>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::technique::PatternSpec;

    fn spec(name: &str, pattern: Vec<i64>, cycles: i64) -> TechniqueSpec {
        TechniqueSpec {
            name: name.to_string(),
            description: String::new(),
            pattern: PatternSpec::List(pattern),
            cycles,
        }
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 3);

        let first = catalog.get(0).unwrap();
        assert_eq!(first.name(), "4-7-8 Breathing");
        assert_eq!(first.pattern(), &[4, 7, 8]);
        assert_eq!(first.cycles(), 4);

        let deep = catalog.get(2).unwrap();
        assert_eq!(deep.pattern(), &[5, 0, 5]);
        assert_eq!(deep.cycles(), 6);
    }

    #[test]
    fn test_invalid_entries_do_not_poison_catalog() {
        let specs = vec![
            spec("Good", vec![4, 4], 2),
            spec("Empty", vec![], 2),
            spec("Negative", vec![4, -2], 2),
            spec("Also Good", vec![3, 0, 3], 1),
        ];

        let load = Catalog::from_specs(&specs);
        assert_eq!(load.catalog.len(), 2);
        assert_eq!(load.rejected.len(), 2);
        assert_eq!(load.catalog.get(1).unwrap().name(), "Also Good");
    }

    #[test]
    fn test_with_custom_appends_after_builtin() {
        let load = Catalog::with_custom(&[spec("Triangle", vec![4, 4, 4], 8)]);
        assert_eq!(load.catalog.len(), 4);
        assert_eq!(load.catalog.get(3).unwrap().name(), "Triangle");
        assert!(load.rejected.is_empty());
    }

    #[test]
    fn test_resolve() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("1"), Some(0));
        assert_eq!(catalog.resolve("3"), Some(2));
        assert_eq!(catalog.resolve("box"), Some(1));
        assert_eq!(catalog.resolve("4-7-8"), Some(0));
        assert_eq!(catalog.resolve("DEEP breathing"), Some(2));
        assert_eq!(catalog.resolve("99"), None);
        assert_eq!(catalog.resolve("wim hof"), None);
        assert_eq!(catalog.resolve(""), None);
    }
}
