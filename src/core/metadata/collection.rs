//! core::metadata::collection
//!
//! Ordered, immutable container of [`Metadata`].
//!
//! # Invariants
//!
//! - Order is declaration order; after a merge, class-level entries come
//!   before method-level entries
//! - Duplicates are kept
//! - Every operation returns a new collection; filtering never reorders
//!   the surviving entries
//!
//! # Example
//!
//! ```
//! use testmeta::core::metadata::{Metadata, MetadataCollection};
//!
//! let class_level = MetadataCollection::from_values([Metadata::group("slow")]);
//! let method_level = MetadataCollection::from_values([Metadata::Test, Metadata::group("db")]);
//!
//! let merged = class_level.merge_with(&method_level);
//! assert_eq!(merged.len(), 3);
//! assert_eq!(merged.group_names(), ["slow", "db"]);
//!
//! for (index, metadata) in merged.iter().enumerate() {
//!     println!("{index}: {metadata}");
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::kind::MetadataKind;
use super::schema::Metadata;
use crate::core::dependency::TestDependency;

/// An ordered sequence of metadata values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataCollection {
    values: Vec<Metadata>,
}

impl MetadataCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from values, keeping their order.
    pub fn from_values(values: impl IntoIterator<Item = Metadata>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// `self` followed by `other`.
    pub fn merge_with(&self, other: &MetadataCollection) -> Self {
        let mut values = Vec::with_capacity(self.values.len() + other.values.len());
        values.extend_from_slice(&self.values);
        values.extend_from_slice(&other.values);
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Metadata> {
        self.values.get(index)
    }

    pub fn as_slice(&self) -> &[Metadata] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Metadata> {
        self.values.iter()
    }

    /// Entries matching a predicate, in order.
    pub fn filter(&self, predicate: impl Fn(&Metadata) -> bool) -> Self {
        Self {
            values: self.values.iter().filter(|m| predicate(m)).cloned().collect(),
        }
    }

    /// Entries of one kind, in order.
    pub fn of_kind(&self, kind: MetadataKind) -> Self {
        self.filter(|m| m.kind() == kind)
    }

    /// Entries whose kind is any of `kinds`, in order.
    pub fn of_kinds(&self, kinds: &[MetadataKind]) -> Self {
        self.filter(|m| kinds.contains(&m.kind()))
    }

    /// Class- and method-level dependencies together, in order.
    pub fn filter_depends(&self) -> Self {
        self.filter(Metadata::is_depends)
    }

    pub fn filter_lifecycle_hooks(&self) -> Self {
        self.filter(Metadata::is_lifecycle_hook)
    }

    pub fn filter_requirements(&self) -> Self {
        self.filter(Metadata::is_requirement)
    }

    pub fn filter_coverage(&self) -> Self {
        self.filter(Metadata::is_coverage)
    }

    /// Dependency descriptors carried by the dependency entries.
    ///
    /// This is the hand-off point to the dependency algebra.
    pub fn dependencies(&self) -> Vec<TestDependency> {
        self.values
            .iter()
            .filter_map(Metadata::as_dependency)
            .cloned()
            .collect()
    }

    /// Names of all `Group` entries, in order.
    pub fn group_names(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter_map(|m| match m {
                Metadata::Group { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<Metadata> for MetadataCollection {
    fn from_iter<T: IntoIterator<Item = Metadata>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

impl<'a> IntoIterator for &'a MetadataCollection {
    type Item = &'a Metadata;
    type IntoIter = std::slice::Iter<'a, Metadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for MetadataCollection {
    type Item = Metadata;
    type IntoIter = std::vec::IntoIter<Metadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency::CloneMode;
    use crate::core::requirement::Requirement;

    fn one_of_each() -> MetadataCollection {
        MetadataCollection::from_values([
            Metadata::AfterClass,
            Metadata::After,
            Metadata::BackupGlobals { enabled: true },
            Metadata::BackupStaticProperties { enabled: true },
            Metadata::BeforeClass,
            Metadata::Before,
            Metadata::CodeCoverageIgnore,
            Metadata::Covers {
                target: String::new(),
            },
            Metadata::CoversClass {
                class_name: String::new(),
            },
            Metadata::CoversDefaultClass {
                class_name: String::new(),
            },
            Metadata::CoversFunction {
                function_name: String::new(),
            },
            Metadata::CoversMethod {
                class_name: String::new(),
                method_name: String::new(),
            },
            Metadata::CoversNothing,
            Metadata::DataProvider {
                class_name: String::new(),
                method_name: String::new(),
            },
            Metadata::depends_on_class("", CloneMode::None),
            Metadata::depends_on_method("", "", CloneMode::None),
            Metadata::DoesNotPerformAssertions,
            Metadata::ExcludeGlobalVariableFromBackup {
                global_variable_name: String::new(),
            },
            Metadata::ExcludeStaticPropertyFromBackup {
                class_name: String::new(),
                property_name: String::new(),
            },
            Metadata::group(""),
            Metadata::PostCondition,
            Metadata::PreCondition,
            Metadata::PreserveGlobalState { enabled: true },
            Metadata::RequiresMethod {
                class_name: String::new(),
                method_name: String::new(),
            },
            Metadata::RequiresFunction {
                function_name: String::new(),
            },
            Metadata::RequiresOperatingSystemFamily {
                family: String::new(),
            },
            Metadata::RequiresOperatingSystem {
                pattern: String::new(),
            },
            Metadata::RequiresPhpExtension {
                extension: String::new(),
                version_requirement: None,
            },
            Metadata::RequiresPhp {
                requirement: Requirement::parse(">= 8.0.0").unwrap(),
            },
            Metadata::RequiresPhpunit {
                requirement: Requirement::parse(">= 10.0.0").unwrap(),
            },
            Metadata::RequiresSetting {
                setting: "foo".into(),
                value: "bar".into(),
            },
            Metadata::RunClassInSeparateProcess,
            Metadata::RunInSeparateProcess,
            Metadata::RunTestsInSeparateProcesses,
            Metadata::TestDox {
                text: String::new(),
            },
            Metadata::Test,
            Metadata::TestWith {
                data: serde_json::json!([]),
            },
            Metadata::Todo,
            Metadata::Uses {
                target: String::new(),
            },
            Metadata::UsesClass {
                class_name: String::new(),
            },
            Metadata::UsesDefaultClass {
                class_name: String::new(),
            },
            Metadata::UsesFunction {
                function_name: String::new(),
            },
            Metadata::UsesMethod {
                class_name: String::new(),
                method_name: String::new(),
            },
        ])
    }

    mod basics {
        use super::*;

        #[test]
        fn can_be_empty() {
            let collection = MetadataCollection::from_values([]);
            assert_eq!(collection.len(), 0);
            assert!(collection.is_empty());
            assert!(!collection.is_not_empty());
        }

        #[test]
        fn is_countable() {
            let collection = MetadataCollection::from_values([Metadata::Test]);
            assert_eq!(collection.len(), 1);
            assert!(!collection.is_empty());
            assert!(collection.is_not_empty());
        }

        #[test]
        fn is_iterable_by_position() {
            let collection = MetadataCollection::from_values([Metadata::Test]);
            for (key, value) in collection.iter().enumerate() {
                assert_eq!(key, 0);
                assert_eq!(value, &Metadata::Test);
            }
        }

        #[test]
        fn keeps_duplicates() {
            let collection =
                MetadataCollection::from_values([Metadata::group("a"), Metadata::group("a")]);
            assert_eq!(collection.filter_group().len(), 2);
        }

        #[test]
        fn can_be_merged() {
            let a = MetadataCollection::from_values([Metadata::Before]);
            let b = MetadataCollection::from_values([Metadata::After]);
            let c = a.merge_with(&b);

            assert_eq!(c.len(), 2);
            assert!(c.as_slice()[0].is_before());
            assert!(c.as_slice()[1].is_after());
            // inputs untouched
            assert_eq!(a.len(), 1);
            assert_eq!(b.len(), 1);
        }
    }

    mod filters {
        use super::*;

        #[test]
        fn one_of_each_kind() {
            let collection = one_of_each();
            assert_eq!(collection.len(), MetadataKind::ALL.len());

            for kind in MetadataKind::ALL {
                let filtered = collection.of_kind(*kind);
                assert_eq!(filtered.len(), 1, "kind {kind}");
                assert_eq!(filtered.as_slice()[0].kind(), *kind);
            }
        }

        #[test]
        fn generated_filters() {
            let collection = one_of_each();
            assert!(collection.filter_after_class().as_slice()[0].is_after_class());
            assert!(collection.filter_requires_php().as_slice()[0].is_requires_php());
            assert!(collection.filter_test_with().as_slice()[0].is_test_with());
            assert!(collection.filter_uses_method().as_slice()[0].is_uses_method());
        }

        #[test]
        fn depends_returns_class_then_method() {
            let depends = one_of_each().filter_depends();
            assert_eq!(depends.len(), 2);
            assert!(depends.as_slice()[0].is_depends_on_class());
            assert!(depends.as_slice()[1].is_depends_on_method());
        }

        #[test]
        fn family_filters() {
            let collection = one_of_each();
            assert_eq!(collection.filter_lifecycle_hooks().len(), 6);
            assert_eq!(collection.filter_requirements().len(), 8);
            assert_eq!(collection.filter_coverage().len(), 12);
        }

        #[test]
        fn filtering_keeps_relative_order() {
            let collection = MetadataCollection::from_values([
                Metadata::group("first"),
                Metadata::Test,
                Metadata::group("second"),
                Metadata::Before,
                Metadata::group("third"),
            ]);
            assert_eq!(
                collection.filter_group().group_names(),
                ["first", "second", "third"]
            );
        }

        #[test]
        fn empty_filters_to_empty() {
            assert!(MetadataCollection::new().filter_group().is_empty());
        }

        #[test]
        fn dependencies_in_order() {
            let collection = MetadataCollection::from_values([
                Metadata::depends_on_method("A", "m", CloneMode::None),
                Metadata::Test,
                Metadata::depends_on_class("B", CloneMode::Deep),
            ]);
            let targets: Vec<_> = collection
                .dependencies()
                .iter()
                .map(TestDependency::target)
                .collect();
            assert_eq!(targets, ["A::m", "B::class"]);
        }
    }
}
