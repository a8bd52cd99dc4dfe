//! core::dependency::algebra
//!
//! Set operations over dependency descriptors.
//!
//! Every operation compares descriptors by [`TestDependency::target`] only,
//! keeps the relative order of its inputs and returns a fresh vector.
//!
//! - [`filter_invalid`] drops descriptors that must never be scheduled
//! - [`merge_unique`] accumulates edges from several declaration styles
//! - [`diff`] subtracts already-satisfied targets across re-runs

use std::collections::HashSet;

use super::descriptor::TestDependency;

/// Keep only valid descriptors, in order.
///
/// # Example
///
/// ```
/// use testmeta::core::dependency::{filter_invalid, TestDependency};
///
/// let deps = vec![
///     TestDependency::from_annotation_text("Foo", "a"),
///     TestDependency::from_annotation_text("Foo", ""),
///     TestDependency::from_annotation_text("Foo", "b"),
/// ];
/// let valid: Vec<String> = filter_invalid(&deps).iter().map(|d| d.target()).collect();
/// assert_eq!(valid, ["Foo::a", "Foo::b"]);
/// ```
pub fn filter_invalid(dependencies: &[TestDependency]) -> Vec<TestDependency> {
    dependencies
        .iter()
        .filter(|d| d.is_valid())
        .cloned()
        .collect()
}

/// Append every descriptor of `additional` whose target is not yet present.
///
/// The first descriptor seen for a target wins, including its clone mode.
/// `existing` is returned as is (duplicates within it are not collapsed),
/// followed by the admitted descriptors in their original order.
pub fn merge_unique(
    existing: &[TestDependency],
    additional: &[TestDependency],
) -> Vec<TestDependency> {
    let mut seen: HashSet<String> = existing.iter().map(TestDependency::target).collect();
    let mut merged = existing.to_vec();

    for dependency in additional {
        if seen.insert(dependency.target()) {
            merged.push(dependency.clone());
        }
    }

    tracing::trace!(
        existing = existing.len(),
        admitted = merged.len() - existing.len(),
        "merged dependencies"
    );
    merged
}

/// Descriptors of `left` whose target does not appear in `right`.
///
/// An empty `right` returns `left` unchanged.
pub fn diff(left: &[TestDependency], right: &[TestDependency]) -> Vec<TestDependency> {
    if right.is_empty() {
        return left.to_vec();
    }

    let right_targets: HashSet<String> = right.iter().map(TestDependency::target).collect();
    left.iter()
        .filter(|d| !right_targets.contains(&d.target()))
        .cloned()
        .collect()
}
