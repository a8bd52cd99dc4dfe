//! core::dependency
//!
//! Dependency descriptors and the target algebra used by schedulers.
//!
//! # Modules
//!
//! - [`descriptor`] - `TestDependency` and clone modes
//! - [`algebra`] - validity filtering, unique merge and difference
//!
//! # Example
//!
//! ```
//! use testmeta::core::dependency::{diff, filter_invalid, merge_unique, TestDependency};
//!
//! let from_attributes = vec![TestDependency::from_annotation_text("CartTest", "testAdd")];
//! let from_annotations = vec![
//!     TestDependency::from_annotation_text("CartTest", "testAdd"),
//!     TestDependency::from_annotation_text("CartTest", "StockTest::testReserve"),
//!     TestDependency::from_annotation_text("CartTest", ""),
//! ];
//!
//! let all = filter_invalid(&merge_unique(&from_attributes, &from_annotations));
//! assert_eq!(all.len(), 2);
//!
//! let passed = vec![TestDependency::from_annotation_text("CartTest", "testAdd")];
//! let outstanding = diff(&all, &passed);
//! assert_eq!(outstanding[0].target(), "StockTest::testReserve");
//! ```

pub mod algebra;
pub mod descriptor;

pub use algebra::{diff, filter_invalid, merge_unique};
pub use descriptor::{
    CloneMode, TestDependency, DEEP_CLONE_KEYWORD, SHALLOW_CLONE_KEYWORD, TARGET_SEPARATOR,
    WHOLE_CLASS,
};
