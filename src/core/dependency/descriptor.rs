//! core::dependency::descriptor
//!
//! A single declared dependency edge between test units.
//!
//! # Identity
//!
//! A descriptor is identified by its *target*, the `class::member` string
//! it points at. Two descriptors naming the same pair are the same edge no
//! matter which declaration style produced them or which clone mode they
//! request. The target is derived from the fields on demand; descriptors
//! are immutable, so it can never go stale.
//!
//! # Validity
//!
//! A descriptor is valid iff both class and member are non-empty. Invalid
//! descriptors are values, not errors: they report an empty target and are
//! dropped by [`filter_invalid`](super::algebra::filter_invalid).
//!
//! # Example
//!
//! ```
//! use testmeta::core::dependency::{CloneMode, TestDependency};
//!
//! let dep = TestDependency::from_annotation_text("CartTest", "clone testAdd");
//! assert_eq!(dep.target(), "CartTest::testAdd");
//! assert_eq!(dep.clone_mode(), CloneMode::Deep);
//!
//! let whole_class = TestDependency::from_annotation_text("CartTest", "shallowClone StockTest::class");
//! assert_eq!(whole_class.target(), "StockTest::class");
//! assert!(whole_class.target_is_class());
//!
//! assert!(!TestDependency::from_annotation_text("CartTest", "").is_valid());
//! ```

use serde::{Deserialize, Serialize};

/// Separator between class and member in a target.
pub const TARGET_SEPARATOR: &str = "::";

/// Member name denoting "the whole class" rather than one method.
pub const WHOLE_CLASS: &str = "class";

/// Annotation keyword requesting a deep clone of the dependency's result.
pub const DEEP_CLONE_KEYWORD: &str = "clone";

/// Annotation keyword requesting a shallow clone of the dependency's result.
pub const SHALLOW_CLONE_KEYWORD: &str = "shallowClone";

/// How the dependent test receives the product of its dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloneMode {
    /// The original value is passed through
    #[default]
    None,
    /// A deep copy is passed
    Deep,
    /// A shallow copy is passed
    Shallow,
}

impl CloneMode {
    /// Interpret an annotation clone keyword.
    ///
    /// Anything other than the two recognised keywords, including the
    /// empty string, means no cloning.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            DEEP_CLONE_KEYWORD => CloneMode::Deep,
            SHALLOW_CLONE_KEYWORD => CloneMode::Shallow,
            _ => CloneMode::None,
        }
    }
}

/// One declared dependency on another test method or test class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestDependency {
    class_name: String,
    method_name: String,
    clone_mode: CloneMode,
}

impl TestDependency {
    /// Build a descriptor from a class or callable name.
    ///
    /// - An empty `class_or_callable` yields an invalid descriptor with no
    ///   clone mode.
    /// - A non-empty `method` pairs it with `class_or_callable`.
    /// - Otherwise a `Class::member` callable is split on the separator.
    /// - Otherwise the whole class is the target.
    ///
    /// `option` is a clone keyword, see [`CloneMode::from_keyword`].
    pub fn new(class_or_callable: &str, method: Option<&str>, option: Option<&str>) -> Self {
        if class_or_callable.is_empty() {
            return Self::default();
        }

        let (class_name, method_name) = match method.filter(|m| !m.is_empty()) {
            Some(method) => (class_or_callable.to_string(), method.to_string()),
            None if class_or_callable.contains(TARGET_SEPARATOR) => {
                let mut parts = class_or_callable.split(TARGET_SEPARATOR);
                (
                    parts.next().unwrap_or_default().to_string(),
                    parts.next().unwrap_or_default().to_string(),
                )
            }
            None => (class_or_callable.to_string(), WHOLE_CLASS.to_string()),
        };

        Self {
            class_name,
            method_name,
            clone_mode: option.map(CloneMode::from_keyword).unwrap_or_default(),
        }
    }

    /// Dependency on a single method.
    pub fn on_method(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        clone_mode: CloneMode,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            clone_mode,
        }
    }

    /// Dependency on every test of a class.
    pub fn on_class(class_name: impl Into<String>, clone_mode: CloneMode) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: WHOLE_CLASS.to_string(),
            clone_mode,
        }
    }

    /// Parse a free-text dependency declaration of the form `[cloneOption ]target`.
    ///
    /// Targets without a class qualifier resolve against `class_name`, the
    /// class the declaration is attached to.
    ///
    /// # Example
    ///
    /// ```
    /// use testmeta::core::dependency::TestDependency;
    ///
    /// let dep = TestDependency::from_annotation_text("Foo", "bar");
    /// assert_eq!(dep.target(), "Foo::bar");
    /// assert!(!dep.use_deep_clone() && !dep.use_shallow_clone());
    ///
    /// let dep = TestDependency::from_annotation_text("Foo", "clone Bar::baz");
    /// assert_eq!(dep.target(), "Bar::baz");
    /// assert!(dep.use_deep_clone());
    /// ```
    pub fn from_annotation_text(class_name: &str, text: &str) -> Self {
        let (option, target) = match text.trim().split_once(' ') {
            Some((option, target)) => (option, target),
            None => ("", text.trim()),
        };

        let target = if !target.is_empty() && !target.contains(TARGET_SEPARATOR) {
            format!("{class_name}{TARGET_SEPARATOR}{target}")
        } else {
            target.to_string()
        };

        Self::new(&target, None, Some(option))
    }

    /// Whether both class and member are present.
    pub fn is_valid(&self) -> bool {
        !self.class_name.is_empty() && !self.method_name.is_empty()
    }

    /// The `class::member` identity of this edge, empty when invalid.
    pub fn target(&self) -> String {
        if self.is_valid() {
            format!("{}{TARGET_SEPARATOR}{}", self.class_name, self.method_name)
        } else {
            String::new()
        }
    }

    /// Whether the target is a whole class rather than one method.
    pub fn target_is_class(&self) -> bool {
        self.method_name == WHOLE_CLASS
    }

    /// Class part of the target.
    pub fn target_class_name(&self) -> &str {
        &self.class_name
    }

    /// Member part of the target.
    pub fn target_method_name(&self) -> &str {
        &self.method_name
    }

    pub fn clone_mode(&self) -> CloneMode {
        self.clone_mode
    }

    pub fn use_deep_clone(&self) -> bool {
        self.clone_mode == CloneMode::Deep
    }

    pub fn use_shallow_clone(&self) -> bool {
        self.clone_mode == CloneMode::Shallow
    }
}

impl std::fmt::Display for TestDependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.target())
    }
}
