//! core::metadata::schema
//!
//! The closed classification of everything that can be declared about a
//! test class or test method.
//!
//! # Schema Design
//!
//! - One enum, one variant per kind; each variant carries only its own
//!   parameters
//! - Self-describing: every value answers [`Metadata::kind`] and an
//!   `is_<kind>()` predicate per kind (see [`super::kind`])
//! - Immutable: there is no `&mut self` API
//! - Serializes with a `kind` tag for machine-readable output
//!
//! # Families
//!
//! | Family        | Kinds                                                       |
//! |---------------|-------------------------------------------------------------|
//! | Lifecycle     | Before, After, BeforeClass, AfterClass, PreCondition, PostCondition |
//! | Backup        | BackupGlobals, BackupStaticProperties, Exclude*FromBackup    |
//! | Coverage      | Covers*, Uses*, CoversNothing, CodeCoverageIgnore            |
//! | Dependency    | DependsOnClass, DependsOnMethod                             |
//! | Requirement   | Requires*                                                   |
//! | Isolation     | Run*InSeparateProcess*, PreserveGlobalState                  |
//!
//! # Example
//!
//! ```
//! use testmeta::core::dependency::CloneMode;
//! use testmeta::core::metadata::{Metadata, MetadataKind};
//!
//! let group = Metadata::group("slow");
//! assert!(group.is_group());
//! assert_eq!(group.kind(), MetadataKind::Group);
//!
//! let dep = Metadata::depends_on_method("CartTest", "testAdd", CloneMode::Deep);
//! assert!(dep.is_depends());
//! assert_eq!(dep.as_dependency().unwrap().target(), "CartTest::testAdd");
//! ```

use serde::{Deserialize, Serialize};

use crate::core::dependency::{CloneMode, TestDependency};
use crate::core::requirement::Requirement;

/// One normalized declaration about a test class or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Metadata {
    After,
    AfterClass,
    BackupGlobals {
        enabled: bool,
    },
    BackupStaticProperties {
        enabled: bool,
    },
    Before,
    BeforeClass,
    CodeCoverageIgnore,
    /// Free-form coverage target from the annotation path
    Covers {
        target: String,
    },
    CoversClass {
        class_name: String,
    },
    CoversDefaultClass {
        class_name: String,
    },
    CoversFunction {
        function_name: String,
    },
    CoversMethod {
        class_name: String,
        method_name: String,
    },
    CoversNothing,
    /// Method supplying data sets for the test
    DataProvider {
        class_name: String,
        method_name: String,
    },
    DependsOnClass(TestDependency),
    DependsOnMethod(TestDependency),
    DoesNotPerformAssertions,
    ExcludeGlobalVariableFromBackup {
        global_variable_name: String,
    },
    ExcludeStaticPropertyFromBackup {
        class_name: String,
        property_name: String,
    },
    Group {
        name: String,
    },
    PostCondition,
    PreCondition,
    PreserveGlobalState {
        enabled: bool,
    },
    RequiresFunction {
        function_name: String,
    },
    RequiresMethod {
        class_name: String,
        method_name: String,
    },
    /// Regular expression matched against the operating system name
    RequiresOperatingSystem {
        pattern: String,
    },
    RequiresOperatingSystemFamily {
        family: String,
    },
    RequiresPhp {
        requirement: Requirement,
    },
    RequiresPhpExtension {
        extension: String,
        version_requirement: Option<Requirement>,
    },
    RequiresPhpunit {
        requirement: Requirement,
    },
    RequiresSetting {
        setting: String,
        value: String,
    },
    RunClassInSeparateProcess,
    RunInSeparateProcess,
    RunTestsInSeparateProcesses,
    /// Marks a method as a test regardless of its name
    Test,
    TestDox {
        text: String,
    },
    /// Literal data sets; always a JSON array or object
    TestWith {
        data: serde_json::Value,
    },
    Todo,
    Uses {
        target: String,
    },
    UsesClass {
        class_name: String,
    },
    UsesDefaultClass {
        class_name: String,
    },
    UsesFunction {
        function_name: String,
    },
    UsesMethod {
        class_name: String,
        method_name: String,
    },
}

impl Metadata {
    pub fn group(name: impl Into<String>) -> Self {
        Metadata::Group { name: name.into() }
    }

    /// Dependency on one method; the class is always explicit here.
    pub fn depends_on_method(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        clone_mode: CloneMode,
    ) -> Self {
        Metadata::DependsOnMethod(TestDependency::on_method(
            class_name,
            method_name,
            clone_mode,
        ))
    }

    /// Dependency on every test of a class.
    pub fn depends_on_class(class_name: impl Into<String>, clone_mode: CloneMode) -> Self {
        Metadata::DependsOnClass(TestDependency::on_class(class_name, clone_mode))
    }

    /// The dependency descriptor carried by `DependsOnClass` / `DependsOnMethod`.
    pub fn as_dependency(&self) -> Option<&TestDependency> {
        match self {
            Metadata::DependsOnClass(dep) | Metadata::DependsOnMethod(dep) => Some(dep),
            _ => None,
        }
    }

    /// The version requirement of a requirement declaration, if it has one.
    pub fn as_requirement(&self) -> Option<&Requirement> {
        match self {
            Metadata::RequiresPhp { requirement } | Metadata::RequiresPhpunit { requirement } => {
                Some(requirement)
            }
            Metadata::RequiresPhpExtension {
                version_requirement,
                ..
            } => version_requirement.as_ref(),
            _ => None,
        }
    }

    /// Class- or method-level dependency.
    pub fn is_depends(&self) -> bool {
        self.as_dependency().is_some()
    }

    /// Hook run around tests rather than a test itself.
    pub fn is_lifecycle_hook(&self) -> bool {
        matches!(
            self,
            Metadata::Before
                | Metadata::After
                | Metadata::BeforeClass
                | Metadata::AfterClass
                | Metadata::PreCondition
                | Metadata::PostCondition
        )
    }

    /// Environmental requirement that can cause a test to be skipped.
    pub fn is_requirement(&self) -> bool {
        matches!(
            self,
            Metadata::RequiresFunction { .. }
                | Metadata::RequiresMethod { .. }
                | Metadata::RequiresOperatingSystem { .. }
                | Metadata::RequiresOperatingSystemFamily { .. }
                | Metadata::RequiresPhp { .. }
                | Metadata::RequiresPhpExtension { .. }
                | Metadata::RequiresPhpunit { .. }
                | Metadata::RequiresSetting { .. }
        )
    }

    /// Coverage intent (what a test covers, uses, or opts out of).
    pub fn is_coverage(&self) -> bool {
        matches!(
            self,
            Metadata::Covers { .. }
                | Metadata::CoversClass { .. }
                | Metadata::CoversDefaultClass { .. }
                | Metadata::CoversFunction { .. }
                | Metadata::CoversMethod { .. }
                | Metadata::CoversNothing
                | Metadata::CodeCoverageIgnore
                | Metadata::Uses { .. }
                | Metadata::UsesClass { .. }
                | Metadata::UsesDefaultClass { .. }
                | Metadata::UsesFunction { .. }
                | Metadata::UsesMethod { .. }
        )
    }
}

impl std::fmt::Display for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = self.kind().as_str();
        match self {
            Metadata::BackupGlobals { enabled }
            | Metadata::BackupStaticProperties { enabled }
            | Metadata::PreserveGlobalState { enabled } => write!(f, "{kind}({enabled})"),
            Metadata::Covers { target } | Metadata::Uses { target } => {
                write!(f, "{kind}({target})")
            }
            Metadata::CoversClass { class_name }
            | Metadata::CoversDefaultClass { class_name }
            | Metadata::UsesClass { class_name }
            | Metadata::UsesDefaultClass { class_name } => write!(f, "{kind}({class_name})"),
            Metadata::CoversFunction { function_name }
            | Metadata::UsesFunction { function_name }
            | Metadata::RequiresFunction { function_name } => {
                write!(f, "{kind}({function_name})")
            }
            Metadata::CoversMethod {
                class_name,
                method_name,
            }
            | Metadata::UsesMethod {
                class_name,
                method_name,
            }
            | Metadata::DataProvider {
                class_name,
                method_name,
            }
            | Metadata::RequiresMethod {
                class_name,
                method_name,
            } => write!(f, "{kind}({class_name}::{method_name})"),
            Metadata::DependsOnClass(dep) | Metadata::DependsOnMethod(dep) => {
                match dep.clone_mode() {
                    CloneMode::None => write!(f, "{kind}({dep})"),
                    CloneMode::Deep => write!(f, "{kind}({dep}, deep clone)"),
                    CloneMode::Shallow => write!(f, "{kind}({dep}, shallow clone)"),
                }
            }
            Metadata::ExcludeGlobalVariableFromBackup {
                global_variable_name,
            } => write!(f, "{kind}({global_variable_name})"),
            Metadata::ExcludeStaticPropertyFromBackup {
                class_name,
                property_name,
            } => write!(f, "{kind}({class_name}::${property_name})"),
            Metadata::Group { name } => write!(f, "{kind}({name})"),
            Metadata::RequiresOperatingSystem { pattern } => write!(f, "{kind}({pattern})"),
            Metadata::RequiresOperatingSystemFamily { family } => write!(f, "{kind}({family})"),
            Metadata::RequiresPhp { requirement } | Metadata::RequiresPhpunit { requirement } => {
                write!(f, "{kind}({requirement})")
            }
            Metadata::RequiresPhpExtension {
                extension,
                version_requirement: Some(requirement),
            } => write!(f, "{kind}({extension} {requirement})"),
            Metadata::RequiresPhpExtension { extension, .. } => write!(f, "{kind}({extension})"),
            Metadata::RequiresSetting { setting, value } => write!(f, "{kind}({setting}={value})"),
            Metadata::TestDox { text } => write!(f, "{kind}({text})"),
            Metadata::TestWith { data } => write!(f, "{kind}({data})"),
            Metadata::After
            | Metadata::AfterClass
            | Metadata::Before
            | Metadata::BeforeClass
            | Metadata::CodeCoverageIgnore
            | Metadata::CoversNothing
            | Metadata::DoesNotPerformAssertions
            | Metadata::PostCondition
            | Metadata::PreCondition
            | Metadata::RunClassInSeparateProcess
            | Metadata::RunInSeparateProcess
            | Metadata::RunTestsInSeparateProcesses
            | Metadata::Test
            | Metadata::Todo => write!(f, "{kind}"),
        }
    }
}
