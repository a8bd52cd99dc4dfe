//! core::metadata::kind
//!
//! The kind tag of every [`Metadata`] variant.
//!
//! The list of kinds lives in exactly one table below. From it we derive:
//! - [`MetadataKind`] with its stable snake_case names
//! - [`Metadata::kind`] and one `is_<kind>()` predicate per kind
//! - one `filter_<kind>()` per kind on [`MetadataCollection`]
//!
//! Adding a variant to [`Metadata`] without adding it here fails to compile
//! (the generated `kind()` match is exhaustive).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collection::MetadataCollection;
use super::schema::Metadata;

/// Error for a kind name that is not in the table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown metadata kind '{0}'")]
pub struct UnknownKind(pub String);

macro_rules! metadata_kinds {
    ($($kind:ident => $name:literal, $is:ident, $filter:ident;)+) => {
        /// Tag identifying which variant a [`Metadata`] value is.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum MetadataKind {
            $($kind,)+
        }

        impl MetadataKind {
            /// Every kind, in table order.
            pub const ALL: &'static [MetadataKind] = &[$(MetadataKind::$kind,)+];

            /// Stable snake_case name, identical to the serde tag.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(MetadataKind::$kind => $name,)+
                }
            }
        }

        impl FromStr for MetadataKind {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(MetadataKind::$kind),)+
                    other => Err(UnknownKind(other.to_string())),
                }
            }
        }

        impl Metadata {
            /// The kind tag of this value.
            pub fn kind(&self) -> MetadataKind {
                match self {
                    $(Metadata::$kind { .. } => MetadataKind::$kind,)+
                }
            }

            $(
                #[doc = concat!("Whether this is `", $name, "` metadata.")]
                pub fn $is(&self) -> bool {
                    matches!(self, Metadata::$kind { .. })
                }
            )+
        }

        impl MetadataCollection {
            $(
                #[doc = concat!("Entries of kind `", $name, "`, in order.")]
                pub fn $filter(&self) -> Self {
                    self.of_kind(MetadataKind::$kind)
                }
            )+
        }
    };
}

metadata_kinds! {
    After => "after", is_after, filter_after;
    AfterClass => "after_class", is_after_class, filter_after_class;
    BackupGlobals => "backup_globals", is_backup_globals, filter_backup_globals;
    BackupStaticProperties => "backup_static_properties", is_backup_static_properties, filter_backup_static_properties;
    Before => "before", is_before, filter_before;
    BeforeClass => "before_class", is_before_class, filter_before_class;
    CodeCoverageIgnore => "code_coverage_ignore", is_code_coverage_ignore, filter_code_coverage_ignore;
    Covers => "covers", is_covers, filter_covers;
    CoversClass => "covers_class", is_covers_class, filter_covers_class;
    CoversDefaultClass => "covers_default_class", is_covers_default_class, filter_covers_default_class;
    CoversFunction => "covers_function", is_covers_function, filter_covers_function;
    CoversMethod => "covers_method", is_covers_method, filter_covers_method;
    CoversNothing => "covers_nothing", is_covers_nothing, filter_covers_nothing;
    DataProvider => "data_provider", is_data_provider, filter_data_provider;
    DependsOnClass => "depends_on_class", is_depends_on_class, filter_depends_on_class;
    DependsOnMethod => "depends_on_method", is_depends_on_method, filter_depends_on_method;
    DoesNotPerformAssertions => "does_not_perform_assertions", is_does_not_perform_assertions, filter_does_not_perform_assertions;
    ExcludeGlobalVariableFromBackup => "exclude_global_variable_from_backup", is_exclude_global_variable_from_backup, filter_exclude_global_variable_from_backup;
    ExcludeStaticPropertyFromBackup => "exclude_static_property_from_backup", is_exclude_static_property_from_backup, filter_exclude_static_property_from_backup;
    Group => "group", is_group, filter_group;
    PostCondition => "post_condition", is_post_condition, filter_post_condition;
    PreCondition => "pre_condition", is_pre_condition, filter_pre_condition;
    PreserveGlobalState => "preserve_global_state", is_preserve_global_state, filter_preserve_global_state;
    RequiresFunction => "requires_function", is_requires_function, filter_requires_function;
    RequiresMethod => "requires_method", is_requires_method, filter_requires_method;
    RequiresOperatingSystem => "requires_operating_system", is_requires_operating_system, filter_requires_operating_system;
    RequiresOperatingSystemFamily => "requires_operating_system_family", is_requires_operating_system_family, filter_requires_operating_system_family;
    RequiresPhp => "requires_php", is_requires_php, filter_requires_php;
    RequiresPhpExtension => "requires_php_extension", is_requires_php_extension, filter_requires_php_extension;
    RequiresPhpunit => "requires_phpunit", is_requires_phpunit, filter_requires_phpunit;
    RequiresSetting => "requires_setting", is_requires_setting, filter_requires_setting;
    RunClassInSeparateProcess => "run_class_in_separate_process", is_run_class_in_separate_process, filter_run_class_in_separate_process;
    RunInSeparateProcess => "run_in_separate_process", is_run_in_separate_process, filter_run_in_separate_process;
    RunTestsInSeparateProcesses => "run_tests_in_separate_processes", is_run_tests_in_separate_processes, filter_run_tests_in_separate_processes;
    Test => "test", is_test, filter_test;
    TestDox => "test_dox", is_test_dox, filter_test_dox;
    TestWith => "test_with", is_test_with, filter_test_with;
    Todo => "todo", is_todo, filter_todo;
    Uses => "uses", is_uses, filter_uses;
    UsesClass => "uses_class", is_uses_class, filter_uses_class;
    UsesDefaultClass => "uses_default_class", is_uses_default_class, filter_uses_default_class;
    UsesFunction => "uses_function", is_uses_function, filter_uses_function;
    UsesMethod => "uses_method", is_uses_method, filter_uses_method;
}

impl std::fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
