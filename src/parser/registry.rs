//! parser::registry
//!
//! Lookup tables from declaration short names to metadata constructors.
//!
//! # Design
//!
//! Each scope (class, method) has its own table because the vocabularies
//! differ: `Depends` makes no sense on a class, `Large` makes no sense on
//! a method. A name missing from a table is not an error; the parser skips
//! it.
//!
//! Constructors are plain function pointers. Everything they need beyond
//! the declaration itself comes through [`MappingContext`], so the tables
//! are built once and shared by every parser.
//!
//! # Argument conventions
//!
//! Arguments are positional, in the order the declaration's own
//! constructor takes them, e.g. `ExcludeStaticPropertyFromBackup(className,
//! propertyName)` or `DependsExternal(className, methodName)`. Optional
//! trailing arguments may be omitted.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

use super::ParseError;
use crate::core::dependency::CloneMode;
use crate::core::metadata::Metadata;
use crate::core::requirement::Requirement;
use crate::source::Declaration;

/// What a constructor knows about the declaration site.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    /// The class being parsed; the implicit class of same-class references
    pub class_name: &'a str,
}

/// Builds one metadata value from a declaration.
pub type Constructor = fn(&MappingContext<'_>, &Declaration) -> Result<Metadata, ParseError>;

/// Class- and method-scope constructor tables.
pub struct Registry {
    class: HashMap<&'static str, Constructor>,
    method: HashMap<&'static str, Constructor>,
}

impl Registry {
    /// The shared registry holding the full declaration vocabulary.
    pub fn standard() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| Registry {
            class: class_table(),
            method: method_table(),
        })
    }

    pub fn class_constructor(&self, short_name: &str) -> Option<Constructor> {
        self.class.get(short_name).copied()
    }

    pub fn method_constructor(&self, short_name: &str) -> Option<Constructor> {
        self.method.get(short_name).copied()
    }

    /// Short names accepted on classes, sorted.
    pub fn class_names(&self) -> Vec<&'static str> {
        sorted_keys(&self.class)
    }

    /// Short names accepted on methods, sorted.
    pub fn method_names(&self) -> Vec<&'static str> {
        sorted_keys(&self.method)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("class", &self.class_names())
            .field("method", &self.method_names())
            .finish()
    }
}

fn sorted_keys(table: &HashMap<&'static str, Constructor>) -> Vec<&'static str> {
    let mut names: Vec<_> = table.keys().copied().collect();
    names.sort_unstable();
    names
}

fn class_table() -> HashMap<&'static str, Constructor> {
    let mut table: HashMap<&'static str, Constructor> = HashMap::new();
    register_shared(&mut table);

    table.insert("CoversClass", covers_class);
    table.insert("CoversFunction", covers_function);
    table.insert("Large", |_, _| Ok(Metadata::group("large")));
    table.insert("Medium", |_, _| Ok(Metadata::group("medium")));
    table.insert("Small", |_, _| Ok(Metadata::group("small")));
    table.insert("RunClassInSeparateProcess", |_, _| {
        Ok(Metadata::RunClassInSeparateProcess)
    });
    table.insert("RunTestsInSeparateProcesses", |_, _| {
        Ok(Metadata::RunTestsInSeparateProcesses)
    });
    table.insert("UsesClass", uses_class);
    table.insert("UsesFunction", uses_function);

    table
}

fn method_table() -> HashMap<&'static str, Constructor> {
    let mut table: HashMap<&'static str, Constructor> = HashMap::new();
    register_shared(&mut table);

    table.insert("After", |_, _| Ok(Metadata::After));
    table.insert("AfterClass", |_, _| Ok(Metadata::AfterClass));
    table.insert("Before", |_, _| Ok(Metadata::Before));
    table.insert("BeforeClass", |_, _| Ok(Metadata::BeforeClass));
    table.insert("PreCondition", |_, _| Ok(Metadata::PreCondition));
    table.insert("PostCondition", |_, _| Ok(Metadata::PostCondition));

    table.insert("DataProvider", data_provider);
    table.insert("DataProviderExternal", data_provider_external);

    table.insert("Depends", |ctx, d| depends(ctx, d, CloneMode::None));
    table.insert("DependsUsingDeepClone", |ctx, d| {
        depends(ctx, d, CloneMode::Deep)
    });
    table.insert("DependsUsingShallowClone", |ctx, d| {
        depends(ctx, d, CloneMode::Shallow)
    });
    table.insert("DependsExternal", |_, d| {
        depends_external(d, CloneMode::None)
    });
    table.insert("DependsExternalUsingDeepClone", |_, d| {
        depends_external(d, CloneMode::Deep)
    });
    table.insert("DependsExternalUsingShallowClone", |_, d| {
        depends_external(d, CloneMode::Shallow)
    });
    table.insert("DependsOnClass", |_, d| {
        depends_on_class(d, CloneMode::None)
    });
    table.insert("DependsOnClassUsingDeepClone", |_, d| {
        depends_on_class(d, CloneMode::Deep)
    });
    table.insert("DependsOnClassUsingShallowClone", |_, d| {
        depends_on_class(d, CloneMode::Shallow)
    });

    table.insert("RunInSeparateProcess", |_, _| {
        Ok(Metadata::RunInSeparateProcess)
    });
    table.insert("Test", |_, _| Ok(Metadata::Test));
    table.insert("TestWith", test_with);
    table.insert("TestWithJson", test_with_json);

    table
}

/// Declarations accepted on both classes and methods.
fn register_shared(table: &mut HashMap<&'static str, Constructor>) {
    table.insert("BackupGlobals", |_, d| {
        Ok(Metadata::BackupGlobals {
            enabled: bool_arg(d, 0, "enabled")?,
        })
    });
    table.insert("BackupStaticProperties", |_, d| {
        Ok(Metadata::BackupStaticProperties {
            enabled: bool_arg(d, 0, "enabled")?,
        })
    });
    table.insert("CodeCoverageIgnore", |_, _| {
        Ok(Metadata::CodeCoverageIgnore)
    });
    table.insert("CoversNothing", |_, _| Ok(Metadata::CoversNothing));
    table.insert("DoesNotPerformAssertions", |_, _| {
        Ok(Metadata::DoesNotPerformAssertions)
    });
    table.insert("ExcludeGlobalVariableFromBackup", |_, d| {
        Ok(Metadata::ExcludeGlobalVariableFromBackup {
            global_variable_name: str_arg(d, 0, "globalVariableName")?,
        })
    });
    table.insert("ExcludeStaticPropertyFromBackup", |_, d| {
        Ok(Metadata::ExcludeStaticPropertyFromBackup {
            class_name: str_arg(d, 0, "className")?,
            property_name: str_arg(d, 1, "propertyName")?,
        })
    });
    table.insert("Group", |_, d| Ok(Metadata::group(str_arg(d, 0, "name")?)));
    table.insert("Ticket", |_, d| Ok(Metadata::group(str_arg(d, 0, "text")?)));
    table.insert("PreserveGlobalState", |_, d| {
        Ok(Metadata::PreserveGlobalState {
            enabled: bool_arg(d, 0, "enabled")?,
        })
    });
    table.insert("RequiresFunction", |_, d| {
        Ok(Metadata::RequiresFunction {
            function_name: str_arg(d, 0, "functionName")?,
        })
    });
    table.insert("RequiresMethod", |_, d| {
        Ok(Metadata::RequiresMethod {
            class_name: str_arg(d, 0, "className")?,
            method_name: str_arg(d, 1, "methodName")?,
        })
    });
    table.insert("RequiresOperatingSystem", |_, d| {
        Ok(Metadata::RequiresOperatingSystem {
            pattern: str_arg(d, 0, "regularExpression")?,
        })
    });
    table.insert("RequiresOperatingSystemFamily", |_, d| {
        Ok(Metadata::RequiresOperatingSystemFamily {
            family: str_arg(d, 0, "operatingSystemFamily")?,
        })
    });
    table.insert("RequiresPhp", |_, d| {
        Ok(Metadata::RequiresPhp {
            requirement: requirement_arg(d, 0)?,
        })
    });
    table.insert("RequiresPhpExtension", requires_php_extension);
    table.insert("RequiresPhpunit", |_, d| {
        Ok(Metadata::RequiresPhpunit {
            requirement: requirement_arg(d, 0)?,
        })
    });
    table.insert("RequiresSetting", |_, d| {
        Ok(Metadata::RequiresSetting {
            setting: str_arg(d, 0, "setting")?,
            value: str_arg(d, 1, "value")?,
        })
    });
    table.insert("TestDox", |_, d| {
        Ok(Metadata::TestDox {
            text: str_arg(d, 0, "text")?,
        })
    });
}

// =========================================================================
// Constructors shared by name
// =========================================================================

fn covers_class(_: &MappingContext<'_>, d: &Declaration) -> Result<Metadata, ParseError> {
    Ok(Metadata::CoversClass {
        class_name: str_arg(d, 0, "className")?,
    })
}

fn covers_function(_: &MappingContext<'_>, d: &Declaration) -> Result<Metadata, ParseError> {
    Ok(Metadata::CoversFunction {
        function_name: str_arg(d, 0, "functionName")?,
    })
}

fn uses_class(_: &MappingContext<'_>, d: &Declaration) -> Result<Metadata, ParseError> {
    Ok(Metadata::UsesClass {
        class_name: str_arg(d, 0, "className")?,
    })
}

fn uses_function(_: &MappingContext<'_>, d: &Declaration) -> Result<Metadata, ParseError> {
    Ok(Metadata::UsesFunction {
        function_name: str_arg(d, 0, "functionName")?,
    })
}

fn data_provider(ctx: &MappingContext<'_>, d: &Declaration) -> Result<Metadata, ParseError> {
    Ok(Metadata::DataProvider {
        class_name: ctx.class_name.to_string(),
        method_name: str_arg(d, 0, "methodName")?,
    })
}

fn data_provider_external(
    _: &MappingContext<'_>,
    d: &Declaration,
) -> Result<Metadata, ParseError> {
    Ok(Metadata::DataProvider {
        class_name: str_arg(d, 0, "className")?,
        method_name: str_arg(d, 1, "methodName")?,
    })
}

fn depends(
    ctx: &MappingContext<'_>,
    d: &Declaration,
    clone_mode: CloneMode,
) -> Result<Metadata, ParseError> {
    Ok(Metadata::depends_on_method(
        ctx.class_name,
        str_arg(d, 0, "methodName")?,
        clone_mode,
    ))
}

fn depends_external(d: &Declaration, clone_mode: CloneMode) -> Result<Metadata, ParseError> {
    Ok(Metadata::depends_on_method(
        str_arg(d, 0, "className")?,
        str_arg(d, 1, "methodName")?,
        clone_mode,
    ))
}

fn depends_on_class(d: &Declaration, clone_mode: CloneMode) -> Result<Metadata, ParseError> {
    Ok(Metadata::depends_on_class(
        str_arg(d, 0, "className")?,
        clone_mode,
    ))
}

fn requires_php_extension(
    _: &MappingContext<'_>,
    d: &Declaration,
) -> Result<Metadata, ParseError> {
    let version_requirement = match d.arg(1) {
        None | Some(Value::Null) => None,
        Some(_) => Some(requirement_arg(d, 1)?),
    };

    Ok(Metadata::RequiresPhpExtension {
        extension: str_arg(d, 0, "extension")?,
        version_requirement,
    })
}

fn test_with(_: &MappingContext<'_>, d: &Declaration) -> Result<Metadata, ParseError> {
    match d.arg(0) {
        Some(data @ (Value::Array(_) | Value::Object(_))) => {
            Ok(Metadata::TestWith { data: data.clone() })
        }
        _ => Err(invalid_arguments(d, "argument 0 (data) must be an array")),
    }
}

fn test_with_json(_: &MappingContext<'_>, d: &Declaration) -> Result<Metadata, ParseError> {
    let json = str_arg(d, 0, "json")?;
    let data: Value =
        serde_json::from_str(&json).map_err(|e| ParseError::MalformedTestData {
            declaration: d.name.clone(),
            message: e.to_string(),
        })?;

    match data {
        Value::Array(_) | Value::Object(_) => Ok(Metadata::TestWith { data }),
        other => Err(ParseError::MalformedTestData {
            declaration: d.name.clone(),
            message: format!("expected an array of data sets, found {other}"),
        }),
    }
}

// =========================================================================
// Argument helpers
// =========================================================================

fn invalid_arguments(d: &Declaration, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidArguments {
        declaration: d.name.clone(),
        reason: reason.into(),
    }
}

fn str_arg(d: &Declaration, index: usize, what: &str) -> Result<String, ParseError> {
    d.str_arg(index)
        .map(str::to_string)
        .ok_or_else(|| invalid_arguments(d, format!("argument {index} ({what}) must be a string")))
}

fn bool_arg(d: &Declaration, index: usize, what: &str) -> Result<bool, ParseError> {
    d.bool_arg(index)
        .ok_or_else(|| invalid_arguments(d, format!("argument {index} ({what}) must be a boolean")))
}

fn requirement_arg(d: &Declaration, index: usize) -> Result<Requirement, ParseError> {
    let text = str_arg(d, index, "versionRequirement")?;
    Requirement::parse(&text).map_err(|source| ParseError::InvalidRequirement {
        declaration: d.name.clone(),
        source,
    })
}
