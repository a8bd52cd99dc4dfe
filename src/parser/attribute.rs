//! parser::attribute
//!
//! Parser for structured declarations.
//!
//! For each declaration on the class or method, in order:
//! 1. Skip it unless its name lies inside the configured namespace
//! 2. Look the short name up in the scope's registry table; skip unknown names
//! 3. Construct exactly one [`Metadata`] value, or fail the whole request

use tracing::{debug, trace};

use super::registry::{Constructor, MappingContext, Registry};
use super::{ParseError, Parser};
use crate::core::metadata::{Metadata, MetadataCollection};
use crate::core::types::Namespace;
use crate::source::{Declaration, DeclarationSource};

/// Which registry table applies.
#[derive(Debug, Clone, Copy)]
enum Scope {
    Class,
    Method,
}

/// Maps namespaced declarations from a [`DeclarationSource`] to metadata.
///
/// Holds only immutable state; it is `Send + Sync` whenever the source is.
#[derive(Debug)]
pub struct AttributeParser<S> {
    source: S,
    namespace: Namespace,
    registry: &'static Registry,
}

impl<S: DeclarationSource> AttributeParser<S> {
    /// Parser over `source` using the default namespace.
    pub fn new(source: S) -> Self {
        Self::with_namespace(source, Namespace::default())
    }

    pub fn with_namespace(source: S, namespace: Namespace) -> Self {
        Self {
            source,
            namespace,
            registry: Registry::standard(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn constructor(&self, scope: Scope, short_name: &str) -> Option<Constructor> {
        match scope {
            Scope::Class => self.registry.class_constructor(short_name),
            Scope::Method => self.registry.method_constructor(short_name),
        }
    }

    fn map_all(
        &self,
        scope: Scope,
        ctx: &MappingContext<'_>,
        declarations: &[Declaration],
    ) -> Result<MetadataCollection, ParseError> {
        let mut values: Vec<Metadata> = Vec::with_capacity(declarations.len());

        for declaration in declarations {
            let Some(short_name) = self.namespace.strip(&declaration.name) else {
                trace!(declaration = %declaration.name, "outside namespace");
                continue;
            };

            let Some(construct) = self.constructor(scope, short_name) else {
                debug!(
                    declaration = %declaration.name,
                    class = ctx.class_name,
                    ?scope,
                    "skipping unrecognized declaration"
                );
                continue;
            };

            let metadata = construct(ctx, declaration)?;
            trace!(declaration = %declaration, %metadata, "mapped");
            values.push(metadata);
        }

        Ok(MetadataCollection::from_values(values))
    }
}

impl<S: DeclarationSource> Parser for AttributeParser<S> {
    fn for_class(&self, class_name: &str) -> Result<MetadataCollection, ParseError> {
        let declarations = self.source.class_declarations(class_name)?;
        let ctx = MappingContext { class_name };
        self.map_all(Scope::Class, &ctx, &declarations)
    }

    fn for_method(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<MetadataCollection, ParseError> {
        let declarations = self.source.method_declarations(class_name, method_name)?;
        let ctx = MappingContext { class_name };
        self.map_all(Scope::Method, &ctx, &declarations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dependency::CloneMode;
    use crate::core::metadata::MetadataKind;
    use crate::source::{Manifest, SourceError};

    fn manifest() -> Manifest {
        Manifest::from_toml_str(
            r#"
            [[class]]
            name = "CartTest"
            declarations = [
                { name = "testmeta::Group", args = ["checkout"] },
                { name = "vendor::Fixture", args = ["db"] },
                { name = "testmeta::Large" },
                { name = "testmeta::NotAThing" },
            ]

            [[class.method]]
            name = "testTotal"
            declarations = [
                { name = "testmeta::Test" },
                { name = "testmeta::Depends", args = ["testAdd"] },
                { name = "testmeta::Large" },
                { name = "testmeta::DependsExternalUsingDeepClone", args = ["StockTest", "testReserve"] },
            ]

            [[class.method]]
            name = "testBroken"
            declarations = [
                { name = "testmeta::Test" },
                { name = "testmeta::TestWithJson", args = ["{oops"] },
            ]

            [[class]]
            name = "BrokenClassTest"
            declarations = [{ name = "testmeta::RequiresPhp", args = ["??"] }]

            [[class.method]]
            name = "testNothing"
            "#,
        )
        .unwrap()
    }

    mod for_class {
        use super::*;

        #[test]
        fn maps_known_declarations_in_order() {
            let parser = AttributeParser::new(manifest());
            let metadata = parser.for_class("CartTest").unwrap();

            assert_eq!(metadata.len(), 2);
            assert_eq!(metadata.group_names(), ["checkout", "large"]);
        }

        #[test]
        fn unknown_class() {
            let parser = AttributeParser::new(manifest());
            assert_eq!(
                parser.for_class("Missing").unwrap_err(),
                ParseError::Source(SourceError::UnknownClass("Missing".into()))
            );
        }

        #[test]
        fn failure_yields_no_partial_result() {
            let parser = AttributeParser::new(manifest());
            assert!(matches!(
                parser.for_class("BrokenClassTest"),
                Err(ParseError::InvalidRequirement { .. })
            ));
        }
    }

    mod for_method {
        use super::*;

        #[test]
        fn class_only_names_skipped_on_methods() {
            let parser = AttributeParser::new(manifest());
            let metadata = parser.for_method("CartTest", "testTotal").unwrap();

            let kinds: Vec<_> = metadata.iter().map(Metadata::kind).collect();
            assert_eq!(
                kinds,
                [
                    MetadataKind::Test,
                    MetadataKind::DependsOnMethod,
                    MetadataKind::DependsOnMethod
                ]
            );
        }

        #[test]
        fn dependencies_resolve_against_parsed_class() {
            let parser = AttributeParser::new(manifest());
            let deps = parser
                .for_method("CartTest", "testTotal")
                .unwrap()
                .dependencies();

            assert_eq!(deps[0].target(), "CartTest::testAdd");
            assert_eq!(deps[0].clone_mode(), CloneMode::None);
            assert_eq!(deps[1].target(), "StockTest::testReserve");
            assert_eq!(deps[1].clone_mode(), CloneMode::Deep);
        }

        #[test]
        fn no_declarations() {
            let parser = AttributeParser::new(manifest());
            assert!(parser
                .for_method("BrokenClassTest", "testNothing")
                .unwrap()
                .is_empty());
        }

        #[test]
        fn malformed_test_data_fails_method() {
            let parser = AttributeParser::new(manifest());
            assert!(matches!(
                parser.for_method("CartTest", "testBroken"),
                Err(ParseError::MalformedTestData { .. })
            ));
        }
    }

    mod for_class_and_method {
        use super::*;

        #[test]
        fn class_entries_first() {
            let parser = AttributeParser::new(manifest());
            let metadata = parser.for_class_and_method("CartTest", "testTotal").unwrap();

            assert_eq!(metadata.len(), 5);
            assert!(metadata.as_slice()[0].is_group());
            assert!(metadata.as_slice()[1].is_group());
            assert!(metadata.as_slice()[2].is_test());
        }

        #[test]
        fn class_failure_fails_pair() {
            let parser = AttributeParser::new(manifest());
            assert!(parser
                .for_class_and_method("BrokenClassTest", "testNothing")
                .is_err());
        }
    }

    mod namespace {
        use super::*;

        #[test]
        fn custom_namespace_selects_other_declarations() {
            let manifest = Manifest::from_toml_str(
                r#"
                [[class]]
                name = "A"
                declarations = [
                    { name = "testmeta::Group", args = ["ours"] },
                    { name = "vendor::Group", args = ["theirs"] },
                ]
                "#,
            )
            .unwrap();

            let parser =
                AttributeParser::with_namespace(manifest, Namespace::new("vendor::").unwrap());
            assert_eq!(parser.for_class("A").unwrap().group_names(), ["theirs"]);
        }

        #[test]
        fn bare_namespace_is_not_a_declaration() {
            let manifest = Manifest::from_toml_str(
                r#"
                [[class]]
                name = "A"
                declarations = [{ name = "testmeta::" }]
                "#,
            )
            .unwrap();
            assert!(AttributeParser::new(manifest).for_class("A").unwrap().is_empty());
        }
    }

    #[test]
    fn parser_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AttributeParser<Manifest>>();
    }
}
