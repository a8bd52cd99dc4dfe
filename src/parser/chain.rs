//! parser::chain
//!
//! Several parsers behind one [`Parser`].
//!
//! Metadata may be declared in more than one style for the same test (for
//! instance structured declarations next to a docblock annotation parser
//! living outside this crate). A chain asks every parser in order and
//! concatenates their answers. For a class/method pair all class-level
//! entries still come before all method-level entries.

use super::{ParseError, Parser};
use crate::core::metadata::MetadataCollection;

/// An ordered list of parsers.
#[derive(Default)]
pub struct ParserChain {
    parsers: Vec<Box<dyn Parser>>,
}

impl ParserChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parser; results are merged in the order parsers were added.
    pub fn with(mut self, parser: impl Parser + 'static) -> Self {
        self.push(parser);
        self
    }

    pub fn push(&mut self, parser: impl Parser + 'static) {
        self.parsers.push(Box::new(parser));
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    fn collect(
        &self,
        parse: impl Fn(&dyn Parser) -> Result<MetadataCollection, ParseError>,
    ) -> Result<MetadataCollection, ParseError> {
        self.parsers
            .iter()
            .try_fold(MetadataCollection::new(), |merged, parser| {
                Ok(merged.merge_with(&parse(parser.as_ref())?))
            })
    }
}

impl std::fmt::Debug for ParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserChain")
            .field("parsers", &self.parsers.len())
            .finish()
    }
}

impl Parser for ParserChain {
    fn for_class(&self, class_name: &str) -> Result<MetadataCollection, ParseError> {
        self.collect(|p| p.for_class(class_name))
    }

    fn for_method(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<MetadataCollection, ParseError> {
        self.collect(|p| p.for_method(class_name, method_name))
    }
}
