//! core::requirement
//!
//! Structured version requirements.
//!
//! Requirement declarations (runtime version, framework version, extension
//! version) carry raw text such as `>= 8.1`, `^10.0` or `7.4.*`. The text
//! is parsed once, when the declaration is mapped to metadata, so a
//! malformed requirement is reported against the declaring test instead of
//! surfacing later in the scheduler.
//!
//! # Grammar
//!
//! Parsing tries a constraint expression first and falls back to a
//! comparison:
//!
//! - Constraint: alternatives separated by `|` or `||`, each one of `*`,
//!   `x`, `x.*`, `x.y`, `x.y.*`, `x.y.z`, `~x.y`, `~x.y.z`, `^x.y`
//! - Comparison: an optional operator followed by a version, e.g.
//!   `>= 8.0`, `lt 5.6`, `8.1.0-RC1` (operator defaults to `>=`)
//!
//! # Example
//!
//! ```
//! use testmeta::core::requirement::Requirement;
//!
//! let req = Requirement::parse(">= 8.1").unwrap();
//! assert!(req.is_satisfied_by("8.2.3"));
//! assert!(!req.is_satisfied_by("8.0.30"));
//!
//! let caret = Requirement::parse("^10.1").unwrap();
//! assert!(caret.is_satisfied_by("10.5.0"));
//! assert!(!caret.is_satisfied_by("11.0.0"));
//!
//! assert!(Requirement::parse("not a version").is_err());
//! ```

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from requirement parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequirementError {
    #[error("invalid version requirement '{0}'")]
    InvalidVersionRequirement(String),

    #[error("invalid version comparison operator '{0}'")]
    InvalidComparisonOperator(String),
}

/// Operator of a comparison requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl ComparisonOperator {
    /// Canonical symbol for the operator.
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOperator::Less => "<",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
        }
    }

    /// Whether `ordering` (actual compared to required) satisfies the operator.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOperator::Less => ordering == Ordering::Less,
            ComparisonOperator::LessOrEqual => ordering != Ordering::Greater,
            ComparisonOperator::Greater => ordering == Ordering::Greater,
            ComparisonOperator::GreaterOrEqual => ordering != Ordering::Less,
            ComparisonOperator::Equal => ordering == Ordering::Equal,
            ComparisonOperator::NotEqual => ordering != Ordering::Equal,
        }
    }
}

impl FromStr for ComparisonOperator {
    type Err = RequirementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" | "lt" => Ok(ComparisonOperator::Less),
            "<=" | "le" => Ok(ComparisonOperator::LessOrEqual),
            ">" | "gt" => Ok(ComparisonOperator::Greater),
            ">=" | "ge" => Ok(ComparisonOperator::GreaterOrEqual),
            "==" | "=" | "eq" => Ok(ComparisonOperator::Equal),
            "!=" | "<>" | "ne" => Ok(ComparisonOperator::NotEqual),
            other => Err(RequirementError::InvalidComparisonOperator(
                other.to_string(),
            )),
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed version constraint expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionConstraint {
    /// `*`
    Any,
    /// `x.y.z`
    Exact(String),
    /// `x`, `x.*`
    SpecificMajor { major: u64 },
    /// `x.y`, `x.y.*`
    SpecificMajorAndMinor { major: u64, minor: u64 },
    /// Lower bound contributed by `~` and `^`
    AtLeast(String),
    /// Every member must comply
    All(Vec<VersionConstraint>),
    /// At least one member must comply
    AnyOf(Vec<VersionConstraint>),
}

impl VersionConstraint {
    /// Check whether a version string complies with the constraint.
    pub fn complies(&self, version: &str) -> bool {
        let (major, minor, _) = numeric_triple(version);
        match self {
            VersionConstraint::Any => true,
            VersionConstraint::Exact(expected) => {
                compare_versions(version, expected) == Ordering::Equal
            }
            VersionConstraint::SpecificMajor { major: m } => major == *m,
            VersionConstraint::SpecificMajorAndMinor {
                major: m,
                minor: n,
            } => major == *m && minor == *n,
            VersionConstraint::AtLeast(lower) => {
                compare_versions(version, lower) != Ordering::Less
            }
            VersionConstraint::All(members) => members.iter().all(|c| c.complies(version)),
            VersionConstraint::AnyOf(members) => members.iter().any(|c| c.complies(version)),
        }
    }

    /// Parse a constraint expression.
    ///
    /// Returns `None` when the text is not a constraint expression; the
    /// caller decides whether that is fatal.
    pub fn parse(text: &str) -> Option<Self> {
        if text.contains('|') {
            let members = or_separator()
                .split(text.trim())
                .map(Self::parse)
                .collect::<Option<Vec<_>>>()?;
            return Some(VersionConstraint::AnyOf(members));
        }

        if !constraint_pattern().is_match(text) {
            return None;
        }

        if let Some(rest) = text.strip_prefix('~') {
            return Self::tilde(rest);
        }
        if let Some(rest) = text.strip_prefix('^') {
            return Self::caret(rest);
        }

        let value = ConstraintValue::parse(text);
        match (value.major, value.minor, value.patch) {
            (None, _, _) => Some(VersionConstraint::Any),
            (Some(major), None, _) => Some(VersionConstraint::SpecificMajor { major }),
            (Some(major), Some(minor), None) => {
                Some(VersionConstraint::SpecificMajorAndMinor { major, minor })
            }
            (Some(_), Some(_), Some(_)) => Some(VersionConstraint::Exact(value.version)),
        }
    }

    fn tilde(rest: &str) -> Option<Self> {
        let value = ConstraintValue::parse(rest);
        let (Some(major), Some(minor)) = (value.major, value.minor) else {
            return Self::caret(rest);
        };
        if value.patch.is_none() {
            return Self::caret(rest);
        }
        Some(VersionConstraint::All(vec![
            VersionConstraint::AtLeast(value.version),
            VersionConstraint::SpecificMajorAndMinor { major, minor },
        ]))
    }

    fn caret(rest: &str) -> Option<Self> {
        let value = ConstraintValue::parse(rest);
        let major = value.major?;
        let upper = if major == 0 {
            VersionConstraint::SpecificMajorAndMinor {
                major,
                minor: value.minor.unwrap_or(0),
            }
        } else {
            VersionConstraint::SpecificMajor { major }
        };
        Some(VersionConstraint::All(vec![
            VersionConstraint::AtLeast(value.version),
            upper,
        ]))
    }
}

/// Components of a single constraint term; `None` means "any".
struct ConstraintValue {
    version: String,
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl ConstraintValue {
    fn parse(text: &str) -> Self {
        let version = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text)
            .to_string();
        let numbers = version.split('-').next().unwrap_or_default();
        let mut parts = numbers.split('.').map(|p| p.parse::<u64>().ok());

        Self {
            major: parts.next().flatten(),
            minor: parts.next().flatten(),
            patch: parts.next().flatten(),
            version,
        }
    }
}

/// A structured version requirement.
///
/// Produced at declaration-parse time by [`Requirement::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    /// `operator version`
    Comparison {
        version: String,
        operator: ComparisonOperator,
    },
    /// Constraint expression, kept alongside its source text
    Constraint {
        expression: String,
        constraint: VersionConstraint,
    },
}

impl Requirement {
    /// Parse raw requirement text.
    ///
    /// # Errors
    ///
    /// Returns `RequirementError::InvalidVersionRequirement` if the text is
    /// neither a constraint expression nor an `operator version` pair.
    pub fn parse(text: &str) -> Result<Self, RequirementError> {
        let trimmed = text.trim();

        if let Some(constraint) = VersionConstraint::parse(trimmed) {
            return Ok(Requirement::Constraint {
                expression: trimmed.to_string(),
                constraint,
            });
        }

        let captures = comparison_pattern()
            .captures(trimmed)
            .ok_or_else(|| RequirementError::InvalidVersionRequirement(text.to_string()))?;

        let operator = match captures.name("operator") {
            Some(op) => op.as_str().parse()?,
            None => ComparisonOperator::GreaterOrEqual,
        };
        let version = captures
            .name("version")
            .map(|v| v.as_str().to_string())
            .ok_or_else(|| RequirementError::InvalidVersionRequirement(text.to_string()))?;

        Ok(Requirement::Comparison { version, operator })
    }

    /// Check whether an actual version satisfies the requirement.
    pub fn is_satisfied_by(&self, version: &str) -> bool {
        match self {
            Requirement::Comparison {
                version: required,
                operator,
            } => operator.holds(compare_versions(version, required)),
            Requirement::Constraint { constraint, .. } => constraint.complies(version),
        }
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Comparison { version, operator } => write!(f, "{operator} {version}"),
            Requirement::Constraint { expression, .. } => write!(f, "{expression}"),
        }
    }
}

fn constraint_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^[\^~*]?v?[\d.*]+(?:-.*)?$").expect("constraint pattern is valid")
    })
}

fn or_separator() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s*\|\|?\s*").expect("separator pattern is valid"))
}

fn comparison_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<operator>!=|<>|<=|>=|==|<|>|=|lt|le|gt|ge|eq|ne)?\s*(?P<version>[\d.-]+(?:dev|(?:RC|alpha|beta)[\d.])?)$",
        )
        .expect("comparison pattern is valid")
    })
}

/// Leading `major.minor.patch` numbers of a version string, missing parts as 0.
fn numeric_triple(version: &str) -> (u64, u64, u64) {
    let mut parts = version
        .trim_start_matches(['v', 'V'])
        .split(['.', '-', '+'])
        .map(|p| {
            p.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse::<u64>()
                .unwrap_or(0)
        });
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

/// Compare two version strings.
///
/// Versions are split into numeric and alphabetic segments; numeric
/// segments compare numerically and alphabetic ones by release stage
/// (`dev < alpha < beta < RC < release < pl`).
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use testmeta::core::requirement::compare_versions;
///
/// assert_eq!(compare_versions("8.1.0", "8.0.30"), Ordering::Greater);
/// assert_eq!(compare_versions("8.1.0-RC1", "8.1.0"), Ordering::Less);
/// assert_eq!(compare_versions("10.0", "10.0"), Ordering::Equal);
/// ```
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = segments(left);
    let right = segments(right);

    let mut i = 0;
    while i < left.len() && i < right.len() {
        let ordering = compare_segment(&left[i], &right[i]);
        if ordering != Ordering::Equal {
            return ordering;
        }
        i += 1;
    }

    match (left.get(i), right.get(i)) {
        (Some(rest), None) => trailing(rest),
        (None, Some(rest)) => trailing(rest).reverse(),
        _ => Ordering::Equal,
    }
}

fn segments(version: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for c in version.trim().chars() {
        if matches!(c, '.' | '-' | '_' | '+') {
            if !current.is_empty() {
                result.push(std::mem::take(&mut current));
            }
            continue;
        }
        let boundary = current
            .chars()
            .last()
            .is_some_and(|last| last.is_ascii_digit() != c.is_ascii_digit());
        if boundary {
            result.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

fn is_numeric(segment: &str) -> bool {
    segment.chars().all(|c| c.is_ascii_digit())
}

fn compare_segment(left: &str, right: &str) -> Ordering {
    match (is_numeric(left), is_numeric(right)) {
        (true, true) => compare_numeric(left, right),
        (false, false) => stage_rank(left).cmp(&stage_rank(right)),
        (true, false) => stage_rank("#").cmp(&stage_rank(right)),
        (false, true) => stage_rank(left).cmp(&stage_rank("#")),
    }
}

fn compare_numeric(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// Ordering of a version that has `rest` left over against one that ended.
fn trailing(rest: &str) -> Ordering {
    if is_numeric(rest) {
        Ordering::Greater
    } else {
        stage_rank(rest).cmp(&stage_rank("#"))
    }
}

fn stage_rank(segment: &str) -> i32 {
    const STAGES: [(&str, i32); 10] = [
        ("dev", 0),
        ("alpha", 1),
        ("a", 1),
        ("beta", 2),
        ("b", 2),
        ("RC", 3),
        ("rc", 3),
        ("#", 4),
        ("pl", 5),
        ("p", 5),
    ];
    STAGES
        .iter()
        .find(|(stage, _)| segment.starts_with(stage))
        .map_or(-6, |(_, rank)| *rank)
}
