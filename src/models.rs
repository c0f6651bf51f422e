// Core data models and traits for pvreplace

use std::fmt;
use std::str::FromStr;

use crate::error::{FuzzError, PvError};

/// Structural slot targeted by a fuzzing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    ParamValue,
    ParamName,
    PathSuffix,
    PathSuffixSlash,
    PathSegment,
    PathExt,
    Headers,
}

/// Every concrete part, in the order `all` expands to
pub const ALL_PARTS: [PartKind; 7] = [
    PartKind::ParamValue,
    PartKind::ParamName,
    PartKind::PathSuffix,
    PartKind::PathSuffixSlash,
    PartKind::PathSegment,
    PartKind::PathExt,
    PartKind::Headers,
];

impl PartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::ParamValue => "param-value",
            PartKind::ParamName => "param-name",
            PartKind::PathSuffix => "path-suffix",
            PartKind::PathSuffixSlash => "path-suffix-slash",
            PartKind::PathSegment => "path-segment",
            PartKind::PathExt => "path-ext",
            PartKind::Headers => "headers",
        }
    }

    /// Parts with no per-occurrence semantics
    pub fn supports_single(&self) -> bool {
        !matches!(
            self,
            PartKind::PathSegment | PartKind::PathExt | PartKind::Headers
        )
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PartKind {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PARTS
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FuzzError::UnknownPart(s.to_string()))
    }
}

/// Part selection as written by the user: one part, or `all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartSelector {
    One(PartKind),
    All,
}

impl PartSelector {
    pub fn parts(&self) -> Vec<PartKind> {
        match self {
            PartSelector::One(part) => vec![*part],
            PartSelector::All => ALL_PARTS.to_vec(),
        }
    }
}

impl fmt::Display for PartSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartSelector::One(part) => write!(f, "{}", part),
            PartSelector::All => write!(f, "all"),
        }
    }
}

impl FromStr for PartSelector {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(PartSelector::All)
        } else {
            s.parse().map(PartSelector::One)
        }
    }
}

/// How the payload combines with the slot's existing content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionKind {
    Replace,
    Prefix,
    Postfix,
}

impl fmt::Display for SubstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionKind::Replace => write!(f, "replace"),
            SubstitutionKind::Prefix => write!(f, "prefix"),
            SubstitutionKind::Postfix => write!(f, "postfix"),
        }
    }
}

impl FromStr for SubstitutionKind {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(SubstitutionKind::Replace),
            "prefix" => Ok(SubstitutionKind::Prefix),
            "postfix" => Ok(SubstitutionKind::Postfix),
            other => Err(FuzzError::UnknownType(other.to_string())),
        }
    }
}

/// One output line for all matches, or one output line per match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalityKind {
    Single,
    Multiple,
}

impl fmt::Display for CardinalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardinalityKind::Single => write!(f, "single"),
            CardinalityKind::Multiple => write!(f, "multiple"),
        }
    }
}

impl FromStr for CardinalityKind {
    type Err = FuzzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(CardinalityKind::Single),
            "multiple" => Ok(CardinalityKind::Multiple),
            other => Err(FuzzError::UnknownMode(other.to_string())),
        }
    }
}

/// A fully resolved fuzzing request: which slot, how, and how many outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzingSpec {
    pub part: PartSelector,
    pub kind: SubstitutionKind,
    pub mode: CardinalityKind,
}

impl FuzzingSpec {
    pub fn new(part: PartSelector, kind: SubstitutionKind, mode: CardinalityKind) -> Self {
        Self { part, kind, mode }
    }
}

impl Default for FuzzingSpec {
    fn default() -> Self {
        Self {
            part: PartSelector::One(PartKind::ParamValue),
            kind: SubstitutionKind::Replace,
            mode: CardinalityKind::Multiple,
        }
    }
}

impl fmt::Display for FuzzingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part={} type={} mode={}", self.part, self.kind, self.mode)
    }
}

/// Trait for loading one of the tool's line-oriented or YAML inputs
pub trait SourceParser {
    type Output;

    /// Parse the given argument (literal value or file path)
    fn parse(&self, input: &str) -> Result<Self::Output, PvError>;
}
