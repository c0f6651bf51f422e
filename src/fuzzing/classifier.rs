// Raw Request Line Classification
//
// Decides, line by line, how a raw HTTP request is fuzzed. Rules are tried in
// strict priority order and only the first one fires:
//
// 1. Ignored:       line starts with a configured ignore prefix → unchanged
// 2. Header:        injectable header → payload appended to the value
// 3. Parameterized: contains `=value` → every value replaced by the payload
// 4. Plain:         anything else → unchanged
//
// Example:
//   Ignore: {"Host:"}
//   "Host: example.com"          → "Host: example.com"
//   "Cookie:  sid=abc"           → "Cookie: sid=abcFUZZ"
//   "GET /a?id=1 HTTP/1.1"       → "GET /a?id=FUZZ HTTP/1.1"

use std::collections::HashSet;

use crate::fuzzing::cardinality::fuzz_line;
use crate::fuzzing::patterns::{INJECTABLE_HEADER, PARAM_VALUE};
use crate::models::{CardinalityKind, PartKind, SubstitutionKind};

/// Which rule applies to a raw-request line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Ignored,
    Header,
    Parameterized,
    Plain,
}

/// Classifies and fuzzes raw-request lines against a fixed ignore-prefix set
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    ignore_prefixes: HashSet<String>,
}

impl LineClassifier {
    /// Build from ignore prefixes. Prefixes are trimmed and blanks dropped,
    /// since an empty prefix would match every line.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ignore_prefixes = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { ignore_prefixes }
    }

    pub fn ignore_count(&self) -> usize {
        self.ignore_prefixes.len()
    }

    pub fn classify(&self, line: &str) -> LineClass {
        if self.ignore_prefixes.iter().any(|p| line.starts_with(p.as_str())) {
            LineClass::Ignored
        } else if INJECTABLE_HEADER.is_match(line) {
            LineClass::Header
        } else if PARAM_VALUE.is_match(line) {
            LineClass::Parameterized
        } else {
            LineClass::Plain
        }
    }

    /// Fuzzed rendition of `line` for one payload
    pub fn fuzz(&self, line: &str, payload: &str) -> String {
        match self.classify(line) {
            LineClass::Ignored | LineClass::Plain => line.to_string(),
            LineClass::Header => append_to_header(line, payload),
            LineClass::Parameterized => fuzz_line(
                line,
                payload,
                PartKind::ParamValue,
                SubstitutionKind::Replace,
                CardinalityKind::Multiple,
            )
            .ok()
            .and_then(|lines| lines.into_iter().next())
            .unwrap_or_else(|| line.to_string()),
        }
    }
}

/// `Name:<spaces>value` becomes `Name: value<payload>`
fn append_to_header(line: &str, payload: &str) -> String {
    match INJECTABLE_HEADER.captures(line) {
        Some(caps) => {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str());
            format!("{}: {}{}", name, value, payload)
        }
        None => line.to_string(),
    }
}
