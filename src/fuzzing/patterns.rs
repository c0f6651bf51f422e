// Pattern Table
//
// One structural matcher per fuzzing part. Every match is split into three
// contiguous spans of the original line:
//
//   head | content | tail
//
// `content` is the variable part the payload replaces or wraps. Offsets always
// refer to the untouched input line, so callers can rebuild any combination
// of rewritten and original matches.
//
// Example (path-segment):
//   Line:    http://x.com/a/b/file.php
//   head:    http://x.com/a/
//   content: b
//   tail:    /file.php
//
// Whitespace classes are spelled out as ASCII (\t \n \f \r space) so that
// non-ASCII spaces stay part of a parameter value.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::ops::Range;

use crate::models::PartKind;

lazy_static! {
    /// `=` followed by the value, up to the next `&` or whitespace
    pub static ref PARAM_VALUE: Regex = Regex::new(r"=[^&\t\n\f\r ]*").unwrap();

    /// Separator (`?` or `&`) and the parameter name in front of `=`
    pub static ref PARAM_NAME: Regex = Regex::new(r"([?&])([^&=]+)=").unwrap();

    /// Last path component carrying a server-side extension
    pub static ref PATH_SUFFIX: Regex =
        Regex::new(r"/([^/]+\.(php|asp|aspx|jsp|jspx|xml))").unwrap();

    /// Directory directly in front of a server-side file
    pub static ref PATH_SEGMENT: Regex =
        Regex::new(r"(https?://(?:[^/]+/)+)([^/]+)/([^/]+\.(php|aspx|asp|jsp|jspx|xml))").unwrap();

    /// Basename and extension of a server-side file
    pub static ref PATH_EXT: Regex =
        Regex::new(r"/([^/]+)\.(php|aspx|asp|jsp|jspx|xml)").unwrap();

    /// Header name with its single separating space, then the value
    pub static ref HEADER_VALUE: Regex = Regex::new(
        r"^((?:User-Agent|Referer|Cookie|X-Forwarded-For|X-Real-IP):[\t\n\f\r ])(.*)$"
    )
    .unwrap();

    /// Injectable header line in a raw request (any amount of space after the colon)
    pub static ref INJECTABLE_HEADER: Regex = Regex::new(
        r"^(User-Agent|Referer|Cookie|X-Forwarded-For|X-Real-IP):[\t\n\f\r ]*(.*)$"
    )
    .unwrap();
}

/// A substitutable slot located inside one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Whole match
    pub span: Range<usize>,
    /// Variable content inside the match
    pub content: Range<usize>,
    /// Text inserted in front of the content that the line never contained
    pub glue: &'static str,
}

impl Slot {
    pub fn head<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span.start..self.content.start]
    }

    pub fn content<'a>(&self, line: &'a str) -> &'a str {
        &line[self.content.clone()]
    }

    pub fn tail<'a>(&self, line: &'a str) -> &'a str {
        &line[self.content.end..self.span.end]
    }
}

/// Regex that locates the given part
pub fn pattern_for(part: PartKind) -> &'static Regex {
    match part {
        PartKind::ParamValue => &PARAM_VALUE,
        PartKind::ParamName => &PARAM_NAME,
        PartKind::PathSuffix | PartKind::PathSuffixSlash => &PATH_SUFFIX,
        PartKind::PathSegment => &PATH_SEGMENT,
        PartKind::PathExt => &PATH_EXT,
        PartKind::Headers => &HEADER_VALUE,
    }
}

/// Every non-overlapping slot of `part` in `line`, left to right
pub fn find_slots(part: PartKind, line: &str) -> Vec<Slot> {
    pattern_for(part)
        .captures_iter(line)
        .map(|caps| locate_slot(part, &caps))
        .collect()
}

fn locate_slot(part: PartKind, caps: &Captures) -> Slot {
    // group 0 always participates
    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let group = |i: usize| caps.get(i).map_or(whole.end..whole.end, |m| m.range());

    let (content, glue) = match part {
        // everything after the leading '='
        PartKind::ParamValue => (whole.start + 1..whole.end, ""),
        PartKind::ParamName => (group(2), ""),
        PartKind::PathSuffix => (group(1), ""),
        // empty insertion point right after the file, introduced by a new '/'
        PartKind::PathSuffixSlash => (whole.end..whole.end, "/"),
        PartKind::PathSegment => (group(2), ""),
        PartKind::PathExt => (group(2), ""),
        PartKind::Headers => (group(2), ""),
    };

    Slot {
        span: whole,
        content,
        glue,
    }
}
