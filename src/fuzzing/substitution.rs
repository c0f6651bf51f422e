// Slot Substitution
//
// Rewrites exactly one located slot. The result replaces the slot's whole match:
//
//   replace: head + glue + payload + tail
//   prefix:  head + glue + payload + content + tail
//   postfix: head + glue + content + payload + tail
//
// Payloads are inserted literally, no capture-group expansion takes place.
//
// Example (param-value, prefix):
//   Match:  =1
//   Output: =FUZZ1

use crate::error::FuzzError;
use crate::fuzzing::patterns::Slot;
use crate::models::{PartKind, SubstitutionKind};

/// Reject (part, type) combinations that have no defined anchor
pub fn validate_combination(part: PartKind, kind: SubstitutionKind) -> Result<(), FuzzError> {
    match (part, kind) {
        (PartKind::PathSuffixSlash, SubstitutionKind::Prefix | SubstitutionKind::Postfix) => {
            Err(FuzzError::UnsupportedType { part, kind })
        }
        _ => Ok(()),
    }
}

/// Rewritten text for one slot of `line`
pub fn apply(line: &str, slot: &Slot, payload: &str, kind: SubstitutionKind) -> String {
    let head = slot.head(line);
    let content = slot.content(line);
    let tail = slot.tail(line);

    let mut out = String::with_capacity(
        head.len() + slot.glue.len() + content.len() + payload.len() + tail.len(),
    );
    out.push_str(head);
    out.push_str(slot.glue);
    match kind {
        SubstitutionKind::Replace => out.push_str(payload),
        SubstitutionKind::Prefix => {
            out.push_str(payload);
            out.push_str(content);
        }
        SubstitutionKind::Postfix => {
            out.push_str(content);
            out.push_str(payload);
        }
    }
    out.push_str(tail);
    out
}
