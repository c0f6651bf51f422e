// Cardinality Controller
//
// Decides how many output lines one (line, payload, part) combination produces:
//
// - multiple: every match rewritten at once, one output line (none if no match)
// - single: one output line per match, only that match rewritten
//
// Both modes work from the original line's match offsets. A line is never
// mutated between occurrences, so single-mode output k is always
// original[..start_k] + rewritten_k + original[end_k..].

use crate::error::FuzzError;
use crate::fuzzing::patterns::find_slots;
use crate::fuzzing::substitution::{apply, validate_combination};
use crate::models::{CardinalityKind, PartKind, SubstitutionKind};

/// Fuzz one line for one concrete part
pub fn fuzz_line(
    line: &str,
    payload: &str,
    part: PartKind,
    kind: SubstitutionKind,
    mode: CardinalityKind,
) -> Result<Vec<String>, FuzzError> {
    validate_combination(part, kind)?;

    match mode {
        CardinalityKind::Multiple => Ok(rewrite_all(line, payload, part, kind)
            .into_iter()
            .collect()),
        CardinalityKind::Single => {
            if !part.supports_single() {
                return Err(FuzzError::SingleModeUnsupported(part));
            }
            Ok(rewrite_each(line, payload, part, kind))
        }
    }
}

fn rewrite_all(line: &str, payload: &str, part: PartKind, kind: SubstitutionKind) -> Option<String> {
    let slots = find_slots(part, line);
    if slots.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(line.len() + slots.len() * payload.len());
    let mut last = 0;
    for slot in &slots {
        out.push_str(&line[last..slot.span.start]);
        out.push_str(&apply(line, slot, payload, kind));
        last = slot.span.end;
    }
    out.push_str(&line[last..]);
    Some(out)
}

fn rewrite_each(line: &str, payload: &str, part: PartKind, kind: SubstitutionKind) -> Vec<String> {
    find_slots(part, line)
        .iter()
        .map(|slot| {
            format!(
                "{}{}{}",
                &line[..slot.span.start],
                apply(line, slot, payload, kind),
                &line[slot.span.end..]
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::CardinalityKind::{Multiple, Single};
    use crate::models::SubstitutionKind::{Postfix, Prefix, Replace};

    #[test]
    fn test_multiple_rewrites_every_match() {
        let out = fuzz_line("http://x.com/a?x=1&y=2", "FUZZ", PartKind::ParamValue, Replace, Multiple);
        assert_eq!(out.unwrap(), vec!["http://x.com/a?x=FUZZ&y=FUZZ"]);
    }

    #[test]
    fn test_single_rewrites_one_match_per_line() {
        let out = fuzz_line("http://x.com/a?x=1&y=2", "FUZZ", PartKind::ParamValue, Replace, Single);
        assert_eq!(
            out.unwrap(),
            vec!["http://x.com/a?x=FUZZ&y=2", "http://x.com/a?x=1&y=FUZZ"]
        );
    }

    #[test]
    fn test_single_param_name_keeps_other_names() {
        let out = fuzz_line("/p?a=1&bb=2&c=3", "N", PartKind::ParamName, Postfix, Single).unwrap();
        assert_eq!(out, vec!["/p?aN=1&bb=2&c=3", "/p?a=1&bbN=2&c=3", "/p?a=1&bb=2&cN=3"]);
    }

    #[test]
    fn test_single_with_growing_payload_does_not_drift() {
        let out = fuzz_line("/p?a=1&b=2", "LONGPAYLOAD", PartKind::ParamName, Prefix, Single).unwrap();
        assert_eq!(out, vec!["/p?LONGPAYLOADa=1&b=2", "/p?a=1&LONGPAYLOADb=2"]);
    }

    #[test]
    fn test_no_match_produces_nothing() {
        assert!(fuzz_line("http://x.com/", "F", PartKind::ParamValue, Replace, Multiple)
            .unwrap()
            .is_empty());
        assert!(fuzz_line("http://x.com/", "F", PartKind::ParamValue, Replace, Single)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_single_rejected_for_segment_ext_headers() {
        for part in [PartKind::PathSegment, PartKind::PathExt, PartKind::Headers] {
            let err = fuzz_line("http://x.com/a/b/c.php", "F", part, Replace, Single).unwrap_err();
            assert_eq!(err, FuzzError::SingleModeUnsupported(part));
        }
    }

    #[test]
    fn test_path_suffix_slash_single() {
        let out = fuzz_line("http://x.com/a.php/b.jsp", "F", PartKind::PathSuffixSlash, Replace, Single)
            .unwrap();
        assert_eq!(
            out,
            vec!["http://x.com/a.php/F/b.jsp", "http://x.com/a.php/b.jsp/F"]
        );
    }

    #[test]
    fn test_invalid_type_checked_before_matching() {
        let err = fuzz_line("http://x.com/", "F", PartKind::PathSuffixSlash, Prefix, Multiple)
            .unwrap_err();
        assert!(matches!(err, FuzzError::UnsupportedType { .. }));
    }

    #[test]
    fn test_replace_is_a_fixed_point() {
        let once = fuzz_line("/a?x=1&y=2", "FUZZ", PartKind::ParamValue, Replace, Multiple).unwrap();
        let twice = fuzz_line(&once[0], "FUZZ", PartKind::ParamValue, Replace, Multiple).unwrap();
        assert_eq!(once, twice);
    }
}
