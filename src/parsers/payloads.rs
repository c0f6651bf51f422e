// Payload list parser
// Accepts a comma-separated literal list or a .txt file with one payload per line

use crate::error::Result;
use crate::models::SourceParser;
use crate::parsers::read_list;

pub struct PayloadParser;

impl SourceParser for PayloadParser {
    type Output = Vec<String>;

    fn parse(&self, input: &str) -> Result<Vec<String>> {
        read_list(input, "payload file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn literal_list_is_split_and_trimmed() {
        let payloads = PayloadParser.parse("FUZZ, <svg>,,'\"").unwrap();
        assert_eq!(payloads, vec!["FUZZ", "<svg>", "'\""]);
    }

    #[test]
    fn file_drops_blank_lines() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "one\n\n   \n two \nthree").unwrap();
        let payloads = PayloadParser.parse(file.path().to_str().unwrap()).unwrap();
        assert_eq!(payloads, vec!["one", "two", "three"]);
    }

    #[test]
    fn blank_only_file_gives_no_payloads() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "\n\n  \n").unwrap();
        assert!(PayloadParser.parse(file.path().to_str().unwrap()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = PayloadParser.parse("/definitely/not/here/payloads.txt").unwrap_err();
        assert!(err.to_string().starts_with("error opening payload file"));
    }
}
