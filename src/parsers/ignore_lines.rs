// Ignore-line parser
// Literal line prefixes that raw-request fuzzing leaves untouched

use crate::error::Result;
use crate::models::SourceParser;
use crate::parsers::read_list;

pub struct IgnoreLinesParser;

impl SourceParser for IgnoreLinesParser {
    type Output = Vec<String>;

    fn parse(&self, input: &str) -> Result<Vec<String>> {
        read_list(input, "ignore lines file")
    }
}
