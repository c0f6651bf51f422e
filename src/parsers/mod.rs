pub mod config;
pub mod ignore_lines;
pub mod payloads;
pub mod raw;

pub use config::{parse_config_str, ConfigParser, FuzzingConfig};
pub use ignore_lines::IgnoreLinesParser;
pub use payloads::PayloadParser;
pub use raw::{load_raw_request, RawRequestParser};

use crate::error::{PvError, Result};

/// Read a list argument: a `.txt` path is read line by line, anything else is
/// split on commas. Entries are trimmed and blank ones dropped.
pub(crate) fn read_list(input: &str, what: &'static str) -> Result<Vec<String>> {
    if input.ends_with(".txt") {
        let content = std::fs::read_to_string(input).map_err(|source| PvError::Read {
            what,
            path: input.to_string(),
            source,
        })?;
        Ok(split_entries(content.lines()))
    } else {
        Ok(split_entries(input.split(',')))
    }
}

fn split_entries<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    entries
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}
