// YAML fuzzing configuration parser
//
// configurations:
//   - fuzzing-part: param-value
//     fuzzing-type: replace
//     fuzzing-mode: single
//   - fuzzing-part: path-ext
//     fuzzing-type: postfix
//     fuzzing-mode: multiple
//     ignore: true
//
// Entries marked `ignore: true` are dropped. An entry naming an unknown
// part/type/mode is reported and skipped, the rest stay active.

use log::warn;
use serde::Deserialize;

use crate::error::{FuzzError, PvError, Result};
use crate::models::{FuzzingSpec, SourceParser};

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    configurations: Vec<FuzzingConfig>,
}

/// One `configurations` entry as written in the file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FuzzingConfig {
    #[serde(default = "default_part")]
    pub fuzzing_part: String,
    #[serde(default = "default_type")]
    pub fuzzing_type: String,
    #[serde(default = "default_mode")]
    pub fuzzing_mode: String,
    #[serde(default)]
    pub ignore: bool,
}

fn default_part() -> String {
    "param-value".to_string()
}

fn default_type() -> String {
    "replace".to_string()
}

fn default_mode() -> String {
    "multiple".to_string()
}

impl FuzzingConfig {
    pub fn to_spec(&self) -> std::result::Result<FuzzingSpec, FuzzError> {
        Ok(FuzzingSpec::new(
            self.fuzzing_part.trim().parse()?,
            self.fuzzing_type.trim().parse()?,
            self.fuzzing_mode.trim().parse()?,
        ))
    }
}

/// Active specs of a YAML document, in file order
pub fn parse_config_str(content: &str) -> std::result::Result<Vec<FuzzingSpec>, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let file: ConfigFile = serde_yaml::from_str(content)?;

    let specs = file
        .configurations
        .iter()
        .filter(|cfg| !cfg.ignore)
        .filter_map(|cfg| match cfg.to_spec() {
            Ok(spec) => Some(spec),
            Err(e) => {
                warn!("Skipping config entry: {}", e);
                None
            }
        })
        .collect();
    Ok(specs)
}

pub struct ConfigParser;

impl SourceParser for ConfigParser {
    type Output = Vec<FuzzingSpec>;

    fn parse(&self, path: &str) -> Result<Vec<FuzzingSpec>> {
        let content = std::fs::read_to_string(path).map_err(|source| PvError::Read {
            what: "config file",
            path: path.to_string(),
            source,
        })?;
        parse_config_str(&content).map_err(|source| PvError::Config {
            path: path.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardinalityKind, PartKind, PartSelector, SubstitutionKind};

    #[test]
    fn parses_entries_and_drops_ignored() {
        let yaml = r#"
configurations:
  - fuzzing-part: param-value
    fuzzing-type: prefix
    fuzzing-mode: single
  - fuzzing-part: path-ext
    fuzzing-type: replace
    fuzzing-mode: multiple
    ignore: true
  - fuzzing-part: all
    fuzzing-type: postfix
    fuzzing-mode: multiple
"#;
        let specs = parse_config_str(yaml).unwrap();
        assert_eq!(
            specs,
            vec![
                FuzzingSpec::new(
                    PartSelector::One(PartKind::ParamValue),
                    SubstitutionKind::Prefix,
                    CardinalityKind::Single
                ),
                FuzzingSpec::new(
                    PartSelector::All,
                    SubstitutionKind::Postfix,
                    CardinalityKind::Multiple
                ),
            ]
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let specs = parse_config_str("configurations:\n  - fuzzing-part: headers\n").unwrap();
        assert_eq!(
            specs,
            vec![FuzzingSpec::new(
                PartSelector::One(PartKind::Headers),
                SubstitutionKind::Replace,
                CardinalityKind::Multiple
            )]
        );
    }

    #[test]
    fn unknown_names_skip_only_that_entry() {
        let yaml = "configurations:\n  - fuzzing-part: nope\n  - fuzzing-part: param-name\n";
        let specs = parse_config_str(yaml).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].part, PartSelector::One(PartKind::ParamName));
    }

    #[test]
    fn empty_document_has_no_entries() {
        assert!(parse_config_str("").unwrap().is_empty());
        assert!(parse_config_str("configurations: []").unwrap().is_empty());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse_config_str("configurations: [ {fuzzing-part: ").is_err());
        assert!(parse_config_str("configurations: 12").is_err());
    }
}
