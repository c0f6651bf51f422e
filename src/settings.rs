//! Start-up resolution of command-line options into run settings
//!
//! Runs once before any fuzzing: validates flag combinations, then resolves
//! the fuzzing specs, ignore lines and output directory, falling back to the
//! defaults under `~/.config/pvreplace/` (downloaded on first use).

use log::warn;
use std::path::PathBuf;

use crate::defaults::{ensure_asset, ensure_output_dir, DefaultPaths, CONFIG_FILE, IGNORE_LINES_FILE};
use crate::error::{Result, UsageError};
use crate::fuzzing::LineClassifier;
use crate::models::{FuzzingSpec, SourceParser};
use crate::parsers::{ConfigParser, IgnoreLinesParser};
use crate::remote::AssetFetcher;

/// Where the lines to fuzz come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Url(String),
    List(String),
    Raw(String),
    Stdin,
}

/// Parsed command-line options, independent of the argument parser
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub payload: String,
    pub url: Option<String>,
    pub list: Option<String>,
    pub raw: Option<String>,
    pub ignore_lines: Option<String>,
    pub config: Option<String>,
    pub output: Option<String>,
    /// Spec built from the -fuzzing-* flags (or their defaults)
    pub flag_spec: FuzzingSpec,
    /// -fuzzing-* flags the user actually typed, e.g. "-fuzzing-mode"
    pub explicit_fuzzing_flags: Vec<String>,
    pub silent: bool,
    pub version: bool,
    pub verbose: bool,
}

impl CliOptions {
    pub fn validate(&self) -> std::result::Result<(), UsageError> {
        if self.ignore_lines.is_some() && self.raw.is_none() {
            return Err(UsageError::IgnoreLinesWithoutRaw);
        }
        if self.output.is_some() && self.raw.is_none() {
            return Err(UsageError::OutputWithoutRaw);
        }
        if self.config.is_some() && !self.explicit_fuzzing_flags.is_empty() {
            return Err(UsageError::ConfigWithFuzzingFlags(
                self.explicit_fuzzing_flags.clone(),
            ));
        }
        Ok(())
    }

    /// First input present wins: -u, -list, -raw, then stdin
    pub fn input(&self) -> InputSource {
        if let Some(url) = &self.url {
            InputSource::Url(url.clone())
        } else if let Some(list) = &self.list {
            InputSource::List(list.clone())
        } else if let Some(raw) = &self.raw {
            InputSource::Raw(raw.clone())
        } else {
            InputSource::Stdin
        }
    }
}

/// Specs to run in URL mode.
///
/// A -config file wins. Without one, the default config.yaml is used unless a
/// -fuzzing-* flag was given. An empty or fully ignored config falls back to
/// the flag spec.
pub async fn resolve_specs(
    opts: &CliOptions,
    paths: Option<&DefaultPaths>,
    fetcher: &AssetFetcher,
) -> Result<Vec<FuzzingSpec>> {
    let config_path = match (&opts.config, paths) {
        (Some(path), _) => Some(PathBuf::from(path)),
        (None, Some(paths)) if opts.explicit_fuzzing_flags.is_empty() => {
            match ensure_asset(fetcher, &paths.config_file(), CONFIG_FILE).await {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Could not use default {}: {}", CONFIG_FILE, e);
                    None
                }
            }
        }
        _ => None,
    };

    if let Some(path) = config_path {
        let specs = ConfigParser.parse(&path.to_string_lossy())?;
        if !specs.is_empty() {
            return Ok(specs);
        }
    }
    Ok(vec![opts.flag_spec])
}

/// Ignore-line classifier for raw mode: -ignore-lines, else the default file
pub async fn resolve_ignore_lines(
    opts: &CliOptions,
    paths: Option<&DefaultPaths>,
    fetcher: &AssetFetcher,
) -> Result<LineClassifier> {
    let source = match (&opts.ignore_lines, paths) {
        (Some(arg), _) => Some(arg.clone()),
        (None, Some(paths)) => {
            match ensure_asset(fetcher, &paths.ignore_lines_file(), IGNORE_LINES_FILE).await {
                Ok(path) => Some(path.to_string_lossy().into_owned()),
                Err(e) => {
                    warn!("Could not use default {}: {}", IGNORE_LINES_FILE, e);
                    None
                }
            }
        }
        (None, None) => None,
    };

    match source {
        Some(arg) => Ok(LineClassifier::new(IgnoreLinesParser.parse(&arg)?)),
        None => Ok(LineClassifier::default()),
    }
}

/// Artifact directory for raw mode: -output, else the default, created if missing
pub fn resolve_output_dir(opts: &CliOptions, paths: Option<&DefaultPaths>) -> Result<Option<PathBuf>> {
    let dir = match (&opts.output, paths) {
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(paths)) => paths.output_dir(),
        (None, None) => {
            warn!("Could not get default output path, modified requests are not saved");
            return Ok(None);
        }
    };
    ensure_output_dir(&dir)?;
    Ok(Some(dir))
}
