// Driver for pvreplace
//
// URL mode:  input line × payload × spec × part → fuzz_line → stdout
// Raw mode:  request file × payload × request line → LineClassifier → stdout (+ artifact)
//
// Unsupported combinations are reported and skipped, the remaining
// payloads/parts still run.

use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{FuzzError, PvError, Result};
use crate::fuzzing::{fuzz_line, LineClassifier};
use crate::models::FuzzingSpec;
use crate::parsers::load_raw_request;
use crate::reporting::ArtifactWriter;

/// Fuzzes URLs (or any single-line inputs) against a list of specs
pub struct Driver {
    payloads: Vec<String>,
    specs: Vec<FuzzingSpec>,
}

impl Driver {
    pub fn new(payloads: Vec<String>, specs: Vec<FuzzingSpec>) -> Self {
        Self { payloads, specs }
    }

    /// Every output line for one input, in payload → spec → part order
    pub fn fuzz_input(&self, line: &str) -> Vec<String> {
        let mut outputs = Vec::new();
        for payload in &self.payloads {
            for spec in &self.specs {
                for part in spec.part.parts() {
                    match fuzz_line(line, payload, part, spec.kind, spec.mode) {
                        Ok(lines) => outputs.extend(lines),
                        Err(e @ FuzzError::SingleModeUnsupported(_)) => info!("{}", e),
                        Err(e) => warn!("{}", e),
                    }
                }
            }
        }
        outputs
    }

    pub fn run_url<W: Write>(&self, url: &str, out: &mut W) -> Result<usize> {
        let outputs = self.fuzz_input(url);
        for line in &outputs {
            writeln!(out, "{}", line)?;
        }
        Ok(outputs.len())
    }

    /// Fuzz every line of `reader`, returns the number of lines written.
    /// Invalid UTF-8 is replaced rather than ending the stream.
    pub fn run_lines<R: BufRead, W: Write>(&self, reader: R, out: &mut W) -> Result<usize> {
        let mut written = 0;
        for line in reader.split(b'\n') {
            let line = decode_line(&line?);
            written += self.run_url(&line, out)?;
        }
        Ok(written)
    }
}

/// Fuzzes raw HTTP request files line by line
pub struct RawDriver {
    payloads: Vec<String>,
    classifier: LineClassifier,
    output_dir: Option<PathBuf>,
}

impl RawDriver {
    pub fn new(payloads: Vec<String>, classifier: LineClassifier, output_dir: Option<PathBuf>) -> Self {
        Self {
            payloads,
            classifier,
            output_dir,
        }
    }

    /// Fuzzed copy of the request for one payload, followed by a blank line
    pub fn fuzz_batch<'a>(
        &'a self,
        lines: &'a [String],
        payload: &'a str,
    ) -> impl Iterator<Item = String> + 'a {
        lines
            .iter()
            .map(move |line| self.classifier.fuzz(line, payload))
            .chain(std::iter::once(String::new()))
    }

    pub fn run_file<W: Write>(&self, path: &Path, out: &mut W) -> Result<()> {
        let lines = load_raw_request(path)?;

        let mut artifact = match &self.output_dir {
            Some(dir) => {
                let writer = ArtifactWriter::create(dir, path)?;
                info!("Saving modified request to: {}", writer.path().display());
                Some(writer)
            }
            None => None,
        };

        for payload in &self.payloads {
            for line in self.fuzz_batch(&lines, payload) {
                writeln!(out, "{}", line)?;
                if let Some(writer) = artifact.as_mut() {
                    writer.write_line(&line)?;
                }
            }
        }

        if let Some(writer) = artifact {
            writer.finish()?;
        }
        Ok(())
    }

    /// Process every file; a file that fails is reported and skipped.
    /// Returns how many files were processed.
    pub fn run<W: Write>(&self, files: &[PathBuf], out: &mut W) -> Result<usize> {
        let mut processed = 0;
        for path in files {
            match self.run_file(path, out) {
                Ok(()) => processed += 1,
                // only stdout failures are fatal, artifact errors are per file
                Err(PvError::Io(e)) => return Err(PvError::Io(e)),
                Err(e) => warn!("{}", e),
            }
        }
        Ok(processed)
    }
}

/// One input line with any trailing `\r` removed, invalid UTF-8 replaced
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
