// Output artifacts for pvreplace
// One file per raw request source, named after the source, truncated on every run

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PvError, Result};

/// Where the artifact for `source` lands inside `output_dir`
pub fn artifact_path(output_dir: &Path, source: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join("request"),
    }
}

pub struct ArtifactWriter {
    path: PathBuf,
    file: BufWriter<File>,
}

impl ArtifactWriter {
    pub fn create(output_dir: &Path, source: &Path) -> Result<Self> {
        let path = artifact_path(output_dir, source);
        let file = File::create(&path).map_err(|source| PvError::Create {
            what: "output file",
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            path,
            file: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{}", line).map_err(|source| self.write_error(source))
    }

    pub fn finish(mut self) -> Result<()> {
        self.file.flush().map_err(|source| self.write_error(source))
    }

    fn write_error(&self, source: std::io::Error) -> PvError {
        PvError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}
