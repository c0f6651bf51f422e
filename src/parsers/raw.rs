// Raw request source collection for pvreplace
// Uses walkdir to list the request files of a -raw directory

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PvError, Result};
use crate::models::SourceParser;

/// Resolves a -raw argument into the request files to process
pub struct RawRequestParser;

impl SourceParser for RawRequestParser {
    type Output = Vec<PathBuf>;

    fn parse(&self, input: &str) -> Result<Vec<PathBuf>> {
        let path = Path::new(input);
        let metadata = std::fs::metadata(path).map_err(|source| PvError::Read {
            what: "raw request path",
            path: input.to_string(),
            source,
        })?;

        if !metadata.is_dir() {
            return Ok(vec![path.to_path_buf()]);
        }

        // top-level files only, name order
        let files: Vec<PathBuf> = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .map(|e| e.into_path())
            .collect();

        if files.is_empty() {
            return Err(PvError::EmptyDirectory(input.to_string()));
        }
        Ok(files)
    }
}

/// Lines of one raw request file, line endings stripped.
/// Binary bodies are decoded lossily so the text lines around them still fuzz.
pub fn load_raw_request(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read(path).map_err(|source| PvError::Read {
        what: "raw request file",
        path: path.display().to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&content)
        .lines()
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn single_file_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("req.txt");
        fs::write(&file, "GET / HTTP/1.1\r\n").unwrap();

        let files = RawRequestParser.parse(file.to_str().unwrap()).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn directory_lists_top_level_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.req"), "b").unwrap();
        fs::write(dir.path().join("a.req"), "a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.req"), "c").unwrap();

        let files = RawRequestParser.parse(dir.path().to_str().unwrap()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.req", "b.req"]);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RawRequestParser.parse(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PvError::EmptyDirectory(_)));
    }

    #[test]
    fn crlf_lines_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("req");
        fs::write(&file, "GET /?a=1 HTTP/1.1\r\nHost: x\r\n").unwrap();
        assert_eq!(
            load_raw_request(&file).unwrap(),
            vec!["GET /?a=1 HTTP/1.1", "Host: x"]
        );
    }

    #[test]
    fn binary_body_keeps_text_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("upload");
        fs::write(
            &file,
            b"POST /up.php?id=1 HTTP/1.1\r\nUser-Agent: UA\r\n\r\n\x89PNG\xff\xfe",
        )
        .unwrap();

        let lines = load_raw_request(&file).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "POST /up.php?id=1 HTTP/1.1");
        assert_eq!(lines[1], "User-Agent: UA");
        assert_eq!(lines[2], "");
        assert!(lines[3].contains("PNG"));
    }
}
