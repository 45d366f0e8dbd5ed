//! Line source supplying candidate strings.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// A non-empty, trimmed input line and its 1-based number among the kept
/// lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub line: usize,
    pub text: String,
}

/// An opened input file whose lines have not been read yet.
///
/// Opening is separate from reading so a missing file is reported before the
/// expression is compiled.
#[derive(Debug)]
pub(crate) struct LineSource {
    path: PathBuf,
    file: File,
}

impl LineSource {
    pub(crate) fn open(path: &Path) -> Result<Self, CliError> {
        match File::open(path) {
            Ok(file) => Ok(Self {
                path: path.to_path_buf(),
                file,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(CliError::ResourceNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn candidates(self) -> Result<Vec<Candidate>, CliError> {
        let Self { path, file } = self;
        read_candidates(BufReader::new(file)).map_err(|source| CliError::Read { path, source })
    }
}

pub(crate) fn read_candidates<R: BufRead>(reader: R) -> io::Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        candidates.push(Candidate {
            line: candidates.len() + 1,
            text: text.to_string(),
        });
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn candidate(line: usize, text: &str) -> Candidate {
        Candidate {
            line,
            text: text.into(),
        }
    }

    #[test]
    fn trims_and_skips_blank_lines() {
        let input = "  aab \n\n\t\nabab\r\n   \nc";
        let candidates = read_candidates(input.as_bytes())
            .unwrap_or_else(|err| panic!("in-memory read cannot fail: {err}"));
        assert_eq!(
            candidates,
            vec![candidate(1, "aab"), candidate(2, "abab"), candidate(3, "c")]
        );
    }

    #[test]
    fn missing_file_is_resource_not_found() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let path = dir.path().join("absent.txt");
        let Err(err) = LineSource::open(&path) else {
            panic!("file should be missing");
        };
        assert!(matches!(err, CliError::ResourceNotFound { .. }));
    }

    #[test]
    fn reads_lines_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|err| panic!("temp: {err}"));
        writeln!(file, "ab\n\nba").unwrap_or_else(|err| panic!("write: {err}"));
        let candidates = LineSource::open(file.path())
            .and_then(LineSource::candidates)
            .unwrap_or_else(|err| panic!("read: {err}"));
        assert_eq!(candidates, vec![candidate(1, "ab"), candidate(2, "ba")]);
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|err| panic!("temp: {err}"));
        file.write_all(&[0x61, 0xff, 0x0a])
            .unwrap_or_else(|err| panic!("write: {err}"));
        let Err(err) = LineSource::open(file.path()).and_then(LineSource::candidates) else {
            panic!("invalid UTF-8 should fail");
        };
        assert!(matches!(err, CliError::Read { .. }));
    }
}
