//! Candidate sources
//!
//! Turns files, stdin and comma-separated lists into an ordered
//! sequence of [`Candidate`]s. Duplicates are kept on purpose: every
//! occurrence is evaluated on its own.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::{Result, UaCheckError};
use crate::core::types::Candidate;

/// Path value that selects standard input instead of a file
pub const STDIN_PATH: &str = "-";

pub trait LoadCandidates {
    fn load_file(&self, path: &Path) -> Result<Vec<Candidate>>;
    fn load_reader<R: BufRead>(&self, reader: R) -> Result<Vec<Candidate>>;
    fn parse_list(&self, input: &str) -> Result<Vec<Candidate>>;
}

#[derive(Default, Debug)]
pub struct CandidateLoader {}

impl LoadCandidates for CandidateLoader {
    /// Read one candidate per line; `-` reads stdin.
    fn load_file(&self, path: &Path) -> Result<Vec<Candidate>> {
        if path.as_os_str() == STDIN_PATH {
            let stdin = std::io::stdin();
            return self.load_reader(stdin.lock());
        }

        if !path.exists() {
            return Err(UaCheckError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        self.load_reader(BufReader::new(file))
    }

    fn load_reader<R: BufRead>(&self, reader: R) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            candidates.push(Candidate::new(trimmed)?);
        }
        Ok(candidates)
    }

    /// Split a comma-separated list, ignoring commas inside parentheses
    /// so that `(KHTML, like Gecko)` stays in one piece.
    fn parse_list(&self, input: &str) -> Result<Vec<Candidate>> {
        split_top_level(input)
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Candidate::new)
            .collect()
    }
}

fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::{Cursor, Write};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn values(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(Candidate::as_str).collect()
    }

    #[test]
    fn test_load_file__skips_blank_lines() -> TestResult {
        let loader = CandidateLoader::default();
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"curl/8.0\n\n   \nMozilla/5.0 (X11; Linux x86_64)\r\nWget/1.21\n")?;

        let candidates = loader.load_file(file.path())?;

        assert_eq!(
            values(&candidates),
            vec!["curl/8.0", "Mozilla/5.0 (X11; Linux x86_64)", "Wget/1.21"]
        );
        Ok(())
    }

    #[test]
    fn test_load_file__keeps_duplicates_in_order() -> TestResult {
        let loader = CandidateLoader::default();
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"UA-a\nUA-b\nUA-a\n")?;

        let candidates = loader.load_file(file.path())?;

        assert_eq!(values(&candidates), vec!["UA-a", "UA-b", "UA-a"]);
        Ok(())
    }

    #[test]
    fn test_load_file__when_non_existing_file() {
        let loader = CandidateLoader::default();
        let result = loader.load_file(Path::new("non_existing_agents.txt"));

        assert!(matches!(result, Err(UaCheckError::FileNotFound(_))));
    }

    #[test]
    fn test_load_file__empty_file_yields_nothing() -> TestResult {
        let loader = CandidateLoader::default();
        let file = tempfile::NamedTempFile::new()?;

        let candidates = loader.load_file(file.path())?;

        assert!(candidates.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_reader() -> TestResult {
        let loader = CandidateLoader::default();
        let candidates = loader.load_reader(Cursor::new("one\ntwo\n"))?;

        assert_eq!(values(&candidates), vec!["one", "two"]);
        Ok(())
    }

    #[test]
    fn test_parse_list__simple() -> TestResult {
        let loader = CandidateLoader::default();
        let candidates = loader.parse_list("curl/8.0, Wget/1.21 ,,HTTPie/3.2")?;

        assert_eq!(values(&candidates), vec!["curl/8.0", "Wget/1.21", "HTTPie/3.2"]);
        Ok(())
    }

    #[test]
    fn test_parse_list__keeps_parenthesised_commas() -> TestResult {
        let loader = CandidateLoader::default();
        let input = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0, curl/8.0";

        let candidates = loader.parse_list(input)?;

        assert_eq!(
            values(&candidates),
            vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0",
                "curl/8.0"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_parse_list__unbalanced_parens_do_not_panic() -> TestResult {
        let loader = CandidateLoader::default();
        let candidates = loader.parse_list("a), b, (c")?;

        assert_eq!(values(&candidates), vec!["a)", "b", "(c"]);
        Ok(())
    }

    #[test]
    fn test_parse_list__blank_input() -> TestResult {
        let loader = CandidateLoader::default();
        assert!(loader.parse_list("  ,  , ")?.is_empty());
        Ok(())
    }
}
