//! File-backed score log.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::ScoreRecorder;

/// Newline-delimited integers in a plain text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileScoreLog {
    path: PathBuf,
}

impl FileScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreRecorder for FileScoreLog {
    fn append_score(&mut self, score: u32) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", score)?;
        file.flush()
    }

    fn load_scores(&self) -> io::Result<Vec<u32>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            // No games recorded yet.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut scores = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match trimmed.parse::<u32>() {
                Ok(v) => scores.push(v),
                Err(_) => log::warn!(
                    "{}:{}: skipping unparseable score {:?}",
                    self.path.display(),
                    lineno + 1,
                    trimmed
                ),
            }
        }
        Ok(scores)
    }
}
