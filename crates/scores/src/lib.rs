//! Score log - append-only history of finished rounds
//!
//! One integer per line, no header. The engine never depends on this crate;
//! the app records a score when a round finishes and reads the history for
//! display.
//!
//! # Failure policy
//!
//! Persistence failures never end a session. [`record_score`] logs the error
//! at `warn` and carries on; the score is simply not recorded.
//!
//! # Example
//!
//! ```
//! use tile_flip_scores::{record_score, MemoryScoreLog, ScoreRecorder, ScoreSummary};
//!
//! let mut log = MemoryScoreLog::default();
//! record_score(&mut log, 8);
//! record_score(&mut log, 12);
//!
//! let summary = ScoreSummary::from_scores(&log.load_scores().unwrap());
//! assert_eq!(summary.games, 2);
//! assert_eq!(summary.best, Some(12));
//! ```

pub mod file;
pub mod summary;

use std::io;

pub use file::FileScoreLog;
pub use summary::ScoreSummary;

/// Storage for finished-round scores.
pub trait ScoreRecorder {
    /// Persist one score.
    fn append_score(&mut self, score: u32) -> io::Result<()>;

    /// All persisted scores in the order they were written.
    fn load_scores(&self) -> io::Result<Vec<u32>>;
}

/// In-memory recorder (tests, or running with persistence disabled).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryScoreLog {
    scores: Vec<u32>,
}

impl MemoryScoreLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreRecorder for MemoryScoreLog {
    fn append_score(&mut self, score: u32) -> io::Result<()> {
        self.scores.push(score);
        Ok(())
    }

    fn load_scores(&self) -> io::Result<Vec<u32>> {
        Ok(self.scores.clone())
    }
}

impl<R: ScoreRecorder + ?Sized> ScoreRecorder for Box<R> {
    fn append_score(&mut self, score: u32) -> io::Result<()> {
        (**self).append_score(score)
    }

    fn load_scores(&self) -> io::Result<Vec<u32>> {
        (**self).load_scores()
    }
}

/// Append `score`, logging and swallowing any I/O failure.
///
/// Returns whether the score was stored.
pub fn record_score<R: ScoreRecorder + ?Sized>(recorder: &mut R, score: u32) -> bool {
    match recorder.append_score(score) {
        Ok(()) => {
            log::info!("recorded score {}", score);
            true
        }
        Err(e) => {
            log::warn!("could not record score {}: {}", score, e);
            false
        }
    }
}

/// Load history, logging a failure and returning an empty list instead.
pub fn load_scores_or_empty<R: ScoreRecorder + ?Sized>(recorder: &R) -> Vec<u32> {
    recorder.load_scores().unwrap_or_else(|e| {
        log::warn!("could not load score history: {}", e);
        Vec::new()
    })
}
