use serde::{Deserialize, Serialize};

/// Aggregate view of the score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub games: usize,
    pub best: Option<u32>,
    pub latest: Option<u32>,
    pub mean: Option<f64>,
    /// Scores in file order.
    pub scores: Vec<u32>,
}

impl ScoreSummary {
    pub fn from_scores(scores: &[u32]) -> Self {
        let games = scores.len();
        let mean = if games == 0 {
            None
        } else {
            let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
            Some(total as f64 / games as f64)
        };

        Self {
            games,
            best: scores.iter().copied().max(),
            latest: scores.last().copied(),
            mean,
            scores: scores.to_vec(),
        }
    }

    /// Human-readable lines for the terminal.
    pub fn lines(&self) -> Vec<String> {
        if self.games == 0 {
            return vec!["No games recorded yet.".to_string()];
        }
        let mut out = vec![
            format!("Games played: {}", self.games),
            format!("Best score:   {}", self.best.unwrap_or(0)),
            format!("Latest score: {}", self.latest.unwrap_or(0)),
            format!("Mean score:   {:.2}", self.mean.unwrap_or(0.0)),
        ];
        let recent: Vec<String> = self
            .scores
            .iter()
            .rev()
            .take(10)
            .map(|s| s.to_string())
            .collect();
        out.push(format!("Recent:       {}", recent.join(" ")));
        out
    }
}
