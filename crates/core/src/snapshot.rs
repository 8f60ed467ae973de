use crate::types::{Phase, Position, TileFace};

/// Plain-data copy of a session for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SessionSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major tile faces.
    pub tiles: Vec<TileFace>,
    pub phase: Phase,
    pub score: u32,
    pub flips: u32,
    pub total_groups: u32,
    pub group_size: u32,
    /// Selection buffer length.
    pub selected: usize,
    pub elapsed_ms: u64,
    pub settle_remaining_ms: u32,
    pub episode_id: u32,
    pub seed: u64,
}

impl SessionSnapshot {
    pub fn face(&self, pos: Position) -> Option<&TileFace> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        self.tiles.get(pos.row * self.cols + pos.col)
    }

    /// Longest symbol on the board, in characters.
    pub fn max_symbol_len(&self) -> usize {
        // Labels never get shorter, so the last group's label is the widest.
        let groups = self.total_groups as usize;
        let mut len = 1;
        let mut span = crate::types::ALPHABET_LEN;
        let mut covered = span;
        while covered < groups {
            span *= crate::types::ALPHABET_LEN;
            covered += span;
            len += 1;
        }
        len
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}
