//! Game session module - the match engine state machine
//!
//! A session owns the grid, the selection buffer, and the counters. It is
//! driven by discrete inputs:
//!
//! - [`GameSession::click`] for tile clicks,
//! - [`GameSession::tick`] for elapsed time (play clock and settle delay),
//! - [`GameSession::decide_replay`] once every group is cleared.
//!
//! Tile mutations are queued as [`TileEvent`]s for the UI to drain.

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::settings::GameParams;
use crate::snapshot::SessionSnapshot;
use crate::types::{Phase, Position, ReplayDecision, TileFace, SETTLE_DELAY_MS};

/// A tile mutation the UI should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileEvent {
    /// Flipped face up.
    Revealed { pos: Position, symbol: String },
    /// Flipped back face down after a mismatch.
    Hidden { pos: Position },
    /// Matched and disabled.
    Cleared { pos: Position },
}

/// Why a click did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OutOfBounds,
    AlreadyFlipped,
    Disabled,
    /// The buffer is full and waiting for evaluation.
    BufferFull,
    Finished,
}

/// Result of resolving a full selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Matched { finished: bool },
    Mismatched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    Flipped {
        /// Buffer length after this flip.
        selected: usize,
        /// Present when the settle delay is zero and this flip filled the buffer.
        evaluation: Option<Evaluation>,
    },
}

/// End-of-round statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionReport {
    pub elapsed_secs: f64,
    pub flips: u32,
    pub total_tiles: usize,
    pub score: u32,
}

impl SessionReport {
    /// Average number of flips per tile.
    pub fn flips_per_tile(&self) -> f64 {
        if self.total_tiles == 0 {
            return 0.0;
        }
        self.flips as f64 / self.total_tiles as f64
    }
}

/// What the caller should do after a replay decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionOutcome {
    /// The session is not finished; nothing happened.
    Continue,
    /// The player wants another round: call [`GameSession::reset`].
    Replay,
    /// The player quit.
    Ended(SessionReport),
}

/// Complete match engine state
#[derive(Debug, Clone)]
pub struct GameSession {
    params: GameParams,
    grid: Grid,
    /// Grid indices of face-up, unresolved tiles, in click order.
    selection: Vec<usize>,
    score: u32,
    flips: u32,
    elapsed_ms: u64,
    settle_delay_ms: u32,
    settle_timer_ms: u32,
    phase: Phase,
    report: Option<SessionReport>,
    rng: SimpleRng,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    events: Vec<TileEvent>,
}

impl GameSession {
    /// Start a session with a freshly shuffled grid.
    pub fn new(params: GameParams, seed: u64) -> Self {
        let mut rng = SimpleRng::new(seed);
        let grid = Grid::new(params, &mut rng);
        log::info!(
            "session start: {} groups of {} on {}x{} (seed {})",
            params.different_tiles(),
            params.group_size(),
            grid.rows(),
            grid.cols(),
            seed
        );

        Self {
            params,
            grid,
            selection: Vec::with_capacity(params.group_size() as usize),
            score: 0,
            flips: 0,
            elapsed_ms: 0,
            settle_delay_ms: SETTLE_DELAY_MS,
            settle_timer_ms: 0,
            phase: Phase::AwaitingSelection,
            report: None,
            rng,
            episode_id: 0,
            events: Vec::new(),
        }
    }

    /// Override the settle delay. Zero resolves a full buffer inside the click.
    pub fn with_settle_delay(mut self, settle_delay_ms: u32) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn params(&self) -> GameParams {
        self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn flips(&self) -> u32 {
        self.flips
    }

    pub fn group_size(&self) -> usize {
        self.params.group_size() as usize
    }

    /// Groups needed to win: `total_tiles / group_size`.
    pub fn total_groups(&self) -> u32 {
        (self.grid.len() / self.group_size()) as u32
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    /// Positions in the selection buffer, in click order.
    pub fn selected(&self) -> impl Iterator<Item = Position> + '_ {
        self.selection.iter().map(|&i| self.grid.position_of(i))
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn settle_delay_ms(&self) -> u32 {
        self.settle_delay_ms
    }

    /// Remaining settle delay while evaluating, otherwise 0.
    pub fn settle_remaining_ms(&self) -> u32 {
        if self.phase == Phase::Evaluating {
            self.settle_timer_ms
        } else {
            0
        }
    }

    pub fn report(&self) -> Option<&SessionReport> {
        self.report.as_ref()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Face of the tile at `pos`.
    pub fn face(&self, pos: Position) -> Option<TileFace> {
        self.grid.get(pos).map(face_of)
    }

    /// Take and clear pending tile events.
    pub fn take_events(&mut self) -> Vec<TileEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a tile click.
    pub fn click(&mut self, pos: Position) -> ClickOutcome {
        match self.phase {
            Phase::Finished => return ClickOutcome::Ignored(IgnoreReason::Finished),
            Phase::Evaluating => return ClickOutcome::Ignored(IgnoreReason::BufferFull),
            Phase::AwaitingSelection => {}
        }

        let Some(index) = self.grid.index_of(pos) else {
            return ClickOutcome::Ignored(IgnoreReason::OutOfBounds);
        };

        let tile = self.grid.tile_mut(index);
        if tile.is_disabled() {
            return ClickOutcome::Ignored(IgnoreReason::Disabled);
        }
        if tile.is_flipped() {
            return ClickOutcome::Ignored(IgnoreReason::AlreadyFlipped);
        }

        tile.set_flipped(true);
        let symbol = tile.symbol().to_string();
        self.selection.push(index);
        self.flips += 1;
        self.events.push(TileEvent::Revealed { pos, symbol });

        let mut evaluation = None;
        if self.selection.len() == self.group_size() {
            self.phase = Phase::Evaluating;
            if self.settle_delay_ms == 0 {
                evaluation = Some(self.evaluate());
            } else {
                self.settle_timer_ms = self.settle_delay_ms;
            }
        }

        ClickOutcome::Flipped {
            selected: self.selection.len(),
            evaluation,
        }
    }

    /// Advance the play clock and the settle timer.
    ///
    /// Returns the evaluation if the settle delay expired during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<Evaluation> {
        if self.phase == Phase::Finished {
            return None;
        }

        self.elapsed_ms += u64::from(elapsed_ms);

        if self.phase == Phase::Evaluating {
            self.settle_timer_ms = self.settle_timer_ms.saturating_sub(elapsed_ms);
            if self.settle_timer_ms == 0 {
                return Some(self.evaluate());
            }
        }

        None
    }

    /// Evaluate a pending selection now instead of waiting out the delay.
    pub fn resolve_now(&mut self) -> Option<Evaluation> {
        if self.phase != Phase::Evaluating {
            return None;
        }
        Some(self.evaluate())
    }

    /// Compare the buffered symbols, then clear or flip back.
    fn evaluate(&mut self) -> Evaluation {
        let first = self.grid.tiles()[self.selection[0]].symbol().to_string();
        let all_match = self
            .selection
            .iter()
            .all(|&i| self.grid.tiles()[i].symbol() == first);

        for &i in &self.selection {
            let pos = self.grid.position_of(i);
            let tile = self.grid.tile_mut(i);
            if all_match {
                tile.disable();
                self.events.push(TileEvent::Cleared { pos });
            } else {
                tile.set_flipped(false);
                self.events.push(TileEvent::Hidden { pos });
            }
        }
        self.selection.clear();
        self.settle_timer_ms = 0;
        self.phase = Phase::AwaitingSelection;

        if !all_match {
            log::debug!("mismatch (flips {})", self.flips);
            return Evaluation::Mismatched;
        }

        self.score += 1;
        log::debug!("matched {} ({}/{})", first, self.score, self.total_groups());

        let finished = self.score == self.total_groups();
        if finished {
            self.finish();
        }
        Evaluation::Matched { finished }
    }

    fn finish(&mut self) {
        let report = SessionReport {
            elapsed_secs: self.elapsed_ms as f64 / 1000.0,
            flips: self.flips,
            total_tiles: self.grid.len(),
            score: self.score,
        };
        log::info!(
            "session finished: score {} in {:.3}s with {} flips",
            report.score,
            report.elapsed_secs,
            report.flips
        );
        self.phase = Phase::Finished;
        self.report = Some(report);
    }

    /// Apply the player's answer to the end-of-round question.
    pub fn decide_replay(&mut self, decision: ReplayDecision) -> SessionOutcome {
        let Some(report) = self.report.filter(|_| self.phase == Phase::Finished) else {
            return SessionOutcome::Continue;
        };
        match decision {
            ReplayDecision::Accept => SessionOutcome::Replay,
            ReplayDecision::Decline => SessionOutcome::Ended(report),
        }
    }

    /// Start a new round with `params`, reusing the session RNG.
    pub fn reset(&mut self, params: GameParams) {
        self.grid = Grid::new(params, &mut self.rng);
        self.params = params;
        self.selection.clear();
        self.score = 0;
        self.flips = 0;
        self.elapsed_ms = 0;
        self.settle_timer_ms = 0;
        self.phase = Phase::AwaitingSelection;
        self.report = None;
        self.events.clear();
        self.episode_id = self.episode_id.wrapping_add(1);
        log::info!(
            "session reset: episode {} on {}x{}",
            self.episode_id,
            self.grid.rows(),
            self.grid.cols()
        );
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.tiles.clear();
        out.tiles.extend(self.grid.tiles().iter().map(face_of));
        out.phase = self.phase;
        out.score = self.score;
        out.flips = self.flips;
        out.total_groups = self.total_groups();
        out.group_size = self.params.group_size();
        out.selected = self.selection.len();
        out.elapsed_ms = self.elapsed_ms;
        out.settle_remaining_ms = self.settle_remaining_ms();
        out.episode_id = self.episode_id;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn face_of(tile: &crate::grid::Tile) -> TileFace {
    if tile.is_disabled() {
        TileFace::Cleared(tile.symbol().to_string())
    } else if tile.is_flipped() {
        TileFace::Shown(tile.symbol().to_string())
    } else {
        TileFace::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn params(different: u32, group: u32) -> GameParams {
        GameParams::new(different, group, 2000).unwrap()
    }

    /// Positions grouped by symbol.
    fn groups(session: &GameSession) -> BTreeMap<String, Vec<Position>> {
        let mut out: BTreeMap<String, Vec<Position>> = BTreeMap::new();
        for (pos, tile) in session.grid().iter() {
            out.entry(tile.symbol().to_string()).or_default().push(pos);
        }
        out
    }

    /// Two positions holding different symbols.
    fn mismatched_pair(session: &GameSession) -> (Position, Position) {
        let g = groups(session);
        let mut it = g.values();
        (it.next().unwrap()[0], it.next().unwrap()[0])
    }

    #[test]
    fn test_new_session() {
        let s = GameSession::new(params(2, 2), 1);
        assert_eq!(s.phase(), Phase::AwaitingSelection);
        assert_eq!(s.score(), 0);
        assert_eq!(s.flips(), 0);
        assert_eq!(s.selection_len(), 0);
        assert_eq!(s.total_groups(), 2);
        assert_eq!((s.grid().rows(), s.grid().cols()), (2, 2));
        assert_eq!(s.episode_id(), 0);
        assert_eq!(s.seed(), 1);
        assert!(s.report().is_none());
    }

    #[test]
    fn test_click_flips_and_counts() {
        let mut s = GameSession::new(params(3, 2), 4);
        let outcome = s.click(Position::new(0, 0));
        assert_eq!(
            outcome,
            ClickOutcome::Flipped {
                selected: 1,
                evaluation: None
            }
        );
        assert_eq!(s.flips(), 1);
        assert!(matches!(s.face(Position::new(0, 0)), Some(TileFace::Shown(_))));

        let events = s.take_events();
        assert!(matches!(
            events.as_slice(),
            [TileEvent::Revealed { pos, .. }] if *pos == Position::new(0, 0)
        ));
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_click_same_tile_twice_is_ignored() {
        let mut s = GameSession::new(params(3, 3), 4);
        s.click(Position::new(0, 0));
        assert_eq!(
            s.click(Position::new(0, 0)),
            ClickOutcome::Ignored(IgnoreReason::AlreadyFlipped)
        );
        assert_eq!(s.selection_len(), 1);
        assert_eq!(s.flips(), 1);
    }

    #[test]
    fn test_click_out_of_bounds_is_ignored() {
        let mut s = GameSession::new(params(2, 2), 4);
        assert_eq!(
            s.click(Position::new(5, 0)),
            ClickOutcome::Ignored(IgnoreReason::OutOfBounds)
        );
        assert_eq!(s.flips(), 0);
    }

    #[test]
    fn test_match_clears_group_after_delay() {
        let mut s = GameSession::new(params(3, 2), 9);
        let g = groups(&s);
        let pair = g.values().next().unwrap().clone();

        s.click(pair[0]);
        s.click(pair[1]);
        assert_eq!(s.phase(), Phase::Evaluating);
        assert_eq!(s.settle_remaining_ms(), SETTLE_DELAY_MS);

        // Not yet.
        assert_eq!(s.tick(SETTLE_DELAY_MS - 1), None);
        assert_eq!(s.phase(), Phase::Evaluating);

        assert_eq!(s.tick(1), Some(Evaluation::Matched { finished: false }));
        assert_eq!(s.phase(), Phase::AwaitingSelection);
        assert_eq!(s.score(), 1);
        assert_eq!(s.selection_len(), 0);
        for pos in pair {
            assert!(matches!(s.face(pos), Some(TileFace::Cleared(_))));
            assert_eq!(s.click(pos), ClickOutcome::Ignored(IgnoreReason::Disabled));
        }
        assert_eq!(s.flips(), 2);
    }

    #[test]
    fn test_mismatch_flips_back() {
        let mut s = GameSession::new(params(3, 2), 9);
        let (a, b) = mismatched_pair(&s);
        s.click(a);
        s.click(b);
        s.take_events();

        assert_eq!(s.resolve_now(), Some(Evaluation::Mismatched));
        assert_eq!(s.face(a), Some(TileFace::Hidden));
        assert_eq!(s.face(b), Some(TileFace::Hidden));
        assert_eq!(s.score(), 0);
        assert_eq!(s.selection_len(), 0);
        assert_eq!(
            s.take_events(),
            vec![TileEvent::Hidden { pos: a }, TileEvent::Hidden { pos: b }]
        );

        // Flipped-back tiles are selectable again.
        assert!(matches!(s.click(a), ClickOutcome::Flipped { .. }));
    }

    #[test]
    fn test_clicks_during_settle_delay_are_ignored() {
        let mut s = GameSession::new(params(4, 2), 3);
        let (a, b) = mismatched_pair(&s);
        s.click(a);
        s.click(b);

        let others: Vec<Position> = s
            .grid()
            .iter()
            .map(|(p, _)| p)
            .filter(|p| *p != a && *p != b)
            .collect();
        for pos in others {
            assert_eq!(s.click(pos), ClickOutcome::Ignored(IgnoreReason::BufferFull));
            assert_eq!(s.selection_len(), 2);
        }
        assert_eq!(s.flips(), 2);
    }

    #[test]
    fn test_zero_delay_evaluates_in_click() {
        let mut s = GameSession::new(params(2, 2), 5).with_settle_delay(0);
        let (a, b) = mismatched_pair(&s);
        s.click(a);
        assert_eq!(
            s.click(b),
            ClickOutcome::Flipped {
                selected: 0,
                evaluation: Some(Evaluation::Mismatched)
            }
        );
        assert_eq!(s.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn test_group_of_one_matches_every_click() {
        let mut s = GameSession::new(params(3, 1), 5).with_settle_delay(0);
        assert_eq!(s.total_groups(), 3);
        let positions: Vec<Position> = s.grid().iter().map(|(p, _)| p).collect();
        for (i, pos) in positions.iter().enumerate() {
            let finished = i == positions.len() - 1;
            assert_eq!(
                s.click(*pos),
                ClickOutcome::Flipped {
                    selected: 0,
                    evaluation: Some(Evaluation::Matched { finished })
                }
            );
        }
        assert!(s.is_finished());
    }

    #[test]
    fn test_triple_groups_need_all_three() {
        let mut s = GameSession::new(params(2, 3), 12);
        let g = groups(&s);
        let mut it = g.values();
        let first = it.next().unwrap().clone();
        let second = it.next().unwrap().clone();

        // Two of one symbol and one of another.
        s.click(first[0]);
        s.click(first[1]);
        assert_eq!(s.phase(), Phase::AwaitingSelection);
        s.click(second[0]);
        assert_eq!(s.resolve_now(), Some(Evaluation::Mismatched));

        for pos in &first {
            s.click(*pos);
        }
        assert_eq!(s.resolve_now(), Some(Evaluation::Matched { finished: false }));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_win_produces_report() {
        let mut s = GameSession::new(params(2, 2), 77);
        let all: Vec<Vec<Position>> = groups(&s).into_values().collect();

        for group in &all {
            for pos in group {
                s.click(*pos);
            }
            s.tick(250);
            s.tick(250);
        }

        assert!(s.is_finished());
        assert_eq!(s.score(), 2);
        assert_eq!(s.score(), s.total_groups());
        let report = *s.report().unwrap();
        assert_eq!(report.score, 2);
        assert_eq!(report.flips, 4);
        assert_eq!(report.total_tiles, 4);
        assert!((report.elapsed_secs - 1.0).abs() < 1e-9);
        assert!((report.flips_per_tile() - 1.0).abs() < 1e-9);

        // Clock stops once finished.
        s.tick(1000);
        assert_eq!(s.elapsed_ms(), 1000);
        assert_eq!(
            s.click(Position::new(0, 0)),
            ClickOutcome::Ignored(IgnoreReason::Finished)
        );
    }

    #[test]
    fn test_replay_decisions() {
        let mut s = GameSession::new(params(1, 2), 1).with_settle_delay(0);
        assert_eq!(s.decide_replay(ReplayDecision::Accept), SessionOutcome::Continue);

        s.click(Position::new(0, 0));
        s.click(Position::new(0, 1));
        assert!(s.is_finished());

        let report = *s.report().unwrap();
        assert_eq!(s.decide_replay(ReplayDecision::Decline), SessionOutcome::Ended(report));
        assert_eq!(s.decide_replay(ReplayDecision::Accept), SessionOutcome::Replay);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = GameSession::new(params(1, 2), 1).with_settle_delay(0);
        s.click(Position::new(0, 0));
        s.click(Position::new(0, 1));
        assert!(s.is_finished());

        s.reset(params(6, 2));
        assert_eq!(s.phase(), Phase::AwaitingSelection);
        assert_eq!(s.score(), 0);
        assert_eq!(s.flips(), 0);
        assert_eq!(s.elapsed_ms(), 0);
        assert_eq!(s.selection_len(), 0);
        assert!(s.report().is_none());
        assert!(s.take_events().is_empty());
        assert_eq!(s.episode_id(), 1);
        assert_eq!((s.grid().rows(), s.grid().cols()), (3, 4));
        assert!(s.grid().tiles().iter().all(|t| t.is_selectable()));
        // The settle delay setting survives a reset.
        assert_eq!(s.settle_delay_ms(), 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut s = GameSession::new(params(2, 2), 3);
        let (a, _) = mismatched_pair(&s);
        s.click(a);
        s.tick(16);

        let snap = s.snapshot();
        assert_eq!((snap.rows, snap.cols), (2, 2));
        assert_eq!(snap.tiles.len(), 4);
        assert_eq!(snap.selected, 1);
        assert_eq!(snap.flips, 1);
        assert_eq!(snap.total_groups, 2);
        assert_eq!(snap.group_size, 2);
        assert_eq!(snap.elapsed_ms, 16);
        assert_eq!(snap.phase, Phase::AwaitingSelection);
        assert!(matches!(snap.face(a), Some(TileFace::Shown(_))));
        assert_eq!(snap.tiles.iter().filter(|f| f.is_hidden()).count(), 3);
    }
}
