//! Screen flow around the engine: intro pages, settings form, play, report.
//!
//! `App` owns no terminal; `main` feeds it crossterm events and ticks, and
//! draws whatever [`App::render_into`] produces.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent};

use crate::config::GameConfig;
use crate::core::{
    ClickOutcome, Evaluation, GameParams, GameSession, SessionOutcome, SessionReport,
    SessionSnapshot, SettingsForm, TileEvent,
};
use crate::input::{self, CursorRepeat};
use crate::scores::{record_score, ScoreRecorder};
use crate::term::{
    render_intro, render_report, render_settings, FrameBuffer, FrameThrottle, GameView, Viewport,
    INTRO_PAGES,
};
use crate::types::{FormInput, GameAction, Position, ReplayDecision};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Intro { page: usize },
    Settings(SettingsForm),
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    config: GameConfig,
    screen: Screen,
    session: Option<GameSession>,
    seed: u64,
    snapshot: SessionSnapshot,
    cursor: Position,
    repeat: CursorRepeat,
    view: GameView,
    recorder: Box<dyn ScoreRecorder>,
    outcome: Option<SessionOutcome>,
}

impl App {
    pub fn new(config: GameConfig, recorder: Box<dyn ScoreRecorder>, seed: u64) -> Self {
        let screen = if config.skip_intro {
            Screen::Settings(SettingsForm::new(config.max_tiles))
        } else {
            Screen::Intro { page: 0 }
        };
        Self {
            config,
            screen,
            session: None,
            seed,
            snapshot: SessionSnapshot::default(),
            cursor: Position::default(),
            repeat: CursorRepeat::new(),
            view: GameView::new(),
            recorder,
            outcome: None,
        }
    }

    /// Skip the intro and the form and start straight away.
    pub fn with_params(mut self, params: GameParams) -> Self {
        self.start_round(params);
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn recorder(&self) -> &dyn ScoreRecorder {
        self.recorder.as_ref()
    }

    /// Set once the player declines another round.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Report of the last finished round, if any.
    pub fn last_report(&self) -> Option<SessionReport> {
        match self.outcome {
            Some(SessionOutcome::Ended(report)) => Some(report),
            _ => self.session.as_ref().and_then(|s| s.report().copied()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if input::is_interrupt(key) {
            return Control::Quit;
        }
        match self.screen {
            Screen::Intro { page } => {
                if input::should_quit(key) {
                    return Control::Quit;
                }
                if page + 1 < INTRO_PAGES.len() {
                    self.screen = Screen::Intro { page: page + 1 };
                } else {
                    self.screen = Screen::Settings(SettingsForm::new(self.config.max_tiles));
                }
                Control::Continue
            }
            Screen::Settings(_) => match input::handle_form_key(key) {
                Some(form_input) => self.handle_form_input(form_input),
                None => Control::Continue,
            },
            Screen::Playing => {
                if input::should_quit(key) {
                    return Control::Quit;
                }
                // Direction keys go through auto-repeat.
                if input::direction_for(key.code).is_some() {
                    if let Some(action) = self.repeat.handle_key_press(key.code) {
                        self.apply_action(action);
                    }
                } else if let Some(action) = input::handle_key_event(key) {
                    self.apply_action(action);
                }
                Control::Continue
            }
            Screen::Finished => match input::handle_replay_key(key) {
                Some(decision) => self.handle_replay(decision),
                None => Control::Continue,
            },
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.repeat.handle_key_release(code);
    }

    /// Left clicks on the play screen flip the tile under the pointer.
    pub fn handle_mouse(&mut self, event: MouseEvent, viewport: Viewport) {
        if self.screen != Screen::Playing {
            return;
        }
        let Some((x, y)) = input::mouse_click(event) else {
            return;
        };
        let cursor = Some(self.cursor);
        if let Some(pos) = self.view.hit_test(&self.snapshot, cursor, viewport, x, y) {
            self.apply_action(GameAction::FlipAt(pos));
        }
    }

    fn handle_form_input(&mut self, form_input: FormInput) -> Control {
        let Screen::Settings(form) = &mut self.screen else {
            return Control::Continue;
        };
        match form_input {
            FormInput::Char(ch) => form.push_char(ch),
            FormInput::Backspace => form.backspace(),
            FormInput::NextField | FormInput::PrevField => form.toggle_focus(),
            FormInput::Cancel => return Control::Quit,
            FormInput::Submit => {
                if let Ok(params) = form.submit() {
                    self.start_round(params);
                }
            }
        }
        Control::Continue
    }

    fn handle_replay(&mut self, decision: ReplayDecision) -> Control {
        let Some(session) = self.session.as_mut() else {
            return Control::Continue;
        };
        match session.decide_replay(decision) {
            SessionOutcome::Continue => Control::Continue,
            SessionOutcome::Replay => {
                let form = SettingsForm::new(self.config.max_tiles).with_values(session.params());
                self.screen = Screen::Settings(form);
                Control::Continue
            }
            ended @ SessionOutcome::Ended(_) => {
                self.outcome = Some(ended);
                Control::Quit
            }
        }
    }

    fn start_round(&mut self, params: GameParams) {
        match self.session.as_mut() {
            Some(session) => session.reset(params),
            None => {
                self.session = Some(
                    GameSession::new(params, self.seed).with_settle_delay(self.config.settle_ms),
                );
            }
        }
        self.cursor = Position::default();
        self.screen = Screen::Playing;
        self.sync();
    }

    pub fn apply_action(&mut self, action: GameAction) {
        if self.screen != Screen::Playing {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match action {
            GameAction::Move(dir) => {
                let grid = session.grid();
                self.cursor = self.cursor.step(dir, grid.rows(), grid.cols());
            }
            GameAction::Flip => log_click(self.cursor, session.click(self.cursor)),
            GameAction::FlipAt(pos) => {
                self.cursor = pos;
                log_click(pos, session.click(pos));
            }
            GameAction::Resolve => log_evaluation(session.resolve_now()),
        }
        self.sync();
    }

    /// Advance key repeat and the engine by one fixed step.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.screen != Screen::Playing {
            return;
        }
        for action in self.repeat.update(elapsed_ms) {
            self.apply_action(action);
        }
        if let Some(session) = self.session.as_mut() {
            log_evaluation(session.tick(elapsed_ms));
        }
        self.sync();
    }

    /// Drain engine events, refresh the snapshot and enter the report on a win.
    fn sync(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for event in session.take_events() {
            log_event(&event);
        }
        session.snapshot_into(&mut self.snapshot);

        if self.screen == Screen::Playing && session.is_finished() {
            let score = session.score();
            record_score(self.recorder.as_mut(), score);
            self.screen = Screen::Finished;
        }
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        match &self.screen {
            Screen::Intro { page } => render_intro(*page, viewport, fb),
            Screen::Settings(form) => render_settings(form, viewport, fb),
            Screen::Playing => self
                .view
                .render_into(&self.snapshot, Some(self.cursor), viewport, fb),
            Screen::Finished => match self.session.as_ref().and_then(|s| s.report()) {
                Some(report) => render_report(report, viewport, fb),
                None => self.view.render_into(&self.snapshot, None, viewport, fb),
            },
        }
    }

    /// Hash of everything visible. The clock only counts at display precision.
    pub fn fingerprint(&self) -> u64 {
        let s = &self.snapshot;
        FrameThrottle::fingerprint(&(
            &self.screen,
            &s.tiles,
            s.phase,
            s.score,
            s.flips,
            s.selected,
            s.elapsed_ms / 100,
            s.episode_id,
            self.cursor,
        ))
    }
}

fn log_click(pos: Position, outcome: ClickOutcome) {
    match outcome {
        ClickOutcome::Ignored(reason) => {
            log::debug!("click ({}, {}) ignored: {:?}", pos.row, pos.col, reason)
        }
        ClickOutcome::Flipped {
            selected,
            evaluation,
        } => {
            log::debug!("click ({}, {}) selected {}", pos.row, pos.col, selected);
            log_evaluation(evaluation);
        }
    }
}

fn log_evaluation(evaluation: Option<Evaluation>) {
    if let Some(evaluation) = evaluation {
        log::debug!("evaluation: {:?}", evaluation);
    }
}

fn log_event(event: &TileEvent) {
    match event {
        TileEvent::Revealed { pos, symbol } => {
            log::debug!("tile ({}, {}) revealed {}", pos.row, pos.col, symbol)
        }
        TileEvent::Hidden { pos } => log::debug!("tile ({}, {}) hidden", pos.row, pos.col),
        TileEvent::Cleared { pos } => log::debug!("tile ({}, {}) cleared", pos.row, pos.col),
    }
}
