//! Terminal tile flipping game (default binary).
//!
//! Crossterm supplies keyboard and mouse input; drawing goes through the
//! framebuffer renderer in `tile_flip::term`.

use std::fs::OpenOptions;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tile_flip::cli::USAGE;
use tile_flip::core::{GameParams, SessionOutcome};
use tile_flip::scores::{load_scores_or_empty, FileScoreLog, MemoryScoreLog, ScoreRecorder, ScoreSummary};
use tile_flip::term::{FrameBuffer, FrameThrottle, TerminalRenderer, Viewport};
use tile_flip::types::TICK_MS;
use tile_flip::{parse_args, App, Command, Control, GameConfig, PlayArgs, TickClock};

/// Redraw at least this often even when nothing changed.
const HEARTBEAT_MS: u64 = 1000;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Command::Help => println!("{}", USAGE),
        Command::Scores { json } => print_scores(&config, json)?,
        Command::Play(play) => play_game(config, play)?,
    }
    Ok(())
}

fn init_logging(config: &GameConfig) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn recorder(config: &GameConfig) -> Box<dyn ScoreRecorder> {
    if config.scores_disabled {
        Box::new(MemoryScoreLog::new())
    } else {
        Box::new(FileScoreLog::new(config.score_path.clone()))
    }
}

fn print_scores(config: &GameConfig, json: bool) -> Result<()> {
    let summary = ScoreSummary::from_scores(&load_scores_or_empty(recorder(config).as_ref()));
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in summary.lines() {
            println!("{}", line);
        }
    }
    Ok(())
}

fn play_game(config: GameConfig, play: PlayArgs) -> Result<()> {
    // Validate preset parameters before touching the terminal.
    let preset = play
        .params
        .map(|(tiles, group)| GameParams::new(tiles, group, config.max_tiles))
        .transpose()
        .context("invalid --tiles/--group")?;

    let seed = play
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random::<u64>);
    log::info!("starting with seed {}", seed);

    let mut app = App::new(config.clone(), recorder(&config), seed);
    if let Some(params) = preset {
        app = app.with_params(params);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut app);
    // Always try to restore terminal state.
    let restored = term.exit();
    result?;
    restored?;

    if let Some(SessionOutcome::Ended(report)) = app.outcome() {
        println!(
            "Thanks for playing! Last round: score {} in {:.3} seconds, {} flips over {} tiles.",
            report.score, report.elapsed_secs, report.flips, report.total_tiles
        );
    }
    Ok(())
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = FrameThrottle::new(HEARTBEAT_MS);
    let start = Instant::now();
    let mut clock = TickClock::new(start, TICK_MS);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        let now_ms = start.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.fingerprint()) {
            app.render_into(viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = clock.timeout(Instant::now());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if app.handle_key(key) == Control::Quit {
                            return Ok(());
                        }
                    }
                    // Auto-repeat is handled by the app.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => app.handle_key_release(key.code),
                },
                Event::Mouse(mouse) => app.handle_mouse(mouse, viewport),
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        if let Some(elapsed) = clock.advance(Instant::now()) {
            app.tick(elapsed);
        }
    }
}
