//! Command-line parsing.

use anyhow::{anyhow, Result};

pub const USAGE: &str = "\
usage: tile-flip [play] [--tiles N --group N] [--seed N]
       tile-flip scores [--json]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(PlayArgs),
    Scores { json: bool },
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayArgs {
    /// `(different_tiles, group_size)`; validated against the tile cap later.
    pub params: Option<(u32, u32)>,
    pub seed: Option<u64>,
}

/// Parse arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        None => Ok(Command::Play(PlayArgs::default())),
        Some("-h") | Some("--help") | Some("help") => Ok(Command::Help),
        Some("scores") => parse_scores(&args[1..]),
        Some("play") => parse_play(&args[1..]).map(Command::Play),
        Some(_) => parse_play(args).map(Command::Play),
    }
}

fn parse_scores(args: &[String]) -> Result<Command> {
    let mut json = false;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            other => return Err(anyhow!("scores: unknown argument: {}", other)),
        }
    }
    Ok(Command::Scores { json })
}

fn parse_play(args: &[String]) -> Result<PlayArgs> {
    let mut tiles: Option<u32> = None;
    let mut group: Option<u32> = None;
    let mut seed: Option<u64> = None;

    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--tiles" | "--group" | "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("play: missing value for {}", flag))?;
                match flag {
                    "--tiles" => tiles = Some(parse_num(flag, v)?),
                    "--group" => group = Some(parse_num(flag, v)?),
                    _ => {
                        seed = Some(
                            v.parse::<u64>()
                                .map_err(|_| anyhow!("play: invalid --seed value: {}", v))?,
                        )
                    }
                }
            }
            other => return Err(anyhow!("play: unknown argument: {}", other)),
        }
        i += 1;
    }

    let params = match (tiles, group) {
        (Some(t), Some(g)) => Some((t, g)),
        (None, None) => None,
        _ => return Err(anyhow!("play: --tiles and --group must be given together")),
    };
    Ok(PlayArgs { params, seed })
}

fn parse_num(flag: &str, v: &str) -> Result<u32> {
    v.parse::<u32>()
        .map_err(|_| anyhow!("play: invalid {} value: {}", flag, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn no_args_plays_interactively() {
        assert_eq!(parse_args(&[]).unwrap(), Command::Play(PlayArgs::default()));
    }

    #[test]
    fn play_with_params_and_seed() {
        let cmd = parse_args(&args("play --tiles 8 --group 3 --seed 99")).unwrap();
        assert_eq!(
            cmd,
            Command::Play(PlayArgs {
                params: Some((8, 3)),
                seed: Some(99)
            })
        );
        // `play` is optional.
        assert_eq!(parse_args(&args("--seed 1 --group 2 --tiles 2")).unwrap(), {
            Command::Play(PlayArgs {
                params: Some((2, 2)),
                seed: Some(1),
            })
        });
    }

    #[test]
    fn scores_subcommand() {
        assert_eq!(
            parse_args(&args("scores")).unwrap(),
            Command::Scores { json: false }
        );
        assert_eq!(
            parse_args(&args("scores --json")).unwrap(),
            Command::Scores { json: true }
        );
        assert!(parse_args(&args("scores --csv")).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args("--tiles 3")).is_err());
        assert!(parse_args(&args("--tiles x --group 2")).is_err());
        assert!(parse_args(&args("--seed")).is_err());
        assert!(parse_args(&args("--bogus")).is_err());
        let err = parse_args(&args("--group -2 --tiles 2")).unwrap_err();
        assert!(err.to_string().contains("--group"));
    }

    #[test]
    fn help() {
        assert_eq!(parse_args(&args("--help")).unwrap(), Command::Help);
    }
}
