//! Space Survival entry point
//!
//! Runs a headless episode with a scripted pilot and reports the result.
//!
//! Usage: `space-survival [settings.json] [--frames N] [--seed S] [--snapshot out.png]`

use std::process::ExitCode;

use space_survival::renderer::PngSurface;
use space_survival::sim::Action;
use space_survival::{Game, Settings};

/// Default episode cap (five minutes of play)
const DEFAULT_FRAMES: u64 = 5 * 60 * 60;

struct Args {
    settings_path: Option<String>,
    frames: u64,
    seed: Option<u64>,
    snapshot: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        settings_path: None,
        frames: DEFAULT_FRAMES,
        seed: None,
        snapshot: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                let value = iter.next().ok_or("--frames needs a value")?;
                args.frames = value
                    .parse()
                    .map_err(|_| format!("invalid frame count: {value}"))?;
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("invalid seed: {value}"))?);
            }
            "--snapshot" => {
                args.snapshot = Some(iter.next().ok_or("--snapshot needs a path")?);
            }
            other if other.starts_with("--") => return Err(format!("unknown option: {other}")),
            path => args.settings_path = Some(path.to_string()),
        }
    }
    Ok(args)
}

/// Steer under the lowest rock ahead of the ship and shoot when lined up
fn pilot(game: &Game) -> Action {
    let state = game.state();
    let ship = state.player.center();

    let target = state
        .world
        .rocks()
        .map(|(_, rock)| rock.rect.center())
        .filter(|c| c.y < ship.y && c.y > 0.0)
        .max_by(|a, b| a.y.total_cmp(&b.y));

    match target {
        Some(rock) if rock.x < ship.x - 6.0 => Action::Left,
        Some(rock) if rock.x > ship.x + 6.0 => Action::Right,
        Some(_) => Action::Fire,
        None if state.frame % 2 == 0 => Action::Fire,
        None => Action::Idle,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: space-survival [settings.json] [--frames N] [--seed S] [--snapshot out.png]");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = match &args.settings_path {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let mut game = match Game::new(settings) {
        Ok(game) => game,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Space Survival (headless) starting...");
    let mut frames = 0;
    while game.is_running() && frames < args.frames {
        let action = pilot(&game);
        game.step(action, None);
        frames += 1;
    }

    if let Some(path) = &args.snapshot {
        let mut surface = PngSurface::new(path);
        game.draw(Some(&mut surface));
        log::info!("Last frame written to {}", surface.path().display());
    }

    let player = game.player();
    log::info!(
        "Episode finished after {} frames: score {}, lives {}, {}",
        frames,
        game.score(),
        player.lives,
        if game.is_running() { "still alive" } else { "game over" }
    );
    println!("score={} frames={} lives={}", game.score(), frames, player.lives);

    ExitCode::SUCCESS
}
