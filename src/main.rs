//! Arcade Sim headless driver
//!
//! Runs a variant (or a JSON config) for a fixed number of ticks with a
//! scripted input pattern and logs a summary. The browser build drives the
//! simulation through `platform::web` instead.
//!
//! Usage: `arcade-sim [variant | config.json] [ticks] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::str::FromStr;

    use arcade_sim::consts::TICKS_PER_SECOND;
    use arcade_sim::platform::InputState;
    use arcade_sim::sim::{GameEvent, GamePhase, GameState, Key, tick};
    use arcade_sim::{ConfigError, SimConfig, Variant};
    use glam::Vec2;

    const DEFAULT_TICKS: u64 = 60 * TICKS_PER_SECOND as u64;

    fn load_config(arg: Option<&str>) -> Result<SimConfig, ConfigError> {
        match arg {
            Some(path) if path.ends_with(".json") => SimConfig::load_from_file(path),
            Some(name) => Ok(SimConfig::from_preset(Variant::from_str(name)?)),
            None => Ok(SimConfig::default()),
        }
    }

    /// Sweep the pointer across the field, click now and then, and steer
    /// with the arrow keys in slow alternation.
    fn script(input: &mut InputState, frame: u64, width: f32, height: f32) {
        let t = frame as f32 / TICKS_PER_SECOND as f32;
        let pointer = Vec2::new(
            width * (0.5 + 0.4 * (t * 0.7).sin()),
            height * (0.3 + 0.2 * (t * 1.3).cos()),
        );
        input.pointer_move(pointer);

        if frame % 20 == 0 {
            input.pointer_down(pointer);
        } else if frame % 20 == 2 {
            input.pointer_up();
        }
        if frame % 15 == 0 {
            input.key_down(Key::Space);
        } else if frame % 15 == 1 {
            input.key_up(Key::Space);
        }

        let (on, off) = if (frame / 90) % 2 == 0 {
            (Key::Left, Key::Right)
        } else {
            (Key::Right, Key::Left)
        };
        input.key_up(off);
        input.key_down(on);
    }

    pub fn run() -> Result<(), ConfigError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let config = load_config(args.first().map(String::as_str))?;
        let ticks = args
            .get(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TICKS);
        let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(42);

        let field = config.playfield;
        let mut state = GameState::new(config, seed)?;
        let mut input = InputState::new();
        let mut kills = 0u32;
        let mut pickups = 0u32;
        let mut rounds = 0u32;

        log::info!("Running {} ticks", ticks);
        state.start();

        for frame in 0..ticks {
            script(&mut input, frame, field.width, field.height);
            // Press Enter after a game over to begin the next round
            if state.phase() == GamePhase::GameOver {
                input.key_down(Key::Enter);
            } else {
                input.key_up(Key::Enter);
            }

            tick(&mut state, &input.take());

            if state.phase() == GamePhase::Intro {
                state.start();
            }

            for event in state.drain_events() {
                match event {
                    GameEvent::HostileDestroyed { .. } => kills += 1,
                    GameEvent::PowerUpCollected { .. } => pickups += 1,
                    GameEvent::PhaseChanged {
                        to: GamePhase::GameOver,
                        ..
                    } => {
                        rounds += 1;
                        log::info!(
                            "Round {} over at frame {}: score {}, level {}",
                            rounds,
                            frame,
                            state.score,
                            state.level
                        );
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Done: phase {}, score {}, level {}, {} kills, {} pickups, {} rounds, {} entities",
            state.phase().as_str(),
            state.score,
            state.level,
            kills,
            pickups,
            rounds,
            state.entities().count()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Arcade Sim (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
