//! Stocky Bird entry point
//!
//! Native builds run a headless session driven by an autopilot and log what
//! happens. The browser host drives the library directly.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::env;
    use std::time::{SystemTime, UNIX_EPOCH};

    use stocky_bird::persistence::JsonFileStore;
    use stocky_bird::sim::{AnswerKey, GameEvent, GameState, Phase, TickInput, Viewport, tick};
    use stocky_bird::{HighScoreStore, Tuning};

    /// Host refresh rate
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Simulated session length (s)
    const SESSION_SECONDS: f32 = 120.0;
    /// How long the autopilot "reads" a question before answering (s)
    const THINK_TIME: f32 = 0.6;
    /// Flap once the body sinks this far below the gap center (px)
    const FLAP_DEADBAND: f32 = 12.0;

    /// Scripted player: tracks the next gap and answers correctly after a pause
    #[derive(Default)]
    struct Autopilot {
        think_timer: f32,
    }

    impl Autopilot {
        fn input(&mut self, state: &GameState) -> TickInput {
            match state.phase {
                Phase::Menu { .. } => TickInput::action(),
                Phase::GameOver { .. } => TickInput {
                    action: state.can_restart(),
                    answer: None,
                },
                Phase::Playing => {
                    let target = state
                        .next_gate()
                        .map(|(_, gate)| gate.gap_center)
                        .unwrap_or(state.viewport.height / 2.0);
                    let action =
                        state.body.pos.y > target + FLAP_DEADBAND && state.body.vel_y > 0.0;

                    let answer = match state.question() {
                        Some(question) => {
                            self.think_timer += FRAME_DT;
                            if self.think_timer >= THINK_TIME {
                                self.think_timer = 0.0;
                                AnswerKey::new(question.correct_index as u8 + 1)
                            } else {
                                None
                            }
                        }
                        None => {
                            self.think_timer = 0.0;
                            None
                        }
                    };

                    TickInput { action, answer }
                }
            }
        }
    }

    fn env_or(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    fn seed() -> u64 {
        env::var("STOCKY_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            })
    }

    pub fn run() {
        env_logger::init();
        log::info!("Stocky Bird (native) starting...");

        let tuning = Tuning::load_or_default(env_or("STOCKY_TUNING", "tuning.json"));
        let mut store = JsonFileStore::new(env_or("STOCKY_SAVE", "stockybird_highscore.json"));
        let high_water = store.load().unwrap_or(0.0);
        log::info!(
            "High-water mark ${high_water:.2} from {}",
            store.path().display()
        );
        let seed = seed();

        let mut state = GameState::new(seed, Viewport::default(), tuning, high_water);
        let mut pilot = Autopilot::default();
        let mut runs = 0u32;
        let mut best_trades = 0u32;

        let frames = (SESSION_SECONDS / FRAME_DT) as u32;
        for _ in 0..frames {
            let input = pilot.input(&state);
            tick(&mut state, &input, FRAME_DT, &mut store);

            for event in state.drain_events() {
                match event {
                    GameEvent::Started => runs += 1,
                    GameEvent::ScoreIncrement { trades, credit } => {
                        log::debug!("Trade #{trades}: +${credit:.2}");
                    }
                    GameEvent::Correct { first_try } => {
                        log::debug!("Correct (first try: {first_try})");
                    }
                    GameEvent::Wrong { penalty } => log::debug!("Wrong: -${penalty:.2}"),
                    GameEvent::NewHighWater { value } => {
                        log::info!("New high-water mark: ${value:.2}");
                    }
                    GameEvent::Flap
                    | GameEvent::Death { .. }
                    | GameEvent::Paused
                    | GameEvent::Resumed
                    | GameEvent::ReturnedToMenu => {}
                }
            }
            best_trades = best_trades.max(state.score.trades);
        }

        println!(
            "seed {seed}: {runs} runs, last run {} trades, P&L ${:.2}, accuracy {}%, best {} trades, high-water ${:.2}",
            state.score.trades,
            state.score.pnl,
            state.quiz.accuracy(),
            best_trades,
            state.score.high_water,
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library; nothing to run here
}
