//! Variable-step simulation tick
//!
//! Core game loop. One call per display refresh: size the step, then
//! dispatch on the current phase.

use super::collision::{crosses_gate, hits_boundary, hits_gate};
use super::quiz::{AnswerKey, AnswerOutcome};
use super::state::{DeathCause, GameEvent, GameState, Phase};
use crate::consts::GATE_POOL_SIZE;
use crate::persistence::HighScoreStore;

/// Discrete input signals for a single tick (already debounced upstream)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Primary action (click/tap/space): start, flap, restart or resume
    pub action: bool,
    /// Answer key pressed this frame
    pub answer: Option<AnswerKey>,
}

impl TickInput {
    pub fn action() -> Self {
        Self {
            action: true,
            ..Default::default()
        }
    }

    pub fn answer(key: AnswerKey) -> Self {
        Self {
            answer: Some(key),
            ..Default::default()
        }
    }
}

/// Advance the game by one host frame of `raw_dt` seconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    raw_dt: f32,
    store: &mut dyn HighScoreStore,
) {
    let was_paused = state.clock.is_paused();
    let dt = state.clock.advance(raw_dt, &state.tuning.physics);

    if state.clock.is_paused() {
        if !was_paused {
            log::info!("Auto-paused after a {raw_dt:.2}s stall");
            state.emit(GameEvent::Paused);
        }
        // The resume press is consumed; nothing else runs this frame
        if input.action {
            state.clock.resume();
            log::info!("Resumed");
            state.emit(GameEvent::Resumed);
        }
        return;
    }

    state.quiz.tick_lockout(dt * 1000.0);

    match state.phase {
        Phase::Menu { .. } => update_menu(state, input, dt),
        Phase::Playing => update_playing(state, input, dt, store),
        Phase::GameOver { .. } => update_game_over(state, input, dt),
    }
}

fn update_menu(state: &mut GameState, input: &TickInput, dt: f32) {
    let idle_time = match &mut state.phase {
        Phase::Menu { idle_time } => {
            *idle_time += dt;
            *idle_time
        }
        _ => return,
    };
    state
        .body
        .bob(idle_time, state.viewport, &state.tuning.player);

    if input.action {
        start_run(state);
    }
}

/// Enter PLAYING with a fresh body, course, quiz and ledger
fn start_run(state: &mut GameState) {
    let tuning = &state.tuning;
    state.phase = Phase::Playing;
    state.score.reset();
    state.body.reset(state.viewport, &tuning.player);
    state.body.flap(&tuning.physics);
    state.gates.reset(&tuning.gates);
    state.trail.reset();
    state.trail.start(state.body.pos.y);
    state.quiz.reset();

    log::info!("Run started (seed {})", state.seed);
    state.emit(GameEvent::Started);
    state.emit(GameEvent::Flap);
}

fn update_playing(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    store: &mut dyn HighScoreStore,
) {
    if input.action {
        state.body.flap(&state.tuning.physics);
        state.emit(GameEvent::Flap);
    }

    if let Some(key) = input.answer {
        submit_answer(state, key);
    }

    // Physics
    state.body.step(dt, &state.tuning.physics);

    // Course
    state.gates.update(
        dt,
        state.viewport,
        state.score.trades,
        &state.tuning.gates,
        &mut state.rng,
    );
    unlink_recycled_gate(state);
    state.trail.update(
        dt,
        state.body.pos.x,
        state.body.pos.y,
        state.gates.scroll_speed,
        &state.tuning.trail,
    );

    // Collisions
    let hitbox = state.body.hitbox(&state.tuning.player);
    if hits_boundary(&hitbox, state.viewport) {
        die(state, DeathCause::Boundary, store);
        return;
    }

    let pipe_width = state.tuning.gates.pipe_width;
    for slot in 0..GATE_POOL_SIZE {
        let gate = &state.gates.slots[slot];
        if !gate.active {
            continue;
        }

        if hits_gate(&hitbox, gate, pipe_width, state.viewport) {
            die(state, DeathCause::Gate { slot }, store);
            return;
        }

        if crosses_gate(state.body.pos.x, gate, pipe_width) {
            state.gates.slots[slot].passed = true;

            // Previous question still open at the next gate
            if state.quiz.is_active() {
                die(state, DeathCause::MissedQuestion { slot }, store);
                return;
            }

            let credit = state.score.record_pass(&state.tuning.scoring);
            state.emit(GameEvent::ScoreIncrement {
                trades: state.score.trades,
                credit,
            });
            state
                .quiz
                .generate(state.score.trades, slot, &mut state.rng);
        }
    }
}

/// Drop the question's gate link once its slot no longer holds that gate.
/// The originating gate is always passed; a respawn in the same slot is not.
fn unlink_recycled_gate(state: &mut GameState) {
    if let Some(slot) = state.quiz.linked_gate() {
        let gate = &state.gates.slots[slot];
        if !gate.active || !gate.passed {
            state.quiz.unlink_gate();
        }
    }
}

fn submit_answer(state: &mut GameState, key: AnswerKey) {
    match state.quiz.submit(key.index(), &state.tuning.quiz) {
        AnswerOutcome::Correct { gate, first_try } => {
            if let Some(slot) = gate {
                state.gates.slots[slot].question_answered = true;
            }
            state
                .score
                .record_correct(first_try, &state.tuning.scoring);
            state.emit(GameEvent::Correct { first_try });
        }
        AnswerOutcome::Wrong => {
            state.score.record_wrong(&state.tuning.scoring);
            state.emit(GameEvent::Wrong {
                penalty: state.tuning.scoring.wrong_penalty,
            });
        }
        AnswerOutcome::Locked => {}
    }
}

/// End the run. Commits a new high-water mark; store failures are ignored.
fn die(state: &mut GameState, cause: DeathCause, store: &mut dyn HighScoreStore) {
    state.phase = Phase::GameOver {
        death_timer_ms: 0.0,
    };
    log::info!(
        "Run over: {:?} after {} trades, P&L {:.2}",
        cause,
        state.score.trades,
        state.score.pnl
    );
    state.emit(GameEvent::Death { cause });

    if let Some(value) = state.score.commit_high_water() {
        state.emit(GameEvent::NewHighWater { value });
        if let Err(err) = store.save(value) {
            log::debug!("High-water mark not persisted: {err}");
        }
    }
}

fn update_game_over(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Phase::GameOver { death_timer_ms } = &mut state.phase {
        *death_timer_ms += dt * 1000.0;
    }

    state
        .body
        .fall(dt, &state.tuning.physics, state.viewport);

    if input.action && state.can_restart() {
        state.phase = Phase::menu();
        state.body.reset(state.viewport, &state.tuning.player);
        state.emit(GameEvent::ReturnedToMenu);
    }
}
