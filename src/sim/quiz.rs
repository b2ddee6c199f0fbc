//! Arithmetic quiz raised by every cleared gate
//!
//! Difficulty is tiered by trade count. Each question offers four distinct
//! options: the answer plus three near-miss distractors, shuffled.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::NUM_OPTIONS;
use crate::tuning::QuizTuning;

/// Fewest distinct candidates (answer included) gathered before picking distractors
const MIN_CANDIDATES: usize = 5;

/// A validated answer selection (keys 1 through 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKey(u8);

impl AnswerKey {
    pub fn new(key: u8) -> Option<Self> {
        (1..=NUM_OPTIONS as u8).contains(&key).then_some(Self(key))
    }

    /// 0-based option index
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

}

/// The arithmetic behind a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Add(i32, i32),
    Sub(i32, i32),
    Mul(i32, i32),
    /// a × b + c
    MulAdd(i32, i32, i32),
    /// a × b − c
    MulSub(i32, i32, i32),
}

impl Expression {
    pub fn value(&self) -> i32 {
        match *self {
            Expression::Add(a, b) => a + b,
            Expression::Sub(a, b) => a - b,
            Expression::Mul(a, b) => a * b,
            Expression::MulAdd(a, b, c) => a * b + c,
            Expression::MulSub(a, b, c) => a * b - c,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Expression::Add(a, b) => write!(f, "{a} + {b} = ?"),
            Expression::Sub(a, b) => write!(f, "{a} - {b} = ?"),
            Expression::Mul(a, b) => write!(f, "{a} × {b} = ?"),
            Expression::MulAdd(a, b, c) => write!(f, "{a} × {b} + {c} = ?"),
            Expression::MulSub(a, b, c) => write!(f, "{a} × {b} - {c} = ?"),
        }
    }
}

/// Difficulty bracket keyed by trade count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Add/sub, operands 1-10
    One,
    /// Add/sub/mul, operands 1-12
    Two,
    /// Add/sub 5-25 or mul 2-12
    Three,
    /// a × b ± c
    Four,
}

impl Tier {
    pub fn for_trades(trades: u32) -> Self {
        match trades {
            0..5 => Tier::One,
            5..10 => Tier::Two,
            10..20 => Tier::Three,
            _ => Tier::Four,
        }
    }
}

/// A live question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub expr: Expression,
    /// Prompt text, e.g. "7 × 8 = ?"
    pub prompt: String,
    pub options: [i32; NUM_OPTIONS],
    pub correct_index: usize,
    /// Pool slot of the gate whose pass raised this question. Cleared once
    /// that gate scrolls off and its slot may be reused.
    pub gate: Option<usize>,
    /// Wrong submissions so far
    pub wrong_attempts: u32,
}

impl Question {
    pub fn answer(&self) -> i32 {
        self.options[self.correct_index]
    }
}

/// Result of submitting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    /// Question cleared. `first_try` is false if any wrong attempt preceded it.
    Correct { gate: Option<usize>, first_try: bool },
    /// Mismatch; a lockout has started
    Wrong,
    /// No live question, or still locked out. Nothing changed.
    Locked,
}

/// Question lifecycle, lockout timing and accuracy stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizEngine {
    pub current: Option<Question>,
    /// Remaining lockout (ms)
    pub lockout_ms: f32,
    pub total_questions: u32,
    pub first_try_correct: u32,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_locked_out(&self) -> bool {
        self.lockout_ms > 0.0
    }

    /// Raise a new question for the gate in `gate_slot`, replacing any live one
    pub fn generate(&mut self, trades: u32, gate_slot: usize, rng: &mut Pcg32) -> &Question {
        let expr = generate_expression(Tier::for_trades(trades), rng);
        let (options, correct_index) = build_options(expr.value(), rng);

        self.lockout_ms = 0.0;
        self.total_questions += 1;
        self.current.insert(Question {
            expr,
            prompt: expr.to_string(),
            options,
            correct_index,
            gate: Some(gate_slot),
            wrong_attempts: 0,
        })
    }

    /// Slot of the gate the live question belongs to, if still linked
    pub fn linked_gate(&self) -> Option<usize> {
        self.current.as_ref().and_then(|q| q.gate)
    }

    /// Forget the originating gate. The question itself stays live.
    pub fn unlink_gate(&mut self) {
        if let Some(question) = self.current.as_mut() {
            question.gate = None;
        }
    }

    /// Count the lockout down by `dt_ms`
    pub fn tick_lockout(&mut self, dt_ms: f32) {
        if self.lockout_ms > 0.0 {
            self.lockout_ms = (self.lockout_ms - dt_ms).max(0.0);
        }
    }

    /// Submit an option index (0-based)
    pub fn submit(&mut self, index: usize, tuning: &QuizTuning) -> AnswerOutcome {
        if self.is_locked_out() {
            return AnswerOutcome::Locked;
        }
        let Some(question) = self.current.as_mut() else {
            return AnswerOutcome::Locked;
        };

        if index == question.correct_index {
            let first_try = question.wrong_attempts == 0;
            let gate = question.gate;
            if first_try {
                self.first_try_correct += 1;
            }
            self.current = None;
            AnswerOutcome::Correct { gate, first_try }
        } else {
            question.wrong_attempts += 1;
            self.lockout_ms = tuning.lockout_ms;
            AnswerOutcome::Wrong
        }
    }

    /// First-try accuracy in percent (100 before any question)
    pub fn accuracy(&self) -> u32 {
        if self.total_questions == 0 {
            return 100;
        }
        (100.0 * self.first_try_correct as f64 / self.total_questions as f64).round() as u32
    }
}

/// Order two operands so subtraction never goes negative
fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a < b { (b, a) } else { (a, b) }
}

fn add_or_sub(a: i32, b: i32, rng: &mut Pcg32) -> Expression {
    if rng.random_bool(0.5) {
        Expression::Add(a, b)
    } else {
        let (a, b) = ordered(a, b);
        Expression::Sub(a, b)
    }
}

/// Pick an expression for a tier
pub fn generate_expression(tier: Tier, rng: &mut Pcg32) -> Expression {
    match tier {
        Tier::One => {
            let a = rng.random_range(1..=10);
            let b = rng.random_range(1..=10);
            add_or_sub(a, b, rng)
        }
        Tier::Two => {
            let op: f32 = rng.random();
            let a = rng.random_range(1..=12);
            let b = rng.random_range(1..=12);
            if op < 0.33 {
                Expression::Add(a, b)
            } else if op < 0.66 {
                let (a, b) = ordered(a, b);
                Expression::Sub(a, b)
            } else {
                Expression::Mul(a, b)
            }
        }
        Tier::Three => {
            if rng.random_bool(0.4) {
                let a = rng.random_range(5..=25);
                let b = rng.random_range(5..=25);
                add_or_sub(a, b, rng)
            } else {
                Expression::Mul(rng.random_range(2..=12), rng.random_range(2..=12))
            }
        }
        Tier::Four => {
            let a = rng.random_range(2..=9);
            let b = rng.random_range(2..=9);
            let c = rng.random_range(1..=10);
            if rng.random_bool(0.5) {
                Expression::MulAdd(a, b, c)
            } else {
                Expression::MulSub(a, b, c)
            }
        }
    }
}

/// Build the shuffled option list for `correct`. Returns the options and the
/// index of the correct one.
pub fn build_options(correct: i32, rng: &mut Pcg32) -> ([i32; NUM_OPTIONS], usize) {
    let mut candidates = Vec::with_capacity(MIN_CANDIDATES + 2);
    for near in [correct + 1, correct - 1] {
        candidates.push(near);
    }
    while candidates.len() < MIN_CANDIDATES - 1 {
        let magnitude = rng.random_range(2..=5);
        let offset = if rng.random_bool(0.5) { magnitude } else { -magnitude };
        let value = correct + offset;
        if !candidates.contains(&value) {
            candidates.push(value);
        }
    }

    candidates.shuffle(rng);
    let mut options = [correct; NUM_OPTIONS];
    options[..NUM_OPTIONS - 1].copy_from_slice(&candidates[..NUM_OPTIONS - 1]);
    options.shuffle(rng);

    let correct_index = options.iter().position(|&v| v == correct).unwrap_or(NUM_OPTIONS - 1);
    (options, correct_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn assert_distinct_with_answer(options: &[i32; NUM_OPTIONS], correct_index: usize, answer: i32) {
        assert_eq!(options[correct_index], answer);
        for i in 0..NUM_OPTIONS {
            for j in (i + 1)..NUM_OPTIONS {
                assert_ne!(options[i], options[j], "duplicate option in {options:?}");
            }
        }
    }

    #[test]
    fn test_answer_key_range() {
        assert!(AnswerKey::new(0).is_none());
        assert_eq!(AnswerKey::new(1).map(AnswerKey::index), Some(0));
        assert_eq!(AnswerKey::new(4).map(AnswerKey::index), Some(3));
        assert!(AnswerKey::new(5).is_none());
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_trades(0), Tier::One);
        assert_eq!(Tier::for_trades(4), Tier::One);
        assert_eq!(Tier::for_trades(5), Tier::Two);
        assert_eq!(Tier::for_trades(9), Tier::Two);
        assert_eq!(Tier::for_trades(10), Tier::Three);
        assert_eq!(Tier::for_trades(19), Tier::Three);
        assert_eq!(Tier::for_trades(20), Tier::Four);
    }

    #[test]
    fn test_tier_operand_ranges() {
        let mut rng = rng();
        for _ in 0..500 {
            match generate_expression(Tier::One, &mut rng) {
                Expression::Add(a, b) | Expression::Sub(a, b) => {
                    assert!((1..=10).contains(&a) && (1..=10).contains(&b));
                }
                other => panic!("tier 1 produced {other:?}"),
            }
            match generate_expression(Tier::Two, &mut rng) {
                Expression::Add(a, b) | Expression::Sub(a, b) | Expression::Mul(a, b) => {
                    assert!((1..=12).contains(&a) && (1..=12).contains(&b));
                }
                other => panic!("tier 2 produced {other:?}"),
            }
            match generate_expression(Tier::Three, &mut rng) {
                Expression::Add(a, b) | Expression::Sub(a, b) => {
                    assert!((5..=25).contains(&a) && (5..=25).contains(&b));
                }
                Expression::Mul(a, b) => {
                    assert!((2..=12).contains(&a) && (2..=12).contains(&b));
                }
                other => panic!("tier 3 produced {other:?}"),
            }
            match generate_expression(Tier::Four, &mut rng) {
                Expression::MulAdd(a, b, c) | Expression::MulSub(a, b, c) => {
                    assert!((2..=9).contains(&a) && (2..=9).contains(&b));
                    assert!((1..=10).contains(&c));
                }
                other => panic!("tier 4 produced {other:?}"),
            }
        }
    }

    #[test]
    fn test_tier_two_eventually_multiplies() {
        let mut rng = rng();
        let saw_mul = (0..200)
            .any(|_| matches!(generate_expression(Tier::Two, &mut rng), Expression::Mul(..)));
        assert!(saw_mul);
    }

    #[test]
    fn test_prompt_text() {
        assert_eq!(Expression::Add(3, 4).to_string(), "3 + 4 = ?");
        assert_eq!(Expression::Sub(9, 2).to_string(), "9 - 2 = ?");
        assert_eq!(Expression::Mul(7, 8).to_string(), "7 × 8 = ?");
        assert_eq!(Expression::MulAdd(2, 3, 4).to_string(), "2 × 3 + 4 = ?");
        assert_eq!(Expression::MulSub(2, 3, 4).value(), 2);
    }

    #[test]
    fn test_generate_links_gate() {
        let mut quiz = QuizEngine::new();
        let mut rng = rng();
        let question = quiz.generate(0, 3, &mut rng);
        assert_eq!(question.gate, Some(3));
        assert_eq!(question.answer(), question.expr.value());
        assert_eq!(quiz.total_questions, 1);
        assert!(quiz.is_active());
    }

    #[test]
    fn test_unlinked_question_stays_live() {
        let tuning = QuizTuning::default();
        let mut quiz = QuizEngine::new();
        let mut rng = rng();
        let correct = quiz.generate(0, 2, &mut rng).correct_index;
        assert_eq!(quiz.linked_gate(), Some(2));

        quiz.unlink_gate();
        assert_eq!(quiz.linked_gate(), None);
        assert!(quiz.is_active());
        assert_eq!(
            quiz.submit(correct, &tuning),
            AnswerOutcome::Correct { gate: None, first_try: true }
        );
    }

    #[test]
    fn test_submit_without_question_is_locked() {
        let mut quiz = QuizEngine::new();
        assert_eq!(quiz.submit(0, &QuizTuning::default()), AnswerOutcome::Locked);
        assert_eq!(quiz.total_questions, 0);
    }

    #[test]
    fn test_correct_first_try() {
        let tuning = QuizTuning::default();
        let mut quiz = QuizEngine::new();
        let mut rng = rng();
        let correct = quiz.generate(0, 1, &mut rng).correct_index;

        assert_eq!(
            quiz.submit(correct, &tuning),
            AnswerOutcome::Correct { gate: Some(1), first_try: true }
        );
        assert!(!quiz.is_active());
        assert_eq!(quiz.first_try_correct, 1);
        assert_eq!(quiz.accuracy(), 100);
    }

    #[test]
    fn test_wrong_then_lockout_then_correct() {
        let tuning = QuizTuning::default();
        let mut quiz = QuizEngine::new();
        let mut rng = rng();
        let correct = quiz.generate(0, 0, &mut rng).correct_index;
        let wrong = (correct + 1) % NUM_OPTIONS;

        assert_eq!(quiz.submit(wrong, &tuning), AnswerOutcome::Wrong);
        assert!(quiz.is_locked_out());
        assert_eq!(quiz.current.as_ref().map(|q| q.wrong_attempts), Some(1));

        // Locked: even the right answer is rejected with no state change
        assert_eq!(quiz.submit(correct, &tuning), AnswerOutcome::Locked);
        assert!(quiz.is_active());

        quiz.tick_lockout(200.0);
        assert!(quiz.is_locked_out());
        quiz.tick_lockout(200.0);
        assert!(!quiz.is_locked_out());
        assert_eq!(quiz.lockout_ms, 0.0);

        assert_eq!(
            quiz.submit(correct, &tuning),
            AnswerOutcome::Correct { gate: Some(0), first_try: false }
        );
        assert_eq!(quiz.first_try_correct, 0);
        assert_eq!(quiz.accuracy(), 0);
    }

    #[test]
    fn test_accuracy_rounds() {
        let mut quiz = QuizEngine::new();
        assert_eq!(quiz.accuracy(), 100);
        quiz.total_questions = 3;
        quiz.first_try_correct = 2;
        assert_eq!(quiz.accuracy(), 67);
    }

    #[test]
    fn test_small_answers_allow_negative_distractors() {
        let mut rng = rng();
        let (options, idx) = build_options(0, &mut rng);
        assert_distinct_with_answer(&options, idx, 0);
    }

    #[test]
    fn test_subtraction_never_negative_in_low_tiers() {
        let mut rng = rng();
        for tier in [Tier::One, Tier::Two, Tier::Three] {
            for _ in 0..500 {
                assert!(generate_expression(tier, &mut rng).value() >= 0);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_options_distinct_and_contain_answer(seed in any::<u64>(), correct in -50i32..200) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (options, idx) = build_options(correct, &mut rng);
            assert_distinct_with_answer(&options, idx, correct);
            for v in options {
                prop_assert!((v - correct).abs() <= 5);
            }
        }

        #[test]
        fn prop_generated_questions_well_formed(seed in any::<u64>(), trades in 0u32..40) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut quiz = QuizEngine::new();
            let question = quiz.generate(trades, 0, &mut rng);
            assert_distinct_with_answer(&question.options, question.correct_index, question.expr.value());
            prop_assert_eq!(&question.prompt, &question.expr.to_string());
        }
    }
}
