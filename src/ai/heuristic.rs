use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game::{Board, Player, WIDTH};

use super::agent::Agent;

/// Which rule produced a column choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Playing here wins immediately.
    Win(usize),
    /// The opponent would win here next turn.
    Block(usize),
    /// No immediate win or threat; random start with linear probe.
    Fallback(usize),
}

impl Decision {
    pub fn column(self) -> usize {
        match self {
            Decision::Win(column) | Decision::Block(column) | Decision::Fallback(column) => column,
        }
    }
}

/// Seed derived from the wall clock, for one-per-process RNG setup.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Rule-based opponent: win now, else block, else a random playable column.
///
/// The block rule takes the first threatening column it finds and does not
/// look further, so two simultaneous threats are only half handled.
pub struct HeuristicAgent<R = StdRng> {
    rng: R,
}

impl HeuristicAgent<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        HeuristicAgent::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_clock() -> Self {
        Self::from_seed(clock_seed())
    }
}

impl<R: Rng> HeuristicAgent<R> {
    pub fn new(rng: R) -> Self {
        HeuristicAgent { rng }
    }

    /// Lowest column where a token for `player` completes a line.
    /// Every trial happens on a copy; `board` is never touched.
    pub fn winning_column(board: &Board, player: Player) -> Option<usize> {
        (0..WIDTH).find(|&column| {
            let mut trial = *board;
            trial.apply_move(player, column).is_ok() && trial.check_win(player)
        })
    }

    /// Apply the three rules in priority order.
    pub fn decide(&mut self, board: &Board, player: Player) -> Decision {
        if let Some(column) = Self::winning_column(board, player) {
            return Decision::Win(column);
        }
        if let Some(column) = Self::winning_column(board, player.other()) {
            return Decision::Block(column);
        }
        Decision::Fallback(self.probe_from_random_start(board))
    }

    fn probe_from_random_start(&mut self, board: &Board) -> usize {
        let start = self.rng.random_range(1..=WIDTH);
        let column = (0..WIDTH)
            .map(|offset| (start - 1 + offset) % WIDTH)
            .find(|&column| board.can_play(column));

        match column {
            Some(column) => column,
            None => panic!("no playable column; the caller must rule out a full board"),
        }
    }
}

impl<R: Rng> Agent for HeuristicAgent<R> {
    fn select_column(&mut self, board: &Board, player: Player) -> usize {
        let decision = self.decide(board, player);
        debug!(player = %player, ?decision, "heuristic chose column");
        decision.column()
    }

    fn name(&self) -> &str {
        "Heuristic"
    }
}
