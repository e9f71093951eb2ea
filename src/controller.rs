//! Turn orchestration: the human always plays Player 1, the agent Player 2.

use tracing::{info, warn};

use crate::ai::Agent;
use crate::error::{InputError, PlayError};
use crate::game::{Board, GameState, MoveError, Player, TurnOutcome, WIDTH};
use crate::ui::Frontend;

pub const HUMAN: Player = Player::Player1;
pub const AUTOMATED: Player = Player::Player2;

/// Results carried across restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub human_wins: u32,
    pub automated_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::Win(Player::Player1) => self.human_wins += 1,
            TurnOutcome::Win(Player::Player2) => self.automated_wins += 1,
            TurnOutcome::Draw => self.draws += 1,
            TurnOutcome::Continue => {}
        }
    }

    pub fn games(&self) -> u32 {
        self.human_wins + self.automated_wins + self.draws
    }
}

/// Announcement shown when a game ends.
pub fn outcome_message(outcome: TurnOutcome) -> Option<String> {
    match outcome {
        TurnOutcome::Win(player) => Some(format!("{player} wins!")),
        TurnOutcome::Draw => Some("It's a draw!".to_string()),
        TurnOutcome::Continue => None,
    }
}

pub struct Controller<A> {
    state: GameState,
    agent: A,
    score: Scoreboard,
}

impl<A: Agent> Controller<A> {
    pub fn new(agent: A) -> Self {
        Controller {
            state: GameState::initial(),
            agent,
            score: Scoreboard::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    /// Empty the board and hand the first move back to the human.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Apply the human's move. A rejected move leaves the game untouched.
    pub fn play_human(&mut self, column: usize) -> Result<TurnOutcome, MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if self.state.current_player() != HUMAN {
            return Err(MoveError::NotYourTurn(HUMAN));
        }

        let outcome = self.state.play(column)?;
        self.score.record(outcome);
        Ok(outcome)
    }

    /// Let the agent move for Player 2.
    ///
    /// The agent only ever sees a board with a free column, so a rejected
    /// choice is a bug in the agent and ends the loop.
    pub fn play_automated(&mut self) -> Result<TurnOutcome, PlayError> {
        if self.state.is_terminal() {
            return Ok(self.state.outcome());
        }
        if self.state.current_player() != AUTOMATED {
            return Err(PlayError::OutOfTurn(AUTOMATED));
        }

        let column = self.agent.select_column(self.state.board(), AUTOMATED);
        let outcome = self
            .state
            .play(column)
            .map_err(|source| PlayError::SelectorDefect {
                agent: self.agent.name().to_string(),
                column,
                source,
            })?;
        self.score.record(outcome);
        Ok(outcome)
    }

    /// Play games until the frontend runs out of input.
    pub fn run<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> Result<(), PlayError> {
        loop {
            let Some(outcome) = self.play_game(frontend)? else {
                return Ok(());
            };
            if !self.finish_game(frontend, outcome)? {
                return Ok(());
            }
        }
    }

    /// Alternate human and agent turns until the game ends.
    /// `None` means the input closed mid-game.
    fn play_game<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<Option<TurnOutcome>, PlayError> {
        loop {
            frontend.render(self.board(), &self.score)?;

            let Some(outcome) = self.human_turn(frontend)? else {
                return Ok(None);
            };
            if outcome.is_terminal() {
                return Ok(Some(outcome));
            }

            let outcome = self.play_automated()?;
            if outcome.is_terminal() {
                return Ok(Some(outcome));
            }
        }
    }

    /// Prompt until the human makes a legal move.
    fn human_turn<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<Option<TurnOutcome>, PlayError> {
        loop {
            let requested = match frontend.request_column(self.board()) {
                Ok(Some(requested)) => requested,
                Ok(None) => {
                    frontend.notify(&invalid_input_message())?;
                    continue;
                }
                Err(InputError::Exhausted) => return Ok(None),
                Err(InputError::Io(err)) => return Err(PlayError::Input(err)),
            };

            // Frontends report columns 1-indexed
            let Some(column) = requested.checked_sub(1) else {
                frontend.notify(&invalid_input_message())?;
                continue;
            };

            match self.play_human(column) {
                Ok(outcome) => return Ok(Some(outcome)),
                Err(err) => {
                    warn!(column = requested, %err, "rejected move");
                    frontend.notify(&err.to_string())?;
                }
            }
        }
    }

    /// Show the result, wait for the player, then reset.
    /// Returns false when the player closed the input instead of confirming.
    fn finish_game<F: Frontend + ?Sized>(
        &mut self,
        frontend: &mut F,
        outcome: TurnOutcome,
    ) -> Result<bool, PlayError> {
        info!(
            ?outcome,
            moves = self.board().move_count(),
            games = self.score.games(),
            "game over"
        );

        frontend.render(self.board(), &self.score)?;
        if let Some(message) = outcome_message(outcome) {
            frontend.notify(&message)?;
        }
        if outcome == TurnOutcome::Win(AUTOMATED) {
            frontend.alert()?;
        }

        let confirmed = match frontend.acknowledge() {
            Ok(()) => true,
            Err(InputError::Exhausted) => false,
            Err(InputError::Io(err)) => return Err(PlayError::Input(err)),
        };

        self.reset();
        Ok(confirmed)
    }
}

fn invalid_input_message() -> String {
    format!("Invalid input. Please enter a column number between 1 and {WIDTH}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::HeuristicAgent;
    use crate::game::Cell;

    /// Plays a fixed list of columns in order.
    struct ScriptedAgent {
        columns: Vec<usize>,
        next: usize,
    }

    impl ScriptedAgent {
        fn new(columns: &[usize]) -> Self {
            ScriptedAgent {
                columns: columns.to_vec(),
                next: 0,
            }
        }
    }

    impl Agent for ScriptedAgent {
        fn select_column(&mut self, _board: &Board, _player: Player) -> usize {
            let column = self.columns[self.next];
            self.next += 1;
            column
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    const DRAW_SEQUENCE: [usize; 42] = [
        3, 4, 4, 6, 0, 3, 5, 2, 6, 5, 0, 6, 5, 0, 3, 6, 5, 6, 1, 3, 1, 3, 6, 5, 2, 0, 5, 3, 4,
        4, 0, 1, 1, 1, 0, 1, 4, 2, 4, 2, 2, 2,
    ];

    #[test]
    fn test_human_then_agent() {
        let mut controller = Controller::new(ScriptedAgent::new(&[6]));
        assert_eq!(controller.play_human(3), Ok(TurnOutcome::Continue));
        assert_eq!(controller.state().current_player(), AUTOMATED);
        assert_eq!(controller.play_human(3), Err(MoveError::NotYourTurn(HUMAN)));

        assert_eq!(controller.play_automated().unwrap(), TurnOutcome::Continue);
        assert_eq!(controller.board().cell_at(0, 6), Ok(Cell::Player2));
        assert_eq!(controller.state().current_player(), HUMAN);
    }

    #[test]
    fn test_rejected_human_move_keeps_state() {
        let mut controller = Controller::new(ScriptedAgent::new(&[1, 1, 1]));
        for _ in 0..3 {
            controller.play_human(0).unwrap();
            controller.play_automated().unwrap();
        }
        let before = *controller.state();

        assert_eq!(controller.play_human(7), Err(MoveError::ColumnOutOfRange(7)));
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_vertical_human_win() {
        let mut controller = Controller::new(ScriptedAgent::new(&[1, 2, 1]));
        for _ in 0..3 {
            assert_eq!(controller.play_human(0), Ok(TurnOutcome::Continue));
            assert_eq!(controller.play_automated().unwrap(), TurnOutcome::Continue);
        }

        assert_eq!(controller.play_human(0), Ok(TurnOutcome::Win(HUMAN)));
        assert!(controller.board().check_win(HUMAN));
        assert_eq!(controller.board().column_height(0), Ok(4));
        assert_eq!(controller.score().human_wins, 1);
        assert_eq!(controller.play_human(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_full_board_is_a_draw() {
        let human: Vec<usize> = DRAW_SEQUENCE.iter().step_by(2).copied().collect();
        let agent: Vec<usize> = DRAW_SEQUENCE.iter().skip(1).step_by(2).copied().collect();
        let mut controller = Controller::new(ScriptedAgent::new(&agent));

        let mut last = TurnOutcome::Continue;
        for column in human {
            assert_eq!(controller.play_human(column), Ok(TurnOutcome::Continue));
            last = controller.play_automated().unwrap();
        }

        assert_eq!(last, TurnOutcome::Draw);
        assert!(controller.board().is_full());
        assert_eq!(controller.score().draws, 1);
        assert_eq!(controller.score().games(), 1);
    }

    #[test]
    fn test_heuristic_games_terminate() {
        for seed in 0..20 {
            let mut controller = Controller::new(HeuristicAgent::from_seed(seed));
            let mut human = HeuristicAgent::from_seed(seed + 1000);

            let outcome = loop {
                let column = human.select_column(controller.board(), HUMAN);
                let outcome = controller.play_human(column).unwrap();
                if outcome.is_terminal() {
                    break outcome;
                }

                let can_win = HeuristicAgent::<rand::rngs::StdRng>::winning_column(
                    controller.board(),
                    AUTOMATED,
                )
                .is_some();
                let outcome = controller.play_automated().unwrap();
                if can_win {
                    assert_eq!(outcome, TurnOutcome::Win(AUTOMATED));
                }
                if outcome.is_terminal() {
                    break outcome;
                }
            };

            assert_eq!(controller.score().games(), 1);
            if outcome == TurnOutcome::Draw {
                assert!(controller.board().is_full());
            }
        }
    }

    #[test]
    fn test_selector_defect_is_reported() {
        let mut controller = Controller::new(ScriptedAgent::new(&[9]));
        controller.play_human(0).unwrap();

        match controller.play_automated() {
            Err(PlayError::SelectorDefect { column, source, .. }) => {
                assert_eq!(column, 9);
                assert_eq!(source, MoveError::ColumnOutOfRange(9));
            }
            other => panic!("expected a selector defect, got {other:?}"),
        }
    }

    #[test]
    fn test_automated_out_of_turn() {
        let mut controller = Controller::new(ScriptedAgent::new(&[]));
        assert!(matches!(
            controller.play_automated(),
            Err(PlayError::OutOfTurn(AUTOMATED))
        ));
    }

    #[test]
    fn test_reset_keeps_score() {
        let mut controller = Controller::new(ScriptedAgent::new(&[1, 1, 1]));
        for _ in 0..3 {
            controller.play_human(0).unwrap();
            controller.play_automated().unwrap();
        }
        controller.play_human(0).unwrap();
        controller.reset();

        assert_eq!(*controller.state(), GameState::initial());
        assert_eq!(controller.score().human_wins, 1);
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(
            outcome_message(TurnOutcome::Win(Player::Player1)).as_deref(),
            Some("Player 1 wins!")
        );
        assert_eq!(
            outcome_message(TurnOutcome::Draw).as_deref(),
            Some("It's a draw!")
        );
        assert_eq!(outcome_message(TurnOutcome::Continue), None);
    }
}
