use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::ai::{Agent, Evaluator};
use crate::error::TurnError;
use crate::game::{Board, Player};

use super::status::Status;

/// Upper bound on attempts to obtain a legal column from the random
/// agent before the turn is abandoned.
const MAX_MOVE_ATTEMPTS: usize = 100;
/// Each displayed score moves this fraction of the way toward the new
/// evaluation after every non-terminal move.
const SCORE_SMOOTHING: f64 = 0.3;
/// Both displayed scores snap to this magnitude when the game is won.
const FINAL_SCORE: f64 = 400.0;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

/// The turn coordinator. Owns the authoritative board and drives the
/// game's state machine: await a move from the active agent (suspending
/// for human input), validate and apply it, attach a display score,
/// check terminal conditions, and advance the turn. Once terminal, no
/// further moves are accepted until [`GameSession::reset`].
pub struct GameSession {
    board: Board,
    turn: Player,
    outcome: Option<Outcome>,
    player_one_score: f64,
    player_two_score: f64,
    agents: [Agent; 2],
    status: mpsc::UnboundedSender<Status>,
    move_delay: Duration,
}

impl GameSession {
    /// Create a fresh game. `move_delay` paces non-human agents so their
    /// moves remain watchable; it has no effect on correctness.
    pub fn new(
        player_one: Agent,
        player_two: Agent,
        status: mpsc::UnboundedSender<Status>,
        move_delay: Duration,
    ) -> Self {
        debug_assert_eq!(player_one.player(), Player::One);
        debug_assert_eq!(player_two.player(), Player::Two);
        GameSession {
            board: Board::new(),
            turn: Player::One,
            outcome: None,
            player_one_score: 0.0,
            player_two_score: 0.0,
            agents: [player_one, player_two],
            status,
            move_delay,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Displayed confidence scores, player one first.
    pub fn scores(&self) -> (f64, f64) {
        (self.player_one_score, self.player_two_score)
    }

    /// Start a fresh game: empty board, player one to move, scores reset.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Player::One;
        self.outcome = None;
        self.player_one_score = 0.0;
        self.player_two_score = 0.0;
    }

    /// Drive turns until the game ends and return the outcome.
    pub async fn play(&mut self) -> Result<Outcome, TurnError> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.step().await?;
        }
    }

    /// Run one full turn: announce, obtain a move from the active agent,
    /// apply it, and update scores and terminal state.
    pub async fn step(&mut self) -> Result<(), TurnError> {
        if self.outcome.is_some() {
            return Err(TurnError::GameOver);
        }

        let turn = self.turn;
        let label = self.agents[turn.index()].label();
        self.emit(Status::Turn { label });

        let (column, search_score) = self.obtain_move(turn).await?;
        self.apply_move(turn, column, search_score);
        Ok(())
    }

    /// Obtain a legal column from the agent whose identity is `turn`.
    ///
    /// Illegal human input is recovered locally: the request is simply
    /// reissued without advancing the game. An illegal column from a
    /// non-human agent is a defect in that agent's own legality
    /// accounting; the turn fails and no substitute move is played.
    async fn obtain_move(&mut self, turn: Player) -> Result<(usize, Option<i32>), TurnError> {
        let board = self.board;
        let delay = self.move_delay;
        let agent = &mut self.agents[turn.index()];

        if !agent.is_human() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match agent {
            Agent::Human(human) => loop {
                match human.propose(&board).await? {
                    None => {
                        debug!(
                            player = turn.number(),
                            "move request cancelled; still awaiting input"
                        );
                    }
                    Some(column) if !board.is_legal(column) => {
                        debug!(
                            player = turn.number(),
                            column, "ignoring illegal human move"
                        );
                    }
                    Some(column) => return Ok((column, None)),
                }
            },
            Agent::Random(random) => {
                for attempt in 1..=MAX_MOVE_ATTEMPTS {
                    match random.choose(&board) {
                        Some(column) if board.is_legal(column) => return Ok((column, None)),
                        Some(column) => {
                            warn!(
                                player = turn.number(),
                                column, attempt, "random agent proposed a full column"
                            );
                        }
                        None => {}
                    }
                }
                error!(
                    player = turn.number(),
                    "random agent exhausted its attempts; the board should have been terminal"
                );
                Err(TurnError::RandomAgentExhausted {
                    attempts: MAX_MOVE_ATTEMPTS,
                })
            }
            Agent::Minimax(search) => {
                let (score, column) = search.choose_move(&board);
                match column {
                    Some(column) if board.is_legal(column) => Ok((column, Some(score))),
                    Some(column) => {
                        error!(
                            player = turn.number(),
                            column, "search agent proposed an illegal move"
                        );
                        Err(TurnError::IllegalAgentMove {
                            player: turn,
                            strategy: "ai",
                            column,
                            legal: board.legal_columns(),
                        })
                    }
                    None => {
                        error!(player = turn.number(), "search agent proposed no move");
                        Err(TurnError::NoMoveProposed {
                            player: turn,
                            strategy: "ai",
                        })
                    }
                }
            }
        }
    }

    /// Apply a validated move, attach a display score, and resolve the
    /// turn's terminal checks.
    fn apply_move(&mut self, mover: Player, column: usize, search_score: Option<i32>) {
        let (next, _) = self
            .board
            .drop_piece(column, mover)
            .expect("column was validated as legal");
        self.board = next;

        if let Some(winner) = self.board.winner() {
            self.outcome = Some(Outcome::Winner(winner));
            self.player_one_score = if winner == Player::One {
                FINAL_SCORE
            } else {
                -FINAL_SCORE
            };
            self.player_two_score = -self.player_one_score;
            self.emit(Status::win(winner));
        } else if self.board.is_full() {
            // Tie: both scores keep their last smoothed values
            self.outcome = Some(Outcome::Tie);
            self.emit(Status::tie());
        } else {
            let score = match search_score {
                Some(score) => score,
                None => self.display_score(mover),
            };
            self.smooth_scores(mover, score);
            self.emit(Status::Scores {
                player_one: self.player_one_score,
                player_two: self.player_two_score,
            });
            self.turn = mover.other();
        }
    }

    /// Score the current board from the mover's perspective using the
    /// opponent agent's evaluator, or a transient one when the opponent
    /// has none.
    fn display_score(&self, mover: Player) -> i32 {
        match self.agents[mover.other().index()].evaluator() {
            Some(evaluator) => evaluator.score(&self.board, mover),
            None => Evaluator::default().score(&self.board, mover),
        }
    }

    fn smooth_scores(&mut self, mover: Player, score: i32) {
        let signed = match mover {
            Player::One => score as f64,
            Player::Two => -(score as f64),
        };
        self.player_one_score =
            self.player_one_score * (1.0 - SCORE_SMOOTHING) + signed * SCORE_SMOOTHING;
        self.player_two_score =
            self.player_two_score * (1.0 - SCORE_SMOOTHING) - signed * SCORE_SMOOTHING;
    }

    /// The feed is display-only; a disconnected receiver is not an error.
    fn emit(&self, status: Status) {
        let _ = self.status.send(status);
    }
}
