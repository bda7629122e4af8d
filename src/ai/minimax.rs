use tracing::debug;

use crate::game::{Board, Player};

use super::evaluator::Evaluator;

/// Score of an already-decided position. Dominates every heuristic score
/// so a forced win or loss is never mistaken for a merely good position.
pub const TERMINAL_SCORE: i32 = 1_000_000;

/// Alpha-beta minimax agent. The search is a pure function of
/// (board, depth, player): no randomness, no memoization, and repeated
/// calls on the same position return the same (score, column) pair.
pub struct MinimaxAgent {
    player: Player,
    depth: usize,
    evaluator: Evaluator,
}

impl MinimaxAgent {
    pub fn new(player: Player, depth: usize) -> Self {
        MinimaxAgent {
            player,
            depth,
            evaluator: Evaluator,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The evaluator this agent scores positions with. The coordinator
    /// borrows it to attach display scores to other players' moves.
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Search for the best column at the configured depth. Returns the
    /// best achievable score and the column achieving it; the column is
    /// `None` only when the position is already terminal.
    pub fn choose_move(&self, board: &Board) -> (i32, Option<usize>) {
        let (score, column) = self.minimax(board, self.depth, self.player, i32::MIN, i32::MAX);
        debug!(
            player = self.player.number(),
            depth = self.depth,
            score,
            ?column,
            "alpha-beta search finished"
        );
        (score, column)
    }

    fn minimax(
        &self,
        board: &Board,
        depth: usize,
        to_move: Player,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<usize>) {
        // Terminal checks come before expansion
        if let Some(winner) = board.winner() {
            let score = if winner == self.player {
                TERMINAL_SCORE
            } else {
                -TERMINAL_SCORE
            };
            return (score, None);
        }

        let legal = board.legal_columns();
        if legal.is_empty() || depth == 0 {
            return (self.evaluator.score(board, self.player), None);
        }

        // Ascending column order: ties break toward the lowest column
        let mut best_column = None;
        if to_move == self.player {
            let mut best = i32::MIN;
            for &col in &legal {
                let (next, _) = board
                    .drop_piece(col, to_move)
                    .expect("legal column accepts a piece");
                let (value, _) = self.minimax(&next, depth - 1, to_move.other(), alpha, beta);
                if value > best {
                    best = value;
                    best_column = Some(col);
                }
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_column)
        } else {
            let mut best = i32::MAX;
            for &col in &legal {
                let (next, _) = board
                    .drop_piece(col, to_move)
                    .expect("legal column accepts a piece");
                let (value, _) = self.minimax(&next, depth - 1, to_move.other(), alpha, beta);
                if value < best {
                    best = value;
                    best_column = Some(col);
                }
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from_moves(moves: &[usize]) -> Board {
        let mut board = Board::new();
        let mut turn = Player::One;
        for &col in moves {
            board = board.drop_piece(col, turn).unwrap().0;
            turn = turn.other();
        }
        board
    }

    /// Reference full minimax without pruning, same tie-break rule.
    fn full_minimax(
        board: &Board,
        depth: usize,
        me: Player,
        to_move: Player,
    ) -> (i32, Option<usize>) {
        if let Some(winner) = board.winner() {
            let score = if winner == me {
                TERMINAL_SCORE
            } else {
                -TERMINAL_SCORE
            };
            return (score, None);
        }
        let legal = board.legal_columns();
        if legal.is_empty() || depth == 0 {
            return (Evaluator.score(board, me), None);
        }

        let mut best_column = None;
        let mut best = if to_move == me { i32::MIN } else { i32::MAX };
        for &col in &legal {
            let next = board.drop_piece(col, to_move).unwrap().0;
            let (value, _) = full_minimax(&next, depth - 1, me, to_move.other());
            let improves = if to_move == me {
                value > best
            } else {
                value < best
            };
            if improves {
                best = value;
                best_column = Some(col);
            }
        }
        (best, best_column)
    }

    #[test]
    fn selects_legal_column() {
        let agent = MinimaxAgent::new(Player::One, 4);
        let board = Board::new();
        let (_, column) = agent.choose_move(&board);
        assert!(board.is_legal(column.unwrap()));
    }

    #[test]
    fn takes_winning_move() {
        // Player one has three in a row on the bottom; column 3 wins
        let board = board_from_moves(&[0, 0, 1, 1, 2, 2]);
        let agent = MinimaxAgent::new(Player::One, 4);
        let (score, column) = agent.choose_move(&board);
        assert_eq!(column, Some(3));
        assert_eq!(score, TERMINAL_SCORE);
    }

    #[test]
    fn immediate_win_found_at_depth_one() {
        // Three stacked in column 5; the fourth wins vertically
        let board = board_from_moves(&[5, 0, 5, 1, 5, 2]);
        let agent = MinimaxAgent::new(Player::One, 1);
        let (score, column) = agent.choose_move(&board);
        assert_eq!(column, Some(5));
        assert_eq!(score, TERMINAL_SCORE);
    }

    #[test]
    fn blocks_opponent_win() {
        // Player two owns the bottom row at columns 0..=2; player one must
        // play column 3
        let board = board_from_moves(&[6, 0, 6, 1, 5, 2]);
        let agent = MinimaxAgent::new(Player::One, 4);
        let (_, column) = agent.choose_move(&board);
        assert_eq!(column, Some(3));
    }

    #[test]
    fn prefers_win_over_block() {
        // Both players hold three in a row through column 3; the mover
        // should take its own win rather than block
        let board = board_from_moves(&[0, 0, 1, 1, 2, 2]);
        let agent = MinimaxAgent::new(Player::One, 4);
        let (score, column) = agent.choose_move(&board);
        assert_eq!(column, Some(3));
        assert_eq!(score, TERMINAL_SCORE);
    }

    #[test]
    fn tie_breaks_toward_lowest_column() {
        // Player one can complete the bottom row four at either end:
        // columns 0 and 4 both win, so column 0 must be chosen
        let board = board_from_moves(&[1, 1, 2, 2, 3, 3]);
        let agent = MinimaxAgent::new(Player::One, 2);
        let (score, column) = agent.choose_move(&board);
        assert_eq!(score, TERMINAL_SCORE);
        assert_eq!(column, Some(0));
    }

    #[test]
    fn search_is_deterministic() {
        let board = board_from_moves(&[3, 3, 2, 4, 0, 6]);
        let agent = MinimaxAgent::new(Player::One, 5);
        let first = agent.choose_move(&board);
        for _ in 0..5 {
            assert_eq!(agent.choose_move(&board), first);
        }
    }

    #[test]
    fn pruning_matches_full_minimax() {
        let boards = [
            Board::new(),
            board_from_moves(&[3, 3, 2, 4, 5, 1]),
            board_from_moves(&[0, 1, 2, 3, 4, 5, 6, 0, 1, 2]),
            board_from_moves(&[3, 2, 3, 2, 4, 4, 6, 5]),
            board_from_moves(&[6, 0, 6, 1, 5, 2]),
        ];
        for depth in 1..=4 {
            for board in &boards {
                for player in [Player::One, Player::Two] {
                    let agent = MinimaxAgent::new(player, depth);
                    let pruned = agent.choose_move(board);
                    let full = full_minimax(board, depth, player, player);
                    assert_eq!(
                        pruned, full,
                        "pruned and full search disagree at depth {depth} for {player} on\n{board}"
                    );
                }
            }
        }
    }

    #[test]
    fn full_game_vs_self_completes() {
        let one = MinimaxAgent::new(Player::One, 3);
        let two = MinimaxAgent::new(Player::Two, 3);
        let mut board = Board::new();
        let mut turn = Player::One;
        let mut moves = 0;

        while board.winner().is_none() && !board.is_full() {
            let agent = if turn == Player::One { &one } else { &two };
            let (_, column) = agent.choose_move(&board);
            board = board.drop_piece(column.unwrap(), turn).unwrap().0;
            turn = turn.other();
            moves += 1;
            assert!(moves <= 42);
        }
    }
}
