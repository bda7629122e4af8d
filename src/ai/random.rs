use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::{Board, Player};

/// An agent that picks uniformly among the legal columns. Sampling only
/// from columns already known to be legal guarantees termination without
/// retry loops.
pub struct RandomAgent {
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(player: Player) -> Self {
        RandomAgent {
            player,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for tests and reproducible matches.
    pub fn seeded(player: Player, seed: u64) -> Self {
        RandomAgent {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Pick a legal column, or `None` when the board is full.
    pub fn choose(&mut self, board: &Board) -> Option<usize> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.random_range(0..legal.len())])
    }
}
