use tokio::sync::mpsc;

use crate::config::Strategy;
use crate::error::TurnError;
use crate::game::{Board, Player};

use super::evaluator::Evaluator;
use super::human::{HumanAgent, MoveRequest};
use super::minimax::MinimaxAgent;
use super::random::RandomAgent;

/// What an agent hands back for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    /// Chosen column. `None` when a human interaction was cancelled or no
    /// legal column exists.
    pub column: Option<usize>,
    /// Search score attached to the move, for agents that compute one.
    pub score: Option<i32>,
}

/// The three move-proposing strategies, tagged by variant. Every agent
/// carries its player identity; only the human variant can suspend while
/// proposing.
pub enum Agent {
    Human(HumanAgent),
    Minimax(MinimaxAgent),
    Random(RandomAgent),
}

impl Agent {
    /// Construct an agent for a configured strategy. Human agents send
    /// their move requests through the shared `human_input` queue.
    pub fn build(
        strategy: Strategy,
        player: Player,
        depth: usize,
        human_input: &mpsc::UnboundedSender<MoveRequest>,
    ) -> Agent {
        match strategy {
            Strategy::Human => Agent::Human(HumanAgent::new(player, human_input.clone())),
            Strategy::Ai => Agent::Minimax(MinimaxAgent::new(player, depth)),
            Strategy::Random => Agent::Random(RandomAgent::new(player)),
        }
    }

    pub fn player(&self) -> Player {
        match self {
            Agent::Human(agent) => agent.player(),
            Agent::Minimax(agent) => agent.player(),
            Agent::Random(agent) => agent.player(),
        }
    }

    /// Short strategy name, matching the configuration vocabulary.
    pub fn strategy(&self) -> &'static str {
        match self {
            Agent::Human(_) => "human",
            Agent::Minimax(_) => "ai",
            Agent::Random(_) => "random",
        }
    }

    /// Display label combining identity and strategy, e.g. `Player 1:ai`.
    pub fn label(&self) -> String {
        format!("Player {}:{}", self.player().number(), self.strategy())
    }

    /// The evaluator backing this agent, if it has one. Used by the
    /// coordinator to score other players' moves for display.
    pub fn evaluator(&self) -> Option<&Evaluator> {
        match self {
            Agent::Minimax(agent) => Some(agent.evaluator()),
            _ => None,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Agent::Human(_))
    }

    /// Propose a move for the given position, suspending if the strategy
    /// needs external input.
    pub async fn propose(&mut self, board: &Board) -> Result<Proposal, TurnError> {
        match self {
            Agent::Human(agent) => Ok(Proposal {
                column: agent.propose(board).await?,
                score: None,
            }),
            Agent::Minimax(agent) => {
                let (score, column) = agent.choose_move(board);
                Ok(Proposal {
                    column,
                    score: Some(score),
                })
            }
            Agent::Random(agent) => Ok(Proposal {
                column: agent.choose(board),
                score: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_queue() -> (
        mpsc::UnboundedSender<MoveRequest>,
        mpsc::UnboundedReceiver<MoveRequest>,
    ) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn labels_combine_identity_and_strategy() {
        let (input, _rx) = input_queue();
        let ai = Agent::build(Strategy::Ai, Player::One, 5, &input);
        let random = Agent::build(Strategy::Random, Player::Two, 5, &input);
        let human = Agent::build(Strategy::Human, Player::One, 5, &input);

        assert_eq!(ai.label(), "Player 1:ai");
        assert_eq!(random.label(), "Player 2:random");
        assert_eq!(human.label(), "Player 1:human");
    }

    #[test]
    fn only_the_search_agent_exposes_an_evaluator() {
        let (input, _rx) = input_queue();
        assert!(Agent::build(Strategy::Ai, Player::One, 3, &input)
            .evaluator()
            .is_some());
        assert!(Agent::build(Strategy::Random, Player::One, 3, &input)
            .evaluator()
            .is_none());
        assert!(Agent::build(Strategy::Human, Player::One, 3, &input)
            .evaluator()
            .is_none());
    }

    #[tokio::test]
    async fn minimax_proposal_carries_a_score() {
        let (input, _rx) = input_queue();
        let mut agent = Agent::build(Strategy::Ai, Player::One, 2, &input);
        let proposal = agent.propose(&Board::new()).await.unwrap();
        assert!(proposal.column.is_some());
        assert!(proposal.score.is_some());
    }

    #[tokio::test]
    async fn random_proposal_is_legal() {
        let (input, _rx) = input_queue();
        let mut agent = Agent::build(Strategy::Random, Player::Two, 2, &input);
        let board = Board::new();
        for _ in 0..50 {
            let proposal = agent.propose(&board).await.unwrap();
            assert!(board.is_legal(proposal.column.unwrap()));
            assert_eq!(proposal.score, None);
        }
    }
}
