use tokio::sync::{mpsc, oneshot};

use crate::error::TurnError;
use crate::game::{Board, Player};

/// One pending request for a human move.
///
/// The request resolves at most once: `resolve` and `cancel` consume it,
/// so a double resolution is impossible rather than merely rejected.
/// Dropping the request unresolved counts as a cancellation; the
/// coordinator stays on the same turn and issues a fresh request.
#[derive(Debug)]
pub struct MoveRequest {
    player: Player,
    board: Board,
    reply: oneshot::Sender<Option<usize>>,
}

impl MoveRequest {
    /// Whose move is being requested.
    pub fn player(&self) -> Player {
        self.player
    }

    /// The position the move is for.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Answer the request with a chosen column.
    pub fn resolve(self, column: usize) {
        let _ = self.reply.send(Some(column));
    }

    /// Decline the request; the coordinator keeps awaiting this turn.
    pub fn cancel(self) {
        let _ = self.reply.send(None);
    }
}

/// The human-backed agent. Decision logic only: each proposal ships a
/// [`MoveRequest`] to whatever presentation layer drains the queue and
/// suspends until that single request is answered.
pub struct HumanAgent {
    player: Player,
    requests: mpsc::UnboundedSender<MoveRequest>,
}

impl HumanAgent {
    pub fn new(player: Player, requests: mpsc::UnboundedSender<MoveRequest>) -> Self {
        HumanAgent { player, requests }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Request a column from the presentation layer and suspend until it
    /// answers. `Ok(None)` means the interaction was cancelled and the
    /// caller should request again; a closed queue means no presentation
    /// layer is listening at all, which fails the turn.
    pub async fn propose(&self, board: &Board) -> Result<Option<usize>, TurnError> {
        let (reply, response) = oneshot::channel();
        let request = MoveRequest {
            player: self.player,
            board: *board,
            reply,
        };
        self.requests
            .send(request)
            .map_err(|_| TurnError::InputClosed)?;

        // A dropped request reads the same as an explicit cancel
        Ok(response.await.ok().flatten())
    }
}
