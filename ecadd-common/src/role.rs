use serde::{de::DeserializeOwned, Serialize};
use serio::{stream::IoStreamExt, SinkExt};

use crate::Context;

/// The role of a participant.
///
/// Roles fix the message order of every symmetric exchange: the initiator sends first and then
/// receives, the responder receives first and then sends. With blocking channels this ordering
/// rules out both participants waiting on each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    /// Participant `0`.
    Initiator,
    /// Participant `1`.
    Responder,
}

impl Role {
    /// Returns the role of the participant with the given id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Role::Initiator),
            1 => Some(Role::Responder),
            _ => None,
        }
    }

    /// Returns the participant id.
    pub fn id(&self) -> u8 {
        match self {
            Role::Initiator => 0,
            Role::Responder => 1,
        }
    }

    /// Returns the role of the peer.
    pub fn peer(&self) -> Self {
        match self {
            Role::Initiator => Role::Responder,
            Role::Responder => Role::Initiator,
        }
    }
}

/// Sends `msg` to the peer and returns the peer's message, ordered by `role`.
pub async fn exchange<C, T>(ctx: &mut C, role: Role, msg: T) -> Result<T, std::io::Error>
where
    C: Context,
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let io = ctx.io_mut();
    match role {
        Role::Initiator => {
            io.send(msg).await?;
            io.expect_next().await
        }
        Role::Responder => {
            let peer = io.expect_next().await?;
            io.send(msg).await?;
            Ok(peer)
        }
    }
}
