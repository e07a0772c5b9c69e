//! In-process rendezvous bridge
//!
//! Two one-slot mailboxes stand in for the agent's duplex text channel:
//! `to_agent` carries what the simulated host writes, `from_agent` what the agent
//! answers. Each mailbox holds at most one unread message, so the two sides move
//! in strict alternation exactly as over a live pipe.
//!
//! Dropping either endpoint closes both mailboxes. The peer still receives any
//! message already posted and then sees [`BridgeError::Closed`].

use std::sync::Arc;
use std::time::Duration;

use kalah_search::Side;

use crate::channel::MessageChannel;
use crate::error::BridgeResult;
use crate::mailbox::Mailbox;

struct Mailboxes {
    to_agent: Mailbox<String>,
    from_agent: Mailbox<String>,
}

impl Mailboxes {
    fn close(&self) {
        self.to_agent.close();
        self.from_agent.close();
    }
}

pub struct Bridge;

impl Bridge {
    /// Create connected endpoints. `side` is the side the agent starts on.
    pub fn pair(side: Side) -> (AgentEndpoint, HostEndpoint) {
        let mailboxes = Arc::new(Mailboxes {
            to_agent: Mailbox::new(),
            from_agent: Mailbox::new(),
        });
        (
            AgentEndpoint {
                mailboxes: Arc::clone(&mailboxes),
            },
            HostEndpoint { mailboxes, side },
        )
    }
}

/// The agent's end. Plugs into the agent's message loop as a [`MessageChannel`].
pub struct AgentEndpoint {
    mailboxes: Arc<Mailboxes>,
}

impl AgentEndpoint {
    pub fn recv_timeout(&self, timeout: Duration) -> BridgeResult<Option<String>> {
        self.mailboxes.to_agent.receive_timeout(timeout)
    }
}

impl MessageChannel for AgentEndpoint {
    fn send_msg(&mut self, msg: &str) -> BridgeResult<()> {
        log::trace!("agent -> host: {msg}");
        self.mailboxes.from_agent.send(msg.to_string())
    }

    fn recv_msg(&mut self) -> BridgeResult<String> {
        self.mailboxes.to_agent.receive()
    }
}

impl Drop for AgentEndpoint {
    fn drop(&mut self) {
        self.mailboxes.close();
    }
}

/// The simulator's end, playing the match host
pub struct HostEndpoint {
    mailboxes: Arc<Mailboxes>,
    side: Side,
}

impl HostEndpoint {
    /// Deliver a message to the agent. Waits until the agent has read the previous one.
    pub fn send(&self, msg: impl Into<String>) -> BridgeResult<()> {
        let msg = msg.into();
        log::trace!("host -> agent: {msg}");
        self.mailboxes.to_agent.send(msg)
    }

    /// Wait for the agent's next message
    pub fn recv(&self) -> BridgeResult<String> {
        self.mailboxes.from_agent.receive()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> BridgeResult<Option<String>> {
        self.mailboxes.from_agent.receive_timeout(timeout)
    }

    /// Side the bridged agent currently plays
    pub fn side(&self) -> Side {
        self.side
    }

    /// The agent switched sides (pie rule swap)
    pub fn change_side(&mut self) {
        self.side = self.side.opposite();
        log::debug!("bridged agent now plays {}", self.side);
    }
}

impl Drop for HostEndpoint {
    fn drop(&mut self) {
        self.mailboxes.close();
    }
}
