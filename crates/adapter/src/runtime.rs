//! Adapter runtime integration.
//!
//! Bridges the single-threaded game loop with the async TCP server. The game
//! loop polls [`Adapter::try_recv`] for commands, applies them through its
//! controller, and answers with [`Adapter::ack`] / [`Adapter::broadcast`].

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};

use crate::core::{CoreError, Outcome, SessionSnapshot};
use crate::protocol::{build_observation, create_ack, create_error, ErrorCode, ObservationMessage};
use crate::protocol::{AckMessage, ErrorMessage};
use crate::server::{run_server_with_state, ServerConfig, ServerState};
use crate::types::GameAction;

/// Command delivered to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundCommand {
    pub client_id: u64,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundPayload {
    /// Apply an action, then ack
    Action(GameAction),
    /// A client just said hello and wants the current state
    SnapshotRequest,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    Ack { client_id: u64, ack: AckMessage },
    Error { client_id: u64, err: ErrorMessage },
    Observation { client_id: u64, obs: ObservationMessage },
    BroadcastObservation { obs: ObservationMessage },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    state: Arc<ServerState>,
    local_addr: SocketAddr,
    obs_seq: u64,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns `Ok(None)` if `SUMTEN_AI_DISABLED` is set.
    pub fn start_from_env(cell_size: u32) -> Result<Option<Self>> {
        if ServerConfig::is_disabled() {
            eprintln!("[Adapter] AI control disabled via SUMTEN_AI_DISABLED");
            return Ok(None);
        }
        let config = ServerConfig::from_env().with_cell_size(cell_size);
        Self::start(config).map(Some)
    }

    /// Bind and serve on a private tokio runtime. Fails if the port cannot be bound.
    pub fn start(config: ServerConfig) -> Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let (ready_tx, ready_rx) = oneshot::channel();

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let state = Arc::new(ServerState::new(config));

        {
            let state = Arc::clone(&state);
            rt.spawn(async move {
                if let Err(e) = run_server_with_state(state, cmd_tx, out_rx, Some(ready_tx)).await {
                    eprintln!("[Adapter] Server stopped: {:#}", e);
                }
            });
        }

        let local_addr = rt
            .block_on(async { tokio::time::timeout(Duration::from_secs(2), ready_rx).await })
            .map_err(|_| anyhow!("adapter did not start listening within 2s"))?
            .map_err(|_| anyhow!("adapter failed to start"))?;

        Ok(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            state,
            local_addr,
            obs_seq: 0,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn client_count(&self) -> usize {
        self.state.client_count()
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    /// Report the result of applying a client's command.
    pub fn ack(&self, cmd: &InboundCommand, result: &Result<Outcome, CoreError>) {
        let msg = match result {
            Ok(outcome) => OutboundMessage::Ack {
                client_id: cmd.client_id,
                ack: create_ack(cmd.seq, outcome),
            },
            Err(e) => OutboundMessage::Error {
                client_id: cmd.client_id,
                err: create_error(cmd.seq, ErrorCode::InvalidCommand, &e.to_string()),
            },
        };
        self.send(msg);
    }

    /// Stream the current state to every subscribed client.
    pub fn broadcast(&mut self, snap: &SessionSnapshot) {
        let obs = build_observation(snap, self.next_obs_seq());
        self.send(OutboundMessage::BroadcastObservation { obs });
    }

    /// Send the current state to one client.
    pub fn send_snapshot(&mut self, client_id: u64, snap: &SessionSnapshot) {
        let obs = build_observation(snap, self.next_obs_seq());
        self.send(OutboundMessage::Observation { client_id, obs });
    }

    fn next_obs_seq(&mut self) -> u64 {
        self.obs_seq += 1;
        self.obs_seq
    }
}
