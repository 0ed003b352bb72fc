// src/client/event_loop.rs

//! Contains the main client loop: poll the socket, reassemble frames, drain
//! the inbound queue through the dispatcher, and reconnect on loss.

use super::dispatcher::Dispatcher;
use crate::config::Config;
use crate::connection::{Connection, ReadOutcome};
use crate::core::protocol::LineReassembler;
use crate::core::{OutboundCommand, RelayError};
use anyhow::Result;
use std::collections::VecDeque;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{info, trace, warn};

/// The driver aggregate: owns the dispatcher, the reassembler, and the
/// inbound queue. Single task of control, so the queue needs no locking.
#[derive(Debug)]
pub struct Client {
    config: Config,
    dispatcher: Dispatcher,
    reassembler: LineReassembler,
    inbound: VecDeque<String>,
}

impl Client {
    pub fn new(config: Config) -> Self {
        let dispatcher = Dispatcher::new(&config.rules);
        Self {
            config,
            dispatcher,
            reassembler: LineReassembler::new(),
            inbound: VecDeque::new(),
        }
    }

    /// Runs the connect/poll/dispatch loop until `shutdown_rx` fires.
    ///
    /// There is no terminal state in normal operation: connection loss goes
    /// back to connecting, connect refusal is waited out. The shutdown
    /// channel is the only exit, observed at the connect checkpoint and at
    /// every tick; the socket is released on every exit path.
    pub async fn run(&mut self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let addr = self.config.socket_addr()?;

        'reconnect: loop {
            let mut conn = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break 'reconnect,
                conn = Connection::connect(
                    addr,
                    self.config.reconnect_delay,
                    self.config.read_chunk_size,
                ) => conn,
            };

            // No state survives a reconnect: frames in flight at the moment
            // of loss are gone, and a partial fragment from the old stream
            // must not prefix the new one.
            self.reassembler.reset();
            self.inbound.clear();

            if let Err(e) = self.handshake(&mut conn).await {
                warn!("Handshake write failed ({}), reconnecting...", e);
                continue 'reconnect;
            }

            let mut tick = tokio::time::interval(self.config.tick_interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => break 'reconnect,
                    _ = tick.tick() => {
                        match conn.poll_read() {
                            ReadOutcome::Data(chunk) => {
                                for frame in self.reassembler.feed(&chunk) {
                                    self.inbound.push_back(frame);
                                }
                                if let Err(e) = self.drain(&mut conn).await {
                                    warn!("Write failed ({}), reconnecting...", e);
                                    continue 'reconnect;
                                }
                            }
                            ReadOutcome::WouldBlock => {}
                            ReadOutcome::PeerClosed => {
                                warn!("Lost connection to {}!", conn.peer_addr());
                                continue 'reconnect;
                            }
                        }
                        self.periodic();
                    }
                }
            }
        }

        info!("Clean exit.");
        Ok(())
    }

    /// Drains the inbound queue to empty before the loop sleeps again.
    /// Frames are dispatched in arrival order, and a reply triggered by
    /// frame N is written before frame N+1 is dispatched.
    async fn drain(&mut self, conn: &mut Connection) -> Result<(), RelayError> {
        while let Some(frame) = self.inbound.pop_front() {
            for command in self.dispatcher.handle(&frame) {
                conn.send_command(&command).await?;
            }
        }
        Ok(())
    }

    /// Emits the configured post-connect command burst.
    async fn handshake(&self, conn: &mut Connection) -> Result<(), RelayError> {
        let handshake = &self.config.handshake;
        if !handshake.trust_contacts.is_empty() {
            conn.send_command(&OutboundCommand::trust(handshake.trust_contacts.clone()))
                .await?;
        }
        if handshake.get_contacts {
            conn.send_command(&OutboundCommand::get_contacts()).await?;
        }
        if handshake.get_groups {
            conn.send_command(&OutboundCommand::get_groups()).await?;
        }
        Ok(())
    }

    /// Periodic work run once per tick, after the queue is drained.
    fn periodic(&self) {
        trace!("tick");
    }
}
