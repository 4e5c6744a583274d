//! Messages exchanged with the simulation server.
//!
//! Every message travels in an envelope of the form
//! `{"event": "<name>", "data": <payload>}`.

use crate::bounds::WorldBounds;
use crate::error::Result;
use crate::scene::{DynamicSnapshot, RoadSegment};
use crate::stats::Stats;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;

/// A message pushed by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    /// The world extent and road network, sent once on connection.
    InitData(InitData),
    /// A snapshot of the moving entities and the current statistics.
    Update(Update),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitData {
    pub bounds: WorldBounds,
    pub roads: Vec<RoadSegment>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(flatten)]
    pub snapshot: DynamicSnapshot,
    pub stats: Stats,
}

/// A command sent to the server. No reply is expected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    /// Starts a simulation with `nb` vehicles.
    StartSim { nb: u32 },
    StopSim {},
    /// Turns adaptive signal control on or off.
    ToggleAi { active: bool },
    /// Blocks the road nearest to the given world position.
    AddRoadwork { x: f64, y: f64 },
}

/// Something that happened on the server connection.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    Connected,
    Message(Inbound),
    Disconnected,
}

/// Decodes one inbound message from JSON.
pub fn decode(json: &str) -> Result<Inbound> {
    Ok(serde_json::from_str(json)?)
}

/// Encodes one outbound command as JSON.
pub fn encode(command: &Outbound) -> Result<String> {
    Ok(serde_json::to_string(command)?)
}

/// The outbound half of a server connection.
pub trait Transport {
    /// Sends a command without waiting for, or expecting, an acknowledgement.
    fn emit(&mut self, command: &Outbound);
}

/// Records commands in memory.
impl Transport for Vec<Outbound> {
    fn emit(&mut self, command: &Outbound) {
        self.push(command.clone());
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn emit(&mut self, command: &Outbound) {
        (**self).emit(command)
    }
}

/// Sends commands over a channel to whatever owns the actual socket.
#[derive(Clone, Debug)]
pub struct ChannelTransport {
    tx: Sender<Outbound>,
}

impl ChannelTransport {
    pub fn new(tx: Sender<Outbound>) -> Self {
        Self { tx }
    }
}

impl Transport for ChannelTransport {
    fn emit(&mut self, command: &Outbound) {
        if self.tx.send(command.clone()).is_err() {
            warn!("Dropped {:?}: transport is closed", command);
        }
    }
}
