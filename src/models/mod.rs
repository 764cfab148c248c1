mod client;
mod event;

pub use client::{Client, ClientForm};
pub use event::{Event, EventForm};

use serde::{Deserialize, Serialize};

/// Selector for operations that apply to either collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Client,
    Event,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Event => "event",
        }
    }
}
