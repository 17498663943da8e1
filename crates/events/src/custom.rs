//! Generic record for events no producer shape claimed.

use serde::{Deserialize, Serialize};

use crate::RawEvent;

/// The raw event, unmodified. Handed to the fallback handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomEvent {
    pub data: RawEvent,
}

impl CustomEvent {
    pub fn new(data: RawEvent) -> Self {
        Self { data }
    }

    /// Returns the top-level field `name`, if the event is a mapping that has it.
    pub fn get(&self, name: &str) -> Option<&RawEvent> {
        self.data.get(name)
    }

    pub fn into_inner(self) -> RawEvent {
        self.data
    }
}
