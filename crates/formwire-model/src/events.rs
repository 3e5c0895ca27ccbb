//! Events and listener bookkeeping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Change,
    Click,
    Drop,
    DragOver,
    DragLeave,
    Custom(String),
}

impl EventType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "change" => EventType::Change,
            "click" => EventType::Click,
            "drop" => EventType::Drop,
            "dragover" => EventType::DragOver,
            "dragleave" => EventType::DragLeave,
            other => EventType::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EventType::Change => "change",
            EventType::Click => "click",
            EventType::Drop => "drop",
            EventType::DragOver => "dragover",
            EventType::DragLeave => "dragleave",
            EventType::Custom(name) => name,
        }
    }

    /// Built-in events bubble; custom events are dispatched to their target
    /// only.
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::Custom(_))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventType,
    /// Files carried by a `drop` event.
    pub files: Vec<String>,
}

impl Event {
    pub fn new(kind: EventType) -> Self {
        Self {
            kind,
            files: Vec::new(),
        }
    }

    pub fn change() -> Self {
        Self::new(EventType::Change)
    }

    pub fn click() -> Self {
        Self::new(EventType::Click)
    }

    pub fn drop_files(files: Vec<String>) -> Self {
        Self {
            kind: EventType::Drop,
            files,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Listener<H> {
    pub target: NodeId,
    pub event: EventType,
    pub handler: H,
}

/// Listeners in registration order.
#[derive(Debug, Clone)]
pub struct ListenerRegistry<H> {
    entries: Vec<Listener<H>>,
}

impl<H> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: NodeId, event: EventType, handler: H) {
        self.entries.push(Listener {
            target,
            event,
            handler,
        });
    }

    pub fn listeners_for<'a>(
        &'a self,
        target: NodeId,
        event: &'a EventType,
    ) -> impl Iterator<Item = &'a H> + 'a {
        self.entries
            .iter()
            .filter(move |listener| listener.target == target && listener.event == *event)
            .map(|listener| &listener.handler)
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Listener<H>) -> bool,
    {
        self.entries.retain(|listener| keep(listener));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener<H>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
