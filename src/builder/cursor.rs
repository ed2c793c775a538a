//! Shared cursor over the event sequence

use crate::event::Event;

/// Position in an event slice, advanced exactly once per event
#[derive(Clone, Debug)]
pub struct EventCursor<'a> {
    events: &'a [Event],
    pos: usize,
}

impl<'a> EventCursor<'a> {
    pub const fn new(events: &'a [Event]) -> Self {
        Self { events, pos: 0 }
    }

    /// Get current event without consuming
    pub fn current(&self) -> Option<&'a Event> {
        self.events.get(self.pos)
    }

    pub fn advance(&mut self) {
        if self.pos < self.events.len() {
            self.pos += 1;
        }
    }

    /// Index of the current event
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Events not yet consumed
    pub fn remaining(&self) -> &'a [Event] {
        self.events.get(self.pos..).unwrap_or_default()
    }
}
