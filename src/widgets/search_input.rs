//! Debounced free-text search field.

use std::time::{Duration, Instant};

use crate::timer::{Clock, DEFAULT_DEBOUNCE, Debouncer};

pub struct SearchInput<C: Clock> {
    clock: C,
    timer: Debouncer<String>,
    text: String,
}

impl<C: Clock> SearchInput<C> {
    pub fn new(clock: C) -> Self {
        Self::with_delay(clock, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(clock: C, delay: Duration) -> Self {
        Self {
            clock,
            timer: Debouncer::new(delay),
            text: String::new(),
        }
    }

    /// Seeds the field from the committed search term, e.g. the `q` read
    /// from the URL.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn on_input(&mut self, raw: &str) {
        self.text = raw.to_string();
        self.timer.arm(self.clock.now(), self.text.clone());
    }

    /// Yields the text to commit once the field has been quiet long enough.
    pub fn poll(&mut self) -> Option<String> {
        self.timer.poll(self.clock.now())
    }
}
