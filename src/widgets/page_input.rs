//! Debounced "go to page" text field.

use std::time::{Duration, Instant};

use crate::timer::{Clock, DEFAULT_DEBOUNCE, Debouncer};

/// Outcome of a fired debounce timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageInputEvent {
    /// The held value is a valid page: jump to it.
    Goto(u64),
    /// The held value was rejected and the display shows the committed page
    /// again.
    Reverted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageInputState {
    /// Display mirrors the committed page.
    Idle,
    /// Raw input is held and the debounce timer is armed.
    Pending,
}

pub struct PageInput<C: Clock> {
    clock: C,
    timer: Debouncer<()>,
    committed_page: u64,
    page_count: u64,
    display: String,
}

/// Digits only and not zero. Values too large for a page number still count;
/// `poll` rejects them once the timer fires.
fn is_page_candidate(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) && raw.bytes().any(|b| b != b'0')
}

impl<C: Clock> PageInput<C> {
    pub fn new(clock: C) -> Self {
        Self::with_delay(clock, DEFAULT_DEBOUNCE)
    }

    pub fn with_delay(clock: C, delay: Duration) -> Self {
        Self {
            clock,
            timer: Debouncer::new(delay),
            committed_page: 1,
            page_count: 1,
            display: "1".to_string(),
        }
    }

    /// Mirrors the list after a render. Pending input is kept so a re-render
    /// mid-edit does not wipe what the user is typing.
    pub fn sync(&mut self, current_page: u64, page_count: u64) {
        self.committed_page = current_page.max(1);
        self.page_count = page_count.max(1);
        if !self.timer.is_armed() {
            self.display = self.committed_page.to_string();
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn committed_page(&self) -> u64 {
        self.committed_page
    }

    pub fn state(&self) -> PageInputState {
        if self.timer.is_armed() {
            PageInputState::Pending
        } else {
            PageInputState::Idle
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    fn revert(&mut self) {
        self.timer.cancel();
        self.display = self.committed_page.to_string();
    }

    /// Handles one keystroke worth of field content.
    pub fn on_input(&mut self, raw: &str) {
        if raw.is_empty() {
            self.display.clear();
            self.timer.arm(self.clock.now(), ());
            return;
        }

        if !is_page_candidate(raw) {
            self.revert();
            return;
        }

        self.display = raw.to_string();
        if raw.parse::<u64>().is_ok_and(|page| page == self.committed_page) {
            self.timer.cancel();
        } else {
            self.timer.arm(self.clock.now(), ());
        }
    }

    /// Commits the held value once the timer fires. Returns `None` while the
    /// timer is idle or still running.
    pub fn poll(&mut self) -> Option<PageInputEvent> {
        self.timer.poll(self.clock.now())?;

        match self.display.parse::<u64>() {
            Ok(page) if (1..=self.page_count).contains(&page) => {
                Some(PageInputEvent::Goto(page))
            }
            _ => {
                log::debug!(
                    "Reverting page input `{}` to page {}",
                    self.display,
                    self.committed_page
                );
                self.revert();
                Some(PageInputEvent::Reverted)
            }
        }
    }
}
