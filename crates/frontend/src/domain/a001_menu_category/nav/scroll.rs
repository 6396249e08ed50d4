//! Scroll-to-category orchestration.
//!
//! A request opens the panel, then polls until the section is laid out and
//! scrolls to it. Polling is bounded by `max_attempts`. Every request gets a
//! fresh [`RetryToken`]; starting a new request or cancelling invalidates the
//! previous token, so at most one retry chain is ever live.

use super::config::NavConfig;
use super::state::NavEvent;

/// Identifies one retry chain. Only the latest token is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryToken(u64);

/// What the DOM reported for the target section on this attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementProbe {
    /// No element registered/found for the slug yet
    Missing,
    /// Element exists but still has zero height (panel animating open)
    Collapsed,
    /// Laid out; `top` is relative to the document
    Ready { top: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// Token was superseded or cancelled; the chain must stop
    Stale,
    /// Try again after this many milliseconds
    RetryAfter(u32),
    /// Scroll the window to `top` and focus the nav control for `slug`
    ScrollTo { slug: String, top: f64 },
    /// Attempts exhausted; content not present
    Abandoned { slug: String },
}

impl AttemptOutcome {
    /// Event that clears the page's pending scroll once the chain ends.
    /// `None` while the chain is still running or was superseded.
    pub fn settled_event(&self) -> Option<NavEvent> {
        match self {
            AttemptOutcome::ScrollTo { slug, .. } | AttemptOutcome::Abandoned { slug } => {
                Some(NavEvent::ScrollSettled(slug.clone()))
            }
            AttemptOutcome::Stale | AttemptOutcome::RetryAfter(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PendingScroll {
    slug: String,
    token: RetryToken,
    attempts: u32,
}

#[derive(Debug, Clone)]
pub struct ScrollOrchestrator {
    next_token: u64,
    pending: Option<PendingScroll>,
    retry_delay_ms: u32,
    max_attempts: u32,
    header_gap_px: f64,
}

impl ScrollOrchestrator {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            next_token: 0,
            pending: None,
            retry_delay_ms: config.retry_delay_ms,
            max_attempts: config.max_attempts.max(1),
            header_gap_px: config.header_gap_px,
        }
    }

    /// Starts a chain for `slug`, invalidating any chain in flight.
    pub fn begin(&mut self, slug: &str) -> RetryToken {
        self.next_token += 1;
        let token = RetryToken(self.next_token);
        self.pending = Some(PendingScroll {
            slug: slug.to_string(),
            token,
            attempts: 0,
        });
        token
    }

    pub fn is_current(&self, token: RetryToken) -> bool {
        self.pending.as_ref().is_some_and(|p| p.token == token)
    }

    pub fn pending_slug(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.slug.as_str())
    }

    /// Records one attempt for `token` and decides what the driver does next.
    pub fn attempt(
        &mut self,
        token: RetryToken,
        probe: ElementProbe,
        header_height: f64,
    ) -> AttemptOutcome {
        let Some(pending) = self.pending.as_mut().filter(|p| p.token == token) else {
            return AttemptOutcome::Stale;
        };
        pending.attempts += 1;

        match probe {
            ElementProbe::Ready { top } => {
                let slug = pending.slug.clone();
                self.pending = None;
                AttemptOutcome::ScrollTo {
                    slug,
                    top: scroll_target_top(top, header_height, self.header_gap_px),
                }
            }
            ElementProbe::Missing | ElementProbe::Collapsed => {
                if pending.attempts >= self.max_attempts {
                    let slug = pending.slug.clone();
                    self.pending = None;
                    AttemptOutcome::Abandoned { slug }
                } else {
                    AttemptOutcome::RetryAfter(self.retry_delay_ms)
                }
            }
        }
    }

    /// Invalidates the chain in flight. Returns its slug, if any.
    pub fn cancel(&mut self) -> Option<String> {
        self.next_token += 1;
        self.pending.take().map(|p| p.slug)
    }
}

/// Window scroll position that puts `element_top` just below the fixed header.
pub fn scroll_target_top(element_top: f64, header_height: f64, gap: f64) -> f64 {
    (element_top - header_height - gap).max(0.0)
}
