//! Navigation state shared by every menu surface.
//!
//! Tab clicks, the intersection observer and the scroll orchestrator all write
//! through [`NavState::apply`], so the active slug and the open set always
//! change together and the last write wins.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Category list (re)rendered, slugs in display order
    SyncCategories(Vec<String>),
    /// A navigation control was used: open, activate, schedule scroll
    Select(String),
    /// The intersection observer picked a new most-visible category
    Observed(String),
    /// Accordion header clicked
    Toggle(String),
    /// Scroll chain for this slug finished (scrolled or gave up)
    ScrollSettled(String),
    /// Scroll chain cancelled without a replacement (unmount)
    ScrollCancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    slugs: Vec<String>,
    active_slug: Option<String>,
    open_slugs: HashSet<String>,
    pending_scroll_slug: Option<String>,
}

impl NavState {
    pub fn new(slugs: Vec<String>) -> Self {
        let mut state = Self::default();
        state.apply(NavEvent::SyncCategories(slugs));
        state
    }

    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    pub fn active_slug(&self) -> Option<&str> {
        self.active_slug.as_deref()
    }

    pub fn pending_scroll_slug(&self) -> Option<&str> {
        self.pending_scroll_slug.as_deref()
    }

    pub fn open_slugs(&self) -> &HashSet<String> {
        &self.open_slugs
    }

    pub fn is_known(&self, slug: &str) -> bool {
        self.slugs.iter().any(|s| s == slug)
    }

    pub fn is_open(&self, slug: &str) -> bool {
        self.open_slugs.contains(slug)
    }

    pub fn is_active(&self, slug: &str) -> bool {
        self.active_slug.as_deref() == Some(slug)
    }

    /// Single write path. Returns `true` when anything changed.
    pub fn apply(&mut self, event: NavEvent) -> bool {
        let before = self.clone();
        match event {
            NavEvent::SyncCategories(slugs) => self.sync(slugs),
            NavEvent::Select(slug) => {
                if self.is_known(&slug) {
                    self.open_slugs.insert(slug.clone());
                    self.active_slug = Some(slug.clone());
                    self.pending_scroll_slug = Some(slug);
                }
            }
            NavEvent::Observed(slug) => {
                // a collapsed panel has no visible content, so it cannot win
                if self.is_known(&slug) && self.is_open(&slug) {
                    self.active_slug = Some(slug);
                }
            }
            NavEvent::Toggle(slug) => {
                if !self.is_known(&slug) {
                    return false;
                }
                if !self.open_slugs.remove(&slug) {
                    self.open_slugs.insert(slug);
                } else if self.is_active(&slug) {
                    // with nothing left open the closed panel stays active
                    if let Some(next) = self.nearest_open(&slug) {
                        self.active_slug = Some(next);
                    }
                }
            }
            NavEvent::ScrollSettled(slug) => {
                if self.pending_scroll_slug.as_deref() == Some(slug.as_str()) {
                    self.pending_scroll_slug = None;
                }
            }
            NavEvent::ScrollCancelled => self.pending_scroll_slug = None,
        }
        *self != before
    }

    /// Open category closest to `slug` in display order, preceding ones first
    fn nearest_open(&self, slug: &str) -> Option<String> {
        let index = self.slugs.iter().position(|s| s == slug)?;
        let (before, after) = self.slugs.split_at(index);
        before
            .iter()
            .rev()
            .chain(after.iter().skip(1))
            .find(|s| self.is_open(s))
            .cloned()
    }

    fn sync(&mut self, slugs: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(slugs.len());
        for slug in slugs {
            if !unique.contains(&slug) {
                unique.push(slug);
            }
        }
        self.slugs = unique;

        let known = &self.slugs;
        self.open_slugs.retain(|slug| known.contains(slug));
        if self
            .pending_scroll_slug
            .as_ref()
            .is_some_and(|pending| !known.contains(pending))
        {
            self.pending_scroll_slug = None;
        }

        let active_known = self
            .active_slug
            .as_ref()
            .is_some_and(|active| known.contains(active));
        if !active_known {
            self.active_slug = self.slugs.first().cloned();
            if let Some(first) = &self.active_slug {
                self.open_slugs.insert(first.clone());
            }
        }
    }
}
