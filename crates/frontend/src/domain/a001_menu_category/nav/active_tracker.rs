//! Picks the category that is most visible in the middle band of the viewport.
//!
//! The browser delivers intersection changes in batches that only contain the
//! entries that changed, so visibility is accumulated per slug between batches.

use std::collections::HashMap;

/// One `IntersectionObserverEntry`, reduced to what the tracker needs
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionSample {
    pub slug: String,
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionSample {
    pub fn new(slug: &str, is_intersecting: bool, ratio: f64) -> Self {
        Self {
            slug: slug.to_string(),
            is_intersecting,
            ratio,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrackerState {
    /// Nothing observed yet
    #[default]
    Idle,
    Active(String),
}

#[derive(Debug, Clone, Default)]
pub struct ActiveCategoryTracker {
    /// Currently intersecting sections and their latest ratio
    visible: HashMap<String, f64>,
    state: TrackerState,
}

impl ActiveCategoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn active_slug(&self) -> Option<&str> {
        match &self.state {
            TrackerState::Idle => None,
            TrackerState::Active(slug) => Some(slug),
        }
    }

    /// Applies one notification batch. `order` is the display order used to
    /// break ties. Returns the most visible slug on every batch that has one,
    /// including when it matches the previous winner.
    pub fn observe_batch<I>(&mut self, order: &[String], batch: I) -> Option<String>
    where
        I: IntoIterator<Item = IntersectionSample>,
    {
        for sample in batch {
            if sample.is_intersecting {
                self.visible.insert(sample.slug, sample.ratio);
            } else {
                self.visible.remove(&sample.slug);
            }
        }

        // Nothing intersecting: keep the previous slug to avoid flicker
        let best = self.most_visible(order)?;
        self.state = TrackerState::Active(best.clone());
        Some(best)
    }

    fn most_visible(&self, order: &[String]) -> Option<String> {
        let mut best: Option<(&String, f64)> = None;
        for slug in order {
            let Some(&ratio) = self.visible.get(slug) else {
                continue;
            };
            // strict comparison: earlier category wins a tie
            if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
                best = Some((slug, ratio));
            }
        }
        best.map(|(slug, _)| slug.clone())
    }

    /// Section left the DOM
    pub fn forget(&mut self, slug: &str) {
        self.visible.remove(slug);
    }

    /// Drops visibility for slugs no longer rendered. The active slug is kept;
    /// `NavState` replaces it when it disappears from the list.
    pub fn retain_known(&mut self, order: &[String]) {
        self.visible.retain(|slug, _| order.contains(slug));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Vec<String> {
        ["starters", "mains", "desserts"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_idle_until_something_intersects() {
        let mut tracker = ActiveCategoryTracker::new();
        let changed = tracker.observe_batch(&order(), vec![IntersectionSample::new("mains", false, 0.0)]);
        assert_eq!(changed, None);
        assert_eq!(tracker.state(), &TrackerState::Idle);
    }

    #[test]
    fn test_highest_ratio_wins() {
        let mut tracker = ActiveCategoryTracker::new();
        let changed = tracker.observe_batch(
            &order(),
            vec![
                IntersectionSample::new("starters", true, 0.25),
                IntersectionSample::new("mains", true, 0.75),
            ],
        );
        assert_eq!(changed.as_deref(), Some("mains"));
        assert_eq!(tracker.active_slug(), Some("mains"));
    }

    #[test]
    fn test_tie_goes_to_earlier_category() {
        let mut tracker = ActiveCategoryTracker::new();
        let changed = tracker.observe_batch(
            &order(),
            vec![
                IntersectionSample::new("desserts", true, 0.5),
                IntersectionSample::new("mains", true, 0.5),
            ],
        );
        assert_eq!(changed.as_deref(), Some("mains"));
    }

    #[test]
    fn test_visibility_accumulates_across_batches() {
        let mut tracker = ActiveCategoryTracker::new();
        tracker.observe_batch(&order(), vec![IntersectionSample::new("starters", true, 1.0)]);
        // batch only mentions mains; starters is still more visible
        let changed = tracker.observe_batch(&order(), vec![IntersectionSample::new("mains", true, 0.25)]);
        assert_eq!(changed.as_deref(), Some("starters"));
        assert_eq!(tracker.active_slug(), Some("starters"));

        let changed = tracker.observe_batch(&order(), vec![IntersectionSample::new("starters", false, 0.0)]);
        assert_eq!(changed.as_deref(), Some("mains"));
    }

    #[test]
    fn test_keeps_previous_slug_when_nothing_intersects() {
        let mut tracker = ActiveCategoryTracker::new();
        tracker.observe_batch(&order(), vec![IntersectionSample::new("mains", true, 0.5)]);
        let changed = tracker.observe_batch(&order(), vec![IntersectionSample::new("mains", false, 0.0)]);
        assert_eq!(changed, None);
        assert_eq!(tracker.active_slug(), Some("mains"));
    }

    #[test]
    fn test_unknown_slugs_never_win() {
        let mut tracker = ActiveCategoryTracker::new();
        let changed = tracker.observe_batch(&order(), vec![IntersectionSample::new("ghost", true, 1.0)]);
        assert_eq!(changed, None);
        assert_eq!(tracker.active_slug(), None);
    }

    #[test]
    fn test_retain_known_and_forget() {
        let mut tracker = ActiveCategoryTracker::new();
        tracker.observe_batch(
            &order(),
            vec![
                IntersectionSample::new("starters", true, 0.9),
                IntersectionSample::new("mains", true, 0.5),
            ],
        );
        let shorter: Vec<String> = vec!["mains".into(), "desserts".into()];
        tracker.retain_known(&shorter);
        assert_eq!(tracker.active_slug(), Some("starters"));
        let changed = tracker.observe_batch(&shorter, Vec::new());
        assert_eq!(changed.as_deref(), Some("mains"));

        tracker.forget("mains");
        assert_eq!(tracker.observe_batch(&shorter, Vec::new()), None);
        assert_eq!(tracker.active_slug(), Some("mains"));
    }

    #[test]
    fn test_visible_section_reclaims_active_after_click_elsewhere() {
        use crate::domain::a001_menu_category::nav::state::{NavEvent, NavState};

        let mut tracker = ActiveCategoryTracker::new();
        let mut state = NavState::new(order());
        state.apply(NavEvent::Toggle("mains".into()));
        tracker.observe_batch(&order(), vec![IntersectionSample::new("starters", true, 1.0)]);

        state.apply(NavEvent::Select("mains".into()));
        assert_eq!(state.active_slug(), Some("mains"));

        let batch = vec![
            IntersectionSample::new("starters", true, 0.9),
            IntersectionSample::new("mains", true, 0.1),
        ];
        let winner = tracker.observe_batch(&order(), batch);
        assert_eq!(winner.as_deref(), Some("starters"));
        assert!(state.apply(NavEvent::Observed(winner.unwrap())));
        assert_eq!(state.active_slug(), Some("starters"));

        // same winner again is a no-op for the page state
        let winner = tracker.observe_batch(&order(), Vec::new());
        assert!(!state.apply(NavEvent::Observed(winner.unwrap())));
    }
}
