//! Slug-keyed registry of the DOM nodes the controller needs.
//!
//! Components register their nodes on mount and deregister on cleanup, so the
//! controller never looks nodes up through global state.

use std::collections::HashMap;

/// Which navigation affordance a control belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavSurface {
    Desktop,
    Overflow,
    Mobile,
    Sheet,
}

impl NavSurface {
    /// Focus preference after a scroll: first visible surface wins
    pub const FOCUS_ORDER: [NavSurface; 4] = [
        NavSurface::Desktop,
        NavSurface::Mobile,
        NavSurface::Overflow,
        NavSurface::Sheet,
    ];
}

#[derive(Debug, Clone)]
pub struct NodeRegistry<E> {
    sections: HashMap<String, E>,
    controls: HashMap<(NavSurface, String), E>,
}

impl<E> Default for NodeRegistry<E> {
    fn default() -> Self {
        Self {
            sections: HashMap::new(),
            controls: HashMap::new(),
        }
    }
}

impl<E: PartialEq> NodeRegistry<E> {
    /// A later registration for the same slug replaces the earlier one
    pub fn register_section(&mut self, slug: &str, node: E) {
        self.sections.insert(slug.to_string(), node);
    }

    /// Removes the section only if `node` is the one currently registered
    pub fn deregister_section(&mut self, slug: &str, node: &E) -> bool {
        if self.sections.get(slug) == Some(node) {
            self.sections.remove(slug);
            true
        } else {
            false
        }
    }

    pub fn section(&self, slug: &str) -> Option<&E> {
        self.sections.get(slug)
    }

    pub fn register_control(&mut self, surface: NavSurface, slug: &str, node: E) {
        self.controls.insert((surface, slug.to_string()), node);
    }

    pub fn deregister_control(&mut self, surface: NavSurface, slug: &str, node: &E) -> bool {
        let key = (surface, slug.to_string());
        if self.controls.get(&key) == Some(node) {
            self.controls.remove(&key);
            true
        } else {
            false
        }
    }

    pub fn control(&self, surface: NavSurface, slug: &str) -> Option<&E> {
        self.controls.get(&(surface, slug.to_string()))
    }

    /// Controls for `slug` in focus preference order
    pub fn controls_for<'a>(&'a self, slug: &'a str) -> impl Iterator<Item = (NavSurface, &'a E)> + 'a {
        NavSurface::FOCUS_ORDER
            .into_iter()
            .filter_map(move |surface| self.control(surface, slug).map(|node| (surface, node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_register_and_deregister() {
        let mut registry = NodeRegistry::default();
        registry.register_section("mains", "section#1");
        assert_eq!(registry.section("mains"), Some(&"section#1"));
        assert!(registry.deregister_section("mains", &"section#1"));
        assert_eq!(registry.section("mains"), None);
    }

    #[test]
    fn test_stale_deregistration_keeps_newer_node() {
        let mut registry = NodeRegistry::default();
        registry.register_section("drinks", "first");
        registry.register_section("drinks", "second");
        assert!(!registry.deregister_section("drinks", &"first"));
        assert_eq!(registry.section("drinks"), Some(&"second"));
    }

    #[test]
    fn test_controls_follow_focus_order() {
        let mut registry = NodeRegistry::default();
        registry.register_control(NavSurface::Sheet, "mains", "sheet");
        registry.register_control(NavSurface::Mobile, "mains", "mobile");
        registry.register_control(NavSurface::Desktop, "starters", "desktop");

        let found: Vec<_> = registry.controls_for("mains").collect();
        assert_eq!(
            found,
            vec![(NavSurface::Mobile, &"mobile"), (NavSurface::Sheet, &"sheet")]
        );

        assert!(registry.deregister_control(NavSurface::Mobile, "mains", &"mobile"));
        assert_eq!(registry.control(NavSurface::Mobile, "mains"), None);
    }
}
