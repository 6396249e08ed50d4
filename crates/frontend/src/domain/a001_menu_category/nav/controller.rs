//! `MenuNavController` - the single owner of menu navigation state.
//!
//! Provided through context by `MenuNavigator`. All surfaces (mobile sheet,
//! mobile strip, desktop strip, overflow menu, accordion) talk to it; it feeds
//! browser events into the pure engine (`state`, `active_tracker`, `scroll`,
//! `tab_overflow`) and applies the results back to the DOM.

use super::active_tracker::{ActiveCategoryTracker, IntersectionSample};
use super::config::NavConfig;
use super::registry::{NavSurface, NodeRegistry};
use super::scroll::{AttemptOutcome, ElementProbe, RetryToken, ScrollOrchestrator};
use super::state::{NavEvent, NavState};
use super::tab_overflow::{compute_visible_count, strip_scroll_offset, TabLayoutState};
use super::url::{query_param, with_query_param};
use contracts::domain::a001_menu_category::aggregate::anchor_id;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    FocusOptions, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ResizeObserver, ScrollBehavior, ScrollToOptions,
};

/// Attribute carrying the slug on every observed content container
pub const SLUG_ATTR: &str = "data-category-slug";

/// Wrapper attribute of a whole category section (header + content)
const SECTION_ATTR_SELECTOR: &str = "[data-menu-section]";

struct IntersectionHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

struct ResizeHandle {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

/// Nodes of the desktop strip needed to measure it
#[derive(Clone)]
pub struct TabStripNodes {
    /// The visible strip; its width is the space available
    pub container: HtmlElement,
    /// Hidden row rendering every tab at natural width
    pub measure_row: HtmlElement,
    /// Hidden copy of the "More" control
    pub more_probe: HtmlElement,
}

#[derive(Clone, Copy)]
pub struct MenuNavController {
    pub state: RwSignal<NavState>,
    pub tab_layout: RwSignal<TabLayoutState>,
    pub sheet_open: RwSignal<bool>,
    pub overflow_open: RwSignal<bool>,
    config: StoredValue<NavConfig>,
    tracker: StoredValue<ActiveCategoryTracker>,
    scroll: StoredValue<ScrollOrchestrator>,
    registry: StoredValue<NodeRegistry<HtmlElement>, LocalStorage>,
    intersection: StoredValue<Option<IntersectionHandle>, LocalStorage>,
    resize: StoredValue<Option<ResizeHandle>, LocalStorage>,
    strip: StoredValue<Option<TabStripNodes>, LocalStorage>,
    mobile_strip: StoredValue<Option<HtmlElement>, LocalStorage>,
}

impl MenuNavController {
    pub fn new(config: NavConfig) -> Self {
        Self {
            state: RwSignal::new(NavState::default()),
            tab_layout: RwSignal::new(TabLayoutState::default()),
            sheet_open: RwSignal::new(false),
            overflow_open: RwSignal::new(false),
            scroll: StoredValue::new(ScrollOrchestrator::new(&config)),
            config: StoredValue::new(config),
            tracker: StoredValue::new(ActiveCategoryTracker::new()),
            registry: StoredValue::new_local(NodeRegistry::default()),
            intersection: StoredValue::new_local(None),
            resize: StoredValue::new_local(None),
            strip: StoredValue::new_local(None),
            mobile_strip: StoredValue::new_local(None),
        }
    }

    /// Active slug as its own memo so surfaces don't rerun on open-set changes
    pub fn active_slug(&self) -> Memo<Option<String>> {
        let state = self.state;
        Memo::new(move |_| state.with(|s| s.active_slug().map(str::to_string)))
    }

    // ========================================================================
    // State
    // ========================================================================

    /// The only write path into `NavState`. Subscribers are notified only
    /// when the event changed something.
    pub fn dispatch(&self, event: NavEvent) -> bool {
        self.state
            .try_maybe_update(|state| {
                let changed = state.apply(event);
                (changed, changed)
            })
            .unwrap_or(false)
    }

    pub fn sync_categories(&self, slugs: Vec<String>) {
        self.tracker.update_value(|tracker| tracker.retain_known(&slugs));
        if self.dispatch(NavEvent::SyncCategories(slugs)) {
            // until the strip is measured again
            let count = self.state.with_untracked(|s| s.slugs().len());
            self.tab_layout.set(TabLayoutState::all_visible(count));
        }
    }

    pub fn toggle(&self, slug: &str) {
        self.dispatch(NavEvent::Toggle(slug.to_string()));
    }

    // ========================================================================
    // Scroll orchestration
    // ========================================================================

    /// Entry point of every navigation affordance.
    ///
    /// Opens the panel, then scrolls to it once it is laid out. A newer request
    /// supersedes this one; exhausting the attempts is silent.
    pub fn request_scroll_to(&self, slug: &str) {
        if !self.state.with_untracked(|s| s.is_known(slug)) {
            log::debug!("scroll request for unknown category '{}' ignored", slug);
            return;
        }

        self.sheet_open.set(false);
        self.overflow_open.set(false);
        self.dispatch(NavEvent::Select(slug.to_string()));

        let Some(token) = self.scroll.try_update_value(|scroll| scroll.begin(slug)) else {
            return;
        };
        let settle_delay = self.config.with_value(|c| c.settle_delay_ms);
        let this = *self;
        let slug = slug.to_string();
        spawn_local(async move {
            TimeoutFuture::new(settle_delay).await;
            this.run_scroll_chain(token, slug).await;
        });
    }

    async fn run_scroll_chain(self, token: RetryToken, slug: String) {
        loop {
            // superseded, cancelled, or the controller was disposed during the delay
            if self.scroll.try_with_value(|scroll| scroll.is_current(token)) != Some(true) {
                return;
            }
            let probe = self.probe_section(&slug);
            let header_height = self.header_height();
            let Some(outcome) = self
                .scroll
                .try_update_value(|scroll| scroll.attempt(token, probe, header_height))
            else {
                return;
            };

            match &outcome {
                AttemptOutcome::Stale => return,
                AttemptOutcome::RetryAfter(delay) => {
                    TimeoutFuture::new(*delay).await;
                    continue;
                }
                AttemptOutcome::ScrollTo { slug, top } => {
                    scroll_window_to(*top);
                    self.focus_control(slug);
                }
                AttemptOutcome::Abandoned { slug } => {
                    log::debug!("category '{}' never laid out, scroll abandoned", slug);
                }
            }
            if let Some(event) = outcome.settled_event() {
                self.dispatch(event);
            }
            return;
        }
    }

    /// Cancels the chain in flight (unmount)
    pub fn cancel_scroll(&self) {
        if self
            .scroll
            .try_update_value(|scroll| scroll.cancel())
            .flatten()
            .is_some()
        {
            self.dispatch(NavEvent::ScrollCancelled);
        }
    }

    fn probe_section(&self, slug: &str) -> ElementProbe {
        let content = self
            .registry
            .try_with_value(|registry| registry.section(slug).cloned())
            .flatten()
            .or_else(|| {
                document()
                    .get_element_by_id(&anchor_id(slug))
                    .and_then(|section| section.query_selector(&format!("[{}]", SLUG_ATTR)).ok().flatten())
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            });
        let Some(content) = content else {
            return ElementProbe::Missing;
        };

        if content.get_bounding_client_rect().height() <= 0.0 {
            return ElementProbe::Collapsed;
        }

        let target = content
            .closest(SECTION_ATTR_SELECTOR)
            .ok()
            .flatten()
            .unwrap_or_else(|| content.clone().into());
        let scroll_y = window().scroll_y().unwrap_or(0.0);
        ElementProbe::Ready {
            top: target.get_bounding_client_rect().top() + scroll_y,
        }
    }

    fn header_height(&self) -> f64 {
        let Some(selector) = self.config.try_with_value(|c| c.header_selector) else {
            return 0.0;
        };
        document()
            .query_selector(selector)
            .ok()
            .flatten()
            .map(|header| header.get_bounding_client_rect().height())
            .unwrap_or(0.0)
    }

    /// Focuses the first visible nav control for `slug` without scrolling
    fn focus_control(&self, slug: &str) {
        let control = self
            .registry
            .try_with_value(|registry| {
                registry
                    .controls_for(slug)
                    .map(|(_, node)| node)
                    .find(|node| node.get_bounding_client_rect().width() > 0.0)
                    .cloned()
            })
            .flatten();

        if let Some(control) = control {
            let options = FocusOptions::new();
            options.set_prevent_scroll(true);
            if let Err(e) = control.focus_with_options(&options) {
                log::debug!("focus failed: {:?}", e);
            }
        }
    }

    // ========================================================================
    // Registry + active category tracking
    // ========================================================================

    pub fn register_section(&self, slug: &str, node: HtmlElement) {
        self.intersection.with_value(|handle| {
            if let Some(handle) = handle {
                handle.observer.observe(&node);
            }
        });
        self.registry
            .update_value(|registry| registry.register_section(slug, node));
    }

    pub fn deregister_section(&self, slug: &str, node: &HtmlElement) {
        let _ = self.intersection.try_with_value(|handle| {
            if let Some(handle) = handle {
                handle.observer.unobserve(node);
            }
        });
        let removed = self
            .registry
            .try_update_value(|registry| registry.deregister_section(slug, node))
            .unwrap_or(false);
        if removed {
            let _ = self.tracker.try_update_value(|tracker| tracker.forget(slug));
        }
    }

    pub fn register_control(&self, surface: NavSurface, slug: &str, node: HtmlElement) {
        self.registry
            .update_value(|registry| registry.register_control(surface, slug, node));
    }

    pub fn deregister_control(&self, surface: NavSurface, slug: &str, node: &HtmlElement) {
        let _ = self
            .registry
            .try_update_value(|registry| registry.deregister_control(surface, slug, node));
    }

    /// Starts watching category content in the middle band of the viewport.
    /// Sections registered earlier are observed immediately.
    pub fn connect_intersection_observer(&self) {
        if self.intersection.with_value(|handle| handle.is_some()) {
            return;
        }

        let this = *self;
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            this.on_intersections(entries);
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        let (root_margin, thresholds) = self.config.with_value(|c| (c.root_margin, c.thresholds));
        init.set_root_margin(root_margin);
        let threshold_array = js_sys::Array::new();
        for threshold in thresholds {
            threshold_array.push(&JsValue::from_f64(*threshold));
        }
        init.set_threshold(&threshold_array);

        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable: {:?}", e);
                return;
            }
        };

        self.registry.with_value(|registry| {
            for slug in self.state.with_untracked(|s| s.slugs().to_vec()) {
                if let Some(node) = registry.section(&slug) {
                    observer.observe(node);
                }
            }
        });

        self.intersection.set_value(Some(IntersectionHandle {
            observer,
            _callback: callback,
        }));
    }

    fn on_intersections(&self, entries: js_sys::Array) {
        let samples: Vec<IntersectionSample> = entries
            .iter()
            .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|entry| {
                let slug = entry.target().get_attribute(SLUG_ATTR)?;
                Some(IntersectionSample::new(
                    &slug,
                    entry.is_intersecting(),
                    entry.intersection_ratio(),
                ))
            })
            .collect();

        let Some(order) = self.state.try_with_untracked(|s| s.slugs().to_vec()) else {
            return;
        };
        let winner = self
            .tracker
            .try_update_value(|tracker| tracker.observe_batch(&order, samples))
            .flatten();
        // NavState ignores a winner that is already active
        if let Some(slug) = winner {
            self.dispatch(NavEvent::Observed(slug));
        }
    }

    // ========================================================================
    // Desktop strip overflow
    // ========================================================================

    /// Stores the strip nodes and recomputes on every container resize
    pub fn attach_tab_strip(&self, nodes: TabStripNodes) {
        self.detach_tab_strip();

        let this = *self;
        let callback = Closure::wrap(Box::new(move |_: js_sys::Array, _: ResizeObserver| {
            this.recompute_tab_layout();
        }) as Box<dyn FnMut(js_sys::Array, ResizeObserver)>);

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&nodes.container);
                self.resize.set_value(Some(ResizeHandle {
                    observer,
                    _callback: callback,
                }));
            }
            Err(e) => log::warn!("ResizeObserver unavailable: {:?}", e),
        }

        self.strip.set_value(Some(nodes));
        self.recompute_tab_layout();
    }

    pub fn detach_tab_strip(&self) {
        let _ = self.resize.try_update_value(|handle| {
            if let Some(handle) = handle.take() {
                handle.observer.disconnect();
            }
        });
        let _ = self.strip.try_update_value(|strip| strip.take());
    }

    /// Re-measures the strip. Only writes `tab_layout` when the result differs.
    pub fn recompute_tab_layout(&self) {
        let Some(Some(nodes)) = self.strip.try_get_value() else {
            return;
        };
        let Some(gap) = self.config.try_with_value(|c| c.tab_gap_px) else {
            return;
        };

        let available = nodes.container.client_width() as f64;
        let children = nodes.measure_row.children();
        let widths: Vec<f64> = (0..children.length())
            .filter_map(|i| children.item(i))
            .map(|child| child.get_bounding_client_rect().width())
            .collect();
        let more_width = nodes.more_probe.get_bounding_client_rect().width();

        let layout = compute_visible_count(available, &widths, more_width, gap);
        if self.tab_layout.try_get_untracked() != Some(layout) {
            self.tab_layout.set(layout);
        }
    }

    // ========================================================================
    // Mobile strip
    // ========================================================================

    pub fn attach_mobile_strip(&self, node: Option<HtmlElement>) {
        let _ = self.mobile_strip.try_update_value(|slot| *slot = node);
    }

    /// Scrolls the mobile strip horizontally so the tab for `slug` is centred
    pub fn reveal_in_mobile_strip(&self, slug: &str) {
        let Some(Some(viewport)) = self.mobile_strip.try_get_value() else {
            return;
        };
        let Some(Some(tab)) = self
            .registry
            .try_with_value(|registry| registry.control(NavSurface::Mobile, slug).cloned())
        else {
            return;
        };

        let offset = strip_scroll_offset(
            viewport.client_width() as f64,
            viewport.scroll_width() as f64,
            tab.offset_left() as f64,
            tab.offset_width() as f64,
        );
        viewport.set_scroll_left(offset.round() as i32);
    }

    // ========================================================================
    // URL integration
    // ========================================================================

    /// Category requested through `?category=<slug>` when the page loaded
    pub fn deep_link_slug(&self) -> Option<String> {
        let param = self.config.try_with_value(|c| c.query_param)?;
        query_param(&current_search(), param)
    }

    /// Mirrors the active category into the query string without adding history
    pub fn write_active_to_url(&self, slug: &str) {
        let Some(param) = self.config.try_with_value(|c| c.query_param) else {
            return;
        };
        let Some(new_url) = with_query_param(&current_search(), param, slug) else {
            return;
        };
        if let Ok(history) = window().history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&new_url));
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Tears down observers and the retry chain. Called from `on_cleanup`.
    pub fn disconnect(&self) {
        self.cancel_scroll();
        let _ = self.intersection.try_update_value(|handle| {
            if let Some(handle) = handle.take() {
                handle.observer.disconnect();
            }
        });
        self.detach_tab_strip();
        let _ = self.mobile_strip.try_update_value(|slot| *slot = None);
    }
}

pub fn use_nav_controller() -> MenuNavController {
    use_context::<MenuNavController>().expect("MenuNavController not found in context")
}

fn current_search() -> String {
    window().location().search().unwrap_or_default()
}

fn scroll_window_to(top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&options);
}
