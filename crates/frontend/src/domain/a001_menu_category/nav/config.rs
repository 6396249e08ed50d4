//! Tunables for the menu navigation controller.

/// Timing, geometry and observer settings used by `MenuNavController`.
#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    /// Delay after opening a panel before the first scroll attempt (ms)
    pub settle_delay_ms: u32,
    /// Delay between scroll attempts while the target is missing or collapsed (ms)
    pub retry_delay_ms: u32,
    /// Attempts before a scroll request is abandoned
    pub max_attempts: u32,
    /// Selector of the fixed site header whose height is compensated
    pub header_selector: &'static str,
    /// Extra space left between the header and the scrolled-to section (px)
    pub header_gap_px: f64,
    /// Gap between tabs in the desktop strip (px), matches the CSS `gap`
    pub tab_gap_px: f64,
    /// Only the middle band of the viewport counts as "in view"
    pub root_margin: &'static str,
    pub thresholds: &'static [f64],
    /// Query parameter used for deep links (`?category=mains`)
    pub query_param: &'static str,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 50,
            retry_delay_ms: 80,
            max_attempts: 10,
            header_selector: "[data-site-header]",
            header_gap_px: 12.0,
            tab_gap_px: 8.0,
            root_margin: "-40% 0px -40% 0px",
            thresholds: &[0.0, 0.25, 0.5, 0.75, 1.0],
            query_param: "category",
        }
    }
}
