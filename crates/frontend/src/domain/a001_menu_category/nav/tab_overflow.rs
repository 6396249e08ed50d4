//! Fitting category tabs into the desktop strip.

/// How many tabs the strip shows before the "More" control. Always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabLayoutState {
    pub visible_count: usize,
    pub has_overflow: bool,
}

impl TabLayoutState {
    /// Everything visible, used until the first measurement lands
    pub fn all_visible(count: usize) -> Self {
        Self {
            visible_count: count,
            has_overflow: false,
        }
    }
}

/// Greedy left-to-right fit of `tab_widths` into `available_width`.
///
/// When not every tab fits, the fit is repeated with room reserved for the
/// overflow control (`overflow_control_width + gap`). At least one tab stays
/// visible whenever there is one to show.
pub fn compute_visible_count(
    available_width: f64,
    tab_widths: &[f64],
    overflow_control_width: f64,
    gap: f64,
) -> TabLayoutState {
    let total = tab_widths.len();
    let candidate = fit_count(available_width, tab_widths, gap);
    if candidate == total {
        return TabLayoutState::all_visible(total);
    }

    let reserved = available_width - overflow_control_width - gap;
    let mut visible_count = fit_count(reserved, tab_widths, gap);
    if visible_count == 0 && total > 0 {
        visible_count = 1;
    }

    TabLayoutState {
        visible_count,
        has_overflow: true,
    }
}

fn fit_count(available_width: f64, tab_widths: &[f64], gap: f64) -> usize {
    let mut used = 0.0;
    for (idx, width) in tab_widths.iter().enumerate() {
        let next = used + width + if idx > 0 { gap } else { 0.0 };
        if next > available_width {
            return idx;
        }
        used = next;
    }
    tab_widths.len()
}

/// `scrollLeft` that centres the active tab inside a horizontally scrollable strip.
///
/// `tab_left` is the tab's offset from the start of the scrolled content.
pub fn strip_scroll_offset(
    viewport_width: f64,
    content_width: f64,
    tab_left: f64,
    tab_width: f64,
) -> f64 {
    let max_offset = (content_width - viewport_width).max(0.0);
    let centred = tab_left + tab_width / 2.0 - viewport_width / 2.0;
    centred.clamp(0.0, max_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overflow_reserves_room_for_more_control() {
        let layout = compute_visible_count(100.0, &[40.0, 40.0, 40.0, 40.0], 30.0, 8.0);
        assert!(layout.has_overflow);
        assert_eq!(layout.visible_count, 1);
        let used = 40.0 * layout.visible_count as f64 + 8.0 * (layout.visible_count as f64 - 1.0);
        assert!(used <= 100.0 - 30.0 - 8.0);
    }

    #[test]
    fn test_everything_fits() {
        let widths = [40.0, 40.0, 40.0, 40.0];
        let natural = 4.0 * 40.0 + 3.0 * 8.0;
        assert_eq!(
            compute_visible_count(natural, &widths, 30.0, 8.0),
            TabLayoutState::all_visible(4)
        );
        assert_eq!(
            compute_visible_count(1000.0, &widths, 30.0, 8.0),
            TabLayoutState::all_visible(4)
        );
    }

    #[test]
    fn test_at_least_one_tab_is_shown() {
        let layout = compute_visible_count(50.0, &[120.0, 60.0], 40.0, 8.0);
        assert_eq!(
            layout,
            TabLayoutState {
                visible_count: 1,
                has_overflow: true
            }
        );
        let negative = compute_visible_count(-10.0, &[10.0], 40.0, 8.0);
        assert_eq!(negative.visible_count, 1);
    }

    #[test]
    fn test_no_tabs() {
        assert_eq!(
            compute_visible_count(0.0, &[], 30.0, 8.0),
            TabLayoutState::all_visible(0)
        );
    }

    #[test]
    fn test_several_tabs_fit_with_reservation() {
        // 60+8+60+8+60 = 196 > 180, reserved 180-30-8 = 142 -> two tabs
        let layout = compute_visible_count(180.0, &[60.0, 60.0, 60.0], 30.0, 8.0);
        assert_eq!(layout.visible_count, 2);
        assert!(layout.has_overflow);
    }

    #[test]
    fn test_strip_scroll_offset() {
        assert_eq!(strip_scroll_offset(200.0, 600.0, 300.0, 50.0), 225.0);
        assert_eq!(strip_scroll_offset(200.0, 600.0, 10.0, 50.0), 0.0);
        assert_eq!(strip_scroll_offset(200.0, 600.0, 580.0, 20.0), 400.0);
        assert_eq!(strip_scroll_offset(200.0, 150.0, 100.0, 40.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_visible_tabs_fit(
            available in 0.0f64..800.0,
            widths in proptest::collection::vec(10.0f64..200.0, 0..12),
            overflow in 10.0f64..80.0,
            gap in 0.0f64..16.0,
        ) {
            let layout = compute_visible_count(available, &widths, overflow, gap);
            prop_assert!(layout.visible_count <= widths.len());
            let n = layout.visible_count;
            let used: f64 = widths[..n].iter().sum::<f64>() + gap * n.saturating_sub(1) as f64;
            if !layout.has_overflow {
                prop_assert_eq!(n, widths.len());
                prop_assert!(used <= available + 1e-9);
            } else if n > 1 {
                prop_assert!(used <= available - overflow - gap + 1e-9);
            } else {
                prop_assert_eq!(n, 1);
            }
        }
    }
}
