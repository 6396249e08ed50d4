use super::accordion::CategoryAccordion;
use super::desktop_tabs::DesktopTabStrip;
use super::mobile_sheet::{MobileSheet, MobileSheetTrigger};
use super::mobile_tabs::MobileTabStrip;
use crate::domain::a001_menu_category::nav::{MenuNavController, NavConfig};
use contracts::domain::a001_menu_category::ParsedCategory;
use leptos::prelude::*;

/// Owns the navigation controller for one rendered menu.
///
/// Creates `MenuNavController`, provides it to the surfaces below, keeps it in
/// sync with the category list, resolves `?category=` once and mirrors the
/// active category back into the URL.
#[component]
#[allow(non_snake_case)]
pub fn MenuNavigator(categories: Memo<Vec<ParsedCategory>>) -> impl IntoView {
    let controller = MenuNavController::new(NavConfig::default());
    provide_context(controller);

    let slugs_of = move |list: &Vec<ParsedCategory>| -> Vec<String> {
        list.iter().map(|c| c.slug.clone()).collect()
    };

    // Initial sync before the surfaces render so they see the first category active
    controller.sync_categories(categories.with_untracked(slugs_of));

    Effect::new(move |_| {
        controller.sync_categories(categories.with(slugs_of));
    });

    Effect::new(move |_| {
        controller.connect_intersection_observer();
    });

    let deep_link = StoredValue::new(controller.deep_link_slug());
    let active = controller.active_slug();

    Effect::new(move |_| {
        active.track();
        if let Some(slug) = deep_link.try_update_value(Option::take).flatten() {
            log::debug!("deep link to category '{}'", slug);
            controller.request_scroll_to(&slug);
        }
        if let Some(slug) = controller.state.with_untracked(|s| s.active_slug().map(str::to_string)) {
            controller.write_active_to_url(&slug);
        }
    });

    on_cleanup(move || controller.disconnect());

    view! {
        <div class="menu-nav">
            <div class="menu-nav__bar">
                <div class="menu-nav__mobile">
                    <MobileSheetTrigger categories=categories />
                    <MobileTabStrip categories=categories />
                </div>
                <DesktopTabStrip categories=categories />
            </div>
            <MobileSheet categories=categories />
            <CategoryAccordion categories=categories />
        </div>
    }
}
