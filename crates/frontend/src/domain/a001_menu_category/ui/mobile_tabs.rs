use super::nav_button::NavButton;
use crate::domain::a001_menu_category::nav::{use_nav_controller, NavSurface};
use contracts::domain::a001_menu_category::ParsedCategory;
use leptos::prelude::*;

/// Horizontally scrollable category chips. Keeps the active chip centred.
#[component]
#[allow(non_snake_case)]
pub fn MobileTabStrip(categories: Memo<Vec<ParsedCategory>>) -> impl IntoView {
    let controller = use_nav_controller();
    let strip_ref = NodeRef::<leptos::html::Div>::new();
    let active = controller.active_slug();

    Effect::new(move |_| {
        controller.attach_mobile_strip(strip_ref.get().map(Into::into));
    });

    Effect::new(move |_| {
        if let Some(slug) = active.get() {
            controller.reveal_in_mobile_strip(&slug);
        }
    });

    view! {
        <div class="menu-tabs-mobile" node_ref=strip_ref>
            <For
                each=move || categories.get().into_iter().enumerate()
                key=|(index, category)| (*index, category.slug.clone())
                children=move |(_, category)| {
                    view! {
                        <NavButton
                            surface=NavSurface::Mobile
                            slug=category.slug
                            title=category.title
                            class="menu-chip"
                        />
                    }
                }
            />
        </div>
    }
}
