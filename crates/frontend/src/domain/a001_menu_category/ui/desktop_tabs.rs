//! Desktop tab strip with a "More" overflow menu.
//!
//! A hidden measurement row renders every tab at its natural width; the
//! controller measures it against the visible row on every resize and
//! decides how many tabs fit before the overflow control.

use super::nav_button::NavButton;
use crate::domain::a001_menu_category::nav::{use_nav_controller, NavSurface, TabStripNodes};
use crate::shared::icons::icon;
use contracts::domain::a001_menu_category::ParsedCategory;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn DesktopTabStrip(categories: Memo<Vec<ParsedCategory>>) -> impl IntoView {
    let controller = use_nav_controller();
    let row_ref = NodeRef::<leptos::html::Div>::new();
    let measure_ref = NodeRef::<leptos::html::Div>::new();
    let more_probe_ref = NodeRef::<leptos::html::Span>::new();

    Effect::new(move |_| {
        if let (Some(container), Some(measure_row), Some(more_probe)) =
            (row_ref.get(), measure_ref.get(), more_probe_ref.get())
        {
            controller.attach_tab_strip(TabStripNodes {
                container: container.into(),
                measure_row: measure_row.into(),
                more_probe: more_probe.into(),
            });
        }
    });

    // titles changed -> measurement row changed
    Effect::new(move |_| {
        categories.track();
        controller.recompute_tab_layout();
    });

    on_cleanup(move || controller.detach_tab_strip());

    let visible_count = Memo::new(move |_| controller.tab_layout.with(|l| l.visible_count));
    let has_overflow = Memo::new(move |_| controller.tab_layout.with(|l| l.has_overflow));

    // More is highlighted while the active category sits in the overflow
    let active = controller.active_slug();
    let overflow_active = Memo::new(move |_| {
        let Some(active) = active.get() else {
            return false;
        };
        let visible = visible_count.get();
        categories.with(|list| {
            list.iter()
                .position(|c| c.slug == active)
                .is_some_and(|index| index >= visible)
        })
    });

    let toggle_overflow = move |_| controller.overflow_open.update(|open| *open = !*open);

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && controller.overflow_open.get_untracked() {
            controller.overflow_open.set(false);
        }
    };

    view! {
        <nav class="menu-tabs-desktop" aria-label="Menu categories" on:keydown=on_keydown>
            <div class="menu-tabs-desktop__measure" aria-hidden="true" node_ref=measure_ref>
                <For
                    each=move || categories.get().into_iter().enumerate()
                    key=|(index, category)| (*index, category.slug.clone())
                    children=move |(_, category)| {
                        view! { <span class="menu-tab">{category.title}</span> }
                    }
                />
            </div>
            <span
                class="menu-tab menu-tab--more menu-tabs-desktop__more-probe"
                aria-hidden="true"
                node_ref=more_probe_ref
            >
                "More"
                {icon("chevron-down")}
            </span>

            <div class="menu-tabs-desktop__row" node_ref=row_ref>
                <For
                    each=move || {
                        let count = visible_count.get();
                        categories.get().into_iter().take(count).enumerate()
                    }
                    key=|(index, category)| (*index, category.slug.clone())
                    children=move |(_, category)| {
                        view! {
                            <NavButton
                                surface=NavSurface::Desktop
                                slug=category.slug
                                title=category.title
                                class="menu-tab"
                            />
                        }
                    }
                />

                <Show when=move || has_overflow.get()>
                    <div class="menu-tabs-desktop__overflow">
                        <button
                            type="button"
                            class="menu-tab menu-tab--more"
                            class:menu-tab--active=move || overflow_active.get()
                            aria-haspopup="true"
                            aria-expanded=move || controller.overflow_open.get().to_string()
                            on:click=toggle_overflow
                        >
                            "More"
                            {icon("chevron-down")}
                        </button>
                        <Show when=move || controller.overflow_open.get()>
                            <div class="menu-tabs-desktop__overflow-menu" role="menu">
                                <For
                                    each=move || {
                                        let count = visible_count.get();
                                        categories.get().into_iter().enumerate().skip(count)
                                    }
                                    key=|(index, category)| (*index, category.slug.clone())
                                    children=move |(_, category)| {
                                        view! {
                                            <NavButton
                                                surface=NavSurface::Overflow
                                                slug=category.slug
                                                title=category.title
                                                class="menu-overflow-item"
                                            />
                                        }
                                    }
                                />
                            </div>
                        </Show>
                    </div>
                </Show>
            </div>
        </nav>
    }
}
