use super::nav_button::NavButton;
use crate::domain::a001_menu_category::nav::{use_nav_controller, NavSurface};
use crate::shared::icons::icon;
use contracts::domain::a001_menu_category::ParsedCategory;
use leptos::prelude::*;

/// Button opening the category sheet; shows the active category title.
#[component]
#[allow(non_snake_case)]
pub fn MobileSheetTrigger(categories: Memo<Vec<ParsedCategory>>) -> impl IntoView {
    let controller = use_nav_controller();
    let active = controller.active_slug();

    let label = move || {
        let active = active.get();
        categories.with(|list| {
            list.iter()
                .find(|c| Some(&c.slug) == active.as_ref())
                .map(|c| c.title.clone())
                .unwrap_or_else(|| "Categories".to_string())
        })
    };

    view! {
        <button
            type="button"
            class="menu-sheet-trigger"
            aria-haspopup="dialog"
            aria-expanded=move || controller.sheet_open.get().to_string()
            on:click=move |_| controller.sheet_open.set(true)
        >
            {icon("menu")}
            <span class="menu-sheet-trigger__label">{label}</span>
        </button>
    }
}

/// Bottom sheet listing every category. Selecting one closes the sheet.
#[component]
#[allow(non_snake_case)]
pub fn MobileSheet(categories: Memo<Vec<ParsedCategory>>) -> impl IntoView {
    let controller = use_nav_controller();
    let close = move |_| controller.sheet_open.set(false);

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            controller.sheet_open.set(false);
        }
    };

    view! {
        <Show when=move || controller.sheet_open.get()>
            <div class="menu-sheet__backdrop" on:click=close></div>
            <div
                class="menu-sheet"
                role="dialog"
                aria-modal="true"
                aria-label="Menu categories"
                on:keydown=on_keydown
            >
                <div class="menu-sheet__header">
                    <span class="menu-sheet__title">"Categories"</span>
                    <button type="button" class="menu-sheet__close" aria-label="Close" on:click=close>
                        {icon("x")}
                    </button>
                </div>
                <div class="menu-sheet__list">
                    <For
                        each=move || categories.get().into_iter().enumerate()
                        key=|(index, category)| (*index, category.slug.clone())
                        children=move |(_, category)| {
                            view! {
                                <NavButton
                                    surface=NavSurface::Sheet
                                    slug=category.slug
                                    title=category.title
                                    class="menu-sheet__item"
                                />
                            }
                        }
                    />
                </div>
            </div>
        </Show>
    }
}
