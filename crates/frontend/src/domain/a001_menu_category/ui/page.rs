use super::navigator::MenuNavigator;
use crate::domain::a001_menu_category::api::fetch_categories;
use crate::shared::icons::icon;
use contracts::domain::a001_menu_category::{normalize, ParsedCategory, RawCategory};
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum PageStatus {
    Loading,
    Failed(String),
    Empty,
    Ready,
}

/// Menu page: loads raw CMS content, normalises it once per load and hands
/// the result to the navigator.
#[component]
#[allow(non_snake_case)]
pub fn MenuPage() -> impl IntoView {
    let (raw, set_raw) = signal::<Option<Vec<RawCategory>>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let fetch = move || {
        set_error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_categories().await {
                Ok(v) => {
                    log::debug!("menu content loaded: {} raw categories", v.len());
                    set_raw.set(Some(v));
                }
                Err(e) => {
                    log::error!("menu content failed to load: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    fetch();

    let categories: Memo<Vec<ParsedCategory>> =
        Memo::new(move |_| raw.with(|r| r.as_deref().map(normalize).unwrap_or_default()));

    // Статус отдельной мемо: навигатор не пересоздаётся при обновлении контента
    let status = Memo::new(move |_| {
        if let Some(e) = error.get() {
            PageStatus::Failed(e)
        } else if raw.with(Option::is_none) {
            PageStatus::Loading
        } else if categories.with(Vec::is_empty) {
            PageStatus::Empty
        } else {
            PageStatus::Ready
        }
    });

    view! {
        <div class="menu-page">
            {move || match status.get() {
                PageStatus::Loading => view! {
                    <div class="menu-page__state">"Loading menu..."</div>
                }.into_any(),
                PageStatus::Failed(e) => view! {
                    <div class="menu-page__state menu-page__state--error">
                        {icon("alert-circle")}
                        <span>{e}</span>
                        <button type="button" class="menu-page__retry" on:click=move |_| fetch()>
                            {icon("refresh")}
                            "Try again"
                        </button>
                    </div>
                }.into_any(),
                PageStatus::Empty => view! {
                    <div class="menu-page__state">"The menu is being updated. Please check back soon."</div>
                }.into_any(),
                PageStatus::Ready => view! {
                    <MenuNavigator categories=categories />
                }.into_any(),
            }}
        </div>
    }
}
