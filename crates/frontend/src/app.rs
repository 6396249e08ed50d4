use crate::domain::a001_menu_category::ui::MenuPage;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Shell>
            <MenuPage />
        </Shell>
    }
}
