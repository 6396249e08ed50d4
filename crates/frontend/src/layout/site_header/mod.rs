use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn SiteHeader() -> impl IntoView {
    view! {
        <header class="site-header" data-site-header="">
            <div class="site-header__brand">
                <span class="site-header__title">"Menu"</span>
            </div>
        </header>
    }
}
