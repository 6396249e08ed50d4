pub mod site_header;

use leptos::prelude::*;
use site_header::SiteHeader;

/// Page shell.
///
/// ```text
/// +------------------------------------------+
/// |   SiteHeader (sticky, data-site-header)  |
/// +------------------------------------------+
/// |   content                                |
/// +------------------------------------------+
/// ```
///
/// The scroll orchestrator measures the header through `data-site-header`,
/// so content scrolled into view is never hidden under it.
#[component]
#[allow(non_snake_case)]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <SiteHeader />
            <main class="app-main">
                {children()}
            </main>
        </div>
    }
}
