use crate::domain::a001_menu_category::nav::{use_nav_controller, NavSurface};
use leptos::prelude::*;
use web_sys::HtmlElement;

/// One navigation affordance for a category. All four surfaces use it, so
/// every click goes through `request_scroll_to` and every button is known to
/// the registry for focus handoff.
#[component]
#[allow(non_snake_case)]
pub fn NavButton(
    surface: NavSurface,
    slug: String,
    title: String,
    /// BEM block, e.g. `menu-tab`; `{class}--active` is added for the active slug
    class: &'static str,
) -> impl IntoView {
    let controller = use_nav_controller();
    let node_ref = NodeRef::<leptos::html::Button>::new();
    let registered = StoredValue::new_local(None::<HtmlElement>);

    let is_active = Memo::new({
        let slug = slug.clone();
        move |_| controller.state.with(|s| s.is_active(&slug))
    });

    Effect::new({
        let slug = slug.clone();
        move |_| {
            if let Some(button) = node_ref.get() {
                let node: HtmlElement = button.into();
                controller.register_control(surface, &slug, node.clone());
                registered.set_value(Some(node));
            }
        }
    });

    on_cleanup({
        let slug = slug.clone();
        move || {
            if let Some(Some(node)) = registered.try_get_value() {
                controller.deregister_control(surface, &slug, &node);
            }
        }
    });

    view! {
        <button
            type="button"
            node_ref=node_ref
            class=move || {
                if is_active.get() {
                    format!("{class} {class}--active")
                } else {
                    class.to_string()
                }
            }
            aria-current=move || is_active.get().then_some("true")
            on:click=move |_| controller.request_scroll_to(&slug)
        >
            {title}
        </button>
    }
}
