use crate::domain::a001_menu_category::nav::use_nav_controller;
use crate::shared::icons::icon;
use contracts::domain::a001_menu_category::{ParsedCategory, ParsedMenuItem};
use leptos::prelude::*;
use web_sys::HtmlElement;

#[component]
#[allow(non_snake_case)]
pub fn CategoryAccordion(categories: Memo<Vec<ParsedCategory>>) -> impl IntoView {
    view! {
        <div class="menu-accordion">
            <For
                each=move || categories.get().into_iter().enumerate()
                key=|(index, category)| (*index, category.slug.clone())
                children=move |(_, category)| view! { <CategoryPanel category=category /> }
            />
        </div>
    }
}

/// One collapsible category section.
///
/// The content container is registered with the controller under the slug:
/// it is what the intersection observer watches and what the scroll chain
/// probes for layout.
#[component]
#[allow(non_snake_case)]
pub fn CategoryPanel(category: ParsedCategory) -> impl IntoView {
    let controller = use_nav_controller();
    let content_ref = NodeRef::<leptos::html::Div>::new();
    let registered = StoredValue::new_local(None::<HtmlElement>);

    let anchor = category.anchor_id();
    let content_id = format!("{}-content", anchor);
    let ParsedCategory {
        slug,
        title,
        tagline,
        items,
        ..
    } = category;

    let is_open = Memo::new({
        let slug = slug.clone();
        move |_| controller.state.with(|s| s.is_open(&slug))
    });
    let is_active = Memo::new({
        let slug = slug.clone();
        move |_| controller.state.with(|s| s.is_active(&slug))
    });

    Effect::new({
        let slug = slug.clone();
        move |_| {
            if let Some(content) = content_ref.get() {
                let node: HtmlElement = content.into();
                controller.register_section(&slug, node.clone());
                registered.set_value(Some(node));
            }
        }
    });

    on_cleanup({
        let slug = slug.clone();
        move || {
            if let Some(Some(node)) = registered.try_get_value() {
                controller.deregister_section(&slug, &node);
            }
        }
    });

    let toggle_slug = slug.clone();

    view! {
        <section
            class="menu-section"
            class:menu-section--active=move || is_active.get()
            id=anchor
            data-menu-section=""
        >
            <h2 class="menu-section__heading">
                <button
                    type="button"
                    class="menu-section__toggle"
                    aria-expanded=move || is_open.get().to_string()
                    aria-controls=content_id.clone()
                    on:click=move |_| controller.toggle(&toggle_slug)
                >
                    <span class="menu-section__title">{title}</span>
                    {tagline.map(|tagline| view! { <span class="menu-section__tagline">{tagline}</span> })}
                    <span class="menu-section__chevron" class:menu-section__chevron--open=move || is_open.get()>
                        {icon("chevron-down")}
                    </span>
                </button>
            </h2>
            <div
                class="menu-section__content"
                id=content_id
                data-category-slug=slug
                hidden=move || !is_open.get()
                node_ref=content_ref
            >
                <ul class="menu-items">
                    {items.into_iter().map(|item| view! { <MenuItemRow item=item /> }).collect_view()}
                </ul>
            </div>
        </section>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn MenuItemRow(item: ParsedMenuItem) -> impl IntoView {
    let ParsedMenuItem {
        name,
        price,
        description,
        dietary,
        ..
    } = item;

    view! {
        <li class="menu-item">
            <div class="menu-item__line">
                <span class="menu-item__name">{name}</span>
                {price.map(|price| view! { <span class="menu-item__price">{price}</span> })}
            </div>
            {description.map(|description| view! { <p class="menu-item__description">{description}</p> })}
            {(!dietary.is_empty()).then(|| view! {
                <ul class="menu-item__dietary">
                    {dietary.into_iter().map(|tag| view! { <li class="menu-item__tag">{tag}</li> }).collect_view()}
                </ul>
            })}
        </li>
    }
}
