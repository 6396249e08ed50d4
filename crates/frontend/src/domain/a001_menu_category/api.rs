//! API client for menu content

use crate::shared::api_utils::api_url;
use contracts::domain::a001_menu_category::RawCategory;
use gloo_net::http::Request;

/// Raw CMS categories in authoring order. Normalisation happens on the client.
pub async fn fetch_categories() -> Result<Vec<RawCategory>, String> {
    let response = Request::get(&api_url("/api/menu/categories"))
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("Could not load the menu: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    response.json().await.map_err(|e| e.to_string())
}
