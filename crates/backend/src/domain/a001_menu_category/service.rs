use super::repository;
use contracts::domain::a001_menu_category::{normalize, RawCategory};

/// Raw categories as authored
pub async fn list_categories() -> anyhow::Result<Vec<RawCategory>> {
    let source = repository::get_source()?;
    Ok(source.load_categories().await?)
}

/// What the menu page will render for a given content snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSummary {
    pub authored_categories: usize,
    pub rendered_categories: usize,
    pub rendered_items: usize,
}

impl ContentSummary {
    pub fn skipped_categories(&self) -> usize {
        self.authored_categories - self.rendered_categories
    }
}

pub fn summarize(raw: &[RawCategory]) -> ContentSummary {
    let parsed = normalize(raw);
    ContentSummary {
        authored_categories: raw.len(),
        rendered_categories: parsed.len(),
        rendered_items: parsed.iter().map(|c| c.items.len()).sum(),
    }
}

/// Normalises the content once at startup so authoring problems show up in
/// the server log, not only in browser consoles.
pub async fn log_content_summary() {
    match list_categories().await {
        Ok(raw) => {
            let summary = summarize(&raw);
            tracing::info!(
                "Menu content: {} categories, {} items will render",
                summary.rendered_categories,
                summary.rendered_items
            );
            if summary.skipped_categories() > 0 {
                tracing::warn!(
                    "{} of {} menu categories have no items and will be hidden",
                    summary.skipped_categories(),
                    summary.authored_categories
                );
            }
        }
        Err(e) => tracing::error!("Menu content unavailable: {:#}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_menu_category::RawItem;

    #[test]
    fn test_summary_counts_rendered_content() {
        let raw = vec![
            RawCategory::structured(
                "a",
                "Starters",
                vec![RawItem::named("Soup"), RawItem::named("Bread")],
            ),
            RawCategory::structured("b", "Empty", vec![]),
            RawCategory::text("c", "Mains", "Steak £20\nFish £18\nPie £14"),
        ];

        let summary = summarize(&raw);
        assert_eq!(
            summary,
            ContentSummary {
                authored_categories: 3,
                rendered_categories: 2,
                rendered_items: 5,
            }
        );
        assert_eq!(summary.skipped_categories(), 1);
    }

    #[test]
    fn test_summary_of_empty_content() {
        let summary = summarize(&[]);
        assert_eq!(summary.rendered_categories, 0);
        assert_eq!(summary.skipped_categories(), 0);
    }
}
