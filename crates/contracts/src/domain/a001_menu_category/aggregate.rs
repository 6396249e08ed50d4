use serde::{Deserialize, Serialize};

// ============================================================================
// Raw CMS content
// ============================================================================

/// Способ ввода позиций категории в CMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemEntryMode {
    /// Позиции заведены отдельными записями
    #[default]
    Structured,
    /// Позиции вставлены одним блоком текста
    Text,
}

/// Позиция меню в том виде, в каком её отдаёт CMS (structured-режим)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    #[serde(default, alias = "_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary: Option<Vec<String>>,
}

impl RawItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Категория меню из CMS. Неизменяемый вход на один проход рендера.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCategory {
    #[serde(default, alias = "_key")]
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default)]
    pub item_entry_mode: ItemEntryMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RawItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl RawCategory {
    /// Категория со структурированными позициями
    pub fn structured(key: &str, title: &str, items: Vec<RawItem>) -> Self {
        Self {
            key: key.to_string(),
            title: Some(title.to_string()),
            item_entry_mode: ItemEntryMode::Structured,
            items: Some(items),
            ..Self::default()
        }
    }

    /// Категория с позициями, вставленными текстом
    pub fn text(key: &str, title: &str, raw_text: &str) -> Self {
        Self {
            key: key.to_string(),
            title: Some(title.to_string()),
            item_entry_mode: ItemEntryMode::Text,
            raw_text: Some(raw_text.to_string()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Parsed model
// ============================================================================

/// Позиция меню после разбора. `name` никогда не пустое.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedMenuItem {
    /// Уникален в пределах категории
    pub key: String,
    pub name: String,
    pub price: Option<String>,
    pub description: Option<String>,
    pub dietary: Vec<String>,
}

impl ParsedMenuItem {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            price: None,
            description: None,
            dietary: Vec::new(),
        }
    }
}

/// Категория, готовая к показу: есть slug и хотя бы одна позиция
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedCategory {
    pub key: String,
    /// Безопасен для URL/якоря, используется как DOM id и цель прокрутки
    pub slug: String,
    pub title: String,
    pub tagline: Option<String>,
    pub items: Vec<ParsedMenuItem>,
}

impl ParsedCategory {
    /// DOM id секции категории
    pub fn anchor_id(&self) -> String {
        anchor_id(&self.slug)
    }
}

/// DOM id секции по slug
pub fn anchor_id(slug: &str) -> String {
    format!("menu-{}", slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_cms_shape() {
        let json = r#"[
            {"_key": "c1", "title": "Starters", "itemEntryMode": "structured",
             "items": [{"_key": "i1", "name": "Olives", "price": "£4", "dietary": ["vg"]}]},
            {"key": "c2", "title": "Mains", "itemEntryMode": "text", "rawText": "Steak 24"}
        ]"#;
        let cats: Vec<RawCategory> = serde_json::from_str(json).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].key, "c1");
        assert_eq!(cats[0].item_entry_mode, ItemEntryMode::Structured);
        let items = cats[0].items.as_ref().unwrap();
        assert_eq!(items[0].key.as_deref(), Some("i1"));
        assert_eq!(items[0].dietary, Some(vec!["vg".to_string()]));
        assert_eq!(cats[1].item_entry_mode, ItemEntryMode::Text);
        assert_eq!(cats[1].raw_text.as_deref(), Some("Steak 24"));
    }

    #[test]
    fn test_missing_fields_degrade_to_defaults() {
        let cat: RawCategory = serde_json::from_str("{}").unwrap();
        assert_eq!(cat.key, "");
        assert_eq!(cat.title, None);
        assert_eq!(cat.item_entry_mode, ItemEntryMode::Structured);
        assert!(cat.items.is_none());

        let item: RawItem = serde_json::from_str(r#"{"price": "5"}"#).unwrap();
        assert_eq!(item.name, None);
    }

    #[test]
    fn test_anchor_id() {
        assert_eq!(anchor_id("starters"), "menu-starters");
    }
}
