//! Нормализация списка категорий CMS в категории, готовые к показу.

use super::aggregate::{ItemEntryMode, ParsedCategory, RawCategory};
use super::parser::parse_items;

/// Превращает категории CMS в `ParsedCategory`, сохраняя порядок.
///
/// Категории без единой разобранной позиции исключаются целиком.
/// Совпадающие slug не переименовываются: навигация по такому slug
/// достаётся последней категории.
pub fn normalize(raw: &[RawCategory]) -> Vec<ParsedCategory> {
    raw.iter()
        .enumerate()
        .filter_map(|(idx, category)| normalize_one(idx, category))
        .collect()
}

fn normalize_one(idx: usize, raw: &RawCategory) -> Option<ParsedCategory> {
    let n = idx + 1;
    let title = raw
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Category {}", n));

    let items = parse_items(raw);
    if items.is_empty() {
        match raw.item_entry_mode {
            ItemEntryMode::Structured => log::warn!(
                "Menu category '{}' has no items with a name, skipping",
                title
            ),
            ItemEntryMode::Text => log::warn!(
                "Menu category '{}' text contains no lines with a name, skipping",
                title
            ),
        }
        return None;
    }

    Some(ParsedCategory {
        key: if raw.key.trim().is_empty() {
            format!("category-{}", n)
        } else {
            raw.key.clone()
        },
        slug: resolve_slug(&title, &raw.key, n),
        title,
        tagline: raw
            .tagline
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        items,
    })
}

fn resolve_slug(title: &str, key: &str, n: usize) -> String {
    let from_title = slugify(title);
    if !from_title.is_empty() {
        return from_title;
    }
    let from_key = slugify(key);
    if !from_key.is_empty() {
        return from_key;
    }
    format!("category-{}", n)
}

/// Slug для URL и якоря: строчные ASCII буквы и цифры, остальное схлопывается в одиночный `-`.
///
/// `"Wine & Fizz"` → `"wine-fizz"`, `"Café"` → `"caf"`, `"***"` → `""`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
