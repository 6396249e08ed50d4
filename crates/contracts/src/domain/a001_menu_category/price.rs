//! Грамматика цены для разбора вставленного текста меню.
//!
//! Цена: это либо число с необязательным символом валюты и единицей
//! (`£6.50`, `12`, `25pp`, `€4,5 each`), либо одно из слов
//! `market`, `market price`, `mp`, `m.p.`, `ask for price`, `tbd`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Числовая цена без якорей, общая часть обоих выражений
const NUMERIC_PRICE: &str = r"(?:[£$€]\s*)?\d+(?:[.,]\d{1,2})?(?:\s*(?:pp|per|each))?";

static PRICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:{}|market|market price|mp|m\.p\.|ask for price|tbd)$",
        NUMERIC_PRICE
    ))
    .unwrap()
});

static TRAILING_PRICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<name>.*?)[\s\-–—:]+(?P<price>{})$",
        NUMERIC_PRICE
    ))
    .unwrap()
});

/// Проверяет, что весь токен (после trim) является ценой
pub fn is_price(token: &str) -> bool {
    PRICE_REGEX.is_match(token.trim())
}

/// Отделяет цену в конце строки: `"House Red 175ml 6.50"` → `("House Red 175ml", "6.50")`.
///
/// Возвращает `None`, если в конце нет цены или до неё не осталось имени.
pub fn split_trailing_price(line: &str) -> Option<(String, String)> {
    let caps = TRAILING_PRICE_REGEX.captures(line.trim())?;
    let name = caps.name("name")?.as_str().trim();
    let price = caps.name("price")?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), price.to_string()))
}
