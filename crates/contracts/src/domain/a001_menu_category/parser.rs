//! Разбор позиций одной категории.
//!
//! Structured-режим: прямое отображение записей CMS. Text-режим разбирает
//! вставленный текст построчно, с заглядыванием вперёд не больше чем на две
//! строки. Шаги конвейера:
//!
//! 1. `split_delimited`: строка с `|` или табуляцией: `имя | ... | цена | ...`
//! 2. `split_trailing`: цена в конце строки: `House Red 175ml 6.50`
//! 3. `lookahead_price`: цена на следующей строке, либо описание + цена на
//!    двух следующих (формат выгрузки Google Business)
//! 4. `correct_misclassified_price`: описание, похожее на цену, становится ценой
//! 5. `finish_name`: срезает хвостовые тире; пустое имя отбрасывает позицию

use super::aggregate::{ItemEntryMode, ParsedMenuItem, RawCategory, RawItem};
use super::price::{is_price, split_trailing_price};
use std::collections::HashSet;

/// Черновик позиции до финальной проверки имени
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ItemDraft {
    pub name: String,
    pub price: Option<String>,
    pub description: Option<String>,
    /// Строка была разбита по разделителю; заглядывание вперёд не применяется
    pub delimited: bool,
}

impl ItemDraft {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Разбирает позиции категории согласно её `item_entry_mode`
pub fn parse_items(raw: &RawCategory) -> Vec<ParsedMenuItem> {
    match raw.item_entry_mode {
        ItemEntryMode::Structured => parse_structured(raw.items.as_deref().unwrap_or(&[])),
        ItemEntryMode::Text => parse_text(raw.raw_text.as_deref().unwrap_or("")),
    }
}

// ============================================================================
// Structured
// ============================================================================

fn parse_structured(items: &[RawItem]) -> Vec<ParsedMenuItem> {
    let mut seen_keys = HashSet::new();

    items
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            // Позиция без имени не считается
            let name = non_blank(raw.name.as_deref())?;
            let base_key = non_blank(raw.key.as_deref()).unwrap_or_else(|| format!("item-{}", idx + 1));

            Some(ParsedMenuItem {
                key: unique_key(&mut seen_keys, base_key, idx),
                name,
                price: non_blank(raw.price.as_deref()),
                description: non_blank(raw.description.as_deref()),
                dietary: clean_dietary(raw.dietary.as_deref().unwrap_or(&[])),
            })
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn unique_key(seen: &mut HashSet<String>, base: String, idx: usize) -> String {
    let mut key = base.clone();
    let mut n = idx + 1;
    while seen.contains(&key) {
        key = format!("{}-{}", base, n);
        n += 1;
    }
    seen.insert(key.clone());
    key
}

fn clean_dietary(tags: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !result.iter().any(|existing| existing == tag) {
            result.push(tag.to_string());
        }
    }
    result
}

// ============================================================================
// Free text
// ============================================================================

fn parse_text(text: &str) -> Vec<ParsedMenuItem> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut items = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let mut draft = split_delimited(line).unwrap_or_else(|| split_trailing(line));

        let consumed = if draft.delimited || draft.price.is_some() {
            0
        } else {
            lookahead_price(&mut draft, &lines[i + 1..])
        };

        correct_misclassified_price(&mut draft);

        if let Some(name) = finish_name(&draft.name) {
            items.push(ParsedMenuItem {
                key: format!("line-{}", i + 1),
                name,
                price: draft.price,
                description: draft.description,
                dietary: Vec::new(),
            });
        }

        i += 1 + consumed;
    }
    items
}

/// Шаг 1: строка с разделителем `|` (приоритетнее) или табуляцией
pub(crate) fn split_delimited(line: &str) -> Option<ItemDraft> {
    let delimiter = if line.contains('|') {
        '|'
    } else if line.contains('\t') {
        '\t'
    } else {
        return None;
    };

    let segments: Vec<&str> = line
        .split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() < 2 {
        return None;
    }

    let name = segments[0];
    let rest = &segments[1..];

    let (price, description) = match rest.iter().position(|s| is_price(s)) {
        Some(pos) => {
            let leading = rest[..pos].join(" | ");
            let trailing = rest[pos + 1..].join(" | ");
            let description = [leading, trailing]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            (Some(rest[pos].to_string()), Some(description))
        }
        None => (None, Some(rest.join(" | "))),
    };

    Some(ItemDraft {
        name: name.to_string(),
        price,
        description: description.filter(|d| !d.is_empty()),
        delimited: true,
    })
}

/// Шаг 2: цена в конце строки, иначе вся строка становится именем
pub(crate) fn split_trailing(line: &str) -> ItemDraft {
    match split_trailing_price(line) {
        Some((name, price)) => ItemDraft {
            name,
            price: Some(price),
            ..ItemDraft::default()
        },
        None => ItemDraft::named(line),
    }
}

/// Шаг 3: ищет цену на следующих строках. Возвращает число поглощённых строк.
pub(crate) fn lookahead_price(draft: &mut ItemDraft, next: &[&str]) -> usize {
    if let (Some(description), Some(price)) = (next.first(), next.get(1)) {
        if is_price(price) {
            draft.description = Some(description.to_string());
            draft.price = Some(price.to_string());
            return 2;
        }
    }
    if let Some(price) = next.first() {
        if is_price(price) {
            draft.price = Some(price.to_string());
            return 1;
        }
    }
    0
}

/// Шаг 4: описание, которое само по себе цена, переносится в цену
pub(crate) fn correct_misclassified_price(draft: &mut ItemDraft) {
    if draft.price.is_none() {
        return;
    }
    if let Some(description) = draft.description.take() {
        if is_price(&description) {
            draft.price = Some(description);
        } else {
            draft.description = Some(description);
        }
    }
}

/// Шаг 5: имя без хвостовых `-`, `–`, `—`; пустое имя даёт `None`
pub(crate) fn finish_name(name: &str) -> Option<String> {
    let trimmed = name
        .trim()
        .trim_end_matches(|c: char| c == '-' || c == '–' || c == '—' || c.is_whitespace());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn text_items(text: &str) -> Vec<ParsedMenuItem> {
        parse_items(&RawCategory::text("c", "Test", text))
    }

    #[test]
    fn test_pipe_delimited_row() {
        let items = text_items("Bruschetta | Toasted sourdough, tomato | £6.50");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Bruschetta");
        assert_eq!(items[0].description.as_deref(), Some("Toasted sourdough, tomato"));
        assert_eq!(items[0].price.as_deref(), Some("£6.50"));
        assert!(items[0].dietary.is_empty());
    }

    #[test]
    fn test_three_line_google_pattern() {
        let items = text_items("Soup of the Day\nAsk kitchen for today's selection\n£5.00");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Soup of the Day");
        assert_eq!(
            items[0].description.as_deref(),
            Some("Ask kitchen for today's selection")
        );
        assert_eq!(items[0].price.as_deref(), Some("£5.00"));
    }

    #[test]
    fn test_trailing_price_line() {
        let items = text_items("House Red 175ml 6.50");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "House Red 175ml");
        assert_eq!(items[0].price.as_deref(), Some("6.50"));
    }

    #[test]
    fn test_price_on_next_line() {
        let items = text_items("Garlic Bread\n£4\nOlives\n£3.50");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Garlic Bread");
        assert_eq!(items[0].price.as_deref(), Some("£4"));
        assert_eq!(items[0].description, None);
        assert_eq!(items[1].name, "Olives");
        assert_eq!(items[1].price.as_deref(), Some("£3.50"));
    }

    #[test]
    fn test_names_without_prices_are_kept() {
        let items = text_items("Fries\nOnion Rings\n\n  Coleslaw  ");
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Fries", "Onion Rings", "Coleslaw"]);
        assert!(items.iter().all(|i| i.price.is_none()));
    }

    #[test]
    fn test_keys_follow_source_lines() {
        let items = text_items("Soup\nDesc\n£5\nBread 3");
        assert_eq!(items[0].key, "line-1");
        assert_eq!(items[1].key, "line-4");
    }

    #[rstest]
    #[case("Steak\t28oz ribeye\t£32", "Steak", Some("£32"), Some("28oz ribeye"))]
    #[case("Wine | £5 | 175ml glass", "Wine", Some("£5"), Some("175ml glass"))]
    #[case("Wine | Red | Rioja | £7", "Wine", Some("£7"), Some("Red | Rioja"))]
    #[case("Tea | Breakfast blend", "Tea", None, Some("Breakfast blend"))]
    #[case("Oysters | market price", "Oysters", Some("market price"), None)]
    #[case("Chips — £3", "Chips", Some("£3"), None)]
    #[case("Lobster —", "Lobster", None, None)]
    fn test_single_line_shapes(
        #[case] line: &str,
        #[case] name: &str,
        #[case] price: Option<&str>,
        #[case] description: Option<&str>,
    ) {
        let items = text_items(line);
        assert_eq!(items.len(), 1, "line {:?}", line);
        assert_eq!(items[0].name, name);
        assert_eq!(items[0].price.as_deref(), price);
        assert_eq!(items[0].description.as_deref(), description);
    }

    #[test]
    fn test_pipe_takes_priority_over_tab() {
        let draft = split_delimited("A\tB | £4").unwrap();
        assert_eq!(draft.name, "A\tB");
        assert_eq!(draft.price.as_deref(), Some("£4"));
    }

    #[test]
    fn test_split_delimited_needs_two_segments() {
        assert_eq!(split_delimited("Salad |"), None);
        assert_eq!(split_delimited("Plain line"), None);
    }

    #[test]
    fn test_delimited_row_does_not_look_ahead() {
        let items = text_items("Tea | Breakfast blend\n£2");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].price, None);
        assert_eq!(items[1].name, "£2");
    }

    #[test]
    fn test_lookahead_prefers_two_line_window() {
        let mut draft = ItemDraft::named("Soup");
        let consumed = lookahead_price(&mut draft, &["Leek and potato", "£5"]);
        assert_eq!(consumed, 2);
        assert_eq!(draft.description.as_deref(), Some("Leek and potato"));
        assert_eq!(draft.price.as_deref(), Some("£5"));

        let mut draft = ItemDraft::named("Soup");
        assert_eq!(lookahead_price(&mut draft, &["£5", "Bread"]), 1);
        assert_eq!(draft.price.as_deref(), Some("£5"));
        assert_eq!(draft.description, None);

        let mut draft = ItemDraft::named("Soup");
        assert_eq!(lookahead_price(&mut draft, &["Bread", "Butter"]), 0);
        assert_eq!(draft, ItemDraft::named("Soup"));
    }

    #[test]
    fn test_misclassified_price_moves_into_price_slot() {
        // "£4" стоит на месте описания: окно из двух строк захватило обе цены
        let items = text_items("Soup\n£4\n£5");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price.as_deref(), Some("£4"));
        assert_eq!(items[0].description, None);
    }

    #[test]
    fn test_correction_requires_price() {
        let mut draft = ItemDraft {
            name: "Soup".into(),
            description: Some("£4".into()),
            ..ItemDraft::default()
        };
        correct_misclassified_price(&mut draft);
        assert_eq!(draft.description.as_deref(), Some("£4"));
        assert_eq!(draft.price, None);
    }

    #[test]
    fn test_finish_name() {
        assert_eq!(finish_name("Soup —"), Some("Soup".to_string()));
        assert_eq!(finish_name("Soup - – "), Some("Soup".to_string()));
        assert_eq!(finish_name("Half-and-half"), Some("Half-and-half".to_string()));
        assert_eq!(finish_name(" — "), None);
        assert_eq!(finish_name(""), None);
    }

    #[test]
    fn test_blank_text_yields_nothing() {
        assert!(text_items("").is_empty());
        assert!(text_items("   \n\t\n  ").is_empty());
        let missing = RawCategory {
            item_entry_mode: ItemEntryMode::Text,
            ..RawCategory::default()
        };
        assert!(parse_items(&missing).is_empty());
    }

    #[test]
    fn test_structured_items() {
        let raw = RawCategory::structured(
            "c",
            "Starters",
            vec![
                RawItem {
                    key: Some("olives".into()),
                    name: Some("  Olives ".into()),
                    price: Some(" £4 ".into()),
                    description: Some("   ".into()),
                    dietary: Some(vec!["vg".into(), " ".into(), "gf".into(), "vg".into()]),
                },
                RawItem::named("   "),
                RawItem {
                    name: None,
                    price: Some("£9".into()),
                    ..RawItem::default()
                },
                RawItem::named("Bread"),
            ],
        );
        let items = parse_items(&raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].key, "olives");
        assert_eq!(items[0].name, "Olives");
        assert_eq!(items[0].price.as_deref(), Some("£4"));
        assert_eq!(items[0].description, None);
        assert_eq!(items[0].dietary, vec!["vg", "gf"]);
        assert_eq!(items[1].key, "item-4");
        assert_eq!(items[1].name, "Bread");
    }

    #[test]
    fn test_structured_keys_are_unique() {
        let mut a = RawItem::named("A");
        a.key = Some("dup".into());
        let mut b = RawItem::named("B");
        b.key = Some("dup".into());
        let items = parse_items(&RawCategory::structured("c", "T", vec![a, b]));
        assert_eq!(items[0].key, "dup");
        assert_eq!(items[1].key, "dup-2");
    }

    #[test]
    fn test_mode_selects_source() {
        // text-режим игнорирует items, structured игнорирует raw_text
        let mut raw = RawCategory::text("c", "T", "Soup 5");
        raw.items = Some(vec![RawItem::named("Ignored")]);
        assert_eq!(parse_items(&raw)[0].name, "Soup");

        raw.item_entry_mode = ItemEntryMode::Structured;
        assert_eq!(parse_items(&raw)[0].name, "Ignored");
    }

    proptest! {
        #[test]
        fn prop_text_parse_is_pure_and_names_non_empty(text in "[A-Za-z0-9£.,|\t —\n-]{0,120}") {
            let raw = RawCategory::text("c", "T", &text);
            let first = parse_items(&raw);
            let second = parse_items(&raw);
            prop_assert_eq!(&first, &second);
            for item in &first {
                prop_assert!(!item.name.is_empty());
                prop_assert_eq!(item.name.trim(), item.name.as_str());
            }
        }

        #[test]
        fn prop_structured_emits_one_item_per_named_record(names in proptest::collection::vec("[ a-zA-Z]{0,12}", 0..12)) {
            let raw_items: Vec<RawItem> = names.iter().map(|n| RawItem::named(n.clone())).collect();
            let items = parse_items(&RawCategory::structured("c", "T", raw_items));
            let expected: Vec<&str> = names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect();
            let actual: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
