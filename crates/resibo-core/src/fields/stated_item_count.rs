//! `stated_item_count`: three probes in order. Supermarket layouts must use
//! only the first probe; `ITEMS PURCHASED` there is a summed quantity, not a
//! line count (spec §4.L3).

use crate::patterns;

pub fn extract_stated_item_count(lines: &[String], supermarket: bool) -> Option<u32> {
    for line in lines {
        if let Some(caps) = patterns::ITEM_COUNT_LINE.captures(line) {
            if let Ok(n) = caps[1].parse() {
                return Some(n);
            }
        }
    }

    if supermarket {
        return None;
    }

    for (i, line) in lines.iter().enumerate() {
        if patterns::ITEM_COUNT_SPLIT_OPEN.is_match(line.trim()) {
            if let Some(middle) = lines.get(i + 1) {
                if let Some(caps) = patterns::ITEM_COUNT_SPLIT_MIDDLE.captures(middle.trim()) {
                    if let Ok(n) = caps[1].parse() {
                        return Some(n);
                    }
                }
            }
        }
    }

    for line in lines {
        if let Some(caps) = patterns::ITEMS_PURCHASED.captures(line) {
            if let Ok(n) = caps[1].parse() {
                return Some(n);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_stated_item_count_banner() {
        let lines = vec!["** 5 item(s) **".to_string()];
        assert_eq!(extract_stated_item_count(&lines, false), Some(5));
    }

    #[test]
    fn test_extract_stated_item_count_split() {
        let lines = vec!["**".to_string(), "3 item(s)".to_string(), "**".to_string()];
        assert_eq!(extract_stated_item_count(&lines, false), Some(3));
    }

    #[test]
    fn test_extract_stated_item_count_supermarket_ignores_items_purchased() {
        let lines = vec!["ITEMS PURCHASED: 7".to_string()];
        assert_eq!(extract_stated_item_count(&lines, true), None);
    }

    #[test]
    fn test_extract_stated_item_count_items_purchased_nonsupermarket() {
        let lines = vec!["ITEMS PURCHASED: 7".to_string()];
        assert_eq!(extract_stated_item_count(&lines, false), Some(7));
    }
}
