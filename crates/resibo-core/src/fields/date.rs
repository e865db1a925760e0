//! `date`: a four-round scan plus a Mercury-Drug TXN-embedded fifth round
//! (spec §4.L3).

use regex::Regex;

use crate::patterns;

const SHORT_LINE: usize = 25;

/// A match whose immediately following character is `-` is part of a date
/// range (`08/01/20-07/31/25`) and is rejected.
fn is_range_start(line: &str, match_end: usize) -> bool {
    line[match_end..].starts_with('-')
}

fn first_unranged_match<'a>(re: &Regex, line: &'a str) -> Option<regex::Match<'a>> {
    re.find_iter(line).find(|m| !is_range_start(line, m.end()))
}

fn is_context_labelled(line: &str) -> bool {
    patterns::DATE_CONTEXT_LABEL.is_match(line)
}

/// Validated `MM-DD-YY` lifted from a `TXN#` line, covering all three OCR
/// merge formats the spec documents.
fn txn_embedded_date(line: &str) -> Option<String> {
    if !patterns::TXN_PREFIX.is_match(line) {
        return None;
    }

    for caps in patterns::TXN_DATE_DASHED.captures_iter(line) {
        if let Some(date) = validate_mmddyy(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    let no_dash: String = line.chars().filter(|c| *c != '-').collect();
    if let Some(caps) = patterns::TXN_DATE_MERGED.captures(&no_dash) {
        if let Some(date) = validate_mmddyy(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    None
}

fn validate_mmddyy(mm: &str, dd: &str, yy: &str) -> Option<String> {
    let m: u32 = mm.parse().ok()?;
    let d: u32 = dd.parse().ok()?;
    let y: u32 = yy.parse().ok()?;
    if (1..=12).contains(&m) && (1..=31).contains(&d) && y >= 20 {
        Some(format!("{mm}-{dd}-{yy}"))
    } else {
        None
    }
}

/// Four rounds of standalone-date patterns, then a TXN-embedded fifth round.
pub fn extract_date(lines: &[String]) -> Option<String> {
    let numeric_and_written_4y = [&*patterns::DATE_MDY_4Y, &*patterns::DATE_YMD_4Y, &*patterns::DATE_WRITTEN_4Y];
    let numeric_and_written_2y = [&*patterns::DATE_MDY_2Y, &*patterns::DATE_WRITTEN_2Y];

    // Round 1: standalone / short lines, 4-digit then 2-digit year patterns.
    for line in lines.iter().filter(|l| l.trim().len() <= SHORT_LINE) {
        for re in numeric_and_written_4y.iter().chain(numeric_and_written_2y.iter()) {
            if let Some(m) = first_unranged_match(re, line) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }

    // Round 2: any line, same pattern groups.
    for line in lines {
        for re in numeric_and_written_4y.iter().chain(numeric_and_written_2y.iter()) {
            if let Some(m) = first_unranged_match(re, line) {
                return Some(m.as_str().trim().to_string());
            }
        }
    }

    // Round 3: context-labelled or short lines, month-year only.
    for line in lines.iter().filter(|l| is_context_labelled(l) || l.trim().len() <= SHORT_LINE) {
        if let Some(m) = first_unranged_match(&patterns::DATE_MONTH_YEAR, line) {
            return Some(m.as_str().trim().to_string());
        }
    }

    // Round 4: context-labelled only, bare day/month (highest ambiguity).
    for line in lines.iter().filter(|l| is_context_labelled(l)) {
        if let Some(m) = first_unranged_match(&patterns::DATE_DAY_MONTH_BARE, line) {
            return Some(m.as_str().trim().to_string());
        }
    }

    // Round 5: Mercury Drug TXN-embedded date recovery.
    for line in lines {
        if let Some(date) = txn_embedded_date(line) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_mdy_4y() {
        let lines = vec!["07/26/2026".to_string()];
        assert_eq!(extract_date(&lines), Some("07/26/2026".to_string()));
    }

    #[test]
    fn test_extract_date_rejects_range_start() {
        let lines = vec!["VALID 08/01/20-".to_string()];
        // The only date on the line is the start of a range and must be
        // skipped; no valid date remains.
        assert_eq!(extract_date(&lines), None);
    }

    #[test]
    fn test_extract_date_accepts_range_end() {
        let lines = vec!["VALID 08/01/20-07/31/25".to_string()];
        // The range start is skipped but the range end is a legitimate match.
        assert_eq!(extract_date(&lines), Some("07/31/25".to_string()));
    }

    #[test]
    fn test_txn_embedded_date_space_separated() {
        let lines = vec!["TXN#071432 11-01-25 09:29P RACKY".to_string()];
        assert_eq!(extract_date(&lines), Some("11-01-25".to_string()));
    }

    #[test]
    fn test_txn_embedded_date_digits_run_together() {
        let lines = vec!["TXN#93179911-13-25 03:36P p1lar".to_string()];
        assert_eq!(extract_date(&lines), Some("11-13-25".to_string()));
    }

    #[test]
    fn test_txn_embedded_date_fully_merged() {
        let lines = vec!["TXN#135330-101113-2509:11PDORIS".to_string()];
        assert_eq!(extract_date(&lines), Some("11-13-25".to_string()));
    }

    #[test]
    fn test_extract_date_context_labelled_month_year() {
        let lines = vec!["Accreditation valid as of July 2026".to_string()];
        assert_eq!(extract_date(&lines), Some("July 2026".to_string()));
    }
}
