//! `time`: first match whose immediately preceding character is not a digit.

use crate::patterns;

fn preceded_by_digit(line: &str, match_start: usize) -> bool {
    line[..match_start]
        .chars()
        .next_back()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false)
}

pub fn extract_time(lines: &[String]) -> Option<String> {
    for line in lines {
        if let Some(m) = patterns::TIME_HMS
            .find_iter(line)
            .find(|m| !preceded_by_digit(line, m.start()))
        {
            return Some(m.as_str().trim().to_string());
        }
    }
    for line in lines {
        if let Some(m) = patterns::TIME_HM
            .find_iter(line)
            .find(|m| !preceded_by_digit(line, m.start()))
        {
            return Some(m.as_str().trim().to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_time_hms() {
        let lines = vec!["11-13-25 09:29:10 AM".to_string()];
        assert_eq!(extract_time(&lines), Some("09:29:10 AM".to_string()));
    }

    #[test]
    fn test_extract_time_single_letter_suffix() {
        let lines = vec!["TXN#071432 11-01-25 09:29P RACKY".to_string()];
        assert_eq!(extract_time(&lines), Some("09:29P".to_string()));
    }

    #[test]
    fn test_extract_time_rejects_digit_preceded() {
        // A time-shaped tail fused onto a longer digit run is not a real
        // standalone time and must not be picked up.
        let lines = vec!["125:09:29".to_string()];
        assert_eq!(extract_time(&lines), None);
    }
}
