//! `tin`: first `TIN_PATTERNS` match, accepting either dashed or plain form.

use crate::patterns;

pub fn extract_tin(lines: &[String]) -> Option<String> {
    for line in lines {
        if let Some(caps) = patterns::TIN_DASHED.captures(line) {
            return Some(caps[1].to_string());
        }
    }
    for line in lines {
        if !patterns::TIN_LABEL.is_match(line) {
            continue;
        }
        if let Some(caps) = patterns::TIN_PLAIN.captures(line) {
            return Some(caps[1].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tin_dashed() {
        let lines = vec!["VAT REG TIN: 000-388-474-00778".to_string()];
        assert_eq!(extract_tin(&lines), Some("000-388-474-00778".to_string()));
    }

    #[test]
    fn test_extract_tin_plain_requires_label() {
        let lines = vec!["TIN 00038847400778".to_string()];
        assert_eq!(extract_tin(&lines), Some("00038847400778".to_string()));
    }

    #[test]
    fn test_extract_tin_plain_digits_without_label_ignored() {
        let lines = vec!["480036140523001".to_string()];
        assert_eq!(extract_tin(&lines), None);
    }
}
