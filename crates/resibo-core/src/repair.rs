//! Conservative pre-pass line repair, standing in for the external
//! text-repair collaborator named in the wider pipeline design. Only the
//! one explicitly-specified rule is implemented here, not invented: a bare
//! `P` immediately before a price is an OCR-dropped peso sign
//! (`P1220.00 -> ₱1220.00`), while `PDR`, `PHP`, `PCS` and similar
//! abbreviations must never be touched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BARE_PESO_PRICE: Regex = Regex::new(r"\bP(\d[\d,]*\.\d{2})").unwrap();
}

/// A single line-level repair rule, applied before the rest of the pipeline
/// ever sees the text.
pub trait LineRepairer {
    /// Returns the repaired line, or the input unchanged if no rule applied.
    fn repair(&self, line: &str) -> String;
}

/// Replaces a bare `P` glued to a price with the peso sign it most likely
/// lost to OCR. `\b` already keeps this from firing inside `PHP`/`PDR`/`PCS`:
/// those have a letter, not a digit, immediately after the leading `P`.
pub struct PesoSignRepairer;

impl LineRepairer for PesoSignRepairer {
    fn repair(&self, line: &str) -> String {
        BARE_PESO_PRICE.replace_all(line, "₱$1").into_owned()
    }
}

/// Runs every repairer over every line, in order.
pub fn repair_lines(lines: &[String], repairers: &[Box<dyn LineRepairer>]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let mut current = line.clone();
            for repairer in repairers {
                current = repairer.repair(&current);
            }
            current
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_peso_repaired() {
        assert_eq!(PesoSignRepairer.repair("P1220.00"), "₱1220.00");
    }

    #[test]
    fn test_php_untouched() {
        assert_eq!(PesoSignRepairer.repair("PHP1220.00"), "PHP1220.00");
    }

    #[test]
    fn test_pdr_untouched() {
        assert_eq!(PesoSignRepairer.repair("NIDO5+PDR MLK2kg"), "NIDO5+PDR MLK2kg");
    }

    #[test]
    fn test_pcs_untouched() {
        assert_eq!(PesoSignRepairer.repair("3 PCS 45.00"), "3 PCS 45.00");
    }

    #[test]
    fn test_repair_lines_applies_all_repairers() {
        let lines = vec!["P1220.00".to_string(), "PHP1220.00".to_string()];
        let repairers: Vec<Box<dyn LineRepairer>> = vec![Box::new(PesoSignRepairer)];
        let repaired = repair_lines(&lines, &repairers);
        assert_eq!(repaired, vec!["₱1220.00".to_string(), "PHP1220.00".to_string()]);
    }
}
