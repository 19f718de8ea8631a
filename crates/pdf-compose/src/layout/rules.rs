//! Page applicability and label formatting.

use crate::config::PageRule;

impl PageRule {
    /// Whether a decoration applies to the page at `index` (zero-based).
    ///
    /// `Odd` matches even indices: index 0 is displayed page 1, which is
    /// conventionally odd. Inverting this parity is the classic porting
    /// mistake.
    pub fn applies_to(&self, index: usize) -> bool {
        match self {
            PageRule::All => true,
            PageRule::Odd => index % 2 == 0,
            PageRule::Even => index % 2 == 1,
            PageRule::Pages(set) => set.contains(&index),
        }
    }
}

/// Render a page-number label from the format template.
///
/// `{n}` becomes `page_index + start_number`, `{total}` the page count.
/// Templates are validated at configuration time; this function only
/// substitutes.
pub fn format_page_label(
    template: &str,
    page_index: usize,
    start_number: usize,
    total: usize,
) -> String {
    template
        .replace("{n}", &(page_index + start_number).to_string())
        .replace("{total}", &total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_odd_matches_first_page() {
        assert!(PageRule::Odd.applies_to(0));
        assert!(!PageRule::Odd.applies_to(1));
        assert!(PageRule::Odd.applies_to(2));
    }

    #[test]
    fn test_even_matches_second_page() {
        assert!(!PageRule::Even.applies_to(0));
        assert!(PageRule::Even.applies_to(1));
        assert!(!PageRule::Even.applies_to(2));
    }

    #[test]
    fn test_all_and_explicit_set() {
        assert!(PageRule::All.applies_to(17));
        let rule = PageRule::Pages(BTreeSet::from([0, 2]));
        assert!(rule.applies_to(0));
        assert!(!rule.applies_to(1));
        assert!(rule.applies_to(2));
        assert!(!rule.applies_to(3));
    }

    #[test]
    fn test_label_substitution() {
        assert_eq!(format_page_label("{n}", 0, 1, 10), "1");
        assert_eq!(format_page_label("{n} / {total}", 4, 1, 10), "5 / 10");
        assert_eq!(format_page_label("Page {n} of {total}", 0, 5, 9), "Page 5 of 9");
        assert_eq!(format_page_label("no placeholders", 3, 1, 10), "no placeholders");
    }
}
