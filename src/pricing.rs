//! Pricing arithmetic for estimation line items.
//!
//! Every monetary aggregate in the app goes through these functions. A line
//! item's total is `quantity * price` plus a percentage margin on top; section
//! and estimation totals always recompute from the raw item fields rather than
//! trusting the stored per-item total.

use crate::state::{Item, Section};

/// Compute a single line item's total from its raw inputs.
///
/// `margin` is a percentage of the base amount and may be negative to
/// represent a discount. Inputs are not validated here; callers sanitize
/// text input through [`parse_amount`] first.
pub fn item_total(quantity: f64, price: f64, margin: f64) -> f64 {
    let base_total = quantity * price;
    let margin_amount = base_total * margin / 100.0;
    base_total + margin_amount
}

/// Total of a section's items, recomputed from raw fields.
pub fn section_total(items: &[Item]) -> f64 {
    items
        .iter()
        .map(|item| item_total(item.quantity, item.price, item.margin))
        .sum()
}

/// Total of an estimation across all of its sections.
pub fn estimation_total(sections: &[Section]) -> f64 {
    sections
        .iter()
        .map(|section| section_total(&section.items))
        .sum()
}

/// Breakdown shown in the estimation form's summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub sub_total: f64,
    pub margin_total: f64,
    pub grand_total: f64,
}

/// Aggregate the base and margin portions separately across all sections.
///
/// `grand_total` equals [`estimation_total`] up to float summation order.
pub fn summarize(sections: &[Section]) -> Summary {
    let mut sub_total = 0.0;
    let mut margin_total = 0.0;
    for section in sections {
        for item in &section.items {
            let base = item.quantity * item.price;
            sub_total += base;
            margin_total += base * item.margin / 100.0;
        }
    }
    Summary {
        sub_total,
        margin_total,
        grand_total: sub_total + margin_total,
    }
}

/// Parse a user-entered amount, defaulting to 0.0 for anything unparsable.
///
/// This is the single sanitization step between text buffers and the
/// calculator; partially-typed values ("12.", "-") never reach arithmetic
/// as NaN.
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Item, Section};

    const EPSILON: f64 = 1e-9;

    fn item(quantity: f64, price: f64, margin: f64) -> Item {
        Item {
            id: "i".to_string(),
            title: String::new(),
            description: String::new(),
            unit: String::new(),
            quantity,
            price,
            margin,
            total: item_total(quantity, price, margin),
        }
    }

    fn section(items: Vec<Item>) -> Section {
        Section {
            id: "s".to_string(),
            name: "Section".to_string(),
            items,
        }
    }

    #[test]
    fn test_item_total_decomposes_into_base_plus_margin() {
        for &(q, p, m) in &[(3.0, 12.5, 7.0), (0.5, 99.99, 33.0), (7.0, 1.0, 250.0)] {
            let expected = q * p + q * p * m / 100.0;
            assert!((item_total(q, p, m) - expected).abs() < EPSILON);
        }
    }

    #[test]
    fn test_item_total_zero_margin_is_base() {
        assert_eq!(item_total(4.0, 25.0, 0.0), 100.0);
    }

    #[test]
    fn test_item_total_zero_quantity_or_price_is_zero() {
        assert_eq!(item_total(0.0, 500.0, 50.0), 0.0);
        assert_eq!(item_total(12.0, 0.0, 50.0), 0.0);
    }

    #[test]
    fn test_item_total_negative_margin_is_discount() {
        assert_eq!(item_total(10.0, 100.0, -10.0), 900.0);
    }

    #[test]
    fn test_item_total_reference_scenarios() {
        // 200 hours at 75 with 20% margin
        assert_eq!(item_total(200.0, 75.0, 20.0), 18000.0);
        // 80 hours at 100 with 15% margin
        assert_eq!(item_total(80.0, 100.0, 15.0), 9200.0);
    }

    #[test]
    fn test_section_total_empty_is_zero() {
        assert_eq!(section_total(&[]), 0.0);
    }

    #[test]
    fn test_section_total_sums_items() {
        let items = vec![item(2.0, 50.0, 0.0), item(1.0, 100.0, 10.0)];
        assert!((section_total(&items) - 210.0).abs() < EPSILON);
    }

    #[test]
    fn test_section_total_ignores_stale_stored_totals() {
        let mut stale = item(2.0, 50.0, 0.0);
        stale.total = 999999.0;
        assert!((section_total(&[stale]) - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_section_total_is_order_independent() {
        let a = vec![
            item(3.0, 19.99, 12.5),
            item(1.5, 240.0, -5.0),
            item(8.0, 33.0, 40.0),
        ];
        let mut b = a.clone();
        b.reverse();
        assert!((section_total(&a) - section_total(&b)).abs() < EPSILON);
    }

    #[test]
    fn test_estimation_total_empty_is_zero() {
        assert_eq!(estimation_total(&[]), 0.0);
    }

    #[test]
    fn test_estimation_total_matches_sum_of_sections() {
        let sections = vec![
            section(vec![item(200.0, 75.0, 20.0)]),
            section(vec![item(80.0, 100.0, 15.0), item(2.0, 50.0, 0.0)]),
            section(vec![]),
        ];
        let by_sections: f64 = sections.iter().map(|s| section_total(&s.items)).sum();
        assert!((estimation_total(&sections) - by_sections).abs() < EPSILON);
        assert!((estimation_total(&sections) - 27300.0).abs() < EPSILON);
    }

    #[test]
    fn test_summarize_splits_base_and_margin() {
        let sections = vec![section(vec![item(200.0, 75.0, 20.0)])];
        let summary = summarize(&sections);
        assert!((summary.sub_total - 15000.0).abs() < EPSILON);
        assert!((summary.margin_total - 3000.0).abs() < EPSILON);
        assert!((summary.grand_total - 18000.0).abs() < EPSILON);
    }

    #[test]
    fn test_summarize_grand_total_matches_estimation_total() {
        let sections = vec![
            section(vec![item(2.0, 50.0, 0.0), item(1.0, 100.0, 10.0)]),
            section(vec![item(80.0, 100.0, 15.0)]),
        ];
        let summary = summarize(&sections);
        assert!((summary.grand_total - estimation_total(&sections)).abs() < EPSILON);
    }

    #[test]
    fn test_parse_amount_accepts_decimals_and_negatives() {
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount(" 40 "), 40.0);
        assert_eq!(parse_amount("-10"), -10.0);
    }

    #[test]
    fn test_parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("12."), 12.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
    }
}
