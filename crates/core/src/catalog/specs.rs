//! Head-to-head specification comparison.
//!
//! Spec values are free text ("5.000 mAh", "6.7\" OLED 120Hz"). The
//! comparison is a numeric-substring heuristic: drop everything except
//! digits and dots, read the leading decimal number, and let the larger
//! number win. Values with no digits never win. Units are not interpreted.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, Product, SpecField};

/// Which side of a comparison wins a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advantage {
    A,
    B,
    Tie,
}

/// Read the number embedded in a spec value.
///
/// Non-numeric characters are removed first, so `"6.7\" OLED 120Hz"`
/// reads as `6.7120`. Parsing then stops at the second dot, matching
/// parse-float behaviour.
#[must_use]
pub fn extract_number(value: &str) -> Option<f64> {
    let kept: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut seen_dot = false;
    let prefix_len = kept
        .char_indices()
        .find(|(_, c)| {
            if *c == '.' {
                if seen_dot {
                    return true;
                }
                seen_dot = true;
            }
            false
        })
        .map_or(kept.len(), |(i, _)| i);
    let prefix = kept.get(..prefix_len).unwrap_or_default();

    if !prefix.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let normalized = format!("0{}", prefix.trim_end_matches('.'));
    normalized.parse().ok()
}

/// Compare two spec values; the higher number wins.
#[must_use]
pub fn compare_field(a: &str, b: &str) -> Advantage {
    let (Some(x), Some(y)) = (extract_number(a), extract_number(b)) else {
        return Advantage::Tie;
    };
    match x.partial_cmp(&y) {
        Some(Ordering::Greater) => Advantage::A,
        Some(Ordering::Less) => Advantage::B,
        _ => Advantage::Tie,
    }
}

/// One row of a comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldComparison {
    pub field: SpecField,
    pub label: &'static str,
    pub a: String,
    pub b: String,
    pub advantage: Advantage,
}

/// Side-by-side summary of two products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub rows: Vec<FieldComparison>,
    /// Absolute price difference.
    pub price_delta: Price,
    /// Display string of `price_delta`.
    pub price_delta_display: String,
    pub wins_a: usize,
    pub wins_b: usize,
}

impl ComparisonSummary {
    #[must_use]
    pub fn new(a: &Product, b: &Product, currency: CurrencyCode) -> Self {
        let rows: Vec<FieldComparison> = SpecField::ALL
            .into_iter()
            .map(|field| {
                let va = a.specs.get(field);
                let vb = b.specs.get(field);
                FieldComparison {
                    field,
                    label: field.label(),
                    a: va.to_string(),
                    b: vb.to_string(),
                    advantage: compare_field(va, vb),
                }
            })
            .collect();

        let wins_a = rows.iter().filter(|r| r.advantage == Advantage::A).count();
        let wins_b = rows.iter().filter(|r| r.advantage == Advantage::B).count();
        let price_delta = Price::delta(a.price, b.price, currency);

        Self {
            rows,
            price_delta_display: price_delta.display(),
            price_delta,
            wins_a,
            wins_b,
        }
    }
}
