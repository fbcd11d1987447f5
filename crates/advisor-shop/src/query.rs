//! Search selection to natural-language agent query

use crate::catalog::{FLEXIBLE_BUDGET, budget_phrase};

/// Build the query sent to the shopping agent
///
/// Optional clauses are emitted only when their input is present and
/// non-empty; preferences keep the caller's order. Unknown budget keys read
/// as a flexible budget.
pub fn format_query(
    category: &str,
    specific_item: Option<&str>,
    preferences: &[String],
    budget_range: &str,
    brand: Option<&str>,
    additional_info: Option<&str>,
) -> String {
    let subject = specific_item.filter(|s| !s.is_empty()).unwrap_or(category);
    let mut query = format!("I am looking for {subject}");

    if let Some(brand) = brand.filter(|b| !b.is_empty()) {
        query.push_str(&format!(" from {brand}"));
    }

    if !preferences.is_empty() {
        query.push_str(" with the following preferences: ");
        query.push_str(&preferences.join(", "));
    }

    let budget = budget_phrase(budget_range).unwrap_or(FLEXIBLE_BUDGET);
    query.push_str(&format!(". Budget: {budget}"));

    if let Some(info) = additional_info.filter(|i| !i.is_empty()) {
        query.push_str(&format!(". Additional requirements: {info}"));
    }

    query
}
