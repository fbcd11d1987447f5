//! Analyst recommendations report

use super::format::display;
use crate::model::RecommendationTable;
use std::collections::HashMap;

const RECENT_ROWS: usize = 10;
const TO_GRADE_COLUMNS: [&str; 2] = ["toGrade", "To Grade"];
const FROM_GRADE_COLUMNS: [&str; 2] = ["fromGrade", "From Grade"];

/// Render the recommendations report
///
/// `ratings` is the provider outcome: a table, no data, or the failure text.
pub fn render_recommendations(
    symbol: &str,
    company_name: &str,
    ratings: Result<Option<&RecommendationTable>, &str>,
) -> String {
    let mut md = format!(
        "# Analyst Recommendations for {}\n\n## Summary Rating\n",
        symbol.to_uppercase()
    );

    match ratings {
        Ok(Some(table)) if !table.is_empty() => render_table(&mut md, table),
        Ok(_) => render_no_data(&mut md, company_name),
        Err(reason) => render_ratings_explainer(&mut md, symbol, company_name, reason),
    }
    md
}

fn render_table(md: &mut String, table: &RecommendationTable) {
    let to_col = table.resolve_column(&TO_GRADE_COLUMNS);
    let from_col = table
        .resolve_column(&FROM_GRADE_COLUMNS)
        .unwrap_or(FROM_GRADE_COLUMNS[0]);

    let Some(to_col) = to_col.filter(|_| table.has_column("Firm")) else {
        md.push_str(&format!(
            "\nThe recommendations data structure doesn't contain the expected columns.\nAvailable columns: {}\n",
            table.columns.join(", ")
        ));
        return;
    };

    md.push_str("\n## Recent Recommendations\n\n");
    md.push_str("| Date | Firm | To Grade | From Grade | Action |\n");
    md.push_str("|------|------|----------|------------|--------|\n");
    for row in &table.rows[table.rows.len().saturating_sub(RECENT_ROWS)..] {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            display(row.get("Date")),
            display(row.get("Firm")),
            display(row.get(to_col)),
            display(row.get(from_col)),
            display(row.get("Action")),
        ));
    }

    md.push_str("\n## Recommendation Distribution\n\n");
    md.push_str("| Grade | Count | Percentage |\n");
    md.push_str("|-------|-------|------------|\n");
    let total = table.rows.len() as f64;
    for (grade, count) in grade_counts(table, to_col) {
        md.push_str(&format!(
            "| {grade} | {count} | {:.1}% |\n",
            count as f64 / total * 100.0
        ));
    }
}

/// Grade frequencies, most frequent first; ties in name order
fn grade_counts(table: &RecommendationTable, column: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in &table.rows {
        let grade = display(row.get(column));
        if grade != super::format::NOT_AVAILABLE {
            *counts.entry(grade).or_default() += 1;
        }
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

fn render_no_data(md: &mut String, company: &str) {
    md.push_str(&format!(
        "
No specific analyst recommendations are available for {company} through our data provider.

### General Market Sentiment
Based on general market indicators, {company} would typically be evaluated on:

- **Financial Performance**: Recent earnings and revenue growth
- **Market Position**: Competitive advantages in their industry
- **Future Outlook**: Growth projections and upcoming product/service initiatives
- **Valuation Metrics**: Price-to-earnings ratio, price-to-sales, etc.

For detailed analyst recommendations, consider checking financial news websites or specialized investment platforms.
"
    ));
}

fn render_ratings_explainer(md: &mut String, symbol: &str, company: &str, reason: &str) {
    md.push_str(&format!(
        "
## Analyst Overview for {company}

*Note: Specific analyst data couldn't be retrieved. Below is general information about how analysts typically rate stocks.*

### Common Analyst Ratings
1. **Strong Buy**: Significant outperformance expected
2. **Buy**: Moderate outperformance expected
3. **Hold**: Performance in line with the market
4. **Underperform**: Expected to perform worse than the market
5. **Sell**: Significant underperformance expected

For actual analyst ratings for {symbol}, please check financial news websites or investment platforms.

*Technical note: {reason}*
"
    ));
}
