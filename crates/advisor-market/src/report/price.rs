//! Stock price report

use super::format::{display_price, finite_stats, money, percent, percent_change, thousands};
use crate::model::{InfoSnapshot, PriceBar};

/// Most recent rows shown in the price table
pub const TABLE_ROWS: usize = 10;

/// Render the 1-month price report; `bars` are oldest first
pub fn render_price_report(symbol: &str, bars: &[PriceBar], info: &InfoSnapshot) -> String {
    let mut md = format!(
        "# Stock Price Analysis for {}\n\n## Current Price: {}\n\n### Price Trend (Last Month)\n\n",
        symbol.to_uppercase(),
        display_price(info.current_price()),
    );
    md.push_str("| Date | Open | High | Low | Close | Volume |\n");
    md.push_str("|------|------|------|-----|-------|--------|\n");

    for bar in &bars[bars.len().saturating_sub(TABLE_ROWS)..] {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            bar.date.format("%Y-%m-%d"),
            money(bar.open),
            money(bar.high),
            money(bar.low),
            money(bar.close),
            thousands(bar.volume),
        ));
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let (average, highest, lowest) =
        finite_stats(&closes).unwrap_or((f64::NAN, f64::NAN, f64::NAN));
    let change = percent_change(closes.first().copied(), closes.last().copied());

    md.push_str("\n### Summary Statistics\n");
    md.push_str(&format!("- Average Close Price: {}\n", money(average)));
    md.push_str(&format!("- Highest Close Price: {}\n", money(highest)));
    md.push_str(&format!("- Lowest Close Price: {}\n", money(lowest)));
    md.push_str(&format!("- Price Change: {}\n", percent(change)));
    md
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    pub(crate) fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open: close - 1.0,
                high: close + 2.0,
                low: close - 2.0,
                close,
                volume: 1_000_000 + i as u64,
            })
            .collect()
    }

    fn info() -> InfoSnapshot {
        InfoSnapshot::from_iter([("currentPrice".to_string(), json!(189.99))])
    }

    fn table_rows(md: &str) -> usize {
        md.lines().filter(|l| l.starts_with("| 2024-")).count()
    }

    #[test]
    fn test_report_layout() {
        let md = render_price_report("aapl", &bars(&[100.0, 105.0, 110.0]), &info());

        assert!(md.starts_with("# Stock Price Analysis for AAPL\n\n## Current Price: $189.99\n"));
        assert!(md.contains("| 2024-05-03 | $109.00 | $112.00 | $108.00 | $110.00 | 1,000,002 |"));
        assert!(md.contains("- Average Close Price: $105.00"));
        assert!(md.contains("- Highest Close Price: $110.00"));
        assert!(md.contains("- Lowest Close Price: $100.00"));
        assert!(md.contains("- Price Change: 10.00%"));
    }

    #[test]
    fn test_short_history_not_padded() {
        let md = render_price_report("MSFT", &bars(&[1.0, 2.0, 3.0, 4.0]), &info());
        assert_eq!(table_rows(&md), 4);
    }

    #[test]
    fn test_table_keeps_last_ten() {
        let closes: Vec<f64> = (1..=22).map(f64::from).collect();
        let md = render_price_report("MSFT", &bars(&closes), &info());
        assert_eq!(table_rows(&md), TABLE_ROWS);
        assert!(md.contains("| 2024-05-22 |"));
        assert!(!md.contains("| 2024-05-12 |"));
    }

    #[test]
    fn test_zero_first_close_is_not_available() {
        let md = render_price_report("X", &bars(&[0.0, 5.0]), &info());
        assert!(md.contains("- Price Change: N/A"));
    }

    #[test]
    fn test_missing_current_price() {
        let md = render_price_report("X", &bars(&[1.0]), &InfoSnapshot::default());
        assert!(md.contains("## Current Price: N/A"));
    }

    #[test]
    fn test_regular_market_price_fallback() {
        let info = InfoSnapshot::from_iter([("regularMarketPrice".to_string(), json!(42.5))]);
        let md = render_price_report("X", &bars(&[1.0]), &info);
        assert!(md.contains("## Current Price: $42.5"));
    }
}
