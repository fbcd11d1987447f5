//! Company information report

use super::format::{NOT_AVAILABLE, billions, display, ratio_percent, thousands};
use crate::model::InfoSnapshot;

pub fn render_company_info(symbol: &str, info: &InfoSnapshot) -> String {
    let upper = symbol.to_uppercase();
    let mut md = format!(
        "# Company Information: {}\n\n## Business Overview\n{}\n\n",
        info.short_name_or(&upper),
        info.str("longBusinessSummary")
            .unwrap_or("No business summary available."),
    );

    let employees = info
        .u64("fullTimeEmployees")
        .map_or_else(|| NOT_AVAILABLE.to_string(), thousands);

    md.push_str("## Key Information\n\n| Metric | Value |\n|--------|-------|\n");
    for (label, value) in [
        ("Sector", display(info.get("sector"))),
        ("Industry", display(info.get("industry"))),
        ("Full Time Employees", employees),
        ("Country", display(info.get("country"))),
        ("Website", display(info.get("website"))),
        ("Market Cap", billions(info.f64("marketCap"), " billion")),
    ] {
        md.push_str(&format!("| {label} | {value} |\n"));
    }

    md.push_str("\n## Financial Metrics\n\n| Metric | Value |\n|--------|-------|\n");
    for (label, value) in [
        ("P/E Ratio", display(info.get("trailingPE"))),
        ("Forward P/E", display(info.get("forwardPE"))),
        ("Price-to-Sales", display(info.get("priceToSalesTrailing12Months"))),
        ("Price-to-Book", display(info.get("priceToBook"))),
        ("Profit Margins", ratio_percent(info.f64("profitMargins"))),
        ("Dividend Yield", ratio_percent(info.f64("dividendYield"))),
        ("52-Week Change", ratio_percent(info.f64("52WeekChange"))),
        ("Beta", display(info.get("beta"))),
    ] {
        md.push_str(&format!("| {label} | {value} |\n"));
    }

    md
}
