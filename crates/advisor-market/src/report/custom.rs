//! Free-form analysis over tickers mentioned in a prompt

use super::format;
use crate::model::{InfoSnapshot, PriceBar};
use regex::Regex;
use std::sync::LazyLock;

/// At most this many tickers are fetched per prompt
pub const MAX_TICKERS: usize = 3;

static TICKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{1,5}\b").expect("ticker pattern is a valid regex"));

/// Uppercase words of one to five letters, in prompt order
pub fn extract_tickers(prompt: &str) -> Vec<String> {
    TICKER_PATTERN
        .find_iter(prompt)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First [`MAX_TICKERS`] distinct tickers, in mention order
pub fn tickers_to_fetch(tickers: &[String]) -> Vec<String> {
    let mut picked: Vec<String> = Vec::new();
    for ticker in tickers {
        if picked.len() == MAX_TICKERS {
            break;
        }
        if !picked.contains(ticker) {
            picked.push(ticker.clone());
        }
    }
    picked
}

/// What the provider returned for one ticker
#[derive(Debug, Clone)]
pub enum TickerOutcome {
    NoInfo,
    NoHistory,
    Error(String),
    Valid { info: InfoSnapshot, bars: Vec<PriceBar> },
}

/// Broad market context used when the prompt names no tickers
#[derive(Debug, Clone)]
pub enum MarketOverview {
    Levels { current: f64, change: Option<f64> },
    Unavailable,
    Error(String),
}

const POPULAR_TICKERS: &str = "\
### Popular Stock Tickers to Try
Here are some popular stock tickers you can analyze:

- Technology: AAPL, MSFT, GOOGL, AMZN, META, NVDA, TSLA
- Financial: JPM, BAC, GS, V, MA, AXP
- Healthcare: JNJ, PFE, MRK, UNH, ABBV
- Consumer: KO, PEP, MCD, SBUX, NKE, WMT, TGT
- Industrial: GE, CAT, BA, HON, MMM

### Recommendation
For detailed analysis, try specifying ticker symbols in your query (e.g., \"Compare AAPL and MSFT\").
";

fn header(prompt: &str) -> String {
    format!("# Custom Financial Analysis\n\n## Query\n*{prompt}*\n\n")
}

/// Render per-ticker outcomes; `mentioned` is every ticker found in the prompt
pub fn render_ticker_analysis(
    prompt: &str,
    mentioned: &[String],
    outcomes: &[(String, TickerOutcome)],
) -> String {
    let mut md = header(prompt);
    md.push_str(&format!("## Analysis for {}\n\n", mentioned.join(", ")));

    let mut valid = Vec::new();
    for (ticker, outcome) in outcomes {
        match outcome {
            TickerOutcome::NoInfo => {
                md.push_str(&format!("### {ticker}: No data available\n\n"));
            }
            TickerOutcome::NoHistory => {
                md.push_str(&format!("### {ticker}: No historical data available\n\n"));
            }
            TickerOutcome::Error(reason) => {
                md.push_str(&format!("### {ticker}: Error retrieving data - {reason}\n\n"));
            }
            TickerOutcome::Valid { info, bars } => valid.push((ticker.as_str(), info, bars)),
        }
    }

    for (ticker, info, bars) in &valid {
        let change = format::percent_change(
            bars.first().map(|b| b.close),
            bars.last().map(|b| b.close),
        );
        md.push_str(&format!(
            "### {} ({ticker})\n\
             - Current Price: {}\n\
             - 6-Month Price Change: {}\n\
             - Market Cap: {}\n\
             - P/E Ratio: {}\n\
             - Industry: {}\n\n",
            info.short_name_or(ticker),
            format::display_price(info.current_price()),
            format::percent(change),
            format::billions(info.f64("marketCap"), " billion"),
            format::display(info.get("trailingPE")),
            format::display(info.get("industry")),
        ));
    }

    if valid.len() > 1 {
        md.push_str("## Comparative Analysis\n\n");
        let names: Vec<&str> = valid.iter().map(|(t, _, _)| *t).collect();
        md.push_str(&format!("| Metric | {} |\n", names.join(" | ")));
        let rules: Vec<String> = names.iter().map(|t| "-".repeat(t.len() + 1)).collect();
        md.push_str(&format!("|--------|{}|\n", rules.join("|")));

        let row = |label: &str, cell: &dyn Fn(&InfoSnapshot) -> String| {
            let cells: Vec<String> = valid.iter().map(|(_, info, _)| cell(info)).collect();
            format!("| {label} | {} |\n", cells.join(" | "))
        };
        md.push_str(&row("Current Price", &|info| {
            format::display_price(info.current_price())
        }));
        md.push_str(&row("Market Cap", &|info| {
            format::billions(info.f64("marketCap"), "B")
        }));
        md.push_str(&row("P/E Ratio", &|info| {
            format::display(info.get("trailingPE"))
        }));
    }

    md
}

/// Render the no-ticker fallback: an S&P 500 snapshot plus suggestions
pub fn render_market_overview(prompt: &str, overview: &MarketOverview) -> String {
    let mut md = header(prompt);
    md.push_str(
        "## General Market Analysis\n\n\
         Without specific ticker symbols, here's a general market overview:\n\n\
         ### S&P 500 Performance\n",
    );

    match overview {
        MarketOverview::Levels { current, change } => {
            md.push_str(&format!(
                "- Current Level: {}\n- 1-Month Change: {}\n",
                format::money(*current),
                format::percent(*change),
            ));
        }
        MarketOverview::Unavailable => md.push_str("Unable to retrieve current S&P 500 data.\n"),
        MarketOverview::Error(reason) => {
            md.push_str(&format!("Error retrieving S&P 500 data: {reason}\n"));
        }
    }

    md.push('\n');
    md.push_str(POPULAR_TICKERS);
    md
}

/// Reduce one month of index bars to an overview
pub fn overview_from_bars(bars: &[PriceBar]) -> MarketOverview {
    match (bars.first(), bars.last()) {
        (Some(first), Some(last)) if last.close.is_finite() => MarketOverview::Levels {
            current: last.close,
            change: format::percent_change(Some(first.close), Some(last.close)),
        },
        _ => MarketOverview::Unavailable,
    }
}
