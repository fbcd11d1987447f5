//! Static catalog of popular tickers grouped by sector

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub ticker: &'static str,
    pub name: &'static str,
}

impl Listing {
    const fn new(ticker: &'static str, name: &'static str) -> Self {
        Self { ticker, name }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sector {
    pub name: &'static str,
    pub stocks: &'static [Listing],
}

pub const SECTORS: [Sector; 8] = [
    Sector {
        name: "Technology",
        stocks: &[
            Listing::new("AAPL", "Apple Inc."),
            Listing::new("MSFT", "Microsoft Corporation"),
            Listing::new("GOOGL", "Alphabet Inc. (Google)"),
            Listing::new("AMZN", "Amazon.com Inc."),
            Listing::new("META", "Meta Platforms Inc. (Facebook)"),
            Listing::new("NVDA", "NVIDIA Corporation"),
            Listing::new("TSLA", "Tesla, Inc."),
            Listing::new("INTC", "Intel Corporation"),
            Listing::new("CRM", "Salesforce, Inc."),
            Listing::new("ADBE", "Adobe Inc."),
            Listing::new("ORCL", "Oracle Corporation"),
            Listing::new("CSCO", "Cisco Systems, Inc."),
        ],
    },
    Sector {
        name: "Financial",
        stocks: &[
            Listing::new("JPM", "JPMorgan Chase & Co."),
            Listing::new("BAC", "Bank of America Corporation"),
            Listing::new("WFC", "Wells Fargo & Company"),
            Listing::new("C", "Citigroup Inc."),
            Listing::new("GS", "The Goldman Sachs Group, Inc."),
            Listing::new("V", "Visa Inc."),
            Listing::new("MA", "Mastercard Incorporated"),
            Listing::new("AXP", "American Express Company"),
            Listing::new("BLK", "BlackRock, Inc."),
            Listing::new("MS", "Morgan Stanley"),
        ],
    },
    Sector {
        name: "Healthcare",
        stocks: &[
            Listing::new("JNJ", "Johnson & Johnson"),
            Listing::new("PFE", "Pfizer Inc."),
            Listing::new("MRK", "Merck & Co., Inc."),
            Listing::new("UNH", "UnitedHealth Group Incorporated"),
            Listing::new("ABBV", "AbbVie Inc."),
            Listing::new("LLY", "Eli Lilly and Company"),
            Listing::new("TMO", "Thermo Fisher Scientific Inc."),
            Listing::new("DHR", "Danaher Corporation"),
            Listing::new("ABT", "Abbott Laboratories"),
            Listing::new("BMY", "Bristol-Myers Squibb Company"),
        ],
    },
    Sector {
        name: "Consumer",
        stocks: &[
            Listing::new("KO", "The Coca-Cola Company"),
            Listing::new("PEP", "PepsiCo, Inc."),
            Listing::new("WMT", "Walmart Inc."),
            Listing::new("TGT", "Target Corporation"),
            Listing::new("MCD", "McDonald's Corporation"),
            Listing::new("SBUX", "Starbucks Corporation"),
            Listing::new("HD", "The Home Depot, Inc."),
            Listing::new("NKE", "NIKE, Inc."),
            Listing::new("PG", "The Procter & Gamble Company"),
            Listing::new("COST", "Costco Wholesale Corporation"),
        ],
    },
    Sector {
        name: "Industrial",
        stocks: &[
            Listing::new("GE", "General Electric Company"),
            Listing::new("CAT", "Caterpillar Inc."),
            Listing::new("BA", "The Boeing Company"),
            Listing::new("MMM", "3M Company"),
            Listing::new("HON", "Honeywell International Inc."),
            Listing::new("UPS", "United Parcel Service, Inc."),
            Listing::new("LMT", "Lockheed Martin Corporation"),
            Listing::new("RTX", "Raytheon Technologies Corporation"),
            Listing::new("DE", "Deere & Company"),
            Listing::new("FDX", "FedEx Corporation"),
        ],
    },
    Sector {
        name: "Energy",
        stocks: &[
            Listing::new("XOM", "Exxon Mobil Corporation"),
            Listing::new("CVX", "Chevron Corporation"),
            Listing::new("COP", "ConocoPhillips"),
            Listing::new("SLB", "Schlumberger Limited"),
            Listing::new("EOG", "EOG Resources, Inc."),
            Listing::new("OXY", "Occidental Petroleum Corporation"),
            Listing::new("BP", "BP p.l.c."),
            Listing::new("TTE", "TotalEnergies SE"),
            Listing::new("VLO", "Valero Energy Corporation"),
            Listing::new("PSX", "Phillips 66"),
        ],
    },
    Sector {
        name: "Utilities & Telecom",
        stocks: &[
            Listing::new("NEE", "NextEra Energy, Inc."),
            Listing::new("DUK", "Duke Energy Corporation"),
            Listing::new("SO", "The Southern Company"),
            Listing::new("T", "AT&T Inc."),
            Listing::new("VZ", "Verizon Communications Inc."),
            Listing::new("TMUS", "T-Mobile US, Inc."),
            Listing::new("D", "Dominion Energy, Inc."),
            Listing::new("EXC", "Exelon Corporation"),
            Listing::new("PCG", "PG&E Corporation"),
            Listing::new("SRE", "Sempra"),
        ],
    },
    Sector {
        name: "ETFs",
        stocks: &[
            Listing::new("SPY", "SPDR S&P 500 ETF Trust"),
            Listing::new("QQQ", "Invesco QQQ Trust (NASDAQ-100 Index)"),
            Listing::new("DIA", "SPDR Dow Jones Industrial Average ETF"),
            Listing::new("IWM", "iShares Russell 2000 ETF"),
            Listing::new("VTI", "Vanguard Total Stock Market ETF"),
            Listing::new("XLF", "Financial Select Sector SPDR Fund"),
            Listing::new("XLK", "Technology Select Sector SPDR Fund"),
            Listing::new("XLV", "Health Care Select Sector SPDR Fund"),
            Listing::new("XLE", "Energy Select Sector SPDR Fund"),
            Listing::new("XLY", "Consumer Discretionary Select Sector SPDR Fund"),
        ],
    },
];

/// Serializes as `{sector: [{ticker, name}, ...]}` in catalog order
#[derive(Debug, Clone, Copy, Default)]
pub struct StockList;

impl StockList {
    pub fn sectors(self) -> &'static [Sector] {
        &SECTORS
    }

    /// Look up a ticker across all sectors
    pub fn find(self, ticker: &str) -> Option<(&'static str, &'static Listing)> {
        SECTORS.iter().find_map(|sector| {
            sector
                .stocks
                .iter()
                .find(|listing| listing.ticker.eq_ignore_ascii_case(ticker))
                .map(|listing| (sector.name, listing))
        })
    }
}

impl Serialize for StockList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SECTORS.len()))?;
        for sector in &SECTORS {
            map.serialize_entry(sector.name, sector.stocks)?;
        }
        map.end()
    }
}
