//! Company news report

use crate::model::NewsItem;
use chrono::{Duration, NaiveDate};

/// Render headlines, or sample news dated relative to `today` when there are none
pub fn render_news(company: &str, items: &[NewsItem], today: NaiveDate) -> String {
    let mut md = format!("# Latest News for {company}\n\n");

    if items.is_empty() {
        render_sample_news(&mut md, company, today);
        return md;
    }

    md.push_str("## Recent News Articles\n\n");
    for (i, item) in items.iter().enumerate() {
        md.push_str(&format!("{}. **{}**  \n", i + 1, item.title));
        let source = item.publisher.as_deref().unwrap_or("Unknown source");
        match item.published {
            Some(at) => {
                md.push_str(&format!("   *Source: {source} - {}*  \n", at.format("%Y-%m-%d")));
            }
            None => {
                md.push_str(&format!("   *Source: {source}*  \n"));
            }
        }
        if let Some(link) = &item.link {
            md.push_str(&format!("   [Read more]({link})\n"));
        }
        md.push('\n');
    }
    md
}

fn render_sample_news(md: &mut String, company: &str, today: NaiveDate) {
    let day = |days_ago: i64| (today - Duration::days(days_ago)).format("%Y-%m-%d");
    let stories = [
        (
            format!("{company} Reports Quarterly Earnings"),
            "Financial Times",
            2,
            format!("{company} reported quarterly earnings that exceeded analyst expectations, with revenue growing by 15% year-over-year."),
        ),
        (
            format!("Industry Analysis: Impact of Market Trends on {company}"),
            "Bloomberg",
            5,
            format!("Analysts discuss how current market trends are affecting {company}'s growth strategy and competitive position."),
        ),
        (
            format!("{company} Announces New Product Line"),
            "Reuters",
            7,
            format!("{company} has unveiled its latest product line, aimed at expanding its market share in key demographics."),
        ),
        (
            format!("Regulatory Changes and Their Impact on {company}"),
            "Wall Street Journal",
            10,
            format!("Recent regulatory changes could significantly impact {company}'s operations in several key markets."),
        ),
        (
            format!("{company} Executive Interview: Future Outlook"),
            "CNBC",
            12,
            format!("In an exclusive interview, executives from {company} discuss their vision for the company's future and upcoming initiatives."),
        ),
    ];

    md.push_str("*Note: This is sample news data. No headlines were available from the news provider.*\n\n");
    md.push_str("## Recent News Articles\n\n");
    for (i, (title, source, days_ago, body)) in stories.iter().enumerate() {
        md.push_str(&format!(
            "{}. **{title}**  \n   *Source: {source} - {}*  \n   {body}\n\n",
            i + 1,
            day(*days_ago),
        ));
    }
}
