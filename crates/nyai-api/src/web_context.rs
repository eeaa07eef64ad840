//! Best-effort web context for prompt enrichment.
//!
//! An external collaborator, not core behavior: a DuckDuckGo HTML search for
//! the clause, the first hit scraped down to visible text. Every failure
//! path yields `None` and the prompt simply goes out without web context.

use std::time::Duration;

use scraper::{Html, Selector};
use url::Url;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
const MAX_CONTEXT_CHARS: usize = 3_500;
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn gather(client: &reqwest::Client, query: &str) -> Option<String> {
    let url = find_relevant_url(client, query).await?;
    let text = scrape_text(client, &url).await?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

async fn find_relevant_url(client: &reqwest::Client, query: &str) -> Option<String> {
    let response = client
        .post(DDG_HTML_URL)
        .form(&[("q", format!("{query} India")), ("b", String::new())])
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .ok()?;
    if !response.status().is_success() {
        return None;
    }
    let html = response.text().await.ok()?;
    first_result_url(&html)
}

fn first_result_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(".result__a").ok()?;
    let href = document.select(&selector).next()?.value().attr("href")?;
    resolve_redirect(href)
}

/// DuckDuckGo wraps targets in a redirect link carrying the real URL in the
/// `uddg` query parameter.
fn resolve_redirect(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let parsed = Url::parse(&absolute).ok()?;
    if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
        return Some(target.into_owned());
    }
    Some(absolute)
}

async fn scrape_text(client: &reqwest::Client, url: &str) -> Option<String> {
    let response = client
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?;
    let html = response.text().await.ok()?;
    Some(visible_text(&html))
}

fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("p, h1, h2, h3, li") else {
        return String::new();
    };

    let mut lines = Vec::new();
    for element in document.select(&selector) {
        let line = element.text().collect::<String>();
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }

    let text = lines.join("\n");
    if text.chars().count() > MAX_CONTEXT_CHARS {
        text.chars().take(MAX_CONTEXT_CHARS).collect()
    } else {
        text
    }
}
