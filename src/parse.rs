use std::io::BufRead;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::{Error, Result};

/// Every result row the site renders starts with this exact markup and sits
/// entirely on one physical line. Any other line is skipped unread.
const ROW_PREFIX: &[u8] = br#"<tr valign="top"><td align="left"><a"#;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\| updated: (.+)").expect("date pattern should compile"));

/// Base used to resolve the relative redirect hrefs found in result rows.
static HREF_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://href.invalid/").expect("href base should parse"));

/// An entry from staticICE's search.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub description: String,
    pub seller: String,
    pub link: String,
    pub last_updated: NaiveDate,
    pub price: f64,
}

struct RowSelectors {
    price_anchor: Selector,
    seller: Selector,
    detail_cell: Selector,
    detail_font: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            price_anchor: create_selector(r#"td[align="left"] > a"#)?,
            seller: create_selector(r#"td[valign="bottom"] > font > a"#)?,
            detail_cell: create_selector(r#"td[valign="bottom"]"#)?,
            detail_font: create_selector(r#"td[valign="bottom"] > font"#)?,
        })
    }
}

/// Scans a response body line by line and extracts one [`ItemEntry`] per
/// result row, in the order the rows appear.
///
/// Reads strictly sequentially, holding one line in memory at a time. Each
/// matching line is wrapped in a minimal `<table>` container and parsed as a
/// standalone HTML fragment; this relies on the site keeping every row
/// self-contained on a single line. A row split across lines is unsupported
/// input and fails like any other malformed row.
///
/// Fails fast: the first field that doesn't decode aborts the whole scan and
/// discards any entries collected so far.
pub fn scan<R: BufRead>(mut reader: R) -> Result<Vec<ItemEntry>> {
    let selectors = RowSelectors::new()?;

    let mut results = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        if !line.starts_with(ROW_PREFIX) {
            continue;
        }

        let fragment = format!("<table>{}</tr></table>", String::from_utf8_lossy(&line));
        results.push(parse_row(&Html::parse_fragment(&fragment), &selectors)?);
    }

    Ok(results)
}

/// Extracts the five listing fields from a single parsed row fragment,
/// taking the first match of each selector.
fn parse_row(row: &Html, selectors: &RowSelectors) -> Result<ItemEntry> {
    // The primary anchor carries both the price text and the redirect href.
    let anchor = row
        .select(&selectors.price_anchor)
        .next()
        .ok_or(Error::MissingElement(r#"td[align="left"] > a"#))?;

    let price_text: String = anchor.text().collect();
    let price = strip_currency_symbol(&price_text).parse::<f64>()?;

    let seller = row
        .select(&selectors.seller)
        .next()
        .map(|a| a.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let href = anchor.value().attr("href").unwrap_or_default();
    let link = HREF_BASE
        .join(href)?
        .query_pairs()
        .find(|(key, _)| key == "newurl")
        .map(|(_, value)| value.into_owned())
        .ok_or(Error::MissingRedirect)?;

    // The detail cell opens with a bare text node holding the description.
    let description = row
        .select(&selectors.detail_cell)
        .next()
        .and_then(|cell| cell.first_child())
        .map(|node| match node.value() {
            Node::Text(text) => text.to_string(),
            _ => ElementRef::wrap(node)
                .map(|el| el.text().collect())
                .unwrap_or_default(),
        })
        .unwrap_or_default();

    let font_text: String = row
        .select(&selectors.detail_font)
        .next()
        .map(|font| font.text().collect())
        .unwrap_or_default();
    let date_text = DATE_PATTERN
        .captures(&font_text)
        .and_then(|caps| caps.get(1))
        .ok_or(Error::MissingDate)?;
    let last_updated = NaiveDate::parse_from_str(date_text.as_str().trim(), "%d-%m-%Y")?;

    Ok(ItemEntry {
        description,
        seller,
        link,
        last_updated,
        price,
    })
}

/// Drops the leading currency symbol from the anchor's price text.
fn strip_currency_symbol(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.as_str()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::Selector(sel_str.into()))
}
