//! Paged index of recently verified contracts, scraped from the explorer's
//! HTML listing. Yields `ContractRef`s lazily, one page at a time.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;

use crate::error::{Result, ScoutError};
use crate::types::ContractRef;

pub const DEFAULT_LISTING_URL: &str = "https://polygonscan.com/contractsVerified";
pub const DEFAULT_PAGES: u32 = 5;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

static ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").expect("row regex"));
static CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<td[^>]*>(.*?)</td>").expect("cell regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

/// Extracts `(address, name)` pairs from one listing page. The page carries
/// a single table of verified contracts; address sits in the first cell and
/// the contract name in the second.
pub fn parse_rows(html: &str) -> Result<Vec<ContractRef>> {
    let start = html
        .find("<tbody")
        .ok_or_else(|| ScoutError::Parse("listing page has no contract table".into()))?;
    let body = &html[start..];
    let body = match body.find("</tbody>") {
        Some(end) => &body[..end],
        None => body,
    };

    let mut contracts = Vec::new();
    for row in ROW.captures_iter(body) {
        let cells: Vec<String> = CELL
            .captures_iter(&row[1])
            .map(|c| TAG.replace_all(&c[1], "").trim().to_string())
            .collect();
        if cells.len() < 2 {
            return Err(ScoutError::Parse(
                "listing row is missing expected columns".into(),
            ));
        }
        contracts.push(ContractRef::new(cells[0].clone(), cells[1].clone()));
    }

    if contracts.is_empty() {
        return Err(ScoutError::Parse("listing page has no contract rows".into()));
    }
    Ok(contracts)
}

/// Lazy, finite producer of contract references. Not restartable: once a
/// page has been consumed the index moves on.
pub struct VerifiedContractIndex {
    http: reqwest::Client,
    base_url: String,
    pages: u32,
    page_size: u32,
    next_page: u32,
    buffer: VecDeque<ContractRef>,
}

impl VerifiedContractIndex {
    pub fn new(base_url: impl Into<String>, pages: u32, page_size: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            pages,
            page_size,
            next_page: 1,
            buffer: VecDeque::new(),
        }
    }

    /// Next contract reference, fetching further pages as the buffer runs
    /// dry. A malformed or unreachable page fails with an error for that
    /// page only; calling again continues with the following page.
    pub async fn next(&mut self) -> Result<Option<ContractRef>> {
        loop {
            if let Some(contract) = self.buffer.pop_front() {
                return Ok(Some(contract));
            }
            if self.next_page > self.pages {
                return Ok(None);
            }

            let page = self.next_page;
            self.next_page += 1;

            let url = format!("{}/{}?ps={}", self.base_url, page, self.page_size);
            debug!("fetching verified contracts page {}", page);
            let html = self.http.get(&url).send().await?.text().await?;

            match parse_rows(&html) {
                Ok(contracts) => {
                    debug!("page {} yielded {} contracts", page, contracts.len());
                    self.buffer = contracts.into();
                }
                Err(e) => {
                    warn!("page {} could not be parsed: {}", page, e);
                    return Err(e);
                }
            }
        }
    }
}
