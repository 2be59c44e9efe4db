use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// One outbound search, built fresh per address.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub url: &'a Url,
    pub query_param: &'a str,
    pub address: &'a str,
    pub user_agent: &'a str,
    pub timeout: Duration,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub title: String,
    pub link: String,
}

impl ResultEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> ResultEntry {
        ResultEntry {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Everything extracted for a single address; rendered by the reporter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultGroup {
    pub address: String,
    pub results: Vec<ResultEntry>,
}

impl ResultGroup {
    pub fn new(address: String, results: Vec<ResultEntry>) -> ResultGroup {
        ResultGroup { address, results }
    }
}
