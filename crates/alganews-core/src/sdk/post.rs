//! Post summaries shown on the home screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cash_flow::Reference;
use super::{Id, Sort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub editor: Option<Reference>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub sort: Sort,
    pub page: u32,
    pub size: u32,
}

impl PostQuery {
    /// The three most recently created posts.
    pub fn latest() -> Self {
        Self {
            sort: Sort::desc("createdAt"),
            page: 0,
            size: 3,
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sort", self.sort.to_param()),
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
        ]
    }
}
