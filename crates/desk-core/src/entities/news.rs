use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A manually authored announcement shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub content: Option<String>,
    pub news_date: NaiveDate,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A news item joined with its author's email.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewsView {
    #[serde(flatten)]
    pub news: News,
    pub created_by_email: Option<String>,
}
