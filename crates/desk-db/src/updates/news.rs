//! News update builder.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// `Some(None)` clears the content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_date: Option<NaiveDate>,
}

impl NewsUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.content.is_none()
            && self.news_date.is_none()
    }
}

#[derive(Debug, Default)]
pub struct NewsUpdateBuilder(NewsUpdate);

impl NewsUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(NewsUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    #[must_use]
    pub fn summary(mut self, val: impl Into<String>) -> Self {
        self.0.summary = Some(val.into());
        self
    }

    #[must_use]
    pub fn content(mut self, val: Option<String>) -> Self {
        self.0.content = Some(val);
        self
    }

    #[must_use]
    pub const fn news_date(mut self, val: NaiveDate) -> Self {
        self.0.news_date = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> NewsUpdate {
        self.0
    }
}
