//! News registry: create, patch, delete, list.

use serde::Deserialize;
use tracing::info;

use desk_core::entities::{News, NewsView};
use desk_core::errors::ValidationErrors;
use desk_core::validation::{check_date, check_text, normalize_optional};

use crate::error::DatabaseError;
use crate::records::NewNews;
use crate::service::{DeskService, clamp_limit};
use crate::updates::news::NewsUpdateBuilder;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_SUMMARY_CHARS: usize = 1000;

/// Payload for a new news item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub content: Option<String>,
    #[serde(default)]
    pub news_date: String,
}

/// Partial edit. Absent fields are left alone; blank `content` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub news_date: Option<String>,
}

impl NewsPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.summary.is_none()
            && self.content.is_none()
            && self.news_date.is_none()
    }
}

impl DeskService {
    /// # Errors
    ///
    /// Returns a validation error listing every rejected field.
    pub async fn create_news(
        &self,
        input: NewsInput,
        author_id: Option<i64>,
    ) -> Result<NewsView, DatabaseError> {
        let mut errors = ValidationErrors::new();
        let title = check_text(&mut errors, "title", &input.title, MAX_TITLE_CHARS);
        let summary = check_text(&mut errors, "summary", &input.summary, MAX_SUMMARY_CHARS);
        let news_date = check_date(&mut errors, "news_date", &input.news_date);
        errors.into_result()?;

        let (Some(title), Some(summary), Some(news_date)) = (title, summary, news_date) else {
            return Err(DatabaseError::InvalidState(
                "validated news is missing a field".into(),
            ));
        };

        let news = self
            .backend()
            .insert_news(NewNews {
                title,
                summary,
                content: normalize_optional(input.content.as_deref()),
                news_date,
                created_by: author_id,
            })
            .await?;
        info!(news_id = news.id, "news created");
        self.news_view(news).await
    }

    /// Apply a partial edit. Only supplied fields are validated and replaced.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty patch or a rejected field, and
    /// `NotFound` when no news item has this id.
    pub async fn update_news(&self, id: i64, patch: NewsPatch) -> Result<NewsView, DatabaseError> {
        if patch.is_empty() {
            return Err(ValidationErrors::single("fields", "no fields to update").into());
        }

        let mut errors = ValidationErrors::new();
        let mut builder = NewsUpdateBuilder::new();
        if let Some(ref raw) = patch.title {
            if let Some(title) = check_text(&mut errors, "title", raw, MAX_TITLE_CHARS) {
                builder = builder.title(title);
            }
        }
        if let Some(ref raw) = patch.summary {
            if let Some(summary) = check_text(&mut errors, "summary", raw, MAX_SUMMARY_CHARS) {
                builder = builder.summary(summary);
            }
        }
        if let Some(ref raw) = patch.content {
            builder = builder.content(normalize_optional(Some(raw)));
        }
        if let Some(ref raw) = patch.news_date {
            if let Some(date) = check_date(&mut errors, "news_date", raw) {
                builder = builder.news_date(date);
            }
        }
        errors.into_result()?;

        if !self.backend().update_news(id, &builder.build()).await? {
            return Err(DatabaseError::not_found("News", id));
        }
        info!(news_id = id, "news updated");
        self.get_news(id).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` when no news item has this id.
    pub async fn delete_news(&self, id: i64) -> Result<(), DatabaseError> {
        if !self.backend().delete_news(id).await? {
            return Err(DatabaseError::not_found("News", id));
        }
        info!(news_id = id, "news deleted");
        Ok(())
    }

    /// Newest `news_date` first.
    pub async fn list_news(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<NewsView>, DatabaseError> {
        let limits = self.limits();
        let limit = clamp_limit(limit, limits.default_news_limit, limits.max_news_limit);
        let items = self
            .backend()
            .list_news(limit, offset.unwrap_or(0))
            .await?;
        let emails = self
            .user_emails(items.iter().filter_map(|n| n.created_by).collect::<Vec<i64>>())
            .await?;
        Ok(items
            .into_iter()
            .map(|news| NewsView {
                created_by_email: news.created_by.and_then(|id| emails.get(&id).cloned()),
                news,
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns `NotFound` when no news item has this id.
    pub async fn get_news(&self, id: i64) -> Result<NewsView, DatabaseError> {
        let news = self
            .backend()
            .get_news(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("News", id))?;
        self.news_view(news).await
    }

    async fn news_view(&self, news: News) -> Result<NewsView, DatabaseError> {
        let created_by_email = match news.created_by {
            Some(user_id) => self.user_emails([user_id]).await?.remove(&user_id),
            None => None,
        };
        Ok(NewsView {
            news,
            created_by_email,
        })
    }
}
