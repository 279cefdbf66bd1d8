//! News queries.

use desk_core::entities::News;

use super::SqlBackend;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_date, parse_datetime};
use crate::records::NewNews;
use crate::updates::news::NewsUpdate;

const SELECT_COLS: &str =
    "id, title, summary, content, news_date, created_by, created_at, updated_at";

fn row_to_news(row: &libsql::Row) -> Result<News, DatabaseError> {
    Ok(News {
        id: row.get::<i64>(0)?,
        title: row.get::<String>(1)?,
        summary: row.get::<String>(2)?,
        content: get_opt_string(row, 3)?,
        news_date: parse_date(&row.get::<String>(4)?)?,
        created_by: row.get::<Option<i64>>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl SqlBackend {
    pub(super) async fn select_news_page(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<News>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM news
                     ORDER BY news_date DESC, created_at DESC, id DESC
                     LIMIT ?1 OFFSET ?2"
                ),
                libsql::params![i64::from(limit), i64::from(offset)],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_news(&row)?);
        }
        Ok(items)
    }

    pub(super) async fn select_news(&self, id: i64) -> Result<Option<News>, DatabaseError> {
        let mut rows = self
            .conn
            .query(&format!("SELECT {SELECT_COLS} FROM news WHERE id = ?1"), [id])
            .await?;
        rows.next().await?.map(|row| row_to_news(&row)).transpose()
    }

    pub(super) async fn insert_news_row(&self, news: NewNews) -> Result<News, DatabaseError> {
        let created_at = now();
        let stamp = format_datetime(created_at);
        let mut rows = self
            .conn
            .query(
                "INSERT INTO news (title, summary, content, news_date, created_by, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                libsql::params![
                    news.title.as_str(),
                    news.summary.as_str(),
                    news.content.as_deref(),
                    news.news_date.to_string(),
                    news.created_by,
                    stamp.as_str(),
                    stamp.as_str()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;

        Ok(News {
            id: row.get::<i64>(0)?,
            title: news.title,
            summary: news.summary,
            content: news.content,
            news_date: news.news_date,
            created_by: news.created_by,
            created_at,
            updated_at: created_at,
        })
    }

    pub(super) async fn update_news_row(
        &self,
        id: i64,
        update: &NewsUpdate,
    ) -> Result<bool, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.as_str().into());
            idx += 1;
        }
        if let Some(ref summary) = update.summary {
            sets.push(format!("summary = ?{idx}"));
            params.push(summary.as_str().into());
            idx += 1;
        }
        if let Some(ref content) = update.content {
            sets.push(format!("content = ?{idx}"));
            params.push(content.as_deref().into());
            idx += 1;
        }
        if let Some(news_date) = update.news_date {
            sets.push(format!("news_date = ?{idx}"));
            params.push(news_date.to_string().into());
            idx += 1;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_datetime(now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE news SET {} WHERE id = ?{idx}", sets.join(", "));

        let changed = self
            .conn
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        Ok(changed > 0)
    }

    pub(super) async fn delete_news_row(&self, id: i64) -> Result<bool, DatabaseError> {
        let changed = self
            .conn
            .execute("DELETE FROM news WHERE id = ?1", [id])
            .await?;
        Ok(changed > 0)
    }
}
