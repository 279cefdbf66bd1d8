//! News registry behaviour against both backends.

mod common;

use pretty_assertions::assert_eq;
use rstest::rstest;

use common::{Kind, harness};
use desk_db::repos::news::{NewsInput, NewsPatch};

fn input(title: &str, news_date: &str) -> NewsInput {
    NewsInput {
        title: title.into(),
        summary: "Dashboard now tracks warnings".into(),
        content: Some("  Full text  ".into()),
        news_date: news_date.into(),
    }
}

#[rstest]
#[case::sql(Kind::Sql)]
#[case::memory(Kind::Memory)]
#[tokio::test]
async fn create_trims_and_joins_author(#[case] kind: Kind) {
    let h = harness(kind).await;
    let admin = h.admin().await;

    let view = h
        .service
        .create_news(input("  Launch  ", "2025-01-02"), Some(admin))
        .await
        .unwrap();
    assert_eq!(view.news.title, "Launch");
    assert_eq!(view.news.content.as_deref(), Some("Full text"));
    assert_eq!(view.created_by_email.as_deref(), Some("admin@example.com"));
    assert_eq!(h.service.get_news(view.news.id).await.unwrap(), view);
}

#[rstest]
#[case::sql(Kind::Sql)]
#[case::memory(Kind::Memory)]
#[tokio::test]
async fn create_rejects_bad_fields(#[case] kind: Kind) {
    let h = harness(kind).await;
    let bad = NewsInput {
        title: "x".repeat(201),
        summary: "   ".into(),
        content: None,
        news_date: "soon".into(),
    };
    let err = h.service.create_news(bad, None).await.unwrap_err();
    let fields: Vec<&str> = err
        .validation()
        .unwrap()
        .fields()
        .iter()
        .map(|e| e.field.as_str())
        .collect();
    assert_eq!(fields, ["title", "summary", "news_date"]);
    assert!(h.service.list_news(None, None).await.unwrap().is_empty());
}

#[rstest]
#[case::sql(Kind::Sql)]
#[case::memory(Kind::Memory)]
#[tokio::test]
async fn empty_patch_is_rejected(#[case] kind: Kind) {
    let h = harness(kind).await;
    let view = h.service.create_news(input("Launch", "2025-01-02"), None).await.unwrap();

    let err = h
        .service
        .update_news(view.news.id, NewsPatch::default())
        .await
        .unwrap_err();
    let errors = err.validation().unwrap();
    assert!(errors.has_field("fields"));
    assert_eq!(errors.fields()[0].message, "no fields to update");
}

#[rstest]
#[case::sql(Kind::Sql)]
#[case::memory(Kind::Memory)]
#[tokio::test]
async fn single_field_patch_changes_only_that_field(#[case] kind: Kind) {
    let h = harness(kind).await;
    let view = h.service.create_news(input("Launch", "2025-01-02"), None).await.unwrap();

    let patch = NewsPatch {
        summary: Some("Updated summary".into()),
        ..NewsPatch::default()
    };
    let updated = h.service.update_news(view.news.id, patch).await.unwrap();
    assert_eq!(updated.news.summary, "Updated summary");
    assert_eq!(updated.news.title, view.news.title);
    assert_eq!(updated.news.content, view.news.content);
    assert_eq!(updated.news.news_date, view.news.news_date);
    assert_eq!(updated.news.created_at, view.news.created_at);
    assert!(updated.news.updated_at >= view.news.updated_at);

    let clear = NewsPatch {
        content: Some(String::new()),
        ..NewsPatch::default()
    };
    let cleared = h.service.update_news(view.news.id, clear).await.unwrap();
    assert_eq!(cleared.news.content, None);
}

#[rstest]
#[case::sql(Kind::Sql)]
#[case::memory(Kind::Memory)]
#[tokio::test]
async fn patch_validates_supplied_fields_and_existence(#[case] kind: Kind) {
    let h = harness(kind).await;
    let view = h.service.create_news(input("Launch", "2025-01-02"), None).await.unwrap();

    let bad = NewsPatch {
        news_date: Some("2025-13-01".into()),
        ..NewsPatch::default()
    };
    let err = h.service.update_news(view.news.id, bad).await.unwrap_err();
    assert!(err.validation().unwrap().has_field("news_date"));

    let missing = NewsPatch {
        title: Some("Ghost".into()),
        ..NewsPatch::default()
    };
    assert!(h.service.update_news(999, missing).await.unwrap_err().is_not_found());
}

#[rstest]
#[case::sql(Kind::Sql)]
#[case::memory(Kind::Memory)]
#[tokio::test]
async fn delete_and_list(#[case] kind: Kind) {
    let h = harness(kind).await;
    let older = h.service.create_news(input("Older", "2024-11-30"), None).await.unwrap();
    let newer = h.service.create_news(input("Newer", "2025-01-02"), None).await.unwrap();

    let titles: Vec<String> = h
        .service
        .list_news(None, None)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.news.title)
        .collect();
    assert_eq!(titles, ["Newer", "Older"]);
    assert_eq!(h.service.list_news(Some(1), Some(1)).await.unwrap()[0].news.id, older.news.id);

    h.service.delete_news(newer.news.id).await.unwrap();
    assert!(h.service.delete_news(newer.news.id).await.unwrap_err().is_not_found());
    assert!(h.service.get_news(newer.news.id).await.unwrap_err().is_not_found());
    assert_eq!(h.service.list_news(None, None).await.unwrap().len(), 1);
}
