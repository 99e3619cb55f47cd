//! Leaderboard tests over real visit rows

mod common;

use chrono::{Duration, Utc};

use url_shortcuts::errors::ShortcutsError;
use url_shortcuts::services::{LEADERBOARD_SIZE, LeaderboardService, Period};
use url_shortcuts::storage::NewVisit;

use common::{add_shortcut, setup_storage};

async fn visit_at(storage: &url_shortcuts::storage::SeaOrmStorage, id: i64, age: Duration) {
    let mut visit = NewVisit::now(id);
    visit.timestamp = Utc::now() - age;
    storage.insert_visit(visit).await.unwrap();
}

#[tokio::test]
async fn test_day_counts_recent_visits() {
    let (_dir, storage) = setup_storage().await;
    let id = add_shortcut(&storage, "fb", "https://example.com").await;
    for _ in 0..3 {
        visit_at(&storage, id, Duration::minutes(5)).await;
    }

    let top = LeaderboardService::new(storage.clone())
        .top(Period::Day)
        .await
        .unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, id);
    assert_eq!(top[0].code, "fb");
    assert_eq!(top[0].total_visits, 3);
}

#[tokio::test]
async fn test_deleted_shortcut_drops_out() {
    let (_dir, storage) = setup_storage().await;
    let kept = add_shortcut(&storage, "kept", "https://example.com/k").await;
    let gone = add_shortcut(&storage, "gone", "https://example.com/g").await;
    visit_at(&storage, kept, Duration::minutes(1)).await;
    visit_at(&storage, gone, Duration::minutes(1)).await;
    visit_at(&storage, gone, Duration::minutes(2)).await;

    storage.delete_shortcut(gone).await.unwrap();

    let top = LeaderboardService::new(storage.clone())
        .top(Period::Week)
        .await
        .unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].id, kept);
    // 访问记录本身保留
    assert_eq!(storage.visits_for_shortcut(gone).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_ties_break_by_id() {
    let (_dir, storage) = setup_storage().await;
    let first = add_shortcut(&storage, "first", "https://example.com/1").await;
    let second = add_shortcut(&storage, "second", "https://example.com/2").await;
    let busiest = add_shortcut(&storage, "busiest", "https://example.com/3").await;
    visit_at(&storage, second, Duration::hours(1)).await;
    visit_at(&storage, first, Duration::hours(1)).await;
    for _ in 0..2 {
        visit_at(&storage, busiest, Duration::hours(1)).await;
    }

    let ids: Vec<i64> = LeaderboardService::new(storage)
        .top(Period::Day)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![busiest, first, second]);
}

#[tokio::test]
async fn test_windows_exclude_older_visits() {
    let (_dir, storage) = setup_storage().await;
    let id = add_shortcut(&storage, "promo", "https://example.com").await;
    visit_at(&storage, id, Duration::hours(2)).await;
    visit_at(&storage, id, Duration::days(3)).await;
    visit_at(&storage, id, Duration::days(20)).await;
    visit_at(&storage, id, Duration::days(200)).await;

    let service = LeaderboardService::new(storage);
    let count = |rows: Vec<url_shortcuts::storage::TopShortcut>| {
        rows.first().map(|r| r.total_visits).unwrap_or(0)
    };
    assert_eq!(count(service.top(Period::Day).await.unwrap()), 1);
    assert_eq!(count(service.top(Period::Week).await.unwrap()), 2);
    assert_eq!(count(service.top(Period::Month).await.unwrap()), 3);
    assert_eq!(count(service.top(Period::Year).await.unwrap()), 4);

    let report = service.all_windows().await.unwrap();
    assert_eq!(count(report.today), 1);
    assert_eq!(count(report.this_week), 2);
    assert_eq!(count(report.this_month), 3);
}

#[tokio::test]
async fn test_result_is_capped() {
    let (_dir, storage) = setup_storage().await;
    for i in 0..(LEADERBOARD_SIZE + 3) {
        let id = add_shortcut(&storage, &format!("code{}", i), "https://example.com").await;
        visit_at(&storage, id, Duration::minutes(1)).await;
    }

    let top = LeaderboardService::new(storage)
        .top(Period::Day)
        .await
        .unwrap();
    assert_eq!(top.len() as u64, LEADERBOARD_SIZE);
}

#[tokio::test]
async fn test_unknown_period_name() {
    let (_dir, storage) = setup_storage().await;
    let result = LeaderboardService::new(storage).top_by_name("FORTNIGHT").await;
    assert!(matches!(result, Err(ShortcutsError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_empty_store() {
    let (_dir, storage) = setup_storage().await;
    let top = LeaderboardService::new(storage)
        .top_by_name("YEAR")
        .await
        .unwrap();
    assert!(top.is_empty());
}
