mod common;

use chrono::Utc;
use common::ScriptedGenerator;
use shortlink::application::services::{LinkService, MAX_CODE_ATTEMPTS};
use shortlink::domain::entities::Link;
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use std::sync::Arc;
use std::time::Duration;

async fn seed(repo: &MemoryLinkRepository, code: &str, url: &str) {
    repo.save(Link::new(code.to_string(), url.to_string(), Utc::now()))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_collision_retries_until_free_code() {
    let repo = Arc::new(MemoryLinkRepository::new(Duration::ZERO));
    seed(&repo, "AAA", "https://first.example").await;

    let generator = Arc::new(ScriptedGenerator::new(&["AAA", "AAA", "BBB"]));
    let service = LinkService::new(Arc::clone(&repo), Arc::clone(&generator));

    let link = service
        .create_short_link("https://second.example".to_string())
        .await
        .unwrap();

    assert_eq!(link.code, "BBB");
    assert_eq!(generator.calls(), 3);
    assert_eq!(
        service.get_long_url("AAA").await.unwrap(),
        "https://first.example"
    );
    assert_eq!(
        service.get_long_url("BBB").await.unwrap(),
        "https://second.example"
    );
}

#[tokio::test]
async fn test_exhausted_attempts_overwrite_last_code() {
    let repo = Arc::new(MemoryLinkRepository::new(Duration::ZERO));
    seed(&repo, "AAA", "https://first.example").await;

    let generator = Arc::new(ScriptedGenerator::new(&["AAA"]));
    let service = LinkService::new(Arc::clone(&repo), Arc::clone(&generator));

    let link = service
        .create_short_link("https://second.example".to_string())
        .await
        .unwrap();

    assert_eq!(link.code, "AAA");
    assert_eq!(generator.calls(), MAX_CODE_ATTEMPTS);
    assert_eq!(repo.len(), 1);
    assert_eq!(
        service.get_long_url("AAA").await.unwrap(),
        "https://second.example"
    );
}

#[tokio::test]
async fn test_expired_link_not_resolved() {
    let repo = Arc::new(MemoryLinkRepository::new(Duration::from_millis(10)));
    let generator = Arc::new(ScriptedGenerator::new(&["abc"]));
    let service = LinkService::new(Arc::clone(&repo), generator);

    service
        .create_short_link("https://example.com".to_string())
        .await
        .unwrap();
    assert_eq!(
        service.get_long_url("abc").await.unwrap(),
        "https://example.com"
    );

    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = service.get_long_url("abc").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_empty_url_is_not_stored() {
    let repo = Arc::new(MemoryLinkRepository::new(Duration::ZERO));
    let generator = Arc::new(ScriptedGenerator::new(&["abc"]));
    let service = LinkService::new(Arc::clone(&repo), generator);

    let result = service.create_short_link(String::new()).await;

    assert!(result.is_err());
    assert!(repo.is_empty());
}
