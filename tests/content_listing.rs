mod common;

use std::collections::HashSet;

use chrono::{Duration, Utc};
use common::{create, insert_author, new_post, test_db};
use poem_blog_api::content::models::PostCreate;
use poem_blog_api::content::pagination::MAX_PAGE_SIZE;
use poem_blog_api::content::{ContentKind, ContentService, ListFilter, PageRequest};
use poem_blog_api::i18n::Language;

fn no_filter() -> ListFilter {
    ListFilter::default()
}

#[tokio::test]
async fn listing_only_shows_published_posts_of_the_requested_kind() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());

    create(&service, "visible", author.id, 1, ContentKind::Blog).await?;
    create(&service, "an-essay", author.id, 1, ContentKind::Essay).await?;
    service
        .create(PostCreate { is_published: false, publish_date: None, ..new_post("draft", author.id, 0) }, ContentKind::Blog)
        .await?;

    let blog = service.list_content(ContentKind::Blog, PageRequest::default(), &no_filter(), Language::En).await?;
    let slugs: Vec<_> = blog.items.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["visible"]);
    assert_eq!(blog.total, 1);
    assert!(blog.items.iter().all(|p| p.is_published && !p.is_essay));

    let essays = service.list_content(ContentKind::Essay, PageRequest::default(), &no_filter(), Language::En).await?;
    assert_eq!(essays.items.len(), 1);
    assert!(essays.items[0].is_essay);
    Ok(())
}

#[tokio::test]
async fn listing_is_newest_first_with_author_and_tags() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());
    let tags = service.ensure_tags(&["Rust".to_string()]).await?;

    create(&service, "old", author.id, 5, ContentKind::Blog).await?;
    create(&service, "new", author.id, 1, ContentKind::Blog).await?;
    service
        .create(PostCreate { tag_ids: Some(vec![tags[0].id]), ..new_post("middle", author.id, 3) }, ContentKind::Blog)
        .await?;

    let page = service.list_content(ContentKind::Blog, PageRequest::default(), &no_filter(), Language::En).await?;
    let slugs: Vec<_> = page.items.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["new", "middle", "old"]);

    let middle = &page.items[1];
    assert_eq!(middle.author.as_ref().map(|a| a.name.as_str()), Some("Ana"));
    assert_eq!(middle.tags.iter().map(|t| t.slug.as_str()).collect::<Vec<_>>(), vec!["rust"]);
    assert!(page.items[0].tags.is_empty());
    Ok(())
}

#[tokio::test]
async fn pages_partition_the_listing() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());

    let same_day = Utc::now().fixed_offset() - Duration::days(2);
    for i in 0..25 {
        let data = PostCreate { publish_date: Some(same_day), ..new_post(&format!("post-{i}"), author.id, 0) };
        service.create(data, ContentKind::Blog).await?;
    }

    let mut seen = HashSet::new();
    for page_no in 1..=3 {
        let page = service
            .list_content(ContentKind::Blog, PageRequest::new(page_no, 10), &no_filter(), Language::En)
            .await?;
        assert_eq!(page.total, 25);
        assert_eq!(page.pages, 3);
        assert_eq!(page.page, page_no);
        assert!(page.items.len() <= 10);
        for item in page.items {
            assert!(seen.insert(item.id), "post {} appeared on two pages", item.slug);
        }
    }
    assert_eq!(seen.len(), 25);

    let beyond = service
        .list_content(ContentKind::Blog, PageRequest::new(4, 10), &no_filter(), Language::En)
        .await?;
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 25);
    Ok(())
}

#[tokio::test]
async fn huge_page_numbers_return_an_empty_page() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());
    create(&service, "only", author.id, 1, ContentKind::Blog).await?;

    for page_no in [u64::MAX, (1 << 63) + 1] {
        let page = service
            .list_content(ContentKind::Blog, PageRequest::new(page_no, 2), &no_filter(), Language::En)
            .await?;
        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.page, page_no);
        assert_eq!(page.pages, 1);
    }
    Ok(())
}

#[tokio::test]
async fn empty_listing_reports_one_page_and_page_size_is_clamped() -> anyhow::Result<()> {
    let db = test_db().await?;
    let service = ContentService::new(db.clone());

    let page = service
        .list_content(ContentKind::Essay, PageRequest::new(0, 10_000), &no_filter(), Language::En)
        .await?;
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.pages, 1);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, MAX_PAGE_SIZE);
    Ok(())
}

#[tokio::test]
async fn tag_filter_matches_the_exact_slug() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());
    let tags = service.ensure_tags(&["Rust".to_string(), "Web".to_string()]).await?;
    let (rust, web) = (tags[0].id, tags[1].id);

    service.create(PostCreate { tag_ids: Some(vec![rust]), ..new_post("a", author.id, 3) }, ContentKind::Blog).await?;
    service.create(PostCreate { tag_ids: Some(vec![web]), ..new_post("b", author.id, 2) }, ContentKind::Blog).await?;
    service
        .create(PostCreate { tag_ids: Some(vec![rust, web]), ..new_post("c", author.id, 1) }, ContentKind::Blog)
        .await?;

    let filter = ListFilter::new(Some("rust".into()), None);
    let page = service.list_content(ContentKind::Blog, PageRequest::default(), &filter, Language::En).await?;
    let slugs: Vec<_> = page.items.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["c", "a"]);
    assert_eq!(page.total, 2);
    // the matching post still carries its full tag set
    assert_eq!(page.items[0].tags.len(), 2);

    let upper = ListFilter::new(Some("Rust".into()), None);
    let page = service.list_content(ContentKind::Blog, PageRequest::default(), &upper, Language::En).await?;
    assert_eq!(page.total, 0);
    Ok(())
}

#[tokio::test]
async fn search_is_case_insensitive_across_title_content_and_summary() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());

    service
        .create(PostCreate { title: "Hello World".into(), ..new_post("by-title", author.id, 3) }, ContentKind::Blog)
        .await?;
    service
        .create(
            PostCreate { content: "the whole WORLD is here".into(), ..new_post("by-content", author.id, 2) },
            ContentKind::Blog,
        )
        .await?;
    service
        .create(PostCreate { summary: Some("world tour".into()), ..new_post("by-summary", author.id, 1) }, ContentKind::Blog)
        .await?;
    create(&service, "unrelated", author.id, 0, ContentKind::Blog).await?;

    let filter = ListFilter::new(None, Some("wOrLd".into()));
    let page = service.list_content(ContentKind::Blog, PageRequest::default(), &filter, Language::En).await?;
    let slugs: HashSet<_> = page.items.iter().map(|p| p.slug.clone()).collect();
    assert_eq!(slugs, HashSet::from(["by-title".to_string(), "by-content".to_string(), "by-summary".to_string()]));

    let wildcard = ListFilter::new(None, Some("%".into()));
    let page = service.list_content(ContentKind::Blog, PageRequest::default(), &wildcard, Language::En).await?;
    assert_eq!(page.total, 0);
    Ok(())
}

#[tokio::test]
async fn portuguese_listing_overlays_translated_fields() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());

    service
        .create(
            PostCreate {
                title_pt: Some("Olá".into()),
                summary_pt: Some(String::new()),
                ..new_post("hello", author.id, 1)
            },
            ContentKind::Blog,
        )
        .await?;

    let pt = service.list_content(ContentKind::Blog, PageRequest::default(), &no_filter(), Language::Pt).await?;
    assert_eq!(pt.items[0].title, "Olá");
    assert_eq!(pt.items[0].summary.as_deref(), Some("Summary of hello"));
    assert_eq!(pt.items[0].content, "Content of hello");

    let en = service.list_content(ContentKind::Blog, PageRequest::default(), &no_filter(), Language::En).await?;
    assert_eq!(en.items[0].title, "Title hello");
    Ok(())
}

#[tokio::test]
async fn detail_lookup_is_scoped_to_kind() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());
    create(&service, "long-read", author.id, 1, ContentKind::Essay).await?;

    assert!(service.get_by_slug("long-read", ContentKind::Blog, Language::En).await?.is_none());
    let essay = service.get_by_slug("long-read", ContentKind::Essay, Language::En).await?;
    let essay = essay.expect("essay should be found");
    assert_eq!(essay.post.slug, "long-read");
    assert!(essay.comments.is_empty());
    assert!(service.get_by_slug("missing", ContentKind::Essay, Language::En).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn drafts_are_reachable_by_slug() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let service = ContentService::new(db.clone());
    service
        .create(PostCreate { is_published: false, publish_date: None, ..new_post("draft", author.id, 0) }, ContentKind::Blog)
        .await?;

    let draft = service.get_by_slug("draft", ContentKind::Blog, Language::En).await?;
    assert!(draft.is_some_and(|d| !d.post.is_published));
    Ok(())
}
