use std::sync::Once;

use atelier_core::{Article, BlogSeed, ContentStore, FeedKind, MemoryStorage, Project};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(site_logging::initialize_for_tests);
}

fn new_store() -> ContentStore {
    ContentStore::init(Box::new(MemoryStorage::new()))
}

fn article(id: &str, date: &str) -> Article {
    Article {
        id: id.to_owned(),
        project_id: None,
        title: format!("Article {id}"),
        date: date.to_owned(),
        excerpt: "An excerpt.".to_owned(),
        content: "Body.".to_owned(),
        image: format!("assets/{id}.jpg"),
    }
}

fn blogged_project(id: &str, date: &str) -> Project {
    Project {
        id: id.to_owned(),
        title: format!("{id} house"),
        category: "Residential".to_owned(),
        image: format!("assets/{id}.jpg"),
        description: format!("Notes on {id}."),
        gallery: Vec::new(),
        is_ethosphere: false,
        is_conceptual: false,
        blog: Some(BlogSeed {
            title: None,
            date: Some(date.to_owned()),
            excerpt: None,
            content: "Diary.".to_owned(),
        }),
    }
}

#[test]
fn feed_is_ordered_most_recent_first() {
    init_logging();
    let mut store = new_store();
    store.load_article(article("a", "2024-01-01"));
    store.load_article(article("b", "2025-06-15"));
    store.load_article(article("c", "2023-12-31"));

    let feed = store.blog_feed();
    let dates: Vec<&str> = feed.iter().map(|e| e.date.as_str()).collect();
    assert_eq!(dates, ["2025-06-15", "2024-01-01", "2023-12-31"]);
}

#[test]
fn feed_merges_both_kinds() {
    init_logging();
    let mut store = new_store();
    store.load_project(blogged_project("villa", "2024-06-01"));
    store.load_article(article("brick", "2024-07-01"));

    let feed = store.blog_feed();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].kind, FeedKind::Article);
    assert_eq!(feed[0].id, "brick");
    assert_eq!(feed[1].kind, FeedKind::Project);
    assert_eq!(feed[1].id, "villa");
    assert_eq!(feed[1].project_id.as_deref(), Some("villa"));
}

#[test]
fn same_date_entries_keep_ingestion_order() {
    init_logging();
    let mut store = new_store();
    store.load_article(article("first", "2024-05-05"));
    store.load_article(article("second", "2024-05-05"));
    store.load_article(article("third", "2024-05-05"));

    let feed = store.blog_feed();
    let ids: Vec<&str> = feed.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

#[test]
fn unparseable_dates_sort_after_dated_entries() {
    init_logging();
    let mut store = new_store();
    store.load_article(article("undated", "to be announced"));
    store.load_article(article("old", "2001-01-01"));

    let feed = store.blog_feed();
    let ids: Vec<&str> = feed.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["old", "undated"]);
}

#[test]
fn article_hide_flag_is_keyed_by_its_own_id() {
    init_logging();
    let mut store = new_store();
    store.load_project(blogged_project("villa", "2024-06-01"));
    let mut linked = article("brick", "2024-07-01");
    linked.project_id = Some("villa".to_owned());
    store.load_article(linked);

    store.toggle_blog_visibility("brick");

    let feed = store.blog_feed();
    let brick = feed.iter().find(|e| e.id == "brick").expect("article entry");
    let villa = feed.iter().find(|e| e.id == "villa").expect("project entry");
    assert!(brick.hidden);
    assert!(!villa.hidden);
}

#[test]
fn dangling_project_link_is_kept_and_fails_soft() {
    init_logging();
    let mut store = new_store();
    let mut orphan = article("brick", "2024-07-01");
    orphan.project_id = Some("never-loaded".to_owned());
    store.load_article(orphan);

    let feed = store.blog_feed();
    assert_eq!(feed[0].project_id.as_deref(), Some("never-loaded"));
    assert!(store.project("never-loaded").is_none());
}

#[test]
fn linked_articles_stay_separate_from_the_project_blog_slot() {
    init_logging();
    let mut store = new_store();
    store.load_project(blogged_project("villa", "2024-06-01"));
    let mut linked = article("brick", "2024-07-01");
    linked.project_id = Some("villa".to_owned());
    store.load_article(linked);

    // One derived post plus one linked article; linking never folds them.
    assert_eq!(store.blog_feed().len(), 2);
}
