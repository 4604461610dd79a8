//! Integration tests for task listing.
//!
//! These tests run filter, sort and pagination requests end to end against
//! an in-memory database.

use std::collections::HashSet;
use task_board::db::Database;
use task_board::db::query::{ListParams, TaskQuery};
use task_board::types::{NewTask, Priority, Task};

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

/// Build a query from raw `key=value` pairs, the way the endpoint receives them.
fn query(pairs: &[(&str, &str)]) -> TaskQuery {
    let mut p = ListParams::default();
    for (key, value) in pairs {
        let v = Some(value.to_string());
        match *key {
            "priority" => p.priority = v,
            "category" => p.category = v,
            "completed" => p.completed = v,
            "search" => p.search = v,
            "page" => p.page = v,
            "limit" => p.limit = v,
            "sortBy" => p.sort_by = v,
            "sortOrder" => p.sort_order = v,
            other => panic!("unknown key {}", other),
        }
    }
    TaskQuery::from_params(&p)
}

fn add(db: &Database, title: &str) -> Task {
    db.create_task(NewTask::new(title)).unwrap()
}

fn add_full(
    db: &Database,
    title: &str,
    description: Option<&str>,
    priority: Priority,
    category: &str,
    due_date: Option<&str>,
) -> Task {
    db.create_task(NewTask {
        title: title.to_string(),
        description: description.map(str::to_string),
        priority: Some(priority),
        category: Some(category.to_string()),
        due_date: due_date.map(str::to_string),
    })
    .unwrap()
}

fn ids(tasks: &[Task]) -> Vec<i64> {
    tasks.iter().map(|t| t.id).collect()
}

#[test]
fn empty_store_has_one_page() {
    let db = setup_db();
    let page = db.list_tasks(&TaskQuery::default()).unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total_items, 0);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.items_per_page, 10);
    assert!(!page.pagination.has_next_page);
    assert!(!page.pagination.has_previous_page);
}

#[test]
fn completed_filter_treats_non_true_as_false() {
    let db = setup_db();
    let open = add(&db, "open task");
    let done = add(&db, "done task");
    db.toggle_task(done.id).unwrap();

    let page = db.list_tasks(&query(&[("completed", "true")])).unwrap();
    assert_eq!(ids(&page.data), vec![done.id]);

    let page = db.list_tasks(&query(&[("completed", "TRUE")])).unwrap();
    assert_eq!(ids(&page.data), vec![done.id]);

    for raw in ["false", "nonsense", "1", ""] {
        let page = db.list_tasks(&query(&[("completed", raw)])).unwrap();
        assert_eq!(ids(&page.data), vec![open.id], "completed={:?}", raw);
    }

    let page = db.list_tasks(&TaskQuery::default()).unwrap();
    assert_eq!(page.pagination.total_items, 2);
}

#[test]
fn search_matches_title_or_description_case_insensitively() {
    let db = setup_db();
    let alpha = add_full(&db, "Project Alpha", None, Priority::Medium, "work", Some("2025-01-01"));
    let _other = add_full(
        &db,
        "Other",
        Some("no relation"),
        Priority::Medium,
        "work",
        Some("2025-01-02"),
    );
    let described = add_full(
        &db,
        "Misc",
        Some("part of the PROJ backlog"),
        Priority::Low,
        "home",
        Some("2025-01-03"),
    );

    let page = db
        .list_tasks(&query(&[("search", "proj"), ("sortOrder", "asc")]))
        .unwrap();
    assert_eq!(ids(&page.data), vec![alpha.id, described.id]);
    assert_eq!(page.pagination.total_items, 2);
}

#[test]
fn filters_combine_with_and() {
    let db = setup_db();
    let target = add_full(&db, "a", None, Priority::High, "work", None);
    add_full(&db, "b", None, Priority::High, "home", None);
    add_full(&db, "c", None, Priority::Low, "work", None);

    let page = db
        .list_tasks(&query(&[("priority", "high"), ("category", "work")]))
        .unwrap();
    assert_eq!(ids(&page.data), vec![target.id]);
}

#[test]
fn priority_filter_is_exact_match() {
    let db = setup_db();
    add_full(&db, "a", None, Priority::High, "work", None);

    let page = db.list_tasks(&query(&[("priority", "HIGH")])).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total_pages, 1);
}

#[test]
fn pages_report_position() {
    let db = setup_db();
    for i in 0..25 {
        add(&db, &format!("task {:02}", i));
    }

    let page = db.list_tasks(&query(&[("page", "3")])).unwrap();
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.pagination.current_page, 3);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.total_items, 25);
    assert!(!page.pagination.has_next_page);
    assert!(page.pagination.has_previous_page);

    let page = db.list_tasks(&query(&[("page", "2")])).unwrap();
    assert_eq!(page.data.len(), 10);
    assert!(page.pagination.has_next_page);
    assert!(page.pagination.has_previous_page);
}

#[test]
fn page_past_the_end_is_empty_with_metadata() {
    let db = setup_db();
    for i in 0..3 {
        add(&db, &format!("t{}", i));
    }

    let page = db.list_tasks(&query(&[("page", "5")])).unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.current_page, 5);
    assert_eq!(page.pagination.total_pages, 1);
    assert!(!page.pagination.has_next_page);
    assert!(page.pagination.has_previous_page);
}

#[test]
fn limits_are_clamped() {
    let db = setup_db();
    for i in 0..3 {
        add(&db, &format!("t{}", i));
    }

    let page = db.list_tasks(&query(&[("limit", "500")])).unwrap();
    assert_eq!(page.pagination.items_per_page, 100);
    assert_eq!(page.data.len(), 3);

    let page = db.list_tasks(&query(&[("limit", "0")])).unwrap();
    assert_eq!(page.pagination.items_per_page, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.total_pages, 3);

    let page = db
        .list_tasks(&query(&[("limit", "abc"), ("page", "-2")]))
        .unwrap();
    assert_eq!(page.pagination.items_per_page, 10);
    assert_eq!(page.pagination.current_page, 1);
}

#[test]
fn walking_all_pages_visits_every_task_once() {
    let db = setup_db();
    let mut expected = HashSet::new();
    for i in 0..11 {
        // Same due date everywhere so ordering relies on the id tiebreaker.
        let t = add_full(&db, &format!("t{}", i), None, Priority::Low, "x", Some("2025-05-05"));
        expected.insert(t.id);
    }

    let mut seen = Vec::new();
    let mut page_no = 1;
    loop {
        let page = db
            .list_tasks(&query(&[("limit", "3"), ("page", &page_no.to_string())]))
            .unwrap();
        seen.extend(ids(&page.data));
        if !page.pagination.has_next_page {
            assert_eq!(page.pagination.total_pages, 4);
            break;
        }
        page_no += 1;
    }

    assert_eq!(seen.len(), 11);
    assert_eq!(seen.iter().copied().collect::<HashSet<_>>(), expected);
}

#[test]
fn sorts_by_title_ascending() {
    let db = setup_db();
    let c = add(&db, "cherry");
    let a = add(&db, "apple");
    let b = add(&db, "banana");

    let page = db
        .list_tasks(&query(&[("sortBy", "Title"), ("sortOrder", "ASC")]))
        .unwrap();
    assert_eq!(ids(&page.data), vec![a.id, b.id, c.id]);

    let page = db.list_tasks(&query(&[("sortBy", "title")])).unwrap();
    assert_eq!(ids(&page.data), vec![c.id, b.id, a.id]);
}

#[test]
fn unknown_sort_falls_back_to_due_date_desc() {
    let db = setup_db();
    let early = add_full(&db, "b", None, Priority::Low, "x", Some("2025-01-01"));
    let late = add_full(&db, "a", None, Priority::Low, "x", Some("2025-12-31"));
    let middle = add_full(&db, "c", None, Priority::Low, "x", Some("2025-06-15"));

    let page = db
        .list_tasks(&query(&[("sortBy", "created_at")]))
        .unwrap();
    assert_eq!(ids(&page.data), vec![late.id, middle.id, early.id]);

    let page = db
        .list_tasks(&query(&[("sortBy", "title; DROP TABLE tasks"), ("sortOrder", "asc")]))
        .unwrap();
    assert_eq!(ids(&page.data), vec![early.id, middle.id, late.id]);

    // Table still intact.
    assert_eq!(db.list_tasks(&TaskQuery::default()).unwrap().pagination.total_items, 3);
}

#[test]
fn search_wildcards_are_bound_values() {
    let db = setup_db();
    add(&db, "plain");

    let page = db
        .list_tasks(&query(&[("search", "' OR 1=1 --")]))
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total_items, 0);
}
