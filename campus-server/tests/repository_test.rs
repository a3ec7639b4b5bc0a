//! Repository integration tests against the migrated schema
//!
//! Unit tests inside the repository modules run on reduced in-memory
//! tables; these go through `DbService` so foreign keys, cascades and
//! the migrations themselves are exercised.

use std::collections::HashMap;

use campus_server::db::DbService;
use campus_server::db::repository::{RepoError, content, course, module, subject, user};
use shared::models::{
    ContentCreate, ContentItem, ContentItemCreate, ContentUpdate, CourseCreate, ModuleCreate,
    ModuleEdit, ModuleUpdate, SubjectCreate, UserCreate,
};
use sqlx::SqlitePool;
use tempfile::TempDir;

// The TempDir must stay alive as long as the pool
async fn test_db() -> (TempDir, DbService) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();
    (dir, db)
}

async fn seed_instructor(pool: &SqlitePool, username: &str) -> i64 {
    user::create(
        pool,
        UserCreate {
            username: username.into(),
            password: "password123".into(),
            display_name: None,
            role: "instructor".into(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_course(pool: &SqlitePool, owner_id: i64, slug: &str) -> i64 {
    let subject = match subject::find_by_slug(pool, "testing").await.unwrap() {
        Some(s) => s,
        None => subject::create(
            pool,
            SubjectCreate {
                title: "Testing".into(),
                slug: "testing".into(),
            },
        )
        .await
        .unwrap(),
    };
    course::create(
        pool,
        owner_id,
        CourseCreate {
            subject_id: subject.id,
            title: format!("Course {slug}"),
            slug: slug.into(),
            overview: "An overview".into(),
        },
    )
    .await
    .unwrap()
    .id
}

fn module_payload(title: &str) -> ModuleCreate {
    ModuleCreate {
        title: title.into(),
        description: String::new(),
        sort_order: None,
    }
}

fn text_payload(title: &str, body: &str) -> ContentCreate {
    ContentCreate {
        sort_order: None,
        item: ContentItemCreate::Text {
            title: title.into(),
            body: body.into(),
        },
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_modules_are_appended_in_sequence() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "rust-101").await;

    for title in ["Week 1", "Week 2", "Week 3"] {
        module::create(&db.pool, course_id, module_payload(title))
            .await
            .unwrap();
    }

    let modules = module::find_by_course(&db.pool, course_id).await.unwrap();
    let orders: Vec<i64> = modules.iter().map(|m| m.sort_order).collect();
    let titles: Vec<&str> = modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(titles, vec!["Week 1", "Week 2", "Week 3"]);
}

#[tokio::test]
async fn test_module_positions_are_scoped_per_course() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let first = seed_course(&db.pool, owner, "first").await;
    let second = seed_course(&db.pool, owner, "second").await;

    module::create(&db.pool, first, module_payload("a"))
        .await
        .unwrap();
    module::create(&db.pool, first, module_payload("b"))
        .await
        .unwrap();
    let fresh = module::create(&db.pool, second, module_payload("x"))
        .await
        .unwrap();

    assert_eq!(fresh.sort_order, 0);
}

#[tokio::test]
async fn test_explicit_position_is_kept_and_continued() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "gaps").await;

    let pinned = module::create(
        &db.pool,
        course_id,
        ModuleCreate {
            title: "Pinned".into(),
            description: String::new(),
            sort_order: Some(5),
        },
    )
    .await
    .unwrap();
    let appended = module::create(&db.pool, course_id, module_payload("After"))
        .await
        .unwrap();

    assert_eq!(pinned.sort_order, 5);
    assert_eq!(appended.sort_order, 6);
}

#[tokio::test]
async fn test_renaming_a_module_keeps_its_position() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "stable").await;

    module::create(&db.pool, course_id, module_payload("First"))
        .await
        .unwrap();
    let second = module::create(&db.pool, course_id, module_payload("Secnd"))
        .await
        .unwrap();

    let updated = module::update(
        &db.pool,
        second.id,
        ModuleUpdate {
            title: Some("Second".into()),
            description: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "Second");
    assert_eq!(updated.sort_order, second.sort_order);
}

#[tokio::test]
async fn test_bulk_sync_applies_inserts_updates_and_deletes() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "formset").await;

    let keep = module::create(&db.pool, course_id, module_payload("keep"))
        .await
        .unwrap();
    let doomed = module::create(&db.pool, course_id, module_payload("drop"))
        .await
        .unwrap();

    let edits = vec![
        ModuleEdit {
            id: Some(keep.id),
            title: "kept".into(),
            description: "renamed".into(),
            delete: false,
        },
        ModuleEdit {
            id: Some(doomed.id),
            title: String::new(),
            description: String::new(),
            delete: true,
        },
        ModuleEdit {
            id: None,
            title: "fresh".into(),
            description: String::new(),
            delete: false,
        },
    ];
    let modules = module::sync_for_course(&db.pool, course_id, &edits)
        .await
        .unwrap();

    let titles: Vec<&str> = modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["kept", "fresh"]);
    // The insert is appended after the surviving rows
    assert_eq!(modules[0].sort_order, 0);
    assert_eq!(modules[1].sort_order, 1);
}

#[tokio::test]
async fn test_reorder_only_touches_rows_of_the_course() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let mine = seed_course(&db.pool, owner, "mine").await;
    let other = seed_course(&db.pool, owner, "other").await;

    let a = module::create(&db.pool, mine, module_payload("a"))
        .await
        .unwrap();
    let b = module::create(&db.pool, mine, module_payload("b"))
        .await
        .unwrap();
    let foreign = module::create(&db.pool, other, module_payload("x"))
        .await
        .unwrap();

    let orders = HashMap::from([(a.id, 1), (b.id, 0), (foreign.id, 9)]);
    module::reorder(&db.pool, mine, &orders).await.unwrap();

    let mine_modules = module::find_by_course(&db.pool, mine).await.unwrap();
    let titles: Vec<&str> = mine_modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "a"]);

    // The row of the other course is filtered out by the scope
    let untouched = module::find_by_id(&db.pool, foreign.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.sort_order, 0);
}

#[tokio::test]
async fn test_contents_resolve_their_items_in_order() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "media").await;
    let module = module::create(&db.pool, course_id, module_payload("Week 1"))
        .await
        .unwrap();

    content::create(
        &db.pool,
        module.id,
        owner,
        text_payload("Notes", "Read this first"),
    )
    .await
    .unwrap();
    content::create(
        &db.pool,
        module.id,
        owner,
        ContentCreate {
            sort_order: None,
            item: ContentItemCreate::Video {
                title: "Lecture".into(),
                url: "https://videos.example/1".into(),
            },
        },
    )
    .await
    .unwrap();

    let contents = content::find_by_module(&db.pool, module.id).await.unwrap();
    assert_eq!(contents.len(), 2);
    assert_eq!(contents[0].sort_order, 0);
    assert_eq!(contents[1].sort_order, 1);

    match &contents[0].item {
        ContentItem::Text(text) => assert_eq!(text.body, "Read this first"),
        other => panic!("expected text, got {other:?}"),
    }
    match &contents[1].item {
        ContentItem::Video(video) => assert_eq!(video.url, "https://videos.example/1"),
        other => panic!("expected video, got {other:?}"),
    }
}

#[tokio::test]
async fn test_content_update_applies_only_the_matching_payload() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "edit").await;
    let module = module::create(&db.pool, course_id, module_payload("Week 1"))
        .await
        .unwrap();
    let created = content::create(&db.pool, module.id, owner, text_payload("Notes", "v1"))
        .await
        .unwrap();

    let updated = content::update(
        &db.pool,
        created.id,
        ContentUpdate {
            title: None,
            body: Some("v2".into()),
            // Fields of other item types are ignored for a text item
            file_url: Some("ignored".into()),
            url: Some("ignored".into()),
        },
    )
    .await
    .unwrap();

    match updated.item {
        ContentItem::Text(text) => {
            assert_eq!(text.base.title, "Notes");
            assert_eq!(text.body, "v2");
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[tokio::test]
async fn test_deleting_content_removes_the_item_row() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "cleanup").await;
    let module = module::create(&db.pool, course_id, module_payload("Week 1"))
        .await
        .unwrap();
    let created = content::create(&db.pool, module.id, owner, text_payload("Notes", "body"))
        .await
        .unwrap();

    assert!(content::delete(&db.pool, created.id).await.unwrap());
    assert_eq!(count(&db.pool, "content").await, 0);
    assert_eq!(count(&db.pool, "text_item").await, 0);
}

#[tokio::test]
async fn test_deleting_a_module_cleans_contents_and_items() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "pruned").await;
    let module = module::create(&db.pool, course_id, module_payload("Week 1"))
        .await
        .unwrap();
    content::create(&db.pool, module.id, owner, text_payload("Notes", "body"))
        .await
        .unwrap();

    assert!(module::delete(&db.pool, module.id).await.unwrap());

    assert_eq!(count(&db.pool, "module").await, 0);
    assert_eq!(count(&db.pool, "content").await, 0);
    assert_eq!(count(&db.pool, "text_item").await, 0);
    // The course itself stays
    assert_eq!(count(&db.pool, "course").await, 1);
}

#[tokio::test]
async fn test_deleting_a_course_leaves_no_orphan_rows() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let course_id = seed_course(&db.pool, owner, "doomed").await;
    let module = module::create(&db.pool, course_id, module_payload("Week 1"))
        .await
        .unwrap();
    content::create(&db.pool, module.id, owner, text_payload("Notes", "body"))
        .await
        .unwrap();
    content::create(
        &db.pool,
        module.id,
        owner,
        ContentCreate {
            sort_order: None,
            item: ContentItemCreate::File {
                title: "Slides".into(),
                file_url: "https://files.example/slides.pdf".into(),
            },
        },
    )
    .await
    .unwrap();

    assert!(course::delete(&db.pool, course_id).await.unwrap());

    assert_eq!(count(&db.pool, "course").await, 0);
    assert_eq!(count(&db.pool, "module").await, 0);
    assert_eq!(count(&db.pool, "content").await, 0);
    assert_eq!(count(&db.pool, "text_item").await, 0);
    assert_eq!(count(&db.pool, "file_item").await, 0);
}

#[tokio::test]
async fn test_ownership_is_checked_through_the_course_chain() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "owner").await;
    let intruder = seed_instructor(&db.pool, "intruder").await;
    let course_id = seed_course(&db.pool, owner, "private").await;
    let module = module::create(&db.pool, course_id, module_payload("Week 1"))
        .await
        .unwrap();
    let created = content::create(&db.pool, module.id, owner, text_payload("Notes", "body"))
        .await
        .unwrap();

    assert!(
        course::find_owned(&db.pool, course_id, owner)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        course::find_owned(&db.pool, course_id, intruder)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        module::find_owned(&db.pool, module.id, intruder)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        content::find_owned(&db.pool, created.id, intruder)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_course_slug_is_a_duplicate_error() {
    let (_dir, db) = test_db().await;
    let owner = seed_instructor(&db.pool, "ines").await;
    let subject = subject::create(
        &db.pool,
        SubjectCreate {
            title: "Testing".into(),
            slug: "testing".into(),
        },
    )
    .await
    .unwrap();

    let data = CourseCreate {
        subject_id: subject.id,
        title: "Course".into(),
        slug: "taken".into(),
        overview: String::new(),
    };
    course::create(&db.pool, owner, data.clone()).await.unwrap();
    let err = course::create(&db.pool, owner, data).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn test_seed_admin_runs_only_on_an_empty_table() {
    let (_dir, db) = test_db().await;

    let seeded = user::seed_admin(&db.pool, "first-password")
        .await
        .unwrap()
        .expect("empty table should seed");
    assert_eq!(seeded.username, "admin");
    assert_eq!(seeded.role, "admin");
    assert!(seeded.is_system);

    let again = user::seed_admin(&db.pool, "second-password").await.unwrap();
    assert!(again.is_none());
    assert_eq!(user::count(&db.pool).await.unwrap(), 1);
}
