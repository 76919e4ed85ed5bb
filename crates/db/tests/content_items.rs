//! Integration tests for the polymorphic content association.
//!
//! Covers the payload-first creation order, resolution round trips,
//! loud failures on bad tags and dangling references, and the paired
//! delete of association plus payload.

use coursehub_core::error::CoreError;
use coursehub_db::error::DbError;
use coursehub_db::models::content::{ContentItem, CreateContentItem, UpdateContentItem};
use coursehub_db::models::course::CreateCourse;
use coursehub_db::models::module::CreateModule;
use coursehub_db::models::subject::CreateSubject;
use coursehub_db::models::user::{CreateUser, ROLE_INSTRUCTOR};
use coursehub_db::ordering::OrderingMode;
use coursehub_db::repositories::{ContentRepo, CourseRepo, ModuleRepo, SubjectRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    owner: i64,
    module_id: i64,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let owner = UserRepo::create(
        pool,
        &CreateUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            role: ROLE_INSTRUCTOR.to_string(),
        },
    )
    .await
    .expect("create user")
    .id;
    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            title: "Programming".to_string(),
            slug: "programming".to_string(),
        },
    )
    .await
    .expect("create subject");
    let course = CourseRepo::create(
        pool,
        owner,
        &CreateCourse {
            subject_id: subject.id,
            title: "Rust".to_string(),
            slug: "rust".to_string(),
            overview: String::new(),
        },
    )
    .await
    .expect("create course");
    let module = ModuleRepo::create(
        pool,
        course.id,
        &CreateModule {
            title: "Intro".to_string(),
            description: String::new(),
            sort_order: None,
        },
        OrderingMode::Legacy,
    )
    .await
    .expect("create module");
    Fixture {
        owner,
        module_id: module.id,
    }
}

fn text(title: &str, body: &str) -> CreateContentItem {
    CreateContentItem::Text {
        title: title.to_string(),
        body: body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn text_payload_round_trips_through_resolution(pool: PgPool) {
    let fx = fixture(&pool).await;

    let (content, created) = ContentRepo::add(
        &pool,
        fx.module_id,
        fx.owner,
        &text("Welcome", "First <lesson>"),
        OrderingMode::Legacy,
    )
    .await
    .unwrap();

    assert_eq!(content.sort_order, 0);
    assert_eq!(content.item_kind, "text");

    let resolved = ContentRepo::resolve(&pool, &content).await.unwrap();
    assert_eq!(resolved, created);

    let ContentItem::Text(item) = &resolved else {
        panic!("expected a text item");
    };
    assert_eq!(item.title, "Welcome");
    assert_eq!(item.body, "First <lesson>");
    assert_eq!(item.owner_id, fx.owner);

    let fragment = resolved.render();
    assert_eq!(fragment.template, "content/text.html");
    assert!(fragment.html.contains("First &lt;lesson&gt;"));
}

#[sqlx::test(migrations = "./migrations")]
async fn every_variant_resolves_and_renders(pool: PgPool) {
    let fx = fixture(&pool).await;
    let inputs = vec![
        text("Reading", "Body"),
        CreateContentItem::Video {
            title: "Lecture".to_string(),
            url: "https://videos.example.com/1".to_string(),
        },
        CreateContentItem::Image {
            title: "Diagram".to_string(),
            file_path: "images/diagram.png".to_string(),
        },
        CreateContentItem::File {
            title: "Slides".to_string(),
            file_path: "files/slides.pdf".to_string(),
        },
    ];

    for (expected_order, input) in inputs.iter().enumerate() {
        let (content, _) =
            ContentRepo::add(&pool, fx.module_id, fx.owner, input, OrderingMode::Legacy)
                .await
                .unwrap();
        assert_eq!(content.sort_order, expected_order as i32);
    }

    let listed = ContentRepo::list_with_items(&pool, fx.module_id).await.unwrap();
    assert_eq!(listed.len(), 4);
    let templates: Vec<_> = listed.iter().map(|c| c.rendered.template.as_str()).collect();
    assert_eq!(
        templates,
        [
            "content/text.html",
            "content/video.html",
            "content/image.html",
            "content/file.html"
        ]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_stored_tag_fails_loudly(pool: PgPool) {
    let fx = fixture(&pool).await;

    // Bypass the repository to plant a tag outside the closed set, the
    // way a corrupted or hand-edited row would look.
    sqlx::query(
        "INSERT INTO contents (module_id, item_kind, item_id, sort_order) VALUES ($1, $2, $3, $4)",
    )
    .bind(fx.module_id)
    .bind("audio")
    .bind(1_i64)
    .bind(0_i32)
    .execute(&pool)
    .await
    .unwrap();

    let contents = ContentRepo::list_by_module(&pool, fx.module_id).await.unwrap();
    let err = ContentRepo::resolve(&pool, &contents[0]).await.unwrap_err();
    match err {
        DbError::Core(CoreError::UnknownContentKind { tag }) => assert_eq!(tag, "audio"),
        other => panic!("expected UnknownContentKind, got {other:?}"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn dangling_reference_fails_loudly(pool: PgPool) {
    let fx = fixture(&pool).await;

    sqlx::query(
        "INSERT INTO contents (module_id, item_kind, item_id, sort_order) VALUES ($1, $2, $3, $4)",
    )
    .bind(fx.module_id)
    .bind("text")
    .bind(999_999_i64)
    .bind(0_i32)
    .execute(&pool)
    .await
    .unwrap();

    let contents = ContentRepo::list_by_module(&pool, fx.module_id).await.unwrap();
    let err = ContentRepo::resolve(&pool, &contents[0]).await.unwrap_err();
    assert!(
        matches!(err, DbError::Core(CoreError::NotFound { .. })),
        "expected NotFound, got {err:?}"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_payload_and_association_together(pool: PgPool) {
    let fx = fixture(&pool).await;
    let (content, item) = ContentRepo::add(
        &pool,
        fx.module_id,
        fx.owner,
        &text("Doomed", "bye"),
        OrderingMode::Legacy,
    )
    .await
    .unwrap();

    assert!(ContentRepo::delete(&pool, content.id, fx.owner).await.unwrap());

    let remaining = ContentRepo::list_by_module(&pool, fx.module_id).await.unwrap();
    assert!(remaining.is_empty());

    let payloads: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM text_items WHERE id = $1")
        .bind(item.id())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(payloads, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_by_non_owner_is_a_no_op(pool: PgPool) {
    let fx = fixture(&pool).await;
    let stranger = UserRepo::create(
        &pool,
        &CreateUser {
            username: "mallory".to_string(),
            email: "mallory@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            role: ROLE_INSTRUCTOR.to_string(),
        },
    )
    .await
    .unwrap()
    .id;

    let (content, _) = ContentRepo::add(
        &pool,
        fx.module_id,
        fx.owner,
        &text("Safe", "still here"),
        OrderingMode::Legacy,
    )
    .await
    .unwrap();

    assert!(!ContentRepo::delete(&pool, content.id, stranger).await.unwrap());
    assert_eq!(
        ContentRepo::list_by_module(&pool, fx.module_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn update_rejects_fields_of_another_kind(pool: PgPool) {
    let fx = fixture(&pool).await;
    let (content, _) = ContentRepo::add(
        &pool,
        fx.module_id,
        fx.owner,
        &text("Reading", "original"),
        OrderingMode::Legacy,
    )
    .await
    .unwrap();

    let err = ContentRepo::update_item(
        &pool,
        &content,
        fx.owner,
        &UpdateContentItem {
            title: None,
            body: None,
            url: Some("https://example.com".to_string()),
            file_path: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbError::Core(CoreError::Validation(_))));

    // A matching field updates and bumps updated_at.
    let updated = ContentRepo::update_item(
        &pool,
        &content,
        fx.owner,
        &UpdateContentItem {
            title: None,
            body: Some("edited".to_string()),
            url: None,
            file_path: None,
        },
    )
    .await
    .unwrap();
    let ContentItem::Text(item) = updated else {
        panic!("expected a text item");
    };
    assert_eq!(item.body, "edited");
    assert!(item.updated_at >= item.created_at);
}
