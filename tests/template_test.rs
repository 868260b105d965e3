//! Template persistence tests — create/fetch/update lifecycle, submission
//! validation, and the write-once layout rule.

mod common;

use common::{TEST_LAYOUT, setup_test_db};
use mailforge::models::section::{SectionKind, SectionRecord};
use mailforge::models::style::StylePatch;
use mailforge::models::template::{
    TemplateSubmission, create, find_by_id, update, validate_submission,
};

fn submission(title: &str) -> TemplateSubmission {
    TemplateSubmission {
        title: title.to_string(),
        content: Some(vec![
            SectionRecord {
                kind: SectionKind::Text,
                content: "Hello".to_string(),
                styles: StylePatch {
                    color: Some("#333333".to_string()),
                    ..StylePatch::default()
                },
            },
            SectionRecord {
                kind: SectionKind::Image,
                content: "/uploads/a.img".to_string(),
                styles: StylePatch::default(),
            },
        ]),
        images: vec!["/uploads/a.img".to_string()],
        styles: StylePatch {
            font_size: Some("16px".to_string()),
            ..StylePatch::default()
        },
        layout: None,
    }
}

#[test]
fn test_create_then_fetch_round_trip() {
    let (_dir, conn) = setup_test_db();

    let sub = submission("Welcome");
    let id = create(&conn, &sub, TEST_LAYOUT).expect("create");
    assert!(id > 0);

    let found = find_by_id(&conn, id)
        .expect("query")
        .expect("template not found");

    assert_eq!(found.id, id);
    assert_eq!(found.title, "Welcome");
    assert_eq!(found.content, sub.content.expect("content"));
    assert_eq!(found.images, sub.images);
    assert_eq!(found.styles, sub.styles);
    assert_eq!(found.layout, TEST_LAYOUT);
    assert!(!found.created_at.is_empty());
}

#[test]
fn test_fetch_unknown_id_returns_none() {
    let (_dir, conn) = setup_test_db();
    let found = find_by_id(&conn, 9999).expect("query");
    assert!(found.is_none());
}

#[test]
fn test_update_replaces_mutable_fields() {
    let (_dir, conn) = setup_test_db();
    let id = create(&conn, &submission("Before"), TEST_LAYOUT).expect("create");

    let mut changed = submission("After");
    changed.images.clear();
    changed.content = Some(vec![SectionRecord {
        kind: SectionKind::Text,
        content: "Rewritten".to_string(),
        styles: StylePatch::default(),
    }]);

    let updated = update(&conn, id, &changed)
        .expect("update")
        .expect("template not found");

    assert_eq!(updated.title, "After");
    assert_eq!(updated.content.len(), 1);
    assert_eq!(updated.content[0].content, "Rewritten");
    assert!(updated.images.is_empty());
}

#[test]
fn test_layout_is_write_once() {
    let (_dir, conn) = setup_test_db();
    let id = create(&conn, &submission("Keep layout"), TEST_LAYOUT).expect("create");

    // An update that smuggles in a different layout must not change it
    let mut changed = submission("Keep layout");
    changed.layout = Some("<html>attacker layout {{title}}</html>".to_string());
    let updated = update(&conn, id, &changed)
        .expect("update")
        .expect("template not found");
    assert_eq!(updated.layout, TEST_LAYOUT);

    let fetched = find_by_id(&conn, id).expect("query").expect("found");
    assert_eq!(fetched.layout, TEST_LAYOUT);
}

#[test]
fn test_update_unknown_id_returns_none() {
    let (_dir, conn) = setup_test_db();
    let result = update(&conn, 9999, &submission("Ghost")).expect("update");
    assert!(result.is_none());
}

#[test]
fn test_validation_requires_title_and_sections() {
    let valid = submission("Has title");
    assert!(validate_submission(&valid).is_empty());

    let no_title = submission("   ");
    assert!(!validate_submission(&no_title).is_empty());

    let mut no_content = submission("Has title");
    no_content.content = None;
    assert!(!validate_submission(&no_content).is_empty());
}

#[test]
fn test_created_at_is_captured_on_create() {
    let (_dir, conn) = setup_test_db();
    let id = create(&conn, &submission("Stamp"), TEST_LAYOUT).expect("create");
    let found = find_by_id(&conn, id).expect("query").expect("found");
    // ISO-ish timestamp, e.g. 2026-08-30T12:00:00
    assert!(found.created_at.contains('T'));
}
