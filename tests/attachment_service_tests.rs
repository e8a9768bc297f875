mod common;

use pretty_assertions::assert_eq;

use flashnote::db::services::attachment_service;

#[tokio::test]
async fn listing_never_returns_another_accounts_records() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;
    let other = common::create_account(&db, "bob").await;

    let my_note = common::create_note(&db, Some(me.id), "mine").await;
    let their_note = common::create_note(&db, Some(other.id), "theirs").await;
    common::create_attachment(&db, my_note.id, "files/mine.png", 0).await;
    common::create_attachment(&db, their_note.id, "files/theirs.png", 0).await;

    let listed = attachment_service::list_attachments(&db, me.id, 1, 10, "")
        .await
        .unwrap();
    let paths: Vec<&str> = listed.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(paths, vec!["files/mine.png"]);
}

#[tokio::test]
async fn search_is_case_insensitive_substring_on_path() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;
    let note = common::create_note(&db, Some(me.id), "mine").await;

    common::create_attachment(&db, note.id, "Docs/Quarterly-Report.PDF", 0).await;
    common::create_attachment(&db, note.id, "images/photo.jpg", 0).await;

    let listed = attachment_service::list_attachments(&db, me.id, 1, 10, "report")
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].path, "Docs/Quarterly-Report.PDF");

    let none = attachment_service::list_attachments(&db, me.id, 1, 10, "missing")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_treats_like_wildcards_as_literals() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;
    let note = common::create_note(&db, Some(me.id), "mine").await;

    common::create_attachment(&db, note.id, "files/plain.png", 0).await;
    common::create_attachment(&db, note.id, "files/50%off.pdf", 0).await;
    common::create_attachment(&db, note.id, "files/snake_case.txt", 0).await;

    // "%" only matches the path that actually contains a percent sign.
    let listed = attachment_service::list_attachments(&db, me.id, 1, 10, "%")
        .await
        .unwrap();
    let paths: Vec<&str> = listed.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(paths, vec!["files/50%off.pdf"]);

    // "_" must not act as a single-character wildcard.
    let listed = attachment_service::list_attachments(&db, me.id, 1, 10, "_")
        .await
        .unwrap();
    let paths: Vec<&str> = listed.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(paths, vec!["files/snake_case.txt"]);

    let none = attachment_service::list_attachments(&db, me.id, 1, 10, "p%g")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn pages_are_newest_first_with_offset() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;
    let note = common::create_note(&db, Some(me.id), "mine").await;

    common::create_attachment(&db, note.id, "files/oldest.png", 30).await;
    common::create_attachment(&db, note.id, "files/middle.png", 20).await;
    common::create_attachment(&db, note.id, "files/newest.png", 10).await;

    let first_page = attachment_service::list_attachments(&db, me.id, 1, 2, "")
        .await
        .unwrap();
    let paths: Vec<&str> = first_page.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(paths, vec!["files/newest.png", "files/middle.png"]);

    let second_page = attachment_service::list_attachments(&db, me.id, 2, 2, "")
        .await
        .unwrap();
    let paths: Vec<&str> = second_page.iter().map(|a| a.path.as_str()).collect();
    assert_eq!(paths, vec!["files/oldest.png"]);
}

#[tokio::test]
async fn page_zero_is_treated_as_first_page() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;
    let note = common::create_note(&db, Some(me.id), "mine").await;
    common::create_attachment(&db, note.id, "files/only.png", 0).await;

    let listed = attachment_service::list_attachments(&db, me.id, 0, 10, "")
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}
