mod common;

use pretty_assertions::assert_eq;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use flashnote::db::entities::{note, tag, tags_to_note};
use flashnote::db::services::note_service::{self, UpsertNote};
use flashnote::db::services::tag_service;
use flashnote::services::tag_text;

#[tokio::test]
async fn tag_list_dedupes_and_includes_ownerless_notes() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;

    let mine_a = common::create_note(&db, Some(me.id), "first #work").await;
    let mine_b = common::create_note(&db, Some(me.id), "second #work").await;
    let shared = common::create_note(&db, None, "shared #announcements").await;

    let work = common::create_tag(&db, "work").await;
    let announcements = common::create_tag(&db, "announcements").await;
    common::link_tag_to_note(&db, work.id, mine_a.id).await;
    common::link_tag_to_note(&db, work.id, mine_b.id).await;
    common::link_tag_to_note(&db, announcements.id, shared.id).await;

    let mut listed: Vec<i32> = tag_service::list_tags_for_account(&db, me.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    listed.sort_unstable();

    // "work" appears once despite two linked notes; the ownerless note's tag
    // is visible too.
    assert_eq!(listed, vec![work.id, announcements.id]);
}

#[tokio::test]
async fn tag_list_excludes_other_accounts_tags() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;
    let other = common::create_account(&db, "bob").await;

    let theirs = common::create_note(&db, Some(other.id), "their #secret").await;
    let secret = common::create_tag(&db, "secret").await;
    common::link_tag_to_note(&db, secret.id, theirs.id).await;

    let listed = tag_service::list_tags_for_account(&db, me.id).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn upsert_rederives_links_from_content() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;

    let saved = note_service::upsert_note(
        &db,
        UpsertNote {
            id: None,
            content: "draft #work #home".to_string(),
            note_type: None,
            account_id: Some(me.id),
        },
    )
    .await
    .unwrap();

    let linked_names = linked_tag_names(&db, saved.id).await;
    assert_eq!(linked_names, vec!["home".to_string(), "work".to_string()]);

    // Dropping a token removes its link, and the tag dies with its last link.
    note_service::upsert_note(
        &db,
        UpsertNote {
            id: Some(saved.id),
            content: "draft #work".to_string(),
            note_type: None,
            account_id: Some(me.id),
        },
    )
    .await
    .unwrap();

    let linked_names = linked_tag_names(&db, saved.id).await;
    assert_eq!(linked_names, vec!["work".to_string()]);
    let home_left = tag::Entity::find()
        .filter(tag::Column::Name.eq("home"))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(home_left, 0);
}

#[tokio::test]
async fn rename_flow_rewrites_every_linked_note() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;

    let a = common::create_note(&db, Some(me.id), "hello #work").await;
    let b = common::create_note(&db, Some(me.id), "#work todo").await;
    let work = common::create_tag(&db, "work").await;
    common::link_tag_to_note(&db, work.id, a.id).await;
    common::link_tag_to_note(&db, work.id, b.id).await;

    // Same steps as the update-name handler.
    let note_ids = tag_service::linked_note_ids(&db, work.id).await.unwrap();
    for n in note_service::find_notes_by_ids(&db, &note_ids).await.unwrap() {
        let content = tag_text::rename_tag_token(&n.content, "work", "job");
        note_service::upsert_note(
            &db,
            UpsertNote {
                id: Some(n.id),
                content,
                note_type: Some(n.note_type),
                account_id: n.account_id,
            },
        )
        .await
        .unwrap();
    }

    let a_after = note_service::find_note(&db, a.id).await.unwrap().unwrap();
    let b_after = note_service::find_note(&db, b.id).await.unwrap().unwrap();
    assert_eq!(a_after.content, "hello #job");
    assert_eq!(b_after.content, "#job todo");

    // No note is linked to a "work" tag anymore; the old tag is gone.
    let old_tag = tag::Entity::find()
        .filter(tag::Column::Name.eq("work"))
        .one(&db)
        .await
        .unwrap();
    assert!(old_tag.is_none());
    assert_eq!(linked_tag_names(&db, a.id).await, vec!["job".to_string()]);
}

#[tokio::test]
async fn delete_only_tag_strips_token_but_keeps_notes() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;

    let a = common::create_note(&db, Some(me.id), "hello #work").await;
    let b = common::create_note(&db, Some(me.id), "#work todo").await;
    let work = common::create_tag(&db, "work").await;
    common::link_tag_to_note(&db, work.id, a.id).await;
    common::link_tag_to_note(&db, work.id, b.id).await;

    // Same steps as the delete-only-tag handler.
    for note_id in tag_service::linked_note_ids(&db, work.id).await.unwrap() {
        let n = note_service::find_note(&db, note_id).await.unwrap().unwrap();
        let content = tag_text::strip_tag_token(&n.content, "work");
        note_service::update_note_content(&db, n, content).await.unwrap();
    }
    tag_service::delete_tag_links(&db, work.id).await.unwrap();
    tag_service::delete_tag(&db, work.id).await.unwrap();

    let links_left = tags_to_note::Entity::find()
        .filter(tags_to_note::Column::TagId.eq(work.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(links_left, 0);
    assert!(tag::Entity::find_by_id(work.id).one(&db).await.unwrap().is_none());

    let a_after = note_service::find_note(&db, a.id).await.unwrap().unwrap();
    let b_after = note_service::find_note(&db, b.id).await.unwrap().unwrap();
    assert_eq!(a_after.content, "hello ");
    assert_eq!(b_after.content, " todo");
}

#[tokio::test]
async fn delete_notes_removes_notes_links_and_orphaned_tag() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;

    let a = common::create_note(&db, Some(me.id), "one #work").await;
    let b = common::create_note(&db, Some(me.id), "two #work").await;
    let work = common::create_tag(&db, "work").await;
    common::link_tag_to_note(&db, work.id, a.id).await;
    common::link_tag_to_note(&db, work.id, b.id).await;
    common::create_attachment(&db, a.id, "files/one.png", 0).await;

    let note_ids = tag_service::linked_note_ids(&db, work.id).await.unwrap();
    let deleted = note_service::delete_notes(&db, &note_ids).await.unwrap();
    assert_eq!(deleted, 2);

    assert_eq!(note::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(tags_to_note::Entity::find().count(&db).await.unwrap(), 0);
    assert!(tag::Entity::find_by_id(work.id).one(&db).await.unwrap().is_none());
    assert_eq!(
        flashnote::db::entities::attachment::Entity::find()
            .count(&db)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn batch_update_appends_token_at_most_once() {
    let db = common::setup_db().await;
    let me = common::create_account(&db, "alice").await;

    let tagged = common::create_note(&db, Some(me.id), "already #inbox").await;
    let untagged = common::create_note(&db, Some(me.id), "plain note").await;

    // Same steps as the batch-update handler.
    for n in note_service::find_notes_by_ids(&db, &[tagged.id, untagged.id])
        .await
        .unwrap()
    {
        if tag_text::contains_tag_token(&n.content, "inbox") {
            continue;
        }
        let content = tag_text::append_tag_token(&n.content, "inbox");
        note_service::upsert_note(
            &db,
            UpsertNote {
                id: Some(n.id),
                content,
                note_type: None,
                account_id: n.account_id,
            },
        )
        .await
        .unwrap();
    }

    let tagged_after = note_service::find_note(&db, tagged.id).await.unwrap().unwrap();
    let untagged_after = note_service::find_note(&db, untagged.id).await.unwrap().unwrap();
    assert_eq!(tagged_after.content, "already #inbox");
    assert_eq!(untagged_after.content, "plain note #inbox");
    assert_eq!(linked_tag_names(&db, untagged_after.id).await, vec!["inbox".to_string()]);
}

async fn linked_tag_names(db: &sea_orm::DatabaseConnection, note_id: i32) -> Vec<String> {
    let links = tags_to_note::Entity::find()
        .filter(tags_to_note::Column::NoteId.eq(note_id))
        .all(db)
        .await
        .unwrap();
    let mut names = Vec::new();
    for link in links {
        let t = tag::Entity::find_by_id(link.tag_id).one(db).await.unwrap().unwrap();
        names.push(t.name);
    }
    names.sort();
    names
}
