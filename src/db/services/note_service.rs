use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use crate::db::entities::{attachment, note, tag, tags_to_note};
use crate::db::services::tag_service;
use crate::services::tag_text;

/// Input to the shared note upsert path. `account_id` only applies when a new
/// note is created; updates never reassign ownership.
#[derive(Debug, Clone)]
pub struct UpsertNote {
    pub id: Option<i32>,
    pub content: String,
    pub note_type: Option<i32>,
    pub account_id: Option<i32>,
}

pub async fn find_note(db: &DatabaseConnection, note_id: i32) -> Result<Option<note::Model>, DbErr> {
    note::Entity::find_by_id(note_id).one(db).await
}

pub async fn find_notes_by_ids(
    db: &DatabaseConnection,
    ids: &[i32],
) -> Result<Vec<note::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    note::Entity::find()
        .filter(note::Column::Id.is_in(ids.to_vec()))
        .all(db)
        .await
}

/// The caller's notes plus ownerless ones, newest first.
pub async fn list_notes_for_account(
    db: &DatabaseConnection,
    account_id: i32,
    page: u64,
    size: u64,
) -> Result<Vec<note::Model>, DbErr> {
    let page = page.max(1);
    note::Entity::find()
        .filter(
            Condition::any()
                .add(note::Column::AccountId.eq(account_id))
                .add(note::Column::AccountId.is_null()),
        )
        .order_by_desc(note::Column::CreatedAt)
        .offset((page - 1) * size)
        .limit(size)
        .all(db)
        .await
}

/// The shared upsert path: persists the content, then re-derives the tag link
/// rows from the `#name` tokens found in it. Tags mentioned for the first
/// time are created; links whose token disappeared are removed, and tags left
/// without any link are deleted.
pub async fn upsert_note(db: &DatabaseConnection, input: UpsertNote) -> Result<note::Model, DbErr> {
    let now = Utc::now();
    let saved = match input.id {
        Some(id) => {
            let existing = note::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(format!("note {id} not found")))?;
            let mut active: note::ActiveModel = existing.into();
            active.content = Set(input.content);
            if let Some(note_type) = input.note_type {
                active.note_type = Set(note_type);
            }
            active.updated_at = Set(now);
            active.update(db).await?
        }
        None => {
            note::ActiveModel {
                content: Set(input.content),
                note_type: Set(input.note_type.unwrap_or(0)),
                account_id: Set(input.account_id),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    sync_tag_links(db, &saved).await?;
    Ok(saved)
}

/// Persists new content for a note without touching its link rows. The tag
/// deletion handler uses this because it maintains the links itself.
pub async fn update_note_content(
    db: &DatabaseConnection,
    existing: note::Model,
    content: String,
) -> Result<note::Model, DbErr> {
    let mut active: note::ActiveModel = existing.into();
    active.content = Set(content);
    active.updated_at = Set(Utc::now());
    active.update(db).await
}

/// The shared bulk deletion routine: removes the notes together with their
/// attachments and link rows, then cleans up tags that lost their last note.
pub async fn delete_notes(db: &DatabaseConnection, ids: &[i32]) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }

    let links = tags_to_note::Entity::find()
        .filter(tags_to_note::Column::NoteId.is_in(ids.to_vec()))
        .all(db)
        .await?;
    let mut touched_tag_ids: Vec<i32> = links.into_iter().map(|link| link.tag_id).collect();
    touched_tag_ids.sort_unstable();
    touched_tag_ids.dedup();

    attachment::Entity::delete_many()
        .filter(attachment::Column::NoteId.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    tags_to_note::Entity::delete_many()
        .filter(tags_to_note::Column::NoteId.is_in(ids.to_vec()))
        .exec(db)
        .await?;
    let deleted = note::Entity::delete_many()
        .filter(note::Column::Id.is_in(ids.to_vec()))
        .exec(db)
        .await?;

    delete_orphan_tags(db, &touched_tag_ids).await?;
    Ok(deleted.rows_affected)
}

/// Deletes the given tags when no link row references them anymore.
pub async fn delete_orphan_tags(db: &DatabaseConnection, tag_ids: &[i32]) -> Result<(), DbErr> {
    for tag_id in tag_ids {
        let in_use = tags_to_note::Entity::find()
            .filter(tags_to_note::Column::TagId.eq(*tag_id))
            .count(db)
            .await?;
        if in_use == 0 {
            let deleted = tag::Entity::delete_by_id(*tag_id).exec(db).await?;
            if deleted.rows_affected > 0 {
                debug!(tag_id, "Deleted orphaned tag");
            }
        }
    }
    Ok(())
}

async fn sync_tag_links(db: &DatabaseConnection, saved: &note::Model) -> Result<(), DbErr> {
    let mut wanted_tag_ids = Vec::new();
    for name in tag_text::extract_tag_tokens(&saved.content) {
        let tag = tag_service::find_or_create_tag(db, &name).await?;
        wanted_tag_ids.push(tag.id);
    }

    let existing = tags_to_note::Entity::find()
        .filter(tags_to_note::Column::NoteId.eq(saved.id))
        .all(db)
        .await?;

    for tag_id in &wanted_tag_ids {
        if !existing.iter().any(|link| link.tag_id == *tag_id) {
            let link = tags_to_note::ActiveModel {
                tag_id: Set(*tag_id),
                note_id: Set(saved.id),
            };
            tags_to_note::Entity::insert(link)
                .exec_without_returning(db)
                .await?;
        }
    }

    let stale: Vec<i32> = existing
        .iter()
        .map(|link| link.tag_id)
        .filter(|tag_id| !wanted_tag_ids.contains(tag_id))
        .collect();
    if !stale.is_empty() {
        tags_to_note::Entity::delete_many()
            .filter(tags_to_note::Column::NoteId.eq(saved.id))
            .filter(tags_to_note::Column::TagId.is_in(stale.clone()))
            .exec(db)
            .await?;
        delete_orphan_tags(db, &stale).await?;
    }

    Ok(())
}
