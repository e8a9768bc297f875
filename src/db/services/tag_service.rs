use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType,
    QueryFilter, QuerySelect, RelationTrait, Set,
};

use crate::db::entities::{note, tag, tags_to_note};

/// All tags linked to at least one note the account can see: its own notes
/// plus ownerless notes (NULL account_id). Duplicate tag ids are collapsed.
pub async fn list_tags_for_account(
    db: &DatabaseConnection,
    account_id: i32,
) -> Result<Vec<tag::Model>, DbErr> {
    tag::Entity::find()
        .join(JoinType::InnerJoin, tag::Relation::TagsToNote.def())
        .join(JoinType::InnerJoin, tags_to_note::Relation::Note.def())
        .filter(
            Condition::any()
                .add(note::Column::AccountId.eq(account_id))
                .add(note::Column::AccountId.is_null()),
        )
        .distinct()
        .all(db)
        .await
}

pub async fn find_tag(db: &DatabaseConnection, tag_id: i32) -> Result<Option<tag::Model>, DbErr> {
    tag::Entity::find_by_id(tag_id).one(db).await
}

/// Looks a tag up by name, creating it with an empty icon when missing. Used
/// by the note upsert path when it re-derives links from content.
pub async fn find_or_create_tag(db: &DatabaseConnection, name: &str) -> Result<tag::Model, DbErr> {
    if let Some(existing) = tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let now = Utc::now();
    tag::ActiveModel {
        name: Set(name.to_string()),
        icon: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Updates the icon field only. Returns `None` when the tag does not exist.
pub async fn update_tag_icon(
    db: &DatabaseConnection,
    tag_id: i32,
    icon: &str,
) -> Result<Option<tag::Model>, DbErr> {
    let Some(existing) = tag::Entity::find_by_id(tag_id).one(db).await? else {
        return Ok(None);
    };

    let mut active: tag::ActiveModel = existing.into();
    active.icon = Set(icon.to_string());
    active.updated_at = Set(Utc::now());
    Ok(Some(active.update(db).await?))
}

/// Note ids currently linked to the tag.
pub async fn linked_note_ids(db: &DatabaseConnection, tag_id: i32) -> Result<Vec<i32>, DbErr> {
    let links = tags_to_note::Entity::find()
        .filter(tags_to_note::Column::TagId.eq(tag_id))
        .all(db)
        .await?;
    Ok(links.into_iter().map(|link| link.note_id).collect())
}

pub async fn delete_tag_links(db: &DatabaseConnection, tag_id: i32) -> Result<u64, DbErr> {
    let result = tags_to_note::Entity::delete_many()
        .filter(tags_to_note::Column::TagId.eq(tag_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_tag(db: &DatabaseConnection, tag_id: i32) -> Result<u64, DbErr> {
    let result = tag::Entity::delete_by_id(tag_id).exec(db).await?;
    Ok(result.rows_affected)
}
