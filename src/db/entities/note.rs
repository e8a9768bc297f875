use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A note. Tag membership is embedded in `content` as `#name` tokens; the
/// `tags_to_note` rows are derived from that text, not the other way around.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// 0 = flash note, 1 = long-form note.
    #[sea_orm(column_name = "type")]
    pub note_type: i32,
    /// NULL marks an ownerless/shared note, visible to every caller.
    pub account_id: Option<i32>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade",
        on_update = "Cascade"
    )]
    Account,
    #[sea_orm(has_many = "super::attachment::Entity")]
    Attachments,
    #[sea_orm(has_many = "super::tags_to_note::Entity")]
    TagsToNote,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachments.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::tags_to_note::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::tags_to_note::Relation::Note.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
