use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub icon: String,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tags_to_note::Entity")]
    TagsToNote,
}

impl Related<super::tags_to_note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TagsToNote.def()
    }
}

impl Related<super::note::Entity> for Entity {
    fn to() -> RelationDef {
        super::tags_to_note::Relation::Note.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::tags_to_note::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
