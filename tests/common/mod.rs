#![allow(dead_code)]

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};

use flashnote::db::entities::{account, attachment, note, tag, tags_to_note};
use flashnote::db::schema;

pub async fn setup_db() -> DatabaseConnection {
    // A single pooled connection, or every pool member would see its own
    // empty in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite should connect");
    schema::init_schema(&db).await.expect("schema init");
    db
}

pub async fn create_account(db: &DatabaseConnection, name: &str) -> account::Model {
    let now = Utc::now();
    account::ActiveModel {
        name: Set(name.to_string()),
        password_hash: Set(None),
        role: Set("user".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("account insert")
}

pub async fn create_note(
    db: &DatabaseConnection,
    account_id: Option<i32>,
    content: &str,
) -> note::Model {
    let now = Utc::now();
    note::ActiveModel {
        content: Set(content.to_string()),
        note_type: Set(0),
        account_id: Set(account_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("note insert")
}

pub async fn create_tag(db: &DatabaseConnection, name: &str) -> tag::Model {
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
    .expect("tag insert")
}

pub async fn link_tag_to_note(db: &DatabaseConnection, tag_id: i32, note_id: i32) {
    let model = tags_to_note::ActiveModel {
        tag_id: Set(tag_id),
        note_id: Set(note_id),
    };
    tags_to_note::Entity::insert(model)
        .exec_without_returning(db)
        .await
        .expect("link insert");
}

/// `age_seconds` pushes created_at into the past so ordering tests get
/// distinct timestamps.
pub async fn create_attachment(
    db: &DatabaseConnection,
    note_id: i32,
    path: &str,
    age_seconds: i64,
) -> attachment::Model {
    let at = Utc::now() - Duration::seconds(age_seconds);
    attachment::ActiveModel {
        name: Set(path.rsplit('/').next().unwrap_or(path).to_string()),
        path: Set(path.to_string()),
        size: Set(1024),
        note_id: Set(Some(note_id)),
        created_at: Set(at),
        updated_at: Set(at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("attachment insert")
}
