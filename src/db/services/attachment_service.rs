use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

use crate::db::entities::{attachment, note};

/// One page of the caller's attachments, newest first. The path filter is a
/// case-insensitive substring match (both sides are lowercased).
pub async fn list_attachments(
    db: &DatabaseConnection,
    account_id: i32,
    page: u64,
    size: u64,
    search_text: &str,
) -> Result<Vec<attachment::Model>, DbErr> {
    let page = page.max(1);
    // `%` and `_` in the search text are literal characters, not wildcards.
    let escaped = search_text
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{escaped}%");

    attachment::Entity::find()
        .join(JoinType::InnerJoin, attachment::Relation::Note.def())
        .filter(note::Column::AccountId.eq(account_id))
        .filter(
            Expr::expr(Func::lower(Expr::col((
                attachment::Entity,
                attachment::Column::Path,
            ))))
            .like(LikeExpr::new(pattern).escape('\\')),
        )
        .order_by_desc(attachment::Column::CreatedAt)
        .offset((page - 1) * size)
        .limit(size)
        .all(db)
        .await
}
