use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::db::entities::account;
use crate::web::error::AppError;
use crate::web::models::{
    AccountResponse, AuthenticatedAccount, Claims, LoginRequest, LoginResponse, RegisterRequest,
};

pub async fn register_account(
    db: &DatabaseConnection,
    req: RegisterRequest,
) -> Result<AccountResponse, AppError> {
    if req.name.is_empty() || req.password.len() < 8 {
        return Err(AppError::InvalidInput(
            "Name must not be empty and the password needs at least 8 characters.".to_string(),
        ));
    }

    let existing: Option<account::Model> = account::Entity::find()
        .filter(account::Column::Name.eq(&req.name))
        .one(db)
        .await
        .map_err(|e: DbErr| AppError::DatabaseError(format!("Account lookup failed: {e}")))?;

    if existing.is_some() {
        return Err(AppError::AccountAlreadyExists(
            "This name is already taken.".to_string(),
        ));
    }

    let password_hash = hash(&req.password, DEFAULT_COST)
        .map_err(|e| AppError::PasswordHashingError(e.to_string()))?;

    let now = Utc::now();
    let new_account = account::ActiveModel {
        name: Set(req.name.clone()),
        password_hash: Set(Some(password_hash)),
        role: Set("user".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match new_account.insert(db).await {
        Ok(model) => Ok(AccountResponse {
            id: model.id,
            name: model.name,
        }),
        Err(e) => Err(AppError::DatabaseError(format!("Account creation failed: {e}"))),
    }
}

pub async fn login_account(
    db: &DatabaseConnection,
    req: LoginRequest,
    jwt_secret: &str,
) -> Result<LoginResponse, AppError> {
    if req.name.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Name and password must not be empty.".to_string(),
        ));
    }

    let account_model = account::Entity::find()
        .filter(account::Column::Name.eq(&req.name))
        .one(db)
        .await
        .map_err(|e: DbErr| AppError::DatabaseError(format!("Account lookup failed: {e}")))?
        .ok_or(AppError::AccountNotFound)?;

    let password_hash = account_model
        .password_hash
        .as_ref()
        .ok_or(AppError::InvalidCredentials)?;

    let valid = verify(&req.password, password_hash)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    create_jwt_for_account(&account_model, jwt_secret)
}

pub fn create_jwt_for_account(
    account_model: &account::Model,
    jwt_secret: &str,
) -> Result<LoginResponse, AppError> {
    let now = Utc::now();
    // Token valid for 24 hours.
    let expiration = (now + Duration::hours(24)).timestamp() as usize;

    let claims = Claims {
        sub: account_model.name.clone(),
        account_id: account_model.id,
        exp: expiration,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::TokenCreationError(e.to_string()))?;

    Ok(LoginResponse {
        token,
        account_id: account_model.id,
        name: account_model.name.clone(),
    })
}

pub async fn me(
    axum::Extension(account): axum::Extension<AuthenticatedAccount>,
) -> Result<axum::Json<AccountResponse>, AppError> {
    Ok(axum::Json(AccountResponse {
        id: account.id,
        name: account.name,
    }))
}
