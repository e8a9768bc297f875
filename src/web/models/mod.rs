use serde::{Deserialize, Serialize};

pub mod editor_models;

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub account_id: i32,
    pub name: String,
}

// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub account_id: i32,
    pub exp: usize,
}

/// Authenticated account details, passed to handlers as a request extension.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub id: i32,
    pub name: String,
}
