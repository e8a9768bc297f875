pub mod auth_service;
pub mod tag_text;
