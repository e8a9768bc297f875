pub mod attachment_service;
pub mod note_service;
pub mod tag_service;
