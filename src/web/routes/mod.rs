pub mod attachment_routes;
pub mod note_routes;
pub mod tag_routes;
