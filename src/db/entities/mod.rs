//! SeaORM entities mapping to the database tables.

pub mod account;
pub mod attachment;
pub mod note;
pub mod tag;
pub mod tags_to_note;

// Prelude module for easy importing of all entities and their related types.
pub mod prelude {
    pub use super::account::Entity as Account;
    pub use super::account::Model as AccountModel;
    pub use super::account::ActiveModel as AccountActiveModel;
    pub use super::account::Column as AccountColumn;

    pub use super::note::Entity as Note;
    pub use super::note::Model as NoteModel;
    pub use super::note::ActiveModel as NoteActiveModel;
    pub use super::note::Column as NoteColumn;

    pub use super::tag::Entity as Tag;
    pub use super::tag::Model as TagModel;
    pub use super::tag::ActiveModel as TagActiveModel;
    pub use super::tag::Column as TagColumn;

    pub use super::tags_to_note::Entity as TagsToNote;
    pub use super::tags_to_note::Model as TagsToNoteModel;
    pub use super::tags_to_note::ActiveModel as TagsToNoteActiveModel;
    pub use super::tags_to_note::Column as TagsToNoteColumn;

    pub use super::attachment::Entity as Attachment;
    pub use super::attachment::Model as AttachmentModel;
    pub use super::attachment::ActiveModel as AttachmentActiveModel;
    pub use super::attachment::Column as AttachmentColumn;
}
