//! Storage layer for the company assistant bot: schema, typed CRUD per
//! entity, and the error contract the conversational layer builds on.

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod canteen;
pub mod company;
pub mod error;
pub mod events;
pub mod excursions;
pub mod faq;
pub mod feedback;
pub mod guides;
pub mod registration;
pub mod schema;
pub mod state;
pub mod users;
pub mod validation;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();
