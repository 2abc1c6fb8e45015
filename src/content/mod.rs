//! # Site Content
//!
//! Store-level operations behind the HTTP handlers: homepage settings and
//! room records. Nothing here knows about HTTP.

pub mod home;
pub mod rooms;

pub use home::{load_or_create_home_page, DEFAULT_HERO_IMAGE_URL};
pub use rooms::{availability, find_room, list_rooms, upsert_rooms};
