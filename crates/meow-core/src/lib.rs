//! # meow-core
//!
//! Core of the Meow add-on: a sidebar card showing a random cat from
//! [cataas.com](https://cataas.com) with a caption written on it.
//!
//! ## Flow
//!
//! - Homepage trigger: greeting for the user's local time ("Good morning gmail")
//! - Contextual trigger: the context text, truncated to fit the image
//! - "Change cat" button: same caption, fresh image, replaces the current card
//!
//! The card is described with the types in [`card`]; nothing here knows
//! about the host platform's wire format.

mod error;
mod types;

pub mod builder;
pub mod card;
pub mod config;
pub mod greeting;
pub mod handlers;
pub mod truncate;

pub use builder::{create_cat_card, CardBuilder, CHANGE_CAT_FUNCTION};
pub use card::{ActionResponse, Card, Navigation};
pub use config::MeowConfig;
pub use error::{MeowError, Result};
pub use greeting::{compose_greeting, Greeting};
pub use handlers::CatAddOn;
pub use truncate::{truncate, MAX_MESSAGE_LENGTH};
pub use types::*;
