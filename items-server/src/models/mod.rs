//! Request models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod item;
pub mod validation;

pub use item::{ItemFields, ItemId, ItemPayload};
pub use validation::{ValidationError, WriteAction};
