//! Command handlers for the quadrant board
//!
//! Each handler starts from a fresh fetch (the board always renders server
//! truth first), dispatches one intent to the store, and returns the text to
//! print. Store failures come back as errors carrying the store's message.

pub mod add;
pub mod delete;
pub mod list;
pub mod update;
