//! Driven adapters: persistence, mail transport, token generation.

pub mod mail;
pub mod persistence;
pub mod reset_tokens;
