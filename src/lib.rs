//! launcher-ini: structure-preserving INI configuration store
//!
//! A library for reading and editing the `key = value` files a bot launcher
//! uses (its own settings and BWAPI's `bwapi.ini`) without losing comments,
//! blank lines or commented-out keys.

pub mod config;
pub mod launcher;
pub mod store;
