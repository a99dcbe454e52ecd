//! `CloudMart` Core - Shared types library.
//!
//! Wire types exchanged with the `CloudMart` commerce API, shared by:
//! - `storefront` - Client-side controllers that render catalog, cart and checkout
//! - `cli` - Terminal front end driving the storefront
//! - `integration-tests` - Mock commerce API used by end-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no rendering.
//! The server is the source of truth for every value here; the client only
//! decodes and displays them.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, cart lines and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
