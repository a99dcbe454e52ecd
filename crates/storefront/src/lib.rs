//! `CloudMart` storefront client.
//!
//! Controllers that keep a rendered view of a remote commerce API in sync:
//! catalog browsing, a server-held cart, and checkout. They talk to the API
//! through a [`Transport`](api::Transport) and draw into a [`Surface`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod command;
pub mod config;
pub mod controllers;
pub mod dispatch;
pub mod surface;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiError};
pub use command::Command;
pub use config::StorefrontConfig;
pub use dispatch::Storefront;
pub use surface::{Container, MemorySurface, Node, Surface};
