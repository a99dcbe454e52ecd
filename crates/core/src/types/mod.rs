//! Core types for CloudMart.
//!
//! This module provides type-safe wrappers for the commerce API's entities.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod order;
pub mod price;
pub mod status;

pub use cart::{CartItemCreate, CartLineItem};
pub use catalog::{Category, Product};
pub use id::*;
pub use order::{Order, OrderFailure};
pub use price::{Price, PriceError};
pub use status::OrderStatus;
