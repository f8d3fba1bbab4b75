//! # Surplus Market Library
//!
//! A marketplace where restaurants sell surplus food at a discount and
//! customers reserve it for pickup. Built on the resource-actor framework:
//! one actor per resource type (users, listings, orders), stock and rating
//! invariants enforced by sequential message processing instead of locks.
//!
//! This library exposes the core modules of the application for integration
//! testing.

pub mod clients;
pub mod lifecycle;
pub mod listing_actor;
pub mod media;
pub mod model;
pub mod order_actor;
pub mod pricing;
pub mod user_actor;
