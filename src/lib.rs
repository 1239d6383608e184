//! Storefront administration core.
//!
//! Categories, brands, products, customer orders and the dashboard rollups
//! over them, persisted as JSON documents in a key-value store. A single
//! service task owns the [`panel::AdminPanel`]; typed clients talk to it
//! through one mailbox and listeners follow changes on the [`events::EventBus`].

pub mod actor_framework;
pub mod actors;
pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod messages;
pub mod orders;
pub mod panel;
pub mod stats;
pub mod store;
pub mod sync;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
