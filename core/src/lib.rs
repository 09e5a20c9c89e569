//! Keeps a local todo list in sync with a remote `/todo` collection.
//!
//! # Overview
//! - [`TodoClient`] builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network.
//! - A [`Transport`] performs the round-trip; [`UreqTransport`] is the real
//!   one.
//! - [`ListSynchronizer`] mirrors the server's collection and replaces it
//!   wholesale on every refresh.
//! - [`ItemCreator`] posts a draft and refreshes the list it was handed via
//!   [`SyncedList`].
//! - [`TodoView`] ties the two together; the read-only variant is the same
//!   view with creation turned off.

pub mod client;
pub mod config;
pub mod creator;
pub mod error;
pub mod http;
pub mod sync;
pub mod transport;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::{Config, ConfigError};
pub use creator::ItemCreator;
pub use error::SyncError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sync::{ListSynchronizer, Notice, SyncedList};
pub use transport::{Transport, UreqTransport};
pub use types::{Item, NewItem, UpdateItem};
pub use view::{render, TodoView, ViewOptions};
