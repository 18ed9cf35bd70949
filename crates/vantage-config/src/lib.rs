//! Client for the Vantage InFusion Configuration (ACI) service.
//!
//! The Configuration service is an XML-RPC-style service exposed by the
//! controller on port 2010 (TLS) or 2001 (plaintext). It is used to
//! enumerate the controller's object inventory: every RPC is wrapped in an
//! `<IInterface><Method><call>…</call></Method></IInterface>` envelope, and
//! the response terminates with the closing interface tag followed by a
//! newline.
//!
//! This crate provides:
//! - [`ConfigClient`] with typed RPC methods (`Login`, `OpenFilter`,
//!   `GetFilterResults`, `CloseFilter`, `GetObject`, `GetVersion`)
//! - [`ObjectStream`] for paged enumeration of filtered object sets

pub mod client;
pub mod methods;
pub mod stream;

pub use client::ConfigClient;
pub use methods::VersionInfo;
pub use stream::{ObjectStream, DEFAULT_PAGE_SIZE};
