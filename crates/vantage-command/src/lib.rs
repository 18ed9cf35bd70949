//! Client for the Vantage InFusion Host Command service.
//!
//! The Host Command service is a `\r\n`-delimited text protocol exposed by
//! the controller on port 3010 (TLS) or 3001 (plaintext). It carries two
//! kinds of traffic on the same wire:
//!
//! - synchronous command replies: zero or more data lines terminated by an
//!   `R:` line
//! - asynchronous events: `S:<CATEGORY>` status lines and `EL:` enhanced-log
//!   lines, which may appear interleaved with a reply block
//!
//! [`CommandClient`] sends ad-hoc commands over short-lived connections and
//! owns one long-lived event connection, which carries the event stream and
//! all subscription-management commands. The event connection reconnects
//! automatically, replaying active subscriptions and distinguishing
//! [`Event::Reconnected`] from the initial [`Event::Connected`].

pub mod client;
pub mod connection;
pub mod events;
pub mod response;
pub mod subscriptions;

pub use client::{CommandClient, InvokeReply};
pub use connection::CommandConnection;
pub use events::{Event, StatusCategory};
pub use response::CommandResponse;
pub use subscriptions::{EnhancedLogSubscription, ObjectSubscription, StatusSubscription};
