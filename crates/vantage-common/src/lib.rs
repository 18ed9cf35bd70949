#![doc = "Common types shared across the Vantage InFusion client workspace."]

pub mod config;
pub mod convert;
pub mod error;
pub mod tls;
pub mod tokens;
pub mod xml;

pub use config::*;
pub use convert::*;
pub use error::*;
pub use tls::*;
pub use tokens::*;
pub use xml::*;

/// A Vantage ID: the controller-assigned unique integer identifier of an object.
pub type Vid = u32;
