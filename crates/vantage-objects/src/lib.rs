//! Typed object model for Vantage InFusion systems.
//!
//! Configuration objects form a closed catalog keyed by their XML wire tag.
//! Each concrete type carries the configuration fields decoded from its XML
//! block plus the runtime state fields populated by `INVOKE` replies and
//! status events. Capabilities (`Load`, `Blind`, `RGBLoad`, `Thermostat`,
//! …) are expressed as traits with default method implementations that
//! issue `INVOKE` commands through the object's attached command client.
//!
//! Status translation comes in two shapes, mirroring the wire:
//!
//! - object status (`S:STATUS <vid> <Method> <result> <args…>` or
//!   `EL: <vid> <Method> <result> <args…>`), dispatched by interface method
//! - category status (`S:<CAT> <vid> <args…>`), the legacy shape, dispatched
//!   by category

pub mod base;
pub mod catalog;
pub mod interfaces;
pub mod objects;

pub use base::{LocationBase, Parent, StationBase, SystemObject, VantageObject};
pub use catalog::ConfigObject;
pub use interfaces::{ObjectHandle, ObjectInterface};
pub use objects::*;

use vantage_command::StatusCategory;
use vantage_common::ClientResult;

/// A configuration object that carries runtime state managed by a
/// controller.
///
/// Implementations translate inbound status events into field updates and
/// know how to fetch their own state through the command client. Mutating
/// methods return the names of the fields that changed.
pub trait StatefulObject: base::VantageObject + Clone + Send + Sync + 'static {
    /// Extract this type from a decoded configuration object, if the
    /// variant matches.
    fn from_config(object: ConfigObject) -> Option<Self>;

    /// Overwrite configuration fields from a freshly fetched copy,
    /// returning the names of the fields that changed. Runtime state and
    /// the client attachment are preserved.
    fn apply_config(&mut self, new: Self) -> Vec<&'static str>;

    /// Fetch this object's state via its capability interfaces.
    fn fetch_state(
        &mut self,
    ) -> impl std::future::Future<Output = ClientResult<Vec<&'static str>>> + Send;

    /// Handle an object-interface status (`<Method> <result> <args…>`).
    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        args: &[String],
    ) -> Vec<&'static str>;

    /// Handle a category status (`S:<CAT> <vid> <args…>`).
    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str>;
}
