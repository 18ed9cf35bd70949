//! Object-interface capabilities.
//!
//! Each capability declares the `INVOKE` methods of one Vantage object
//! interface as a trait with default implementations; concrete object types
//! opt in with an empty `impl`. Dispatch is by capability, not by the
//! configuration tree.

// Capability traits are only ever called on concrete object types, so the
// returned futures keep their auto traits.
#![allow(async_fn_in_trait)]

pub mod blind;
pub mod button;
pub mod gmem;
pub mod introspection;
pub mod load;
pub mod object;
pub mod rgb_load;
pub mod sensor;
pub mod sounder;
pub mod task;
pub mod thermostat;

pub use blind::{BlindInterface, BlindMotion};
pub use button::ButtonInterface;
pub use gmem::GMemInterface;
pub use introspection::{FirmwareImage, IntrospectionInterface};
pub use load::{LoadInterface, RampType};
pub use object::{ObjectHandle, ObjectInterface};
pub use rgb_load::{ColorTemperatureInterface, RGBLoadInterface};
pub use sensor::{
    AnemoSensorInterface, LightSensorInterface, SensorInterface, TemperatureInterface,
};
pub use sounder::SounderInterface;
pub use task::TaskInterface;
pub use thermostat::{
    DayMode, FanMode, HoldMode, OperationMode, ThermostatInterface, ThermostatStatus,
};
