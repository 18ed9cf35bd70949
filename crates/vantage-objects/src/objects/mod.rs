//! Concrete object types of the configuration catalog.
//!
//! Where the original controller firmware exposes several wire tags with an
//! identical shape (blind flavors, station models, power profiles), the tag
//! is kept as a `…Kind` discriminator on a single struct.

pub mod anemo_sensor;
pub mod area;
pub mod back_box;
pub mod blind;
pub mod blind_group;
pub mod button;
pub mod dry_contact;
pub mod gmem;
pub mod light_sensor;
pub mod load;
pub mod load_group;
pub mod master;
pub mod module;
pub mod omni_sensor;
pub mod port_device;
pub mod power_profile;
pub mod rgb_load;
pub mod station;
pub mod station_bus;
pub mod task;
pub mod temperature;
pub mod thermostat;

pub use anemo_sensor::AnemoSensor;
pub use area::Area;
pub use back_box::BackBox;
pub use blind::{Blind, BlindKind};
pub use blind_group::{BlindGroup, BlindGroupKind};
pub use button::Button;
pub use dry_contact::DryContact;
pub use gmem::{GMem, GMemValue};
pub use light_sensor::LightSensor;
pub use load::Load;
pub use load_group::LoadGroup;
pub use master::Master;
pub use module::{Module, ModuleKind};
pub use omni_sensor::{ConversionType, OmniSensor};
pub use port_device::{PortDevice, PortDeviceKind};
pub use power_profile::{PowerProfile, PowerProfileKind};
pub use rgb_load::{ColorType, RgbLoad, RgbLoadKind};
pub use station::{Station, StationKind};
pub use station_bus::StationBus;
pub use task::Task;
pub use temperature::Temperature;
pub use thermostat::Thermostat;
