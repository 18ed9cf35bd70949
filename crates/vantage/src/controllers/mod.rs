//! Typed controllers, one per object-type family.
//!
//! Controllers fetch their objects from the configuration service, fetch
//! state through the command service, keep state current by routing status
//! events, and emit [`ObjectEvent`](crate::events::ObjectEvent)s when their
//! population or state changes. Every controller dereferences to
//! [`ControllerCore`](crate::controller::ControllerCore) for the common
//! queryset and lifecycle API.

pub mod anemo_sensors;
pub mod areas;
pub mod back_boxes;
pub mod blind_groups;
pub mod blinds;
pub mod buttons;
pub mod dry_contacts;
pub mod gmem;
pub mod light_sensors;
pub mod load_groups;
pub mod loads;
pub mod masters;
pub mod modules;
pub mod omni_sensors;
pub mod port_devices;
pub mod power_profiles;
pub mod rgb_loads;
pub mod station_buses;
pub mod stations;
pub mod tasks;
pub mod temperatures;
pub mod thermostats;

pub use anemo_sensors::AnemoSensorsController;
pub use areas::AreasController;
pub use back_boxes::BackBoxesController;
pub use blind_groups::BlindGroupsController;
pub use blinds::BlindsController;
pub use buttons::ButtonsController;
pub use dry_contacts::DryContactsController;
pub use gmem::GMemController;
pub use light_sensors::LightSensorsController;
pub use load_groups::LoadGroupsController;
pub use loads::LoadsController;
pub use masters::MastersController;
pub use modules::ModulesController;
pub use omni_sensors::OmniSensorsController;
pub use port_devices::PortDevicesController;
pub use power_profiles::PowerProfilesController;
pub use rgb_loads::RGBLoadsController;
pub use station_buses::StationBusesController;
pub use stations::StationsController;
pub use tasks::TasksController;
pub use temperatures::TemperaturesController;
pub use thermostats::ThermostatsController;
