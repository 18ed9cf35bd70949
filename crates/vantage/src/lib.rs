//! Client library for Vantage InFusion controllers.
//!
//! [`Vantage`] is the entry point: it owns a [`ConfigClient`] for
//! enumerating the controller's object inventory, a [`CommandClient`] for
//! reading/writing device state and receiving asynchronous status events,
//! and one typed controller per object family. Controllers keep an
//! in-memory model of the system live by subscribing to status events and
//! emit object lifecycle events to application code.
//!
//! ```no_run
//! use vantage::objects::base::VantageObject;
//! use vantage::{Vantage, VantageConfig};
//!
//! # async fn example() -> vantage::ClientResult<()> {
//! let vantage = Vantage::new(VantageConfig::new("192.168.1.2"));
//! vantage.initialize().await?;
//!
//! for load in vantage.loads.on().iter() {
//!     println!("{} is on", load.name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod controllers;
pub mod events;
pub mod query;

pub use controller::{ControllerCore, ControllerMeta, StatusType};
pub use controllers::*;
pub use events::ObjectEvent;
pub use query::QuerySet;
pub use vantage_command::{CommandClient, Event, StatusCategory};
pub use vantage_common::{ClientError, ClientResult, VantageConfig, Vid};
pub use vantage_config::{ConfigClient, VersionInfo};
pub use vantage_objects as objects;

use tracing::{info, warn};
use vantage_objects::base::VantageObject as _;

/// A connection to a Vantage InFusion system.
///
/// Holds both protocol clients and every typed controller. All state lives
/// inside this value, so multiple instances can coexist in one process.
#[derive(Debug)]
pub struct Vantage {
    config_client: ConfigClient,
    command_client: CommandClient,

    /// Areas: the room/zone hierarchy.
    pub areas: AreasController,
    /// Loads: lights, relays, and motors.
    pub loads: LoadsController,
    /// Load groups.
    pub load_groups: LoadGroupsController,
    /// Color loads.
    pub rgb_loads: RGBLoadsController,
    /// Blinds and shades.
    pub blinds: BlindsController,
    /// Blind groups.
    pub blind_groups: BlindGroupsController,
    /// Keypad buttons.
    pub buttons: ButtonsController,
    /// Dry contact inputs.
    pub dry_contacts: DryContactsController,
    /// GMem variables.
    pub gmem: GMemController,
    /// Masters: the InFusion controllers.
    pub masters: MastersController,
    /// Output modules.
    pub modules: ModulesController,
    /// Omni sensors.
    pub omni_sensors: OmniSensorsController,
    /// Light sensors.
    pub light_sensors: LightSensorsController,
    /// Anemometers.
    pub anemo_sensors: AnemoSensorsController,
    /// Temperature sensors.
    pub temperatures: TemperaturesController,
    /// Thermostats.
    pub thermostats: ThermostatsController,
    /// Tasks.
    pub tasks: TasksController,
    /// Power profiles.
    pub power_profiles: PowerProfilesController,
    /// Back boxes.
    pub back_boxes: BackBoxesController,
    /// Stations: keypads and other bus devices.
    pub stations: StationsController,
    /// Station buses.
    pub station_buses: StationBusesController,
    /// Port devices: gateways for third-party integrations.
    pub port_devices: PortDevicesController,
}

impl Vantage {
    /// Create a client for the given controller. No connection is made
    /// until the first operation.
    pub fn new(config: VantageConfig) -> Self {
        let config_client = ConfigClient::new(&config);
        let command_client = CommandClient::new(&config);

        macro_rules! controller {
            ($type:ident) => {
                $type::new(config_client.clone(), command_client.clone())
            };
        }

        Self {
            areas: controller!(AreasController),
            loads: controller!(LoadsController),
            load_groups: controller!(LoadGroupsController),
            rgb_loads: controller!(RGBLoadsController),
            blinds: controller!(BlindsController),
            blind_groups: controller!(BlindGroupsController),
            buttons: controller!(ButtonsController),
            dry_contacts: controller!(DryContactsController),
            gmem: controller!(GMemController),
            masters: controller!(MastersController),
            modules: controller!(ModulesController),
            omni_sensors: controller!(OmniSensorsController),
            light_sensors: controller!(LightSensorsController),
            anemo_sensors: controller!(AnemoSensorsController),
            temperatures: controller!(TemperaturesController),
            thermostats: controller!(ThermostatsController),
            tasks: controller!(TasksController),
            power_profiles: controller!(PowerProfilesController),
            back_boxes: controller!(BackBoxesController),
            stations: controller!(StationsController),
            station_buses: controller!(StationBusesController),
            port_devices: controller!(PortDevicesController),
            config_client,
            command_client,
        }
    }

    /// The configuration service client.
    pub fn config_client(&self) -> &ConfigClient {
        &self.config_client
    }

    /// The Host Command service client.
    pub fn command_client(&self) -> &CommandClient {
        &self.command_client
    }

    /// Subscribe to connection and status events from the command service.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.command_client.subscribe()
    }

    /// Populate every controller, fetch object state, and enable state
    /// monitoring.
    pub async fn initialize(&self) -> ClientResult<()> {
        self.initialize_with(true, true).await
    }

    /// Populate every controller, with explicit control over state
    /// fetching and monitoring.
    pub async fn initialize_with(
        &self,
        fetch_state: bool,
        enable_state_monitoring: bool,
    ) -> ClientResult<()> {
        self.detect_enhanced_log_support().await;

        self.areas
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.masters
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.modules
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.station_buses
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.stations
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.back_boxes
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.power_profiles
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.port_devices
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.loads
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.load_groups
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.rgb_loads
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.blinds
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.blind_groups
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.buttons
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.dry_contacts
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.gmem
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.omni_sensors
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.light_sensors
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.anemo_sensors
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.temperatures
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.thermostats
            .initialize(fetch_state, enable_state_monitoring)
            .await?;
        self.tasks
            .initialize(fetch_state, enable_state_monitoring)
            .await?;

        info!("all controllers initialized");
        Ok(())
    }

    /// Look up any object's name by VID, across all controllers.
    pub fn object_name(&self, vid: Vid) -> Option<String> {
        macro_rules! lookup {
            ($($controller:ident),+) => {
                $(
                    if let Some(object) = self.$controller.get(vid) {
                        return Some(object.name().to_string());
                    }
                )+
            };
        }
        lookup!(
            areas,
            loads,
            load_groups,
            rgb_loads,
            blinds,
            blind_groups,
            buttons,
            dry_contacts,
            gmem,
            masters,
            modules,
            omni_sensors,
            light_sensors,
            anemo_sensors,
            temperatures,
            thermostats,
            tasks,
            power_profiles,
            back_boxes,
            stations,
            station_buses,
            port_devices
        );
        None
    }

    /// Close both service connections. Subscription state is preserved, so
    /// a later operation can resume.
    pub async fn close(&self) {
        self.command_client.close().await;
        self.config_client.close().await;
    }

    /// Decide whether the controller supports enhanced-log object statuses
    /// from its firmware version. 3.x firmware and later does; when the
    /// version cannot be determined the enhanced log is assumed available.
    async fn detect_enhanced_log_support(&self) {
        match self.config_client.get_version().await {
            Ok(version) => {
                let supported = version
                    .app
                    .as_deref()
                    .map_or(true, firmware_supports_enhanced_log);
                self.command_client.set_supports_enhanced_log(supported);
                info!(app = ?version.app, supported, "firmware version detected");
            }
            Err(err) => {
                warn!(error = %err, "could not determine firmware version");
            }
        }
    }
}

fn firmware_supports_enhanced_log(app_version: &str) -> bool {
    app_version
        .split('.')
        .next()
        .and_then(|major| major.parse::<u32>().ok())
        .is_none_or(|major| major >= 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firmware_version_comparison() {
        assert!(firmware_supports_enhanced_log("3.0"));
        assert!(firmware_supports_enhanced_log("3.2.1"));
        assert!(firmware_supports_enhanced_log("10.0"));
        assert!(!firmware_supports_enhanced_log("2.9.9"));
        // Unparseable versions default to supported
        assert!(firmware_supports_enhanced_log("unknown"));
    }
}
