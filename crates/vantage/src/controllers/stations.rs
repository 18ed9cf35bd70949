//! Stations controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::Station;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &[
        "ContactInput",
        "Dimmer",
        "DualRelayStation",
        "EqCtrl",
        "EqUX",
        "HighVoltageRelayStation",
        "IRX2",
        "Keypad",
        "LowVoltageRelayStation",
        "RS232Station",
        "RS485Station",
        "ScenePointRelay",
    ],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`Station`] objects: keypads, remote relays, and similar bus
/// devices.
#[derive(Debug, Clone)]
pub struct StationsController {
    core: ControllerCore<Station>,
}

impl StationsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for StationsController {
    type Target = ControllerCore<Station>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
