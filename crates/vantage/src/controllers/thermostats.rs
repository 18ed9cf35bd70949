//! Thermostats controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::Thermostat;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Thermostat"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`Thermostat`] objects. Thermostat state arrives as object
/// statuses; the associated [`Temperature`](vantage_objects::Temperature)
/// children carry the legacy category form.
#[derive(Debug, Clone)]
pub struct ThermostatsController {
    core: ControllerCore<Thermostat>,
}

impl ThermostatsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for ThermostatsController {
    type Target = ControllerCore<Thermostat>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
