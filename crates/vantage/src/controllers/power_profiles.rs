//! Power profiles controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::PowerProfile;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["PowerProfile", "DCPowerProfile", "PWMPowerProfile"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`PowerProfile`] objects.
#[derive(Debug, Clone)]
pub struct PowerProfilesController {
    core: ControllerCore<PowerProfile>,
}

impl PowerProfilesController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for PowerProfilesController {
    type Target = ControllerCore<PowerProfile>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
