//! Omni sensors controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::OmniSensor;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["OmniSensor"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`OmniSensor`] objects: generic sensors which name their own
/// get/set methods and conversion formulas in the object definition.
#[derive(Debug, Clone)]
pub struct OmniSensorsController {
    core: ControllerCore<OmniSensor>,
}

impl OmniSensorsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for OmniSensorsController {
    type Target = ControllerCore<OmniSensor>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
