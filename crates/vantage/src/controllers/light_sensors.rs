//! Light sensors controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::LightSensor;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["LightSensor"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`LightSensor`] objects.
#[derive(Debug, Clone)]
pub struct LightSensorsController {
    core: ControllerCore<LightSensor>,
}

impl LightSensorsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for LightSensorsController {
    type Target = ControllerCore<LightSensor>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
