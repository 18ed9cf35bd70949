//! Anemo sensors controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::AnemoSensor;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["AnemoSensor"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`AnemoSensor`] objects.
#[derive(Debug, Clone)]
pub struct AnemoSensorsController {
    core: ControllerCore<AnemoSensor>,
}

impl AnemoSensorsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for AnemoSensorsController {
    type Target = ControllerCore<AnemoSensor>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
