//! Station buses controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::StationBus;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["StationBus"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`StationBus`] objects.
#[derive(Debug, Clone)]
pub struct StationBusesController {
    core: ControllerCore<StationBus>,
}

impl StationBusesController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for StationBusesController {
    type Target = ControllerCore<StationBus>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
