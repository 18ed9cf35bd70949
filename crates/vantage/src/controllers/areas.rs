//! Areas controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::Area;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Area"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`Area`] objects: the room/zone hierarchy.
#[derive(Debug, Clone)]
pub struct AreasController {
    core: ControllerCore<Area>,
}

impl AreasController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for AreasController {
    type Target = ControllerCore<Area>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
