//! Masters controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::Master;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Master"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`Master`] objects: the InFusion controllers.
#[derive(Debug, Clone)]
pub struct MastersController {
    core: ControllerCore<Master>,
}

impl MastersController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for MastersController {
    type Target = ControllerCore<Master>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
