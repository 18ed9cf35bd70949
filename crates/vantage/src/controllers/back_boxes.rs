//! Back boxes controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::BackBox;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["BackBox"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`BackBox`] objects.
#[derive(Debug, Clone)]
pub struct BackBoxesController {
    core: ControllerCore<BackBox>,
}

impl BackBoxesController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for BackBoxesController {
    type Target = ControllerCore<BackBox>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
