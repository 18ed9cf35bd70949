//! Load groups controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::LoadGroup;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["LoadGroup"],
    status_categories: &[StatusCategory::Load],
    force_category_status: false,
};

/// Manages [`LoadGroup`] objects.
#[derive(Debug, Clone)]
pub struct LoadGroupsController {
    core: ControllerCore<LoadGroup>,
}

impl LoadGroupsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for LoadGroupsController {
    type Target = ControllerCore<LoadGroup>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
