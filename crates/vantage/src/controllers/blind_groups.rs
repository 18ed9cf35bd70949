//! Blind groups controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::BlindGroup;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["BlindGroup", "Somfy.RS-485_Group_CHILD", "Somfy.URTSI_2_Group_CHILD"],
    status_categories: &[StatusCategory::Blind],
    force_category_status: false,
};

/// Manages [`BlindGroup`] objects.
#[derive(Debug, Clone)]
pub struct BlindGroupsController {
    core: ControllerCore<BlindGroup>,
}

impl BlindGroupsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for BlindGroupsController {
    type Target = ControllerCore<BlindGroup>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
