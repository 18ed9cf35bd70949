//! Dry contacts controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::DryContact;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["DryContact"],
    status_categories: &[StatusCategory::Btn],
    force_category_status: false,
};

/// Manages [`DryContact`] objects.
#[derive(Debug, Clone)]
pub struct DryContactsController {
    core: ControllerCore<DryContact>,
}

impl DryContactsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for DryContactsController {
    type Target = ControllerCore<DryContact>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
