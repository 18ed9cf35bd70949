//! Buttons controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::Button;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Button"],
    status_categories: &[StatusCategory::Btn, StatusCategory::Led],
    force_category_status: false,
};

/// Manages [`Button`] objects.
#[derive(Debug, Clone)]
pub struct ButtonsController {
    core: ControllerCore<Button>,
}

impl ButtonsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for ButtonsController {
    type Target = ControllerCore<Button>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
