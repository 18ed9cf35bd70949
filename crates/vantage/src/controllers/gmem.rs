//! GMem (variables) controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::GMem;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["GMem"],
    status_categories: &[StatusCategory::Variable],
    force_category_status: true,
};

/// Manages [`GMem`] objects. Variable changes are only published as
/// `S:VARIABLE` category statuses, so this controller always monitors in
/// category mode.
#[derive(Debug, Clone)]
pub struct GMemController {
    core: ControllerCore<GMem>,
}

impl GMemController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for GMemController {
    type Target = ControllerCore<GMem>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
