//! Tasks controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::Task;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Task"],
    status_categories: &[StatusCategory::Task],
    force_category_status: false,
};

/// Manages [`Task`] objects.
#[derive(Debug, Clone)]
pub struct TasksController {
    core: ControllerCore<Task>,
}

impl TasksController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for TasksController {
    type Target = ControllerCore<Task>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
