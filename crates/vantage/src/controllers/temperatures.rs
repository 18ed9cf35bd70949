//! Temperatures controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::Temperature;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Temperature"],
    status_categories: &[StatusCategory::Temp],
    force_category_status: false,
};

/// Manages [`Temperature`] objects: temperature sensors attached to
/// thermostats and stations.
#[derive(Debug, Clone)]
pub struct TemperaturesController {
    core: ControllerCore<Temperature>,
}

impl TemperaturesController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for TemperaturesController {
    type Target = ControllerCore<Temperature>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
