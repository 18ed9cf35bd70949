//! Modules controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::Module;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Module", "ModuleGen2"],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`Module`] objects. Modules are mostly useful for building
/// a device hierarchy.
#[derive(Debug, Clone)]
pub struct ModulesController {
    core: ControllerCore<Module>,
}

impl ModulesController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for ModulesController {
    type Target = ControllerCore<Module>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
