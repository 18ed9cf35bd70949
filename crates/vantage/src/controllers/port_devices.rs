//! Port devices controller.

use crate::controller::{ControllerCore, ControllerMeta};
use std::ops::Deref;
use vantage_command::CommandClient;
use vantage_config::ConfigClient;
use vantage_objects::PortDevice;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &[
        "Vantage.DmxGateway",
        "Vantage.DmxDaliGateway",
        "Vantage.Generic_HVAC_RS485_PORT",
        "Vantage.HVAC-IU_PORT",
        "Somfy.RS-485_SDN_2_x2E_0_PORT",
        "Somfy.URTSI_2_PORT",
    ],
    status_categories: &[],
    force_category_status: false,
};

/// Manages [`PortDevice`] objects: gateways and bridge ports which
/// parent third-party devices.
#[derive(Debug, Clone)]
pub struct PortDevicesController {
    core: ControllerCore<PortDevice>,
}

impl PortDevicesController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }
}

impl Deref for PortDevicesController {
    type Target = ControllerCore<PortDevice>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
