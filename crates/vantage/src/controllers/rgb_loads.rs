//! RGB loads controller.

use crate::controller::{ControllerCore, ControllerMeta};
use crate::query::QuerySet;
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::RgbLoad;

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Vantage.DGColorLoad", "Vantage.DDGColorLoad"],
    status_categories: &[StatusCategory::Load],
    force_category_status: false,
};

/// Manages [`RgbLoad`] objects (`Vantage.DGColorLoad`,
/// `Vantage.DDGColorLoad`).
#[derive(Debug, Clone)]
pub struct RGBLoadsController {
    core: ControllerCore<RgbLoad>,
}

impl RGBLoadsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }

    /// All color loads that are turned on.
    pub fn on(&self) -> QuerySet<RgbLoad> {
        self.queryset().filter(RgbLoad::is_on)
    }

    /// All color loads that are turned off.
    pub fn off(&self) -> QuerySet<RgbLoad> {
        self.queryset().filter(|load| !load.is_on())
    }
}

impl Deref for RGBLoadsController {
    type Target = ControllerCore<RgbLoad>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
