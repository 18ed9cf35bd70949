//! Blinds controller.

use crate::controller::{ControllerCore, ControllerMeta};
use crate::query::QuerySet;
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::base::VantageObject;
use vantage_objects::{Blind, BlindGroup};

static META: ControllerMeta = ControllerMeta {
    vantage_types: &[
        "QISBlind",
        "QubeBlind",
        "RelayBlind",
        "Somfy.RS-485_Shade_CHILD",
        "Somfy.URTSI_2_Shade_CHILD",
    ],
    status_categories: &[StatusCategory::Blind],
    force_category_status: false,
};

/// Manages [`Blind`] objects across every blind flavor.
#[derive(Debug, Clone)]
pub struct BlindsController {
    core: ControllerCore<Blind>,
}

impl BlindsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }

    /// All blinds in the given blind group.
    pub fn in_blind_group(&self, group: &BlindGroup) -> QuerySet<Blind> {
        let members = group.blind_table.clone();
        self.queryset()
            .filter(move |blind| members.contains(&blind.vid()))
    }
}

impl Deref for BlindsController {
    type Target = ControllerCore<Blind>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
