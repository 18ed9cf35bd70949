//! Loads controller.

use crate::controller::{ControllerCore, ControllerMeta};
use crate::query::QuerySet;
use std::ops::Deref;
use vantage_command::{CommandClient, StatusCategory};
use vantage_config::ConfigClient;
use vantage_objects::base::VantageObject;
use vantage_objects::{Load, LoadGroup};

static META: ControllerMeta = ControllerMeta {
    vantage_types: &["Load"],
    status_categories: &[StatusCategory::Load],
    force_category_status: false,
};

/// Manages [`Load`] objects.
#[derive(Debug, Clone)]
pub struct LoadsController {
    core: ControllerCore<Load>,
}

impl LoadsController {
    pub(crate) fn new(config_client: ConfigClient, command_client: CommandClient) -> Self {
        Self {
            core: ControllerCore::new(&META, config_client, command_client),
        }
    }

    /// All loads that are turned on.
    pub fn on(&self) -> QuerySet<Load> {
        self.queryset().filter(Load::is_on)
    }

    /// All loads that are turned off.
    pub fn off(&self) -> QuerySet<Load> {
        self.queryset().filter(|load| !load.is_on())
    }

    /// All loads that are relays.
    pub fn relays(&self) -> QuerySet<Load> {
        self.queryset().filter(Load::is_relay)
    }

    /// All loads that are motors.
    pub fn motors(&self) -> QuerySet<Load> {
        self.queryset().filter(Load::is_motor)
    }

    /// All loads that are lights.
    pub fn lights(&self) -> QuerySet<Load> {
        self.queryset().filter(Load::is_light)
    }

    /// All loads in the given load group.
    pub fn in_load_group(&self, group: &LoadGroup) -> QuerySet<Load> {
        let members = group.load_table.clone();
        self.queryset()
            .filter(move |load| members.contains(&load.vid()))
    }
}

impl Deref for LoadsController {
    type Target = ControllerCore<Load>;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}
