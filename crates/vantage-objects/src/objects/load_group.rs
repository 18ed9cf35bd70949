//! Load group objects.

use crate::base::{LocationBase, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::LoadInterface;
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_decimal, parse_fixed, ClientResult, Vid, XmlElement};

/// A group of loads controlled as one.
#[derive(Debug, Clone, Default)]
pub struct LoadGroup {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// VIDs of the member loads.
    pub load_table: Vec<Vid>,
    /// Current group level percentage.
    pub level: Option<Decimal>,
}

impl LoadGroup {
    /// Decode a `<LoadGroup>` element. Members arrive in a
    /// `<LoadTable><Load>vid</Load>…</LoadTable>` wrapper.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        let load_table = el
            .child("LoadTable")
            .map(|table| {
                table
                    .children_named("Load")
                    .filter_map(|entry| entry.text.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            location: LocationBase::from_xml(el)?,
            load_table,
            level: None,
        })
    }

    /// Whether the group is on.
    pub fn is_on(&self) -> bool {
        self.level.is_some_and(|level| !level.is_zero())
    }

    fn update_level(&mut self, level: Decimal) -> Vec<&'static str> {
        if self.level == Some(level) {
            Vec::new()
        } else {
            self.level = Some(level);
            vec!["level"]
        }
    }
}

impl VantageObject for LoadGroup {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl LoadInterface for LoadGroup {}

impl StatefulObject for LoadGroup {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::LoadGroup(group) => Some(group),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.load_table != new.load_table {
            self.load_table = new.load_table;
            changed.push("load_table");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let level = self.get_level().await?;
        Ok(self.update_level(level))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        if method != "Load.GetLevel" {
            return Vec::new();
        }
        match parse_fixed(result) {
            Ok(level) => self.update_level(level),
            Err(_) => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        if *category != StatusCategory::Load {
            return Vec::new();
        }
        match args.first().map(|arg| parse_decimal(arg)) {
            Some(Ok(level)) => self.update_level(level),
            _ => Vec::new(),
        }
    }
}
