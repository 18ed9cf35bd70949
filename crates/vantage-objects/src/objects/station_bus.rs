//! Station bus objects.

use crate::base::{Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// A station bus on a Master.
#[derive(Debug, Clone, Default)]
pub struct StationBus {
    /// Common object fields.
    pub system: SystemObject,
    /// The Master this bus belongs to.
    pub parent: Option<Parent>,
}

impl StationBus {
    /// Decode a `<StationBus>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            system: SystemObject::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
        })
    }
}

impl VantageObject for StationBus {
    fn base(&self) -> &SystemObject {
        &self.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.system
    }
}

impl StatefulObject for StationBus {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::StationBus(bus) => Some(bus),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.system.apply_config(new.system);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        Ok(Vec::new())
    }

    fn handle_object_status(
        &mut self,
        _method: &str,
        _result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        Vec::new()
    }

    fn handle_category_status(
        &mut self,
        _category: &StatusCategory,
        _args: &[String],
    ) -> Vec<&'static str> {
        Vec::new()
    }
}
