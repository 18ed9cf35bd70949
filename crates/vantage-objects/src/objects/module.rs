//! Output module objects.

use crate::base::{Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// The wire tag a module was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModuleKind {
    /// `Module`: a first-generation output module.
    #[default]
    Module,
    /// `ModuleGen2`: a second-generation output module.
    Gen2,
}

/// A dimmer/relay output module attached to a Master.
#[derive(Debug, Clone, Default)]
pub struct Module {
    /// Common object fields.
    pub system: SystemObject,
    /// Which wire tag this module was configured with.
    pub kind: ModuleKind,
    /// The Master or parent module this module hangs off.
    pub parent: Option<Parent>,
}

impl Module {
    /// Decode a module element of the given kind.
    pub fn from_xml(kind: ModuleKind, el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            system: SystemObject::from_xml(el)?,
            kind,
            parent: Parent::from_parent_of(el)?,
        })
    }
}

impl VantageObject for Module {
    fn base(&self) -> &SystemObject {
        &self.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.system
    }
}

impl StatefulObject for Module {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Module(module) => Some(module),
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
