//! Back box objects: the wall boxes stations are mounted in.

use crate::base::{LocationBase, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// A back box. Useful for building a physical device hierarchy.
#[derive(Debug, Clone, Default)]
pub struct BackBox {
    /// Location-scoped fields.
    pub location: LocationBase,
}

impl BackBox {
    /// Decode a `<BackBox>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
        })
    }
}

impl VantageObject for BackBox {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl StatefulObject for BackBox {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::BackBox(back_box) => Some(back_box),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        self.location.apply_config(new.location)
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
