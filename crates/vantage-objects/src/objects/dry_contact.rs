//! Dry contact objects: motion sensors, door contacts, and similar inputs.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::button::{parse_button_event, parse_button_state};
use crate::interfaces::ButtonInterface;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// A dry contact input. Dry contacts speak the `Button` interface.
#[derive(Debug, Clone, Default)]
pub struct DryContact {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// The station input this contact is wired to.
    pub parent: Option<Parent>,
    /// Whether the contact is currently triggered.
    pub triggered: Option<bool>,
}

impl DryContact {
    /// Decode a `<DryContact>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
            triggered: None,
        })
    }

    fn update_triggered(&mut self, triggered: bool) -> Vec<&'static str> {
        if self.triggered == Some(triggered) {
            Vec::new()
        } else {
            self.triggered = Some(triggered);
            vec!["triggered"]
        }
    }
}

impl VantageObject for DryContact {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl ButtonInterface for DryContact {}

impl StatefulObject for DryContact {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::DryContact(contact) => Some(contact),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let triggered = self.get_state().await?;
        Ok(self.update_triggered(triggered))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        if method != "Button.GetState" {
            return Vec::new();
        }
        match parse_button_state(result) {
            Ok(triggered) => self.update_triggered(triggered),
            Err(_) => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        if *category != StatusCategory::Btn {
            return Vec::new();
        }
        match args.first().map(|arg| parse_button_event(arg)) {
            Some(Ok(triggered)) => self.update_triggered(triggered),
            _ => Vec::new(),
        }
    }
}
