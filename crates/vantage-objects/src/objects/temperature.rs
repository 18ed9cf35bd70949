//! Temperature sensor objects.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::TemperatureInterface;
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_decimal, parse_fixed, ClientResult, XmlElement};

/// A temperature sensor, typically attached to a thermostat.
#[derive(Debug, Clone, Default)]
pub struct Temperature {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// The thermostat or station this sensor belongs to.
    pub parent: Option<Parent>,
    /// Last seen temperature, in degrees Celsius.
    pub value: Option<Decimal>,
}

impl Temperature {
    /// Decode a `<Temperature>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
            value: None,
        })
    }

    fn update_value(&mut self, value: Decimal) -> Vec<&'static str> {
        if self.value == Some(value) {
            Vec::new()
        } else {
            self.value = Some(value);
            vec!["value"]
        }
    }
}

impl VantageObject for Temperature {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl TemperatureInterface for Temperature {}

impl StatefulObject for Temperature {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Temperature(sensor) => Some(sensor),
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
        let value = self.get_value().await?;
        Ok(self.update_value(value))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        if method != "Temperature.GetValue" {
            return Vec::new();
        }
        match parse_fixed(result) {
            Ok(value) => self.update_value(value),
            Err(_) => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        // S:TEMP <vid> <temperature>
        if *category != StatusCategory::Temp {
            return Vec::new();
        }
        match args.first().map(|arg| parse_decimal(arg)) {
            Some(Ok(value)) => self.update_value(value),
            _ => Vec::new(),
        }
    }
}
