//! Anemometer (wind speed sensor) objects.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::AnemoSensorInterface;
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_fixed, ClientResult, XmlElement};

/// A wind speed sensor.
#[derive(Debug, Clone, Default)]
pub struct AnemoSensor {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// The station this sensor is wired to.
    pub parent: Option<Parent>,
    /// Last seen wind speed, in mph.
    pub speed: Option<Decimal>,
}

impl AnemoSensor {
    /// Decode an `<AnemoSensor>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
            speed: None,
        })
    }

    fn update_speed(&mut self, speed: Decimal) -> Vec<&'static str> {
        if self.speed == Some(speed) {
            Vec::new()
        } else {
            self.speed = Some(speed);
            vec!["speed"]
        }
    }
}

impl VantageObject for AnemoSensor {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl AnemoSensorInterface for AnemoSensor {}

impl StatefulObject for AnemoSensor {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::AnemoSensor(sensor) => Some(sensor),
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
        let speed = self.get_speed().await?;
        Ok(self.update_speed(speed))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        if method != "AnemoSensor.GetSpeed" {
            return Vec::new();
        }
        match parse_fixed(result) {
            Ok(speed) => self.update_speed(speed),
            Err(_) => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        _category: &StatusCategory,
        _args: &[String],
    ) -> Vec<&'static str> {
        Vec::new()
    }
}
