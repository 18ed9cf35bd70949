//! Light sensor objects.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::LightSensorInterface;
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_fixed, ClientResult, XmlElement};

/// An ambient light sensor.
#[derive(Debug, Clone, Default)]
pub struct LightSensor {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// The station this sensor is wired to.
    pub parent: Option<Parent>,
    /// Last seen light level, in foot-candles.
    pub level: Option<Decimal>,
}

impl LightSensor {
    /// Decode a `<LightSensor>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
            level: None,
        })
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

impl VantageObject for LightSensor {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl LightSensorInterface for LightSensor {}

impl StatefulObject for LightSensor {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::LightSensor(sensor) => Some(sensor),
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
        let level = self.get_level().await?;
        Ok(self.update_level(level))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        if method != "LightSensor.GetLevel" {
            return Vec::new();
        }
        match parse_fixed(result) {
            Ok(level) => self.update_level(level),
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
