//! OmniSensor objects: generic sensors that name their own get/set methods.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::ObjectHandle;
use crate::StatefulObject;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_fixed, parse_int, ClientResult, Param, XmlElement};

/// How a raw sensor value is encoded on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversionType {
    /// A fixed-point value in thousandths.
    #[default]
    Fixed,
    /// A plain integer.
    Int,
}

impl ConversionType {
    fn from_text(text: &str) -> Self {
        if text.eq_ignore_ascii_case("int") {
            Self::Int
        } else {
            Self::Fixed
        }
    }

    fn decode(self, raw: &str) -> Option<Decimal> {
        match self {
            Self::Fixed => parse_fixed(raw).ok(),
            Self::Int => parse_int(raw).ok().map(Decimal::from),
        }
    }
}

/// An omni sensor: current, power, or temperature sensing on a module.
///
/// Omni sensors carry the names of their own get/set methods in the object
/// definition, along with conversion tags describing the raw wire encoding.
#[derive(Debug, Clone, Default)]
pub struct OmniSensor {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// The module this sensor measures.
    pub parent: Option<Parent>,
    /// Method returning the cached value.
    pub get_method: String,
    /// Method returning the value straight from hardware.
    pub get_method_hw: String,
    /// Conversion of get results.
    pub get_return_type: ConversionType,
    /// Method setting the hardware value.
    pub set_method: String,
    /// Method setting the cached (software) value.
    pub set_method_sw: String,
    /// Conversion of set arguments.
    pub set_value_type: ConversionType,
    /// Last seen sensor level.
    pub level: Option<Decimal>,
}

impl OmniSensor {
    /// Decode an `<OmniSensor>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        let get = el.child("Get");
        let set = el.child("Set");
        let text = |parent: Option<&XmlElement>, name: &str| {
            parent
                .and_then(|el| el.child_text(name))
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            location: LocationBase::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
            get_method: text(get, "Method"),
            get_method_hw: text(get, "MethodHW"),
            get_return_type: get
                .and_then(|el| el.child("Formula"))
                .and_then(|formula| formula.attribute("ReturnType"))
                .map(ConversionType::from_text)
                .unwrap_or_default(),
            set_method: text(set, "Method"),
            set_method_sw: text(set, "MethodSW"),
            set_value_type: set
                .and_then(|el| el.child("Formula"))
                .and_then(|formula| formula.attribute("ValueType"))
                .map(ConversionType::from_text)
                .unwrap_or_default(),
            level: None,
        })
    }

    /// Whether this sensor measures current.
    pub fn is_current_sensor(&self) -> bool {
        self.base().model == "Current"
    }

    /// Whether this sensor measures power.
    pub fn is_power_sensor(&self) -> bool {
        self.base().model == "Power"
    }

    /// Whether this sensor measures temperature.
    pub fn is_temperature_sensor(&self) -> bool {
        self.base().model == "Temperature"
    }

    /// Read the sensor, from hardware or the controller's cache.
    pub async fn get_level(&self, hardware: bool) -> ClientResult<Decimal> {
        let method = if hardware {
            &self.get_method_hw
        } else {
            &self.get_method
        };
        let reply = self.invoke(method, &[]).await?;
        self.get_return_type.decode(&reply.result).ok_or_else(|| {
            vantage_common::ClientError::Decode(format!(
                "invalid {method} result: {:?}",
                reply.result
            ))
        })
    }

    /// Write the sensor value, to hardware or the controller's cache.
    pub async fn set_level(&self, level: Decimal, software: bool) -> ClientResult<()> {
        let method = if software {
            &self.set_method_sw
        } else {
            &self.set_method
        };
        let param = match self.set_value_type {
            ConversionType::Fixed => Param::from(level),
            ConversionType::Int => Param::from(level.round().to_i64().unwrap_or_default()),
        };
        self.invoke(method, &[param]).await?;
        Ok(())
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

impl VantageObject for OmniSensor {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl StatefulObject for OmniSensor {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::OmniSensor(sensor) => Some(sensor),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        if self.get_method != new.get_method {
            self.get_method = new.get_method;
            changed.push("get_method");
        }
        if self.get_method_hw != new.get_method_hw {
            self.get_method_hw = new.get_method_hw;
            changed.push("get_method_hw");
        }
        if self.get_return_type != new.get_return_type {
            self.get_return_type = new.get_return_type;
            changed.push("get_return_type");
        }
        if self.set_method != new.set_method {
            self.set_method = new.set_method;
            changed.push("set_method");
        }
        if self.set_method_sw != new.set_method_sw {
            self.set_method_sw = new.set_method_sw;
            changed.push("set_method_sw");
        }
        if self.set_value_type != new.set_value_type {
            self.set_value_type = new.set_value_type;
            changed.push("set_value_type");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let level = self.get_level(true).await?;
        Ok(self.update_level(level))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        // Only this sensor's own get method is of interest
        if method != self.get_method {
            return Vec::new();
        }
        match self.get_return_type.decode(result) {
            Some(level) => self.update_level(level),
            None => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        _category: &StatusCategory,
        _args: &[String],
    ) -> Vec<&'static str> {
        // Omni sensors have no legacy category
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sensor() -> OmniSensor {
        let el = XmlElement::parse(
            r#"<OmniSensor VID="400" Master="1"><Name>Power</Name><Model>Power</Model>
                 <Parent Position="1">50</Parent>
                 <Get>
                   <Formula ReturnType="fixed" LevelType="int">Value</Formula>
                   <Method>PowerSensor.GetPower</Method>
                   <MethodHW>PowerSensor.GetPowerHW</MethodHW>
                 </Get>
                 <Set>
                   <Formula ReturnType="int" ValueType="fixed">Value</Formula>
                   <Method>PowerSensor.SetPower</Method>
                   <MethodSW>PowerSensor.SetPowerSW</MethodSW>
                 </Set>
               </OmniSensor>"#,
        )
        .unwrap();
        OmniSensor::from_xml(&el).unwrap()
    }

    #[test]
    fn test_method_descriptors() {
        let sensor = sensor();
        assert_eq!(sensor.get_method, "PowerSensor.GetPower");
        assert_eq!(sensor.get_method_hw, "PowerSensor.GetPowerHW");
        assert_eq!(sensor.set_method_sw, "PowerSensor.SetPowerSW");
        assert_eq!(sensor.get_return_type, ConversionType::Fixed);
        assert_eq!(sensor.set_value_type, ConversionType::Fixed);
        assert!(sensor.is_power_sensor());
    }

    #[test]
    fn test_only_own_method_updates() {
        let mut sensor = sensor();
        let changed = sensor.handle_object_status("PowerSensor.GetPower", "1500", &[]);
        assert_eq!(changed, vec!["level"]);
        assert_eq!(sensor.level, Some(Decimal::from_str("1.5").unwrap()));

        assert!(sensor
            .handle_object_status("CurrentSensor.GetCurrent", "1500", &[])
            .is_empty());
    }
}
