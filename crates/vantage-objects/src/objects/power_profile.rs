//! Power profile objects: dimming characteristics of load types.

use crate::base::{SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// The wire tag a power profile was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PowerProfileKind {
    /// `PowerProfile`: a generic profile.
    #[default]
    Generic,
    /// `DCPowerProfile`: a DC output profile.
    Dc,
    /// `PWMPowerProfile`: a PWM output profile.
    Pwm,
}

/// A power profile describing an output's dimming range.
#[derive(Debug, Clone, Default)]
pub struct PowerProfile {
    /// Common object fields.
    pub system: SystemObject,
    /// Which wire tag this profile was configured with.
    pub kind: PowerProfileKind,
    /// Minimum output value.
    pub min: Option<Decimal>,
    /// Maximum output value.
    pub max: Option<Decimal>,
    /// Adjustment factor.
    pub adjust: Option<Decimal>,
}

impl PowerProfile {
    /// Decode a power-profile element of the given kind.
    pub fn from_xml(kind: PowerProfileKind, el: &XmlElement) -> ClientResult<Self> {
        let decimal = |name: &str| el.child_text(name).and_then(|text| text.parse().ok());
        Ok(Self {
            system: SystemObject::from_xml(el)?,
            kind,
            min: decimal("Min"),
            max: decimal("Max"),
            adjust: decimal("Adjust"),
        })
    }

    /// Whether loads with this profile can be dimmed.
    pub fn is_dimmable(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => max > min,
            _ => false,
        }
    }
}

impl VantageObject for PowerProfile {
    fn base(&self) -> &SystemObject {
        &self.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.system
    }
}

impl StatefulObject for PowerProfile {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::PowerProfile(profile) => Some(profile),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.system.apply_config(new.system);
        if self.min != new.min {
            self.min = new.min;
            changed.push("min");
        }
        if self.max != new.max {
            self.max = new.max;
            changed.push("max");
        }
        if self.adjust != new.adjust {
            self.adjust = new.adjust;
            changed.push("adjust");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimmable() {
        let el = XmlElement::parse(
            r#"<PowerProfile VID="7" Master="1"><Name>Dim</Name>
                 <Min>0.0</Min><Max>100.0</Max><Adjust>1</Adjust>
               </PowerProfile>"#,
        )
        .unwrap();
        let profile = PowerProfile::from_xml(PowerProfileKind::Generic, &el).unwrap();
        assert!(profile.is_dimmable());

        let el = XmlElement::parse(
            r#"<PowerProfile VID="8" Master="1"><Name>Relay</Name>
                 <Min>100</Min><Max>100</Max>
               </PowerProfile>"#,
        )
        .unwrap();
        let profile = PowerProfile::from_xml(PowerProfileKind::Generic, &el).unwrap();
        assert!(!profile.is_dimmable());
    }
}
