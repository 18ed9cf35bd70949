//! Load objects: lights, relays, and motors.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::LoadInterface;
use crate::StatefulObject;
use rust_decimal::Decimal;
use tracing::warn;
use vantage_command::StatusCategory;
use vantage_common::{parse_decimal, parse_fixed, ClientResult, Vid, XmlElement};

/// A load: anything wired to a dimmer or relay output.
#[derive(Debug, Clone, Default)]
pub struct Load {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// The output module this load is wired to.
    pub parent: Option<Parent>,
    /// Load type string, e.g. `"Incandescent"` or `"High Voltage Relay"`.
    pub load_type: String,
    /// VID of the power profile describing this load.
    pub power_profile_vid: Option<Vid>,
    /// Current level percentage. `None` until first fetched.
    pub level: Option<Decimal>,
}

impl Load {
    /// Decode a `<Load>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
            load_type: el.child_text("LoadType").unwrap_or_default().to_string(),
            power_profile_vid: el
                .child_text("PowerProfile")
                .and_then(|text| text.parse().ok()),
            level: None,
        })
    }

    /// Whether the load type is a relay.
    pub fn is_relay(&self) -> bool {
        matches!(
            self.load_type.as_str(),
            "High Voltage Relay" | "Low Voltage Relay"
        )
    }

    /// Whether the load type is a motor.
    pub fn is_motor(&self) -> bool {
        self.load_type == "Motor"
    }

    /// Whether the load is inferred to be a light.
    pub fn is_light(&self) -> bool {
        !(self.is_relay() || self.is_motor())
    }

    /// Whether the load is on.
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

impl VantageObject for Load {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl LoadInterface for Load {}

impl StatefulObject for Load {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Load(load) => Some(load),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        if self.load_type != new.load_type {
            self.load_type = new.load_type;
            changed.push("load_type");
        }
        if self.power_profile_vid != new.power_profile_vid {
            self.power_profile_vid = new.power_profile_vid;
            changed.push("power_profile_vid");
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
        // EL: <vid> Load.GetLevel <level (0-100000)>
        // S:STATUS <vid> Load.GetLevel <level (0-100000)>
        if method != "Load.GetLevel" {
            return Vec::new();
        }
        match parse_fixed(result) {
            Ok(level) => self.update_level(level),
            Err(err) => {
                warn!(vid = self.vid(), error = %err, "malformed Load.GetLevel status");
                Vec::new()
            }
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        // S:LOAD <vid> <level (0-100.000)>
        if *category != StatusCategory::Load {
            return Vec::new();
        }
        match args.first().map(|arg| parse_decimal(arg)) {
            Some(Ok(level)) => self.update_level(level),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn load() -> Load {
        let el = XmlElement::parse(
            r#"<Load VID="42" Master="1"><Name>Lamp</Name><Area>3</Area>
                 <LoadType>Incandescent</LoadType><PowerProfile>7</PowerProfile>
               </Load>"#,
        )
        .unwrap();
        Load::from_xml(&el).unwrap()
    }

    #[test]
    fn test_decode() {
        let load = load();
        assert_eq!(load.vid(), 42);
        assert_eq!(load.load_type, "Incandescent");
        assert_eq!(load.power_profile_vid, Some(7));
        assert!(load.is_light());
        assert!(!load.is_on());
    }

    #[test]
    fn test_relay_and_motor_predicates() {
        let mut load = load();
        load.load_type = "High Voltage Relay".to_string();
        assert!(load.is_relay());
        assert!(!load.is_light());
        load.load_type = "Motor".to_string();
        assert!(load.is_motor());
    }

    #[test]
    fn test_category_status_updates_level() {
        let mut load = load();
        let changed =
            load.handle_category_status(&StatusCategory::Load, &["75.000".to_string()]);
        assert_eq!(changed, vec!["level"]);
        assert_eq!(load.level, Some(Decimal::from_str("75.000").unwrap()));
        assert!(load.is_on());

        // Same level again: no change
        let changed =
            load.handle_category_status(&StatusCategory::Load, &["75.000".to_string()]);
        assert!(changed.is_empty());
    }

    #[test]
    fn test_object_status_uses_fixed_form() {
        let mut load = load();
        let changed = load.handle_object_status("Load.GetLevel", "75000", &[]);
        assert_eq!(changed, vec!["level"]);
        assert_eq!(load.level, Some(Decimal::from_str("75.000").unwrap()));
    }

    #[test]
    fn test_unrelated_status_is_ignored() {
        let mut load = load();
        assert!(load
            .handle_object_status("Blind.GetPosition", "50000", &[])
            .is_empty());
        assert!(load
            .handle_category_status(&StatusCategory::Btn, &["PRESS".to_string()])
            .is_empty());
    }
}
