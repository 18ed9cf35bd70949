//! Thermostat objects.

use crate::base::{LocationBase, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::{
    DayMode, FanMode, HoldMode, OperationMode, ThermostatInterface, ThermostatStatus,
};
use crate::StatefulObject;
use rust_decimal::Decimal;
use tracing::warn;
use vantage_command::StatusCategory;
use vantage_common::{parse_fixed, ClientResult, XmlElement};

/// A thermostat.
#[derive(Debug, Clone, Default)]
pub struct Thermostat {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// Day/night setback flag from the configuration.
    pub day_mode_enabled: bool,
    /// Current operation mode.
    pub operation_mode: Option<OperationMode>,
    /// Current fan mode.
    pub fan_mode: Option<FanMode>,
    /// Current day mode.
    pub day_mode: Option<DayMode>,
    /// Current hold mode.
    pub hold_mode: Option<HoldMode>,
    /// Current running status.
    pub status: Option<ThermostatStatus>,
    /// Current indoor temperature, in degrees Celsius.
    pub indoor_temperature: Option<Decimal>,
    /// Current heat set point, in degrees Celsius.
    pub heat_set_point: Option<Decimal>,
    /// Current cool set point, in degrees Celsius.
    pub cool_set_point: Option<Decimal>,
    /// Current auto set point, in degrees Celsius.
    pub auto_set_point: Option<Decimal>,
}

macro_rules! update_field {
    ($self:ident, $field:ident, $value:expr) => {{
        let value = $value;
        if $self.$field == Some(value) {
            Vec::new()
        } else {
            $self.$field = Some(value);
            vec![stringify!($field)]
        }
    }};
}

impl Thermostat {
    /// Decode a `<Thermostat>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            day_mode_enabled: el
                .child_text("DayMode")
                .is_some_and(|text| matches!(text, "true" | "True" | "1")),
            ..Self::default()
        })
    }
}

impl VantageObject for Thermostat {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl ThermostatInterface for Thermostat {}

impl StatefulObject for Thermostat {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Thermostat(thermostat) => Some(thermostat),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.day_mode_enabled != new.day_mode_enabled {
            self.day_mode_enabled = new.day_mode_enabled;
            changed.push("day_mode_enabled");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let mut changed = Vec::new();

        changed.extend(update_field!(self, operation_mode, self.get_operation_mode().await?));
        changed.extend(update_field!(self, fan_mode, self.get_fan_mode().await?));
        changed.extend(update_field!(self, day_mode, self.get_day_mode().await?));
        changed.extend(update_field!(self, hold_mode, self.get_hold_mode().await?));
        changed.extend(update_field!(self, status, self.get_status().await?));
        changed.extend(update_field!(
            self,
            indoor_temperature,
            self.get_indoor_temperature().await?
        ));
        changed.extend(update_field!(self, heat_set_point, self.get_heat_set_point().await?));
        changed.extend(update_field!(self, cool_set_point, self.get_cool_set_point().await?));
        changed.extend(update_field!(self, auto_set_point, self.get_auto_set_point().await?));

        Ok(changed)
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        let fixed = |raw: &str| match parse_fixed(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(method, error = %err, "malformed thermostat status");
                None
            }
        };

        match method {
            "Thermostat.GetOperationMode" => match OperationMode::from_token(result) {
                Ok(mode) => update_field!(self, operation_mode, mode),
                Err(_) => Vec::new(),
            },
            "Thermostat.GetFanMode" => match FanMode::from_token(result) {
                Ok(mode) => update_field!(self, fan_mode, mode),
                Err(_) => Vec::new(),
            },
            "Thermostat.GetDayMode" => match DayMode::from_token(result) {
                Ok(mode) => update_field!(self, day_mode, mode),
                Err(_) => Vec::new(),
            },
            "Thermostat.GetHoldMode" => match HoldMode::from_token(result) {
                Ok(mode) => update_field!(self, hold_mode, mode),
                Err(_) => Vec::new(),
            },
            "Thermostat.GetStatus" => match ThermostatStatus::from_token(result) {
                Ok(status) => update_field!(self, status, status),
                Err(_) => Vec::new(),
            },
            "Thermostat.GetIndoorTemperature" => match fixed(result) {
                Some(value) => update_field!(self, indoor_temperature, value),
                None => Vec::new(),
            },
            "Thermostat.GetHeatSetPoint" => match fixed(result) {
                Some(value) => update_field!(self, heat_set_point, value),
                None => Vec::new(),
            },
            "Thermostat.GetCoolSetPoint" => match fixed(result) {
                Some(value) => update_field!(self, cool_set_point, value),
                None => Vec::new(),
            },
            "Thermostat.GetAutoSetPoint" => match fixed(result) {
                Some(value) => update_field!(self, auto_set_point, value),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        _category: &StatusCategory,
        _args: &[String],
    ) -> Vec<&'static str> {
        // Thermostat state only arrives as object statuses; the associated
        // Temperature children handle S:TEMP
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn thermostat() -> Thermostat {
        let el = XmlElement::parse(
            r#"<Thermostat VID="7" Master="1"><Name>Hallway</Name></Thermostat>"#,
        )
        .unwrap();
        Thermostat::from_xml(&el).unwrap()
    }

    #[test]
    fn test_heat_set_point_status() {
        let mut thermostat = thermostat();
        let changed = thermostat.handle_object_status("Thermostat.GetHeatSetPoint", "21500", &[]);
        assert_eq!(changed, vec!["heat_set_point"]);
        assert_eq!(
            thermostat.heat_set_point,
            Some(Decimal::from_str("21.500").unwrap())
        );
    }

    #[test]
    fn test_mode_statuses() {
        let mut thermostat = thermostat();
        assert_eq!(
            thermostat.handle_object_status("Thermostat.GetOperationMode", "Heat", &[]),
            vec!["operation_mode"]
        );
        assert_eq!(thermostat.operation_mode, Some(OperationMode::Heat));

        assert_eq!(
            thermostat.handle_object_status("Thermostat.GetFanMode", "1", &[]),
            vec!["fan_mode"]
        );
        assert_eq!(thermostat.fan_mode, Some(FanMode::On));
    }

    #[test]
    fn test_duplicate_status_is_not_a_change() {
        let mut thermostat = thermostat();
        thermostat.handle_object_status("Thermostat.GetHeatSetPoint", "21500", &[]);
        let changed = thermostat.handle_object_status("Thermostat.GetHeatSetPoint", "21.500", &[]);
        assert!(changed.is_empty());
    }
}
