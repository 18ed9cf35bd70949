//! The `Thermostat` interface.
//!
//! Enum parameters accept either the numeric value or the case-sensitive
//! symbolic name on the wire, and always serialize numerically.

use crate::interfaces::object::ObjectHandle;
use rust_decimal::Decimal;
use vantage_common::{parse_fixed, ClientError, ClientResult, Param};

/// The operation mode of a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum OperationMode {
    /// Off.
    Off = 0,
    /// Cooling.
    Cool = 1,
    /// Heating.
    Heat = 2,
    /// Automatic heat/cool selection.
    Auto = 3,
    /// Unknown mode.
    Unknown = 4,
}

impl OperationMode {
    /// Decode a wire token (numeric or symbolic).
    pub fn from_token(token: &str) -> ClientResult<Self> {
        match token {
            "0" | "Off" => Ok(Self::Off),
            "1" | "Cool" => Ok(Self::Cool),
            "2" | "Heat" => Ok(Self::Heat),
            "3" | "Auto" => Ok(Self::Auto),
            "4" | "Unknown" => Ok(Self::Unknown),
            other => Err(ClientError::Decode(format!(
                "invalid operation mode token: {other:?}"
            ))),
        }
    }
}

/// The fan mode of a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FanMode {
    /// Fan runs on demand.
    Off = 0,
    /// Fan runs continuously.
    On = 1,
    /// Unknown mode.
    Unknown = 2,
}

impl FanMode {
    /// Decode a wire token (numeric or symbolic).
    pub fn from_token(token: &str) -> ClientResult<Self> {
        match token {
            "0" | "Off" => Ok(Self::Off),
            "1" | "On" => Ok(Self::On),
            "2" | "Unknown" => Ok(Self::Unknown),
            other => Err(ClientError::Decode(format!(
                "invalid fan mode token: {other:?}"
            ))),
        }
    }
}

/// The day mode of a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum DayMode {
    /// Day schedule.
    Day = 0,
    /// Night schedule.
    Night = 1,
    /// Unknown mode.
    Unknown = 2,
    /// Standby.
    Standby = 3,
}

impl DayMode {
    /// Decode a wire token (numeric or symbolic).
    pub fn from_token(token: &str) -> ClientResult<Self> {
        match token {
            "0" | "Day" => Ok(Self::Day),
            "1" | "Night" => Ok(Self::Night),
            "2" | "Unknown" => Ok(Self::Unknown),
            "3" | "Standby" => Ok(Self::Standby),
            other => Err(ClientError::Decode(format!(
                "invalid day mode token: {other:?}"
            ))),
        }
    }
}

/// The hold mode of a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum HoldMode {
    /// Following the schedule.
    Normal = 0,
    /// Holding the current set points.
    Hold = 1,
    /// Unknown mode.
    Unknown = 2,
}

impl HoldMode {
    /// Decode a wire token (numeric or symbolic).
    pub fn from_token(token: &str) -> ClientResult<Self> {
        match token {
            "0" | "Normal" => Ok(Self::Normal),
            "1" | "Hold" => Ok(Self::Hold),
            "2" | "Unknown" => Ok(Self::Unknown),
            other => Err(ClientError::Decode(format!(
                "invalid hold mode token: {other:?}"
            ))),
        }
    }
}

/// The running status of a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ThermostatStatus {
    /// Idle.
    Off = 0,
    /// Actively cooling.
    Cooling = 1,
    /// Actively heating.
    Heating = 2,
    /// Not reachable.
    Offline = 3,
}

impl ThermostatStatus {
    /// Decode a wire token (numeric or symbolic).
    pub fn from_token(token: &str) -> ClientResult<Self> {
        match token {
            "0" | "Off" => Ok(Self::Off),
            "1" | "Cooling" => Ok(Self::Cooling),
            "2" | "Heating" => Ok(Self::Heating),
            "3" | "Offline" => Ok(Self::Offline),
            other => Err(ClientError::Decode(format!(
                "invalid thermostat status token: {other:?}"
            ))),
        }
    }
}

/// Methods of the `Thermostat` interface.
pub trait ThermostatInterface: ObjectHandle {
    /// Get the current indoor temperature, in degrees Celsius.
    async fn get_indoor_temperature(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("Thermostat.GetIndoorTemperature", &[]).await?;
        parse_fixed(&reply.result)
    }

    /// Get the current outdoor temperature, in degrees Celsius.
    async fn get_outdoor_temperature(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("Thermostat.GetOutdoorTemperature", &[]).await?;
        parse_fixed(&reply.result)
    }

    /// Get the heat set point, in degrees Celsius.
    async fn get_heat_set_point(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("Thermostat.GetHeatSetPoint", &[]).await?;
        parse_fixed(&reply.result)
    }

    /// Set the heat set point, in degrees Celsius.
    async fn set_heat_set_point(&self, temp: Decimal) -> ClientResult<()> {
        self.invoke("Thermostat.SetHeatSetPoint", &[Param::from(temp)])
            .await?;
        Ok(())
    }

    /// Get the cool set point, in degrees Celsius.
    async fn get_cool_set_point(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("Thermostat.GetCoolSetPoint", &[]).await?;
        parse_fixed(&reply.result)
    }

    /// Set the cool set point, in degrees Celsius.
    async fn set_cool_set_point(&self, temp: Decimal) -> ClientResult<()> {
        self.invoke("Thermostat.SetCoolSetPoint", &[Param::from(temp)])
            .await?;
        Ok(())
    }

    /// Get the auto set point, in degrees Celsius.
    async fn get_auto_set_point(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("Thermostat.GetAutoSetPoint", &[]).await?;
        parse_fixed(&reply.result)
    }

    /// Set the auto set point, in degrees Celsius.
    async fn set_auto_set_point(&self, temp: Decimal) -> ClientResult<()> {
        self.invoke("Thermostat.SetAutoSetPoint", &[Param::from(temp)])
            .await?;
        Ok(())
    }

    /// Get the operation mode.
    async fn get_operation_mode(&self) -> ClientResult<OperationMode> {
        let reply = self.invoke("Thermostat.GetOperationMode", &[]).await?;
        OperationMode::from_token(&reply.result)
    }

    /// Set the operation mode.
    async fn set_operation_mode(&self, mode: OperationMode) -> ClientResult<()> {
        self.invoke("Thermostat.SetOperationMode", &[Param::from(mode as i32)])
            .await?;
        Ok(())
    }

    /// Get the fan mode.
    async fn get_fan_mode(&self) -> ClientResult<FanMode> {
        let reply = self.invoke("Thermostat.GetFanMode", &[]).await?;
        FanMode::from_token(&reply.result)
    }

    /// Set the fan mode.
    async fn set_fan_mode(&self, mode: FanMode) -> ClientResult<()> {
        self.invoke("Thermostat.SetFanMode", &[Param::from(mode as i32)])
            .await?;
        Ok(())
    }

    /// Get the day mode.
    async fn get_day_mode(&self) -> ClientResult<DayMode> {
        let reply = self.invoke("Thermostat.GetDayMode", &[]).await?;
        DayMode::from_token(&reply.result)
    }

    /// Set the day mode.
    async fn set_day_mode(&self, mode: DayMode) -> ClientResult<()> {
        self.invoke("Thermostat.SetDayMode", &[Param::from(mode as i32)])
            .await?;
        Ok(())
    }

    /// Get the hold mode.
    async fn get_hold_mode(&self) -> ClientResult<HoldMode> {
        let reply = self.invoke("Thermostat.GetHoldMode", &[]).await?;
        HoldMode::from_token(&reply.result)
    }

    /// Set the hold mode.
    async fn set_hold_mode(&self, mode: HoldMode) -> ClientResult<()> {
        self.invoke("Thermostat.SetHoldMode", &[Param::from(mode as i32)])
            .await?;
        Ok(())
    }

    /// Get the running status.
    async fn get_status(&self) -> ClientResult<ThermostatStatus> {
        let reply = self.invoke("Thermostat.GetStatus", &[]).await?;
        ThermostatStatus::from_token(&reply.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_symbolic_forms() {
        assert_eq!(OperationMode::from_token("2").unwrap(), OperationMode::Heat);
        assert_eq!(
            OperationMode::from_token("Heat").unwrap(),
            OperationMode::Heat
        );
        assert_eq!(FanMode::from_token("On").unwrap(), FanMode::On);
        assert_eq!(DayMode::from_token("Standby").unwrap(), DayMode::Standby);
        assert_eq!(HoldMode::from_token("1").unwrap(), HoldMode::Hold);
        assert_eq!(
            ThermostatStatus::from_token("Cooling").unwrap(),
            ThermostatStatus::Cooling
        );
    }

    #[test]
    fn test_symbolic_names_are_case_sensitive() {
        assert!(OperationMode::from_token("heat").is_err());
        assert!(FanMode::from_token("ON").is_err());
    }
}
