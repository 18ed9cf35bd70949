//! Sensor interfaces: generic sensors, light sensors, anemometers, and
//! temperature sensors.

use crate::interfaces::object::ObjectHandle;
use rust_decimal::Decimal;
use vantage_common::{parse_fixed, ClientResult};

/// Methods of the `Sensor` interface.
pub trait SensorInterface: ObjectHandle {
    /// Get the level of the sensor.
    ///
    /// `INVOKE <vid> Sensor.GetLevel` →
    /// `R:INVOKE <vid> <level> Sensor.GetLevel`
    async fn get_level(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("Sensor.GetLevel", &[]).await?;
        parse_fixed(&reply.result)
    }
}

/// Methods of the `LightSensor` interface.
pub trait LightSensorInterface: ObjectHandle {
    /// Get the light level, in foot-candles.
    ///
    /// `INVOKE <vid> LightSensor.GetLevel` →
    /// `R:INVOKE <vid> <level> LightSensor.GetLevel`
    async fn get_level(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("LightSensor.GetLevel", &[]).await?;
        parse_fixed(&reply.result)
    }
}

/// Methods of the `AnemoSensor` interface.
pub trait AnemoSensorInterface: ObjectHandle {
    /// Get the wind speed, in mph.
    ///
    /// `INVOKE <vid> AnemoSensor.GetSpeed` →
    /// `R:INVOKE <vid> <speed> AnemoSensor.GetSpeed`
    async fn get_speed(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("AnemoSensor.GetSpeed", &[]).await?;
        parse_fixed(&reply.result)
    }
}

/// Methods of the `Temperature` interface.
pub trait TemperatureInterface: ObjectHandle {
    /// Get the temperature, in degrees Celsius.
    ///
    /// `INVOKE <vid> Temperature.GetValue` →
    /// `R:INVOKE <vid> <temp> Temperature.GetValue`
    async fn get_value(&self) -> ClientResult<Decimal> {
        let reply = self.invoke("Temperature.GetValue", &[]).await?;
        parse_fixed(&reply.result)
    }
}
