//! The object catalog: wire-tag dispatch for configuration XML.

use crate::base::VantageObject;
use crate::objects::{
    AnemoSensor, Area, BackBox, Blind, BlindGroup, BlindGroupKind, BlindKind, Button, DryContact,
    GMem, LightSensor, Load, LoadGroup, Master, Module, ModuleKind, OmniSensor, PortDevice,
    PortDeviceKind, PowerProfile, PowerProfileKind, RgbLoad, RgbLoadKind, Station, StationBus,
    StationKind, Task, Temperature, Thermostat,
};
use vantage_common::{ClientResult, Vid, XmlElement};

/// A configuration object decoded from its XML element.
///
/// The catalog is a closed set keyed by the XML wire tag; elements with an
/// unknown tag decode to `None` rather than an error, since controllers
/// carry object types this client has no model for.
#[derive(Debug, Clone)]
pub enum ConfigObject {
    /// An `<Area>`.
    Area(Area),
    /// A `<Load>`.
    Load(Load),
    /// A `<LoadGroup>`.
    LoadGroup(LoadGroup),
    /// A color load (`Vantage.DGColorLoad`, `Vantage.DDGColorLoad`).
    RgbLoad(RgbLoad),
    /// A blind (`QISBlind`, `QubeBlind`, `RelayBlind`, Somfy shades).
    Blind(Blind),
    /// A blind group (`BlindGroup`, Somfy groups).
    BlindGroup(BlindGroup),
    /// A `<Button>`.
    Button(Button),
    /// A `<DryContact>`.
    DryContact(DryContact),
    /// A `<GMem>` variable.
    GMem(GMem),
    /// A `<Master>` controller.
    Master(Master),
    /// An output module (`Module`, `ModuleGen2`).
    Module(Module),
    /// An `<OmniSensor>`.
    OmniSensor(OmniSensor),
    /// A `<LightSensor>`.
    LightSensor(LightSensor),
    /// An `<AnemoSensor>`.
    AnemoSensor(AnemoSensor),
    /// A `<Temperature>` sensor.
    Temperature(Temperature),
    /// A `<Thermostat>`.
    Thermostat(Thermostat),
    /// A `<Task>`.
    Task(Task),
    /// A power profile (`PowerProfile`, `DCPowerProfile`, `PWMPowerProfile`).
    PowerProfile(PowerProfile),
    /// A `<BackBox>`.
    BackBox(BackBox),
    /// A station (keypads, relay stations, touchscreens, …).
    Station(Station),
    /// A `<StationBus>`.
    StationBus(StationBus),
    /// A port device (DMX/DALI gateways, Somfy ports, HVAC ports).
    PortDevice(PortDevice),
}

impl ConfigObject {
    /// Decode an object element by its wire tag. Returns `Ok(None)` for
    /// unknown tags.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Option<Self>> {
        let object = match el.name.as_str() {
            "Area" => Self::Area(Area::from_xml(el)?),
            "Load" => Self::Load(Load::from_xml(el)?),
            "LoadGroup" => Self::LoadGroup(LoadGroup::from_xml(el)?),

            "Vantage.DGColorLoad" => {
                Self::RgbLoad(RgbLoad::from_xml(RgbLoadKind::DgColorLoad, el)?)
            }
            "Vantage.DDGColorLoad" => {
                Self::RgbLoad(RgbLoad::from_xml(RgbLoadKind::DdgColorLoad, el)?)
            }

            "QISBlind" => Self::Blind(Blind::from_xml(BlindKind::Qis, el)?),
            "QubeBlind" => Self::Blind(Blind::from_xml(BlindKind::Qube, el)?),
            "RelayBlind" => Self::Blind(Blind::from_xml(BlindKind::Relay, el)?),
            "Somfy.RS-485_Shade_CHILD" => {
                Self::Blind(Blind::from_xml(BlindKind::SomfyRs485Shade, el)?)
            }
            "Somfy.URTSI_2_Shade_CHILD" => {
                Self::Blind(Blind::from_xml(BlindKind::SomfyUrtsi2Shade, el)?)
            }

            "BlindGroup" => Self::BlindGroup(BlindGroup::from_xml(BlindGroupKind::Group, el)?),
            "Somfy.RS-485_Group_CHILD" => {
                Self::BlindGroup(BlindGroup::from_xml(BlindGroupKind::SomfyRs485Group, el)?)
            }
            "Somfy.URTSI_2_Group_CHILD" => {
                Self::BlindGroup(BlindGroup::from_xml(BlindGroupKind::SomfyUrtsi2Group, el)?)
            }

            "Button" => Self::Button(Button::from_xml(el)?),
            "DryContact" => Self::DryContact(DryContact::from_xml(el)?),
            "GMem" => Self::GMem(GMem::from_xml(el)?),
            "Master" => Self::Master(Master::from_xml(el)?),

            "Module" => Self::Module(Module::from_xml(ModuleKind::Module, el)?),
            "ModuleGen2" => Self::Module(Module::from_xml(ModuleKind::Gen2, el)?),

            "OmniSensor" => Self::OmniSensor(OmniSensor::from_xml(el)?),
            "LightSensor" => Self::LightSensor(LightSensor::from_xml(el)?),
            "AnemoSensor" => Self::AnemoSensor(AnemoSensor::from_xml(el)?),
            "Temperature" => Self::Temperature(Temperature::from_xml(el)?),
            "Thermostat" => Self::Thermostat(Thermostat::from_xml(el)?),
            "Task" => Self::Task(Task::from_xml(el)?),

            "PowerProfile" => {
                Self::PowerProfile(PowerProfile::from_xml(PowerProfileKind::Generic, el)?)
            }
            "DCPowerProfile" => {
                Self::PowerProfile(PowerProfile::from_xml(PowerProfileKind::Dc, el)?)
            }
            "PWMPowerProfile" => {
                Self::PowerProfile(PowerProfile::from_xml(PowerProfileKind::Pwm, el)?)
            }

            "BackBox" => Self::BackBox(BackBox::from_xml(el)?),

            "Keypad" => Self::Station(Station::from_xml(StationKind::Keypad, el)?),
            "Dimmer" => Self::Station(Station::from_xml(StationKind::Dimmer, el)?),
            "DualRelayStation" => {
                Self::Station(Station::from_xml(StationKind::DualRelayStation, el)?)
            }
            "EqCtrl" => Self::Station(Station::from_xml(StationKind::EqCtrl, el)?),
            "EqUX" => Self::Station(Station::from_xml(StationKind::EqUx, el)?),
            "HighVoltageRelayStation" => {
                Self::Station(Station::from_xml(StationKind::HighVoltageRelayStation, el)?)
            }
            "LowVoltageRelayStation" => {
                Self::Station(Station::from_xml(StationKind::LowVoltageRelayStation, el)?)
            }
            "IRX2" => Self::Station(Station::from_xml(StationKind::Irx2, el)?),
            "RS232Station" => Self::Station(Station::from_xml(StationKind::Rs232Station, el)?),
            "RS485Station" => Self::Station(Station::from_xml(StationKind::Rs485Station, el)?),
            "ContactInput" => Self::Station(Station::from_xml(StationKind::ContactInput, el)?),
            "ScenePointRelay" => {
                Self::Station(Station::from_xml(StationKind::ScenePointRelay, el)?)
            }

            "StationBus" => Self::StationBus(StationBus::from_xml(el)?),

            "Vantage.DmxGateway" => {
                Self::PortDevice(PortDevice::from_xml(PortDeviceKind::DmxGateway, el)?)
            }
            "Vantage.DmxDaliGateway" => {
                Self::PortDevice(PortDevice::from_xml(PortDeviceKind::DmxDaliGateway, el)?)
            }
            "Vantage.Generic_HVAC_RS485_PORT" => Self::PortDevice(PortDevice::from_xml(
                PortDeviceKind::GenericHvacRs485Port,
                el,
            )?),
            "Vantage.HVAC-IU_PORT" => {
                Self::PortDevice(PortDevice::from_xml(PortDeviceKind::HvacIuPort, el)?)
            }
            "Somfy.RS-485_SDN_2_x2E_0_PORT" => {
                Self::PortDevice(PortDevice::from_xml(PortDeviceKind::SomfyRs485SdnPort, el)?)
            }
            "Somfy.URTSI_2_PORT" => {
                Self::PortDevice(PortDevice::from_xml(PortDeviceKind::SomfyUrtsi2Port, el)?)
            }

            _ => return Ok(None),
        };

        Ok(Some(object))
    }

    /// The object's VID.
    pub fn vid(&self) -> Vid {
        self.base_object().vid()
    }

    /// The object's name.
    pub fn name(&self) -> &str {
        self.base_object().name()
    }

    fn base_object(&self) -> &dyn VantageObject {
        match self {
            Self::Area(o) => o,
            Self::Load(o) => o,
            Self::LoadGroup(o) => o,
            Self::RgbLoad(o) => o,
            Self::Blind(o) => o,
            Self::BlindGroup(o) => o,
            Self::Button(o) => o,
            Self::DryContact(o) => o,
            Self::GMem(o) => o,
            Self::Master(o) => o,
            Self::Module(o) => o,
            Self::OmniSensor(o) => o,
            Self::LightSensor(o) => o,
            Self::AnemoSensor(o) => o,
            Self::Temperature(o) => o,
            Self::Thermostat(o) => o,
            Self::Task(o) => o,
            Self::PowerProfile(o) => o,
            Self::BackBox(o) => o,
            Self::Station(o) => o,
            Self::StationBus(o) => o,
            Self::PortDevice(o) => o,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{BlindKind, StationKind};

    #[test]
    fn test_dispatch_by_tag() {
        let el = XmlElement::parse(
            r#"<Load VID="1" Master="1"><Name>L</Name><LoadType>Motor</LoadType></Load>"#,
        )
        .unwrap();
        let object = ConfigObject::from_xml(&el).unwrap().unwrap();
        assert!(matches!(object, ConfigObject::Load(_)));
        assert_eq!(object.vid(), 1);
        assert_eq!(object.name(), "L");
    }

    #[test]
    fn test_dotted_tags() {
        let el = XmlElement::parse(
            r#"<Somfy.URTSI_2_Shade_CHILD VID="9" Master="1"><Name>S</Name></Somfy.URTSI_2_Shade_CHILD>"#,
        )
        .unwrap();
        let object = ConfigObject::from_xml(&el).unwrap().unwrap();
        match object {
            ConfigObject::Blind(blind) => assert_eq!(blind.kind, BlindKind::SomfyUrtsi2Shade),
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn test_station_tags_share_a_model() {
        let el = XmlElement::parse(r#"<EqUX VID="5" Master="1"><Name>Touch</Name></EqUX>"#)
            .unwrap();
        let object = ConfigObject::from_xml(&el).unwrap().unwrap();
        match object {
            ConfigObject::Station(station) => assert_eq!(station.kind, StationKind::EqUx),
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tag_is_none() {
        let el = XmlElement::parse(r#"<Widget VID="1" Master="1"/>"#).unwrap();
        assert!(ConfigObject::from_xml(&el).unwrap().is_none());
    }

    #[test]
    fn test_malformed_known_tag_is_error() {
        // A known tag without a VID must report a decode error
        let el = XmlElement::parse("<Load><Name>L</Name></Load>").unwrap();
        assert!(ConfigObject::from_xml(&el).is_err());
    }
}
