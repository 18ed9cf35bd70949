//! Station objects: keypads, remote relay stations, and similar bus
//! devices.

use crate::base::{Parent, StationBase, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::SounderInterface;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// The wire tag a station was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StationKind {
    /// `Keypad`.
    #[default]
    Keypad,
    /// `Dimmer`.
    Dimmer,
    /// `DualRelayStation`.
    DualRelayStation,
    /// `EqCtrl`: an Equinox 40 controller.
    EqCtrl,
    /// `EqUX`: an Equinox 73/41 touchscreen.
    EqUx,
    /// `HighVoltageRelayStation`.
    HighVoltageRelayStation,
    /// `LowVoltageRelayStation`.
    LowVoltageRelayStation,
    /// `IRX2`: an infrared receiver.
    Irx2,
    /// `RS232Station`.
    Rs232Station,
    /// `RS485Station`.
    Rs485Station,
    /// `ContactInput`.
    ContactInput,
    /// `ScenePointRelay`.
    ScenePointRelay,
}

impl StationKind {
    /// Whether this station model has a sounder.
    pub fn has_sounder(self) -> bool {
        matches!(self, Self::Keypad | Self::Dimmer | Self::EqCtrl)
    }
}

/// A station: a device mounted on a station bus.
#[derive(Debug, Clone, Default)]
pub struct Station {
    /// Station fields (serial number, bus).
    pub station: StationBase,
    /// Which wire tag this station was configured with.
    pub kind: StationKind,
    /// The bus or parent device, for child stations.
    pub parent: Option<Parent>,
}

impl Station {
    /// Decode a station element of the given kind.
    pub fn from_xml(kind: StationKind, el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            station: StationBase::from_xml(el)?,
            kind,
            parent: Parent::from_parent_of(el)?,
        })
    }
}

impl VantageObject for Station {
    fn base(&self) -> &SystemObject {
        &self.station.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.station.location.system
    }
}

impl SounderInterface for Station {}

impl StatefulObject for Station {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Station(station) => Some(station),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.station.apply_config(new.station);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
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
    fn test_station_decode() {
        let el = XmlElement::parse(
            r#"<Keypad VID="200" Master="1"><Name>Entry Keypad</Name>
                 <SerialNumber>12345678</SerialNumber><Bus>4</Bus>
               </Keypad>"#,
        )
        .unwrap();
        let station = Station::from_xml(StationKind::Keypad, &el).unwrap();
        assert_eq!(station.station.serial_number.as_deref(), Some("12345678"));
        assert_eq!(station.station.bus_vid, Some(4));
        assert!(station.kind.has_sounder());
    }
}
