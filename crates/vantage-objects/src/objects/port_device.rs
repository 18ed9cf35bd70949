//! Port device objects: gateways and bridge ports for third-party motor and
//! lighting networks.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// The wire tag a port device was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PortDeviceKind {
    /// `Vantage.DmxGateway`.
    #[default]
    DmxGateway,
    /// `Vantage.DmxDaliGateway`.
    DmxDaliGateway,
    /// `Vantage.Generic_HVAC_RS485_PORT`.
    GenericHvacRs485Port,
    /// `Vantage.HVAC-IU_PORT`.
    HvacIuPort,
    /// `Somfy.RS-485_SDN_2_x2E_0_PORT`.
    SomfyRs485SdnPort,
    /// `Somfy.URTSI_2_PORT`.
    SomfyUrtsi2Port,
}

/// A port device: the parent of Somfy shades, DMX color loads, and HVAC
/// children.
#[derive(Debug, Clone, Default)]
pub struct PortDevice {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// Which wire tag this device was configured with.
    pub kind: PortDeviceKind,
    /// The station port this device is attached to.
    pub parent: Option<Parent>,
}

impl PortDevice {
    /// Decode a port-device element of the given kind.
    pub fn from_xml(kind: PortDeviceKind, el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            kind,
            parent: Parent::from_parent_of(el)?,
        })
    }
}

impl VantageObject for PortDevice {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl StatefulObject for PortDevice {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::PortDevice(device) => Some(device),
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
