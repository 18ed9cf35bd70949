//! Master objects: the InFusion controllers themselves.

use crate::base::{SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::{FirmwareImage, IntrospectionInterface};
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// An InFusion controller.
#[derive(Debug, Clone, Default)]
pub struct Master {
    /// Common object fields.
    pub system: SystemObject,
    /// Number of output modules attached to this controller.
    pub module_count: Option<u32>,
    /// Hardware serial number.
    pub serial_number: Option<String>,
    /// Application firmware version, fetched at runtime.
    pub firmware_version: Option<String>,
}

impl Master {
    /// Decode a `<Master>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            system: SystemObject::from_xml(el)?,
            module_count: el
                .child_text("ModuleCount")
                .and_then(|text| text.parse().ok()),
            serial_number: el
                .child_text("SerialNumber")
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            firmware_version: None,
        })
    }
}

impl VantageObject for Master {
    fn base(&self) -> &SystemObject {
        &self.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.system
    }
}

impl IntrospectionInterface for Master {}

impl StatefulObject for Master {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Master(master) => Some(master),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.system.apply_config(new.system);
        if self.module_count != new.module_count {
            self.module_count = new.module_count;
            changed.push("module_count");
        }
        if self.serial_number != new.serial_number {
            self.serial_number = new.serial_number;
            changed.push("serial_number");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let version = self
            .get_firmware_version(FirmwareImage::Application)
            .await?;
        if self.firmware_version.as_deref() == Some(&version) {
            Ok(Vec::new())
        } else {
            self.firmware_version = Some(version);
            Ok(vec!["firmware_version"])
        }
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
