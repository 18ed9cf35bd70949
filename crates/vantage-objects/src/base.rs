//! Base field groups shared by every configuration object.

use vantage_command::CommandClient;
use vantage_common::{ClientError, ClientResult, Vid, XmlElement};

/// Fields present on every system object.
///
/// VID and master id arrive as XML attributes; the remaining fields are
/// child elements. `MTime` and `DName` are absent on 2.x firmware.
#[derive(Debug, Clone, Default)]
pub struct SystemObject {
    /// The controller-assigned unique id of this object.
    pub vid: Vid,
    /// VID of the Master (controller) that owns this object.
    pub master_vid: Vid,
    /// User-visible object name.
    pub name: String,
    /// Model string.
    pub model: String,
    /// Free-form note.
    pub note: String,
    /// Display name, when set.
    pub display_name: Option<String>,
    /// Last mutation timestamp, as reported by the controller.
    pub mtime: Option<String>,
    /// The command client used for interface invocations, attached when the
    /// object is added to a controller.
    pub command_client: Option<CommandClient>,
}

impl SystemObject {
    /// Decode the common fields from an object's XML element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        let vid = el
            .require_attribute("VID")?
            .parse()
            .map_err(|_| ClientError::Decode(format!("<{}> has a malformed VID", el.name)))?;
        let master_vid = el
            .attribute("Master")
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            vid,
            master_vid,
            name: el.child_text("Name").unwrap_or_default().to_string(),
            model: el.child_text("Model").unwrap_or_default().to_string(),
            note: el.child_text("Note").unwrap_or_default().to_string(),
            display_name: el
                .child_text("DName")
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            mtime: el.attribute("MTime").map(str::to_string),
            command_client: None,
        })
    }

    /// Overwrite configuration fields from a fresh copy, returning changed
    /// field names. The client attachment is preserved.
    pub fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.master_vid != new.master_vid {
            self.master_vid = new.master_vid;
            changed.push("master_vid");
        }
        if self.name != new.name {
            self.name = new.name;
            changed.push("name");
        }
        if self.model != new.model {
            self.model = new.model;
            changed.push("model");
        }
        if self.note != new.note {
            self.note = new.note;
            changed.push("note");
        }
        if self.display_name != new.display_name {
            self.display_name = new.display_name;
            changed.push("display_name");
        }
        if self.mtime != new.mtime {
            self.mtime = new.mtime;
            changed.push("mtime");
        }
        changed
    }
}

/// Fields of objects that live in an area.
///
/// Some objects on 2.x firmware carry neither an area nor a location.
#[derive(Debug, Clone, Default)]
pub struct LocationBase {
    /// Common object fields.
    pub system: SystemObject,
    /// VID of the containing area.
    pub area_vid: Option<Vid>,
    /// Location string.
    pub location: Option<String>,
}

impl LocationBase {
    /// Decode location-scoped fields from an object's XML element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            system: SystemObject::from_xml(el)?,
            area_vid: el.child_text("Area").and_then(|text| text.parse().ok()),
            location: el
                .child_text("Location")
                .filter(|text| !text.is_empty())
                .map(str::to_string),
        })
    }

    /// Overwrite configuration fields, returning changed field names.
    pub fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.system.apply_config(new.system);
        if self.area_vid != new.area_vid {
            self.area_vid = new.area_vid;
            changed.push("area_vid");
        }
        if self.location != new.location {
            self.location = new.location;
            changed.push("location");
        }
        changed
    }
}

/// Fields of station objects (keypads, relay stations, and similar devices
/// mounted on a station bus).
#[derive(Debug, Clone, Default)]
pub struct StationBase {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// Hardware serial number.
    pub serial_number: Option<String>,
    /// VID of the station bus this device hangs off.
    pub bus_vid: Option<Vid>,
}

impl StationBase {
    /// Decode station fields from an object's XML element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            serial_number: el
                .child_text("SerialNumber")
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            bus_vid: el.child_text("Bus").and_then(|text| text.parse().ok()),
        })
    }

    /// Overwrite configuration fields, returning changed field names.
    pub fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.serial_number != new.serial_number {
            self.serial_number = new.serial_number;
            changed.push("serial_number");
        }
        if self.bus_vid != new.bus_vid {
            self.bus_vid = new.bus_vid;
            changed.push("bus_vid");
        }
        changed
    }
}

/// A child object's relation to its parent device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parent {
    /// VID of the parent object.
    pub vid: Vid,
    /// Position of this child under the parent.
    pub position: u32,
}

impl Parent {
    /// Decode a `<Parent Position="…">vid</Parent>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        let vid = el
            .text
            .trim()
            .parse()
            .map_err(|_| ClientError::Decode("malformed <Parent> VID".into()))?;
        let position = el
            .attribute("Position")
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        Ok(Self { vid, position })
    }

    /// Decode the `<Parent>` child of an object element, when present.
    pub fn from_parent_of(el: &XmlElement) -> ClientResult<Option<Self>> {
        el.child("Parent").map(Self::from_xml).transpose()
    }
}

/// Access to the common fields of any object type.
pub trait VantageObject {
    /// The common system-object fields.
    fn base(&self) -> &SystemObject;
    /// Mutable access to the common system-object fields.
    fn base_mut(&mut self) -> &mut SystemObject;

    /// The object's VID.
    fn vid(&self) -> Vid {
        self.base().vid
    }

    /// The object's name.
    fn name(&self) -> &str {
        &self.base().name
    }

    /// Attach the command client used for interface invocations.
    fn attach(&mut self, client: CommandClient) {
        self.base_mut().command_client = Some(client);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_el() -> XmlElement {
        XmlElement::parse(
            r#"<Load VID="118" Master="1" MTime="2023-05-05T05:03:16.526">
                 <Name>Desk Lamp</Name><Model>M1</Model><Note>n</Note><DName/>
                 <Area>5</Area><Location>Office</Location>
                 <Parent Position="2">33</Parent>
               </Load>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_system_object_decode() {
        let object = SystemObject::from_xml(&load_el()).unwrap();
        assert_eq!(object.vid, 118);
        assert_eq!(object.master_vid, 1);
        assert_eq!(object.name, "Desk Lamp");
        assert_eq!(object.model, "M1");
        assert_eq!(object.display_name, None);
        assert_eq!(object.mtime.as_deref(), Some("2023-05-05T05:03:16.526"));
    }

    #[test]
    fn test_missing_vid_is_decode_error() {
        let el = XmlElement::parse("<Load><Name>x</Name></Load>").unwrap();
        assert!(SystemObject::from_xml(&el).is_err());
    }

    #[test]
    fn test_location_decode() {
        let location = LocationBase::from_xml(&load_el()).unwrap();
        assert_eq!(location.area_vid, Some(5));
        assert_eq!(location.location.as_deref(), Some("Office"));
    }

    #[test]
    fn test_parent_decode() {
        let parent = Parent::from_parent_of(&load_el()).unwrap().unwrap();
        assert_eq!(parent, Parent { vid: 33, position: 2 });
    }

    #[test]
    fn test_apply_config_reports_changes() {
        let mut object = SystemObject::from_xml(&load_el()).unwrap();
        let mut updated = object.clone();
        updated.name = "Floor Lamp".to_string();
        updated.note = "moved".to_string();

        let changed = object.apply_config(updated);
        assert_eq!(changed, vec!["name", "note"]);
        assert_eq!(object.name, "Floor Lamp");

        // A second identical application reports nothing
        let same = object.clone();
        assert!(object.apply_config(same).is_empty());
    }
}
