//! GMem objects: the controller's global-memory variables.

use crate::base::{SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::GMemInterface;
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_string, ClientResult, XmlElement};

/// A decoded GMem value, typed by the variable's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GMemValue {
    /// An integer-family variable.
    Int(i64),
    /// A fixed-point variable (stored in thousandths on the wire).
    Fixed(Decimal),
    /// A boolean variable.
    Bool(bool),
    /// A text variable.
    Str(String),
}

/// A GMem (variable) object.
#[derive(Debug, Clone, Default)]
pub struct GMem {
    /// Common object fields.
    pub system: SystemObject,
    /// Variable category number.
    pub category: Option<u32>,
    /// Whether the variable survives controller restarts.
    pub persistent: bool,
    /// The variable's tag type, e.g. `"bool"`, `"Text"`, `"Number"`.
    pub tag_type: String,
    /// Whether the variable holds an object VID.
    pub tag_is_object: bool,
    /// Whether the variable holds a fixed-point value.
    pub data_is_fixed: bool,
    /// Last seen value.
    pub value: Option<GMemValue>,
}

fn xml_bool(text: &str) -> bool {
    matches!(text, "true" | "True" | "1")
}

impl GMem {
    /// Decode a `<GMem>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        let tag = el.child("Tag");
        Ok(Self {
            system: SystemObject::from_xml(el)?,
            category: el.child_text("Category").and_then(|text| text.parse().ok()),
            persistent: el.child_text("Persistent").map_or(true, xml_bool),
            tag_type: tag.map(|tag| tag.text.trim().to_string()).unwrap_or_default(),
            tag_is_object: tag
                .and_then(|tag| tag.attribute("object"))
                .is_some_and(xml_bool),
            data_is_fixed: el
                .child("data")
                .and_then(|data| data.attribute("fixed"))
                .is_some_and(xml_bool),
            value: None,
        })
    }

    /// Whether the variable is boolean typed.
    pub fn is_bool(&self) -> bool {
        self.tag_type == "bool"
    }

    /// Whether the variable is text typed.
    pub fn is_str(&self) -> bool {
        self.tag_type == "Text"
    }

    /// Whether the variable is integer typed.
    pub fn is_int(&self) -> bool {
        matches!(
            self.tag_type.as_str(),
            "Delay" | "DeviceUnits" | "Level" | "Load" | "Number" | "Seconds" | "Task" | "DegC"
        )
    }

    /// Whether the variable holds an object VID.
    pub fn is_object_id(&self) -> bool {
        self.tag_is_object
    }

    /// Whether the variable is a fixed-point number.
    pub fn is_fixed(&self) -> bool {
        self.data_is_fixed
    }

    /// Decode a raw wire value according to the variable's tag.
    pub fn decode_value(&self, raw: &str) -> Option<GMemValue> {
        if self.is_bool() {
            raw.parse::<i64>().ok().map(|value| GMemValue::Bool(value != 0))
        } else if self.is_str() {
            Some(GMemValue::Str(parse_string(raw)))
        } else if self.is_fixed() {
            raw.parse::<i64>()
                .ok()
                .map(|value| GMemValue::Fixed(Decimal::new(value, 3)))
        } else {
            raw.parse::<i64>().ok().map(GMemValue::Int)
        }
    }

    fn update_value(&mut self, value: GMemValue) -> Vec<&'static str> {
        if self.value.as_ref() == Some(&value) {
            Vec::new()
        } else {
            self.value = Some(value);
            vec!["value"]
        }
    }
}

impl VantageObject for GMem {
    fn base(&self) -> &SystemObject {
        &self.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.system
    }
}

impl GMemInterface for GMem {}

impl StatefulObject for GMem {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::GMem(gmem) => Some(gmem),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.system.apply_config(new.system);
        if self.category != new.category {
            self.category = new.category;
            changed.push("category");
        }
        if self.persistent != new.persistent {
            self.persistent = new.persistent;
            changed.push("persistent");
        }
        if self.tag_type != new.tag_type {
            self.tag_type = new.tag_type;
            changed.push("tag_type");
        }
        if self.tag_is_object != new.tag_is_object {
            self.tag_is_object = new.tag_is_object;
            changed.push("tag_is_object");
        }
        if self.data_is_fixed != new.data_is_fixed {
            self.data_is_fixed = new.data_is_fixed;
            changed.push("data_is_fixed");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let raw = self.get_value().await?;
        Ok(match self.decode_value(&raw) {
            Some(value) => self.update_value(value),
            None => Vec::new(),
        })
    }

    fn handle_object_status(
        &mut self,
        _method: &str,
        _result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        // GMem state only arrives via the VARIABLE category
        Vec::new()
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        // S:VARIABLE <vid> <value>
        if *category != StatusCategory::Variable {
            return Vec::new();
        }
        match args.first().and_then(|raw| self.decode_value(raw)) {
            Some(value) => self.update_value(value),
            None => Vec::new(),
        }
    }
}
