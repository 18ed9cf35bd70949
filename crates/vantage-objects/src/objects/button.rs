//! Keypad button objects.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::button::{parse_button_event, parse_button_state};
use crate::interfaces::ButtonInterface;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{ClientResult, XmlElement};

/// A physical button on a keypad or remote station.
#[derive(Debug, Clone, Default)]
pub struct Button {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// The station this button belongs to.
    pub parent: Option<Parent>,
    /// First engraving line.
    pub text1: String,
    /// Second engraving line.
    pub text2: String,
    /// Whether the button is currently pressed.
    pub pressed: Option<bool>,
}

impl Button {
    /// Decode a `<Button>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            parent: Parent::from_parent_of(el)?,
            text1: el.child_text("Text1").unwrap_or_default().to_string(),
            text2: el.child_text("Text2").unwrap_or_default().to_string(),
            pressed: None,
        })
    }

    /// The button's engraving, joining both text lines.
    pub fn text(&self) -> String {
        if self.text2.is_empty() {
            self.text1.clone()
        } else {
            format!("{} {}", self.text1, self.text2)
        }
    }

    fn update_pressed(&mut self, pressed: bool) -> Vec<&'static str> {
        if self.pressed == Some(pressed) {
            Vec::new()
        } else {
            self.pressed = Some(pressed);
            vec!["pressed"]
        }
    }
}

impl VantageObject for Button {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl ButtonInterface for Button {}

impl StatefulObject for Button {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Button(button) => Some(button),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        if self.text1 != new.text1 {
            self.text1 = new.text1;
            changed.push("text1");
        }
        if self.text2 != new.text2 {
            self.text2 = new.text2;
            changed.push("text2");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let pressed = self.get_state().await?;
        Ok(self.update_pressed(pressed))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        // EL: <vid> Button.GetState <state (0/1)>
        if method != "Button.GetState" {
            return Vec::new();
        }
        match parse_button_state(result) {
            Ok(pressed) => self.update_pressed(pressed),
            Err(_) => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        // S:BTN <vid> <PRESS/RELEASE>
        if *category != StatusCategory::Btn {
            return Vec::new();
        }
        match args.first().map(|arg| parse_button_event(arg)) {
            Some(Ok(pressed)) => self.update_pressed(pressed),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button {
        let el = XmlElement::parse(
            r#"<Button VID="201" Master="1"><Name>B1</Name>
                 <Text1>All</Text1><Text2>Off</Text2>
                 <Parent Position="1">200</Parent>
               </Button>"#,
        )
        .unwrap();
        Button::from_xml(&el).unwrap()
    }

    #[test]
    fn test_decode_and_text() {
        let button = button();
        assert_eq!(button.text(), "All Off");
        assert_eq!(button.parent.as_ref().unwrap().vid, 200);
    }

    #[test]
    fn test_press_release_cycle() {
        let mut button = button();
        assert_eq!(
            button.handle_category_status(&StatusCategory::Btn, &["PRESS".to_string()]),
            vec!["pressed"]
        );
        assert_eq!(button.pressed, Some(true));
        assert_eq!(
            button.handle_category_status(&StatusCategory::Btn, &["RELEASE".to_string()]),
            vec!["pressed"]
        );
        assert_eq!(button.pressed, Some(false));
    }
}
