//! Blind objects: QIS/Qube/relay blinds and Somfy shade children.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::{BlindInterface, BlindMotion};
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_decimal, parse_fixed, ClientResult, XmlElement};

/// The wire tag a blind was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlindKind {
    /// `QISBlind`: a QIS intelligent shade.
    #[default]
    Qis,
    /// `QubeBlind`: a Qube shade.
    Qube,
    /// `RelayBlind`: a dumb blind driven by two relays.
    Relay,
    /// `Somfy.RS-485_Shade_CHILD`: a Somfy SDN shade.
    SomfyRs485Shade,
    /// `Somfy.URTSI_2_Shade_CHILD`: a Somfy URTSI II shade.
    SomfyUrtsi2Shade,
}

/// A single blind or shade.
#[derive(Debug, Clone, Default)]
pub struct Blind {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// Which wire tag this blind was configured with.
    pub kind: BlindKind,
    /// The driving station or port device, for child blinds.
    pub parent: Option<Parent>,
    /// Shade orientation attribute, when configured.
    pub shade_orientation: Option<String>,
    /// Shade type attribute, when configured.
    pub shade_type: Option<String>,
    /// Current position percentage. `None` until first fetched.
    pub position: Option<Decimal>,
    /// Current motion, when the blind is travelling.
    pub motion: Option<BlindMotion>,
}

impl Blind {
    /// Decode a blind element of the given kind.
    pub fn from_xml(kind: BlindKind, el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            location: LocationBase::from_xml(el)?,
            kind,
            parent: Parent::from_parent_of(el)?,
            shade_orientation: el.attribute("ShadeOrientation").map(str::to_string),
            shade_type: el.attribute("ShadeType").map(str::to_string),
            position: None,
            motion: None,
        })
    }

    fn update_position(&mut self, position: Decimal) -> Vec<&'static str> {
        if self.position == Some(position) {
            Vec::new()
        } else {
            self.position = Some(position);
            vec!["position"]
        }
    }

    fn update_motion(&mut self, motion: BlindMotion) -> Vec<&'static str> {
        if self.motion.as_ref() == Some(&motion) {
            Vec::new()
        } else {
            self.motion = Some(motion);
            vec!["motion"]
        }
    }
}

impl VantageObject for Blind {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl BlindInterface for Blind {}

impl StatefulObject for Blind {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Blind(blind) => Some(blind),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        if self.shade_orientation != new.shade_orientation {
            self.shade_orientation = new.shade_orientation;
            changed.push("shade_orientation");
        }
        if self.shade_type != new.shade_type {
            self.shade_type = new.shade_type;
            changed.push("shade_type");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let mut changed = Vec::new();

        let position = self.get_position().await?;
        changed.extend(self.update_position(position));

        let motion = self.get_blind_state().await?;
        changed.extend(self.update_motion(motion));

        Ok(changed)
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        args: &[String],
    ) -> Vec<&'static str> {
        match method {
            // EL: <vid> Blind.GetPosition <position (0-100000)>
            "Blind.GetPosition" => match parse_fixed(result) {
                Ok(position) => self.update_position(position),
                Err(_) => Vec::new(),
            },
            // EL: <vid> Blind.GetBlindState <moving> <start> <end>
            //     <transitionTime> <startTime>
            "Blind.GetBlindState" => {
                let mut state_args = Vec::with_capacity(args.len() + 1);
                state_args.push(result.to_string());
                state_args.extend(args.iter().cloned());
                match BlindMotion::from_args(&state_args) {
                    Ok(motion) => self.update_motion(motion),
                    Err(_) => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        // S:BLIND <vid> <position (0-100.000)>
        if *category != StatusCategory::Blind {
            return Vec::new();
        }
        match args.first().map(|arg| parse_decimal(arg)) {
            Some(Ok(position)) => self.update_position(position),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn blind() -> Blind {
        let el = XmlElement::parse(
            r#"<QISBlind VID="12" Master="1" ShadeOrientation="Vertical" ShadeType="Roller">
                 <Name>Office Shade</Name><Area>3</Area>
               </QISBlind>"#,
        )
        .unwrap();
        Blind::from_xml(BlindKind::Qis, &el).unwrap()
    }

    #[test]
    fn test_decode() {
        let blind = blind();
        assert_eq!(blind.kind, BlindKind::Qis);
        assert_eq!(blind.shade_orientation.as_deref(), Some("Vertical"));
        assert_eq!(blind.shade_type.as_deref(), Some("Roller"));
    }

    #[test]
    fn test_category_status_updates_position() {
        let mut blind = blind();
        let changed =
            blind.handle_category_status(&StatusCategory::Blind, &["25.000".to_string()]);
        assert_eq!(changed, vec!["position"]);
        assert_eq!(blind.position, Some(Decimal::from_str("25").unwrap()));
    }

    #[test]
    fn test_blind_state_status() {
        let mut blind = blind();
        let args: Vec<String> = ["0", "100000", "5000", "43200000"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let changed = blind.handle_object_status("Blind.GetBlindState", "1", &args);
        assert_eq!(changed, vec!["motion"]);
        let motion = blind.motion.unwrap();
        assert!(motion.is_moving);
        assert_eq!(motion.end_pos, Decimal::from_str("100").unwrap());
    }
}
