//! Blind group objects.

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::BlindInterface;
use crate::StatefulObject;
use rust_decimal::Decimal;
use vantage_command::StatusCategory;
use vantage_common::{parse_decimal, parse_fixed, ClientResult, Vid, XmlElement};

/// The wire tag a blind group was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlindGroupKind {
    /// `BlindGroup`: a plain group with an explicit member table.
    #[default]
    Group,
    /// `Somfy.RS-485_Group_CHILD`: a Somfy SDN group.
    SomfyRs485Group,
    /// `Somfy.URTSI_2_Group_CHILD`: a Somfy URTSI II group.
    SomfyUrtsi2Group,
}

/// A group of blinds moved together.
#[derive(Debug, Clone, Default)]
pub struct BlindGroup {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// Which wire tag this group was configured with.
    pub kind: BlindGroupKind,
    /// The driving port device, for Somfy groups.
    pub parent: Option<Parent>,
    /// VIDs of the member blinds (plain groups only; Somfy groups are
    /// addressed by the motor network).
    pub blind_table: Vec<Vid>,
    /// Current group position percentage.
    pub position: Option<Decimal>,
}

impl BlindGroup {
    /// Decode a blind-group element of the given kind.
    pub fn from_xml(kind: BlindGroupKind, el: &XmlElement) -> ClientResult<Self> {
        let blind_table = el
            .child("BlindTable")
            .map(|table| {
                table
                    .children_named("Blind")
                    .filter_map(|entry| entry.text.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            location: LocationBase::from_xml(el)?,
            kind,
            parent: Parent::from_parent_of(el)?,
            blind_table,
            position: None,
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
}

impl VantageObject for BlindGroup {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl BlindInterface for BlindGroup {}

impl StatefulObject for BlindGroup {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::BlindGroup(group) => Some(group),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        if self.blind_table != new.blind_table {
            self.blind_table = new.blind_table;
            changed.push("blind_table");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let position = self.get_position().await?;
        Ok(self.update_position(position))
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        if method != "Blind.GetPosition" {
            return Vec::new();
        }
        match parse_fixed(result) {
            Ok(position) => self.update_position(position),
            Err(_) => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        if *category != StatusCategory::Blind {
            return Vec::new();
        }
        match args.first().map(|arg| parse_decimal(arg)) {
            Some(Ok(position)) => self.update_position(position),
            _ => Vec::new(),
        }
    }
}
