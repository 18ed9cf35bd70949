//! Color load objects (`Vantage.DGColorLoad`, `Vantage.DDGColorLoad`).

use crate::base::{LocationBase, Parent, SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::{ColorTemperatureInterface, LoadInterface, RGBLoadInterface};
use crate::StatefulObject;
use rust_decimal::Decimal;
use tracing::warn;
use vantage_command::StatusCategory;
use vantage_common::{parse_decimal, parse_fixed, parse_int, ClientError, ClientResult, XmlElement};

/// The wire tag a color load was configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RgbLoadKind {
    /// `Vantage.DGColorLoad`: a DMX gateway color load.
    #[default]
    DgColorLoad,
    /// `Vantage.DDGColorLoad`: a DMX/DALI gateway color load.
    DdgColorLoad,
}

/// The color model of a color load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorType {
    /// Red/green/blue.
    #[default]
    Rgb,
    /// Red/green/blue/white.
    Rgbw,
    /// Hue/saturation/lightness.
    Hsl,
    /// Hue/saturation/intensity/color-temperature.
    Hsic,
    /// Tunable white.
    Cct,
    /// A single color channel.
    ColorChannel,
}

impl ColorType {
    fn from_text(text: &str) -> ClientResult<Self> {
        match text {
            "RGB" => Ok(Self::Rgb),
            "RGBW" => Ok(Self::Rgbw),
            "HSL" => Ok(Self::Hsl),
            "HSIC" => Ok(Self::Hsic),
            "CCT" => Ok(Self::Cct),
            "Color Channel" | "ColorChannel" => Ok(Self::ColorChannel),
            other => Err(ClientError::Decode(format!(
                "unknown color type: {other:?}"
            ))),
        }
    }
}

/// A color-capable load behind a DMX or DMX/DALI gateway.
#[derive(Debug, Clone, Default)]
pub struct RgbLoad {
    /// Location-scoped fields.
    pub location: LocationBase,
    /// Which wire tag this load was configured with.
    pub kind: RgbLoadKind,
    /// The gateway this load hangs off.
    pub parent: Option<Parent>,
    /// The load's color model.
    pub color_type: ColorType,
    /// Minimum supported color temperature, in Kelvin.
    pub min_temp: Option<u32>,
    /// Maximum supported color temperature, in Kelvin.
    pub max_temp: Option<u32>,
    /// Current level percentage.
    pub level: Option<Decimal>,
    /// Current RGBW channel values.
    pub rgb: Option<[u8; 4]>,
    /// Current color temperature, in Kelvin.
    pub color_temp: Option<u32>,
}

impl RgbLoad {
    /// Decode a color load element of the given kind.
    pub fn from_xml(kind: RgbLoadKind, el: &XmlElement) -> ClientResult<Self> {
        let color_type = el
            .child_text("ColorType")
            .map(ColorType::from_text)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            location: LocationBase::from_xml(el)?,
            kind,
            parent: Parent::from_parent_of(el)?,
            color_type,
            min_temp: el.child_text("MinTemp").and_then(|text| text.parse().ok()),
            max_temp: el.child_text("MaxTemp").and_then(|text| text.parse().ok()),
            level: None,
            rgb: None,
            color_temp: None,
        })
    }

    /// Whether the load is on.
    pub fn is_on(&self) -> bool {
        self.level.is_some_and(|level| !level.is_zero())
    }

    /// Whether the load carries RGB-style color state.
    pub fn is_rgb(&self) -> bool {
        matches!(
            self.color_type,
            ColorType::Rgb | ColorType::Rgbw | ColorType::Hsl
        )
    }

    /// Whether the load is a tunable-white load.
    pub fn is_cct(&self) -> bool {
        self.color_type == ColorType::Cct
    }

    fn update_level(&mut self, level: Decimal) -> Vec<&'static str> {
        if self.level == Some(level) {
            Vec::new()
        } else {
            self.level = Some(level);
            vec!["level"]
        }
    }

    fn update_rgb(&mut self, rgb: [u8; 4]) -> Vec<&'static str> {
        if self.rgb == Some(rgb) {
            Vec::new()
        } else {
            self.rgb = Some(rgb);
            vec!["rgb"]
        }
    }

    fn update_color_temp(&mut self, kelvin: u32) -> Vec<&'static str> {
        if self.color_temp == Some(kelvin) {
            Vec::new()
        } else {
            self.color_temp = Some(kelvin);
            vec!["color_temp"]
        }
    }
}

impl VantageObject for RgbLoad {
    fn base(&self) -> &SystemObject {
        &self.location.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.location.system
    }
}

impl LoadInterface for RgbLoad {}
impl RGBLoadInterface for RgbLoad {}
impl ColorTemperatureInterface for RgbLoad {}

impl StatefulObject for RgbLoad {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::RgbLoad(load) => Some(load),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        let mut changed = self.location.apply_config(new.location);
        if self.parent != new.parent {
            self.parent = new.parent;
            changed.push("parent");
        }
        if self.color_type != new.color_type {
            self.color_type = new.color_type;
            changed.push("color_type");
        }
        if self.min_temp != new.min_temp {
            self.min_temp = new.min_temp;
            changed.push("min_temp");
        }
        if self.max_temp != new.max_temp {
            self.max_temp = new.max_temp;
            changed.push("max_temp");
        }
        changed
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let mut changed = Vec::new();

        let level = LoadInterface::get_level(self).await?;
        changed.extend(self.update_level(level));

        if self.is_rgb() {
            let rgb = self.get_color().await?;
            changed.extend(self.update_rgb(rgb));
        }
        if self.is_cct() {
            let kelvin = self.get_color_temp().await?;
            changed.extend(self.update_color_temp(kelvin));
        }

        Ok(changed)
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        match method {
            "Load.GetLevel" => match parse_fixed(result) {
                Ok(level) => self.update_level(level),
                Err(_) => Vec::new(),
            },
            "RGBLoad.GetColor" => {
                let Ok(packed) = parse_int(result) else {
                    warn!(vid = self.vid(), result, "malformed RGBLoad.GetColor status");
                    return Vec::new();
                };
                match i32::try_from(packed) {
                    Ok(packed) => self.update_rgb(packed.to_be_bytes()),
                    Err(_) => Vec::new(),
                }
            }
            "ColorTemperature.Get" => match result.parse() {
                Ok(kelvin) => self.update_color_temp(kelvin),
                Err(_) => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        if *category != StatusCategory::Load {
            return Vec::new();
        }
        match args.first().map(|arg| parse_decimal(arg)) {
            Some(Ok(level)) => self.update_level(level),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_load(color_type: &str) -> RgbLoad {
        let el = XmlElement::parse(&format!(
            r#"<Vantage.DGColorLoad VID="90" Master="1"><Name>Strip</Name>
                 <ColorType>{color_type}</ColorType>
                 <MinTemp>2700</MinTemp><MaxTemp>6500</MaxTemp>
               </Vantage.DGColorLoad>"#
        ))
        .unwrap();
        RgbLoad::from_xml(RgbLoadKind::DgColorLoad, &el).unwrap()
    }

    #[test]
    fn test_decode_color_types() {
        assert_eq!(color_load("RGB").color_type, ColorType::Rgb);
        assert_eq!(color_load("RGBW").color_type, ColorType::Rgbw);
        assert_eq!(color_load("CCT").color_type, ColorType::Cct);
        assert!(color_load("RGB").is_rgb());
        assert!(color_load("CCT").is_cct());
        assert_eq!(color_load("RGB").min_temp, Some(2700));
    }

    #[test]
    fn test_color_status_unpacks_channels() {
        let mut load = color_load("RGB");
        // 0x40FF7F00 -> (64, 255, 127, 0)
        let packed = i32::from_be_bytes([64, 255, 127, 0]);
        let changed = load.handle_object_status("RGBLoad.GetColor", &packed.to_string(), &[]);
        assert_eq!(changed, vec!["rgb"]);
        assert_eq!(load.rgb, Some([64, 255, 127, 0]));
    }

    #[test]
    fn test_color_temp_status() {
        let mut load = color_load("CCT");
        let changed = load.handle_object_status("ColorTemperature.Get", "3000", &[]);
        assert_eq!(changed, vec!["color_temp"]);
        assert_eq!(load.color_temp, Some(3000));
    }
}
