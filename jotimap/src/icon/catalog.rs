use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::IconConfig;
use crate::icon::{Area, IconGeometry, MarkerColor, SizeTier, Style};
use crate::registry::EntityKind;

/// Everything a surface needs to draw a marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    /// Style the icon was resolved from.
    pub style: Style,
    /// Kind of the entity shown by the marker.
    pub kind: EntityKind,
    /// Icon and shadow dimensions, already scaled for the size tier.
    pub geometry: IconGeometry,
    /// Marker image url.
    pub icon_url: String,
    /// Shadow image url.
    pub shadow_url: String,
}

/// Lookup from an entity's area and emphasis to the way its marker looks.
///
/// | Area    | Color  |
/// |---------|--------|
/// | Alpha   | violet |
/// | Bravo   | red    |
/// | Charlie | yellow |
/// | Delta   | green  |
/// | Echo    | blue   |
/// | Foxtrot | orange |
/// | none    | grey   |
///
/// Emphasis only changes the size tier, never the color. The table is fixed; only the image urls
/// are configurable (see [`IconConfig`]).
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    config: IconConfig,
}

impl IconCatalog {
    /// Creates a catalog producing icons with the given image urls.
    pub fn new(config: IconConfig) -> Self {
        Self { config }
    }

    /// Color of the given area.
    pub fn color_for(&self, area: Option<Area>) -> MarkerColor {
        match area {
            Some(Area::Alpha) => MarkerColor::Violet,
            Some(Area::Bravo) => MarkerColor::Red,
            Some(Area::Charlie) => MarkerColor::Yellow,
            Some(Area::Delta) => MarkerColor::Green,
            Some(Area::Echo) => MarkerColor::Blue,
            Some(Area::Foxtrot) => MarkerColor::Orange,
            None => MarkerColor::FALLBACK,
        }
    }

    /// Style of an entity in the given area.
    pub fn style_for(&self, area: Option<Area>, emphasis: bool) -> Style {
        Style {
            color: self.color_for(area),
            size: SizeTier::for_emphasis(emphasis),
        }
    }

    /// Resolves the concrete icon for an entity of the given kind.
    pub fn icon_for(&self, kind: EntityKind, style: Style) -> Icon {
        let mut vars = HashMap::new();
        vars.insert("color".to_string(), style.color.name().to_string());
        vars.insert("kind".to_string(), kind.name().to_string());

        Icon {
            style,
            kind,
            geometry: IconGeometry::BASE.scaled(style.size.scale()),
            icon_url: format_url(&self.config.icon_url_template, &vars),
            shadow_url: format_url(&self.config.shadow_url, &vars),
        }
    }
}

fn format_url(template: &str, vars: &HashMap<String, String>) -> String {
    match strfmt::strfmt(template, vars) {
        Ok(url) => url,
        Err(err) => {
            log::warn!("Failed to format icon url template {template}: {err}");
            template.to_string()
        }
    }
}
