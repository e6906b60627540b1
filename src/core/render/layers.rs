//! Tile layer catalog and map legend
//!
//! Base layers are plain XYZ templates. Overlay layers are served by the
//! GIS tile service under `{tiles_base_url}/data/v1/gee/tiles/<dataset>`
//! and stack bottom to top in catalog order.

use crate::core::style::{AMBER, GREEN, RED};
use serde::Serialize;

/// Legend color of forest coverage layers
pub const FOREST_COLOR: &str = "#8fda54";

/// Legend color of deforestation layers
pub const DEFORESTATION_COLOR: &str = "#ff9900";

pub const DEFAULT_TILES_BASE_URL: &str = "https://gis-development.koltivaapi.com";

/// Background map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseLayer {
    pub key: &'static str,
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
}

pub static BASE_LAYERS: [BaseLayer; 3] = [
    BaseLayer {
        key: "osm",
        name: "OpenStreetMap",
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "© OpenStreetMap contributors",
    },
    BaseLayer {
        key: "satellite",
        name: "Satellite",
        url_template:
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        attribution: "© Esri",
    },
    BaseLayer {
        key: "terrain",
        name: "Terrain",
        url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "© OpenTopoMap contributors",
    },
];

/// Look up a base layer by key
pub fn base_layer(key: &str) -> Option<&'static BaseLayer> {
    BASE_LAYERS.iter().find(|layer| layer.key == key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerCategory {
    Forest,
    Deforestation,
}

impl LayerCategory {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Forest => FOREST_COLOR,
            Self::Deforestation => DEFORESTATION_COLOR,
        }
    }
}

/// Static description of a data overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlaySpec {
    pub key: &'static str,
    pub name: &'static str,
    /// Dataset segment of the tile path
    pub dataset: &'static str,
    /// Whether tiles are requested with `?style=green`
    pub green_style: bool,
    pub opacity: f64,
    pub z_index: u32,
    pub category: LayerCategory,
}

/// Overlays, bottom to top
pub static OVERLAYS: [OverlaySpec; 6] = [
    OverlaySpec {
        key: "eufo2020",
        name: "EUFO 2020",
        dataset: "eufo_2020",
        green_style: true,
        opacity: 0.8,
        z_index: 100,
        category: LayerCategory::Forest,
    },
    OverlaySpec {
        key: "gladPrimary",
        name: "GLAD Primary Loss 2021-2024",
        dataset: "gfc_loss_primary_2021_2024",
        green_style: false,
        opacity: 0.8,
        z_index: 101,
        category: LayerCategory::Deforestation,
    },
    OverlaySpec {
        key: "primaryForest2020",
        name: "Primary Forest 2020",
        dataset: "primary_forest_2020",
        green_style: true,
        opacity: 0.8,
        z_index: 102,
        category: LayerCategory::Forest,
    },
    OverlaySpec {
        key: "sbtnNaturalLands",
        name: "SBTN Natural Lands",
        dataset: "sbtn_natural_lands",
        green_style: true,
        opacity: 0.8,
        z_index: 103,
        category: LayerCategory::Forest,
    },
    OverlaySpec {
        key: "sbtnDeforestation",
        name: "SBTN Deforestation 2021-2024",
        dataset: "sbtn_deforestation",
        green_style: false,
        opacity: 0.9,
        z_index: 104,
        category: LayerCategory::Deforestation,
    },
    OverlaySpec {
        key: "jrcDeforestation",
        name: "JRC TMF Deforestation 2021-2024",
        dataset: "jrc_deforestation",
        green_style: false,
        opacity: 0.9,
        z_index: 105,
        category: LayerCategory::Deforestation,
    },
];

/// An overlay bound to a tile server
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayer {
    #[serde(flatten)]
    pub spec: OverlaySpec,
    pub url_template: String,
}

impl OverlayLayer {
    /// Concrete tile URL for `z/x/y`
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Overlay catalog for one tile server
#[derive(Debug, Clone)]
pub struct LayerCatalog {
    overlays: Vec<OverlayLayer>,
}

impl LayerCatalog {
    pub fn new(tiles_base_url: &str) -> Self {
        let base = tiles_base_url.trim_end_matches('/');
        let overlays = OVERLAYS
            .iter()
            .map(|spec| {
                let style = if spec.green_style { "?style=green" } else { "" };
                OverlayLayer {
                    spec: *spec,
                    url_template: format!(
                        "{base}/data/v1/gee/tiles/{}/{{z}}/{{x}}/{{y}}{style}",
                        spec.dataset
                    ),
                }
            })
            .collect();
        Self { overlays }
    }

    /// Overlays bottom to top
    pub fn overlays(&self) -> &[OverlayLayer] {
        &self.overlays
    }

    pub fn overlay(&self, key: &str) -> Option<&OverlayLayer> {
        self.overlays.iter().find(|o| o.spec.key == key)
    }
}

impl Default for LayerCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_TILES_BASE_URL)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSection {
    pub title: &'static str,
    pub items: Vec<LegendItem>,
}

/// Map legend: risk levels, then deforestation and forest layers
pub fn legend() -> Vec<LegendSection> {
    let layers = |category: LayerCategory| -> Vec<LegendItem> {
        OVERLAYS
            .iter()
            .rev()
            .filter(|o| o.category == category)
            .map(|o| LegendItem {
                label: o.name,
                color: category.color(),
            })
            .collect()
    };

    vec![
        LegendSection {
            title: "Risk Levels",
            items: vec![
                LegendItem { label: "High Risk", color: RED },
                LegendItem { label: "Medium Risk", color: AMBER },
                LegendItem { label: "Low Risk", color: GREEN },
            ],
        },
        LegendSection {
            title: "Deforestation Data",
            items: layers(LayerCategory::Deforestation),
        },
        LegendSection {
            title: "Forest Coverage",
            items: layers(LayerCategory::Forest),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_order_and_z_index() {
        let catalog = LayerCatalog::default();
        let keys: Vec<_> = catalog.overlays().iter().map(|o| o.spec.key).collect();
        assert_eq!(
            keys,
            [
                "eufo2020",
                "gladPrimary",
                "primaryForest2020",
                "sbtnNaturalLands",
                "sbtnDeforestation",
                "jrcDeforestation"
            ]
        );
        let z: Vec<_> = catalog.overlays().iter().map(|o| o.spec.z_index).collect();
        assert_eq!(z, [100, 101, 102, 103, 104, 105]);
    }

    #[test]
    fn test_tile_urls() {
        let catalog = LayerCatalog::new("https://tiles.example.org/");

        let eufo = catalog.overlay("eufo2020").unwrap();
        assert_eq!(
            eufo.tile_url(8, 205, 128),
            "https://tiles.example.org/data/v1/gee/tiles/eufo_2020/8/205/128?style=green"
        );

        let jrc = catalog.overlay("jrcDeforestation").unwrap();
        assert_eq!(
            jrc.tile_url(3, 1, 2),
            "https://tiles.example.org/data/v1/gee/tiles/jrc_deforestation/3/1/2"
        );
        assert_eq!(jrc.spec.opacity, 0.9);
    }

    #[test]
    fn test_unknown_overlay() {
        assert!(LayerCatalog::default().overlay("nope").is_none());
    }

    #[test]
    fn test_base_layers() {
        assert_eq!(BASE_LAYERS.len(), 3);
        assert!(base_layer("satellite").unwrap().url_template.contains("World_Imagery"));
        assert!(base_layer("roads").is_none());
    }

    #[test]
    fn test_legend_sections() {
        let legend = legend();
        assert_eq!(legend.len(), 3);
        assert_eq!(legend[0].items[0].color, RED);
        assert_eq!(legend[1].items.len(), 3);
        assert_eq!(legend[1].items[0].label, "JRC TMF Deforestation 2021-2024");
        assert!(legend[1].items.iter().all(|i| i.color == DEFORESTATION_COLOR));
        assert!(legend[2].items.iter().all(|i| i.color == FOREST_COLOR));
    }
}
