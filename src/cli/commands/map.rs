//! Map and layers commands
//!
//! `map` renders the stored analysis as a styled GeoJSON overlay;
//! `layers` lists the tile layers and the legend.

use crate::cli::context::{fail, CommandContext, EXIT_CONFIG, EXIT_OK};
use crate::core::render::layers::{base_layer, BASE_LAYERS};
use crate::core::render::{legend, LayerCatalog, MapOverlay};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the map command
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Write the overlay to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Zoom level used for marker sizes
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=22))]
    pub zoom: Option<u8>,
}

impl MapArgs {
    /// Execute the map command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        let stored = match ctx.state.load_analysis() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                eprintln!("❌ No analysis data available for the map");
                return Ok(EXIT_CONFIG);
            }
            Err(e) => return Ok(fail(&e, "Failed to read stored results")),
        };

        let mut options = ctx.map_options();
        if let Some(zoom) = self.zoom {
            options.zoom = zoom;
        }

        let overlay = MapOverlay::build(&stored.payload.features(), options);
        let rendered = serde_json::to_string_pretty(&overlay.to_geojson())?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered)?;
                let [lat, lng] = overlay.center();
                println!("🗺️  {}", overlay.title);
                println!("  Markers: {}", overlay.marker_count());
                println!("  Center: {lat:.5}, {lng:.5} (zoom {})", options.zoom);
                println!("  Written to {}", path.display());
            }
            None => println!("{rendered}"),
        }

        Ok(EXIT_OK)
    }
}

/// Arguments for the layers command
#[derive(Args, Debug)]
pub struct LayersArgs {
    /// Show tile URLs for this z/x/y instead of templates
    #[arg(long, num_args = 3, value_names = ["Z", "X", "Y"])]
    pub tile: Option<Vec<u32>>,

    /// Show the base layer with this key only
    #[arg(long)]
    pub base: Option<String>,
}

impl LayersArgs {
    /// Execute the layers command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        println!("Base layers:");
        let bases: Vec<_> = match &self.base {
            Some(key) => match base_layer(key) {
                Some(layer) => vec![layer],
                None => {
                    eprintln!("❌ Unknown base layer: {key}");
                    return Ok(EXIT_CONFIG);
                }
            },
            None => BASE_LAYERS.iter().collect(),
        };
        for layer in bases {
            println!("  {:<10} {:<14} {}", layer.key, layer.name, layer.url_template);
        }

        println!();
        println!("Overlays (bottom to top):");
        let catalog = LayerCatalog::new(&ctx.config.api.tiles_base_url);
        for overlay in catalog.overlays() {
            let url = match self.tile.as_deref() {
                Some([z, x, y]) => overlay.tile_url(*z, *x, *y),
                _ => overlay.url_template.clone(),
            };
            println!(
                "  {:<18} z={} opacity={} {}",
                overlay.spec.key, overlay.spec.z_index, overlay.spec.opacity, url
            );
        }

        println!();
        for section in legend() {
            println!("{}:", section.title);
            for item in section.items {
                println!("  {} {}", item.color, item.label);
            }
        }

        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct MapHarness {
        #[command(flatten)]
        args: MapArgs,
    }

    #[derive(Parser)]
    struct LayersHarness {
        #[command(flatten)]
        args: LayersArgs,
    }

    #[test]
    fn test_map_args() {
        let h = MapHarness::parse_from(["map", "--zoom", "12", "-o", "overlay.geojson"]);
        assert_eq!(h.args.zoom, Some(12));
        assert_eq!(h.args.output, Some(PathBuf::from("overlay.geojson")));
        assert!(MapHarness::try_parse_from(["map", "--zoom", "30"]).is_err());
    }

    #[test]
    fn test_layers_tile_args() {
        let h = LayersHarness::parse_from(["layers", "--tile", "8", "200", "130"]);
        assert_eq!(h.args.tile, Some(vec![8, 200, 130]));
    }

    #[tokio::test]
    async fn test_map_without_results() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("whisp.toml");
        std::fs::write(
            &config,
            format!(
                "[state]\npath = {:?}\n",
                dir.path().join("state.json").to_string_lossy()
            ),
        )
        .unwrap();

        let args = MapArgs {
            output: None,
            zoom: None,
        };
        assert_eq!(args.execute(&config.to_string_lossy()).await.unwrap(), 2);
    }
}
