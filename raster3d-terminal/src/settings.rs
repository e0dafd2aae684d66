/// Runtime settings for the terminal viewer, with command line overrides
use clap::Parser;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "raster3d-terminal", version, about = "Software 3D rasterizer in the terminal", long_about = None)]
pub struct Arguments {
    /// OBJ file to display instead of the built-in cube
    #[arg(value_hint = clap::ValueHint::FilePath)]
    mesh: Option<PathBuf>,

    /// Field of view in degrees
    #[arg(long)]
    fov: Option<f64>,

    /// Near clipping distance
    #[arg(long, value_parser = parse_positive)]
    near: Option<f64>,

    /// Far clipping distance
    #[arg(long, value_parser = parse_positive)]
    far: Option<f64>,

    /// Camera movement per key press
    #[arg(long)]
    speed: Option<f64>,

    /// Mesh spin in degrees per frame
    #[arg(long)]
    spin: Option<f64>,

    /// Background color as ARGB hex, e.g. FF202020
    #[arg(long, value_parser = parse_color)]
    background: Option<u32>,
}

impl Arguments {
    pub(crate) fn update_settings(self, settings: &mut Settings) {
        if let Some(mesh) = self.mesh {
            settings.mesh = Some(mesh);
        }
        if let Some(fov) = self.fov {
            settings.fov = fov;
        }
        if let Some(near) = self.near {
            settings.near_clipping = near;
        }
        if let Some(far) = self.far {
            settings.far_clipping = far;
        }
        if let Some(speed) = self.speed {
            settings.move_speed = speed;
        }
        if let Some(spin) = self.spin {
            settings.spin = spin;
        }
        if let Some(background) = self.background {
            settings.background = background;
        }
    }
}

fn parse_positive(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(value) if value > 0.0 => Ok(value),
        Ok(value) => Err(format!("{value} is not positive")),
        Err(e) => Err(format!("{e}")),
    }
}

fn parse_color(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches('#');
    u32::from_str_radix(digits, 16).map_err(|e| format!("{e}"))
}

/// Everything the viewer can be configured with
#[derive(Debug, Clone)]
pub struct Settings {
    pub mesh: Option<PathBuf>,
    pub fov: f64,
    pub near_clipping: f64,
    pub far_clipping: f64,
    /// Distance in front of the camera the mesh is placed at
    pub mesh_distance: f64,
    pub move_speed: f64,
    /// Degrees per key press
    pub turn_speed: f64,
    pub spin: f64,
    pub background: u32,
}

impl Settings {
    #[must_use]
    pub fn init() -> Self {
        let mut settings = Self::default();
        Arguments::parse().update_settings(&mut settings);
        settings
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mesh: None,
            fov: 90.0,
            near_clipping: 0.1,
            far_clipping: 500.0,
            mesh_distance: 5.0,
            move_speed: 0.2,
            turn_speed: 2.0,
            spin: 1.0,
            background: 0xFF00_0000,
        }
    }
}
