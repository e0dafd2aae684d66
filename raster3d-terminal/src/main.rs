/// raster3d terminal viewer
///
/// Shows a spinning mesh (the built-in cube, or an OBJ file given on the
/// command line) rendered by the software rasterizer.
/// Controls:
///   - WASD: Move the camera up/left/down/right
///   - R/F: Move the camera forward/back
///   - Arrow Keys: Turn the camera
///   - Q/E: Roll the camera
///   - T: Toggle the rasterizer trace overlay
///   - ESC: Quit

use raster3d_core::{load_obj, Mesh};
use raster3d_terminal::{Settings, TerminalApp};
use std::io;

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::init();

    let mesh = match &settings.mesh {
        Some(path) => {
            println!("Loading mesh: {}", path.display());
            load_obj(path).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        None => Mesh::cube(2.0),
    };
    println!("Rendering {} triangles (press Esc to quit)...", mesh.triangles.len());
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(mesh, settings)?;
    app.run()?;

    Ok(())
}
