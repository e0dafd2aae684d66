/// Terminal front end for the raster3d software rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Point3;
use raster3d_core::{FrameTrace, Mesh, RasterLayer};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;
pub mod settings;

pub use renderer::HalfBlockRenderer;
pub use settings::Settings;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    layer: RasterLayer,
    renderer: HalfBlockRenderer,
    settings: Settings,
    trace: FrameTrace,
    show_trace: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    clear_time: f64,
    render_time: f64,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, settings: Settings) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self::with_size(mesh, settings, columns, rows))
    }

    /// Build the app for a terminal of `columns` x `rows` cells
    pub fn with_size(mut mesh: Mesh, settings: Settings, columns: u16, rows: u16) -> Self {
        let renderer = HalfBlockRenderer::new(columns, rows);
        let (width, height) = renderer.raster_size();

        let mut layer = RasterLayer::new(
            width,
            height,
            settings.fov,
            settings.far_clipping,
            settings.near_clipping,
        );
        mesh.position = Point3::new(0.0, 0.0, settings.mesh_distance);
        layer.meshes.push(mesh);

        Self {
            layer,
            renderer,
            settings,
            trace: FrameTrace::new(),
            show_trace: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            clear_time: 0.0,
            render_time: 0.0,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30);

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.update();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(columns, rows) => self.resize(columns, rows),
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let speed = self.settings.move_speed;
        let turn = self.settings.turn_speed;
        let camera = &mut self.layer.camera;

        match code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('w') => camera.position.y += speed,
            KeyCode::Char('s') => camera.position.y -= speed,
            KeyCode::Char('a') => camera.position.x -= speed,
            KeyCode::Char('d') => camera.position.x += speed,
            KeyCode::Char('r') => camera.position.z += speed,
            KeyCode::Char('f') => camera.position.z -= speed,
            KeyCode::Left => camera.rotation.rotate(-turn, 0.0, 0.0),
            KeyCode::Right => camera.rotation.rotate(turn, 0.0, 0.0),
            KeyCode::Up => camera.rotation.rotate(0.0, turn, 0.0),
            KeyCode::Down => camera.rotation.rotate(0.0, -turn, 0.0),
            KeyCode::Char('q') => camera.rotation.rotate(0.0, 0.0, -turn),
            KeyCode::Char('e') => camera.rotation.rotate(0.0, 0.0, turn),
            KeyCode::Char('t') => self.show_trace = !self.show_trace,
            _ => {}
        }
    }

    /// The layer has a fixed size, so a resize builds a new one around
    /// the same camera and meshes.
    fn resize(&mut self, columns: u16, rows: u16) {
        self.renderer = HalfBlockRenderer::new(columns, rows);
        let (width, height) = self.renderer.raster_size();
        if width == 0 || height == 0 {
            return;
        }
        log::debug!("resizing raster to {width}x{height}");

        let mut layer = RasterLayer::with_projection(width, height, *self.layer.projection());
        layer.camera = self.layer.camera;
        layer.meshes = std::mem::take(&mut self.layer.meshes);
        self.layer = layer;
    }

    fn update(&mut self) {
        // Continuous slow rotation for demo effect
        for mesh in &mut self.layer.meshes {
            mesh.rotation.rotate(self.settings.spin, self.settings.spin * 0.5, 0.0);
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.clear_time = self.layer.clear(self.settings.background);
        self.render_time = self.layer.render_traced(&mut self.trace);

        let mut stdout = stdout();
        self.renderer.draw(self.layer.color_buffer(), &mut stdout)?;

        // Draw UI overlay
        for (row, line) in self.overlay_lines().iter().enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(0, row as u16),
                SetForegroundColor(Color::Yellow),
                SetBackgroundColor(Color::Black),
                Print(line),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }

    fn overlay_lines(&self) -> Vec<String> {
        let camera = &self.layer.camera;
        let mut lines = vec![
            format!(
                "raster3d | FPS: {:.1} | clear {:.2} ms render {:.2} ms | WASD/RF=Move Arrows/QE=Turn T=Trace Esc=Quit",
                self.fps,
                self.clear_time * 1000.0,
                self.render_time * 1000.0
            ),
            format!(
                "XYZ: {:.2} {:.2} {:.2} YPR: {:.1} {:.1} {:.1}",
                camera.position.x,
                camera.position.y,
                camera.position.z,
                camera.rotation.yaw,
                camera.rotation.pitch,
                camera.rotation.roll
            ),
        ];
        if self.show_trace {
            lines.extend(self.trace.to_string().lines().map(str::to_owned));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> TerminalApp {
        TerminalApp::with_size(Mesh::cube(2.0), Settings::default(), 40, 12)
    }

    #[test]
    fn test_layer_matches_terminal() {
        let app = app();
        assert_eq!(app.layer.width(), 40);
        assert_eq!(app.layer.height(), 24);
        assert_eq!(app.layer.meshes[0].position, Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_keys_move_camera() {
        let mut app = app();
        app.handle_key(KeyCode::Char('d'));
        app.handle_key(KeyCode::Char('w'));
        app.handle_key(KeyCode::Right);
        assert!((app.layer.camera.position.x - 0.2).abs() < 1e-12);
        assert!((app.layer.camera.position.y - 0.2).abs() < 1e-12);
        assert_eq!(app.layer.camera.rotation.yaw, 2.0);

        app.handle_key(KeyCode::Char('t'));
        assert!(app.show_trace);
        app.handle_key(KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn test_overlay_shows_camera() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Up);

        let lines = app.overlay_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "XYZ: -0.20 0.00 0.00 YPR: 0.0 2.0 0.0");

        app.handle_key(KeyCode::Char('t'));
        assert!(app.overlay_lines().len() > 2);
    }

    #[test]
    fn test_resize_keeps_scene() {
        let mut app = app();
        app.handle_key(KeyCode::Char('r'));
        app.resize(100, 30);

        assert_eq!(app.layer.width(), 100);
        assert_eq!(app.layer.height(), 60);
        assert_eq!(app.layer.meshes.len(), 1);
        assert!((app.layer.camera.position.z - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_frame_draws_cube() {
        let mut app = app();
        app.layer.clear(app.settings.background);
        app.layer.render_traced(&mut app.trace);

        assert!(!app.trace.triangles.is_empty());
        assert!(app
            .layer
            .pixels()
            .iter()
            .any(|&p| p != app.settings.background));
    }
}
