/// Presents an ARGB color buffer in the terminal using half-block cells
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use raster3d_core::ColorBuffer;
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Split a packed ARGB pixel into a terminal true color, dropping alpha
pub fn argb_to_color(argb: u32) -> Color {
    Color::Rgb {
        r: (argb >> 16) as u8,
        g: (argb >> 8) as u8,
        b: argb as u8,
    }
}

/// Writes two pixel rows per terminal row
pub struct HalfBlockRenderer {
    columns: u16,
    rows: u16,
}

impl HalfBlockRenderer {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Raster size that fills the terminal exactly
    pub fn raster_size(&self) -> (u32, u32) {
        (u32::from(self.columns), u32::from(self.rows) * 2)
    }

    pub fn draw<W: Write>(&self, buffer: &ColorBuffer, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(u32, u32)> = None;

        for row in 0..u32::from(self.rows) {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for x in 0..u32::from(self.columns) {
                let top = buffer.get(x, row * 2).unwrap_or(0);
                let bottom = buffer.get(x, row * 2 + 1).unwrap_or(0);

                // Only emit color changes
                if current != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(argb_to_color(top)))?;
                    writer.queue(SetBackgroundColor(argb_to_color(bottom)))?;
                    current = Some((top, bottom));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_to_color() {
        assert_eq!(
            argb_to_color(0xFF102030),
            Color::Rgb {
                r: 0x10,
                g: 0x20,
                b: 0x30
            }
        );
    }

    #[test]
    fn test_raster_size_doubles_rows() {
        assert_eq!(HalfBlockRenderer::new(80, 24).raster_size(), (80, 48));
    }

    #[test]
    fn test_draw_emits_one_cell_per_column() {
        let renderer = HalfBlockRenderer::new(3, 2);
        let (width, height) = renderer.raster_size();
        let buffer = ColorBuffer::new(width, height, 0xFF000000);

        let mut out = Vec::new();
        renderer.draw(&buffer, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
        // A uniform buffer only needs one color change.
        assert_eq!(text.matches("38;2;0;0;0").count(), 1);
    }
}
