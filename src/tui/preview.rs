//! Live preview of the rendered symbol using half-block characters.
//!
//! Each terminal cell shows two modules stacked vertically: the upper one
//! as the foreground of `▀`, the lower one as its background.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Theme;
use crate::render::{ModuleGrid, ModuleKind, RenderConfig};

/// Light modules kept around the symbol in the preview.
const QUIET_MODULES: usize = 1;

const CHECKER_LIGHT: Color = Color::Rgb(255, 255, 255);
const CHECKER_DARK: Color = Color::Rgb(204, 204, 204);

const fn rgb(rgba: [u8; 4]) -> Color {
    Color::Rgb(rgba[0], rgba[1], rgba[2])
}

/// Color of the module at padded coordinates (x, y).
fn module_color(grid: &ModuleGrid, config: &RenderConfig, x: usize, y: usize) -> Color {
    let width = grid.width();
    let inside = |v: usize| v >= QUIET_MODULES && v < width + QUIET_MODULES;
    let kind = if inside(x) && inside(y) {
        grid.get(x - QUIET_MODULES, y - QUIET_MODULES)
    } else {
        ModuleKind::Light
    };

    match kind {
        ModuleKind::Data => rgb(config.dots_color),
        ModuleKind::CornerSquare => rgb(config.corners_square_color),
        ModuleKind::CornerDot => rgb(config.corners_dot_color),
        ModuleKind::Light if config.background[3] == 0 => {
            if (x + y) % 2 == 0 {
                CHECKER_LIGHT
            } else {
                CHECKER_DARK
            }
        }
        ModuleKind::Light => rgb(config.background),
    }
}

/// Terminal cells (columns, rows) needed to show `grid`.
#[must_use]
pub fn preview_size(grid: &ModuleGrid) -> (usize, usize) {
    let side = grid.width() + 2 * QUIET_MODULES;
    (side, side.div_ceil(2))
}

/// Builds the preview, or `None` when it does not fit in `cols` x `rows`.
#[must_use]
pub fn preview_lines(
    grid: &ModuleGrid,
    config: &RenderConfig,
    cols: usize,
    rows: usize,
) -> Option<Vec<Line<'static>>> {
    let (need_cols, need_rows) = preview_size(grid);
    if need_cols > cols || need_rows > rows {
        return None;
    }

    let side = need_cols;
    let lines = (0..need_rows)
        .map(|row| {
            let top = row * 2;
            let spans: Vec<Span<'static>> = (0..side)
                .map(|x| {
                    let upper = module_color(grid, config, x, top);
                    // Past the last row this falls in the quiet zone
                    let lower = module_color(grid, config, x, top + 1);
                    Span::styled("▀", Style::default().fg(upper).bg(lower))
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    Some(lines)
}

/// Preview panel widget
pub struct PreviewPanel;

impl PreviewPanel {
    /// Renders the latest good drawing, or a hint when there is none.
    pub fn render(
        f: &mut Frame,
        area: Rect,
        preview: Option<(&ModuleGrid, &RenderConfig)>,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Preview ")
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some((grid, config)) = preview else {
            let hint = Paragraph::new("Nothing rendered yet. Enter some data to encode.")
                .style(Style::default().fg(theme.text_muted))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(hint, inner);
            return;
        };

        let caption = format!(
            "{}x{} px, {} modules",
            config.width,
            config.height,
            grid.width()
        );
        let body_rows = usize::from(inner.height.saturating_sub(1));
        let cols = usize::from(inner.width);

        match preview_lines(grid, config, cols, body_rows) {
            Some(lines) => {
                let (need_cols, need_rows) = preview_size(grid);
                let x = inner.x + u16::try_from((cols - need_cols) / 2).unwrap_or(0);
                let y = inner.y + u16::try_from((body_rows - need_rows) / 2).unwrap_or(0);
                let symbol_area = Rect {
                    x,
                    y,
                    width: u16::try_from(need_cols).unwrap_or(inner.width),
                    height: u16::try_from(need_rows).unwrap_or(inner.height),
                };
                f.render_widget(Paragraph::new(lines), symbol_area);
            }
            None => {
                let (need_cols, need_rows) = preview_size(grid);
                let hint = Paragraph::new(format!(
                    "Enlarge the terminal to see the preview ({need_cols}x{} cells needed).",
                    need_rows + 1
                ))
                .style(Style::default().fg(theme.warning))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
                f.render_widget(hint, Rect { height: inner.height.saturating_sub(1), ..inner });
            }
        }

        let caption_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: 1.min(inner.height),
            ..inner
        };
        f.render_widget(
            Paragraph::new(caption)
                .style(Style::default().fg(theme.text_muted))
                .alignment(Alignment::Center),
            caption_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormState;

    fn sample() -> (ModuleGrid, RenderConfig) {
        let config = FormState::default().render_config();
        let grid = ModuleGrid::encode(&config.data, config.error_correction).unwrap();
        (grid, config)
    }

    #[test]
    fn test_preview_size_adds_quiet_zone() {
        let (grid, _) = sample();
        let (cols, rows) = preview_size(&grid);
        assert_eq!(cols, grid.width() + 2);
        assert_eq!(rows, (grid.width() + 2).div_ceil(2));
    }

    #[test]
    fn test_preview_refuses_small_area() {
        let (grid, config) = sample();
        assert!(preview_lines(&grid, &config, 10, 10).is_none());
    }

    #[test]
    fn test_transparent_background_uses_checkerboard() {
        let (grid, config) = sample();
        assert_eq!(config.background[3], 0);
        assert_eq!(module_color(&grid, &config, 0, 0), CHECKER_LIGHT);
        assert_eq!(module_color(&grid, &config, 1, 0), CHECKER_DARK);
    }

    #[test]
    fn test_finder_ring_uses_corner_color() {
        let (grid, mut config) = sample();
        config.corners_square_color = [1, 2, 3, 255];
        // Top-left module of the first finder, shifted by the quiet zone
        assert_eq!(module_color(&grid, &config, 1, 1), Color::Rgb(1, 2, 3));
        let lines = preview_lines(&grid, &config, 200, 200).unwrap();
        assert_eq!(lines.len(), preview_size(&grid).1);
        assert!(lines.iter().all(|l| l.spans.len() == grid.width() + 2));
    }
}
