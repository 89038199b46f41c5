//! SVG export.

// Allow intentional casts for pixel math
#![allow(clippy::cast_precision_loss)]

use std::fmt::Write as _;

use super::grid::{ModuleGrid, ModuleKind, Placement};
use super::shapes::{self, RoundedRect};
use super::RenderConfig;

/// Builds a standalone SVG document for the grid.
///
/// Each of the three colors gets a single `<path>`; finder rings use the
/// even-odd rule so their holes stay open.
#[must_use]
pub fn render_svg(config: &RenderConfig, grid: &ModuleGrid, placement: &Placement) -> String {
    let scale = placement.module_px as f32;
    let (ox, oy) = (placement.origin_x as f32, placement.origin_y as f32);

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    );

    if config.background[3] > 0 {
        let _ = writeln!(
            out,
            r#"  <rect x="0" y="0" width="{}" height="{}"{}/>"#,
            config.width,
            config.height,
            fill_attrs(config.background)
        );
    }

    let mut dots = String::new();
    for y in 0..grid.width() {
        for x in 0..grid.width() {
            if grid.get(x, y) == ModuleKind::Data {
                let rect = shapes::data_module(config.dot_style, grid, x, y).transform(scale, ox, oy);
                push_rounded_rect(&mut dots, &rect);
            }
        }
    }
    push_path(&mut out, &dots, config.dots_color, false);

    let ring = shapes::corner_square(config.corner_square_style);
    let dot = shapes::corner_dot(config.corner_dot_style);
    let mut rings = String::new();
    let mut centers = String::new();
    for (fx, fy) in grid.finder_origins() {
        let dx = (fx as f32).mul_add(scale, ox);
        let dy = (fy as f32).mul_add(scale, oy);
        let placed = ring.transform(scale, dx, dy);
        push_rounded_rect(&mut rings, &placed.outer);
        push_rounded_rect(&mut rings, &placed.inner);
        push_rounded_rect(&mut centers, &dot.transform(scale, dx, dy));
    }
    push_path(&mut out, &rings, config.corners_square_color, true);
    push_path(&mut out, &centers, config.corners_dot_color, false);

    if let (Some(logo), Some(rect)) = (&config.logo, placement.logo_box) {
        let _ = writeln!(
            out,
            r#"  <image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet"/>"#,
            logo.to_data_uri(),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
    }

    out.push_str("</svg>\n");
    out
}

fn push_path(out: &mut String, data: &str, color: [u8; 4], even_odd: bool) {
    if data.is_empty() {
        return;
    }
    let rule = if even_odd { r#" fill-rule="evenodd""# } else { "" };
    let _ = writeln!(out, r#"  <path d="{}"{}{}/>"#, data.trim_end(), fill_attrs(color), rule);
}

fn fill_attrs(color: [u8; 4]) -> String {
    let [r, g, b, a] = color;
    let mut attrs = format!(r##" fill="#{r:02x}{g:02x}{b:02x}""##);
    if a < 255 {
        let _ = write!(attrs, r#" fill-opacity="{}""#, num(f32::from(a) / 255.0));
    }
    attrs
}

/// Appends one closed subpath, clockwise from the top-left corner.
fn push_rounded_rect(out: &mut String, rect: &RoundedRect) {
    let [tl, tr, br, bl] = rect.radii;
    let (x, y, right, bottom) = (rect.x, rect.y, rect.x + rect.w, rect.y + rect.h);

    let _ = write!(out, "M{} {}H{}", num(x + tl), num(y), num(right - tr));
    arc(out, tr, right, y + tr);
    let _ = write!(out, "V{}", num(bottom - br));
    arc(out, br, right - br, bottom);
    let _ = write!(out, "H{}", num(x + bl));
    arc(out, bl, x, bottom - bl);
    let _ = write!(out, "V{}", num(y + tl));
    arc(out, tl, x + tl, y);
    out.push_str("Z ");
}

fn arc(out: &mut String, radius: f32, to_x: f32, to_y: f32) {
    if radius > 0.0 {
        let r = num(radius);
        let _ = write!(out, "A{r} {r} 0 0 1 {} {}", num(to_x), num(to_y));
    }
}

/// Formats a coordinate with at most two decimals.
fn num(value: f32) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_trims_zeros() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(1.127), "1.13");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_square_subpath_has_no_arcs() {
        let mut out = String::new();
        push_rounded_rect(&mut out, &RoundedRect::uniform(0.0, 0.0, 10.0, 10.0, 0.0));
        assert_eq!(out, "M0 0H10V10H0V0Z ");
    }

    #[test]
    fn test_rounded_subpath_has_four_arcs() {
        let mut out = String::new();
        push_rounded_rect(&mut out, &RoundedRect::uniform(0.0, 0.0, 10.0, 10.0, 5.0));
        assert_eq!(out.matches('A').count(), 4);
    }

    #[test]
    fn test_fill_attrs_opacity() {
        assert_eq!(fill_attrs([255, 0, 16, 255]), r##" fill="#ff0010""##);
        assert!(fill_attrs([255, 255, 255, 0]).contains(r#"fill-opacity="0""#));
    }
}
