//! SVG preview of a generated layout.
//!
//! Draws the spread at the editor's display size: the page fold, every row
//! band a slot was generated into, and each slot as a rotated rectangle in
//! stacking order, styled by frame kind and labelled with its id.
//!
//! # Example
//!
//! ```
//! use zenposter::{generate_layout, svg::render_layout_svg};
//!
//! let svg = render_layout_svg(&generate_layout(15, 1));
//! assert!(svg.starts_with("<svg"));
//! // svg is a complete SVG document string
//! ```

use crate::canvas::PrintCanvas;
use crate::layout::{Band, Frame, Layout, Slot};

/// Margin around the spread.
const MARGIN: f64 = 20.0;
/// Height of the title line above the spread.
const TITLE_H: f64 = 24.0;
/// Tape strip size relative to the slot width, and its fixed height.
const TAPE_SHARE: f64 = 0.4;
const TAPE_H: f64 = 10.0;

/// Render a complete SVG document showing `layout` on the default canvas.
pub fn render_layout_svg(layout: &Layout) -> String {
    render_on_canvas(layout, &PrintCanvas::default())
}

/// Render `layout` at the display size of `canvas`.
pub fn render_on_canvas(layout: &Layout, canvas: &PrintCanvas) -> String {
    let (dw, dh) = canvas.display_size();
    let (w, h) = (dw as f64, dh as f64);
    let total_w = w + 2.0 * MARGIN;
    let total_h = h + 2.0 * MARGIN + TITLE_H;
    let origin_y = MARGIN + TITLE_H;

    let mut svg = String::with_capacity(4096 + layout.slots.len() * 256);

    // SVG header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    // Light/dark mode via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .title { font-size: 13px; font-weight: bold; fill: #333; }
  .spread { fill: #f4f1ea; stroke: #999; stroke-width: 1; }
  .fold { stroke: #bbb; stroke-width: 1; stroke-dasharray: 6,4; }
  .band { fill: none; stroke: #c9c2b4; stroke-width: 1; stroke-dasharray: 3,3; }
  .slot { stroke-width: 1.5; }
  .shadow { fill: #d8d8d8; stroke: #888; }
  .polaroid { fill: #ffffff; stroke: #aaa; }
  .tape { fill: #e4dccb; stroke: #a89f8a; }
  .terminal { fill: #1e1e1e; stroke: #3c3c3c; }
  .id { font-size: 11px; fill: #555; }
  .terminal-id { font-size: 11px; fill: #6ad66a; }
  @media (prefers-color-scheme: dark) {
    .title { fill: #e0e0e0; }
    .spread { fill: #2d2b27; stroke: #555; }
    .fold { stroke: #666; }
    .band { stroke: #4d483f; }
    .shadow { fill: #4a4a4a; stroke: #777; }
    .polaroid { fill: #5a5a5a; stroke: #888; }
    .tape { fill: #544e42; stroke: #85796a; }
    .id { fill: #ccc; }
  }
</style>
"##,
    );

    svg.push_str(&format!(
        r#"<text x="{MARGIN}" y="{:.1}" class="title">{}</text>"#,
        MARGIN + 14.0,
        escape_xml(&format!("{}  {} photos", layout.name, layout.slots.len()))
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{MARGIN}" y="{origin_y}" width="{w}" height="{h}" class="spread"/>"#
    ));
    svg.push('\n');
    let fold_x = MARGIN + w / 2.0;
    svg.push_str(&format!(
        r#"<line x1="{fold_x}" y1="{origin_y}" x2="{fold_x}" y2="{}" class="fold"/>"#,
        origin_y + h
    ));
    svg.push('\n');

    let to_px = |x_pct: f64, y_pct: f64| (MARGIN + x_pct / 100.0 * w, origin_y + y_pct / 100.0 * h);

    // Bands, once each, in generation order.
    let mut bands: Vec<Band> = Vec::new();
    for slot in &layout.slots {
        if !bands.iter().any(|b| b.page == slot.band.page && b.row == slot.band.row) {
            bands.push(slot.band);
        }
    }
    for band in &bands {
        let (x, y) = to_px(band.left, band.top);
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{:.1}" height="{:.1}" class="band"/>"#,
            band.width() / 100.0 * w,
            band.height() / 100.0 * h
        ));
        svg.push('\n');
    }

    // Slots, lowest z first; ties keep id order.
    let mut order: Vec<&Slot> = layout.slots.iter().collect();
    order.sort_by_key(|s| s.z);
    for slot in order {
        let (x, y) = to_px(slot.left, slot.top);
        let sw = slot.width / 100.0 * w;
        let sh = slot.height / 100.0 * h;
        let (cx, cy) = (x + sw / 2.0, y + sh / 2.0);
        let kind = slot.frame_kind();

        svg.push_str(&format!(
            r#"<g transform="rotate({} {cx:.1} {cy:.1})" data-id="{}" data-z="{}">"#,
            slot.rotation, slot.id, slot.z
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect x="{x:.1}" y="{y:.1}" width="{sw:.1}" height="{sh:.1}" class="slot {kind}"/>"#
        ));
        svg.push('\n');
        if let Frame::Tape { color, rotation } = slot.frame {
            let tw = sw * TAPE_SHARE;
            svg.push_str(&format!(
                r#"  <rect x="{:.1}" y="{:.1}" width="{tw:.1}" height="{TAPE_H}" fill="{color}" transform="rotate({rotation} {cx:.1} {y:.1})"/>"#,
                cx - tw / 2.0,
                y - TAPE_H / 2.0
            ));
            svg.push('\n');
        }
        let label_class = if kind == crate::FrameKind::Terminal {
            "terminal-id"
        } else {
            "id"
        };
        svg.push_str(&format!(
            r#"  <text x="{cx:.1}" y="{:.1}" class="{label_class}" text-anchor="middle">{}</text>"#,
            cy + 4.0,
            slot.id
        ));
        svg.push('\n');
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    log::trace!("rendered {} slot preview, {} bytes", layout.slots.len(), svg.len());
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generate_layout;

    #[test]
    fn svg_document_shape() {
        let svg = render_layout_svg(&generate_layout(15, 0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains(r#"viewBox="0 0 1140 809""#));
        assert!(svg.contains("editorial  15 photos"));
    }

    #[test]
    fn one_group_per_slot() {
        for count in [10, 19, 30] {
            let layout = generate_layout(count, 1);
            let svg = render_layout_svg(&layout);
            assert_eq!(svg.matches("<g transform").count(), layout.slots.len());
            for slot in &layout.slots {
                assert!(svg.contains(&format!(r#"data-id="{}""#, slot.id)));
            }
        }
    }

    #[test]
    fn frame_classes_match_counts() {
        let layout = generate_layout(24, 2);
        let svg = render_layout_svg(&layout);
        for kind in [
            crate::FrameKind::Shadow,
            crate::FrameKind::Polaroid,
            crate::FrameKind::Tape,
            crate::FrameKind::Terminal,
        ] {
            let needle = format!(r#"class="slot {kind}""#);
            assert_eq!(svg.matches(&needle).count(), layout.count_of(kind), "{kind}");
        }
    }

    #[test]
    fn slots_are_drawn_in_z_order() {
        let layout = generate_layout(22, 1);
        let svg = render_layout_svg(&layout);
        let zs: Vec<u32> = svg
            .split(r#"data-z=""#)
            .skip(1)
            .map(|rest| rest[..rest.find('"').unwrap()].parse().unwrap())
            .collect();
        assert_eq!(zs.len(), 22);
        assert!(zs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn one_element_per_line() {
        let layout = generate_layout(16, 1);
        let svg = render_layout_svg(&layout);
        let rects = svg.lines().filter(|l| l.trim_start().starts_with("<rect")).count();
        let bands = svg.matches(r#"class="band""#).count();
        let tapes = layout.count_of(crate::FrameKind::Tape);
        // Spread, bands, slots, tape strips.
        assert_eq!(rects, 1 + bands + layout.slots.len() + tapes);
        assert!(svg.lines().all(|l| l.matches("<rect").count() <= 1));
    }

    #[test]
    fn bands_are_deduplicated() {
        // 19 photos: four rows per page, every row occupied.
        let svg = render_layout_svg(&generate_layout(19, 0));
        assert_eq!(svg.matches(r#"class="band""#).count(), 8);
    }

    #[test]
    fn escaping() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
