//! SVG rendition of the hotspot overlay for the active frame. The overlay
//! uses the frame's natural size as its view box, so the polygons are
//! emitted in native pixel space and scale with whatever box displays them.

use std::fmt::Write;

use crate::controller::ViewportController;
use crate::highlight::HighlightState;

/// Returns `None` until the natural frame size has been measured.
pub fn overlay_svg(controller: &ViewportController) -> Option<String> {
    let size = controller.natural_size()?;
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" data-frame="{}">"#,
        size.width,
        size.height,
        controller.current_frame_index()
    );
    for entry in controller.highlights() {
        let style = entry.style();
        let pointer_events = if style.interactive { "all" } else { "none" };
        let _ = writeln!(
            out,
            r#"  <polygon data-name="{}" data-state="{}" points="{}" fill="{}" stroke="{}" stroke-width="{}" pointer-events="{}"/>"#,
            escape_attr(entry.name()),
            state_label(entry.state),
            entry.hotspot.svg_points(),
            style.fill.css(),
            style.stroke.css(),
            style.stroke_width,
            pointer_events
        );
    }
    out.push_str("</svg>\n");
    Some(out)
}

fn state_label(state: HighlightState) -> &'static str {
    match state {
        HighlightState::Hidden => "hidden",
        HighlightState::Default => "default",
        HighlightState::Hovered => "hovered",
        HighlightState::Selected => "selected",
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
