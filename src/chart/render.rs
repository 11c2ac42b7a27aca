//! SVG serialisation of a [`ChartFrame`].

use std::fmt::Write;

use crate::chart::frame::{ChartFrame, LinePath};
use crate::chart::layout::ChartLayout;
use crate::source::models::SeriesId;

/// Escape text for use in SVG character data and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole chart document.
///
/// Axes of a frame that has been refreshed carry the layout's transition duration.
#[must_use]
pub fn render_svg(layout: &ChartLayout, frame: &ChartFrame) -> String {
    let width = f64::from(layout.width());
    let height = f64::from(layout.height());
    let margin = layout.margin();
    let transition = (frame.revision > 0).then_some(layout.transition_ms());

    let mut out = String::with_capacity(8 * 1024);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" class="monitor">"#,
        layout.frame_width(),
        layout.frame_height()
    );

    write_legend(&mut out, width);

    let _ = write!(
        out,
        r#"<g transform="translate({},{})">"#,
        margin.left, margin.top
    );
    write_axis_labels(&mut out, width, height);

    frame.x_axis.write_svg(&mut out, transition);
    frame.left_axis.write_svg(&mut out, transition);
    frame.right_axis.write_svg(&mut out, transition);

    // Humidity first so temperature draws on top
    write_path(&mut out, &frame.humidity);
    write_path(&mut out, &frame.temperature);

    out.push_str("</g></svg>");
    out
}

fn write_legend(out: &mut String, width: f64) {
    out.push_str(r#"<g class="legend">"#);
    for (i, series) in SeriesId::ALL.into_iter().enumerate() {
        let offset = i as f64 * 25.0;
        let _ = write!(
            out,
            r#"<g><rect x="{}" y="{}" width="10" height="10" style="fill: {color}"/><text x="{}" y="{}" style="fill: {color}">{}</text></g>"#,
            width - 65.0,
            offset + 19.0,
            width - 50.0,
            offset + 30.0,
            escape(series.legend_label()),
            color = series.color(),
        );
    }
    out.push_str("</g>");
}

fn write_axis_labels(out: &mut String, width: f64, height: f64) {
    let _ = write!(
        out,
        r#"<text class="y-axis label" text-anchor="middle" transform="rotate(-90)" x="{}" y="{}">{}</text>"#,
        -height / 2.0,
        width + 40.0,
        escape(SeriesId::Humidity.axis_label())
    );
    let _ = write!(
        out,
        r#"<text class="y-axis label" text-anchor="middle" transform="rotate(-90)" x="{}" y="-40">{}</text>"#,
        -height / 2.0,
        escape(SeriesId::Temperature.axis_label())
    );
    let _ = write!(
        out,
        r#"<text class="x-axis label" text-anchor="middle" x="{}" y="{}">Date-time</text>"#,
        width / 2.0,
        height + 40.0
    );
}

fn write_path(out: &mut String, line: &LinePath) {
    let _ = write!(
        out,
        r#"<path id="{}" fill="none" stroke="{}" d="{}"/>"#,
        line.series.path_id(),
        line.series.color(),
        escape(&line.d)
    );
}
