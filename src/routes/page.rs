use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use std::fmt::Write;

use crate::chart::render::escape;
use crate::chart::window::Lookback;
use crate::common::AppState;
use crate::error::ChartResult;
use crate::routes::{current_chart, ChartQuery, ChartView};

/// Value format of an HTML `datetime-local` input with second precision.
const PICKER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Chart page: date-time picker, lookback selector and the chart itself.
///
/// Submitting the form reloads the page with `reference` and `lookback`, which refreshes the chart.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> ChartResult<impl IntoResponse> {
    let view = current_chart(&state, &query).await?;
    let body = render_page(&view);

    Ok(([(header::CACHE_CONTROL, "no-store")], Html(body)))
}

#[must_use]
pub fn render_page(view: &ChartView) -> String {
    PAGE_HTML
        .replace("{{CONTROLS}}", &render_controls(view))
        .replace("{{CHART}}", &view.svg)
        .replace("{{DEBUG}}", if view.debug { "debug data" } else { "" })
}

fn render_controls(view: &ChartView) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        r#"<label>Reference <input type="datetime-local" id="datetime-selector" name="reference" step="1" value="{}""#,
        view.selection.reference.format(PICKER_FORMAT)
    );
    if let Some(range) = view.data_range {
        let _ = write!(
            out,
            r#" min="{}" max="{}""#,
            range.min.format(PICKER_FORMAT),
            range.max.format(PICKER_FORMAT)
        );
    }
    out.push_str("></label>");

    out.push_str(r#"<label>Lookback <select id="lookback-selector" name="lookback">"#);
    for lookback in Lookback::ALL {
        let selected = if lookback == view.selection.lookback {
            " selected"
        } else {
            ""
        };
        let label = escape(lookback.label());
        let _ = write!(out, r#"<option value="{label}"{selected}>{label}</option>"#);
    }
    out.push_str("</select></label>");
    if view.debug {
        out.push_str(r#"<input type="hidden" name="debug" value="true">"#);
    }
    out.push_str(r#"<button type="submit">Update</button>"#);

    out
}

const PAGE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Climate Monitor</title>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; background: #f8fafc; color: #1e293b; margin: 0; }
        .container { max-width: 720px; margin: 0 auto; padding: 1.5rem; }
        h1 { font-size: 1.25rem; font-weight: 600; margin-bottom: 1rem; }
        form { display: flex; gap: 1rem; align-items: center; flex-wrap: wrap; margin-bottom: 1rem; }
        label { font-size: 0.875rem; display: flex; gap: 0.5rem; align-items: center; }
        .debug { color: #b91c1c; font-size: 0.75rem; }
        #graph_container { background: #ffffff; border: 1px solid #e2e8f0; border-radius: 0.5rem; padding: 0.5rem; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Temperature &amp; Humidity <span class="debug">{{DEBUG}}</span></h1>
        <form method="get" action="/">{{CONTROLS}}</form>
        <div id="graph_container">{{CHART}}</div>
    </div>
</body>
</html>
"##;
