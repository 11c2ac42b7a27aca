use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::common::AppState;
use crate::error::ChartResult;
use crate::routes::{current_chart, ChartQuery};

/// The current chart as a standalone SVG document.
///
/// `reference` and `lookback` refresh the chart before it is returned.
pub async fn chart_svg(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> ChartResult<impl IntoResponse> {
    let view = current_chart(&state, &query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        view.svg,
    ))
}
