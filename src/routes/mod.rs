pub mod chart;
pub mod health;
pub mod page;

use axum::{routing::get, Router};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::chart::controller::Selection;
use crate::chart::domain::AxisDomain;
use crate::chart::window::{parse_reference, Lookback};
use crate::common::{AppState, ServerController};
use crate::error::{ChartError, ChartResult};

/// Picker and selector values. Either one present triggers a refresh;
/// the missing one falls back to the previous selection. Without either,
/// the request is a new page view and the chart is redrawn from the full dataset.
///
/// `debug` (any value) reads the canned test data for that page view.
#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub reference: Option<String>,
    pub lookback: Option<String>,
    pub debug: Option<String>,
}

impl ChartQuery {
    fn reference(&self) -> Option<&str> {
        self.reference.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn lookback(&self) -> Option<&str> {
        self.lookback.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn wants_refresh(&self) -> bool {
        self.reference().is_some() || self.lookback().is_some()
    }

    fn wants_debug(&self) -> bool {
        self.debug.is_some()
    }
}

/// What a rendered page needs besides the chart itself.
#[derive(Debug, Clone)]
pub struct ChartView {
    pub svg: String,
    pub data_range: Option<AxisDomain<NaiveDateTime>>,
    pub selection: Selection,
    pub debug: bool,
}

/// Bring the shared chart up to date with `query` and snapshot it.
pub(crate) async fn current_chart(state: &AppState, query: &ChartQuery) -> ChartResult<ChartView> {
    let mut controller = state.controller.lock().await;

    if !query.wants_refresh() {
        controller.set_debug(state.config.debug_mode || query.wants_debug());
        controller.initial_load().await?;
    } else {
        if controller.frame().is_none() {
            controller.set_debug(state.config.debug_mode);
            controller.initial_load().await?;
        }

        let reference = match query.reference() {
            Some(input) => parse_reference(input)?,
            None => default_selection(&controller).reference,
        };
        let lookback = query
            .lookback()
            .unwrap_or_else(|| default_selection(&controller).lookback.label())
            .to_string();
        controller.refresh(reference, &lookback).await?;
    }

    let svg = controller
        .svg()
        .ok_or_else(|| ChartError::Internal("chart is not rendered".to_string()))?;

    Ok(ChartView {
        svg,
        data_range: controller.data_range(),
        selection: default_selection(&controller),
        debug: controller.debug(),
    })
}

/// Last refresh, else the latest datetime in the data (or now when there is none).
fn default_selection(controller: &ServerController) -> Selection {
    controller.selection().unwrap_or_else(|| Selection {
        reference: controller
            .data_range()
            .map_or_else(|| Local::now().naive_local(), |range| range.max),
        lookback: Lookback::default(),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/chart.svg", get(chart::chart_svg))
        .route("/healthz", get(health::healthz))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
