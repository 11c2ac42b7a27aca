//! Owner of the chart between the initial load and later refreshes.
//!
//! The controller holds the scales, domains and drawn frame that a page view
//! keeps alive. Every operation is one awaited fetch followed by a
//! synchronous redraw, so a failed fetch leaves the previous chart untouched.
//! Operations take `&mut self`: requests against one controller are issued
//! one at a time and can never complete out of order.

use chrono::NaiveDateTime;

use crate::chart::domain::{AxisDomain, ChartDomains};
use crate::chart::frame::ChartFrame;
use crate::chart::layout::ChartLayout;
use crate::chart::render::render_svg;
use crate::chart::scale::Scales;
use crate::chart::window::{Lookback, QueryWindow};
use crate::error::{ChartError, ChartResult};
use crate::source::client::RowSource;
use crate::source::models::Row;
use crate::source::query::DataQuery;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    Unrendered,
    Rendered(ChartFrame),
}

/// The reference instant and lookback of the last successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub reference: NaiveDateTime,
    pub lookback: Lookback,
}

pub struct ChartController<S> {
    source: S,
    layout: ChartLayout,
    debug: bool,
    scales: Scales,
    domains: ChartDomains,
    state: ChartState,
    data_range: Option<AxisDomain<NaiveDateTime>>,
    selection: Option<Selection>,
}

impl<S: RowSource> ChartController<S> {
    #[must_use]
    pub fn new(source: S, layout: ChartLayout, debug: bool) -> Self {
        Self {
            source,
            layout,
            debug,
            scales: Scales::new(&layout),
            domains: ChartDomains::default(),
            state: ChartState::Unrendered,
            data_range: None,
            selection: None,
        }
    }

    /// Fetch the full dataset and draw the chart from scratch.
    ///
    /// Also records the dataset's time range, used to bound the date-time picker.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; the chart keeps its previous state.
    pub async fn initial_load(&mut self) -> ChartResult<&ChartFrame> {
        let query = DataQuery::Full { debug: self.debug };
        let rows = self.source.fetch(&query).await?;

        self.apply_domains(&rows);
        self.data_range = self.domains.time;
        self.selection = None;

        tracing::info!(
            rows = rows.len(),
            debug = self.debug,
            data_range = ?self.data_range,
            "Chart drawn from initial load"
        );

        let frame = ChartFrame::build(&self.layout, &self.scales, &rows);
        self.state = ChartState::Rendered(frame);
        self.rendered_frame()
    }

    /// Redraw the chart for `[reference - lookback, reference]`.
    ///
    /// An unrendered chart is drawn fresh; a rendered one is updated in place.
    ///
    /// # Errors
    ///
    /// Returns `ChartError::BadRequest` for an unknown lookback label (nothing is fetched),
    /// otherwise propagates the fetch error with the chart unchanged.
    pub async fn refresh(
        &mut self,
        reference: NaiveDateTime,
        lookback_label: &str,
    ) -> ChartResult<&ChartFrame> {
        let lookback: Lookback = lookback_label.parse()?;
        let window = QueryWindow::ending_at(reference, lookback)?;

        tracing::debug!(
            start = %window.start_param(),
            end = %window.end_param(),
            lookback = %lookback,
            "Refreshing chart"
        );

        let rows = self.source.fetch(&DataQuery::Window(window)).await?;
        self.apply_domains(&rows);
        self.selection = Some(Selection {
            reference,
            lookback,
        });

        let frame = match std::mem::replace(&mut self.state, ChartState::Unrendered) {
            ChartState::Rendered(mut frame) => {
                frame.update(&self.layout, &self.scales, &rows);
                tracing::debug!(rows = rows.len(), revision = frame.revision, "Chart updated");
                frame
            }
            ChartState::Unrendered => {
                tracing::debug!(rows = rows.len(), "Chart drawn from refresh");
                ChartFrame::build(&self.layout, &self.scales, &rows)
            }
        };
        self.state = ChartState::Rendered(frame);
        self.rendered_frame()
    }

    /// Choose between the live and the canned dataset for the next initial load.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    fn apply_domains(&mut self, rows: &[Row]) {
        self.domains = ChartDomains::compute(rows);
        self.scales.set_domains(&self.domains);
    }

    fn rendered_frame(&self) -> ChartResult<&ChartFrame> {
        self.frame()
            .ok_or_else(|| ChartError::Internal("chart has no frame after drawing".to_string()))
    }
}

impl<S> ChartController<S> {
    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    #[must_use]
    pub fn frame(&self) -> Option<&ChartFrame> {
        match &self.state {
            ChartState::Rendered(frame) => Some(frame),
            ChartState::Unrendered => None,
        }
    }

    #[must_use]
    pub fn domains(&self) -> &ChartDomains {
        &self.domains
    }

    /// Earliest and latest datetimes of the full dataset, once loaded.
    #[must_use]
    pub fn data_range(&self) -> Option<AxisDomain<NaiveDateTime>> {
        self.data_range
    }

    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The current chart as an SVG document, `None` before the first draw.
    #[must_use]
    pub fn svg(&self) -> Option<String> {
        self.frame().map(|frame| render_svg(&self.layout, frame))
    }
}
