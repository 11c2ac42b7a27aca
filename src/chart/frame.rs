use crate::chart::axis::Axis;
use crate::chart::domain::SeriesRows;
use crate::chart::layout::ChartLayout;
use crate::chart::line::line_path;
use crate::chart::scale::Scales;
use crate::source::models::{Row, SeriesId};

/// One drawn series line.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub series: SeriesId,
    pub d: String,
}

/// The drawn chart: three axes and two line paths, stable in identity across refreshes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub x_axis: Axis,
    pub left_axis: Axis,
    pub right_axis: Axis,
    pub temperature: LinePath,
    pub humidity: LinePath,
    /// Number of in-place updates applied since the frame was created.
    pub revision: u64,
}

impl ChartFrame {
    #[must_use]
    pub fn build(layout: &ChartLayout, scales: &Scales, rows: &[Row]) -> Self {
        let width = f64::from(layout.width());
        let height = f64::from(layout.height());
        let split = SeriesRows::partition(rows);
        let path = |series: SeriesId| LinePath {
            series,
            d: line_path(
                split.get(series).iter().copied(),
                &scales.x,
                scales.value(series),
            ),
        };

        Self {
            x_axis: Axis::bottom("x-axis", &scales.x, height),
            left_axis: Axis::left(SeriesId::Temperature.axis_id(), &scales.temperature),
            right_axis: Axis::right(SeriesId::Humidity.axis_id(), &scales.humidity, width),
            temperature: path(SeriesId::Temperature),
            humidity: path(SeriesId::Humidity),
            revision: 0,
        }
    }

    /// Redraw axes and paths from the current scales, keeping the same elements.
    pub fn update(&mut self, layout: &ChartLayout, scales: &Scales, rows: &[Row]) {
        let next = Self::build(layout, scales, rows);
        self.x_axis.ticks = next.x_axis.ticks;
        self.left_axis.ticks = next.left_axis.ticks;
        self.right_axis.ticks = next.right_axis.ticks;
        self.temperature.d = next.temperature.d;
        self.humidity.d = next.humidity.d;
        self.revision += 1;
    }

    #[must_use]
    pub fn path(&self, series: SeriesId) -> &LinePath {
        match series {
            SeriesId::Temperature => &self.temperature,
            SeriesId::Humidity => &self.humidity,
        }
    }
}
