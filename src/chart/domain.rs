use chrono::NaiveDateTime;

use crate::source::models::{Row, SeriesId};

/// Closed `[min, max]` input range of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisDomain<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> AxisDomain<T> {
    /// Min/max over `values`, ignoring incomparable values such as `NaN`.
    /// Returns `None` when nothing comparable is left.
    pub fn extent<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .filter(|v| v.partial_cmp(v).is_some())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(d) => Some(Self {
                    min: if v < d.min { v } else { d.min },
                    max: if v > d.max { v } else { d.max },
                }),
            })
    }
}

/// Rows split by series. Rows with an unrecognised ID are in neither list.
#[derive(Debug, Clone, Default)]
pub struct SeriesRows<'a> {
    pub temperature: Vec<&'a Row>,
    pub humidity: Vec<&'a Row>,
}

impl<'a> SeriesRows<'a> {
    #[must_use]
    pub fn partition(rows: &'a [Row]) -> Self {
        let mut split = Self::default();
        for row in rows {
            match row.series() {
                Some(SeriesId::Temperature) => split.temperature.push(row),
                Some(SeriesId::Humidity) => split.humidity.push(row),
                None => {}
            }
        }
        split
    }

    #[must_use]
    pub fn get(&self, series: SeriesId) -> &[&'a Row] {
        match series {
            SeriesId::Temperature => &self.temperature,
            SeriesId::Humidity => &self.humidity,
        }
    }
}

/// Domains of the shared time axis and the two value axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartDomains {
    pub time: Option<AxisDomain<NaiveDateTime>>,
    pub temperature: Option<AxisDomain<f64>>,
    pub humidity: Option<AxisDomain<f64>>,
}

impl ChartDomains {
    /// The time domain spans every row, whatever its ID; each value domain
    /// only looks at its own series.
    #[must_use]
    pub fn compute(rows: &[Row]) -> Self {
        let value_extent = |series: SeriesId| {
            AxisDomain::extent(
                rows.iter()
                    .filter(|r| r.series() == Some(series))
                    .map(|r| r.value),
            )
        };

        Self {
            time: AxisDomain::extent(rows.iter().map(|r| r.datetime)),
            temperature: value_extent(SeriesId::Temperature),
            humidity: value_extent(SeriesId::Humidity),
        }
    }

    #[must_use]
    pub fn value(&self, series: SeriesId) -> Option<AxisDomain<f64>> {
        match series {
            SeriesId::Temperature => self.temperature,
            SeriesId::Humidity => self.humidity,
        }
    }
}
