use chrono::{DateTime, NaiveDateTime, Timelike};

use crate::chart::domain::{AxisDomain, ChartDomains};
use crate::chart::layout::ChartLayout;
use crate::source::models::SeriesId;

/// Approximate number of ticks requested per axis.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Candidate time-axis tick steps, in seconds.
const TIME_STEPS: [i64; 18] = [
    1,
    5,
    15,
    30,
    60,
    5 * 60,
    15 * 60,
    30 * 60,
    3_600,
    3 * 3_600,
    6 * 3_600,
    12 * 3_600,
    86_400,
    2 * 86_400,
    7 * 86_400,
    30 * 86_400,
    90 * 86_400,
    365 * 86_400,
];

/// A tick at `value`, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TickValue<T> {
    pub value: T,
    pub label: String,
}

/// Linear map from a value domain onto a pixel range, rounding the output.
///
/// With no domain, or a zero-width domain, every value lands on the middle of the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Option<AxisDomain<f64>>,
    range: [f64; 2],
}

impl LinearScale {
    #[must_use]
    pub fn new(range_start: f64, range_end: f64) -> Self {
        Self {
            domain: None,
            range: [range_start, range_end],
        }
    }

    pub fn set_domain(&mut self, domain: Option<AxisDomain<f64>>) {
        self.domain = domain;
    }

    #[must_use]
    pub fn domain(&self) -> Option<AxisDomain<f64>> {
        self.domain
    }

    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let [r0, r1] = self.range;
        let t = match self.domain {
            Some(d) if d.max > d.min => (value - d.min) / (d.max - d.min),
            _ => 0.5,
        };
        (r0 + t * (r1 - r0)).round()
    }

    /// Evenly spaced ticks at multiples of 1, 2 or 5 times a power of ten.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<TickValue<f64>> {
        let Some(d) = self.domain else {
            return Vec::new();
        };
        if d.max <= d.min || count == 0 {
            return vec![TickValue {
                value: d.min,
                label: format_number(d.min, 1.0),
            }];
        }

        let increment = tick_increment(d.min, d.max, count);
        let lo = (d.min / increment).ceil() as i64;
        let hi = (d.max / increment).floor() as i64;

        (lo..=hi)
            .map(|i| {
                let value = i as f64 * increment;
                TickValue {
                    value,
                    label: format_number(value, increment),
                }
            })
            .collect()
    }
}

fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * 10f64.powf(power)
}

/// Fixed-point label with just enough decimals for `increment`.
fn format_number(value: f64, increment: f64) -> String {
    let decimals = if increment >= 1.0 {
        0
    } else {
        (-increment.log10().floor()) as usize
    };
    let label = format!("{value:.decimals$}");
    // Avoid "-0" for ticks that round to zero
    if label.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        label.trim_start_matches('-').to_string()
    } else {
        label
    }
}

/// Time map onto a pixel range, rounding the output. Same degenerate rules as [`LinearScale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: Option<AxisDomain<NaiveDateTime>>,
    range: [f64; 2],
}

fn epoch_seconds(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp_millis() as f64 / 1000.0
}

impl TimeScale {
    #[must_use]
    pub fn new(range_start: f64, range_end: f64) -> Self {
        Self {
            domain: None,
            range: [range_start, range_end],
        }
    }

    pub fn set_domain(&mut self, domain: Option<AxisDomain<NaiveDateTime>>) {
        self.domain = domain;
    }

    #[must_use]
    pub fn domain(&self) -> Option<AxisDomain<NaiveDateTime>> {
        self.domain
    }

    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    #[must_use]
    pub fn apply(&self, t: NaiveDateTime) -> f64 {
        let [r0, r1] = self.range;
        let ratio = match self.domain {
            Some(d) if d.max > d.min => {
                let lo = epoch_seconds(d.min);
                (epoch_seconds(t) - lo) / (epoch_seconds(d.max) - lo)
            }
            _ => 0.5,
        };
        (r0 + ratio * (r1 - r0)).round()
    }

    /// Ticks aligned to a calendar-ish step chosen so about `count` fit in the domain.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<TickValue<NaiveDateTime>> {
        let Some(d) = self.domain else {
            return Vec::new();
        };
        let lo = d.min.and_utc().timestamp();
        let hi = d.max.and_utc().timestamp();
        if hi <= lo || count == 0 {
            return vec![TickValue {
                value: d.min,
                label: format_time(d.min, 1),
            }];
        }

        let target = (hi - lo) / count as i64;
        let step = TIME_STEPS
            .into_iter()
            .find(|s| *s >= target)
            .unwrap_or(TIME_STEPS[TIME_STEPS.len() - 1]);

        let first = (lo + step - 1).div_euclid(step) * step;
        (0..)
            .map(|i| first + i * step)
            .take_while(|t| *t <= hi)
            .filter_map(|t| DateTime::from_timestamp(t, 0))
            .map(|t| {
                let value = t.naive_utc();
                TickValue {
                    value,
                    label: format_time(value, step),
                }
            })
            .collect()
    }
}

fn format_time(t: NaiveDateTime, step: i64) -> String {
    let at_midnight = t.hour() == 0 && t.minute() == 0 && t.second() == 0;
    let fmt = if step >= 86_400 || at_midnight {
        "%b %d"
    } else if step < 60 {
        "%H:%M:%S"
    } else {
        "%H:%M"
    };
    t.format(fmt).to_string()
}

/// The three scales of the chart: one shared time axis and one value axis per series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub temperature: LinearScale,
    pub humidity: LinearScale,
}

impl Scales {
    /// Value axes run bottom-up, so their range starts at the plot height.
    #[must_use]
    pub fn new(layout: &ChartLayout) -> Self {
        let width = f64::from(layout.width());
        let height = f64::from(layout.height());
        Self {
            x: TimeScale::new(0.0, width),
            temperature: LinearScale::new(height, 0.0),
            humidity: LinearScale::new(height, 0.0),
        }
    }

    pub fn set_domains(&mut self, domains: &ChartDomains) {
        self.x.set_domain(domains.time);
        self.temperature.set_domain(domains.temperature);
        self.humidity.set_domain(domains.humidity);
    }

    #[must_use]
    pub fn value(&self, series: SeriesId) -> &LinearScale {
        match series {
            SeriesId::Temperature => &self.temperature,
            SeriesId::Humidity => &self.humidity,
        }
    }
}
