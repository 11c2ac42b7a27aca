use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{ChartError, ChartResult};

/// Format of the `Datetime` column.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The two measured quantities drawn on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesId {
    Temperature,
    Humidity,
}

impl SeriesId {
    pub const ALL: [Self; 2] = [Self::Temperature, Self::Humidity];

    /// Match an `ID` column value. Anything but the exact series names is unrecognised.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "Temperature" => Some(Self::Temperature),
            "Humidity" => Some(Self::Humidity),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
        }
    }

    #[must_use]
    pub fn legend_label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature (C)",
            Self::Humidity => "Humidity (%)",
        }
    }

    #[must_use]
    pub fn axis_label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature (deg C)",
            Self::Humidity => "Humidity (%)",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Temperature => "steelblue",
            Self::Humidity => "red",
        }
    }

    /// Element id of the series' line path.
    #[must_use]
    pub fn path_id(self) -> &'static str {
        match self {
            Self::Temperature => "temperature-line",
            Self::Humidity => "humidity-line",
        }
    }

    /// Element id of the series' value axis.
    #[must_use]
    pub fn axis_id(self) -> &'static str {
        match self {
            Self::Temperature => "left-y-axis",
            Self::Humidity => "right-y-axis",
        }
    }
}

/// One parsed record of the data endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub datetime: NaiveDateTime,
    pub value: f64,
    pub id: String,
}

impl Row {
    #[must_use]
    pub fn series(&self) -> Option<SeriesId> {
        SeriesId::from_id(&self.id)
    }
}

/// Raw CSV record; columns are matched by header name, not position.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Datetime")]
    datetime: String,
    #[serde(rename = "Value")]
    value: String,
    #[serde(rename = "ID")]
    id: String,
}

impl TryFrom<RawRecord> for Row {
    type Error = ChartError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let datetime = NaiveDateTime::parse_from_str(&raw.datetime, DATETIME_FORMAT)
            .map_err(|e| ChartError::Parse(format!("Datetime '{}': {e}", raw.datetime)))?;

        let value: f64 = raw
            .value
            .parse()
            .map_err(|e| ChartError::Parse(format!("Value '{}': {e}", raw.value)))?;
        if !value.is_finite() {
            return Err(ChartError::Parse(format!(
                "Value '{}' is not a finite number",
                raw.value
            )));
        }

        Ok(Self {
            datetime,
            value,
            id: raw.id,
        })
    }
}

/// Parse a `Datetime,Value,ID` CSV body into rows, in file order.
///
/// # Errors
///
/// Returns `ChartError::Parse` on a missing column or an unparseable record.
pub fn parse_rows(body: &str) -> ChartResult<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    reader
        .deserialize::<RawRecord>()
        .enumerate()
        .map(|(i, record)| {
            let record = record?;
            Row::try_from(record).map_err(|e| match e {
                ChartError::Parse(msg) => ChartError::Parse(format!("record {}: {msg}", i + 1)),
                other => other,
            })
        })
        .collect()
}
