use std::fmt::Write;

use crate::chart::scale::{LinearScale, TimeScale};
use crate::source::models::Row;

/// SVG path data joining `rows` in the order given: `M x,y L x,y ...`.
/// No rows gives an empty string.
#[must_use]
pub fn line_path<'a, I>(rows: I, x: &TimeScale, y: &LinearScale) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut d = String::new();
    for (i, row) in rows.into_iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{command}{},{}", x.apply(row.datetime), y.apply(row.value));
    }
    d
}
