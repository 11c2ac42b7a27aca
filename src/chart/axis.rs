use std::fmt::Write;

use crate::chart::render::escape;
use crate::chart::scale::{LinearScale, TimeScale, DEFAULT_TICK_COUNT};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
    Right,
}

/// A tick mark at `offset` pixels along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

/// A drawn axis: where it sits and the ticks of its current domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub id: &'static str,
    pub orientation: Orientation,
    /// Offset of the axis group inside the plot area.
    pub translate: (f64, f64),
    pub range: [f64; 2],
    pub ticks: Vec<Tick>,
}

impl Axis {
    /// Time axis along the bottom edge of the plot.
    #[must_use]
    pub fn bottom(id: &'static str, scale: &TimeScale, plot_height: f64) -> Self {
        let ticks = scale
            .ticks(DEFAULT_TICK_COUNT)
            .into_iter()
            .map(|t| Tick {
                offset: scale.apply(t.value),
                label: t.label,
            })
            .collect();

        Self {
            id,
            orientation: Orientation::Bottom,
            translate: (0.0, plot_height),
            range: scale.range(),
            ticks,
        }
    }

    #[must_use]
    pub fn left(id: &'static str, scale: &LinearScale) -> Self {
        Self::vertical(id, Orientation::Left, scale, 0.0)
    }

    #[must_use]
    pub fn right(id: &'static str, scale: &LinearScale, plot_width: f64) -> Self {
        Self::vertical(id, Orientation::Right, scale, plot_width)
    }

    fn vertical(id: &'static str, orientation: Orientation, scale: &LinearScale, x: f64) -> Self {
        let ticks = scale
            .ticks(DEFAULT_TICK_COUNT)
            .into_iter()
            .map(|t| Tick {
                offset: scale.apply(t.value),
                label: t.label,
            })
            .collect();

        Self {
            id,
            orientation,
            translate: (x, 0.0),
            range: scale.range(),
            ticks,
        }
    }

    /// Append the axis group. `transition_ms` marks an axis that was updated in place.
    pub fn write_svg(&self, out: &mut String, transition_ms: Option<u64>) {
        let anchor = match self.orientation {
            Orientation::Bottom => "middle",
            Orientation::Left => "end",
            Orientation::Right => "start",
        };
        let _ = write!(
            out,
            r#"<g id="{}" transform="translate({},{})" fill="none" font-size="10" font-family="sans-serif" text-anchor="{anchor}""#,
            self.id, self.translate.0, self.translate.1
        );
        if let Some(ms) = transition_ms {
            let _ = write!(
                out,
                r#" data-transition-ms="{ms}" style="transition: all {ms}ms""#
            );
        }
        out.push('>');

        let [r0, r1] = self.range;
        let domain_path = match self.orientation {
            Orientation::Bottom => format!("M{r0},{TICK_SIZE}V0H{r1}V{TICK_SIZE}"),
            Orientation::Left => format!("M-{TICK_SIZE},{r0}H0V{r1}H-{TICK_SIZE}"),
            Orientation::Right => format!("M{TICK_SIZE},{r0}H0V{r1}H{TICK_SIZE}"),
        };
        let _ = write!(
            out,
            r#"<path class="domain" stroke="currentColor" d="{domain_path}"/>"#
        );

        for tick in &self.ticks {
            let label = escape(&tick.label);
            let _ = match self.orientation {
                Orientation::Bottom => write!(
                    out,
                    r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="{TICK_SIZE}"/><text fill="currentColor" y="{}" dy="0.71em">{label}</text></g>"#,
                    tick.offset,
                    TICK_SIZE + TICK_PADDING
                ),
                Orientation::Left => write!(
                    out,
                    r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="-{TICK_SIZE}"/><text fill="currentColor" x="-{}" dy="0.32em">{label}</text></g>"#,
                    tick.offset,
                    TICK_SIZE + TICK_PADDING
                ),
                Orientation::Right => write!(
                    out,
                    r#"<g class="tick" transform="translate(0,{})"><line stroke="currentColor" x2="{TICK_SIZE}"/><text fill="currentColor" x="{}" dy="0.32em">{label}</text></g>"#,
                    tick.offset,
                    TICK_SIZE + TICK_PADDING
                ),
            };
        }

        out.push_str("</g>");
    }
}
