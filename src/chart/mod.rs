pub mod axis;
pub mod controller;
pub mod domain;
pub mod frame;
pub mod layout;
pub mod line;
pub mod render;
pub mod scale;
pub mod window;

pub use controller::{ChartController, ChartState, Selection};
pub use domain::{AxisDomain, ChartDomains, SeriesRows};
pub use frame::ChartFrame;
pub use layout::ChartLayout;
pub use window::{Lookback, QueryWindow};
