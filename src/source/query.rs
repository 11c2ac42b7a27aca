use crate::chart::window::QueryWindow;

/// What to ask the data endpoint for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataQuery {
    /// The whole dataset; debug mode reads the canned test data instead.
    Full { debug: bool },
    /// Rows between the window's start and end.
    Window(QueryWindow),
}

impl DataQuery {
    /// Request path relative to the data endpoint's base URL.
    ///
    /// Window bounds are written unencoded, `+` included.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Full { debug: true } => "/test_data".to_string(),
            Self::Full { debug: false } => "/data".to_string(),
            Self::Window(window) => format!(
                "/data?start_datetime={}&end_datetime={}",
                window.start_param(),
                window.end_param()
            ),
        }
    }
}
