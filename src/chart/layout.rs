use crate::config::ConfigError;

/// Space reserved around the plot area for axes, labels and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

pub const MARGIN: Margin = Margin {
    top: 20,
    right: 70,
    bottom: 50,
    left: 70,
};

/// Chart geometry shared by the initial draw and every refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartLayout {
    frame_width: u32,
    frame_height: u32,
    margin: Margin,
    transition_ms: u64,
}

impl ChartLayout {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFrame` if the margins consume the whole frame.
    pub fn new(
        frame_width: u32,
        frame_height: u32,
        margin: Margin,
        transition_ms: u64,
    ) -> Result<Self, ConfigError> {
        if frame_width <= margin.left + margin.right || frame_height <= margin.top + margin.bottom
        {
            return Err(ConfigError::InvalidFrame {
                width: frame_width,
                height: frame_height,
            });
        }

        Ok(Self {
            frame_width,
            frame_height,
            margin,
            transition_ms,
        })
    }

    #[must_use]
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    #[must_use]
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Width of the plot area inside the margins.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.frame_width - self.margin.left - self.margin.right
    }

    /// Height of the plot area inside the margins.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.frame_height - self.margin.top - self.margin.bottom
    }

    #[must_use]
    pub fn transition_ms(&self) -> u64 {
        self.transition_ms
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            frame_width: 600,
            frame_height: 480,
            margin: MARGIN,
            transition_ms: 500,
        }
    }
}
