use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One data axis as seen by the geometry builders.
///
/// Implemented by the host's axis framework; [`LinearAxis`] is the concrete
/// linear implementation used by tests and simple hosts. `to_screen` and
/// `from_screen` map a single coordinate; orientation metadata lets the
/// compositor cope with inverted axes without re-deriving it.
pub trait AxisTransform {
    fn to_screen(&self, value: f64) -> f64;
    fn from_screen(&self, coordinate: f64) -> f64;

    /// Lower bound of the currently visible data range.
    fn actual_min(&self) -> f64;
    /// Upper bound of the currently visible data range.
    fn actual_max(&self) -> f64;

    /// Smallest screen coordinate covered by this axis.
    fn screen_min(&self) -> f64;
    /// Largest screen coordinate covered by this axis.
    fn screen_max(&self) -> f64;

    /// `true` when increasing data values map to decreasing screen
    /// coordinates.
    fn is_inverted(&self) -> bool {
        false
    }
}

/// The x/y transform pair a render pass works against.
///
/// Candlestick and volume geometry assume horizontal time and vertical
/// value; a transposed plot is rejected up front rather than drawn wrong.
#[derive(Clone, Copy)]
pub struct AxisPair<'a> {
    pub x: &'a dyn AxisTransform,
    pub y: &'a dyn AxisTransform,
    pub transposed: bool,
}

impl<'a> AxisPair<'a> {
    #[must_use]
    pub fn new(x: &'a dyn AxisTransform, y: &'a dyn AxisTransform) -> Self {
        Self {
            x,
            y,
            transposed: false,
        }
    }

    #[must_use]
    pub fn with_transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }

    pub fn ensure_upright(&self) -> ChartResult<()> {
        if self.transposed {
            return Err(ChartError::TransposedAxes);
        }
        Ok(())
    }

    /// Visible `[x_min, x_max]` window driving the render walk.
    #[must_use]
    pub fn visible_x_range(&self) -> (f64, f64) {
        (self.x.actual_min(), self.x.actual_max())
    }
}

/// Linear data-to-screen mapping over an explicit pixel span.
///
/// `data_min` maps to `screen_start` and `data_max` to `screen_end`; a
/// `screen_end` below `screen_start` yields an inverted axis (the usual
/// shape for a y axis in top-left screen coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearAxis {
    data_min: f64,
    data_max: f64,
    screen_start: f64,
    screen_end: f64,
}

impl LinearAxis {
    pub fn new(
        data_min: f64,
        data_max: f64,
        screen_start: f64,
        screen_end: f64,
    ) -> ChartResult<Self> {
        if !data_min.is_finite()
            || !data_max.is_finite()
            || !screen_start.is_finite()
            || !screen_end.is_finite()
        {
            return Err(ChartError::InvalidData(
                "axis ranges must be finite".to_owned(),
            ));
        }
        if data_min >= data_max {
            return Err(ChartError::InvalidData(
                "axis data range must have data_min < data_max".to_owned(),
            ));
        }
        if screen_start == screen_end {
            return Err(ChartError::InvalidData(
                "axis screen span must be non-empty".to_owned(),
            ));
        }

        Ok(Self {
            data_min,
            data_max,
            screen_start,
            screen_end,
        })
    }
}

impl AxisTransform for LinearAxis {
    fn to_screen(&self, value: f64) -> f64 {
        let fraction = (value - self.data_min) / (self.data_max - self.data_min);
        self.screen_start + fraction * (self.screen_end - self.screen_start)
    }

    fn from_screen(&self, coordinate: f64) -> f64 {
        let fraction = (coordinate - self.screen_start) / (self.screen_end - self.screen_start);
        self.data_min + fraction * (self.data_max - self.data_min)
    }

    fn actual_min(&self) -> f64 {
        self.data_min
    }

    fn actual_max(&self) -> f64 {
        self.data_max
    }

    fn screen_min(&self) -> f64 {
        self.screen_start.min(self.screen_end)
    }

    fn screen_max(&self) -> f64 {
        self.screen_start.max(self.screen_end)
    }

    fn is_inverted(&self) -> bool {
        self.screen_end < self.screen_start
    }
}
