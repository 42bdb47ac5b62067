use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::axis::AxisTransform;
use crate::core::bar::OhlcvBar;
use crate::core::volume::VolumeStyle;
use crate::error::{ChartError, ChartResult};
use crate::render::ScreenRect;

/// Coordinates the candlestick and volume value axes of a combined view.
///
/// The two value axes share one time axis; the host resolves the string
/// keys against its axis collection and hands the resolved transforms back
/// in. The compositor only derives screen-space layout and the volume-axis
/// auto-range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualAxisCompositor {
    /// Host-side key of the OHLC price axis.
    pub bar_axis_key: String,
    /// Host-side key of the volume axis.
    pub volume_axis_key: String,
    /// Height of the separator band between the two plot areas.
    pub separator_thickness: f64,
}

impl Default for DualAxisCompositor {
    fn default() -> Self {
        Self {
            bar_axis_key: "Bars".to_owned(),
            volume_axis_key: "Volume".to_owned(),
            separator_thickness: 1.0,
        }
    }
}

/// Per-frame clip rectangles of a combined candlestick + volume view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub bar_area: ScreenRect,
    pub volume_area: ScreenRect,
    pub separator: ScreenRect,
}

impl DualAxisCompositor {
    #[must_use]
    pub fn new(bar_axis_key: impl Into<String>, volume_axis_key: impl Into<String>) -> Self {
        Self {
            bar_axis_key: bar_axis_key.into(),
            volume_axis_key: volume_axis_key.into(),
            ..Self::default()
        }
    }

    /// Computes the bar-plot, volume-plot, and separator clip rectangles.
    ///
    /// The separator band is centered on the midline between the two areas'
    /// adjoining edges; which area sits on top is taken from the actual
    /// screen extents, so inverted axes lay out correctly.
    pub fn layout(
        &self,
        x_axis: &dyn AxisTransform,
        bar_axis: &dyn AxisTransform,
        volume_axis: &dyn AxisTransform,
    ) -> ChartResult<PaneLayout> {
        if !self.separator_thickness.is_finite() || self.separator_thickness < 0.0 {
            return Err(ChartError::InvalidData(
                "separator thickness must be finite and >= 0".to_owned(),
            ));
        }

        let left = x_axis.screen_min();
        let width = x_axis.screen_max() - left;

        let bar_area = ScreenRect::new(
            left,
            bar_axis.screen_min(),
            width,
            bar_axis.screen_max() - bar_axis.screen_min(),
        );
        let volume_area = ScreenRect::new(
            left,
            volume_axis.screen_min(),
            width,
            volume_axis.screen_max() - volume_axis.screen_min(),
        );

        let midline = if bar_area.top <= volume_area.top {
            (bar_area.bottom() + volume_area.top) / 2.0
        } else {
            (volume_area.bottom() + bar_area.top) / 2.0
        };
        let separator = ScreenRect::new(
            left,
            midline - self.separator_thickness / 2.0,
            width,
            self.separator_thickness,
        );

        debug!(midline, "dual-axis pane layout");
        Ok(PaneLayout {
            bar_area,
            volume_area,
            separator,
        })
    }

    /// Derives the volume-axis target range for the given style.
    ///
    /// Heuristic auto-scaling around the running average with a quarter of
    /// the observed volume spread as headroom; a series without any volume
    /// falls back to `[0, 1]`.
    #[must_use]
    pub fn volume_axis_range(
        &self,
        aggregates: &VolumeAggregates,
        style: VolumeStyle,
    ) -> (f64, f64) {
        let average = aggregates.average_volume();
        let quartile = aggregates.volume_spread() / 4.0;

        match style {
            VolumeStyle::None => (0.0, 1.0),
            VolumeStyle::Combined | VolumeStyle::Stacked => {
                let upper = average + quartile;
                if upper > 0.0 { (0.0, upper) } else { (0.0, 1.0) }
            }
            VolumeStyle::PositiveNegative => {
                let reach = average + quartile / 2.0;
                if reach > 0.0 { (-reach, reach) } else { (-1.0, 1.0) }
            }
        }
    }
}

/// Running volume statistics gathered during the per-frame bar scan.
///
/// A side contributes an observation iff its volume is strictly positive, so
/// a bar with both nonzero buy and sell volume counts twice. Invalid bars
/// and bars with non-finite volume are excluded entirely.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeAggregates {
    min_volume: f64,
    max_volume: f64,
    total_volume: f64,
    observations: u64,
    sampled: bool,
}

impl VolumeAggregates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_bars(bars: &[OhlcvBar]) -> Self {
        let mut aggregates = Self::new();
        for bar in bars {
            aggregates.observe(*bar);
        }
        aggregates
    }

    pub fn observe(&mut self, bar: OhlcvBar) {
        if !bar.is_valid() || !bar.has_volume_data() {
            return;
        }

        let side_min = bar.buy_volume.min(bar.sell_volume);
        let side_max = bar.buy_volume.max(bar.sell_volume);
        if self.sampled {
            self.min_volume = self.min_volume.min(side_min);
            self.max_volume = self.max_volume.max(side_max);
        } else {
            self.min_volume = side_min;
            self.max_volume = side_max;
            self.sampled = true;
        }

        if bar.buy_volume > 0.0 {
            self.total_volume += bar.buy_volume;
            self.observations += 1;
        }
        if bar.sell_volume > 0.0 {
            self.total_volume += bar.sell_volume;
            self.observations += 1;
        }
    }

    #[must_use]
    pub fn min_volume(&self) -> f64 {
        if self.sampled { self.min_volume } else { 0.0 }
    }

    #[must_use]
    pub fn max_volume(&self) -> f64 {
        if self.sampled { self.max_volume } else { 0.0 }
    }

    #[must_use]
    pub fn volume_spread(&self) -> f64 {
        self.max_volume() - self.min_volume()
    }

    /// Total volume divided by the number of nonzero side observations;
    /// zero (never NaN) when no side was ever positive.
    #[must_use]
    pub fn average_volume(&self) -> f64 {
        if self.observations == 0 {
            0.0
        } else {
            self.total_volume / self.observations as f64
        }
    }
}
