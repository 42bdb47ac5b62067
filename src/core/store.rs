use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::OhlcvBar;
use crate::core::window::find_window_start;
use crate::error::{ChartError, ChartResult};

/// Append-only ordered OHLCV series with cached render-window state.
///
/// The store owns the backing sequence and two derived values:
/// `min_dx`, the smallest gap between consecutive x values (used as the
/// synthetic bar-width fallback), and `window_index`, the visible-window
/// start resolved by the previous render pass, which seeds the next window
/// search so panning stays close to O(1) per frame.
///
/// `update_data` is the explicit commit step: it must run after any data
/// change and before the next render or hit-test pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhlcvSeriesStore {
    items: Vec<OhlcvBar>,
    // Derived state is rebuilt by `update_data`, never carried across
    // serialization boundaries.
    #[serde(skip, default = "default_min_dx")]
    min_dx: f64,
    #[serde(skip)]
    window_index: usize,
}

fn default_min_dx() -> f64 {
    1.0
}

impl Default for OhlcvSeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OhlcvSeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            min_dx: 1.0,
            window_index: 0,
        }
    }

    pub fn from_bars(bars: Vec<OhlcvBar>) -> ChartResult<Self> {
        let mut store = Self::new();
        store.set_items(bars);
        store.update_data()?;
        Ok(store)
    }

    /// Appends one bar in O(1).
    ///
    /// Fails with [`ChartError::OutOfOrderBar`] when `bar.x` is strictly less
    /// than the last stored bar's x; equal x is accepted. The store is left
    /// unchanged on failure.
    pub fn append(&mut self, bar: OhlcvBar) -> ChartResult<()> {
        if let Some(last) = self.items.last() {
            if bar.x < last.x {
                return Err(ChartError::OutOfOrderBar {
                    x: bar.x,
                    last_x: last.x,
                });
            }
        }
        self.items.push(bar);
        trace!(count = self.items.len(), "append ohlcv bar");
        Ok(())
    }

    /// Replaces the backing sequence wholesale.
    ///
    /// Ordering is not checked here; the next `update_data` re-validates it.
    pub fn set_items(&mut self, bars: Vec<OhlcvBar>) {
        self.items = bars;
    }

    #[must_use]
    pub fn items(&self) -> &[OhlcvBar] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.min_dx = 1.0;
        self.window_index = 0;
    }

    /// Commits a logical data change: re-validates ordering, recomputes
    /// `min_dx`, and resets the cached window index.
    ///
    /// Gaps between bars with non-finite x are ignored (invalid bars are
    /// tolerated data); any negative gap between finite x values fails with
    /// [`ChartError::OutOfOrderBar`]. Stores with fewer than two bars, and
    /// degenerate stores without a positive gap, fall back to `min_dx = 1`.
    pub fn update_data(&mut self) -> ChartResult<()> {
        let mut min_dx = f64::INFINITY;
        for pair in self.items.windows(2) {
            if !pair[0].x.is_finite() || !pair[1].x.is_finite() {
                continue;
            }
            let dx = pair[1].x - pair[0].x;
            if dx < 0.0 {
                return Err(ChartError::OutOfOrderBar {
                    x: pair[1].x,
                    last_x: pair[0].x,
                });
            }
            if dx > 0.0 {
                min_dx = min_dx.min(dx);
            }
        }

        self.min_dx = if min_dx.is_finite() { min_dx } else { 1.0 };
        self.window_index = 0;
        debug!(
            count = self.items.len(),
            min_dx = self.min_dx,
            "ohlcv store data committed"
        );
        Ok(())
    }

    /// Smallest positive gap between consecutive x values, or the synthetic
    /// fallback of 1 when none exists.
    #[must_use]
    pub fn min_dx(&self) -> f64 {
        self.min_dx
    }

    /// Window start resolved by the most recent render pass.
    #[must_use]
    pub fn window_index(&self) -> usize {
        self.window_index
    }

    /// Render passes record the resolved window start here so the next
    /// frame's search starts from a warm seed.
    pub(crate) fn set_window_index(&mut self, index: usize) {
        self.window_index = index;
    }

    /// Locates the rightmost bar with x at or below `x`.
    ///
    /// Seeds the search from the cached window index unless an override is
    /// given. Deliberately does not touch the cached index, so hit-testing
    /// cannot perturb render-seed locality.
    #[must_use]
    pub fn find_by_x(&self, x: f64, starting_index: Option<usize>) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let seed = starting_index.unwrap_or(self.window_index);
        Some(find_window_start(&self.items, x, seed))
    }
}
