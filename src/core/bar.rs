use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::convert::{datetime_to_unix_seconds, decimal_to_f64};
use crate::error::ChartResult;

/// One time-indexed OHLCV observation.
///
/// Bars are deliberately not validated at construction: series loaded from
/// real feeds contain NaN gaps, and the policy of this crate is to tolerate
/// them as data (skipped during rendering and aggregation) rather than
/// reject them at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    pub x: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub buy_volume: f64,
    #[serde(default)]
    pub sell_volume: f64,
}

impl OhlcvBar {
    /// Builds a bar without volume information (both sides zero).
    #[must_use]
    pub const fn new(x: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            x,
            open,
            high,
            low,
            close,
            buy_volume: 0.0,
            sell_volume: 0.0,
        }
    }

    /// Builds a bar with split buy/sell volume.
    #[must_use]
    pub const fn with_volume(
        x: f64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        buy_volume: f64,
        sell_volume: f64,
    ) -> Self {
        Self {
            x,
            open,
            high,
            low,
            close,
            buy_volume,
            sell_volume,
        }
    }

    /// Converts strongly-typed temporal/decimal input into a bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        ))
    }

    /// A bar participates in rendering and statistics iff `x`, `high` and
    /// `low` are all finite. `open`/`close` may still be NaN (wick-only bar).
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.x.is_finite() && self.high.is_finite() && self.low.is_finite()
    }

    /// Returns `true` when both `open` and `close` are finite, so a body
    /// rectangle can be derived.
    #[must_use]
    pub fn has_body(self) -> bool {
        self.open.is_finite() && self.close.is_finite()
    }

    /// Strict comparison: a tie (`close == open`) counts as decreasing.
    #[must_use]
    pub fn is_increasing(self) -> bool {
        self.close > self.open
    }

    /// Returns `true` when both volume sides are finite.
    #[must_use]
    pub fn has_volume_data(self) -> bool {
        self.buy_volume.is_finite() && self.sell_volume.is_finite()
    }
}
