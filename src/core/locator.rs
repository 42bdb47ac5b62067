use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::axis::AxisPair;
use crate::core::bar::OhlcvBar;
use crate::core::store::OhlcvSeriesStore;
use crate::core::window::find_window_start;

/// Field layout of the default hit-test label.
///
/// Named configuration rather than behavior: hosts that want their own
/// tracker text build it from [`HitResult::bar`] instead.
pub const DEFAULT_TRACKER_FORMAT: &str =
    "{title}\nX: {x}\nHigh: {high}\nLow: {low}\nOpen: {open}\nClose: {close}\nBuy Volume: {buy_volume}\nSell Volume: {sell_volume}";

/// Renders [`DEFAULT_TRACKER_FORMAT`] for one bar.
#[must_use]
pub fn format_tracker_label(title: &str, bar: OhlcvBar) -> String {
    format!(
        "{title}\nX: {}\nHigh: {}\nLow: {}\nOpen: {}\nClose: {}\nBuy Volume: {}\nSell Volume: {}",
        bar.x, bar.high, bar.low, bar.open, bar.close, bar.buy_volume, bar.sell_volume
    )
}

/// Outcome of a nearest-point query.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    pub index: usize,
    pub bar: OhlcvBar,
    /// Representative data point: the bar's x and close value.
    pub data_x: f64,
    pub value: f64,
    pub screen_x: f64,
    pub screen_y: f64,
    pub label: String,
}

/// Finds the bar nearest to a screen point for tracking/hit-testing.
///
/// The query point is inverse-transformed to data x and rejected outside a
/// one-`min_dx` tolerance band beyond the data extent, so near-edge clicks
/// still register. The window finder (seeded from, but never mutating, the
/// store's cached index) yields a candidate; it is compared against its
/// right neighbor by squared x-distance only, a deliberate simplification
/// for time-series tracking where the pointer sweeps horizontally.
#[must_use]
pub fn nearest_point(
    store: &OhlcvSeriesStore,
    axes: &AxisPair<'_>,
    screen_x: f64,
    _screen_y: f64,
    title: &str,
) -> Option<HitResult> {
    let items = store.items();
    let (first, last) = (items.first()?, items.last()?);

    if !screen_x.is_finite() {
        return None;
    }
    let target_x = axes.x.from_screen(screen_x);
    if !target_x.is_finite() {
        return None;
    }
    if target_x < first.x - store.min_dx() || target_x > last.x + store.min_dx() {
        return None;
    }

    let candidate = find_window_start(items, target_x, store.window_index());
    let neighbor = (candidate + 1).min(items.len() - 1);

    let mut candidates: SmallVec<[(OrderedFloat<f64>, usize); 2]> = SmallVec::new();
    for index in [candidate, neighbor] {
        let distance = items[index].x - target_x;
        let squared = distance * distance;
        if squared.is_finite() {
            candidates.push((OrderedFloat(squared), index));
        }
    }

    let (_, index) = candidates.into_iter().min_by_key(|entry| entry.0)?;
    let bar = items[index];

    Some(HitResult {
        index,
        bar,
        data_x: bar.x,
        value: bar.close,
        screen_x: axes.x.to_screen(bar.x),
        screen_y: axes.y.to_screen(bar.close),
        label: format_tracker_label(title, bar),
    })
}
