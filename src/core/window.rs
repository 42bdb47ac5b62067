use crate::core::OhlcvBar;

/// Anything with an ordered horizontal position can be window-searched.
///
/// The finder is generic so candlestick bars and simpler high/low items share
/// one implementation instead of near-duplicate copies per series type.
pub trait SeriesItem {
    fn x(&self) -> f64;
}

impl SeriesItem for OhlcvBar {
    fn x(&self) -> f64 {
        self.x
    }
}

impl SeriesItem for f64 {
    fn x(&self) -> f64 {
        *self
    }
}

/// Locates the start of the visible window in an ordered series.
///
/// Returns the index of the rightmost item whose `x` is `<= target_x`:
/// 0 when `target_x` lies below every item (the caller scans from the front
/// and bails immediately), the last index when it lies at or beyond the end,
/// and 0 for an empty slice.
///
/// `seed` is the first probe instead of the bracket midpoint. Render passes
/// feed the previous frame's result back in, so under smooth panning the
/// bracket collapses after a couple of probes regardless of series length.
/// Probes inside the bracket are then re-estimated by linear interpolation
/// over the bracket's actual endpoint x values, which converges faster than
/// bisection on roughly even time spacing while staying correct on irregular
/// spacing. A seed past the end of the slice is clamped.
///
/// With duplicate x values any matching index may be returned; stores with
/// strictly ascending x are unaffected.
#[must_use]
pub fn find_window_start<T: SeriesItem>(items: &[T], target_x: f64, seed: usize) -> usize {
    find_window_start_counted(items, target_x, seed).0
}

/// Same search, also reporting how many probes the bracket needed.
/// Kept internal; the probe count only matters to the locality tests.
pub(crate) fn find_window_start_counted<T: SeriesItem>(
    items: &[T],
    target_x: f64,
    seed: usize,
) -> (usize, u32) {
    let Some(last) = items.len().checked_sub(1) else {
        return (0, 0);
    };

    let mut start = 0usize;
    let mut end = last;
    let mut last_guess = 0usize;
    let mut guess = seed.min(last);
    let mut probes = 0u32;

    loop {
        probes += 1;
        let guess_x = items[guess].x();

        if guess_x == target_x {
            return (guess, probes);
        }

        if guess_x > target_x {
            // Guessed too high: everything at or above `guess` is out.
            if guess == start {
                return (last_guess, probes);
            }
            end = guess - 1;
        } else {
            // Guessed too low: `guess` is the best feasible answer so far.
            last_guess = guess;
            if guess == end {
                return (last_guess, probes);
            }
            start = guess + 1;
        }

        if start == end {
            let final_x = items[start].x();
            let index = if final_x <= target_x { start } else { last_guess };
            return (index, probes);
        }

        let start_x = items[start].x();
        let end_x = items[end].x();
        if !(end_x > start_x) {
            // Zero-width bracket denominator (duplicate timestamps): fall
            // back to the last feasible guess instead of dividing by zero.
            return (last_guess, probes);
        }

        let slope = (end - start + 1) as f64 / (end_x - start_x);
        let probe = start as f64 + (target_x - start_x) * slope;
        guess = if probe <= start as f64 {
            start
        } else if probe >= end as f64 {
            end
        } else {
            probe as usize
        };
    }
}
