use approx::assert_relative_eq;
use kline_core::core::{
    AxisPair, LinearAxis, OhlcvBar, OhlcvSeriesStore, nearest_point,
};

fn bar(x: f64, close: f64) -> OhlcvBar {
    OhlcvBar::with_volume(x, close - 1.0, close + 2.0, close - 2.0, close, 10.0, 5.0)
}

fn store() -> OhlcvSeriesStore {
    OhlcvSeriesStore::from_bars((0..5).map(|i| bar(f64::from(i), 50.0 + f64::from(i))).collect())
        .expect("store")
}

/// x: [0, 4] data → [0, 400] px; y: [0, 100] data → [500, 0] px.
fn axes() -> (LinearAxis, LinearAxis) {
    let x = LinearAxis::new(0.0, 4.0, 0.0, 400.0).expect("x axis");
    let y = LinearAxis::new(0.0, 100.0, 500.0, 0.0).expect("y axis");
    (x, y)
}

#[test]
fn picks_the_closer_of_candidate_and_neighbor() {
    let store = store();
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);

    let hit = nearest_point(&store, &pair, 240.0, 0.0, "Series").expect("hit");
    assert_eq!(hit.index, 2);

    let hit = nearest_point(&store, &pair, 260.0, 0.0, "Series").expect("hit");
    assert_eq!(hit.index, 3);
}

#[test]
fn hit_carries_close_value_and_screen_position() {
    let store = store();
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);

    let hit = nearest_point(&store, &pair, 205.0, 0.0, "Series").expect("hit");
    assert_eq!(hit.index, 2);
    assert_relative_eq!(hit.data_x, 2.0);
    assert_relative_eq!(hit.value, 52.0);
    assert_relative_eq!(hit.screen_x, 200.0);
    assert_relative_eq!(hit.screen_y, 500.0 - 52.0 * 5.0);
}

#[test]
fn tolerance_band_extends_one_min_dx_past_the_ends() {
    let store = store();
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);

    // Exactly first.x − min_dx (data x = −1) still hits the first bar.
    let hit = nearest_point(&store, &pair, -100.0, 0.0, "Series").expect("edge hit");
    assert_eq!(hit.index, 0);

    // One data unit further out falls outside the band.
    assert!(nearest_point(&store, &pair, -200.0, 0.0, "Series").is_none());

    // Same on the right edge: data x = 5 hits, data x = 6 misses.
    assert!(nearest_point(&store, &pair, 500.0, 0.0, "Series").is_some());
    assert!(nearest_point(&store, &pair, 600.0, 0.0, "Series").is_none());
}

#[test]
fn label_lists_every_ohlcv_field() {
    let store = store();
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);

    let hit = nearest_point(&store, &pair, 200.0, 0.0, "BTC/USD").expect("hit");
    assert!(hit.label.starts_with("BTC/USD\n"));
    for field in ["X: 2", "High: 54", "Low: 50", "Open: 51", "Close: 52", "Buy Volume: 10", "Sell Volume: 5"] {
        assert!(hit.label.contains(field), "missing `{field}` in {}", hit.label);
    }
}

#[test]
fn empty_store_and_non_finite_input_return_none() {
    let empty = OhlcvSeriesStore::new();
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);

    assert!(nearest_point(&empty, &pair, 200.0, 0.0, "Series").is_none());

    let store = store();
    assert!(nearest_point(&store, &pair, f64::NAN, 0.0, "Series").is_none());
}

#[test]
fn hit_testing_leaves_the_render_seed_untouched() {
    let store = store();
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);

    let _ = nearest_point(&store, &pair, 380.0, 0.0, "Series");
    assert_eq!(store.window_index(), 0);
}
