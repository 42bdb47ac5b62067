use approx::assert_relative_eq;
use kline_core::core::{
    AxisPair, CandlestickStyle, LinearAxis, OhlcvBar, OhlcvSeriesStore, render_candlestick_legend,
    render_candlesticks,
};
use kline_core::error::ChartError;
use kline_core::render::{RecordingRenderTarget, ScreenRect};

fn candle(x: f64, open: f64, high: f64, low: f64, close: f64) -> OhlcvBar {
    OhlcvBar::new(x, open, high, low, close)
}

fn store_from(bars: Vec<OhlcvBar>) -> OhlcvSeriesStore {
    OhlcvSeriesStore::from_bars(bars).expect("valid store")
}

/// x: [0, 10] data → [0, 1000] px; y: [0, 100] data → [500, 0] px (inverted).
fn axes() -> (LinearAxis, LinearAxis) {
    let x = LinearAxis::new(0.0, 10.0, 0.0, 1000.0).expect("x axis");
    let y = LinearAxis::new(0.0, 100.0, 500.0, 0.0).expect("y axis");
    (x, y)
}

fn clip() -> ScreenRect {
    ScreenRect::new(0.0, 0.0, 1000.0, 500.0)
}

#[test]
fn increasing_candle_produces_wicks_and_body() {
    let mut store = store_from(vec![candle(2.0, 40.0, 70.0, 30.0, 60.0)]);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);
    let style = CandlestickStyle {
        candle_width: 1.0,
        ..CandlestickStyle::default()
    };
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(&mut store, &pair, &style, clip(), &mut target).expect("render");

    assert_eq!(target.lines.len(), 2);
    assert_eq!(target.rects.len(), 1);

    // Upper wick: high (y=150) down to body top (close at y=200).
    let upper = target.lines[0].line;
    assert_relative_eq!(upper.x1, 200.0);
    assert_relative_eq!(upper.y1, 150.0);
    assert_relative_eq!(upper.y2, 200.0);

    // Lower wick: body bottom (open at y=300) down to low (y=350).
    let lower = target.lines[1].line;
    assert_relative_eq!(lower.y1, 300.0);
    assert_relative_eq!(lower.y2, 350.0);

    // Body: 1.0 data units wide = 100 px, minus the 1 px stroke.
    let body = target.rects[0].rect;
    assert_relative_eq!(body.rect.left, 200.0 - 99.0);
    assert_relative_eq!(body.rect.right(), 200.0 + 99.0);
    assert_relative_eq!(body.rect.top, 200.0);
    assert_relative_eq!(body.rect.bottom(), 300.0);
    assert_eq!(body.fill, style.increasing_color);
    assert_eq!(target.rects[0].clip, Some(clip()));
}

#[test]
fn doji_body_renders_as_two_cap_lines_instead_of_empty_rect() {
    let mut store = store_from(vec![candle(2.0, 50.0, 60.0, 40.0, 50.0)]);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(
        &mut store,
        &pair,
        &CandlestickStyle::default(),
        clip(),
        &mut target,
    )
    .expect("render");

    // Two wick segments plus two 1-px caps; no rectangle at all.
    assert_eq!(target.rects.len(), 0);
    assert_eq!(target.lines.len(), 4);

    let caps: Vec<_> = target
        .lines
        .iter()
        .filter(|recorded| recorded.line.y1 == recorded.line.y2)
        .collect();
    assert_eq!(caps.len(), 2);
    for cap in caps {
        assert_relative_eq!(cap.line.y1, 250.0);
        assert_relative_eq!(cap.line.stroke_width, 1.0);
        assert!(cap.line.x2 > cap.line.x1);
    }
}

#[test]
fn tie_close_equals_open_uses_decreasing_palette() {
    let mut store = store_from(vec![candle(2.0, 50.0, 60.0, 40.0, 50.0)]);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);
    let style = CandlestickStyle::default();
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(&mut store, &pair, &style, clip(), &mut target).expect("render");

    let expected_stroke = style.decreasing_color.scale_intensity(0.70);
    for recorded in &target.lines {
        assert_eq!(recorded.line.color, expected_stroke);
    }
}

#[test]
fn invalid_bars_are_skipped_without_breaking_the_walk() {
    let mut store = store_from(vec![
        candle(1.0, 40.0, 70.0, 30.0, 60.0),
        candle(2.0, 40.0, f64::NAN, 30.0, 60.0),
        candle(3.0, 60.0, 70.0, 30.0, 40.0),
    ]);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(
        &mut store,
        &pair,
        &CandlestickStyle::default(),
        clip(),
        &mut target,
    )
    .expect("render");

    assert_eq!(target.rects.len(), 2);
}

#[test]
fn nan_open_renders_wick_only() {
    let mut store = store_from(vec![candle(2.0, f64::NAN, 70.0, 30.0, 60.0)]);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(
        &mut store,
        &pair,
        &CandlestickStyle::default(),
        clip(),
        &mut target,
    )
    .expect("render");

    assert_eq!(target.rects.len(), 0);
    assert_eq!(target.lines.len(), 1);
    let wick = target.lines[0].line;
    assert_relative_eq!(wick.y1, 150.0);
    assert_relative_eq!(wick.y2, 350.0);
}

#[test]
fn walk_stops_at_first_bar_beyond_visible_max() {
    let bars: Vec<OhlcvBar> = (0..20)
        .map(|i| candle(f64::from(i), 40.0, 70.0, 30.0, 60.0))
        .collect();
    let mut store = store_from(bars);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(
        &mut store,
        &pair,
        &CandlestickStyle::default(),
        clip(),
        &mut target,
    )
    .expect("render");

    // Visible x range is [0, 10]: bars 0..=10 drawn, 11..19 never visited.
    assert_eq!(target.rects.len(), 11);
}

#[test]
fn render_advances_the_cached_window_seed() {
    let bars: Vec<OhlcvBar> = (0..100)
        .map(|i| candle(f64::from(i), 40.0, 70.0, 30.0, 60.0))
        .collect();
    let mut store = store_from(bars);
    let x = LinearAxis::new(42.0, 52.0, 0.0, 1000.0).expect("x axis");
    let y = LinearAxis::new(0.0, 100.0, 500.0, 0.0).expect("y axis");
    let pair = AxisPair::new(&x, &y);
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(
        &mut store,
        &pair,
        &CandlestickStyle::default(),
        clip(),
        &mut target,
    )
    .expect("render");

    assert_eq!(store.window_index(), 42);
}

#[test]
fn transposed_axes_are_rejected() {
    let mut store = store_from(vec![candle(2.0, 40.0, 70.0, 30.0, 60.0)]);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y).with_transposed(true);
    let mut target = RecordingRenderTarget::new();

    let err = render_candlesticks(
        &mut store,
        &pair,
        &CandlestickStyle::default(),
        clip(),
        &mut target,
    )
    .expect_err("transposed must fail");
    assert!(matches!(err, ChartError::TransposedAxes));
    assert!(target.is_empty());
}

#[test]
fn hollow_candles_keep_stroke_but_drop_fill() {
    let mut store = store_from(vec![candle(2.0, 40.0, 70.0, 30.0, 60.0)]);
    let (x, y) = axes();
    let pair = AxisPair::new(&x, &y);
    let style = CandlestickStyle {
        positive_hollow: true,
        ..CandlestickStyle::default()
    };
    let mut target = RecordingRenderTarget::new();

    render_candlesticks(&mut store, &pair, &style, clip(), &mut target).expect("render");

    let body = target.rects[0].rect;
    assert!(body.fill.is_transparent());
    assert!(body.border_width > 0.0);
    assert!(!body.border_color.is_transparent());
}

#[test]
fn legend_glyph_is_a_fixed_proportion_miniature() {
    let style = CandlestickStyle::default();
    let mut target = RecordingRenderTarget::new();
    let legend_box = ScreenRect::new(0.0, 0.0, 20.0, 20.0);

    render_candlestick_legend(&style, legend_box, &mut target).expect("legend");

    assert_eq!(target.lines.len(), 1);
    assert_eq!(target.rects.len(), 1);

    let wick = target.lines[0].line;
    assert_relative_eq!(wick.x1, 10.0);
    assert_relative_eq!(wick.y1, 0.0);
    assert_relative_eq!(wick.y2, 20.0);

    let body = target.rects[0].rect.rect;
    assert_relative_eq!(body.top, 6.0);
    assert_relative_eq!(body.bottom(), 14.0);
    assert_relative_eq!(body.width, 15.0);
}
