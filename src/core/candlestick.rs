use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis::AxisPair;
use crate::core::store::OhlcvSeriesStore;
use crate::core::window::find_window_start;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderTarget, ScreenRect};

/// Fraction of `min_dx` used as candle width when none is configured.
const AUTO_WIDTH_FRACTION: f64 = 0.80;

/// Fill-to-stroke intensity factor for candle outlines.
const STROKE_INTENSITY: f64 = 0.70;

/// Screen-space body heights below this many device units are drawn with the
/// doji fallback instead of a rectangle.
const DEGENERATE_BODY_PX: f64 = 1.0;

/// Visual configuration for candlestick rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlestickStyle {
    /// Candle half-width in data units; `<= 0` selects the automatic
    /// `0.80 × min_dx` width.
    pub candle_width: f64,
    pub stroke_thickness: f64,
    pub increasing_color: Color,
    pub decreasing_color: Color,
    /// Draw increasing bodies outline-only.
    pub positive_hollow: bool,
    /// Draw decreasing bodies outline-only.
    pub negative_hollow: bool,
}

impl Default for CandlestickStyle {
    fn default() -> Self {
        Self {
            candle_width: 0.0,
            stroke_thickness: 1.0,
            increasing_color: Color::rgb(0.10, 0.60, 0.25),
            decreasing_color: Color::rgb(0.75, 0.15, 0.15),
            positive_hollow: false,
            negative_hollow: false,
        }
    }
}

impl CandlestickStyle {
    pub fn validate(self) -> ChartResult<()> {
        if !self.candle_width.is_finite() {
            return Err(ChartError::InvalidData(
                "candle width must be finite".to_owned(),
            ));
        }
        if !self.stroke_thickness.is_finite() || self.stroke_thickness <= 0.0 {
            return Err(ChartError::InvalidData(
                "candle stroke thickness must be finite and > 0".to_owned(),
            ));
        }
        self.increasing_color.validate()?;
        self.decreasing_color.validate()
    }

    fn palette(self, increasing: bool) -> (Color, Color) {
        let base = if increasing {
            self.increasing_color
        } else {
            self.decreasing_color
        };
        let hollow = if increasing {
            self.positive_hollow
        } else {
            self.negative_hollow
        };
        let fill = if hollow { Color::TRANSPARENT } else { base };
        (fill, base.scale_intensity(STROKE_INTENSITY))
    }
}

/// Renders the visible candlesticks of `store` into `target`.
///
/// The walk starts at the window index resolved from the previous frame's
/// cached seed (which this pass advances), stops at the first bar beyond the
/// visible x range, and skips invalid bars without breaking. Bars with
/// finite high/low but NaN open/close render wick-only; a body whose two
/// transformed edges land within one device unit renders as two horizontal
/// cap lines so doji bars stay visible.
pub fn render_candlesticks(
    store: &mut OhlcvSeriesStore,
    axes: &AxisPair<'_>,
    style: &CandlestickStyle,
    clip: ScreenRect,
    target: &mut dyn RenderTarget,
) -> ChartResult<()> {
    axes.ensure_upright()?;
    style.validate()?;

    if store.items().is_empty() {
        return Ok(());
    }

    let (x_min, x_max) = axes.visible_x_range();
    let first = find_window_start(store.items(), x_min, store.window_index());
    store.set_window_index(first);

    let half_width_px = half_width_px(store, axes, style.candle_width, style.stroke_thickness);

    let mut drawn = 0usize;
    for bar in &store.items()[first..] {
        if bar.x > x_max {
            break;
        }
        if !bar.is_valid() {
            continue;
        }

        let center_x = axes.x.to_screen(bar.x);
        let high_y = axes.y.to_screen(bar.high);
        let low_y = axes.y.to_screen(bar.low);
        let wick_top = high_y.min(low_y);
        let wick_bottom = high_y.max(low_y);
        let (fill, stroke) = style.palette(bar.is_increasing());

        if !bar.has_body() {
            target.draw_clipped_line(
                clip,
                LinePrimitive::new(
                    center_x,
                    wick_top,
                    center_x,
                    wick_bottom,
                    style.stroke_thickness,
                    stroke,
                ),
            )?;
            drawn += 1;
            continue;
        }

        let open_y = axes.y.to_screen(bar.open);
        let close_y = axes.y.to_screen(bar.close);
        let body_top = open_y.min(close_y);
        let body_bottom = open_y.max(close_y);

        target.draw_clipped_line(
            clip,
            LinePrimitive::new(
                center_x,
                wick_top,
                center_x,
                body_top,
                style.stroke_thickness,
                stroke,
            ),
        )?;
        target.draw_clipped_line(
            clip,
            LinePrimitive::new(
                center_x,
                body_bottom,
                center_x,
                wick_bottom,
                style.stroke_thickness,
                stroke,
            ),
        )?;

        let left = center_x - half_width_px;
        let right = center_x + half_width_px;

        if body_bottom - body_top < DEGENERATE_BODY_PX {
            // Doji fallback: a zero-height rectangle disappears under
            // anti-aliasing, two cap lines do not.
            for y in [body_top, body_bottom] {
                target.draw_clipped_line(
                    clip,
                    LinePrimitive::new(left, y, right, y, DEGENERATE_BODY_PX, stroke),
                )?;
            }
        } else {
            target.draw_clipped_rect(
                clip,
                RectPrimitive::new(
                    ScreenRect::from_corners(left, body_top, right, body_bottom),
                    fill,
                )
                .with_border(style.stroke_thickness, stroke),
            )?;
        }
        drawn += 1;
    }

    trace!(start = first, drawn, "candlestick render walk");
    Ok(())
}

/// Draws the fixed-proportion legend glyph: full-height wick, body between
/// 30% and 70% of the box height, increasing palette.
pub fn render_candlestick_legend(
    style: &CandlestickStyle,
    legend_box: ScreenRect,
    target: &mut dyn RenderTarget,
) -> ChartResult<()> {
    style.validate()?;
    legend_box.validate()?;

    let x_mid = legend_box.left + legend_box.width / 2.0;
    let body_top = legend_box.top + legend_box.height * 0.3;
    let body_bottom = legend_box.top + legend_box.height * 0.7;
    let half_width = legend_box.width * 0.75 / 2.0;
    let (fill, stroke) = style.palette(true);

    target.draw_line(LinePrimitive::new(
        x_mid,
        legend_box.top,
        x_mid,
        legend_box.bottom(),
        style.stroke_thickness,
        stroke,
    ))?;
    target.draw_rect(
        RectPrimitive::new(
            ScreenRect::from_corners(x_mid - half_width, body_top, x_mid + half_width, body_bottom),
            fill,
        )
        .with_border(style.stroke_thickness, stroke),
    )
}

/// Converts the effective data-unit candle width to a screen half-width,
/// subtracting the stroke so adjacent candle borders do not overlap at high
/// density.
fn half_width_px(
    store: &OhlcvSeriesStore,
    axes: &AxisPair<'_>,
    candle_width: f64,
    stroke_thickness: f64,
) -> f64 {
    let width_data = if candle_width > 0.0 {
        candle_width
    } else {
        store.min_dx() * AUTO_WIDTH_FRACTION
    };

    let reference_x = store.items()[store.window_index()].x;
    let reference_x = if reference_x.is_finite() {
        reference_x
    } else {
        axes.x.actual_min()
    };

    (axes.x.to_screen(reference_x + width_data) - axes.x.to_screen(reference_x) - stroke_thickness)
        .max(0.0)
}
