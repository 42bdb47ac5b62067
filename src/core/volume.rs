use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::axis::AxisPair;
use crate::core::store::OhlcvSeriesStore;
use crate::core::window::find_window_start;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RectPrimitive, RenderTarget, ScreenRect};

const AUTO_WIDTH_FRACTION: f64 = 0.80;
const STROKE_INTENSITY: f64 = 0.70;

/// Policy for rendering split buy/sell volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeStyle {
    /// No volume output.
    #[default]
    None,
    /// One bar per observation: the net `|buy − sell|`, colored by the
    /// dominant side.
    Combined,
    /// Both sides above the baseline, dominant side first, smaller side
    /// stacked on top of it.
    Stacked,
    /// Buy volume above the baseline, sell volume mirrored below it.
    PositiveNegative,
}

/// Visual configuration for volume bar rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBarStyle {
    pub style: VolumeStyle,
    /// Bar half-width in data units; `<= 0` selects the automatic
    /// `0.80 × min_dx` width.
    pub bar_width: f64,
    pub stroke_thickness: f64,
    pub positive_color: Color,
    pub negative_color: Color,
    /// Draw buy-side bars outline-only.
    pub positive_hollow: bool,
    /// Draw sell-side bars outline-only.
    pub negative_hollow: bool,
}

impl Default for VolumeBarStyle {
    fn default() -> Self {
        Self {
            style: VolumeStyle::Combined,
            bar_width: 0.0,
            stroke_thickness: 1.0,
            positive_color: Color::rgb(0.10, 0.60, 0.25),
            negative_color: Color::rgb(0.75, 0.15, 0.15),
            positive_hollow: false,
            negative_hollow: false,
        }
    }
}

impl VolumeBarStyle {
    pub fn validate(self) -> ChartResult<()> {
        if !self.bar_width.is_finite() {
            return Err(ChartError::InvalidData(
                "volume bar width must be finite".to_owned(),
            ));
        }
        if !self.stroke_thickness.is_finite() || self.stroke_thickness <= 0.0 {
            return Err(ChartError::InvalidData(
                "volume stroke thickness must be finite and > 0".to_owned(),
            ));
        }
        self.positive_color.validate()?;
        self.negative_color.validate()
    }

    fn palette(self, positive: bool) -> (Color, Color) {
        let base = if positive {
            self.positive_color
        } else {
            self.negative_color
        };
        let hollow = if positive {
            self.positive_hollow
        } else {
            self.negative_hollow
        };
        let fill = if hollow { Color::TRANSPARENT } else { base };
        (fill, base.scale_intensity(STROKE_INTENSITY))
    }
}

/// Renders the visible volume bars of `store` into `target`.
///
/// `axes.y` must be the volume axis; its zero line anchors every style.
/// The walk shares the store's cached window index with the candlestick
/// pass, so a combined view resolves the window once per frame. Bars with
/// non-finite x/high/low or non-finite volume sides are skipped.
pub fn render_volume(
    store: &mut OhlcvSeriesStore,
    axes: &AxisPair<'_>,
    style: &VolumeBarStyle,
    clip: ScreenRect,
    target: &mut dyn RenderTarget,
) -> ChartResult<()> {
    axes.ensure_upright()?;
    style.validate()?;

    if style.style == VolumeStyle::None || store.items().is_empty() {
        return Ok(());
    }

    let (x_min, x_max) = axes.visible_x_range();
    let first = find_window_start(store.items(), x_min, store.window_index());
    store.set_window_index(first);

    let width_data = if style.bar_width > 0.0 {
        style.bar_width
    } else {
        store.min_dx() * AUTO_WIDTH_FRACTION
    };
    let reference_x = store.items()[first].x;
    let reference_x = if reference_x.is_finite() {
        reference_x
    } else {
        x_min
    };
    let half_width_px = (axes.x.to_screen(reference_x + width_data)
        - axes.x.to_screen(reference_x)
        - style.stroke_thickness)
        .max(0.0);

    let y0 = axes.y.to_screen(0.0);
    let mut drawn = 0usize;

    for bar in &store.items()[first..] {
        if bar.x > x_max {
            break;
        }
        if !bar.is_valid() || !bar.has_volume_data() {
            continue;
        }

        let center_x = axes.x.to_screen(bar.x);
        let left = center_x - half_width_px;
        let right = center_x + half_width_px;

        match style.style {
            VolumeStyle::None => unreachable!("handled by the early return"),
            VolumeStyle::Combined => {
                let net = bar.buy_volume - bar.sell_volume;
                let (fill, stroke) = style.palette(net > 0.0);
                let y_net = axes.y.to_screen(net.abs());
                target.draw_clipped_rect(
                    clip,
                    RectPrimitive::new(ScreenRect::from_corners(left, y_net, right, y0), fill)
                        .with_border(style.stroke_thickness, stroke),
                )?;
            }
            VolumeStyle::PositiveNegative => {
                // Both sides are always emitted, zero-height included, so the
                // axis reads consistently across bars.
                let (buy_fill, buy_stroke) = style.palette(true);
                let y_buy = axes.y.to_screen(bar.buy_volume);
                target.draw_clipped_rect(
                    clip,
                    RectPrimitive::new(ScreenRect::from_corners(left, y_buy, right, y0), buy_fill)
                        .with_border(style.stroke_thickness, buy_stroke),
                )?;

                let (sell_fill, sell_stroke) = style.palette(false);
                let y_sell = axes.y.to_screen(-bar.sell_volume);
                target.draw_clipped_rect(
                    clip,
                    RectPrimitive::new(
                        ScreenRect::from_corners(left, y_sell, right, y0),
                        sell_fill,
                    )
                    .with_border(style.stroke_thickness, sell_stroke),
                )?;
            }
            VolumeStyle::Stacked => {
                // Dominant side sits on the baseline, the smaller side is
                // offset by the dominant extent; stacking them the other way
                // round overlaps instead of stacks.
                let buy_dominant = bar.buy_volume > bar.sell_volume;
                let (dominant, smaller) = if buy_dominant {
                    (bar.buy_volume, bar.sell_volume)
                } else {
                    (bar.sell_volume, bar.buy_volume)
                };

                let y_dominant = axes.y.to_screen(dominant);
                let y_total = axes.y.to_screen(dominant + smaller);

                let (dom_fill, dom_stroke) = style.palette(buy_dominant);
                target.draw_clipped_rect(
                    clip,
                    RectPrimitive::new(
                        ScreenRect::from_corners(left, y_dominant, right, y0),
                        dom_fill,
                    )
                    .with_border(style.stroke_thickness, dom_stroke),
                )?;

                let (small_fill, small_stroke) = style.palette(!buy_dominant);
                target.draw_clipped_rect(
                    clip,
                    RectPrimitive::new(
                        ScreenRect::from_corners(left, y_total, right, y_dominant),
                        small_fill,
                    )
                    .with_border(style.stroke_thickness, small_stroke),
                )?;
            }
        }
        drawn += 1;
    }

    trace!(start = first, drawn, style = ?style.style, "volume render walk");
    Ok(())
}

/// Draws the legend swatch: one positive-palette bar filling the middle half
/// of the box.
pub fn render_volume_legend(
    style: &VolumeBarStyle,
    legend_box: ScreenRect,
    target: &mut dyn RenderTarget,
) -> ChartResult<()> {
    style.validate()?;
    legend_box.validate()?;

    let (fill, stroke) = style.palette(true);
    let inset_x = legend_box.width * 0.25;
    let inset_y = legend_box.height * 0.25;
    target.draw_rect(
        RectPrimitive::new(
            ScreenRect::from_corners(
                legend_box.left + inset_x,
                legend_box.top + inset_y,
                legend_box.right() - inset_x,
                legend_box.bottom() - inset_y,
            ),
            fill,
        )
        .with_border(style.stroke_thickness, stroke),
    )
}
