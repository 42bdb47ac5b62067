//! kline-core: financial series indexing and candlestick/volume geometry.
//!
//! This crate is the data-and-geometry core of a charting stack: it owns the
//! ordered OHLCV series, the seeded window search that keeps panning over
//! large series cheap, and the candlestick/volume primitive generation.
//! Axis math and actual drawing stay behind the [`core::AxisTransform`] and
//! [`render::RenderTarget`] seams implemented by the host.

pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use crate::core::{OhlcvBar, OhlcvSeriesStore, VolumeStyle, find_window_start};
pub use crate::error::{ChartError, ChartResult};
