pub mod axis;
pub mod bar;
pub mod candlestick;
pub mod compositor;
pub mod convert;
pub mod locator;
pub mod store;
pub mod volume;
pub mod window;

pub use axis::{AxisPair, AxisTransform, LinearAxis};
pub use bar::OhlcvBar;
pub use candlestick::{CandlestickStyle, render_candlestick_legend, render_candlesticks};
pub use compositor::{DualAxisCompositor, PaneLayout, VolumeAggregates};
pub use locator::{DEFAULT_TRACKER_FORMAT, HitResult, format_tracker_label, nearest_point};
pub use store::OhlcvSeriesStore;
pub use volume::{VolumeBarStyle, VolumeStyle, render_volume, render_volume_legend};
pub use window::{SeriesItem, find_window_start};
