mod primitives;
mod recorder;

pub use primitives::{Color, LinePrimitive, LineStrokeStyle, RectPrimitive, ScreenRect};
pub use recorder::{RecordedLine, RecordedRect, RecordingRenderTarget};

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// The geometry builders emit finished pixel-space primitives through this
/// seam, so backend code stays isolated from series and indexing logic. The
/// clipped variants carry an explicit clip rectangle; applying it is the
/// backend's job.
pub trait RenderTarget {
    fn draw_line(&mut self, line: LinePrimitive) -> ChartResult<()>;
    fn draw_rect(&mut self, rect: RectPrimitive) -> ChartResult<()>;
    fn draw_clipped_line(&mut self, clip: ScreenRect, line: LinePrimitive) -> ChartResult<()>;
    fn draw_clipped_rect(&mut self, clip: ScreenRect, rect: RectPrimitive) -> ChartResult<()>;
}
