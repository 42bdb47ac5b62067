use crate::error::ChartResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderTarget, ScreenRect};

/// One recorded line emission with its clip region, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedLine {
    pub clip: Option<ScreenRect>,
    pub line: LinePrimitive,
}

/// One recorded rectangle emission with its clip region, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedRect {
    pub clip: Option<ScreenRect>,
    pub rect: RectPrimitive,
}

/// Capturing render target used by tests and headless hosts.
///
/// Every primitive is validated on receipt, so invalid geometry surfaces at
/// the emission site rather than inside a real backend.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderTarget {
    pub lines: Vec<RecordedLine>,
    pub rects: Vec<RecordedRect>,
}

impl RecordingRenderTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.rects.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty()
    }
}

impl RenderTarget for RecordingRenderTarget {
    fn draw_line(&mut self, line: LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        self.lines.push(RecordedLine { clip: None, line });
        Ok(())
    }

    fn draw_rect(&mut self, rect: RectPrimitive) -> ChartResult<()> {
        rect.validate()?;
        self.rects.push(RecordedRect { clip: None, rect });
        Ok(())
    }

    fn draw_clipped_line(&mut self, clip: ScreenRect, line: LinePrimitive) -> ChartResult<()> {
        clip.validate()?;
        line.validate()?;
        self.lines.push(RecordedLine {
            clip: Some(clip),
            line,
        });
        Ok(())
    }

    fn draw_clipped_rect(&mut self, clip: ScreenRect, rect: RectPrimitive) -> ChartResult<()> {
        clip.validate()?;
        rect.validate()?;
        self.rects.push(RecordedRect {
            clip: Some(clip),
            rect,
        });
        Ok(())
    }
}
