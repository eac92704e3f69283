//! Per-pipeline frame storage.

use camgrade_core::{BgrFrame, Size};

/// Buffers owned by one [`FramePipeline`](crate::FramePipeline).
///
/// Sized once at construction and reused for every frame:
///
/// - `rgb` - float RGB at working size, graded in place
/// - `working` - 8-bit BGR at working size, only when it differs from output
/// - `output` - 8-bit BGR at output size, handed back to the caller
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    working_size: Size,
    rgb: Vec<[f32; 3]>,
    working: BgrFrame,
    output: BgrFrame,
}

impl FrameBuffers {
    /// Allocates buffers for the given sizes.
    pub fn new(working_size: Size, output_size: Size) -> Self {
        let working = if working_size == output_size {
            BgrFrame::default()
        } else {
            BgrFrame::new(working_size.width, working_size.height)
        };
        Self {
            working_size,
            rgb: vec![[0.0; 3]; working_size.pixel_count()],
            working,
            output: BgrFrame::new(output_size.width, output_size.height),
        }
    }

    /// Working resolution.
    #[inline]
    pub fn working_size(&self) -> Size {
        self.working_size
    }

    /// Output resolution.
    #[inline]
    pub fn output_size(&self) -> Size {
        self.output.size()
    }

    /// True when the working result is resized before delivery.
    #[inline]
    pub fn needs_resize(&self) -> bool {
        self.working_size != self.output.size()
    }

    /// Float working buffer.
    #[inline]
    pub fn rgb(&self) -> &[[f32; 3]] {
        &self.rgb
    }

    /// Last delivered frame.
    #[inline]
    pub fn output(&self) -> &BgrFrame {
        &self.output
    }

    /// Split borrow: float buffer, working BGR, output BGR.
    pub(crate) fn parts_mut(&mut self) -> (&mut [[f32; 3]], &mut BgrFrame, &mut BgrFrame) {
        (&mut self.rgb, &mut self.working, &mut self.output)
    }
}
