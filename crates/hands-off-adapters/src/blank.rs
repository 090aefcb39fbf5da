//! Frame source producing black frames, for replays without image data.

use hands_off_core::{FrameSource, PixelFormat, RawFrame};

use crate::pacing::FramePacer;

/// Yields `count` black RGB frames of a fixed size.
///
/// Pairs with a landmark recording when no captured images exist: the
/// frames only carry sequence numbers for the recording to key on.
#[derive(Debug)]
pub struct BlankFrameSource {
    width: u32,
    height: u32,
    count: u64,
    next: u64,
    pacer: FramePacer,
}

impl BlankFrameSource {
    /// Creates a source of `count` frames of `width` x `height`.
    #[must_use]
    pub const fn new(width: u32, height: u32, count: u64) -> Self {
        Self {
            width,
            height,
            count,
            next: 0,
            pacer: FramePacer::unpaced(),
        }
    }

    /// Paces frames like a camera running at the pacer's rate.
    #[must_use]
    pub fn with_pacer(mut self, pacer: FramePacer) -> Self {
        self.pacer = pacer;
        self
    }
}

impl FrameSource for BlankFrameSource {
    fn next_frame(&mut self) -> anyhow::Result<Option<RawFrame>> {
        if self.next >= self.count {
            return Ok(None);
        }
        self.pacer.wait();

        let sequence = self.next;
        self.next += 1;
        let data = vec![0; PixelFormat::Rgb8.buffer_len(self.width, self.height)];
        Ok(Some(RawFrame::new(
            sequence,
            self.width,
            self.height,
            PixelFormat::Rgb8,
            data,
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_count_frames() {
        let mut source = BlankFrameSource::new(4, 2, 3);
        let mut sequences = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            assert_eq!(frame.data.len(), 24);
            sequences.push(frame.sequence);
        }
        assert_eq!(sequences, vec![0, 1, 2]);
        assert!(source.next_frame().unwrap().is_none());
    }
}
