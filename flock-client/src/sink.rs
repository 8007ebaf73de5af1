use anyhow::{Context, Result};
use flock_shared::FrameSnapshot;
use std::io::Write;

/// Receives the flock state after every tick. Stands in for a renderer.
pub trait FrameSink {
    fn present(&mut self, frame: &FrameSnapshot) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: FrameSink + ?Sized> FrameSink for Box<T> {
    fn present(&mut self, frame: &FrameSnapshot) -> Result<()> {
        (**self).present(frame)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Writes one JSON object per frame, newline separated.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn present(&mut self, frame: &FrameSnapshot) -> Result<()> {
        let line = frame.to_json_line().context("Failed to encode frame")?;
        writeln!(self.writer, "{}", line)
            .with_context(|| format!("Failed to write frame {}", frame.tick))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush frame output")
    }
}

/// Keeps every frame in memory.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<FrameSnapshot>,
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &FrameSnapshot) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Drops every frame; useful when only the logged statistics matter.
pub struct DiscardSink;

impl FrameSink for DiscardSink {
    fn present(&mut self, _frame: &FrameSnapshot) -> Result<()> {
        Ok(())
    }
}
