//! Headless renderer that writes one line per call.

use super::call::{Directive, DrawCall};
use super::Renderer;
use crate::error::Result;
use std::io::Write;

/// Writes each draw call and directive as a text line, then `show`.
#[derive(Debug)]
pub struct TranscriptRenderer<W: Write> {
    out: W,
}

impl<W: Write> TranscriptRenderer<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TranscriptRenderer<W> {
    fn draw(&mut self, call: DrawCall) -> Result<()> {
        writeln!(self.out, "{call}")?;
        Ok(())
    }

    fn apply(&mut self, directive: Directive) -> Result<()> {
        writeln!(self.out, "{directive}")?;
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        writeln!(self.out, "show")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_calls_then_show() {
        let mut renderer = TranscriptRenderer::new(Vec::new());
        renderer
            .draw(DrawCall::Violin {
                groups: vec![vec![1.0, 2.0]],
                show_means: true,
            })
            .unwrap();
        renderer.apply(Directive::Legend).unwrap();
        renderer.show().unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "violin groups=[[1, 2]] showmeans=true\nlegend\nshow\n");
    }
}
