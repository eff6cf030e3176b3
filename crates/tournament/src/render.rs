//! Console board display

use std::fmt::Display;
use std::io::{self, Write};

use crate::episode::Renderer;

/// Writes each board's `Display` form followed by a blank line.
#[derive(Debug)]
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<B: Display, W: Write> Renderer<B> for ConsoleRenderer<W> {
    fn render(&mut self, board: &B) -> anyhow::Result<()> {
        writeln!(self.out, "{board}\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
