use std::io::{self, Write};

/// An in-memory [`Write`] sink for asserting on what a runner printed.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    buffer: Vec<u8>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }

    pub fn last_line(&self) -> Option<String> {
        self.lines().pop()
    }

    pub fn contains_line(&self, line: &str) -> bool {
        self.text().lines().any(|l| l == line)
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
