//! Output sinks for rendered diagrams.

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};

/// A writable stream that must be closed once rendering is done.
///
/// Closing is separate from writing so callers can tell a failed write
/// apart from a failed close.
pub trait Sink: Write {
    /// Flush and release the stream.
    fn close(&mut self) -> io::Result<()>;
}

impl Sink for Vec<u8> {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Sink for File {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl Sink for Stdout {
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl<W: Sink> Sink for BufWriter<W> {
    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.get_mut().close()
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}
