//! Report rendering

use crate::window::AddressCounts;
use std::io::{self, Write};

/// Separator printed after each report block
const FOOTER: &str = "---------------------------";

/// Renders one report block per epoch to an output sink.
///
/// Generic over the sink so tests can capture output in a buffer while the
/// binary writes to stdout.
pub struct Reporter<W: Write> {
    sink: W,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter writing to `sink`
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Render `counts` as a header, one line per address, and a footer.
    ///
    /// Iteration order over addresses is unspecified; callers must not
    /// depend on it. The snapshot is never mutated.
    pub fn report(&mut self, counts: &AddressCounts) -> io::Result<()> {
        writeln!(self.sink, "Packets per second per IP:")?;
        for (address, count) in counts {
            writeln!(self.sink, "{}: {}", address, count)?;
        }
        writeln!(self.sink, "{}", FOOTER)?;
        self.sink.flush()
    }

    /// Consume the reporter and return the underlying sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}
