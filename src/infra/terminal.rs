use std::io::{self, Write};

use crate::error::AppResult;
use crate::services::Navigator;

/// The terminal cannot follow links itself, so navigation prints the target.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) -> AppResult<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "Download the export from: {url}")?;
        stdout.flush()?;
        Ok(())
    }
}
