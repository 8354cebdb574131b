//! Core utilities and shared types
//!
//! - `error`: the typed error taxonomy shared by every operation
//! - [`PagerWriter`]: adapts the `minus` pager to `std::io::Write`

pub mod error;

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// Long history output (`log`, `global-log`) is routed through the pager when
/// stdout is a terminal. The wrapper lets the repository's writer stay a plain
/// `Box<dyn Write>`.
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "===")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
