//! One-line-per-strategy throughput report.

use std::fmt;
use std::io::Write;

use crate::error::{environment_fault, Result};
use crate::runner::RunResult;

/// Width of the right-aligned strategy name column.
pub const NAME_WIDTH: usize = 20;

/// Display adapter rendering a [`RunResult`] as a report line, without the
/// trailing newline.
pub struct ReportLine<'a>(pub &'a RunResult);

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let unit = result.unit();
        write!(
            f,
            "{:>width$}: {:4.0} {}, {:.3} {}/element, {:.3} elements/{}",
            result.name(),
            result.mega_cycles(),
            unit.mega,
            result.cycles_per_element(),
            unit.plural,
            result.elements_per_cycle(),
            unit.singular,
            width = NAME_WIDTH,
        )
    }
}

/// Writes the report line for `result` to `out`.
pub fn emit<W: Write + ?Sized>(out: &mut W, result: &RunResult) -> Result<()> {
    writeln!(out, "{}", ReportLine(result)).map_err(|e| environment_fault("stdout", e.to_string()))
}
