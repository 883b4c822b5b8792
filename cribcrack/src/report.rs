//! Console output for each case.
use crib_core::Recovery;
use std::io::{self, BufRead, Write};

/// Print a recovered case: header, parameters, then the plaintext.
pub fn write_recovery<W: Write>(
    out: &mut W,
    case: u32,
    recovery: &Recovery,
    line_width: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Case {case} ===")?;
    writeln!(out, "method: {}", recovery.get_method())?;
    writeln!(out, "rotation n = {}", recovery.get_rotation())?;
    writeln!(out, "key K = {:#x}", recovery.get_key())?;
    write_wrapped(out, recovery.get_plaintext(), line_width)
}

/// Write raw bytes, breaking the line every `line_width` bytes.
///
/// A partial last line is terminated too. A width of zero disables wrapping.
pub fn write_wrapped<W: Write>(out: &mut W, bytes: &[u8], line_width: usize) -> io::Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }

    let line_width = if line_width == 0 {
        bytes.len()
    } else {
        line_width
    };

    for line in bytes.chunks(line_width) {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }

    Ok(())
}

/// Ask how many cases to process. `None` if the answer is not a positive number.
pub fn prompt_case_count<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<u32>> {
    writeln!(out, "Enter the number of cases:")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(line.trim().parse::<u32>().ok().filter(|&cases| cases > 0))
}
