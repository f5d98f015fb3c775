use std::io::{self, Write};

/// Writes help text and command output to stdout. A closed pipe (for example
/// `rosterlink crosswalk list --json | head`) is not an error.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_all_tolerant(&mut stdout, &[text.as_bytes()])
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_all_tolerant(&mut stdout, &[text.as_bytes(), b"\n"])
}

fn write_all_tolerant(writer: &mut dyn Write, chunks: &[&[u8]]) -> io::Result<()> {
    for chunk in chunks {
        ignore_broken_pipe(writer.write_all(chunk))?;
    }
    ignore_broken_pipe(writer.flush())
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
