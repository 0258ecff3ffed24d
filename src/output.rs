use std::io::{self, Write};

/// Write each line followed by a newline, in order, then flush.
pub fn write_lines<W, S>(writer: &mut W, lines: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write lines to stdout. A closed pipe (e.g. `| head`) ends output quietly.
pub fn write_stdout<S: AsRef<str>>(lines: &[S]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());
    match write_lines(&mut writer, lines) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
