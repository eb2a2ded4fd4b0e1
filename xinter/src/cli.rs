use std::{
    io::{self, IsTerminal, Write},
    time::Duration,
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Magenta, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

/// Status line on stderr. A failed write is logged, never fatal.
pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    if let Err(err) = write_colourful_prefix(prefix, color, text) {
        tracing::warn!(%err, "failed to write to stderr");
    }
}

fn write_colourful_prefix(prefix: &str, color: Color, text: &str) -> io::Result<()> {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    buffer.set_color(ColorSpec::new().set_intense(true).set_bold(true).set_fg(Some(color)))?;
    write!(buffer, "{prefix: >11}")?;
    buffer.set_color(&ColorSpec::new())?;
    writeln!(buffer, " {text}")?;

    buffer_writer.print(&buffer)
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    std::env::var_os("FORCE_COLOR").is_some_and(|force| !force.is_empty())
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}