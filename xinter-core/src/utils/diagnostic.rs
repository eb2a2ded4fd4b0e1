pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use std::io::{self, Write};

use codespan_reporting::{diagnostic::Label as CodespanLabel, files::{self, SimpleFiles}};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};
use super::src_span::SrcSpan;

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize, label_style: Option<LabelStyle>) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(
            label_style.unwrap_or(LabelStyle::Primary),
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    /// `repl:<n>` for interactive lines, the script path otherwise.
    pub origin: &'a str,
    pub label: Label,
}

/// A single error report. `notes` are printed under the snippet.
pub struct Diagnostic<'a> {
    pub title: String,
    pub notes: Vec<String>,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) -> io::Result<()> {
        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }
    }

    pub fn write_span(&self, location: &Location, buf: &mut Buffer) -> io::Result<()> {
        let mut sources = SimpleFiles::new();
        let file_id = sources.add(location.origin, location.src);

        // keep the label inside the line, codespan refuses ranges past the end
        let len = location.src.len() as u32;
        let span = SrcSpan::from(location.label.span.start.min(len), location.label.span.end.min(len));

        let label = Label { text: location.label.text.clone(), span }
            .to_codespan_label(file_id, None);

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(Severity::Error)
            .with_message(&self.title)
            .with_labels(vec![label])
            .with_notes(self.notes.clone());

        let config = codespan_reporting::term::Config::default();

        codespan_reporting::term::emit(buf, &config, &sources, &diagnostic)
            .map_err(|err| match err {
                files::Error::Io(err) => err,
                err => io::Error::other(err)
            })
    }

    /// Headline and notes only, for errors without a source line.
    pub fn write_title(&self, buf: &mut Buffer) -> io::Result<()> {
        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Red)))?;
        write!(buf, "error")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(buf, ": {}", self.title)?;

        buf.set_color(&ColorSpec::new())?;

        for note in &self.notes {
            writeln!(buf, "  = {note}")?;
        }

        Ok(())
    }
}
