//! Streaming XML output for feed documents.
//!
//! [`XmlWriter`] emits elements, escaped text and CDATA in document order.
//! [`XmlOptions`] decides whether a declaration is written and how nested
//! elements are indented.

use crate::escape::{escape, split_cdata, strip_control_chars};
use std::io::{self, Write};

/// Indentation applied by a pretty-printing [`XmlWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentConfig {
    /// Text repeated once per nesting level.
    pub indent_str: String,
    /// Whether each start tag goes on its own line.
    pub newlines: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            newlines: true,
        }
    }
}

/// Document-level output options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Indentation, or `None` for compact output.
    pub indent: Option<IndentConfig>,
    /// Whether to emit `<?xml version="1.0" encoding="UTF-8"?>`.
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            indent: None,
            declaration: true,
        }
    }
}

impl XmlOptions {
    /// Compact output with a declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables pretty-printing with the default indentation.
    pub fn pretty(self) -> Self {
        self.with_indent(IndentConfig::default())
    }

    /// Enables pretty-printing with the given indentation.
    pub fn with_indent(mut self, indent: IndentConfig) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Turns the XML declaration on or off.
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Nothing,
    Markup,
    Text,
}

/// Writes a feed document to any [`Write`] sink.
pub struct XmlWriter<W: Write> {
    out: W,
    open: Vec<String>,
    // A start tag has been written without its closing `>`.
    pending_start: bool,
    indent: Option<IndentConfig>,
    last: Last,
}

impl<W: Write> XmlWriter<W> {
    /// A compact writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            open: Vec::new(),
            pending_start: false,
            indent: None,
            last: Last::Nothing,
        }
    }

    /// A pretty-printing writer.
    pub fn with_indent(out: W, indent: IndentConfig) -> Self {
        Self {
            indent: Some(indent),
            ..Self::new(out)
        }
    }

    /// A writer configured by document options.
    pub fn from_options(out: W, options: &XmlOptions) -> Self {
        match &options.indent {
            Some(indent) => Self::with_indent(out, indent.clone()),
            None => Self::new(out),
        }
    }

    /// Unwraps the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Writes `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn write_declaration(&mut self) -> io::Result<()> {
        self.out
            .write_all(br#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        self.last = Last::Markup;
        Ok(())
    }

    /// Opens an element.
    pub fn start_element(&mut self, name: &str) -> io::Result<()> {
        self.finish_start_tag()?;
        if self.last != Last::Text {
            self.line_break()?;
        }
        self.out.write_all(b"<")?;
        self.out.write_all(name.as_bytes())?;
        self.open.push(name.to_string());
        self.pending_start = true;
        self.last = Last::Markup;
        Ok(())
    }

    /// Closes the innermost open element. Childless elements self-close.
    pub fn end_element(&mut self) -> io::Result<()> {
        let Some(name) = self.open.pop() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "end_element called with no open element",
            ));
        };

        if self.pending_start {
            self.pending_start = false;
            self.out.write_all(b"/>")?;
        } else {
            if self.last == Last::Markup {
                self.line_break()?;
            }
            write!(self.out, "</{}>", name)?;
        }
        self.last = Last::Markup;
        Ok(())
    }

    /// Writes escaped element text.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.finish_start_tag()?;
        self.out.write_all(escape(text).as_bytes())?;
        self.last = Last::Text;
        Ok(())
    }

    /// Writes `data` as CDATA.
    ///
    /// Data containing `]]>` is split across adjacent sections. Control
    /// characters XML forbids are dropped.
    pub fn write_cdata(&mut self, data: &str) -> io::Result<()> {
        self.finish_start_tag()?;
        let data = strip_control_chars(data);
        for part in split_cdata(&data) {
            write!(self.out, "<![CDATA[{}]]>", part)?;
        }
        self.last = Last::Text;
        Ok(())
    }

    /// Writes `<name>text</name>`, with the text in CDATA if `cdata` is set.
    pub fn write_leaf(&mut self, name: &str, text: &str, cdata: bool) -> io::Result<()> {
        self.start_element(name)?;
        if cdata {
            self.write_cdata(text)?;
        } else {
            self.write_text(text)?;
        }
        self.end_element()
    }

    /// Flushes the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn finish_start_tag(&mut self) -> io::Result<()> {
        if self.pending_start {
            self.pending_start = false;
            self.out.write_all(b">")?;
        }
        Ok(())
    }

    fn line_break(&mut self) -> io::Result<()> {
        let Some(indent) = &self.indent else {
            return Ok(());
        };
        if indent.newlines && self.last != Last::Nothing {
            self.out.write_all(b"\n")?;
        }
        for _ in 0..self.open.len() {
            self.out.write_all(indent.indent_str.as_bytes())?;
        }
        Ok(())
    }
}
