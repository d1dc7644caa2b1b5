//! The console renderer.
//!
//! [`Console`] owns the output streams and the per-session render state:
//! how many lines the last block occupied (so [`Console::erase`] can remove
//! exactly that block and nothing else) and the last value an interactive
//! widget returned. Widgets borrow a console for the life of one render
//! loop; nothing here is global.

use std::io::{self, Write};

use termbelt_core::{
    color::{sgr_open, RESET},
    display_length, longest_line_length, pad, wrap, Alignment, Background, Color, Level,
};

/// Which output stream a write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stream {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
}

/// Where the console learns its width from.
#[derive(Debug, Clone, Copy)]
enum WidthSource {
    /// Probe the controlling terminal on every use.
    Probe,
    /// A fixed width, for tests and non-terminal output.
    Fixed(usize),
}

/// A terminal rendering session.
///
/// Generic over its sinks so tests can capture output in byte buffers;
/// production code uses [`Console::new`] over the process streams.
#[derive(Debug)]
pub struct Console<O: Write, E: Write> {
    out: O,
    err: E,
    width: WidthSource,
    last_print_line_count: Option<usize>,
    last_input: Option<String>,
}

impl Console<io::Stdout, io::Stderr> {
    /// A console over the process's standard output and error.
    #[must_use]
    pub fn new() -> Self {
        Self::with_streams(io::stdout(), io::stderr())
    }
}

impl Default for Console<io::Stdout, io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Write, E: Write> Console<O, E> {
    /// A console over arbitrary sinks, probing the terminal for width.
    pub const fn with_streams(out: O, err: E) -> Self {
        Self {
            out,
            err,
            width: WidthSource::Probe,
            last_print_line_count: None,
            last_input: None,
        }
    }

    /// Pin the width instead of probing the terminal. Layout then behaves
    /// identically with or without a controlling terminal.
    #[must_use]
    pub const fn fixed_width(mut self, width: usize) -> Self {
        self.width = WidthSource::Fixed(width);
        self
    }

    /// Current layout width; 0 when no terminal is available.
    #[must_use]
    pub fn width(&self) -> usize {
        match self.width {
            WidthSource::Probe => termbelt_core::terminal_width(),
            WidthSource::Fixed(width) => width,
        }
    }

    /// The value returned by the most recent interactive widget, if any.
    #[must_use]
    pub fn last_input(&self) -> Option<&str> {
        self.last_input.as_deref()
    }

    /// Record a widget's returned value.
    pub fn set_last_input(&mut self, value: impl Into<String>) {
        self.last_input = Some(value.into());
    }

    /// Line count of the last rendered block, while one is erasable.
    #[must_use]
    pub const fn last_print_line_count(&self) -> Option<usize> {
        self.last_print_line_count
    }

    /// Tear the console apart, handing back its sinks. Test hook.
    pub fn into_streams(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Plain line to standard output.
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn printout(&mut self, text: &str) -> io::Result<()> {
        self.write(text, Stream::Stdout, None, None, None, Alignment::Left)
    }

    /// Plain line to standard error.
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn printerr(&mut self, text: &str) -> io::Result<()> {
        self.write(text, Stream::Stderr, None, None, None, Alignment::Left)
    }

    /// Render a block of text with optional level tag, color, and alignment.
    ///
    /// Each line of the block gets the full decoration: the level tag is
    /// prefixed and the color codes opened and reset per line, so a later
    /// partial erase never leaves a dangling style. Alignment pads each
    /// line independently against the console width. Records the block's
    /// line count for [`Console::erase`].
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn write(
        &mut self,
        text: &str,
        stream: Stream,
        level: Option<Level>,
        foreground: Option<Color>,
        background: Option<Background>,
        alignment: Alignment,
    ) -> io::Result<()> {
        let width = self.width();
        let lines: Vec<String> = text
            .split('\n')
            .map(|line| {
                let mut rendered = String::new();
                if let Some(level) = level {
                    rendered.push_str(&level.tag());
                }
                match sgr_open(foreground, background) {
                    Some(open) => {
                        rendered.push_str(&open);
                        rendered.push_str(line);
                        rendered.push_str(RESET);
                    }
                    None => rendered.push_str(line),
                }
                pad(&rendered, alignment, width)
            })
            .collect();

        let count = lines.len();
        let sink = self.sink(stream);
        for line in &lines {
            writeln!(sink, "{line}")?;
        }
        sink.flush()?;
        self.last_print_line_count = Some(count);
        Ok(())
    }

    /// Write to standard output without a trailing newline and without
    /// touching the erasable-block state. Used for prompts and echoes.
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn write_inline(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }

    /// Erase the last rendered block by moving the cursor up and clearing
    /// each of its lines. A no-op when nothing erasable has been rendered;
    /// a second consecutive erase is likewise a no-op.
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn erase(&mut self) -> io::Result<()> {
        let Some(count) = self.last_print_line_count.take() else {
            return Ok(());
        };
        log::debug!("erasing {count}-line block");
        for _ in 0..count {
            write!(self.out, "\x1b[F\x1b[2K")?;
        }
        self.out.flush()
    }

    /// Clear the line above the cursor, unconditionally.
    ///
    /// Invalidates the erasable block: the screen no longer matches what
    /// the last [`Console::write`] put there.
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn clear_line(&mut self) -> io::Result<()> {
        self.last_print_line_count = None;
        write!(self.out, "\x1b[F\x1b[2K")?;
        self.out.flush()
    }

    /// Clear the whole screen and home the cursor.
    ///
    /// Invalidates the erasable block along with everything else on screen.
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        self.last_print_line_count = None;
        write!(self.out, "\x1b[2J\x1b[0;0f")?;
        self.out.flush()
    }

    /// Render `text` inside a `#` border box.
    ///
    /// The content is wrapped to fit the console width inside the border
    /// and margins, each line centered within the box interior (extra
    /// space goes to the left). The box as a whole is then aligned against
    /// the console width. The erasable block covers the full box,
    /// borders included.
    ///
    /// # Errors
    ///
    /// Propagates stream write failures.
    pub fn print_box(
        &mut self,
        text: &str,
        stream: Stream,
        foreground: Option<Color>,
        background: Option<Background>,
        alignment: Alignment,
        margin: usize,
    ) -> io::Result<()> {
        let width = self.width();
        let chrome = 2 * margin + 2;
        let interior = if width == 0 {
            0
        } else {
            width.saturating_sub(chrome)
        };
        let wrapped = wrap(text, interior);
        let longest = longest_line_length(&wrapped);

        let border = "#".repeat(longest + chrome);
        let margin_fill = " ".repeat(margin);

        let mut block = String::new();
        block.push_str(&border);
        for line in wrapped.split('\n') {
            let slack = longest - display_length(line);
            let left = slack.div_ceil(2);
            let right = slack - left;
            block.push('\n');
            block.push('#');
            block.push_str(&margin_fill);
            block.push_str(&" ".repeat(left));
            block.push_str(line);
            block.push_str(&" ".repeat(right));
            block.push_str(&margin_fill);
            block.push('#');
        }
        block.push('\n');
        block.push_str(&border);

        self.write(&block, stream, None, foreground, background, alignment)
    }

    fn sink(&mut self, stream: Stream) -> &mut dyn Write {
        match stream {
            Stream::Stdout => &mut self.out,
            Stream::Stderr => &mut self.err,
        }
    }
}
