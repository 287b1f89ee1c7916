//! Text writer with scoped indentation, blocks and line prefixes.
//!
//! Every scope-opening method returns a [`Scope`] guard. The scope ends when the guard is
//! dropped, so the writer's state (indentation, line prefix) is restored on every exit path,
//! early returns and `?` included. Guards share the writer's state through an `Rc`, so they
//! don't hold a borrow of the writer and writing continues normally while they are alive.
//!
//! ```
//! use hubbridge_impl::emit::CodeWriter;
//!
//! let mut w = CodeWriter::default();
//!
//! w.write_line("class Example");
//! {
//!     let _block = w.block();
//!     w.write_line("int value;");
//! }
//!
//! assert_eq!(w.finish(), "class Example\n{\n    int value;\n}\n");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::options::GeneratorOptions;

const BLOCK_START: &str = "{";
const BLOCK_END: &str = "}";
const BLOCK_COMMENT_START: &str = "/*";
const BLOCK_COMMENT_END: &str = "*/";
const COMMENT_START: &str = "// ";

/// Code writer tracking indentation and scopes. Output is kept in memory.
pub struct CodeWriter {
    shared: Rc<Shared>,
}

struct Shared {
    settings: Settings,
    state: RefCell<State>,
}

struct Settings {
    indent_text: String,
    newline: String,
    /// Input character that ends a line
    newline_char: char,
    /// Input characters dropped from the output
    ignored: Vec<char>,
}

struct State {
    out: String,
    indent_level: usize,
    line_prefix: String,
    at_line_start: bool,
}

impl CodeWriter {
    /// Create a writer with the given indentation unit and line terminator.
    ///
    /// The last character of `newline` ends a line in written text, and the other
    /// characters of `newline` (and `\r`) are dropped, so `\n` and `\r\n` input both
    /// come out as `newline`.
    pub fn new(indent_text: impl Into<String>, newline: impl Into<String>) -> Self {
        let newline = newline.into();
        let newline_char = newline.chars().last().unwrap_or('\n');
        let mut ignored: Vec<char> = newline.chars().filter(|&ch| ch != newline_char).collect();
        if newline_char != '\r' && !ignored.contains(&'\r') {
            ignored.push('\r');
        }

        Self {
            shared: Rc::new(Shared {
                settings: Settings {
                    indent_text: indent_text.into(),
                    newline,
                    newline_char,
                    ignored,
                },
                state: RefCell::new(State {
                    out: String::new(),
                    indent_level: 0,
                    line_prefix: String::new(),
                    at_line_start: true,
                }),
            }),
        }
    }

    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self::new(options.indent.clone(), options.newline.as_str())
    }

    /// One level of indentation.
    pub fn indent_text(&self) -> &str {
        &self.shared.settings.indent_text
    }

    pub fn indent_level(&self) -> usize {
        self.shared.state.borrow().indent_level
    }

    /// Write text. Indentation (or the line prefix) is added at the start of each line.
    pub fn write(&mut self, text: &str) {
        self.shared.write(text);
    }

    /// Write text and end the line.
    pub fn write_line(&mut self, text: &str) {
        self.shared.write(text);
        self.shared.end_line();
    }

    /// End the current line. At the start of a line, this writes an empty line.
    ///
    /// Empty lines carry no indentation, only the line prefix with trailing whitespace removed.
    pub fn blank_line(&mut self) {
        self.shared.end_line();
    }

    /// Support for `write!` and `writeln!`.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(text) => self.write(text),
            None => self.write(&args.to_string()),
        }
    }

    /// Increase indentation until the returned scope is dropped.
    pub fn indent(&mut self) -> Scope {
        self.shared.state.borrow_mut().indent_level += 1;
        self.scope(Exit::Dedent)
    }

    /// Write a block start and indent. The block end is written when the scope is dropped.
    pub fn block(&mut self) -> Scope {
        self.block_with("")
    }

    /// Like [`block`](Self::block), with `trailer` following the block end (usually `;`).
    pub fn block_with(&mut self, trailer: &str) -> Scope {
        self.write_line(BLOCK_START);
        self.shared.state.borrow_mut().indent_level += 1;
        self.scope(Exit::Close(format!("{BLOCK_END}{trailer}")))
    }

    /// Write a block comment start and indent, until the scope is dropped.
    pub fn block_comment(&mut self) -> Scope {
        self.write_line(BLOCK_COMMENT_START);
        self.shared.state.borrow_mut().indent_level += 1;
        self.scope(Exit::Close(BLOCK_COMMENT_END.to_owned()))
    }

    /// Write a line comment. Line breaks in `text` continue the comment on a new line.
    pub fn comment(&mut self, text: &str) {
        for line in text.split(self.shared.settings.newline_char) {
            self.write(COMMENT_START);
            self.write_line(line);
        }
    }

    /// Start every line with `prefix` instead of indentation, until the scope is dropped.
    ///
    /// With `prepend_current_indent` the current indentation goes before the prefix,
    /// otherwise the prefix is padded to the width of the current indentation. Indentation
    /// restarts from zero inside the prefix.
    pub fn line_prefix(&mut self, prefix: &str, prepend_current_indent: bool) -> Scope {
        let mut state = self.shared.state.borrow_mut();
        let current_indent = format!(
            "{}{}",
            state.line_prefix,
            self.shared.settings.indent_text.repeat(state.indent_level)
        );

        let prefix = if prepend_current_indent {
            format!("{current_indent}{prefix}")
        } else {
            let padding = current_indent.get(prefix.len()..).unwrap_or_default();
            format!("{prefix}{padding}")
        };

        let exit = Exit::Restore {
            line_prefix: std::mem::replace(&mut state.line_prefix, prefix),
            indent_level: std::mem::take(&mut state.indent_level),
        };
        drop(state);

        self.scope(exit)
    }

    /// Write `text` as a line when the returned scope is dropped.
    pub fn closing_line(&mut self, text: impl Into<String>) -> Scope {
        self.scope(Exit::Line(text.into()))
    }

    /// Take the written text.
    pub fn finish(self) -> String {
        let out = std::mem::take(&mut self.shared.state.borrow_mut().out);
        out
    }

    fn scope(&self, exit: Exit) -> Scope {
        Scope {
            shared: Rc::clone(&self.shared),
            exit,
        }
    }
}

impl Default for CodeWriter {
    /// Four spaces, `\n` line endings.
    fn default() -> Self {
        Self::new("    ", "\n")
    }
}

impl Shared {
    fn write(&self, text: &str) {
        self.state.borrow_mut().write(&self.settings, text);
    }

    fn end_line(&self) {
        self.state.borrow_mut().end_line(&self.settings);
    }
}

impl State {
    fn write(&mut self, settings: &Settings, text: &str) {
        for ch in text.chars() {
            if ch == settings.newline_char {
                self.end_line(settings);
            } else if !settings.ignored.contains(&ch) {
                self.start_line(settings);
                self.out.push(ch);
            }
        }
    }

    fn start_line(&mut self, settings: &Settings) {
        if !self.at_line_start {
            return;
        }

        self.out.push_str(&self.line_prefix);
        for _ in 0..self.indent_level {
            self.out.push_str(&settings.indent_text);
        }
        self.at_line_start = false;
    }

    fn end_line(&mut self, settings: &Settings) {
        if self.at_line_start {
            self.out.push_str(self.line_prefix.trim_end());
        }

        self.out.push_str(&settings.newline);
        self.at_line_start = true;
    }
}

/// Guard ending a writer scope when dropped.
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct Scope {
    shared: Rc<Shared>,
    exit: Exit,
}

enum Exit {
    Dedent,
    /// Dedent, then write a closing line
    Close(String),
    Line(String),
    Restore {
        line_prefix: String,
        indent_level: usize,
    },
}

impl Drop for Scope {
    fn drop(&mut self) {
        let Ok(mut state) = self.shared.state.try_borrow_mut() else {
            return;
        };
        let settings = &self.shared.settings;

        match &mut self.exit {
            Exit::Dedent => {
                state.indent_level = state.indent_level.saturating_sub(1);
            }
            Exit::Close(text) => {
                state.indent_level = state.indent_level.saturating_sub(1);
                state.write(settings, text);
                state.end_line(settings);
            }
            Exit::Line(text) => {
                state.write(settings, text);
                state.end_line(settings);
            }
            Exit::Restore {
                line_prefix,
                indent_level,
            } => {
                state.line_prefix = std::mem::take(line_prefix);
                state.indent_level = *indent_level;
            }
        }
    }
}
