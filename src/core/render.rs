//! Plain and decorated renderings of a log message
//!
//! Every event carries two renderings of the same source message: `msg`
//! without terminal escape sequences and `cmsg` with them. Both come from
//! independent, non-mutating calls to [`Render::render`].

use colored::Color;
use std::borrow::Cow;
use std::fmt;

const RESET: &str = "\x1b[0m";

/// A message that can be rendered with or without terminal decoration
pub trait Render {
    fn render(&self, decorated: bool) -> String;
}

impl Render for str {
    fn render(&self, decorated: bool) -> String {
        if decorated {
            self.to_string()
        } else {
            strip_ansi(self).into_owned()
        }
    }
}

impl Render for String {
    fn render(&self, decorated: bool) -> String {
        self.as_str().render(decorated)
    }
}

impl Render for Cow<'_, str> {
    fn render(&self, decorated: bool) -> String {
        self.as_ref().render(decorated)
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, decorated: bool) -> String {
        (**self).render(decorated)
    }
}

/// Remove ANSI color/style escape sequences
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if text.contains('\x1b') {
        Cow::Owned(strip_ansi_escapes::strip_str(text))
    } else {
        Cow::Borrowed(text)
    }
}

/// Both renderings of one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderings {
    pub plain: String,
    pub decorated: String,
}

impl Renderings {
    pub fn of<M: Render + ?Sized>(message: &M) -> Self {
        Self {
            plain: message.render(false),
            decorated: message.render(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Span {
    text: String,
    color: Option<Color>,
    bold: bool,
}

/// Message assembled from styled spans
///
/// # Example
///
/// ```
/// use rust_logger_facade::core::{Render, StyledMessage};
/// use colored::Color;
///
/// let message = StyledMessage::new()
///     .plain("request ")
///     .colored("GET /health", Color::Cyan)
///     .bold(" 200");
///
/// assert_eq!(message.render(false), "request GET /health 200");
/// assert!(message.render(true).contains("\x1b["));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledMessage {
    spans: Vec<Span>,
}

impl StyledMessage {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn plain(self, text: impl Into<String>) -> Self {
        self.push(text, None, false)
    }

    #[must_use]
    pub fn colored(self, text: impl Into<String>, color: Color) -> Self {
        self.push(text, Some(color), false)
    }

    #[must_use]
    pub fn bold(self, text: impl Into<String>) -> Self {
        self.push(text, None, true)
    }

    #[must_use]
    pub fn bold_colored(self, text: impl Into<String>, color: Color) -> Self {
        self.push(text, Some(color), true)
    }

    fn push(mut self, text: impl Into<String>, color: Option<Color>, bold: bool) -> Self {
        self.spans.push(Span {
            text: text.into(),
            color,
            bold,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.text.is_empty())
    }
}

impl Render for StyledMessage {
    fn render(&self, decorated: bool) -> String {
        let mut out = String::new();
        for span in &self.spans {
            let styled = decorated && (span.color.is_some() || span.bold);
            if !styled {
                out.push_str(&span.text);
                continue;
            }

            let mut codes: Vec<Cow<'static, str>> = Vec::with_capacity(2);
            if span.bold {
                codes.push(Cow::Borrowed("1"));
            }
            if let Some(color) = span.color {
                codes.push(color.to_fg_str());
            }
            out.push_str("\x1b[");
            out.push_str(&codes.join(";"));
            out.push('m');
            out.push_str(&span.text);
            out.push_str(RESET);
        }
        out
    }
}

impl fmt::Display for StyledMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}
