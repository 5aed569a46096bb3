//! Structured insertion templates for completion items
//!
//! A template is a sequence of literal text and numbered placeholders. The
//! catalog is authored in LSP snippet notation (`${1:default}`, `${1|a,b|}`)
//! and parsed once at registry construction; renderers only ever see the
//! structured form.

use std::fmt;

use thiserror::Error;

/// Errors produced while parsing snippet notation into an [`InsertTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated placeholder starting at byte {offset}")]
    UnterminatedPlaceholder { offset: usize },

    #[error("invalid placeholder index at byte {offset}")]
    InvalidIndex { offset: usize },

    #[error("placeholder index 0 is reserved (byte {offset})")]
    ZeroIndex { offset: usize },

    #[error("placeholder ${index} appears more than once")]
    DuplicateIndex { index: u32 },

    #[error("placeholders are not contiguous: expected ${expected}, found ${found}")]
    NonContiguous { expected: u32, found: u32 },

    #[error("choice placeholder ${index} has no options")]
    EmptyChoice { index: u32 },
}

/// What the user fills in at a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Free-form tab stop pre-filled with a default value.
    TabStop { default: String },
    /// Enumerated choice from a fixed set of literal alternatives.
    Choice { options: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub index: u32,
    pub kind: PlaceholderKind,
}

impl Placeholder {
    /// The text inserted when the placeholder is left untouched.
    pub fn default_text(&self) -> &str {
        match &self.kind {
            PlaceholderKind::TabStop { default } => default,
            PlaceholderKind::Choice { options } => {
                options.first().map(String::as_str).unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Placeholder(Placeholder),
}

/// Literal text interleaved with placeholders numbered `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InsertTemplate {
    segments: Vec<Segment>,
}

impl InsertTemplate {
    /// Parses LSP snippet notation and validates placeholder numbering.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let segments = SnippetParser::new(source).parse()?;
        let template = Self { segments };
        template.validate_numbering()?;
        Ok(template)
    }

    /// A template consisting of literal text only.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::default();
        }
        Self {
            segments: vec![Segment::Text(text)],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Placeholder(_)))
            .count()
    }

    /// Placeholders in navigation order (ascending index).
    pub fn placeholders(&self) -> Vec<&Placeholder> {
        let mut placeholders: Vec<&Placeholder> = self
            .segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(placeholder) => Some(placeholder),
                Segment::Text(_) => None,
            })
            .collect();
        placeholders.sort_by_key(|placeholder| placeholder.index);
        placeholders
    }

    /// Renders the template back into LSP snippet syntax.
    pub fn to_snippet(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => escape_into(&mut out, text, &['$', '}', '\\']),
                Segment::Placeholder(placeholder) => match &placeholder.kind {
                    PlaceholderKind::TabStop { default } => {
                        out.push_str(&format!("${{{}:", placeholder.index));
                        escape_into(&mut out, default, &['$', '}', '\\']);
                        out.push('}');
                    }
                    PlaceholderKind::Choice { options } => {
                        out.push_str(&format!("${{{}|", placeholder.index));
                        for (i, option) in options.iter().enumerate() {
                            if i > 0 {
                                out.push(',');
                            }
                            escape_into(&mut out, option, &['$', '}', '\\', ',', '|']);
                        }
                        out.push_str("|}");
                    }
                },
            }
        }
        out
    }

    /// Renders the template with every placeholder replaced by its default.
    pub fn to_plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.as_str(),
                Segment::Placeholder(placeholder) => placeholder.default_text(),
            })
            .collect()
    }

    fn validate_numbering(&self) -> Result<(), TemplateError> {
        let mut indices: Vec<u32> = self
            .placeholders()
            .iter()
            .map(|placeholder| placeholder.index)
            .collect();
        indices.sort_unstable();

        for (position, index) in indices.iter().enumerate() {
            let expected = position as u32 + 1;
            if *index < expected {
                return Err(TemplateError::DuplicateIndex { index: *index });
            }
            if *index > expected {
                return Err(TemplateError::NonContiguous {
                    expected,
                    found: *index,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for InsertTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_snippet())
    }
}

impl std::str::FromStr for InsertTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn escape_into(out: &mut String, text: &str, special: &[char]) {
    for c in text.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Single-pass reader over snippet notation.
struct SnippetParser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    segments: Vec<Segment>,
    text: String,
}

impl<'a> SnippetParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            segments: Vec::new(),
            text: String::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<Segment>, TemplateError> {
        while let Some((offset, c)) = self.chars.next() {
            match c {
                '\\' => match self.chars.peek() {
                    Some(&(_, next @ ('$' | '}' | '\\'))) => {
                        self.text.push(next);
                        self.chars.next();
                    }
                    _ => self.text.push('\\'),
                },
                '$' => match self.chars.peek() {
                    Some(&(_, '{')) => {
                        self.chars.next();
                        let placeholder = self.braced_placeholder(offset)?;
                        self.push_placeholder(placeholder);
                    }
                    Some(&(_, d)) if d.is_ascii_digit() => {
                        let index = self.index(offset)?;
                        self.push_placeholder(Placeholder {
                            index,
                            kind: PlaceholderKind::TabStop {
                                default: String::new(),
                            },
                        });
                    }
                    _ => self.text.push('$'),
                },
                _ => self.text.push(c),
            }
        }
        self.flush_text();
        Ok(self.segments)
    }

    fn push_placeholder(&mut self, placeholder: Placeholder) {
        self.flush_text();
        self.segments.push(Segment::Placeholder(placeholder));
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.segments
                .push(Segment::Text(std::mem::take(&mut self.text)));
        }
    }

    fn index(&mut self, offset: usize) -> Result<u32, TemplateError> {
        let mut digits = String::new();
        while let Some(&(_, d)) = self.chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            self.chars.next();
        }
        let index: u32 = digits
            .parse()
            .map_err(|_| TemplateError::InvalidIndex { offset })?;
        if index == 0 {
            return Err(TemplateError::ZeroIndex { offset });
        }
        Ok(index)
    }

    /// Parses the remainder of `${N:default}` or `${N|a,b|}` after `${`.
    fn braced_placeholder(&mut self, offset: usize) -> Result<Placeholder, TemplateError> {
        let index = self.index(offset)?;
        match self.chars.next() {
            Some((_, '}')) => Ok(Placeholder {
                index,
                kind: PlaceholderKind::TabStop {
                    default: String::new(),
                },
            }),
            Some((_, ':')) => {
                let default = self.placeholder_text(offset)?;
                Ok(Placeholder {
                    index,
                    kind: PlaceholderKind::TabStop { default },
                })
            }
            Some((_, '|')) => {
                let options = self.choice_options(offset)?;
                if options.iter().all(String::is_empty) {
                    return Err(TemplateError::EmptyChoice { index });
                }
                Ok(Placeholder {
                    index,
                    kind: PlaceholderKind::Choice { options },
                })
            }
            Some(_) => Err(TemplateError::InvalidIndex { offset }),
            None => Err(TemplateError::UnterminatedPlaceholder { offset }),
        }
    }

    fn placeholder_text(&mut self, offset: usize) -> Result<String, TemplateError> {
        let mut text = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => match self.chars.peek() {
                    Some(&(_, next @ ('$' | '}' | '\\'))) => {
                        text.push(next);
                        self.chars.next();
                    }
                    _ => text.push('\\'),
                },
                '}' => return Ok(text),
                _ => text.push(c),
            }
        }
        Err(TemplateError::UnterminatedPlaceholder { offset })
    }

    fn choice_options(&mut self, offset: usize) -> Result<Vec<String>, TemplateError> {
        let mut options = Vec::new();
        let mut current = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '\\' => match self.chars.peek() {
                    Some(&(_, next @ ('$' | '}' | '\\' | ',' | '|'))) => {
                        current.push(next);
                        self.chars.next();
                    }
                    _ => current.push('\\'),
                },
                ',' => options.push(std::mem::take(&mut current)),
                '|' => {
                    return match self.chars.next() {
                        Some((_, '}')) => {
                            options.push(current);
                            Ok(options)
                        }
                        _ => Err(TemplateError::UnterminatedPlaceholder { offset }),
                    };
                }
                _ => current.push(c),
            }
        }
        Err(TemplateError::UnterminatedPlaceholder { offset })
    }
}
