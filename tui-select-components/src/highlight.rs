//! Search keyword highlighting in option labels

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use regex::{Regex, RegexBuilder};

/// A run of label text, marked if it matched the keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Case-insensitive literal matcher for one search keyword
///
/// The keyword is escaped before compiling, so `"a.b*"` only matches the
/// literal text `a.b*`.
#[derive(Debug, Clone)]
pub struct Highlighter {
    regex: Regex,
}

impl Highlighter {
    /// Build a matcher, `None` for an empty keyword
    pub fn new(keyword: &str) -> Option<Self> {
        if keyword.is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(Self { regex }),
            Err(err) => {
                tracing::warn!(%err, "search highlight disabled");
                None
            }
        }
    }

    /// Whether the keyword occurs anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Split `text` into matched and unmatched runs, in order
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut last = 0;
        for m in self.regex.find_iter(text) {
            if m.start() > last {
                segments.push(Segment {
                    text: &text[last..m.start()],
                    matched: false,
                });
            }
            segments.push(Segment {
                text: m.as_str(),
                matched: true,
            });
            last = m.end();
        }
        if last < text.len() || segments.is_empty() {
            segments.push(Segment {
                text: &text[last..],
                matched: false,
            });
        }
        segments
    }

    /// Styled line for `text`, matches drawn with `mark`
    pub fn line(&self, text: &str, base: Style, mark: Style) -> Line<'static> {
        let spans: Vec<Span<'static>> = self
            .segments(text)
            .into_iter()
            .map(|seg| {
                let style = if seg.matched { mark } else { base };
                Span::styled(seg.text.to_string(), style)
            })
            .collect();
        Line::from(spans)
    }
}
