//! Markdown → ratatui `Text` renderer for answers.
//!
//! Thin wrapper around `pulldown_cmark`. Handles the subset answers actually
//! use: paragraphs, headings, bold/italic/strikethrough, inline and fenced
//! code, lists, blockquotes, rules and links. A link's destination is printed
//! after its text so it can be opened in a browser.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Parse `content` into styled `Text` with `base_fg` as the body color.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut r = Renderer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        r.handle(event);
    }
    r.text
}

struct Renderer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline styles; each entry is already patched onto its parent.
    styles: Vec<Style>,
    /// Prefix spans repeated on every new line (blockquote bar, code gutter).
    prefixes: Vec<Span<'static>>,
    /// One entry per open list: None = bullets, Some(n) = next ordinal.
    lists: Vec<Option<u64>>,
    in_code_block: bool,
    /// A list marker was just written; the item's first paragraph joins its line.
    fresh_item: bool,
    link_url: Option<String>,
    /// Separate the next block from the previous one with a blank line.
    pending_gap: bool,
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

impl Renderer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: Vec::new(),
            prefixes: Vec::new(),
            lists: Vec::new(),
            in_code_block: false,
            fresh_item: false,
            link_url: None,
            pending_gap: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn new_line(&mut self, spans: Vec<Span<'static>>) {
        let mut line = Line::from(self.prefixes.clone());
        for span in spans {
            line.push_span(span);
        }
        self.text.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.push_span(span),
            None => self.new_line(vec![span]),
        }
    }

    fn start_block(&mut self) {
        if self.pending_gap {
            self.new_line(Vec::new());
            self.pending_gap = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(&t),
            Event::Code(c) => {
                let style = Style::default().fg(Color::White).bg(Color::DarkGray);
                self.push_span(Span::styled(c.to_string(), style));
            }
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.new_line(Vec::new()),
            Event::Rule => {
                self.start_block();
                self.new_line(vec![Span::styled("─".repeat(32), dim())]);
                self.pending_gap = true;
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph if self.fresh_item => self.fresh_item = false,
            Tag::Paragraph => {
                self.start_block();
                self.new_line(Vec::new());
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                let style = heading_style(self.base_fg, level);
                self.new_line(vec![Span::styled(
                    format!("{} ", "#".repeat(level as usize)),
                    style,
                )]);
                self.push_style(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.prefixes.push(Span::styled("│ ", dim()));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(_) => {
                self.start_block();
                self.prefixes.push(Span::styled("▏ ", dim()));
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.start_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{indent}{n}. ");
                        *n += 1;
                        m
                    }
                    _ => format!("{indent}• "),
                };
                self.pending_gap = false;
                self.new_line(vec![Span::styled(marker, dim())]);
                self.fresh_item = true;
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(link_style());
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.pending_gap = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.prefixes.pop();
                self.styles.pop();
                self.pending_gap = true;
            }
            TagEnd::CodeBlock => {
                self.prefixes.pop();
                self.in_code_block = false;
                self.pending_gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.pending_gap = true;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::styled(format!(" ↗ {url}"), dim()));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        self.fresh_item = false;
        // ratatui renders \t as zero-width
        let text = raw.replace('\t', "    ");
        if self.in_code_block {
            let style = Style::default().fg(Color::White);
            for line in text.lines() {
                self.new_line(vec![Span::styled(line.to_owned(), style)]);
            }
            return;
        }
        let style = self.style();
        self.push_span(Span::styled(text, style));
    }
}

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    let modifier = match level {
        HeadingLevel::H1 => Modifier::BOLD | Modifier::UNDERLINED,
        HeadingLevel::H2 => Modifier::BOLD,
        _ => Modifier::BOLD | Modifier::ITALIC,
    };
    Style::default().fg(base_fg).add_modifier(modifier)
}
