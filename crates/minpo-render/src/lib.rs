//! Sanitised rendering of LLM answer text.
//!
//! The answer string comes from a generative model and is untrusted, so
//! it is never handed to a display layer as raw markup. [`render`] folds
//! the markdown event stream into a [`SafeDocument`] tree of plain
//! block/inline nodes; raw HTML events are dropped on the floor, which
//! means nothing executable can survive into the tree while the text
//! around a stripped tag is kept. Unparsable input degrades to plain
//! text and never fails.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Display tree for one answer. Consumers decide presentation (link
/// targets, table scrolling, code styling); the tree only carries
/// structure and text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafeDocument {
    pub blocks: Vec<Block>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    CodeBlock { language: Option<String>, text: String },
    List { ordered: bool, items: Vec<Vec<Block>> },
    BlockQuote(Vec<Block>),
    Table { head: Vec<Vec<Inline>>, rows: Vec<Vec<Vec<Inline>>> },
    Rule,
}

/// Inline node. `Link` keeps the destination as data; opening it in a
/// new browsing context (or not) is the consumer's policy.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link { url: String, content: Vec<Inline> },
    TaskMarker(bool),
    HardBreak,
}

/// Parse untrusted markdown into a [`SafeDocument`].
///
/// GFM tables, strikethrough and task lists are enabled to match what
/// the answer model tends to emit. Never panics; input that is not
/// valid markdown simply comes back as paragraphs of plain text.
pub fn render(input: &str) -> SafeDocument {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut parser = Parser::new_ext(input, options);
    SafeDocument {
        blocks: parse_blocks(&mut parser),
    }
}

/// Collect block nodes until the enclosing container's `End` event (or
/// the end of input at top level). Inline events showing up at block
/// level — tight list items emit their content without a paragraph
/// wrapper — are gathered into an implicit paragraph.
fn parse_blocks<'a, I>(events: &mut I) -> Vec<Block>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut blocks = Vec::new();
    let mut pending: Vec<Inline> = Vec::new();

    fn flush(pending: &mut Vec<Inline>, blocks: &mut Vec<Block>) {
        if !pending.is_empty() {
            blocks.push(Block::Paragraph(std::mem::take(pending)));
        }
    }

    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Paragraph) => {
                flush(&mut pending, &mut blocks);
                blocks.push(Block::Paragraph(parse_inlines(events)));
            }
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut pending, &mut blocks);
                blocks.push(Block::Heading {
                    level: heading_level(level),
                    content: parse_inlines(events),
                });
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                flush(&mut pending, &mut blocks);
                blocks.push(parse_code_block(events, kind));
            }
            Event::Start(Tag::List(start)) => {
                flush(&mut pending, &mut blocks);
                blocks.push(parse_list(events, start.is_some()));
            }
            Event::Start(Tag::BlockQuote(_)) => {
                flush(&mut pending, &mut blocks);
                blocks.push(Block::BlockQuote(parse_blocks(events)));
            }
            Event::Start(Tag::Table(_)) => {
                flush(&mut pending, &mut blocks);
                blocks.push(parse_table(events));
            }
            Event::Rule => {
                flush(&mut pending, &mut blocks);
                blocks.push(Block::Rule);
            }
            // Raw HTML never enters the tree.
            Event::Html(_) | Event::InlineHtml(_) => {}
            Event::Text(text) => pending.push(Inline::Text(text.into_string())),
            Event::Code(code) => pending.push(Inline::Code(code.into_string())),
            Event::SoftBreak => pending.push(Inline::Text(" ".to_string())),
            Event::HardBreak => pending.push(Inline::HardBreak),
            Event::TaskListMarker(done) => pending.push(Inline::TaskMarker(done)),
            Event::Start(tag @ (Tag::Emphasis | Tag::Strong | Tag::Strikethrough)) => {
                let content = parse_inlines(events);
                pending.push(wrap_inline(&tag, content));
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                pending.push(Inline::Link {
                    url: dest_url.into_string(),
                    content: parse_inlines(events),
                });
            }
            // Unknown containers are flattened into their surroundings.
            Event::Start(_) => pending.extend(parse_inlines(events)),
            Event::End(_) => break,
            _ => {}
        }
    }

    flush(&mut pending, &mut blocks);
    blocks
}

/// Collect inline nodes until the enclosing container's `End` event.
fn parse_inlines<'a, I>(events: &mut I) -> Vec<Inline>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut inlines = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Text(text) => inlines.push(Inline::Text(text.into_string())),
            Event::Code(code) => inlines.push(Inline::Code(code.into_string())),
            Event::SoftBreak => inlines.push(Inline::Text(" ".to_string())),
            Event::HardBreak => inlines.push(Inline::HardBreak),
            Event::TaskListMarker(done) => inlines.push(Inline::TaskMarker(done)),
            Event::Html(_) | Event::InlineHtml(_) => {}
            Event::Start(tag @ (Tag::Emphasis | Tag::Strong | Tag::Strikethrough)) => {
                let content = parse_inlines(events);
                inlines.push(wrap_inline(&tag, content));
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                inlines.push(Inline::Link {
                    url: dest_url.into_string(),
                    content: parse_inlines(events),
                });
            }
            // Images degrade to their alt text.
            Event::Start(Tag::Image { .. }) => inlines.extend(parse_inlines(events)),
            Event::Start(_) => inlines.extend(parse_inlines(events)),
            Event::End(_) => break,
            _ => {}
        }
    }
    inlines
}

fn wrap_inline(tag: &Tag<'_>, content: Vec<Inline>) -> Inline {
    match tag {
        Tag::Strong => Inline::Strong(content),
        Tag::Strikethrough => Inline::Strikethrough(content),
        _ => Inline::Emphasis(content),
    }
}

fn parse_code_block<'a, I>(events: &mut I, kind: CodeBlockKind<'_>) -> Block
where
    I: Iterator<Item = Event<'a>>,
{
    let language = match kind {
        CodeBlockKind::Fenced(info) => {
            let lang = info.split_whitespace().next().unwrap_or("");
            (!lang.is_empty()).then(|| lang.to_string())
        }
        CodeBlockKind::Indented => None,
    };
    let mut text = String::new();
    for event in events.by_ref() {
        match event {
            Event::Text(chunk) => text.push_str(&chunk),
            Event::End(TagEnd::CodeBlock) => break,
            _ => {}
        }
    }
    Block::CodeBlock { language, text }
}

fn parse_list<'a, I>(events: &mut I, ordered: bool) -> Block
where
    I: Iterator<Item = Event<'a>>,
{
    let mut items = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::Item) => items.push(parse_blocks(events)),
            Event::End(TagEnd::List(_)) => break,
            _ => {}
        }
    }
    Block::List { ordered, items }
}

fn parse_table<'a, I>(events: &mut I) -> Block
where
    I: Iterator<Item = Event<'a>>,
{
    let mut head = Vec::new();
    let mut rows = Vec::new();
    let mut current: Vec<Vec<Inline>> = Vec::new();
    while let Some(event) = events.next() {
        match event {
            Event::Start(Tag::TableCell) => current.push(parse_inlines(events)),
            Event::End(TagEnd::TableHead) => head = std::mem::take(&mut current),
            Event::End(TagEnd::TableRow) => rows.push(std::mem::take(&mut current)),
            Event::End(TagEnd::Table) => break,
            _ => {}
        }
    }
    Block::Table { head, rows }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
