//! Plain-text presentation of answers, source lists, and article cards.
//!
//! Presentation policy lives here, not in the renderer: links are shown
//! with their target inline, tables as pipe-separated rows, code blocks
//! indented. Restyling this file never touches the sanitisation
//! contract.

use minpo_client::{DisclosureController, FetchState};
use minpo_core::LawSource;
use minpo_render::{Block, Inline, SafeDocument};

// ── Answer body ──

/// Flatten a sanitised answer document into terminal text.
pub fn document_to_text(doc: &SafeDocument) -> String {
    let mut out = String::new();
    write_blocks(&doc.blocks, "", &mut out);
    out.trim_end().to_string()
}

fn write_blocks(blocks: &[Block], indent: &str, out: &mut String) {
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match block {
            Block::Paragraph(inlines) => {
                out.push_str(indent);
                write_inlines(inlines, out);
                out.push('\n');
            }
            Block::Heading { level, content } => {
                out.push_str(indent);
                for _ in 0..*level {
                    out.push('#');
                }
                out.push(' ');
                write_inlines(content, out);
                out.push('\n');
            }
            Block::CodeBlock { language, text } => {
                if let Some(lang) = language {
                    out.push_str(indent);
                    out.push_str(&format!("[{lang}]\n"));
                }
                for line in text.lines() {
                    out.push_str(indent);
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Block::List { ordered, items } => {
                for (n, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}{}. ", indent, n + 1)
                    } else {
                        format!("{indent}- ")
                    };
                    let mut body = String::new();
                    write_blocks(item, "", &mut body);
                    for (j, line) in body.trim_end().lines().enumerate() {
                        if j == 0 {
                            out.push_str(&marker);
                        } else {
                            out.push_str(&" ".repeat(marker.len()));
                        }
                        out.push_str(line);
                        out.push('\n');
                    }
                }
            }
            Block::BlockQuote(inner) => {
                let mut body = String::new();
                write_blocks(inner, "", &mut body);
                for line in body.trim_end().lines() {
                    out.push_str(indent);
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Block::Table { head, rows } => {
                write_table_row(head, indent, out);
                if !head.is_empty() {
                    out.push_str(indent);
                    out.push_str(&"-".repeat(head.len() * 8));
                    out.push('\n');
                }
                for row in rows {
                    write_table_row(row, indent, out);
                }
            }
            Block::Rule => {
                out.push_str(indent);
                out.push_str("────────");
                out.push('\n');
            }
        }
    }
}

fn write_table_row(cells: &[Vec<Inline>], indent: &str, out: &mut String) {
    out.push_str(indent);
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        write_inlines(cell, out);
    }
    out.push('\n');
}

fn write_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push_str(t),
            Inline::Code(c) => {
                out.push('`');
                out.push_str(c);
                out.push('`');
            }
            Inline::Strong(c) | Inline::Emphasis(c) | Inline::Strikethrough(c) => {
                write_inlines(c, out);
            }
            Inline::Link { url, content } => {
                write_inlines(content, out);
                out.push_str(" <");
                out.push_str(url);
                out.push('>');
            }
            Inline::TaskMarker(done) => out.push_str(if *done { "[x] " } else { "[ ] " }),
            Inline::HardBreak => out.push('\n'),
        }
    }
}

// ── Source lists ──

/// One numbered source line: `1. 民法 / 第900条  (score 0.910)`.
pub fn source_line(index: usize, source: &LawSource) -> String {
    let mut line = format!("{}. {} / {}", index, source.title, source.article);
    if let Some(score) = source.score {
        line.push_str(&format!("  (score {score:.3})"));
    }
    line
}

// ── Article cards ──

/// Inline text for a card in its current state.
pub fn card_text(card: &DisclosureController) -> String {
    if !card.is_expanded() {
        return format!("（{} を閉じました）", card.key());
    }
    match card.state() {
        FetchState::Idle => String::new(),
        FetchState::Loading => "読み込み中…".to_string(),
        FetchState::Loaded(detail) => format!("{}\n{}", detail.article, detail.text),
        FetchState::Failed(msg) => {
            format!("取得に失敗しました: {msg}\n（もう一度番号を入力すると再試行します）")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minpo_render::render;

    #[test]
    fn answer_with_code_and_list_renders_flat() {
        let doc = render("要点:\n\n- 第900条\n- 第887条\n\n```text\n例\n```");
        let text = document_to_text(&doc);
        assert!(text.contains("- 第900条"));
        assert!(text.contains("    例"));
    }

    #[test]
    fn link_target_is_shown_inline() {
        let doc = render("[e-Gov](https://laws.e-gov.go.jp)");
        let text = document_to_text(&doc);
        assert_eq!(text, "e-Gov <https://laws.e-gov.go.jp>");
    }

    #[test]
    fn table_renders_as_rows() {
        let doc = render("| a | b |\n| - | - |\n| 1 | 2 |");
        let text = document_to_text(&doc);
        assert!(text.contains("a | b"));
        assert!(text.contains("1 | 2"));
    }

    #[test]
    fn source_line_includes_score_when_present() {
        let source = LawSource {
            id: "a1".into(),
            title: "民法".into(),
            article: "第900条".into(),
            article_label: None,
            score: Some(0.9104),
            text: None,
        };
        assert_eq!(source_line(1, &source), "1. 民法 / 第900条  (score 0.910)");
    }

    #[test]
    fn source_line_without_score() {
        let source = LawSource {
            id: "a2".into(),
            title: "民法".into(),
            article: "第887条".into(),
            article_label: None,
            score: None,
            text: None,
        };
        assert_eq!(source_line(2, &source), "2. 民法 / 第887条");
    }

    #[test]
    fn failed_card_offers_retry() {
        let mut card = DisclosureController::for_key("第9999条");
        let ticket = card.toggle().unwrap();
        card.apply(
            ticket,
            Err(minpo_client::ApiError::Server {
                status: 404,
                body: "{\"error\": \"not found\"}".into(),
            }),
        );
        let text = card_text(&card);
        assert!(text.contains("取得に失敗しました"));
        assert!(text.contains("再試行"));
    }
}
