use anyhow::Result;
use clap::{Parser, Subcommand};
use minpo_client::{ApiClient, DisclosureController, QueryController, SearchState};
use minpo_core::{AnswerPayload, LawSource, reconcile};
use std::io::Write as _;

mod display;

#[derive(Parser)]
#[command(name = "minpo", version, about = "民法RAG検索クライアント")]
struct Cli {
    /// Backend base URL.
    #[arg(
        long,
        env = "MINPO_BACKEND_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    backend: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the civil code with a natural-language question.
    Search {
        /// Question, e.g. 相続分は？
        query: String,
        /// Print results and exit without the article prompt.
        #[arg(long)]
        no_prompt: bool,
    },
    /// Fetch one provision's full text, e.g. 第900条.
    Article { key: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    tracing::debug!("minpo v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();
    let api = ApiClient::new(cli.backend.clone());

    match cli.command {
        Command::Search { query, no_prompt } => run_search(&api, &query, no_prompt).await,
        Command::Article { key } => run_article(&api, &key).await,
    }
}

async fn run_search(api: &ApiClient, query: &str, no_prompt: bool) -> Result<()> {
    let mut controller = QueryController::new();
    match controller.run(api, query).await {
        SearchState::Idle => {
            println!("質問が空です。");
            Ok(())
        }
        SearchState::Failed(msg) => {
            println!("検索に失敗しました: {msg}");
            Ok(())
        }
        SearchState::Ready(payload) => {
            let sources = print_answer(payload);
            if no_prompt || sources.is_empty() {
                return Ok(());
            }
            prompt_articles(api, &sources).await
        }
        SearchState::Loading => Ok(()),
    }
}

/// Print the answer body, warnings and source lists; return the sources
/// in display order for the disclosure prompt.
fn print_answer(payload: &AnswerPayload) -> Vec<LawSource> {
    let doc = minpo_render::render(&payload.answer);
    println!("{}", display::document_to_text(&doc));

    if !payload.warnings.is_empty() {
        println!("\nWarnings");
        for warning in &payload.warnings {
            println!("  - {warning}");
        }
    }

    let reconciled = reconcile(payload);
    let mut sources = Vec::new();

    if reconciled.primary.is_empty() {
        println!("\n参照: なし");
    } else {
        println!("\n参照");
        for source in &reconciled.primary {
            sources.push(source.clone());
            println!("  {}", display::source_line(sources.len(), source));
        }
    }
    if !reconciled.related.is_empty() {
        println!("\nその他の候補");
        for source in &reconciled.related {
            sources.push(source.clone());
            println!("  {}", display::source_line(sources.len(), source));
        }
    }
    sources
}

/// Interactive disclosure loop: a source number toggles its card,
/// fetching the provision text on first open. Blank line or EOF exits.
async fn prompt_articles(api: &ApiClient, sources: &[LawSource]) -> Result<()> {
    let mut cards: Vec<DisclosureController> =
        sources.iter().map(DisclosureController::new).collect();

    println!("\n番号を入力すると条文を開閉します（空行で終了）");
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        line.clear();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            break;
        }
        let selected = match input.parse::<usize>() {
            Ok(n) if (1..=cards.len()).contains(&n) => n - 1,
            _ => {
                println!("1〜{} の番号を入力してください", cards.len());
                continue;
            }
        };

        let card = &mut cards[selected];
        // Failed cards retry on re-selection while open.
        if let Some(ticket) = card.retry() {
            let result = api.fetch_article(&ticket.key).await;
            card.apply(ticket, result);
        } else {
            card.open(api).await;
        }
        println!("{}", display::card_text(card));
    }
    Ok(())
}

async fn run_article(api: &ApiClient, key: &str) -> Result<()> {
    match api.fetch_article(key).await {
        Ok(detail) => {
            println!("{}", detail.article);
            println!("{}", detail.text);
        }
        Err(err) => println!("取得に失敗しました: {err}"),
    }
    Ok(())
}
