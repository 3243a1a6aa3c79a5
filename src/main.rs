use clap::{Parser, Subcommand};

use ragwire::client::{ClientError, PipelineClient};
use ragwire::config::Config;
use ragwire::models::{AskRequest, CrawlRequest, IndexRequest, OperationOutcome};
use ragwire::params::{self, RawParams};
use ragwire::pipeline::Pipeline;
use ragwire::report;

/// Drive a crawl -> index -> ask RAG backend.
///
/// The endpoint comes from RAGWIRE_BASE_URL / RAGWIRE_API_PREFIX /
/// RAGWIRE_TIMEOUT_SECS (or a .env file), defaulting to
/// http://127.0.0.1:8000 under /api.
#[derive(Parser)]
#[command(name = "ragwire", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

// Flag values stay untyped text on purpose: the parameter resolver owns the
// parse-or-default contract for every input surface, CLI included.
#[derive(Subcommand)]
enum Command {
    /// Crawl a site starting from a URL
    Crawl {
        start_url: String,
        #[arg(long)]
        max_pages: Option<String>,
        #[arg(long)]
        max_depth: Option<String>,
        /// Crawl delay between page fetches
        #[arg(long)]
        delay_ms: Option<String>,
    },
    /// Chunk and embed the crawled content
    Index {
        #[arg(long)]
        chunk_size: Option<String>,
        #[arg(long)]
        chunk_overlap: Option<String>,
        #[arg(long)]
        embedding_model: Option<String>,
    },
    /// Answer a question over the built index
    Ask {
        question: String,
        #[arg(long)]
        top_k: Option<String>,
    },
    /// Run all three stages in order, stopping at the first failed stage
    Run {
        start_url: String,
        question: String,
        #[arg(long)]
        max_pages: Option<String>,
        #[arg(long)]
        max_depth: Option<String>,
        #[arg(long)]
        delay_ms: Option<String>,
        #[arg(long)]
        chunk_size: Option<String>,
        #[arg(long)]
        chunk_overlap: Option<String>,
        #[arg(long)]
        embedding_model: Option<String>,
        #[arg(long)]
        top_k: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let client = PipelineClient::new(config)?;

    let result = match cli.command {
        Command::Crawl {
            start_url,
            max_pages,
            max_depth,
            delay_ms,
        } => {
            let raw = crawl_params(start_url, max_pages, max_depth, delay_ms);
            let request = params::resolve_crawl(&raw)?;
            client.crawl(&request).await
        }
        Command::Index {
            chunk_size,
            chunk_overlap,
            embedding_model,
        } => {
            let raw = index_params(chunk_size, chunk_overlap, embedding_model);
            let request = params::resolve_index(&raw);
            client.index(&request).await
        }
        Command::Ask { question, top_k } => {
            let raw = ask_params(question, top_k);
            let request = params::resolve_ask(&raw)?;
            client.ask(&request).await
        }
        Command::Run {
            start_url,
            question,
            max_pages,
            max_depth,
            delay_ms,
            chunk_size,
            chunk_overlap,
            embedding_model,
            top_k,
        } => {
            let crawl_request =
                params::resolve_crawl(&crawl_params(start_url, max_pages, max_depth, delay_ms))?;
            let index_request =
                params::resolve_index(&index_params(chunk_size, chunk_overlap, embedding_model));
            let ask_request = params::resolve_ask(&ask_params(question, top_k))?;
            run_pipeline(client, &crawl_request, &index_request, &ask_request).await
        }
    };

    report_result(result);
    Ok(())
}

/// Full crawl -> index -> ask sequence; stage receipts enforce the order and
/// a stage that reports failure short-circuits the rest.
async fn run_pipeline(
    client: PipelineClient,
    crawl_request: &CrawlRequest,
    index_request: &IndexRequest,
    ask_request: &AskRequest,
) -> Result<OperationOutcome, ClientError> {
    let pipeline = Pipeline::new(client);

    let (crawled, crawl_outcome) = pipeline.crawl(crawl_request).await?;
    let Some(crawled) = crawled else {
        return Ok(crawl_outcome);
    };
    println!("{}", report::render(&crawl_outcome));

    let (indexed, index_outcome) = pipeline.index(&crawled, index_request).await?;
    let Some(indexed) = indexed else {
        return Ok(index_outcome);
    };
    println!("{}", report::render(&index_outcome));

    pipeline.ask(&indexed, ask_request).await
}

fn report_result(result: Result<OperationOutcome, ClientError>) {
    match result {
        Ok(outcome) => println!("{}", report::render(&outcome)),
        Err(error) => {
            eprintln!("{}", report::render_error(&error));
            std::process::exit(1);
        }
    }
}

fn crawl_params(
    start_url: String,
    max_pages: Option<String>,
    max_depth: Option<String>,
    delay_ms: Option<String>,
) -> RawParams {
    let mut raw = RawParams::new().set("start_url", start_url);
    if let Some(v) = max_pages {
        raw = raw.set("max_pages", v);
    }
    if let Some(v) = max_depth {
        raw = raw.set("max_depth", v);
    }
    if let Some(v) = delay_ms {
        raw = raw.set("crawl_delay_ms", v);
    }
    raw
}

fn index_params(
    chunk_size: Option<String>,
    chunk_overlap: Option<String>,
    embedding_model: Option<String>,
) -> RawParams {
    let mut raw = RawParams::new();
    if let Some(v) = chunk_size {
        raw = raw.set("chunk_size", v);
    }
    if let Some(v) = chunk_overlap {
        raw = raw.set("chunk_overlap", v);
    }
    if let Some(v) = embedding_model {
        raw = raw.set("embedding_model", v);
    }
    raw
}

fn ask_params(question: String, top_k: Option<String>) -> RawParams {
    let mut raw = RawParams::new().set("question", question);
    if let Some(v) = top_k {
        raw = raw.set("top_k", v);
    }
    raw
}
