//! semsearch CLI
//!
//! Loads a PDF or paged text file, embeds every page and prints the pages
//! closest in meaning to the query.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use semsearch::embedding::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use semsearch::{
    EmbeddingProvider, HashedEmbedding, IndexConfig, Instrumented, OpenAiConfig,
    OpenAiEmbeddings, PageFile, SearchHit, SegmentSource, SemanticIndex, DEFAULT_TOP_K,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    /// OpenAI embeddings API (needs OPENAI_API_KEY)
    Openai,
    /// Local feature-hashing embedding, no network
    Hashed,
}

/// semsearch - Semantic search over the pages of a text document
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// PDF, or text file with pages separated by form feed
    file: PathBuf,

    /// Natural-language query
    query: String,

    /// Number of pages to return
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_TOP_K,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    k: usize,

    /// Embedding provider
    #[arg(long, value_enum, default_value_t = ProviderKind::Openai)]
    provider: ProviderKind,

    /// Embedding model (openai provider)
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// API root URL (openai provider)
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api_base: String,

    /// Request timeout in seconds (openai provider)
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Vector length (hashed provider)
    #[arg(long, default_value_t = 256)]
    dimension: usize,

    /// Embedding calls in flight while indexing (0 = one per CPU core)
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Print hits as JSON
    #[arg(long)]
    json: bool,

    /// Print embedding call statistics to stderr
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for results
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("semsearch=info".parse()?))
        .init();

    let args = Args::parse();

    let document = PageFile::open(&args.file)?;
    let pages = document.segments()?;

    match args.provider {
        ProviderKind::Openai => {
            let config = OpenAiConfig::from_env()
                .with_base_url(&args.api_base)
                .with_model(&args.model)
                .with_timeout(Duration::from_secs(args.timeout_secs));
            let provider = OpenAiEmbeddings::new(config)?;
            run(provider, pages, &args).await
        }
        ProviderKind::Hashed => run(HashedEmbedding::new(args.dimension), pages, &args).await,
    }
}

async fn run<P: EmbeddingProvider>(provider: P, pages: Vec<String>, args: &Args) -> anyhow::Result<()> {
    let provider = Instrumented::new(provider);
    let metrics = provider.metrics().clone();

    let config = IndexConfig::default().with_concurrency(args.concurrency);
    info!(
        "Indexing {} pages with {} (concurrency {})",
        pages.len(),
        provider.name(),
        config.effective_concurrency()
    );

    let mut index = SemanticIndex::with_config(provider, config);
    let outcome = match index.ingest(pages).await {
        Ok(ids) => {
            info!("Indexed {} pages", ids.len());
            index.search(&args.query, args.k).await
        }
        Err(e) => Err(e),
    };

    if args.stats {
        eprintln!("{}", metrics.summary());
    }

    let hits = outcome?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        print_hits(&hits);
    }

    Ok(())
}

fn print_hits(hits: &[SearchHit]) {
    for hit in hits {
        println!("{}: {}", hit.id, hit.score);
        println!("{}", hit.text);
        println!("{}", "-".repeat(100));
    }
}
