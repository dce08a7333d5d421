//! # dnsdig
//!
//! Digs every query given on the command line (or stdin) through a bounded
//! worker pool, registering unseen domains on the way. `--list` browses the
//! registry instead.

mod bootstrap;
mod di;
mod output;

use bootstrap::{init_database, init_logging, load_config, log_config};
use clap::{Args, Parser};
use dnsdig_application::ports::DomainFilter;
use dnsdig_domain::{CliOverrides, Config, LogFormat};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dnsdig")]
#[command(version)]
#[command(about = "Dig domains through a pool of DNS workers")]
struct Cli {
    /// Queries to dig; read one per line from stdin when omitted
    queries: Vec<String>,

    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Number of dig workers
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Admission queue capacity
    #[arg(long)]
    queue_capacity: Option<usize>,

    /// Upstream resolver (ip:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Per-query resolver timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// SQLite database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log line format (text, json)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Print results as JSON lines
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    list: ListArgs,
}

#[derive(Args)]
struct ListArgs {
    /// List registered domains instead of digging
    #[arg(long)]
    list: bool,

    /// Only domains with this name (label left of the TLD)
    #[arg(long, requires = "list")]
    name: Option<String>,

    /// Only domains under this TLD, e.g. co.uk
    #[arg(long, requires = "list")]
    tld: Option<String>,

    /// Only the domain with this uuid
    #[arg(long, requires = "list")]
    uuid: Option<uuid::Uuid>,

    /// Page size (at most 1000)
    #[arg(long, default_value_t = 50)]
    limit: u32,

    /// Domains to skip before the page starts
    #[arg(long, default_value_t = 0)]
    offset: u32,
}

impl ListArgs {
    fn filter(&self) -> DomainFilter {
        DomainFilter {
            name: self.name.clone(),
            uuid: self.uuid,
            tld: self.tld.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        workers: cli.workers,
        queue_capacity: cli.queue_capacity,
        upstream: cli.upstream,
        timeout_ms: cli.timeout_ms,
        database_path: cli.database,
        log_level: cli.log_level,
        log_format: cli.log_format,
    };

    let config = load_config(cli.config.as_deref(), overrides)?;
    init_logging(&config);
    log_config(cli.config.as_deref(), &config);

    if cli.list.list {
        return list_domains(&config, &cli.list, cli.json).await;
    }

    let queries = if cli.queries.is_empty() {
        read_queries_from_stdin().await?
    } else {
        cli.queries
    };
    if queries.is_empty() {
        warn!("No queries given");
        return Ok(());
    }

    let pool = init_database(&config.database).await?;
    let dispatcher = di::build_dispatcher(pool, &config).await?;
    dispatcher.start()?;

    let mut handles = Vec::with_capacity(queries.len());
    for query in &queries {
        handles.push(dispatcher.add_query(query).await);
    }
    info!(queries = queries.len(), "All queries submitted");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (query, handle) in queries.iter().zip(handles) {
        let result = handle.recv().await;
        output::print_result(&mut out, query, &result, cli.json)?;
    }
    out.flush()?;
    drop(out);

    let stats = dispatcher.stats();
    info!(
        completed = stats.completed,
        resolution_failures = stats.resolution_failures,
        admission_failures = stats.admission_failures,
        "Digs finished"
    );

    dispatcher.shutdown().await;
    Ok(())
}

async fn list_domains(config: &Config, args: &ListArgs, json: bool) -> anyhow::Result<()> {
    let pool = init_database(&config.database).await?;
    let use_case = di::build_list_domains(pool);

    let domains = use_case
        .execute(&args.filter(), args.limit, args.offset)
        .await?;
    info!(found = domains.len(), offset = args.offset, "Domains listed");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::print_domains(&mut out, &domains, json)?;
    out.flush()?;
    Ok(())
}

/// One query per line; blank lines and `#` comments are skipped.
async fn read_queries_from_stdin() -> anyhow::Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut queries = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        queries.push(line.to_string());
    }

    Ok(queries)
}
