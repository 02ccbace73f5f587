use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use frontdesk_core::{ChatSession, SearchSession, ServiceConfig};
use frontdesk_schema::{Phase, StudentRecord};
use frontdesk_transport::{HttpTransport, QueryTransport, StubTransport};

#[derive(Parser)]
#[command(
    name = "frontdesk",
    version,
    about = "Client for the concierge chat and student directory service"
)]
struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Answer from a built-in stub instead of the network")]
    stub: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Interactive concierge chat")]
    Chat,
    #[command(about = "Query the student directory")]
    Search {
        #[arg(help = "Query to run once; omit for an interactive prompt")]
        query: Option<String>,
    },
    #[command(about = "Validate the config file")]
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };

    match cli.command {
        Commands::Validate => {
            config.validate()?;
            println!(
                "Config valid. base_url={}, timeout={}s",
                config.base_url, config.timeout_secs
            );
        }
        Commands::Chat => {
            let transport = build_transport(cli.stub, &config);
            run_chat(transport.as_ref(), &config).await?;
        }
        Commands::Search { query } => {
            let transport = build_transport(cli.stub, &config);
            match query {
                Some(query) => run_search_once(transport.as_ref(), &query).await,
                None => run_search_repl(transport.as_ref()).await?,
            }
        }
    }

    Ok(())
}

fn build_transport(stub: bool, config: &ServiceConfig) -> Arc<dyn QueryTransport> {
    if stub {
        tracing::info!("using stub transport, no requests will leave this process");
        Arc::new(StubTransport)
    } else {
        Arc::new(HttpTransport::new(&config.base_url, config.timeout()))
    }
}

async fn run_chat(transport: &dyn QueryTransport, config: &ServiceConfig) -> Result<()> {
    let greeting = config
        .concierge_greeting
        .as_deref()
        .unwrap_or("Welcome to the front desk. Ask anything; type 'quit' to leave.");
    println!("{greeting}");

    let mut session = ChatSession::new();
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input == "quit" || input == "exit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        session.set_draft(input);
        session.submit(transport).await;
        if let Some(turn) = session.latest_reply() {
            println!("{}", turn.text);
        }
    }
    Ok(())
}

async fn run_search_once(transport: &dyn QueryTransport, query: &str) {
    let mut session = SearchSession::new();
    session.set_draft(query);
    run_search(&mut session, transport).await;
}

async fn run_search_repl(transport: &dyn QueryTransport) -> Result<()> {
    println!("Student directory. Enter a query; type 'quit' to leave.");
    let mut session = SearchSession::new();
    let stdin = std::io::stdin();
    loop {
        print!("search> ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input == "quit" || input == "exit" {
            break;
        }
        if input.is_empty() {
            continue;
        }

        session.set_draft(input);
        run_search(&mut session, transport).await;
    }
    Ok(())
}

async fn run_search(session: &mut SearchSession, transport: &dyn QueryTransport) {
    if !session.submit(transport).await {
        return;
    }
    match session.phase() {
        Phase::Succeeded => print_records(session.records(), session.dropped()),
        Phase::Failed(message) => println!("{message}"),
        // submit always settles; nothing to print otherwise.
        _ => {}
    }
}

fn print_records(records: &[StudentRecord], dropped: usize) {
    if records.is_empty() {
        println!("No valid records in the response.");
    } else {
        println!("{:<20} {:<24} {:<16}", "NAME", "SCHOOL", "PHONE");
        println!("{}", "-".repeat(60));
        for record in records {
            println!(
                "{:<20} {:<24} {:<16}",
                record.name, record.school, record.phone
            );
        }
        println!("{} student(s)", records.len());
    }
    if dropped > 0 {
        tracing::warn!(dropped, "incomplete rows were dropped from the result");
    }
}
