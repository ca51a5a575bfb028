//! Tooleval - Software Tool Evaluation Tracker
//!
//! Command-line front end for browsing evaluations and asking the
//! assistant about them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tooleval_core::{
    dashboard::presentation::{truncate_label, ScoreBand, StatusStyle, KNOWN_CATEGORIES},
    AnthropicClient, AppConfig, ConversationManager, Dashboard, DataStore, EvaluationRecord,
    FilterQuery, RecordId, Role, StatusFilter,
};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tooleval")]
#[command(about = "Browse software tool evaluations and ask questions about them")]
#[command(version)]
struct Cli {
    /// Path to the evaluations JSON file
    #[arg(long, global = true, env = "TOOLEVAL_DATA")]
    data: Option<PathBuf>,

    /// Path to the TOML config file
    #[arg(long, global = true, env = "TOOLEVAL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List evaluations matching a query, most recent first
    List {
        /// Case-insensitive search over tool name, findings and evaluator
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to include (repeatable)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Status to include ("All" for every status)
        #[arg(long, default_value = "All")]
        status: StatusFilter,
    },

    /// Show summary statistics
    Stats,

    /// Show the full evaluation for one tool
    Show {
        /// Record id
        id: String,
    },

    /// List categories used by the dataset
    Categories,

    /// Ask the assistant a single question
    Ask {
        /// The question
        question: Vec<String>,
    },

    /// Start an interactive conversation (type /quit to leave)
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.parse::<Level>().unwrap_or(Level::WARN);
    let filter = EnvFilter::new(format!(
        "tooleval={0},tooleval_core={0}",
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Tooleval v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let data_path = config.dataset_path(cli.data);
    let store = DataStore::load(&data_path)
        .with_context(|| format!("Failed to load evaluations from {}", data_path.display()))?;

    match cli.command {
        Commands::List {
            search,
            categories,
            status,
        } => {
            let query = categories
                .into_iter()
                .fold(FilterQuery::new().with_search(search), |q, c| q.with_category(c))
                .with_status(status);
            list(store, query);
            Ok(())
        }
        Commands::Stats => {
            stats(store);
            Ok(())
        }
        Commands::Show { id } => show(store, &RecordId::new(id)),
        Commands::Categories => {
            categories(&store);
            Ok(())
        }
        Commands::Ask { question } => {
            let manager = start_conversation(&config, &store)?;
            manager.send(&question.join(" ")).await;
            print_last_reply(&manager);
            Ok(())
        }
        Commands::Chat => {
            let manager = start_conversation(&config, &store)?;
            chat(&manager).await
        }
    }
}

fn start_conversation(config: &AppConfig, store: &DataStore) -> Result<ConversationManager> {
    let client = AnthropicClient::new(config.llm_config())
        .context("The assistant needs ANTHROPIC_API_KEY to be set")?;
    Ok(ConversationManager::new(store, Arc::new(client))?)
}

fn list(store: DataStore, query: FilterQuery) {
    let mut dashboard = Dashboard::new(store);
    dashboard.set_query(query);

    let visible = dashboard.visible();
    if visible.is_empty() {
        println!("No evaluations found matching your criteria.");
        return;
    }

    for record in visible {
        print_summary_line(record);
    }
}

fn print_summary_line(record: &EvaluationRecord) {
    let style = StatusStyle::for_status(record.status);
    let score = record
        .overall_score
        .map(|s| format!("{:.1}/5", s))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "[{}] {} {:<28} {:<13} {:>6}  {}  {}",
        record.id,
        style.icon,
        record.tool_name,
        style.label,
        score,
        record.evaluation_date,
        record.category.join(", ")
    );
}

fn stats(store: DataStore) {
    let stats = Dashboard::new(store).stats();

    println!();
    println!("📊 Evaluation Summary");
    println!("   Total evaluations: {}", stats.total);
    println!("   Approval rate:     {}%", stats.approval_rate);
    println!("   Approved:          {}", stats.approved);
    println!("   Piloting:          {}", stats.piloting);
    println!("   In progress:       {}", stats.in_progress);
    println!("   Under review:      {}", stats.under_review);
    println!("   Rejected:          {}", stats.rejected);
    println!("   Not started:       {}", stats.not_started);
    println!();
}

fn show(store: DataStore, id: &RecordId) -> Result<()> {
    let dashboard = Dashboard::new(store);
    let detail = dashboard
        .detail(id)
        .with_context(|| format!("No evaluation with id {}", id))?;
    let record = detail.record;
    let style = StatusStyle::for_status(record.status);

    println!();
    println!("{} {}  ({})", style.icon, record.tool_name, style.label);
    if let Some(score) = record.overall_score {
        println!("   Overall score: {:.1}/5 ({:?})", score, ScoreBand::from_score(score));
    }
    println!("   Categories:    {}", record.category.join(", "));
    println!("   Evaluator:     {}", record.evaluator);
    println!("   Evaluated:     {}", record.evaluation_date);
    if let Some(next) = &record.next_review_date {
        println!("   Next review:   {}", next);
    }
    println!("   Cost:          {}", record.cost);

    if let Some(scores) = &record.detailed_scores {
        println!();
        println!("Score breakdown:");
        for (criterion, score) in scores.iter() {
            println!("   {:<23} {:.1}", truncate_label(criterion, 20), score);
        }
    }

    print_section("Key findings", &record.key_findings);
    print_list("Pros", &record.pros);
    print_list("Cons", &record.cons);
    print_section("Recommendation", &record.recommendation);
    print_section("Business impact", &record.business_impact);
    if let Some(use_cases) = record.use_cases.as_deref().filter(|u| !u.is_empty()) {
        print_list("Use cases", use_cases);
    }

    if !detail.examples.is_empty() {
        println!();
        println!("Examples created with {}:", record.tool_name);
        for example in &detail.examples {
            match &example.url {
                Some(url) => println!("   • {} → {}", truncate_label(&example.description, 30), url),
                None => println!("   • {}", example.description),
            }
        }
    }
    println!();

    Ok(())
}

fn print_section(title: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    println!("   {}", body);
}

fn print_list(title: &str, items: &[String]) {
    println!();
    println!("{}:", title);
    for item in items {
        println!("   • {}", item);
    }
}

fn categories(store: &DataStore) {
    for category in store.categories() {
        let count = store
            .records()
            .iter()
            .filter(|r| r.has_category(category))
            .count();
        let marker = if KNOWN_CATEGORIES.contains(&category) {
            ""
        } else {
            "  (not in filter list)"
        };
        println!("{:<24} {:>3}{}", category, count, marker);
    }
}

fn print_last_reply(manager: &ConversationManager) {
    if let Some(reply) = manager
        .history()
        .last()
        .filter(|message| message.role == Role::Assistant)
    {
        println!("{}", reply.content);
    }
}

async fn chat(manager: &ConversationManager) -> Result<()> {
    println!("Ask me anything about the tool evaluations!");
    println!("Try: \"What are the pros and cons of Clueso?\"  (/quit to leave)");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        manager.send(line).await;
        print_last_reply(manager);
    }

    Ok(())
}
