//! lumina CLI: document browser with AI summaries and training roadmaps.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use lumina::controller::{Browser, Effect, Event};
use lumina::gateway::AiGateway;
use lumina::model::{CategoryFilter, Document};
use lumina::paths::LuminaPaths;
use lumina::session::{self, Overrides, Session};
use lumina::tui::LuminaTui;

#[derive(Parser)]
#[command(name = "lumina", version, about = "Document browser with AI summaries and training roadmaps")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/lumina/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Document fixture (TOML) to load instead of the configured or bundled set.
    #[arg(long, global = true)]
    documents: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive browser (default).
    Browse,

    /// List documents matching a category and search text.
    List {
        /// All, Manual, News, Standard, Roadmap or Other.
        #[arg(long, default_value = "All")]
        category: CategoryFilter,

        /// Case-insensitive match against titles and tags.
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show a document in full.
    Show {
        /// Document id.
        id: String,
    },

    /// Generate an AI summary of a document.
    Summarize {
        /// Document id.
        id: String,
    },

    /// Generate a training roadmap for a topic from all documents.
    Roadmap {
        /// Focus area, e.g. "Onboarding for Senior Engineers".
        topic: String,

        /// Print the roadmap as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse);

    if matches!(command, Commands::Browse) {
        init_file_logging()?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let overrides = Overrides {
        config_path: cli.config,
        documents: cli.documents,
    };
    let Session {
        config,
        store,
        gateway,
    } = Session::open(&overrides)?;
    let mut browser = Browser::new(store);

    match command {
        Commands::Browse => {
            let mut tui = LuminaTui::new(browser, Arc::new(gateway));
            tui.run()?;
        }

        Commands::List { category, search } => {
            browser.dispatch(Event::SetCategory(category))?;
            browser.dispatch(Event::SetSearch(search))?;
            let visible = browser.visible().unwrap_or_default();
            if visible.is_empty() {
                println!("No documents found in this section.");
            } else {
                println!("Navigating {} assets ({category}):", visible.len());
                for doc in visible {
                    let version = doc
                        .version
                        .as_ref()
                        .map(|v| format!("  V{v}"))
                        .unwrap_or_default();
                    println!(
                        "  {:<4} [{}] {}  ({}){version}",
                        doc.id, doc.category, doc.title, doc.date
                    );
                }
            }
        }

        Commands::Show { id } => {
            browser.dispatch(Event::Select(id))?;
            if let Some(doc) = browser.state().selected() {
                print_document(doc);
            }
        }

        Commands::Summarize { id } => {
            browser.dispatch(Event::Select(id))?;
            if let Some(effect) = browser.dispatch(Event::Summarize)? {
                resolve(&mut browser, effect, &gateway)?;
            }
            if let Some(summary) = browser.state().summary() {
                println!("{summary}");
            }
        }

        Commands::Roadmap { topic, json } => {
            if let Some(effect) = browser.dispatch(Event::GenerateRoadmap { topic })? {
                resolve(&mut browser, effect, &gateway)?;
            }
            if let Some(roadmap) = browser.state().roadmap() {
                if json {
                    println!("{}", serde_json::to_string_pretty(roadmap).into_diagnostic()?);
                } else {
                    println!("{}\n{}\n", roadmap.title, roadmap.objective);
                    for (i, step) in roadmap.steps.iter().enumerate() {
                        println!("{:>2}. {}  ({})", i + 1, step.title, step.duration);
                        println!("    {}", step.description);
                        for res in &step.resources {
                            println!("    - {res}");
                        }
                    }
                }
            }
        }

        Commands::Config => {
            let path = session::config_path(&overrides)?;
            println!("# {}", path.display());
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Run an effect inline. A failed request is reported instead of only logged.
fn resolve(browser: &mut Browser, effect: Effect, gateway: &AiGateway) -> Result<()> {
    match effect.run(gateway) {
        Event::SummaryResolved {
            result: Err(e), ..
        }
        | Event::RoadmapResolved(Err(e)) => Err(e.into()),
        resolved => {
            browser.dispatch(resolved)?;
            Ok(())
        }
    }
}

fn print_document(doc: &Document) {
    println!("{}", doc.title);
    let mut meta = format!("{} | {}", doc.category, doc.date);
    if let Some(v) = &doc.version {
        meta.push_str(&format!(" | V{v}"));
    }
    if let Some(a) = &doc.author {
        meta.push_str(&format!(" | {a}"));
    }
    println!("{meta}");
    if !doc.tags.is_empty() {
        println!(
            "{}",
            doc.tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>().join(" ")
        );
    }
    println!("\n{}\n\n{}", doc.summary, doc.content);
}

/// The TUI owns the terminal, so logs go to `$XDG_STATE_HOME/lumina/lumina.log`.
fn init_file_logging() -> Result<()> {
    let paths = LuminaPaths::resolve()?;
    paths.ensure_state_dir()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .into_diagnostic()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
