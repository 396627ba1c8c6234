//! Command-line front end for the practice tracker.
//!
//! # Responsibility
//! - Turn command-line arguments into tracker intents.
//! - Print snapshots as JSON and progress as plain rows.
//!
//! Usage:
//!   tracker [--config <file>] [--root <dir>] [--document <path>] <command>
//!   tracker topics
//!   tracker list [--topic <id>]
//!   tracker progress
//!   tracker add-question --topic <id> --title <title> [--difficulty <level>] ...
//!   tracker add-note --topic <id> --question <n> --note <text>

use clap::{Parser, Subcommand};
use log::warn;
use std::path::PathBuf;
use std::process;
use tracker_core::{
    init_logging, topic_catalog, AddNoteRequest, AddQuestionRequest, CounterPolicy, Difficulty,
    FsDocumentStore, SolutionFileStatus, TopicId, TrackerConfig, TrackerService,
};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(version, about = "Track practice questions in a markdown document")]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store root directory, overrides the config.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Tracked document path inside the store, overrides the config.
    #[arg(long, global = true)]
    document: Option<String>,

    /// Recount counters from the entries present instead of incrementing.
    #[arg(long, global = true)]
    recount: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the fixed topic catalog.
    Topics,
    /// Print parsed questions as JSON.
    List {
        /// Only questions of this topic id.
        #[arg(long)]
        topic: Option<TopicId>,
    },
    /// Print solved/total counts per topic.
    Progress,
    /// Append a question to a topic section.
    AddQuestion {
        /// Topic id (1-based).
        #[arg(long)]
        topic: TopicId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        approach: Option<String>,
        #[arg(long = "time")]
        time_complexity: Option<String>,
        #[arg(long = "space")]
        space_complexity: Option<String>,
        /// Repeat for several key points.
        #[arg(long = "key-point")]
        key_points: Vec<String>,
        /// Repeat for several edge cases.
        #[arg(long = "edge-case")]
        edge_cases: Vec<String>,
    },
    /// Append a note to an existing question.
    AddNote {
        /// Topic id (1-based).
        #[arg(long)]
        topic: TopicId,
        /// Question position within the topic (1-based).
        #[arg(long)]
        question: usize,
        #[arg(long)]
        note: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = load_config(&cli).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        process::exit(1);
    });
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("Warning: logging disabled: {err}");
        }
    }

    let service = config.open_service();
    if let Err(err) = run(cli.command, &service) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<TrackerConfig, String> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load(path).map_err(|err| err.to_string())?,
        None => TrackerConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.root_dir = root.clone();
    }
    if let Some(document) = &cli.document {
        config.document_path = document.clone();
    }
    if cli.recount {
        config.counter_policy = CounterPolicy::Recount;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn run(command: Command, service: &TrackerService<FsDocumentStore>) -> Result<(), String> {
    match command {
        Command::Topics => {
            for topic in topic_catalog() {
                println!("{:>2}. {}", topic.id, topic.name);
            }
        }
        Command::List { topic } => {
            let snapshot = service.load().map_err(|err| err.to_string())?;
            let json = match topic {
                Some(topic_id) => {
                    serde_json::to_string_pretty(&snapshot.questions_for_topic(topic_id))
                }
                None => serde_json::to_string_pretty(&snapshot.document),
            }
            .map_err(|err| err.to_string())?;
            println!("{json}");
        }
        Command::Progress => {
            let snapshot = service.load().map_err(|err| err.to_string())?;
            for row in snapshot.progress() {
                println!("{:>2}. {:<28} {}/{}", row.topic_id, row.name, row.completed, row.total);
            }
        }
        Command::AddQuestion {
            topic,
            title,
            difficulty,
            link,
            approach,
            time_complexity,
            space_complexity,
            key_points,
            edge_cases,
        } => {
            let request = AddQuestionRequest {
                difficulty,
                link,
                approach,
                time_complexity,
                space_complexity,
                key_points: join_lines(key_points),
                edge_cases: join_lines(edge_cases),
                ..AddQuestionRequest::new(topic, title)
            };
            let outcome = service
                .add_question(&request)
                .map_err(|err| conflict_hint(&err))?;
            println!("Added question {}", outcome.question_number);
            match outcome.solution_status {
                SolutionFileStatus::Created => println!("Created {}", outcome.solution_path),
                SolutionFileStatus::Skipped => println!("Kept existing {}", outcome.solution_path),
                SolutionFileStatus::Failed(reason) => {
                    warn!("event=solution_file module=cli status=error");
                    eprintln!("Warning: could not create {}: {reason}", outcome.solution_path);
                }
            }
        }
        Command::AddNote {
            topic,
            question,
            note,
        } => {
            if topic == 0 || question == 0 {
                return Err("--topic and --question are 1-based".to_string());
            }
            let request = AddNoteRequest::new(topic as usize - 1, question - 1, note);
            service
                .add_note(&request)
                .map_err(|err| conflict_hint(&err))?;
            println!("Note added");
        }
    }
    Ok(())
}

fn join_lines(items: Vec<String>) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join("\n"))
    }
}

fn conflict_hint(err: &tracker_core::ServiceError) -> String {
    if err.is_conflict() {
        format!("{err}; the document changed, run the command again")
    } else {
        err.to_string()
    }
}
