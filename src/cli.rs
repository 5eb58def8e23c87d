//! Command-line interface for vizcheck.

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analyzer::{self, Language};
use crate::board::{BoardStore, Priority};
use crate::report::{self, FileReport};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Environment variable overriding the board file location.
const BOARD_PATH_ENV: &str = "VIZCHECK_BOARD";

/// Directory scans only show a progress bar above this many files.
const PROGRESS_THRESHOLD: usize = 10;

/// Heuristic code analysis and task board companion for the Code Visualizer.
///
/// Runs the visualizer's per-language quality heuristics over local files and
/// manages the local kanban task board from the terminal.
#[derive(Parser)]
#[command(name = "vizcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze source files and report findings
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Manage the kanban task board
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },
    /// List supported language tags
    Languages,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Force a language tag instead of inferring from file extensions
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum BoardCommands {
    /// Add a task to a column
    Add {
        /// Task text
        content: String,
        /// Task priority: low, medium, or high
        #[arg(short, long, default_value = "medium", value_parser = parse_priority)]
        priority: Priority,
        /// Who the task is assigned to
        #[arg(short, long, default_value = "")]
        assign: String,
        /// Column to add the task to
        #[arg(short, long, default_value = "todo")]
        column: String,
        /// Display style tag for the card
        #[arg(long, default_value = "")]
        style: String,
    },
    /// List tasks, optionally for a single column
    List {
        /// Only show this column
        #[arg(short, long)]
        column: Option<String>,
    },
    /// Move a task to another column
    Move {
        /// Task id
        task_id: String,
        /// Target column id
        column: String,
    },
    /// Remove a task
    Remove {
        /// Task id
        task_id: String,
    },
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let forced = match &args.language {
        Some(tag) => match Language::parse(tag) {
            Some(language) => Some(language),
            None => {
                eprintln!(
                    "Error: unsupported language {:?} (supported: {})",
                    tag,
                    supported_tags()
                );
                return Ok(EXIT_ERROR);
            }
        },
        None => None,
    };

    // Resolve each argument to (path, language) pairs up front so that a bad
    // argument fails before any analysis output.
    let mut targets: Vec<(PathBuf, Language)> = Vec::new();
    for path in &args.paths {
        if path.is_dir() {
            for file in collect_files(path) {
                let language = forced
                    .or_else(|| language_for(&file))
                    .expect("collect_files only yields supported extensions");
                targets.push((file, language));
            }
        } else if path.is_file() {
            let language = match forced.or_else(|| language_for(path)) {
                Some(l) => l,
                None => {
                    eprintln!(
                        "Error: cannot infer a language for {:?}; pass --language",
                        path
                    );
                    return Ok(EXIT_ERROR);
                }
            };
            targets.push((path.clone(), language));
        } else {
            eprintln!("Error: no such file or directory: {:?}", path);
            return Ok(EXIT_ERROR);
        }
    }

    if targets.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let progress = if args.format == "pretty" && targets.len() > PROGRESS_THRESHOLD {
        ProgressBar::new(targets.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let mut reports: Vec<FileReport> = targets
        .par_iter()
        .map(|(path, language)| {
            let report = analyze_file(path, *language);
            progress.inc(1);
            report
        })
        .collect();
    progress.finish_and_clear();

    // Parallel collection preserves input order, but sort anyway so output is
    // stable independent of how the arguments were expanded.
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    match args.format.as_str() {
        "json" => report::write_json(&reports)?,
        _ => report::write_pretty(&reports),
    }

    if reports.iter().any(|r| r.has_errors()) {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn analyze_file(path: &Path, language: Language) -> FileReport {
    let findings = match std::fs::read_to_string(path) {
        Ok(source) => analyzer::analyze_language(&source, language),
        Err(e) => vec![analyzer::Finding::error(format!(
            "Failed to read file: {}",
            e
        ))],
    };
    FileReport {
        path: path.to_string_lossy().to_string(),
        language,
        findings,
    }
}

fn language_for(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
}

/// Collect analyzable files under a directory.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden and dependency directories, but never the root the
            // walk started from (it may be "." or ".." on the command line).
            if e.depth() > 0
                && e.file_type().is_dir()
                && (name.starts_with('.') || name == "node_modules")
            {
                return false;
            }
            true
        })
        .flatten()
    {
        if entry.file_type().is_file() && language_for(entry.path()).is_some() {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    files
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse()
}

fn supported_tags() -> String {
    Language::ALL
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run a board subcommand.
pub fn run_board(command: &BoardCommands) -> anyhow::Result<i32> {
    let store = match std::env::var_os(BOARD_PATH_ENV) {
        Some(path) => BoardStore::at(PathBuf::from(path)),
        None => BoardStore::open_default()?,
    };
    let mut board = store.load()?;

    match command {
        BoardCommands::Add {
            content,
            priority,
            assign,
            column,
            style,
        } => {
            let id = board.add_task(column, content, *priority, assign, style)?;
            store.save(&board)?;
            println!("Added task {} to column {:?}", id, column);
        }
        BoardCommands::List { column } => {
            if let Some(column_id) = column {
                if !board.columns.contains_key(column_id) {
                    eprintln!("Error: no column with id {:?}", column_id);
                    return Ok(EXIT_ERROR);
                }
            }
            for col in board.ordered_columns() {
                if column.as_deref().is_some_and(|c| c != col.id) {
                    continue;
                }
                println!("{} ({})", col.title, col.tasks.len());
                for task in &col.tasks {
                    let assigned = if task.assigned_to.is_empty() {
                        String::new()
                    } else {
                        format!("  @{}", task.assigned_to)
                    };
                    println!(
                        "  [{}] {} ({}){}",
                        task.id, task.content, task.priority, assigned
                    );
                }
            }
        }
        BoardCommands::Move { task_id, column } => {
            board.move_task(task_id, column)?;
            store.save(&board)?;
            println!("Moved task {} to column {:?}", task_id, column);
        }
        BoardCommands::Remove { task_id } => {
            let task = board.remove_task(task_id)?;
            store.save(&board)?;
            println!("Removed task {}: {}", task.id, task.content);
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    println!("Supported languages:");
    for language in Language::ALL {
        println!("  {}", language.as_str());
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_extensions() {
        assert_eq!(
            language_for(Path::new("a/b/app.jsx")),
            Some(Language::JavaScript)
        );
        assert_eq!(language_for(Path::new("query.SQL")), Some(Language::Sql));
        assert_eq!(language_for(Path::new("readme.md")), None);
        assert_eq!(language_for(Path::new("Makefile")), None);
    }

    #[test]
    fn test_collect_files_skips_hidden_and_node_modules() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path();
        std::fs::write(root.join("app.js"), "function f() {}").unwrap();
        std::fs::write(root.join("notes.txt"), "skip me").unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
        std::fs::create_dir_all(root.join(".cache")).unwrap();
        std::fs::write(root.join(".cache/tmp.py"), "x").unwrap();

        let files = collect_files(root);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }
}
