//! Vizcheck - heuristic code analysis for the Code Visualizer.
//!
//! Vizcheck runs the visualizer's per-language quality heuristics over local
//! source files and manages the visualizer's local kanban task board. The
//! analyzer is a pure function from (source text, language tag) to an ordered
//! list of findings; it never fails, converting internal errors into a single
//! error-severity finding.
//!
//! # Architecture
//!
//! - `analyzer`: the language variants and the `analyze` entry point
//! - `board`: kanban board model with expiring tasks and JSON persistence
//! - `report`: output formatting (pretty, JSON)
//! - `cli`: command-line argument handling
//!
//! # Adding a New Language
//!
//! Add a variant to `analyzer::Language`, a module under `src/analyzer/`,
//! and an arm in `analyze_language`; the compiler points at every dispatch
//! site that needs updating.

pub mod analyzer;
pub mod board;
pub mod cli;
pub mod report;

pub use analyzer::{analyze, analyze_language, Finding, Language, Severity};
pub use board::{Board, BoardStore, Column, Priority, Task};
pub use report::{FileReport, JsonReport, SeverityCounts};
