//! JavaScript heuristic variant.
//!
//! The only variant with a real parser: tree-sitter builds a syntax tree for
//! the structural findings (function/class/async counts, long and nested
//! functions, catch clauses), and a separate text-pattern pass scans the raw
//! source for console statements, `debugger;`, magic numbers, hardcoded URLs,
//! and TODO comments.

use once_cell::sync::Lazy;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use super::text::{count_matches, count_standalone_integers};
use super::thresholds::{LONG_FUNCTION_LINES, MAGIC_NUMBER_LIMIT};
use super::Finding;

const STRUCTURE_QUERY: &str = r#"
(function_declaration) @function
(function_expression) @function
(method_definition) @function
(arrow_function) @arrow
(class_declaration) @class
(new_expression) @new
(catch_clause) @catch
"#;

static CONSOLE_CALLS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"console\.(log|warn|error|info|debug)").unwrap());
static DEBUGGER_STATEMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"debugger;").unwrap());
static TODO_COMMENTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)//\s*TODO|/\*\s*TODO").unwrap());
// The upstream pattern required the closing quote to match the opener via a
// backreference; the linear-time engine accepts either quote instead.
static HARDCODED_URLS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["'](?:https?|ftp)://[\w-]+(?:\.[\w-]+)+[\w.,@?^=%&:/~+#-]*["']"#).unwrap()
});

/// Structural counters collected from the syntax tree.
#[derive(Default)]
struct Structure {
    functions: usize,
    arrow_functions: usize,
    classes: usize,
    async_functions: usize,
    promise_constructions: usize,
    catch_clauses: usize,
    /// Start lines of functions whose body exceeds the line threshold.
    long_functions: Vec<usize>,
    /// Start lines of functions that directly contain a nested declaration.
    nested_functions: Vec<usize>,
}

pub(super) fn analyze(source: &str) -> anyhow::Result<Vec<Finding>> {
    let language: Language = tree_sitter_javascript::LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language)?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow::anyhow!("parser produced no tree"))?;

    // Hard parse failure: report the first invalid node and nothing else.
    if tree.root_node().has_error() {
        return Ok(vec![syntax_error_finding(tree.root_node())]);
    }

    let mut findings = Vec::new();
    let structure = extract_structure(&language, tree.root_node(), source)?;

    findings.push(Finding::info(format!(
        "Found {} regular functions and {} arrow functions",
        structure.functions, structure.arrow_functions
    )));

    if structure.classes > 0 {
        findings.push(Finding::info(format!(
            "Found {} classes in the code",
            structure.classes
        )));
    }

    let uses_async = structure.async_functions > 0 || structure.promise_constructions > 0;
    if uses_async {
        findings.push(Finding::info(format!(
            "Asynchronous code: {} async functions, {} Promise constructions",
            structure.async_functions, structure.promise_constructions
        )));
    }

    if !structure.long_functions.is_empty() {
        findings.push(Finding::warning(format!(
            "Long functions detected (>{} lines): {}. Consider breaking them down.",
            LONG_FUNCTION_LINES,
            describe_lines(&structure.long_functions)
        )));
    }

    if !structure.nested_functions.is_empty() {
        findings.push(Finding::warning(format!(
            "Nested functions detected in: {}. Consider refactoring for better readability.",
            describe_lines(&structure.nested_functions)
        )));
    }

    if structure.catch_clauses == 0 && uses_async {
        findings.push(Finding::warning(
            "Asynchronous code detected without error handling. Consider adding try-catch blocks.",
        ));
    }

    scan_text_patterns(source, &mut findings);

    Ok(findings)
}

fn extract_structure(
    language: &Language,
    root: Node,
    source: &str,
) -> anyhow::Result<Structure> {
    let query = Query::new(language, STRUCTURE_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source.as_bytes());

    let mut structure = Structure::default();

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let name = query.capture_names()[capture.index as usize];
            let node = capture.node;
            match name {
                "function" => {
                    structure.functions += 1;
                    if is_async(node) {
                        structure.async_functions += 1;
                    }
                    inspect_function_body(node, &mut structure);
                }
                "arrow" => {
                    structure.arrow_functions += 1;
                    if is_async(node) {
                        structure.async_functions += 1;
                    }
                }
                "class" => structure.classes += 1,
                "new" => {
                    let ctor = node
                        .child_by_field_name("constructor")
                        .and_then(|n| n.utf8_text(source.as_bytes()).ok());
                    if ctor == Some("Promise") {
                        structure.promise_constructions += 1;
                    }
                }
                "catch" => structure.catch_clauses += 1,
                _ => {}
            }
        }
    }

    Ok(structure)
}

/// Record long-function and nested-function signals for one function node.
fn inspect_function_body(func: Node, structure: &mut Structure) {
    let body = match func.child_by_field_name("body") {
        Some(b) if b.kind() == "statement_block" => b,
        _ => return,
    };

    let start_line = func.start_position().row + 1;
    let body_lines = body.end_position().row - body.start_position().row + 1;
    if body_lines > LONG_FUNCTION_LINES {
        structure.long_functions.push(start_line);
    }

    let mut walker = body.walk();
    let has_nested = body
        .named_children(&mut walker)
        .any(|n| n.kind() == "function_declaration");
    if has_nested {
        structure.nested_functions.push(start_line);
    }
}

/// Whether a function-like node carries the `async` keyword.
fn is_async(node: Node) -> bool {
    let mut walker = node.walk();
    let found = node.children(&mut walker).any(|c| c.kind() == "async");
    found
}

fn scan_text_patterns(source: &str, findings: &mut Vec<Finding>) {
    let console_count = count_matches(&CONSOLE_CALLS, source);
    if console_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} console statements that should be removed in production",
            console_count
        )));
    }

    let debugger_count = count_matches(&DEBUGGER_STATEMENTS, source);
    if debugger_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} debugger statements that should be removed",
            debugger_count
        )));
    }

    if count_standalone_integers(source) > MAGIC_NUMBER_LIMIT {
        findings.push(Finding::warning(
            "Multiple magic numbers detected. Consider using named constants.",
        ));
    }

    let url_count = count_matches(&HARDCODED_URLS, source);
    if url_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} hardcoded URLs. Consider moving them to configuration.",
            url_count
        )));
    }

    let todo_count = count_matches(&TODO_COMMENTS, source);
    if todo_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} TODO comments that need attention",
            todo_count
        )));
    }
}

/// Build the single error finding for a failed parse, pointing at the first
/// ERROR or MISSING node.
fn syntax_error_finding(root: Node) -> Finding {
    match first_error_node(root) {
        Some(node) => {
            let pos = node.start_position();
            Finding::error(format!(
                "Syntax error: unexpected token at line {}, column {}",
                pos.row + 1,
                pos.column + 1
            ))
            .at(pos.row + 1, pos.column + 1)
        }
        None => Finding::error("Syntax error: invalid JavaScript source"),
    }
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut walker = node.walk();
    let children: Vec<Node> = node.children(&mut walker).collect();
    children.into_iter().find_map(first_error_node)
}

fn describe_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|l| format!("Function at line {}", l))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::super::Severity;
    use super::*;

    #[test]
    fn test_simple_function_counts() {
        let findings = analyze("function f(a){return a;}").unwrap();
        assert_eq!(
            findings[0].message,
            "Found 1 regular functions and 0 arrow functions"
        );
        assert!(!findings
            .iter()
            .any(|f| f.message.contains("Long functions")));
    }

    #[test]
    fn test_syntax_error_is_single_error_finding() {
        let findings = analyze("function ( {").unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.starts_with("Syntax error"));
    }

    #[test]
    fn test_long_function_reports_start_line() {
        let mut source = String::from("function big() {\n");
        for i in 0..21 {
            source.push_str(&format!("  let v{} = {};\n", i, i));
        }
        source.push_str("}\n");

        let findings = analyze(&source).unwrap();
        let long = findings
            .iter()
            .find(|f| f.message.contains("Long functions"))
            .expect("long function warning");
        assert!(long.message.contains("Function at line 1"));
    }

    #[test]
    fn test_nested_function_warning() {
        let source = "function outer() {\n  function inner() { return 1; }\n  return inner();\n}";
        let findings = analyze(source).unwrap();
        assert!(findings
            .iter()
            .any(|f| f.message.contains("Nested functions detected in: Function at line 1")));
    }

    #[test]
    fn test_async_without_catch() {
        let source = "async function fetchIt() { return await get(); }";
        let findings = analyze(source).unwrap();
        assert!(findings
            .iter()
            .any(|f| f.message.contains("Asynchronous code: 1 async functions")));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("without error handling")));

        let with_catch =
            "async function fetchIt() { try { return await get(); } catch (e) { log(e); } }";
        let findings = analyze(with_catch).unwrap();
        assert!(!findings
            .iter()
            .any(|f| f.message.contains("without error handling")));
    }

    #[test]
    fn test_mixed_function_and_async_counts() {
        let source = r#"
function sync() { return 1; }
async function load() { return await get(); }
const quick = async () => load();
const p = new Promise((resolve) => resolve(true));
"#;
        let findings = analyze(source).unwrap();
        assert_eq!(
            findings[0].message,
            "Found 2 regular functions and 2 arrow functions"
        );
        assert!(findings
            .iter()
            .any(|f| f.message.contains("Asynchronous code: 2 async functions, 1 Promise constructions")));
    }

    #[test]
    fn test_promise_construction_counts() {
        let source = "const p = new Promise((resolve) => resolve(true));";
        let findings = analyze(source).unwrap();
        assert!(findings
            .iter()
            .any(|f| f.message.contains("1 Promise constructions")));
    }

    #[test]
    fn test_text_pattern_findings() {
        let source = r#"
// TODO: tidy this up
function f() {
  console.log("at " + "https://api.example.com/v1");
  debugger;
  return 1;
}
"#;
        let findings = analyze(source).unwrap();
        assert!(findings
            .iter()
            .any(|f| f.message.contains("1 console statements")));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("1 debugger statements")));
        assert!(findings.iter().any(|f| f.message.contains("1 hardcoded URLs")));
        assert!(findings.iter().any(|f| f.message.contains("1 TODO comments")));
    }

    #[test]
    fn test_magic_number_threshold() {
        let under = "let a = [1, 2, 3, 4, 5];";
        let findings = analyze(under).unwrap();
        assert!(!findings.iter().any(|f| f.message.contains("magic numbers")));

        let over = "let a = [1, 2, 3, 4, 5, 6];";
        let findings = analyze(over).unwrap();
        assert!(findings.iter().any(|f| f.message.contains("magic numbers")));
    }

    #[test]
    fn test_empty_source() {
        let findings = analyze("").unwrap();
        assert_eq!(
            findings[0].message,
            "Found 0 regular functions and 0 arrow functions"
        );
    }
}
