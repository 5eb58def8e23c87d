//! Java heuristic variant.
//!
//! A tree-sitter parse validates the input (syntax errors surface as a single
//! error finding), but every actual finding comes from regex counts over the
//! raw text, with the usual heuristic imprecision on unusually formatted code.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::{Language, Node, Parser};

use super::text::count_matches;
use super::Finding;

static PUBLIC_CLASSES: Lazy<Regex> = Lazy::new(|| Regex::new(r"public\s+class\s+\w+").unwrap());
static INTERFACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"interface\s+\w+").unwrap());
static PRIVATE_FIELDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"private\s+[\w<>\[\],\s]+\s+\w+").unwrap());
static FINAL_FIELDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"final\s+[\w<>\[\],\s]+\s+\w+").unwrap());
static METHODS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:public|private|protected)\s+[\w<>\[\],\s]+\s+\w+\s*\([^)]*\)").unwrap()
});
static STATIC_METHODS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"static\s+[\w<>\[\],\s]+\s+\w+\s*\(").unwrap());
static CONSTRUCTORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+\w+\s*\([^)]*\)\s*\{").unwrap());
static STREAMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.stream\(\)").unwrap());
static LAMBDAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"->").unwrap());
static GENERICS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static THROWS_DECLARATIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"throws\s+[\w,\s]+").unwrap());
static TRY_BLOCKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"try\s*\{").unwrap());
static SYNCHRONIZED_BLOCKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"synchronized\s*\([^)]*\)\s*\{").unwrap());
static SYSTEM_OUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"System\.out\.|System\.err\.").unwrap());
static ANNOTATIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());

pub(super) fn analyze(source: &str) -> anyhow::Result<Vec<Finding>> {
    let language: Language = tree_sitter_java::LANGUAGE.into();
    let mut parser = Parser::new();
    parser.set_language(&language)?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow::anyhow!("parser produced no tree"))?;

    if tree.root_node().has_error() {
        return Ok(vec![syntax_error_finding(tree.root_node())]);
    }

    let mut findings = Vec::new();

    let class_count = count_matches(&PUBLIC_CLASSES, source);
    findings.push(Finding::info(format!(
        "Found {} public classes",
        class_count
    )));

    let interface_count = count_matches(&INTERFACES, source);
    if interface_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} interfaces",
            interface_count
        )));
    }

    findings.push(Finding::info(format!(
        "Found {} private fields",
        count_matches(&PRIVATE_FIELDS, source)
    )));

    let final_count = count_matches(&FINAL_FIELDS, source);
    if final_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} final fields - good for immutability",
            final_count
        )));
    }

    findings.push(Finding::info(format!(
        "Found {} methods",
        count_matches(&METHODS, source)
    )));

    let static_count = count_matches(&STATIC_METHODS, source);
    if static_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} static methods",
            static_count
        )));
    }

    let stream_count = count_matches(&STREAMS, source);
    let lambda_count = count_matches(&LAMBDAS, source);
    if stream_count > 0 || lambda_count > 0 {
        findings.push(Finding::info(format!(
            "Modern Java features: {} stream operations, {} lambda expressions",
            stream_count, lambda_count
        )));
    }

    let generic_count = count_matches(&GENERICS, source);
    if generic_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} generic type usages",
            generic_count
        )));
    }

    findings.push(Finding::info(format!(
        "Exception handling: {} throws declarations, {} try-catch blocks",
        count_matches(&THROWS_DECLARATIONS, source),
        count_matches(&TRY_BLOCKS, source)
    )));

    let synchronized_count = count_matches(&SYNCHRONIZED_BLOCKS, source);
    if synchronized_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} synchronized blocks. Ensure proper concurrency handling.",
            synchronized_count
        )));
    }

    let system_out_count = count_matches(&SYSTEM_OUT, source);
    if system_out_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} System.out/err statements. Consider using a logging framework.",
            system_out_count
        )));
    }

    let annotation_count = count_matches(&ANNOTATIONS, source);
    if annotation_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} annotations",
            annotation_count
        )));
    }

    if class_count > 0 && count_matches(&CONSTRUCTORS, source) == 0 {
        findings.push(Finding::warning(
            "No explicit constructors found. Consider adding them for better object initialization.",
        ));
    }

    Ok(findings)
}

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
        None => Finding::error("Syntax error: invalid Java source"),
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

#[cfg(test)]
mod tests {
    use super::super::Severity;
    use super::*;

    const SAMPLE: &str = r#"
import java.util.List;

public class Inventory {
    private final List<String> items;

    public Inventory(List<String> items) {
        this.items = items;
    }

    public long countShort() {
        return items.stream().filter(i -> i.length() < 4).count();
    }

    public void dump() {
        System.out.println(items);
    }
}
"#;

    #[test]
    fn test_structural_counts() {
        let findings = analyze(SAMPLE).unwrap();
        assert!(findings.iter().any(|f| f.message == "Found 1 public classes"));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("stream operations")));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("generic type usages")));
        assert!(findings
            .iter()
            .any(|f| f.message.contains("System.out/err statements")));
        // Sample has an explicit constructor.
        assert!(!findings
            .iter()
            .any(|f| f.message.contains("No explicit constructors")));
    }

    #[test]
    fn test_missing_constructor_warning() {
        let source = "public class Empty {\n    private int n;\n}\n";
        let findings = analyze(source).unwrap();
        assert!(findings
            .iter()
            .any(|f| f.message.contains("No explicit constructors")));
    }

    #[test]
    fn test_synchronized_warning() {
        let source = "public class Lock {\n    public Lock() {}\n    void run() {\n        synchronized (this) {\n            count++;\n        }\n    }\n}\n";
        let findings = analyze(source).unwrap();
        assert!(findings
            .iter()
            .any(|f| f.message.contains("1 synchronized blocks")));
    }

    #[test]
    fn test_syntax_error_is_single_error_finding() {
        let findings = analyze("public class {").unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.starts_with("Syntax error"));
    }

    #[test]
    fn test_empty_source() {
        let findings = analyze("").unwrap();
        assert!(findings.iter().any(|f| f.message == "Found 0 public classes"));
    }
}
