//! Python heuristic variant.
//!
//! Purely regex-based, no parser. Counts structural elements (imports,
//! classes, functions, decorators, ...) and flags quality signals: bare
//! prints, module-level constants, async code without exception handling,
//! comprehension overuse, and legacy string formatting. Multi-line constructs
//! and pattern-like text inside strings can skew the counts; that imprecision
//! is part of the contract.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::count_matches;
use super::thresholds::LIST_COMPREHENSION_LIMIT;
use super::Finding;

static IMPORTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^import\s+[\w ,.]+$|^from\s+[\w.]+\s+import\s+[\w ,*]+$").unwrap()
});
static CLASSES: Lazy<Regex> = Lazy::new(|| Regex::new(r"class\s+\w+(\s*\([^)]*\))?:").unwrap());
static FUNCTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"def\s+\w+\s*\([^)]*\):").unwrap());
static ASYNC_FUNCTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"async\s+def\s+\w+").unwrap());
static DECORATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());
static GLOBAL_CONSTANTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[A-Z][A-Z_]*\s*=").unwrap());
static PRINTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"print\s*\(").unwrap());
static EXCEPT_CLAUSES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"except\s*(?:\w+(?:\s+as\s+\w+)?)?:").unwrap());
static LIST_COMPREHENSIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*[\w\s.()]+\s+for\s+[\w\s]+\s+in\s+[\w\s.()]+\]").unwrap()
});
static LAMBDAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"lambda\s+[^:]+:").unwrap());
static MAGIC_METHODS: Lazy<Regex> = Lazy::new(|| Regex::new(r"def\s+__\w+__\s*\(").unwrap());
static TYPE_HINTS: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*[A-Z]\w*(?:\[.*?\])?").unwrap());
static F_STRINGS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"f['"]"#).unwrap());

pub(super) fn analyze(source: &str) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    findings.push(Finding::info(format!(
        "Found {} imports",
        count_matches(&IMPORTS, source)
    )));
    findings.push(Finding::info(format!(
        "Found {} classes",
        count_matches(&CLASSES, source)
    )));
    findings.push(Finding::info(format!(
        "Found {} functions",
        count_matches(&FUNCTIONS, source)
    )));

    let async_count = count_matches(&ASYNC_FUNCTIONS, source);
    if async_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} async functions",
            async_count
        )));
    }

    let type_hint_count = count_matches(&TYPE_HINTS, source);
    if type_hint_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} type hints - good practice for code clarity",
            type_hint_count
        )));
    }

    let constant_count = count_matches(&GLOBAL_CONSTANTS, source);
    if constant_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} global constants. Consider using a configuration file or class constants.",
            constant_count
        )));
    }

    let print_count = count_matches(&PRINTS, source);
    if print_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} print statements. Consider using a proper logging framework.",
            print_count
        )));
    }

    if async_count > 0 && count_matches(&EXCEPT_CLAUSES, source) == 0 {
        findings.push(Finding::warning(
            "Async functions found without exception handling. Consider adding try-except blocks.",
        ));
    }

    if count_matches(&LIST_COMPREHENSIONS, source) > LIST_COMPREHENSION_LIMIT {
        findings.push(Finding::warning(
            "Multiple list comprehensions found. Ensure they remain readable.",
        ));
    }

    let lambda_count = count_matches(&LAMBDAS, source);
    if lambda_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} lambda functions",
            lambda_count
        )));
    }

    let magic_method_count = count_matches(&MAGIC_METHODS, source);
    if magic_method_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} magic methods",
            magic_method_count
        )));
    }

    if count_matches(&F_STRINGS, source) == 0
        && source.contains('%')
        && source.contains(".format")
    {
        findings.push(Finding::warning(
            "Using old string formatting. Consider using f-strings for better readability.",
        ));
    }

    let decorator_count = count_matches(&DECORATORS, source);
    if decorator_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} decorators",
            decorator_count
        )));
    }

    Ok(findings)
}
