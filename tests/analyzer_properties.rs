//! Behavioral properties of the public `analyze` entry point.
//!
//! These pin the externally observable contract: the degenerate
//! unsupported-language case, failure containment for invalid input,
//! threshold behavior, and idempotence across all supported languages.

use vizcheck::{analyze, Severity};

#[test]
fn unsupported_tags_yield_exactly_one_error() {
    for tag in ["ruby", "cobol", "", "JAVASCRIPT ", "c++"] {
        let findings = analyze("whatever", tag);
        assert_eq!(findings.len(), 1, "tag {:?}", tag);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].message, "Unsupported language");
        assert_eq!(findings[0].line, None);
        assert_eq!(findings[0].column, None);
    }
}

#[test]
fn invalid_javascript_reports_error_without_panicking() {
    let findings = analyze("function ( {", "javascript");
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Error));
}

#[test]
fn simple_javascript_function_counts() {
    let findings = analyze("function f(a){return a;}", "javascript");
    assert_eq!(
        findings[0].message,
        "Found 1 regular functions and 0 arrow functions"
    );
    assert!(!findings
        .iter()
        .any(|f| f.message.contains("Long functions")));
}

#[test]
fn long_javascript_function_names_its_start_line() {
    let mut source = String::from("const pad = 1;\nfunction big() {\n");
    for i in 0..22 {
        source.push_str(&format!("  use(v{});\n", i));
    }
    source.push_str("}\n");

    let findings = analyze(&source, "javascript");
    let warning = findings
        .iter()
        .find(|f| f.message.contains("Long functions detected"))
        .expect("long function warning");
    assert!(warning.message.contains("Function at line 2"));
}

#[test]
fn python_async_exception_handling_warning_toggles() {
    let without = "async def sync_remote():\n    return await push()\n";
    let findings = analyze(without, "python");
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Warning
            && f.message.contains("without exception handling")));

    let with = "async def sync_remote():\n    try:\n        return await push()\n    except:\n        return None\n";
    let findings = analyze(with, "python");
    assert!(!findings
        .iter()
        .any(|f| f.message.contains("without exception handling")));
}

#[test]
fn sql_select_star_versus_explicit_columns() {
    let findings = analyze("SELECT * FROM t", "sql");
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Warning && f.message.contains("SELECT *")));

    let findings = analyze("SELECT id, name FROM t", "sql");
    assert!(!findings.iter().any(|f| f.message.contains("SELECT *")));
    assert!(findings
        .iter()
        .any(|f| f.severity == Severity::Info
            && f.message.contains("explicit column selections")));
}

#[test]
fn analyze_is_idempotent_for_all_languages() {
    let samples = [
        ("javascript", "async function f() { await g(); }\nconst h = () => 1;\n"),
        ("python", "import os\n\nLIMIT = 3\n\ndef run():\n    print(os.name)\n"),
        ("java", "public class A {\n    public A() {}\n    void f() { System.out.println(1); }\n}\n"),
        ("sql", "SELECT DISTINCT id FROM t WHERE id IN (SELECT t_id FROM u)"),
    ];
    for (tag, source) in samples {
        let first = analyze(source, tag);
        let second = analyze(source, tag);
        assert_eq!(first, second, "language {}", tag);
        assert!(!first.is_empty(), "language {}", tag);
    }
}

#[test]
fn empty_input_returns_a_valid_sequence() {
    for tag in ["javascript", "python", "java", "sql"] {
        let findings = analyze("", tag);
        for f in &findings {
            assert!(!f.message.is_empty(), "language {}", tag);
        }
    }
}
