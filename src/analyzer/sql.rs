//! SQL heuristic variant.
//!
//! Case-insensitive regex counts over the raw text. Performance smells
//! (SELECT *, DISTINCT, subqueries, temporary tables) become count-bearing
//! warnings, one per category; everything else is an informational count.

use once_cell::sync::Lazy;
use regex::Regex;

use super::text::count_matches;
use super::Finding;

static SELECT_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)SELECT\s+\*").unwrap());
// Starts with a word character, so `SELECT *` never matches. The upstream
// pattern expressed the same exclusion with a negative lookahead; the loose
// word/comma body also lets keyword prefixes like DISTINCT through.
static SELECT_COLUMNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SELECT\s+\w[\w\s,]*\s+FROM").unwrap());
static JOINS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:INNER|LEFT|RIGHT|FULL|CROSS)?\s*JOIN\s+").unwrap());
static WHERE_CLAUSES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)WHERE\s+").unwrap());
static GROUP_BY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)GROUP\s+BY\s+").unwrap());
static HAVING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)HAVING\s+").unwrap());
static DISTINCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)DISTINCT\s+").unwrap());
static SUBQUERIES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\(\s*SELECT\s+").unwrap());
static CTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)WITH\s+\w+\s+AS\s*\(").unwrap());
static VIEWS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CREATE\s+(?:OR\s+REPLACE\s+)?VIEW").unwrap());
static STORED_PROCS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CREATE\s+PROCEDURE|CREATE\s+FUNCTION").unwrap());
static TRIGGERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)CREATE\s+TRIGGER").unwrap());
static INDEXES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)CREATE\s+(?:UNIQUE\s+)?INDEX").unwrap());
static CONSTRAINTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)CONSTRAINT\s+\w+\s+").unwrap());
static TEMP_TABLES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)#|TEMPORARY\s+TABLE").unwrap());
static TRANSACTIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)BEGIN|COMMIT|ROLLBACK").unwrap());

pub(super) fn analyze(source: &str) -> anyhow::Result<Vec<Finding>> {
    scan(source).map_err(|e| anyhow::anyhow!("SQL analysis error: {}", e))
}

fn scan(source: &str) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();

    let select_star_count = count_matches(&SELECT_STAR, source);
    if select_star_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} instances of SELECT *. Consider specifying columns explicitly for better performance.",
            select_star_count
        )));
    }

    let select_columns_count = count_matches(&SELECT_COLUMNS, source);
    if select_columns_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} SELECT statements with explicit column selections",
            select_columns_count
        )));
    }

    let join_count = count_matches(&JOINS, source);
    if join_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} JOIN operations. Ensure proper indexing for joined columns.",
            join_count
        )));
    }

    findings.push(Finding::info(format!(
        "Query components: {} WHERE clauses, {} GROUP BY, {} HAVING clauses",
        count_matches(&WHERE_CLAUSES, source),
        count_matches(&GROUP_BY, source),
        count_matches(&HAVING, source)
    )));

    let distinct_count = count_matches(&DISTINCT, source);
    if distinct_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} DISTINCT operations. Verify if they are necessary as they can impact performance.",
            distinct_count
        )));
    }

    let subquery_count = count_matches(&SUBQUERIES, source);
    if subquery_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} subqueries. Consider using JOINs where possible for better performance.",
            subquery_count
        )));
    }

    let cte_count = count_matches(&CTES, source);
    if cte_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} Common Table Expressions (CTEs) - good for query readability",
            cte_count
        )));
    }

    let view_count = count_matches(&VIEWS, source);
    if view_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} view definitions",
            view_count
        )));
    }

    let proc_count = count_matches(&STORED_PROCS, source);
    if proc_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} stored procedure/function definitions",
            proc_count
        )));
    }

    let trigger_count = count_matches(&TRIGGERS, source);
    if trigger_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} trigger definitions",
            trigger_count
        )));
    }

    let index_count = count_matches(&INDEXES, source);
    if index_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} index definitions",
            index_count
        )));
    }

    let constraint_count = count_matches(&CONSTRAINTS, source);
    if constraint_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} constraint definitions",
            constraint_count
        )));
    }

    let temp_table_count = count_matches(&TEMP_TABLES, source);
    if temp_table_count > 0 {
        findings.push(Finding::warning(format!(
            "Found {} temporary tables. Consider using CTEs for better performance and maintainability.",
            temp_table_count
        )));
    }

    let transaction_count = count_matches(&TRANSACTIONS, source);
    if transaction_count > 0 {
        findings.push(Finding::info(format!(
            "Found {} transaction statements. Ensure proper transaction management.",
            transaction_count
        )));
    }

    Ok(findings)
}
