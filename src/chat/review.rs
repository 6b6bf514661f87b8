//! Heuristic code review
//!
//! A fixed catalogue of substring checks over pasted source text. Nothing is
//! parsed: the checks are cheap, loose and happy to report false positives.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[allow(clippy::expect_used)]
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("valid regex"));

#[allow(clippy::expect_used)]
static LOOP_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(for|while)\b|\.forEach\(").expect("valid regex"));

const SENSITIVE_NAMES: &[&str] = &["password", "secret", "mnemonic", "privatekey", "private_key"];

// ============================================================================
// Findings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueTag {
    Critical,
    Security,
    Style,
    Quality,
    Cleanup,
    Error,
    Performance,
}

impl IssueTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueTag::Critical => "CRITICAL",
            IssueTag::Security => "SECURITY",
            IssueTag::Style => "STYLE",
            IssueTag::Quality => "QUALITY",
            IssueTag::Cleanup => "CLEANUP",
            IssueTag::Error => "ERROR",
            IssueTag::Performance => "PERFORMANCE",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            IssueTag::Critical => "🚨",
            IssueTag::Security => "🛡️",
            IssueTag::Style => "⚠️",
            IssueTag::Quality => "🔍",
            IssueTag::Cleanup => "🐛",
            IssueTag::Error | IssueTag::Performance => "⚡",
        }
    }

    /// Tags that make the review need the user's attention
    pub fn is_security(&self) -> bool {
        matches!(self, IssueTag::Critical | IssueTag::Security)
    }

    pub fn is_quality(&self) -> bool {
        matches!(self, IssueTag::Style | IssueTag::Quality)
    }
}

impl std::fmt::Display for IssueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub tag: IssueTag,
    pub message: &'static str,
}

impl Finding {
    fn new(tag: IssueTag, message: &'static str) -> Self {
        Self { tag, message }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} **{}**: {}", self.tag.icon(), self.tag, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Review {
    /// Catalogue order, not severity order
    pub issues: Vec<Finding>,
    pub suggestions: Vec<&'static str>,
}

impl Review {
    /// No CRITICAL or SECURITY findings
    pub fn security_ok(&self) -> bool {
        !self.issues.iter().any(|i| i.tag.is_security())
    }

    /// At most one STYLE or QUALITY finding
    pub fn quality_ok(&self) -> bool {
        self.issues.iter().filter(|i| i.tag.is_quality()).count() <= 1
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.suggestions.is_empty()
    }

    pub fn count(&self, tag: IssueTag) -> usize {
        self.issues.iter().filter(|i| i.tag == tag).count()
    }
}

// ============================================================================
// Catalogue
// ============================================================================

fn has_sensitive_logging(code: &str) -> bool {
    let lowered = code.to_lowercase();
    let sensitive = SENSITIVE_NAMES.iter().any(|name| lowered.contains(name));
    sensitive && (code.contains("console.log") || code.contains("alert"))
}

/// A DOM query somewhere after the first loop keyword
fn has_dom_query_in_loop(code: &str) -> bool {
    LOOP_KEYWORD
        .find(code)
        .is_some_and(|m| code[m.end()..].contains("document.querySelector"))
}

/// Run every rule over `code`. Rules are independent; several may fire.
pub fn detect_issues(code: &str) -> Review {
    let mut review = Review::default();
    let mut flag = |hit: bool, tag: IssueTag, message: &'static str| {
        if hit {
            review.issues.push(Finding::new(tag, message));
        }
    };

    flag(
        code.contains("eval(") || code.contains("Function("),
        IssueTag::Critical,
        "Using eval() or Function() - major security risk!",
    );
    flag(
        code.contains(".innerHTML") && !code.contains("sanitize") && !code.contains("DOMPurify"),
        IssueTag::Security,
        "innerHTML without sanitization - XSS vulnerability",
    );
    flag(
        has_sensitive_logging(code),
        IssueTag::Security,
        "Logging sensitive data - remove before production",
    );
    let uses_var = code.contains("var ");
    flag(uses_var, IssueTag::Style, "Using 'var' - prefer 'let' or 'const'");
    flag(
        code.contains("==") && !code.contains("==="),
        IssueTag::Quality,
        "Loose equality (==) - use strict equality (===)",
    );
    flag(
        code.contains("console.log") && !code.contains("// debug") && !code.contains("// TODO"),
        IssueTag::Cleanup,
        "console.log statements found - remove for production",
    );
    flag(
        code.contains("await") && !code.contains("async"),
        IssueTag::Error,
        "Using 'await' without 'async' function",
    );
    flag(
        code.contains("Promise") && code.contains(".then") && code.contains("await"),
        IssueTag::Style,
        "Mixing async/await with .then() - choose one pattern",
    );
    flag(
        has_dom_query_in_loop(code),
        IssueTag::Performance,
        "DOM queries in loops - cache selectors outside",
    );

    if uses_var {
        review
            .suggestions
            .push("Replace 'var' with 'let' for mutable variables or 'const' for constants");
    }
    if code.contains("@polkadot") || code.contains("substrate") {
        if !code.contains("try") && !code.contains("catch") {
            review.suggestions.push("Add proper error handling for Polkadot API calls");
        }
        if code.contains("api.tx") && !code.contains("signAndSend") {
            review
                .suggestions
                .push("Remember to sign and send transactions with signAndSend()");
        }
    }

    review
}

/// Contents of the first fenced block, fences stripped
pub fn extract_code_block(input: &str) -> Option<&str> {
    CODE_BLOCK
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn has_code_fence(input: &str) -> bool {
    input.contains("```")
}

/// Multi-section report for a review with at least one finding or suggestion
pub fn compose_report(review: &Review) -> String {
    let mut report = String::from("🔍 **Advanced Code Analysis Complete**\n\n");

    if !review.issues.is_empty() {
        report.push_str(&format!("**🚨 Issues Found ({}):**\n", review.issues.len()));
        for (i, issue) in review.issues.iter().enumerate() {
            report.push_str(&format!("{}. {}\n", i + 1, issue));
        }
        report.push('\n');
    }

    if !review.suggestions.is_empty() {
        report.push_str("**💡 Recommendations:**\n");
        for suggestion in &review.suggestions {
            report.push_str(&format!("• {}\n", suggestion));
        }
        report.push('\n');
    }

    let security = if review.security_ok() { "✅ Good" } else { "⚠️ Needs Attention" };
    let quality = if review.quality_ok() { "✅ Good" } else { "⚠️ Could Improve" };
    report.push_str(&format!("**🛡️ Security Score:** {}\n", security));
    report.push_str(&format!("**📊 Code Quality:** {}\n\n", quality));
    report.push_str(
        "**🚀 Next Steps:**\n• Fix critical security issues first\n• Apply suggested improvements\n• Test thoroughly before deployment\n• Consider adding unit tests",
    );
    report
}
