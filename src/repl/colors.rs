//! ANSI color helpers for terminal output

/// ANSI escape codes
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

use ansi::*;

use crate::store::JobStatus;

/// Format a success message (green)
pub fn success(msg: &str) -> String {
    format!("{}{}{}", GREEN, msg, RESET)
}

/// Format an error message (red)
pub fn error(msg: &str) -> String {
    format!("{}{}{}", RED, msg, RESET)
}

/// Format a warning message (yellow)
pub fn warning(msg: &str) -> String {
    format!("{}{}{}", YELLOW, msg, RESET)
}

/// Format a status/info message (gray)
pub fn status(msg: &str) -> String {
    format!("{}{}{}", GRAY, msg, RESET)
}

/// Format a header (bold)
pub fn header(msg: &str) -> String {
    format!("{}{}{}", BOLD, msg, RESET)
}

/// Format an account address or id (cyan)
pub fn address(addr: &str) -> String {
    format!("{}{}{}", CYAN, addr, RESET)
}

/// Format a DOT amount (bold green)
pub fn balance(amount: &str) -> String {
    format!("{}{}{} DOT{}", BOLD, GREEN, amount, RESET)
}

/// Format a job status; open jobs stand out, finished ones fade
pub fn job_status(status: JobStatus) -> String {
    let color = match status {
        JobStatus::Open => GREEN,
        JobStatus::InProgress => YELLOW,
        JobStatus::Completed | JobStatus::Cancelled => GRAY,
    };
    format!("{}{}{}", color, status, RESET)
}

/// Format a horizontal separator
pub fn separator(width: usize) -> String {
    format!("{}{}{}", DIM, "─".repeat(width), RESET)
}

/// Format startup banner line
pub fn banner_line(label: &str, value: &str) -> String {
    format!("{}{:<12}{} {}", DIM, label, RESET, value)
}

/// Format startup banner with accent
pub fn banner_accent(text: &str) -> String {
    format!("{}{}{}{}", BOLD, MAGENTA, text, RESET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_and_resets() {
        let s = error("boom");
        assert!(s.starts_with(RED));
        assert!(s.ends_with(RESET));
        assert!(s.contains("boom"));
    }

    #[test]
    fn test_balance_names_currency() {
        assert_eq!(balance("12.5"), format!("{}{}12.5 DOT{}", BOLD, GREEN, RESET));
    }

    #[test]
    fn test_job_status_colors() {
        assert!(job_status(JobStatus::Open).starts_with(GREEN));
        assert!(job_status(JobStatus::InProgress).contains("in-progress"));
        assert!(job_status(JobStatus::Cancelled).starts_with(GRAY));
    }

    #[test]
    fn test_banner_line_pads_label() {
        assert_eq!(banner_line("wallet", "x"), format!("{}wallet      {} x", DIM, RESET));
    }
}
