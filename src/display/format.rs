//! Small formatting helpers shared by the display modules

use crate::models::BudgetStatus;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Usage bar, capped at full width once the value reaches the maximum
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Status with a marker for terminals
pub fn format_status(status: BudgetStatus) -> String {
    let marker = match status {
        BudgetStatus::Good => "✓",
        BudgetStatus::Warning => "!",
        BudgetStatus::Over => "✗",
    };
    format!("{} {}", marker, status)
}

/// Truncate to at most `max_len` characters, marking the cut with `...`
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
