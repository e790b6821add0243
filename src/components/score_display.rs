// Display formatting for scores and optional fields. Absent values render
// as "N/A" rather than empty cells or zeros.

use serde::Serialize;

/// Score bucket driving row/marker coloring in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

pub fn score_band(score: f64) -> ScoreBand {
    if score >= 75.0 {
        ScoreBand::High
    } else if score >= 50.0 {
        ScoreBand::Medium
    } else {
        ScoreBand::Low
    }
}

/// One decimal place, "N/A" for absent
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{s:.1}"),
        None => "N/A".to_string(),
    }
}

/// Thousands-separated integer count, "N/A" for absent
pub fn format_count(count: Option<i64>) -> String {
    match count {
        Some(n) => group_thousands(n),
        None => "N/A".to_string(),
    }
}

/// Compact revenue: $950K / $12.5M / $1.2B
pub fn format_revenue(revenue: Option<f64>) -> String {
    let Some(value) = revenue else {
        return "N/A".to_string();
    };
    if value >= 1_000_000_000.0 {
        format!("${:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.0}K", value / 1_000.0)
    } else {
        format!("${value:.0}")
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
