// Standard copy for degraded and empty UI sections, so every page phrases
// the same situation the same way.

pub const NO_RESULTS_MESSAGE: &str = "No companies match the current filters.";

/// Placeholder for a section whose optional source file is absent.
pub fn absent_section_message(file: &str) -> String {
    format!("{file} has not been generated yet; this section is unavailable.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_message_names_the_file() {
        let msg = absent_section_message("naics_icp_fit_scores.csv");
        assert!(msg.contains("naics_icp_fit_scores.csv"));
        assert!(msg.contains("unavailable"));
    }
}
