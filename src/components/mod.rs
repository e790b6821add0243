// Shared UI building blocks used by more than one page: filter parsing,
// value formatting, map marker assembly, and degraded-state messages.

pub mod empty_states;
pub mod filters;
pub mod heat_map;
pub mod score_display;

pub use empty_states::{absent_section_message, NO_RESULTS_MESSAGE};
pub use filters::Filters;
pub use heat_map::{build_markers, MapMarker, MarkerKind};
pub use score_display::{format_count, format_revenue, format_score, score_band, ScoreBand};
