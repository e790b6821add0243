// Page controllers: each assembles one page's view model from the loader.
// They hold no HTTP concerns; the server serializes them as JSON for the
// static shells to render.

pub mod company_detail;
pub mod naics_rankings;
pub mod ranked_companies;

pub use company_detail::CompanyDetailPage;
pub use naics_rankings::NaicsRankingsPage;
pub use ranked_companies::RankedCompaniesPage;
