pub mod banner_helpers;
pub mod content_helpers;
pub mod form_helpers;
pub mod homepage_helpers;
pub mod news_helpers;
pub mod overview_helpers;
pub mod sanitization_helpers;
pub mod search_helpers;
pub mod statistics_helpers;
pub mod user_helpers;
