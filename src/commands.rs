//! Dashboard operations reachable from the command line.
//!
//! Every command runs against an [`AppState`] owned by the caller and yields
//! a JSON value for display. When an acting user is given, the command's
//! dashboard section is permission-checked first.

use crate::config::Config;
use crate::guards::{self, GuardError, Section};
use crate::helper::{
    banner_helpers, content_helpers, form_helpers, homepage_helpers, news_helpers, overview_helpers,
    search_helpers, statistics_helpers, user_helpers,
};
use crate::models::store_operations::filter_operations::{matches_search, paginate};
use crate::models::store_operations::status_operations::{admit_new, replace_record, toggle_status, transition_status};
use crate::models::store_operations::{Entity, EntityStore, FilterComposer, HasStatus, Selection, StoreError};
use crate::models::{
    ActivityStatus, Attachment, ContentStatus, EntityId, NewsStatus, PopupStatus, Trend,
    UnknownVariant,
};
use crate::AppState;
use chrono::NaiveDateTime;
use clap::{Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Guard(#[from] GuardError),
    #[error(transparent)]
    Variant(#[from] UnknownVariant),
    #[error("Invalid JSON record: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("'{command}' is not available for {collection}")]
    Unsupported { command: &'static str, collection: Collection },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Banners,
    Content,
    News,
    Popups,
    Sections,
    Users,
    SearchQueries,
    PageVisits,
    FileDownloads,
}

impl Collection {
    pub fn section(self) -> Section {
        match self {
            Collection::Banners => Section::Banners,
            Collection::Content => Section::Content,
            Collection::News => Section::News,
            Collection::Popups => Section::Popups,
            Collection::Sections => Section::Homepage,
            Collection::Users => Section::Users,
            Collection::SearchQueries => Section::Search,
            Collection::PageVisits | Collection::FileDownloads => Section::Statistics,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Headline numbers for the dashboard landing page.
    Overview,
    /// Filtered, paginated records of one collection.
    List {
        collection: Collection,
        /// URL-encoded filters, e.g. "q=news&status=active".
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Aggregates over a whole collection.
    Stats { collection: Collection },
    /// Adds a record given as JSON; the id is assigned by the store.
    Insert { collection: Collection, record: String },
    /// Replaces the record with ID by the JSON record; its status may only
    /// move along the allowed transitions.
    Update {
        collection: Collection,
        id: EntityId,
        record: String,
    },
    /// Flips the status of a record (visibility for homepage sections).
    Toggle { collection: Collection, id: EntityId },
    /// Moves a record to an explicit status.
    Transition {
        collection: Collection,
        id: EntityId,
        status: String,
    },
    Delete { collection: Collection, id: EntityId },
    /// Attaches a file, given as JSON, to a content item.
    AddAttachment { content_id: EntityId, attachment: String },
    RemoveAttachment { content_id: EntityId, attachment_id: EntityId },
    ToggleRss { id: EntityId },
    ToggleSection { id: EntityId },
    /// Popups a visitor of PAGE would see right now.
    ActivePopups { page: String },
    /// Visible homepage sections and banners in display order.
    Homepage,
    Rss,
    Traffic {
        /// Only pages whose url contains this fragment.
        #[arg(long)]
        page: Option<String>,
    },
    PopularSearches {
        #[arg(long)]
        trend: Option<Trend>,
    },
    /// A search query with stop words removed.
    CleanQuery { query: String },
}

impl Command {
    /// The dashboard section whose permission the command needs, if any.
    pub fn section(&self) -> Option<Section> {
        match self {
            Command::Overview => None,
            Command::List { collection, .. }
            | Command::Stats { collection }
            | Command::Insert { collection, .. }
            | Command::Update { collection, .. }
            | Command::Toggle { collection, .. }
            | Command::Transition { collection, .. }
            | Command::Delete { collection, .. } => Some(collection.section()),
            Command::AddAttachment { .. } | Command::RemoveAttachment { .. } => Some(Section::Content),
            Command::ToggleRss { .. } | Command::Rss => Some(Section::News),
            Command::ToggleSection { .. } | Command::Homepage => Some(Section::Homepage),
            Command::ActivePopups { .. } => Some(Section::Popups),
            Command::Traffic { .. } => Some(Section::Statistics),
            Command::PopularSearches { .. } | Command::CleanQuery { .. } => Some(Section::Search),
        }
    }
}

pub fn authorize(state: &AppState, acting_user: Option<&str>, command: &Command) -> Result<(), GuardError> {
    let Some(email) = acting_user else {
        return Ok(());
    };
    match command.section() {
        Some(section) => guards::require_permission(state.users.list(), email, section).map(|_| ()),
        None => guards::require_active(state.users.list(), email).map(|_| ()),
    }
}

pub fn run(
    state: &mut AppState,
    config: &Config,
    acting_user: Option<&str>,
    command: &Command,
    now: NaiveDateTime,
) -> Result<Value, CommandError> {
    // Permissions are checked before any collection is touched.
    authorize(state, acting_user, command)?;

    match command {
        Command::Overview => to_json(&overview_helpers::dashboard_overview(state)),
        Command::List { collection, query, page } => list(state, *collection, query, *page, config.page_size as usize),
        Command::Stats { collection } => stats(state, *collection),
        Command::Insert { collection, record } => insert(state, *collection, record, now),
        Command::Update { collection, id, record } => update(state, *collection, *id, record, now),
        Command::Toggle { collection, id } => toggle(state, *collection, *id, now),
        Command::Transition { collection, id, status } => transition(state, *collection, *id, status, now),
        Command::Delete { collection, id } => delete(state, *collection, *id),
        Command::AddAttachment { content_id, attachment } => {
            let attachment: Attachment = from_json_record(attachment)?;
            let item = content_helpers::add_attachment(
                &mut state.content,
                *content_id,
                attachment,
                &config.allowed_file_types,
            )?;
            to_json(item)
        }
        Command::RemoveAttachment { content_id, attachment_id } => {
            to_json(&content_helpers::remove_attachment(&mut state.content, *content_id, *attachment_id)?)
        }
        Command::ToggleRss { id } => to_json(news_helpers::toggle_rss_included(&mut state.news, *id)?),
        Command::ToggleSection { id } => {
            to_json(homepage_helpers::toggle_section_visibility(&mut state.sections, *id)?)
        }
        Command::ActivePopups { page } => to_json(&homepage_helpers::popups_for_page(state.popups.list(), page, now)),
        Command::Homepage => Ok(json!({
            "banners": banner_helpers::banners_in_display_order(state.banners.list())
                .into_iter()
                .filter(|b| b.status == ActivityStatus::Active)
                .collect::<Vec<_>>(),
            "sections": homepage_helpers::visible_sections(state.sections.list()),
        })),
        Command::Rss => to_json(&news_helpers::rss_feed(state.news.list())),
        Command::Traffic { page } => {
            let fragment = page.clone().map_or(Selection::All, Selection::Only);
            let pages = state.page_visits.list();
            let shown = statistics_helpers::filter_pages(pages, &fragment);
            Ok(json!({
                "totals": statistics_helpers::traffic_totals(pages, state.file_downloads.list(), &state.visitor_stats),
                "pages": statistics_helpers::page_shares(pages, &shown),
            }))
        }
        Command::PopularSearches { trend } => {
            let trend = trend.map_or(Selection::All, Selection::Only);
            to_json(&search_helpers::popular_searches(&state.popular_searches, &trend))
        }
        Command::CleanQuery { query } => {
            Ok(json!({ "query": search_helpers::strip_stop_words(query, &state.search_settings) }))
        }
    }
}

fn list(
    state: &AppState,
    collection: Collection,
    query: &str,
    page: usize,
    page_size: usize,
) -> Result<Value, CommandError> {
    let params = form_helpers::parse_query(query);
    match collection {
        Collection::Banners => {
            let filter = banner_helpers::BannerFilter::from_params(&params)?;
            to_json(&paginate(&banner_helpers::filter_banners(state.banners.list(), &filter), page, page_size))
        }
        Collection::Content => {
            let filter = content_helpers::ContentFilter::from_params(&params)?;
            to_json(&paginate(&content_helpers::filter_content(state.content.list(), &filter), page, page_size))
        }
        Collection::News => {
            let filter = news_helpers::NewsFilter::from_params(&params)?;
            to_json(&paginate(&news_helpers::filter_news(state.news.list(), &filter), page, page_size))
        }
        Collection::Popups => {
            let filter = homepage_helpers::PopupFilter::from_params(&params)?;
            to_json(&paginate(&homepage_helpers::filter_popups(state.popups.list(), &filter), page, page_size))
        }
        Collection::Sections => {
            form_helpers::ensure_known_keys(&params, &[])?;
            let term = form_helpers::search_term(&params);
            to_json(&paginate(&homepage_helpers::filter_sections(state.sections.list(), &term), page, page_size))
        }
        Collection::Users => {
            let filter = user_helpers::UserFilter::from_params(&params)?;
            to_json(&paginate(&user_helpers::filter_users(state.users.list(), &filter), page, page_size))
        }
        Collection::SearchQueries => {
            let filter = search_helpers::SearchLogFilter::from_params(&params)?;
            let hits = search_helpers::filter_search_log(state.search_queries.list(), &filter);
            to_json(&paginate(&hits, page, page_size))
        }
        Collection::PageVisits => {
            form_helpers::ensure_known_keys(&params, &["url"])?;
            let term = form_helpers::search_term(&params);
            let fragment: Selection<String> = form_helpers::selection(&params, "url")?;
            let hits: Vec<_> = statistics_helpers::filter_pages(state.page_visits.list(), &fragment)
                .into_iter()
                .filter(|p| matches_search(*p, &term))
                .collect();
            to_json(&paginate(&hits, page, page_size))
        }
        Collection::FileDownloads => {
            form_helpers::ensure_known_keys(&params, &[])?;
            let term = form_helpers::search_term(&params);
            let hits = FilterComposer::new().search(&term).apply(state.file_downloads.list());
            to_json(&paginate(&hits, page, page_size))
        }
    }
}

fn stats(state: &AppState, collection: Collection) -> Result<Value, CommandError> {
    match collection {
        Collection::Banners => to_json(&banner_helpers::banner_stats(state.banners.list())),
        Collection::Content => to_json(&content_helpers::content_stats(state.content.list())),
        Collection::News => to_json(&news_helpers::news_stats(state.news.list())),
        Collection::Popups => to_json(&homepage_helpers::popup_stats(state.popups.list())),
        Collection::Users => to_json(&user_helpers::user_stats(state.users.list())),
        Collection::SearchQueries => to_json(&search_helpers::search_stats(state.search_queries.list())),
        Collection::PageVisits | Collection::FileDownloads => to_json(&statistics_helpers::traffic_totals(
            state.page_visits.list(),
            state.file_downloads.list(),
            &state.visitor_stats,
        )),
        Collection::Sections => Ok(json!({
            "total": state.sections.len(),
            "visible": homepage_helpers::visible_sections(state.sections.list()).len(),
        })),
    }
}

fn insert(state: &mut AppState, collection: Collection, record: &str, now: NaiveDateTime) -> Result<Value, CommandError> {
    match collection {
        Collection::Banners => {
            let banner = banner_helpers::prepare_banner(from_json_record(record)?)?;
            insert_tracked(&mut state.banners, banner, now)
        }
        Collection::Content => {
            let item = content_helpers::prepare_content(from_json_record(record)?)?;
            insert_tracked(&mut state.content, item, now)
        }
        Collection::News => {
            let item = news_helpers::prepare_news(from_json_record(record)?)?;
            insert_tracked(&mut state.news, item, now)
        }
        Collection::Popups => {
            let popup = homepage_helpers::prepare_popup(from_json_record(record)?)?;
            insert_tracked(&mut state.popups, popup, now)
        }
        Collection::Users => {
            let user = user_helpers::prepare_user(from_json_record(record)?)?;
            insert_tracked(&mut state.users, user, now)
        }
        Collection::Sections => insert_into(&mut state.sections, from_json_record(record)?),
        Collection::SearchQueries => insert_into(&mut state.search_queries, from_json_record(record)?),
        Collection::PageVisits => insert_into(&mut state.page_visits, from_json_record(record)?),
        Collection::FileDownloads => insert_into(&mut state.file_downloads, from_json_record(record)?),
    }
}

fn update(
    state: &mut AppState,
    collection: Collection,
    id: EntityId,
    record: &str,
    now: NaiveDateTime,
) -> Result<Value, CommandError> {
    // Records with a status go through the lifecycle check; the rest are plain replacements.
    match collection {
        Collection::Banners => {
            let banner = banner_helpers::prepare_banner(from_json_record(record)?)?;
            to_json(replace_record(&mut state.banners, id, banner, now)?)
        }
        Collection::Content => {
            let item = content_helpers::prepare_content(from_json_record(record)?)?;
            to_json(replace_record(&mut state.content, id, item, now)?)
        }
        Collection::News => {
            let item = news_helpers::prepare_news(from_json_record(record)?)?;
            to_json(replace_record(&mut state.news, id, item, now)?)
        }
        Collection::Popups => {
            let popup = homepage_helpers::prepare_popup(from_json_record(record)?)?;
            to_json(replace_record(&mut state.popups, id, popup, now)?)
        }
        Collection::Users => {
            let user = user_helpers::prepare_user(from_json_record(record)?)?;
            to_json(replace_record(&mut state.users, id, user, now)?)
        }
        Collection::Sections => to_json(state.sections.replace(id, from_json_record(record)?)?),
        Collection::SearchQueries => to_json(state.search_queries.replace(id, from_json_record(record)?)?),
        Collection::PageVisits => to_json(state.page_visits.replace(id, from_json_record(record)?)?),
        Collection::FileDownloads => to_json(state.file_downloads.replace(id, from_json_record(record)?)?),
    }
}

fn toggle(state: &mut AppState, collection: Collection, id: EntityId, now: NaiveDateTime) -> Result<Value, CommandError> {
    match collection {
        Collection::Banners => to_json(toggle_status(&mut state.banners, id, now)?),
        Collection::Content => to_json(toggle_status(&mut state.content, id, now)?),
        Collection::News => to_json(toggle_status(&mut state.news, id, now)?),
        Collection::Popups => to_json(toggle_status(&mut state.popups, id, now)?),
        Collection::Users => to_json(toggle_status(&mut state.users, id, now)?),
        Collection::Sections => to_json(homepage_helpers::toggle_section_visibility(&mut state.sections, id)?),
        other => Err(CommandError::Unsupported { command: "toggle", collection: other }),
    }
}

fn transition(
    state: &mut AppState,
    collection: Collection,
    id: EntityId,
    status: &str,
    now: NaiveDateTime,
) -> Result<Value, CommandError> {
    match collection {
        Collection::Banners => {
            to_json(transition_status(&mut state.banners, id, status.parse::<ActivityStatus>()?, now)?)
        }
        Collection::Content => {
            to_json(transition_status(&mut state.content, id, status.parse::<ContentStatus>()?, now)?)
        }
        Collection::News => to_json(transition_status(&mut state.news, id, status.parse::<NewsStatus>()?, now)?),
        Collection::Popups => {
            to_json(transition_status(&mut state.popups, id, status.parse::<PopupStatus>()?, now)?)
        }
        Collection::Users => to_json(transition_status(&mut state.users, id, status.parse::<ActivityStatus>()?, now)?),
        other => Err(CommandError::Unsupported { command: "transition", collection: other }),
    }
}

fn delete(state: &mut AppState, collection: Collection, id: EntityId) -> Result<Value, CommandError> {
    match collection {
        Collection::Banners => delete_from(&mut state.banners, id),
        Collection::Content => delete_from(&mut state.content, id),
        Collection::News => delete_from(&mut state.news, id),
        Collection::Popups => delete_from(&mut state.popups, id),
        Collection::Sections => delete_from(&mut state.sections, id),
        Collection::Users => delete_from(&mut state.users, id),
        Collection::SearchQueries => delete_from(&mut state.search_queries, id),
        Collection::PageVisits => delete_from(&mut state.page_visits, id),
        Collection::FileDownloads => delete_from(&mut state.file_downloads, id),
    }
}

/// Inserts a record whose starting status must pass its date window.
fn insert_tracked<T: HasStatus + Serialize>(
    store: &mut EntityStore<T>,
    record: T,
    now: NaiveDateTime,
) -> Result<Value, CommandError> {
    admit_new(&record, now)?;
    insert_into(store, record)
}

fn insert_into<T: Entity + Serialize>(store: &mut EntityStore<T>, record: T) -> Result<Value, CommandError> {
    to_json(store.insert(record)?)
}

fn delete_from<T: Entity + Serialize>(store: &mut EntityStore<T>, id: EntityId) -> Result<Value, CommandError> {
    to_json(&store.delete_by_id(id)?)
}

/// Parses a record supplied on the command line. A missing `id` is filled
/// with a placeholder; the store assigns the real one.
fn from_json_record<T: DeserializeOwned>(raw: &str) -> Result<T, CommandError> {
    let mut value: Value = serde_json::from_str(raw)?;
    if let Value::Object(fields) = &mut value {
        fields.entry("id").or_insert(json!(0));
    }
    Ok(serde_json::from_value(value)?)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, CommandError> {
    Ok(serde_json::to_value(value)?)
}
