use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::BookError;

/// A book record as stored and as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    /// Always `read_page == page_count`
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a fresh record from validated input.
    pub fn new(id: String, draft: BookDraft, now: OffsetDateTime) -> Self {
        let finished = draft.is_finished();
        Self {
            id,
            name: draft.name,
            year: draft.year,
            author: draft.author,
            summary: draft.summary,
            publisher: draft.publisher,
            page_count: draft.page_count,
            read_page: draft.read_page,
            finished,
            reading: draft.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every user-supplied field, keeping `id` and `inserted_at`.
    pub fn apply(&mut self, draft: BookDraft, now: OffsetDateTime) {
        self.finished = draft.is_finished();
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.updated_at = now;
    }
}

/// Request body for create and update. Every field but `name` falls back
/// to its zero value when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookPayload {
    /// Check the payload rules in order: name present, then page range.
    pub fn validate(self) -> Result<BookDraft, BookError> {
        let name = self.name.ok_or(BookError::MissingName)?;

        if self.read_page > self.page_count {
            return Err(BookError::InvalidPageRange {
                read_page: self.read_page,
                page_count: self.page_count,
            });
        }

        Ok(BookDraft {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// Payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookDraft {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// List projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Query string of `GET /books`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub reading: Option<String>,
    pub finished: Option<String>,
    pub name: Option<String>,
}

impl ListQuery {
    /// Collect the known keys from decoded query pairs. The first occurrence
    /// of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                "name" => &mut query.name,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// The single filter a list request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    Reading(bool),
    Finished(bool),
    NameContains(String),
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Reading(reading) => book.reading == *reading,
            BookFilter::Finished(finished) => book.finished == *finished,
            BookFilter::NameContains(needle) => book.name.to_lowercase().contains(needle),
        }
    }
}

impl From<&ListQuery> for BookFilter {
    /// `reading` beats `finished` beats `name`; values other than "0"/"1"
    /// are ignored.
    fn from(query: &ListQuery) -> Self {
        if let Some(reading) = parse_flag(query.reading.as_deref()) {
            return BookFilter::Reading(reading);
        }
        if let Some(finished) = parse_flag(query.finished.as_deref()) {
            return BookFilter::Finished(finished);
        }
        match query.name.as_deref() {
            Some(name) if !name.is_empty() => BookFilter::NameContains(name.to_lowercase()),
            _ => BookFilter::All,
        }
    }
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value {
        Some("1") => Some(true),
        Some("0") => Some(false),
        _ => None,
    }
}

/// `data` of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedBook {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

/// `data` of a list response.
#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// `data` of a detail response.
#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}
