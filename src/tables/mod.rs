//! Read-only view models for the two collections.
//!
//! Tables never mutate anything. Each row carries the intents it can emit
//! and the owning page decides what to do with them.

pub mod attendance;
pub mod employee;

/// Placeholder shown instead of an empty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    pub action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView<R> {
    Empty(EmptyState),
    Populated(Vec<R>),
}

impl<R> TableView<R> {
    pub fn new(rows: Vec<R>, empty: EmptyState) -> Self {
        if rows.is_empty() {
            TableView::Empty(empty)
        } else {
            TableView::Populated(rows)
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            TableView::Empty(_) => &[],
            TableView::Populated(rows) => rows,
        }
    }

    pub fn empty_state(&self) -> Option<&EmptyState> {
        match self {
            TableView::Empty(state) => Some(state),
            TableView::Populated(_) => None,
        }
    }
}

/// What a row action asks its page to do, keyed by the row's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIntent {
    Edit(String),
    Delete(String),
}
