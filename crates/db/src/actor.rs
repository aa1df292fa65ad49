//! Actor references.
//!
//! Posts, comments, reactions, conversation members and messages are owned by
//! either an individual account or an organizational page. Storage keeps two
//! nullable columns per owner; [`Actor`] is the application-level view of
//! that pair, which makes "exactly one of the two is set" a property of the
//! type rather than a runtime convention.

use std::fmt;

use campus_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};

/// An account or a page acting on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Actor {
    /// An individual account (`account.id`).
    Account(i64),
    /// An organizational page (`page.page_id`).
    Page(i64),
}

impl Actor {
    /// Build an actor from the two nullable storage columns.
    ///
    /// Returns `None` unless exactly one column is set.
    #[must_use]
    pub const fn from_columns(user_id: Option<i64>, page_id: Option<i64>) -> Option<Self> {
        match (user_id, page_id) {
            (Some(id), None) => Some(Self::Account(id)),
            (None, Some(id)) => Some(Self::Page(id)),
            _ => None,
        }
    }

    /// Like [`Actor::from_columns`], but names the offending fields on failure.
    pub fn try_from_columns(
        user_field: &str,
        user_id: Option<i64>,
        page_field: &str,
        page_id: Option<i64>,
    ) -> AppResult<Self> {
        Self::from_columns(user_id, page_id).ok_or_else(|| {
            AppError::Validation(format!(
                "Exactly one of '{user_field}' or '{page_field}' must be set."
            ))
        })
    }

    /// Value for the account column.
    #[must_use]
    pub const fn user_id(self) -> Option<i64> {
        match self {
            Self::Account(id) => Some(id),
            Self::Page(_) => None,
        }
    }

    /// Value for the page column.
    #[must_use]
    pub const fn page_id(self) -> Option<i64> {
        match self {
            Self::Account(_) => None,
            Self::Page(id) => Some(id),
        }
    }

    /// Both storage columns, account first.
    #[must_use]
    pub const fn columns(self) -> (Option<i64>, Option<i64>) {
        (self.user_id(), self.page_id())
    }

    /// Filter matching rows that reference this actor through the given columns.
    #[must_use]
    pub fn condition<C: ColumnTrait>(self, user_column: C, page_column: C) -> Condition {
        match self {
            Self::Account(id) => Condition::all().add(user_column.eq(id)),
            Self::Page(id) => Condition::all().add(page_column.eq(id)),
        }
    }

    /// Short label used in validation messages.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Account(_) => "account",
            Self::Page(_) => "page",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(id) => write!(f, "account:{id}"),
            Self::Page(id) => write!(f, "page:{id}"),
        }
    }
}
