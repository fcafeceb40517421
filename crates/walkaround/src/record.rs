//! Completed inspection records.
//!
//! A [`Record`] is created once, when a checklist session passes validation,
//! and is never modified afterwards. Its serialized form is the on-disk
//! format of the persisted collection.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Category;

/// One submitted inspection.
///
/// `completed_items` is semantically a set; its stored order carries no
/// meaning and nothing reads it positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    id: Uuid,
    date: DateTime<Utc>,
    driver_name: String,
    truck_number: String,
    completed_items: Vec<String>,
    comments: String,
}

impl Record {
    /// Create a record with a freshly generated id.
    ///
    /// Only called once a session has validated, see
    /// [`ChecklistSession::validate`](crate::session::ChecklistSession::validate).
    pub(crate) fn new(
        date: DateTime<Utc>,
        driver_name: String,
        truck_number: String,
        completed_items: Vec<String>,
        comments: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            driver_name,
            truck_number,
            completed_items,
            comments,
        }
    }

    /// Unique identifier assigned at submission.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the inspection took place.
    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Name of the driver who performed the inspection.
    #[must_use]
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    /// The inspected truck.
    #[must_use]
    pub fn truck_number(&self) -> &str {
        &self.truck_number
    }

    /// Checked item labels as stored.
    #[must_use]
    pub fn completed_items(&self) -> &[String] {
        &self.completed_items
    }

    /// Free-text comments, possibly empty.
    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// Checked item labels as a set, duplicates collapsed.
    #[must_use]
    pub fn completed_set(&self) -> BTreeSet<&str> {
        self.completed_items.iter().map(String::as_str).collect()
    }

    /// Check whether `item` was checked.
    #[must_use]
    pub fn is_completed(&self, item: &str) -> bool {
        self.completed_items.iter().any(|i| i == item)
    }

    /// The items of `category` this record checked, in category order.
    #[must_use]
    pub fn completed_in<'c>(&self, category: &'c Category) -> Vec<&'c str> {
        let done = self.completed_set();
        category
            .items()
            .iter()
            .map(String::as_str)
            .filter(|item| done.contains(item))
            .collect()
    }
}
