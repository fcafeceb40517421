//! In-progress inspection state.
//!
//! A [`ChecklistSession`] holds what the driver has entered so far. Nothing
//! is persisted until [`ChecklistSession::validate_and_submit`] succeeds;
//! there are no drafts.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::catalog::{Catalog, Category};
use crate::error::{Error, Result, ValidationError};
use crate::gateway::RecordGateway;
use crate::record::Record;
use crate::storage::KeyValueStore;

/// How much of a category is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryState {
    /// No items checked.
    Unchecked,
    /// Some but not all items checked.
    Partial,
    /// Every item checked. Empty categories are always in this state.
    Complete,
}

/// One inspection being filled in.
#[derive(Debug, Clone)]
pub struct ChecklistSession<'c> {
    catalog: &'c Catalog,
    driver_name: String,
    truck_number: String,
    date: DateTime<Utc>,
    completed: BTreeSet<String>,
    comments: String,
}

impl<'c> ChecklistSession<'c> {
    /// Start an empty session dated now.
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            driver_name: String::new(),
            truck_number: String::new(),
            date: Utc::now(),
            completed: BTreeSet::new(),
            comments: String::new(),
        }
    }

    /// The catalog this session validates against.
    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Set the driver name.
    pub fn set_driver_name(&mut self, name: impl Into<String>) {
        self.driver_name = name.into();
    }

    /// Set the truck number.
    pub fn set_truck_number(&mut self, number: impl Into<String>) {
        self.truck_number = number.into();
    }

    /// Set the inspection date.
    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    /// Set the free-text comments.
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = comments.into();
    }

    /// The driver name as entered.
    #[must_use]
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    /// The truck number as entered.
    #[must_use]
    pub fn truck_number(&self) -> &str {
        &self.truck_number
    }

    /// The inspection date.
    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// The comments as entered.
    #[must_use]
    pub fn comments(&self) -> &str {
        &self.comments
    }

    /// The checked item labels.
    #[must_use]
    pub fn completed_items(&self) -> &BTreeSet<String> {
        &self.completed
    }

    /// Check whether `item` is checked.
    #[must_use]
    pub fn is_checked(&self, item: &str) -> bool {
        self.completed.contains(item)
    }

    /// Flip whether `item` is checked; returns the new state.
    pub fn toggle_item(&mut self, item: &str) -> bool {
        if self.completed.remove(item) {
            false
        } else {
            self.completed.insert(item.to_string());
            true
        }
    }

    /// Select or deselect a whole category at once.
    ///
    /// If every item of the category is checked they are all unchecked,
    /// otherwise they are all checked. Returns the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if the catalog has no such category.
    pub fn toggle_all_in_category(&mut self, category: &str) -> Result<CategoryState> {
        let catalog = self.catalog;
        let category = catalog
            .category(category)
            .ok_or_else(|| Error::unknown_category(category))?;

        if self.state_of(category) == CategoryState::Complete {
            for item in category.items() {
                self.completed.remove(item);
            }
        } else {
            self.completed.extend(category.items().iter().cloned());
        }
        Ok(self.state_of(category))
    }

    /// How much of `category` is checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if the catalog has no such category.
    pub fn category_state(&self, category: &str) -> Result<CategoryState> {
        self.catalog
            .category(category)
            .map(|c| self.state_of(c))
            .ok_or_else(|| Error::unknown_category(category))
    }

    fn state_of(&self, category: &Category) -> CategoryState {
        let checked = category
            .items()
            .iter()
            .filter(|item| self.completed.contains(*item))
            .count();
        if checked == category.items().len() {
            CategoryState::Complete
        } else if checked == 0 {
            CategoryState::Unchecked
        } else {
            CategoryState::Partial
        }
    }

    /// Catalog items not yet checked, in catalog order.
    #[must_use]
    pub fn missing_items(&self) -> Vec<&'c str> {
        self.catalog
            .items()
            .filter(|item| !self.completed.contains(*item))
            .collect()
    }

    /// Checked catalog items and total catalog items.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let total = self.catalog.item_count();
        (total - self.missing_items().len(), total)
    }

    /// Check the session is ready to submit.
    ///
    /// Driver name and truck number must be non-blank and every catalog item
    /// must be checked. Checks run in that order and the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.driver_name.trim().is_empty() {
            return Err(ValidationError::MissingDriverName);
        }
        if self.truck_number.trim().is_empty() {
            return Err(ValidationError::MissingTruckNumber);
        }

        let missing = self.missing_items();
        if !missing.is_empty() {
            return Err(ValidationError::IncompleteChecklist {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
        Ok(())
    }

    /// Validate and build the record this session would submit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn to_record(&self) -> std::result::Result<Record, ValidationError> {
        self.validate()?;
        Ok(Record::new(
            self.date,
            self.driver_name.trim().to_string(),
            self.truck_number.trim().to_string(),
            self.completed.iter().cloned().collect(),
            self.comments.clone(),
        ))
    }

    /// Validate, then append the resulting record to the persisted collection.
    ///
    /// Nothing is written unless validation passes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the session is incomplete, or a
    /// persistence error if the collection cannot be updated.
    pub fn validate_and_submit<S: KeyValueStore>(
        &self,
        gateway: &RecordGateway<S>,
    ) -> Result<Record> {
        let record = self.to_record()?;
        gateway.append(record.clone())?;
        info!(
            "Submitted inspection {} for truck {} by {}",
            record.id(),
            record.truck_number(),
            record.driver_name()
        );
        Ok(record)
    }
}
