//! Status lifecycle: create, look up, soft-remove.
//!
//! Removal only flips the flag on the canonical record. Index rows keep the
//! id, so anything read from a line is a candidate that must be resolved
//! here before it is shown.

use statusline_store::RecordStore;
use std::sync::Arc;

use crate::error::StatusError;
use crate::id::{IdGenerator, StatusId};
use crate::line::STATUS_FAMILY;
use crate::status::Status;
use crate::validation::StatusValidator;

pub struct StatusRepository {
    records: Arc<dyn RecordStore>,
    ids: IdGenerator,
    validator: Arc<StatusValidator>,
}

impl StatusRepository {
    pub fn new(records: Arc<dyn RecordStore>, validator: Arc<StatusValidator>) -> Self {
        Self::with_generator(records, validator, IdGenerator::new())
    }

    pub fn with_generator(
        records: Arc<dyn RecordStore>,
        validator: Arc<StatusValidator>,
        ids: IdGenerator,
    ) -> Self {
        Self {
            records,
            ids,
            validator,
        }
    }

    /// Validate and persist a new status.
    ///
    /// Fails with [`StatusError::Validation`] listing every violation, in
    /// which case nothing is written.
    pub fn create(&self, author_login: &str, content: &str) -> Result<Status, StatusError> {
        let status = Status::new(self.ids.next_id(), author_login, content);
        self.validator.validate(&status)?;
        log::debug!("Persisting status: {status:?}");
        self.persist(&status)?;
        Ok(status)
    }

    /// Live status by id; `None` when absent or removed.
    pub fn find_by_id(&self, id: &StatusId) -> Result<Option<Status>, StatusError> {
        log::debug!("Finding status: {id}");
        Ok(self.load(id)?.filter(|status| !status.removed))
    }

    /// Soft-remove the stored status with `status.id`.
    ///
    /// Only the flag changes; every other field comes from the stored
    /// record, not from the argument. `None` when no such status was ever
    /// created. Calling it again changes nothing.
    pub fn mark_removed(&self, status: &Status) -> Result<Option<Status>, StatusError> {
        let Some(mut stored) = self.load(&status.id)? else {
            log::debug!("Status not found for removal: {}", status.id);
            return Ok(None);
        };
        if !stored.removed {
            stored.removed = true;
            log::debug!("Updating status: {stored:?}");
            self.persist(&stored)?;
        }
        Ok(Some(stored))
    }

    /// Resolve index candidates to live statuses, keeping input order and
    /// skipping ids that are absent or removed.
    pub fn resolve(&self, ids: &[StatusId]) -> Result<Vec<Status>, StatusError> {
        let mut live = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(status) = self.find_by_id(id)? {
                live.push(status);
            }
        }
        Ok(live)
    }

    fn load(&self, id: &StatusId) -> Result<Option<Status>, StatusError> {
        self.records
            .get_record(STATUS_FAMILY, id.as_bytes())?
            .map(|bytes| Status::decode(&bytes))
            .transpose()
    }

    fn persist(&self, status: &Status) -> Result<(), StatusError> {
        self.records
            .put_record(STATUS_FAMILY, status.id.as_bytes(), &status.encode()?)?;
        Ok(())
    }
}
