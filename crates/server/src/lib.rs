use std::sync::Arc;

use services::services::airtable::RecordSource;

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

/// Shared handler state: where records come from.
#[derive(Clone)]
pub struct AppState {
    records: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordSource>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &dyn RecordSource {
        self.records.as_ref()
    }
}
