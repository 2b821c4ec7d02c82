use crate::domain::model::{CustomerDraft, SavedCustomer};
use crate::domain::ports::CustomerRepository;
use crate::utils::error::SaveError;
use async_trait::async_trait;

/// Repository that only logs what would be created.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunRepository;

#[async_trait]
impl CustomerRepository for DryRunRepository {
    async fn save(&self, draft: &CustomerDraft) -> Result<SavedCustomer, SaveError> {
        tracing::info!(
            "🔍 DRY RUN: would create {} {} <{}>",
            draft.first_name,
            draft.last_name,
            draft.email
        );
        Ok(SavedCustomer {
            id: None,
            email: draft.email.clone(),
        })
    }
}
