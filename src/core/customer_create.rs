use crate::domain::model::{FailurePolicy, ImportRow, RowOutcome, RowStatus};
use crate::domain::ports::CustomerRepository;
use crate::utils::error::{ImportError, Result};

/// Turns import rows into customers through a [`CustomerRepository`].
///
/// Rows are saved one after another, in source order. Rows missing a first
/// name, last name or email are skipped without raising an error.
pub struct CustomerCreator<R: CustomerRepository> {
    repository: R,
    failure_policy: FailurePolicy,
}

impl<R: CustomerRepository> CustomerCreator<R> {
    pub fn new(repository: R, failure_policy: FailurePolicy) -> Self {
        Self {
            repository,
            failure_policy,
        }
    }

    /// Save every complete row.
    ///
    /// With [`FailurePolicy::Abort`] the first failed save ends the batch with
    /// [`ImportError::CouldNotSaveCustomer`]; rows after it are not attempted.
    /// With [`FailurePolicy::Continue`] the failure is recorded and the next
    /// row is processed.
    pub async fn create_customers(&self, rows: Vec<ImportRow>) -> Result<Vec<RowOutcome>> {
        let mut outcomes = Vec::with_capacity(rows.len());

        for row in rows {
            let Some(draft) = row.to_draft() else {
                let missing = row.missing_fields();
                tracing::debug!("Skipping record {}: missing {}", row.position, missing.join(", "));
                outcomes.push(RowOutcome {
                    position: row.position,
                    status: RowStatus::Skipped { missing },
                });
                continue;
            };

            match self.repository.save(&draft).await {
                Ok(saved) => {
                    tracing::debug!(
                        "Saved customer {} from record {} (id: {:?})",
                        saved.email,
                        row.position,
                        saved.id
                    );
                    outcomes.push(RowOutcome {
                        position: row.position,
                        status: RowStatus::Created { customer_id: saved.id },
                    });
                }
                Err(e) => {
                    let error = ImportError::could_not_save(row.position, e);
                    match self.failure_policy {
                        FailurePolicy::Abort => {
                            tracing::error!(
                                "❌ {} ({} customers created before the failure)",
                                error,
                                outcomes
                                    .iter()
                                    .filter(|o| matches!(o.status, RowStatus::Created { .. }))
                                    .count()
                            );
                            return Err(error);
                        }
                        FailurePolicy::Continue => {
                            tracing::warn!("⚠️ {}", error);
                            let message = match &error {
                                ImportError::CouldNotSaveCustomer { message, .. } => message.clone(),
                                other => other.to_string(),
                            };
                            outcomes.push(RowOutcome {
                                position: row.position,
                                status: RowStatus::Failed { message },
                            });
                        }
                    }
                }
            }
        }

        Ok(outcomes)
    }
}
