//! Two-step submission workflow
//!
//! A job can only be created for a customer that exists, so the workflow moves
//! `NoCustomer -> CustomerCreated(id) -> JobCreated(job_id)`. Nothing is retried
//! here; a failed step leaves the state where it was and the operator triggers
//! it again. [`Workflow::reset`] returns to `NoCustomer` from any state.
//!
//! Each step is split in two: `begin_*` checks locally whether the request may
//! be sent at all, `complete_*` applies whatever the backend answered. The
//! request itself runs in between, outside any borrow of the workflow.

use shared_types::{JobCreatedResponse, WorkflowState};
use thiserror::Error;

use crate::helpers::description_validator::is_description_valid;
use crate::integrations::{BackendError, CustomerCreation, CREATED_SENTINEL};

pub const ADD_CUSTOMER_FIRST_MESSAGE: &str = "Please add the customer to RFMS first.";
pub const CUSTOMER_EXISTS_MESSAGE: &str =
    "Customer already added to RFMS. Clear the data or upload a new PDF to start over.";
pub const JOB_EXISTS_MESSAGE: &str =
    "Job already created in RFMS. Clear the data or upload a new PDF to create another job.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    /// Local precondition failure; no request was sent
    #[error("Please complete the following required fields: {}", .missing.join(", "))]
    Validation {
        missing: Vec<String>,
        description_invalid: bool,
    },

    #[error("{0}")]
    InvalidTransition(&'static str),

    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The customer service answered but refused to create the customer
    #[error("Failed to create customer: {0}")]
    Rejected(String),
}

/// Form values the job step cannot be sent without
#[derive(Debug, Clone, Default)]
pub struct JobRequirements<'a> {
    pub sold_to_name: &'a str,
    pub sold_to_id: &'a str,
    pub ship_to_name: &'a str,
    pub po_number: &'a str,
    pub description_of_works: &'a str,
}

impl JobRequirements<'_> {
    /// Every missing requirement in one error, or `Ok` when the job may be sent
    pub fn check(&self) -> Result<(), WorkflowError> {
        let required = [
            ("Builder Name", self.sold_to_name),
            ("Builder ID", self.sold_to_id),
            ("Ship To Name", self.ship_to_name),
            ("PO Number", self.po_number),
        ];

        let mut missing: Vec<String> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label.to_string())
            .collect();

        let description_invalid = !is_description_valid(self.description_of_works);
        if description_invalid {
            missing.push("Description of Works".to_string());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(WorkflowError::Validation {
                missing,
                description_invalid,
            })
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Workflow {
    state: WorkflowState,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn customer_id(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::CustomerCreated(id) => Some(id),
            _ => None,
        }
    }

    pub fn can_submit_customer(&self) -> bool {
        self.state == WorkflowState::NoCustomer
    }

    pub fn can_submit_job(&self) -> bool {
        matches!(self.state, WorkflowState::CustomerCreated(_))
    }

    pub fn reset(&mut self) {
        if self.state != WorkflowState::NoCustomer {
            tracing::info!(from = ?self.state, "Workflow reset");
        }
        self.state = WorkflowState::NoCustomer;
    }

    /// Check that a customer may be created now
    pub fn begin_customer(&self) -> Result<(), WorkflowError> {
        if self.can_submit_customer() {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition(CUSTOMER_EXISTS_MESSAGE))
        }
    }

    /// Apply the create-customer outcome. Duplicates and identifier-less
    /// successes both advance the workflow; an outright refusal or a network
    /// failure leaves it where it was.
    pub fn complete_customer(
        &mut self,
        outcome: Result<CustomerCreation, BackendError>,
    ) -> Result<CustomerCreation, WorkflowError> {
        let creation = outcome?;

        if let CustomerCreation::Failed(message) = &creation {
            tracing::warn!(%message, "Customer creation refused");
            return Err(WorkflowError::Rejected(message.clone()));
        }

        let customer_id = creation
            .customer_id()
            .unwrap_or_else(|| CREATED_SENTINEL.to_string());
        tracing::info!(customer_id = %customer_id, outcome = ?creation, "Customer step complete");
        self.state = WorkflowState::CustomerCreated(customer_id);
        Ok(creation)
    }

    /// Check every precondition of the job step. Returns the customer the job
    /// belongs to; nothing may be sent when this fails.
    pub fn begin_job(&self, requirements: &JobRequirements<'_>) -> Result<String, WorkflowError> {
        let customer_id = match &self.state {
            WorkflowState::CustomerCreated(id) => id.clone(),
            WorkflowState::NoCustomer => {
                return Err(WorkflowError::InvalidTransition(ADD_CUSTOMER_FIRST_MESSAGE))
            }
            WorkflowState::JobCreated(_) => {
                return Err(WorkflowError::InvalidTransition(JOB_EXISTS_MESSAGE))
            }
        };

        requirements.check()?;
        Ok(customer_id)
    }

    /// Apply the create-job outcome for `customer_id`. A failure keeps the
    /// customer so only the job step has to be repeated.
    pub fn complete_job(
        &mut self,
        customer_id: &str,
        outcome: Result<JobCreatedResponse, BackendError>,
    ) -> Result<Option<String>, WorkflowError> {
        let created = outcome?;

        if self.customer_id() == Some(customer_id) {
            self.state = WorkflowState::JobCreated(created.job_id.clone());
        } else {
            // Cleared while the request was in flight
            tracing::warn!(customer_id, state = ?self.state, "Job created after workflow reset");
        }

        tracing::info!(customer_id, job_id = ?created.job_id, "Job created");
        Ok(created.job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::NetworkError;

    fn complete_requirements() -> JobRequirements<'static> {
        JobRequirements {
            sold_to_name: "Acme Homes",
            sold_to_id: "B-12",
            ship_to_name: "Jane Doe",
            po_number: "PO-5501",
            description_of_works: "Restretch carpet in bedroom two",
        }
    }

    fn customer_created(id: &str) -> Workflow {
        Workflow {
            state: WorkflowState::CustomerCreated(id.to_string()),
        }
    }

    fn job_response(job_id: Option<&str>) -> Result<JobCreatedResponse, BackendError> {
        Ok(JobCreatedResponse {
            job_id: job_id.map(str::to_string),
        })
    }

    #[test]
    fn test_requirements_list_every_missing_field() {
        let requirements = JobRequirements {
            sold_to_name: "Acme Homes",
            description_of_works: "too short",
            ..Default::default()
        };

        match requirements.check() {
            Err(WorkflowError::Validation {
                missing,
                description_invalid,
            }) => {
                assert_eq!(
                    missing,
                    vec!["Builder ID", "Ship To Name", "PO Number", "Description of Works"]
                );
                assert!(description_invalid);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(complete_requirements().check().is_ok());
    }

    #[test]
    fn test_duplicate_customer_advances() {
        let mut workflow = Workflow::new();
        workflow.begin_customer().unwrap();

        let creation = workflow
            .complete_customer(Ok(CustomerCreation::Duplicate("C-900".to_string())))
            .unwrap();

        assert_eq!(creation, CustomerCreation::Duplicate("C-900".to_string()));
        assert_eq!(workflow.customer_id(), Some("C-900"));
    }

    #[test]
    fn test_customer_without_id_uses_sentinel() {
        let mut workflow = Workflow::new();

        workflow
            .complete_customer(Ok(CustomerCreation::CreatedNoId))
            .unwrap();

        assert_eq!(workflow.customer_id(), Some("CREATED"));
    }

    #[test]
    fn test_refused_customer_stays_in_no_customer() {
        let mut workflow = Workflow::new();

        let err = workflow
            .complete_customer(Ok(CustomerCreation::Failed("Invalid zip code".to_string())))
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to create customer: Invalid zip code");
        assert_eq!(workflow.state(), &WorkflowState::NoCustomer);
    }

    #[test]
    fn test_network_failure_keeps_no_customer() {
        let mut workflow = Workflow::new();

        let err = workflow
            .complete_customer(Err(BackendError::Network(NetworkError::Timeout)))
            .unwrap_err();

        assert_eq!(err, WorkflowError::Backend(BackendError::Network(NetworkError::Timeout)));
        assert!(workflow.can_submit_customer());
    }

    #[test]
    fn test_second_customer_submission_rejected() {
        let workflow = customer_created("C-1");

        assert_eq!(
            workflow.begin_customer(),
            Err(WorkflowError::InvalidTransition(CUSTOMER_EXISTS_MESSAGE))
        );
    }

    #[test]
    fn test_job_without_customer_rejected() {
        let workflow = Workflow::new();

        assert_eq!(
            workflow.begin_job(&complete_requirements()),
            Err(WorkflowError::InvalidTransition(ADD_CUSTOMER_FIRST_MESSAGE))
        );
    }

    #[test]
    fn test_job_with_empty_po_rejected() {
        let workflow = customer_created("C-1");
        let requirements = JobRequirements {
            po_number: "  ",
            ..complete_requirements()
        };

        match workflow.begin_job(&requirements) {
            Err(WorkflowError::Validation { missing, .. }) => {
                assert_eq!(missing, vec!["PO Number"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(workflow.customer_id(), Some("C-1"));
    }

    #[test]
    fn test_job_created_for_customer() {
        let mut workflow = customer_created("C-1");

        let customer_id = workflow.begin_job(&complete_requirements()).unwrap();
        assert_eq!(customer_id, "C-1");

        let job_id = workflow
            .complete_job(&customer_id, job_response(Some("J-77")))
            .unwrap();

        assert_eq!(job_id.as_deref(), Some("J-77"));
        assert_eq!(
            workflow.state(),
            &WorkflowState::JobCreated(Some("J-77".to_string()))
        );
        assert_eq!(
            workflow.begin_job(&complete_requirements()),
            Err(WorkflowError::InvalidTransition(JOB_EXISTS_MESSAGE))
        );
    }

    #[test]
    fn test_failed_job_keeps_customer() {
        let mut workflow = customer_created("C-1");
        let failure = BackendError::Network(NetworkError::Client {
            status: 400,
            message: "Invalid PO".to_string(),
        });

        let err = workflow.complete_job("C-1", Err(failure.clone())).unwrap_err();

        assert_eq!(err, WorkflowError::Backend(failure));
        assert_eq!(workflow.customer_id(), Some("C-1"));
    }

    #[test]
    fn test_job_completed_after_reset_leaves_state() {
        let mut workflow = customer_created("C-1");
        workflow.reset();

        let job_id = workflow.complete_job("C-1", job_response(Some("J-9"))).unwrap();

        assert_eq!(job_id.as_deref(), Some("J-9"));
        assert_eq!(workflow.state(), &WorkflowState::NoCustomer);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut workflow = Workflow {
            state: WorkflowState::JobCreated(None),
        };
        workflow.reset();
        assert!(workflow.can_submit_customer());
        assert!(!workflow.can_submit_job());
    }
}
