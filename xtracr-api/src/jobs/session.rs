//! Form session
//!
//! Owns everything one operator session works on: the form fields, the
//! workflow state, the builder gate and the contacts from the last
//! extraction. Local commands are single methods. Commands that reach the
//! backend are split into a `begin_*` half that decides what to send and a
//! `finish_*` half that applies the answer, so the session is never borrowed
//! while a request is in flight (see [`super::commands::SharedSession`]).
//! Everything reports to the operator through a [`NotificationSink`] and
//! never fails outright.

use reconciler::{reconcile, work_order_fields};
use shared_types::{
    Contact, CustomerRecord, ExtractionResult, JobCreatedResponse, JobSubmissionPayload,
    NewCustomerRequest, SessionSnapshot, Severity, WorkflowState,
};

use super::payload;
use super::submission::{Workflow, WorkflowError};
use crate::config::SessionConfig;
use crate::helpers::builder_gate::{is_upload_allowed, BuilderGate, SELECT_BUILDER_MESSAGE};
use crate::helpers::description_validator::{is_description_valid, DESCRIPTION_REQUIRED_MESSAGE};
use crate::helpers::field_store::*;
use crate::helpers::notifications::{NotificationSink, LONG_NOTIFICATION_MS};
use crate::integrations::{BackendError, CustomerCreation};

pub const UPLOAD_CANCELLED_MESSAGE: &str =
    "PDF upload cancelled. Please select the correct builder.";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "PDF uploaded and data extracted successfully!";
pub const DATA_CLEARED_MESSAGE: &str = "Data cleared successfully. Sold To information preserved.";

/// How an upload command ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No builder selected; nothing was sent
    Blocked,
    Failed,
    /// The document names a different builder and the operator has not confirmed
    MismatchCancelled(String),
    Populated,
}

pub struct FormSession {
    fields: FieldStore,
    workflow: Workflow,
    builder_gate: BuilderGate,
    last_contacts: Vec<Contact>,
    config: SessionConfig,
}

impl FormSession {
    pub fn new(config: SessionConfig) -> Self {
        let mut fields = FieldStore::new();
        fields.set(SOLD_TO_SALESPERSON, config.default_salesperson.clone());

        Self {
            fields,
            workflow: Workflow::new(),
            builder_gate: BuilderGate::new(),
            last_contacts: Vec::new(),
            config,
        }
    }

    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }

    pub fn workflow_state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn last_contacts(&self) -> &[Contact] {
        &self.last_contacts
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let description_valid = is_description_valid(self.fields.get(DESCRIPTION_OF_WORKS));

        SessionSnapshot {
            workflow: self.workflow.state().clone(),
            fields: self.fields.snapshot(),
            upload_allowed: is_upload_allowed(self.fields.get(SOLD_TO_NAME)),
            description_valid,
            customer_submission_enabled: self.workflow.can_submit_customer(),
            job_submission_enabled: self.workflow.can_submit_job() && description_valid,
        }
    }

    /// Re-evaluate the builder gate, warning when upload just became unavailable
    pub fn refresh_builder_gate(&mut self, sink: &mut dyn NotificationSink) {
        if self.builder_gate.evaluate(self.fields.get(SOLD_TO_NAME)) {
            sink.warning(SELECT_BUILDER_MESSAGE);
        }
    }

    /// Manual edit of one field. Unknown ids are ignored.
    pub fn update_field(&mut self, field_id: &str, value: &str, sink: &mut dyn NotificationSink) {
        if !self.fields.set(field_id, value) {
            return;
        }

        match field_id {
            SOLD_TO_NAME => self.refresh_builder_gate(sink),
            DESCRIPTION_OF_WORKS if !is_description_valid(value) => {
                sink.error(DESCRIPTION_REQUIRED_MESSAGE)
            }
            _ => {}
        }
    }

    /// Copy a search result into the sold-to fields
    pub fn select_builder(&mut self, customer: &CustomerRecord, sink: &mut dyn NotificationSink) {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        self.fields.set(SOLD_TO_ID, customer.identifier());
        self.fields.set(SOLD_TO_NAME, customer.display_name());
        self.fields.set(SOLD_TO_BUSINESS_NAME, text(&customer.business_name));
        self.fields.set(SOLD_TO_ADDRESS1, text(&customer.address1));
        self.fields.set(SOLD_TO_ADDRESS2, text(&customer.address2));
        self.fields.set(SOLD_TO_CITY, text(&customer.city));
        self.fields.set(SOLD_TO_STATE, text(&customer.state));
        self.fields.set(SOLD_TO_ZIP, text(&customer.zip_code));
        self.fields.set(SOLD_TO_PHONE, text(&customer.phone));
        self.fields.set(SOLD_TO_PHONE1, text(&customer.phone));
        self.fields.set(SOLD_TO_PHONE2, text(&customer.phone2));
        self.fields.set(SOLD_TO_EMAIL, text(&customer.email));

        tracing::info!(builder_id = %customer.identifier(), "Builder selected");
        sink.info("Customer selected");
        self.refresh_builder_gate(sink);
    }

    pub fn clear_builder(&mut self, sink: &mut dyn NotificationSink) {
        self.fields.clear(SOLD_TO_FIELDS);
        self.fields
            .set(SOLD_TO_SALESPERSON, self.config.default_salesperson.clone());
        tracing::info!("Sold To fields cleared");
        self.refresh_builder_gate(sink);
    }

    /// Start an upload. Returns the builder name to send with the PDF, or
    /// `None` when no builder is selected. An accepted upload starts a new
    /// customer/job pair, so the workflow is reset here whatever the outcome.
    pub fn begin_upload(&mut self, sink: &mut dyn NotificationSink) -> Option<String> {
        let builder_name = self.fields.trimmed(SOLD_TO_NAME).to_string();
        if !is_upload_allowed(&builder_name) {
            sink.warning(SELECT_BUILDER_MESSAGE);
            return None;
        }

        self.workflow.reset();
        Some(builder_name)
    }

    /// Apply an extraction answer. A builder mismatch reported by the service
    /// is only accepted when `confirm_mismatch` is set.
    pub fn finish_upload(
        &mut self,
        outcome: Result<ExtractionResult, BackendError>,
        confirm_mismatch: bool,
        sink: &mut dyn NotificationSink,
    ) -> UploadOutcome {
        let extraction = match outcome {
            Ok(extraction) => extraction,
            Err(BackendError::Rejected(message)) => {
                sink.notify(
                    &format!("Extraction error: {}", message),
                    Severity::Error,
                    LONG_NOTIFICATION_MS,
                );
                return UploadOutcome::Failed;
            }
            Err(err) => {
                sink.notify(
                    &format!("Upload failed: {}", err.user_message("uploading the PDF")),
                    Severity::Error,
                    LONG_NOTIFICATION_MS,
                );
                return UploadOutcome::Failed;
            }
        };

        if let Some(warning) = extraction.builder_mismatch_warning.clone() {
            if !confirm_mismatch {
                tracing::warn!(%warning, "Upload held back for builder confirmation");
                sink.notify(&warning, Severity::Warning, LONG_NOTIFICATION_MS);
                sink.warning(UPLOAD_CANCELLED_MESSAGE);
                return UploadOutcome::MismatchCancelled(warning);
            }
            tracing::info!(%warning, "Builder mismatch confirmed by operator");
        }

        self.apply_extraction(&extraction);
        sink.success(UPLOAD_SUCCESS_MESSAGE);
        UploadOutcome::Populated
    }

    /// Write a reconciled extraction into the ship-to, work-order and contact fields
    pub fn apply_extraction(&mut self, extraction: &ExtractionResult) {
        let reconciled = reconcile(extraction);
        let work_order = work_order_fields(extraction);

        let assignments = [
            (SHIP_TO_NAME, reconciled.ship_to_name),
            (SHIP_TO_FIRST_NAME, reconciled.ship_to_first_name),
            (SHIP_TO_LAST_NAME, reconciled.ship_to_last_name),
            (SHIP_TO_ADDRESS1, reconciled.address1),
            (SHIP_TO_ADDRESS2, reconciled.address2),
            (SHIP_TO_CITY, reconciled.city),
            (SHIP_TO_STATE, reconciled.state),
            (SHIP_TO_ZIP, reconciled.zip_code),
            (SHIP_TO_COUNTRY, reconciled.country),
            (SHIP_TO_EMAIL, reconciled.email),
            (SHIP_TO_PHONE1, reconciled.phone_slot_1.clone()),
            (SHIP_TO_PHONE2, reconciled.phone_slot_2.clone()),
            (PDF_PHONE1, reconciled.phone_slot_1),
            (PDF_PHONE2, reconciled.phone_slot_2),
            (PDF_PHONE3, reconciled.phone_slot_3.clone()),
            (PDF_PHONE4, reconciled.phone_slot_4.clone()),
            (ALTERNATE_CONTACT_NAME, reconciled.best_contact_summary),
            (ALTERNATE_CONTACT_PHONE, reconciled.phone_slot_3),
            (ALTERNATE_CONTACT_PHONE2, reconciled.phone_slot_4),
            (ALTERNATE_CONTACT_EMAIL, reconciled.best_contact_email),
            (PRIMARY_CONTACT_NAME, reconciled.primary_contact_name),
            (PO_NUMBER, work_order.po_number),
            (DOLLAR_VALUE, work_order.dollar_value),
            (DESCRIPTION_OF_WORKS, work_order.description_of_works),
            (SUPERVISOR_NAME, work_order.supervisor_name),
            (SUPERVISOR_PHONE, work_order.supervisor_phone),
            (COMMENCEMENT_DATE, work_order.commencement_date),
            (COMPLETION_DATE, work_order.completion_date),
            (ACTUAL_JOB_NUMBER, work_order.actual_job_number),
        ];

        for (field_id, value) in assignments {
            self.fields.set(field_id, value);
        }

        self.last_contacts = extraction.alternate_contacts.clone();
    }

    /// Clear everything taken from the last PDF; the sold-to fields stay
    pub fn clear_extracted(&mut self, sink: &mut dyn NotificationSink) {
        self.fields.clear(WORK_ORDER_FIELDS);
        self.fields.clear(SHIP_TO_FIELDS);
        self.fields.clear(BEST_CONTACT_FIELDS);
        self.fields.clear(BILLING_FIELDS);
        self.last_contacts.clear();
        self.workflow.reset();

        tracing::info!("Extracted data cleared");
        sink.success(DATA_CLEARED_MESSAGE);
    }

    /// The customer record to create, or `None` when the workflow already
    /// has a customer
    pub fn begin_customer(&self, sink: &mut dyn NotificationSink) -> Option<NewCustomerRequest> {
        match self.workflow.begin_customer() {
            Ok(()) => Some(payload::customer_request(&self.fields, &self.config)),
            Err(err) => {
                report_failure(err, "creating customer in RFMS", sink);
                None
            }
        }
    }

    pub fn finish_customer(
        &mut self,
        outcome: Result<CustomerCreation, BackendError>,
        sink: &mut dyn NotificationSink,
    ) {
        match self.workflow.complete_customer(outcome) {
            Ok(CustomerCreation::Duplicate(id)) => sink.info(&format!(
                "Customer already exists in RFMS! Using existing ID: {}",
                id
            )),
            Ok(CustomerCreation::Created(id)) => {
                sink.success(&format!("Customer created in RFMS! ID: {}", id))
            }
            Ok(_) => sink.success("Customer created in RFMS! (ID not returned)"),
            Err(err) => report_failure(err, "creating customer in RFMS", sink),
        }
    }

    /// The customer id and job payload to send, or `None` when a precondition
    /// fails. Every missing requirement is reported at once.
    pub fn begin_job(
        &self,
        sink: &mut dyn NotificationSink,
    ) -> Option<(String, JobSubmissionPayload)> {
        let requirements = payload::job_requirements(&self.fields);

        match self.workflow.begin_job(&requirements) {
            Ok(customer_id) => {
                let job = payload::job_payload(
                    &self.fields,
                    &customer_id,
                    &self.last_contacts,
                    &self.config,
                );
                Some((customer_id, job))
            }
            Err(err) => {
                report_failure(err, "creating job in RFMS", sink);
                None
            }
        }
    }

    pub fn finish_job(
        &mut self,
        customer_id: &str,
        outcome: Result<JobCreatedResponse, BackendError>,
        sink: &mut dyn NotificationSink,
    ) {
        match self.workflow.complete_job(customer_id, outcome) {
            Ok(job_id) => {
                sink.success("Job created in RFMS!");
                if let Some(job_id) = job_id {
                    sink.notify(
                        &format!("Job created with ID: {}", job_id),
                        Severity::Success,
                        5000,
                    );
                }
            }
            Err(err) => report_failure(err, "creating job in RFMS", sink),
        }
    }
}

fn report_failure(err: WorkflowError, operation: &str, sink: &mut dyn NotificationSink) {
    match err {
        WorkflowError::Validation {
            ref missing,
            description_invalid,
        } => {
            tracing::debug!(?missing, "Job preconditions not met");
            sink.warning(&err.to_string());
            if description_invalid {
                sink.error(DESCRIPTION_REQUIRED_MESSAGE);
            }
        }
        WorkflowError::InvalidTransition(message) => sink.warning(message),
        WorkflowError::Backend(backend_err) => sink.error(&backend_err.user_message(operation)),
        WorkflowError::Rejected(_) => sink.error(&err.to_string()),
    }
}
