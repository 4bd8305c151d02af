//! Session commands that reach the backend
//!
//! The form session is locked only long enough to decide what to send and,
//! later, to apply the answer. While the request is in flight other commands
//! (field edits, builder selection, snapshots) run normally. Uploads and the
//! two submission steps additionally take the `in_flight` guard, so at most one
//! of them talks to the backend at a time and a job request always sees the
//! outcome of the customer request before it.

use shared_types::CustomerSearchResult;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use super::session::{FormSession, UploadOutcome};
use crate::helpers::notifications::NotificationSink;
use crate::integrations::{BackendClient, BackendError};

#[derive(Clone)]
pub struct SharedSession {
    session: Arc<Mutex<FormSession>>,
    in_flight: Arc<Mutex<()>>,
    backend: Arc<BackendClient>,
}

impl SharedSession {
    pub fn new(session: FormSession, backend: Arc<BackendClient>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            in_flight: Arc::new(Mutex::new(())),
            backend,
        }
    }

    /// Lock the session for a local command
    pub async fn lock(&self) -> MutexGuard<'_, FormSession> {
        self.session.lock().await
    }

    pub async fn search_builders(
        &self,
        term: &str,
        sink: &mut dyn NotificationSink,
    ) -> Vec<CustomerSearchResult> {
        match self.backend.search_customers(term).await {
            Ok(customers) => {
                if customers.is_empty() {
                    sink.info("No customers found");
                }
                customers.into_iter().map(CustomerSearchResult::from).collect()
            }
            Err(BackendError::Rejected(message)) => {
                sink.error(&format!("Error: {}", message));
                Vec::new()
            }
            Err(err) => {
                sink.error(&format!(
                    "Search failed: {}",
                    err.user_message("searching customers")
                ));
                Vec::new()
            }
        }
    }

    pub async fn upload_pdf(
        &self,
        file_name: &str,
        pdf: Vec<u8>,
        confirm_mismatch: bool,
        sink: &mut dyn NotificationSink,
    ) -> UploadOutcome {
        let _in_flight = self.in_flight.lock().await;

        let mut session = self.session.lock().await;
        let builder_name = session.begin_upload(sink);
        drop(session);

        let Some(builder_name) = builder_name else {
            return UploadOutcome::Blocked;
        };

        tracing::info!(file_name, bytes = pdf.len(), builder = %builder_name, "PDF upload started");
        let outcome = self.backend.extract_pdf(file_name, pdf, &builder_name).await;

        let mut session = self.session.lock().await;
        session.finish_upload(outcome, confirm_mismatch, sink)
    }

    pub async fn submit_customer(&self, sink: &mut dyn NotificationSink) {
        let _in_flight = self.in_flight.lock().await;

        let session = self.session.lock().await;
        let request = session.begin_customer(sink);
        drop(session);

        let Some(request) = request else {
            return;
        };

        let outcome = self.backend.create_customer(&request).await;

        let mut session = self.session.lock().await;
        session.finish_customer(outcome, sink);
    }

    pub async fn submit_job(&self, sink: &mut dyn NotificationSink) {
        let _in_flight = self.in_flight.lock().await;

        let session = self.session.lock().await;
        let job = session.begin_job(sink);
        drop(session);

        let Some((customer_id, payload)) = job else {
            return;
        };

        let outcome = self.backend.create_job(&payload).await;

        let mut session = self.session.lock().await;
        session.finish_job(&customer_id, outcome, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::helpers::builder_gate::SELECT_BUILDER_MESSAGE;
    use crate::helpers::field_store::{PO_NUMBER, SHIP_TO_NAME, SOLD_TO_NAME};
    use crate::helpers::notifications::CollectingSink;
    use crate::integrations::http_client::testing::{
        client, fast_policy, Scripted, ScriptedTransport,
    };
    use crate::integrations::http_client::RequestBody;
    use crate::jobs::submission::ADD_CUSTOMER_FIRST_MESSAGE;
    use serde_json::json;
    use shared_types::{CustomerRecord, WorkflowState};
    use std::time::Duration;
    use tokio::time::Instant;

    fn shared(script: Vec<Scripted>) -> (SharedSession, Arc<ScriptedTransport>) {
        let transport = ScriptedTransport::new(script);
        let backend = Arc::new(BackendClient::new(client(transport.clone())));
        let session = FormSession::new(SessionConfig::default());
        (SharedSession::new(session, backend), transport)
    }

    async fn select_builder(shared: &SharedSession) {
        let builder: CustomerRecord =
            serde_json::from_value(json!({"id": "B-12", "name": "Acme Homes"})).unwrap();
        shared
            .lock()
            .await
            .select_builder(&builder, &mut CollectingSink::new());
    }

    fn extraction_body() -> serde_json::Value {
        json!({
            "customer_name": "Jane Doe",
            "phone": "0249001234",
            "po_number": "PO-5501",
            "scope_of_work": "Restretch carpet in bedroom two",
            "alternate_contacts": [
                {"type": "Site Contact", "name": "Sam Site", "phone": "0400333444"},
                {"type": "Decision Maker", "name": "Dee Maker", "phone": "0400555666"}
            ]
        })
    }

    #[tokio::test]
    async fn test_full_submission_flow() {
        let (shared, transport) = shared(vec![
            Scripted::Respond(200, extraction_body()),
            Scripted::Respond(200, json!({"result": {"customerId": 4411}})),
            Scripted::Respond(200, json!({"job_id": "J-77"})),
        ]);
        select_builder(&shared).await;
        let mut sink = CollectingSink::new();

        let outcome = shared
            .upload_pdf("order.pdf", b"%PDF".to_vec(), false, &mut sink)
            .await;
        assert_eq!(outcome, UploadOutcome::Populated);

        shared.submit_customer(&mut sink).await;
        assert!(shared.lock().await.snapshot().job_submission_enabled);

        shared.submit_job(&mut sink).await;
        assert_eq!(
            shared.lock().await.workflow_state(),
            &WorkflowState::JobCreated(Some("J-77".to_string()))
        );
        assert_eq!(
            &sink.messages()[1..],
            &[
                "Customer created in RFMS! ID: 4411",
                "Job created in RFMS!",
                "Job created with ID: J-77"
            ]
        );

        assert_eq!(
            transport.paths(),
            vec!["/upload-pdf", "/api/create_customer", "/api/export-to-rfms"]
        );
        match &transport.requests()[2].body {
            RequestBody::Json(body) => {
                assert_eq!(body["ship_to"]["id"], "4411");
                assert_eq!(body["sold_to"]["id"], "B-12");
                assert_eq!(body["job_details"]["po_number"], "PO-5501");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_blocked_without_builder() {
        let (shared, transport) = shared(vec![]);
        let mut sink = CollectingSink::new();

        let outcome = shared
            .upload_pdf("order.pdf", b"%PDF".to_vec(), false, &mut sink)
            .await;

        assert_eq!(outcome, UploadOutcome::Blocked);
        assert_eq!(transport.call_count(), 0);
        assert_eq!(sink.messages(), vec![SELECT_BUILDER_MESSAGE]);
    }

    #[tokio::test]
    async fn test_job_without_customer_never_reaches_network() {
        let (shared, transport) = shared(vec![]);
        let mut sink = CollectingSink::new();

        shared.submit_job(&mut sink).await;

        assert_eq!(transport.call_count(), 0);
        assert_eq!(sink.messages(), vec![ADD_CUSTOMER_FIRST_MESSAGE]);
    }

    #[tokio::test]
    async fn test_job_with_empty_po_never_reaches_network() {
        let (shared, transport) = shared(vec![
            Scripted::Respond(200, extraction_body()),
            Scripted::Respond(200, json!({"id": "C-1"})),
        ]);
        select_builder(&shared).await;
        let mut sink = CollectingSink::new();

        shared
            .upload_pdf("order.pdf", b"%PDF".to_vec(), false, &mut sink)
            .await;
        shared.submit_customer(&mut sink).await;
        shared.lock().await.update_field(PO_NUMBER, "", &mut sink);
        sink.drain();

        shared.submit_job(&mut sink).await;

        assert_eq!(transport.call_count(), 2);
        assert_eq!(
            sink.messages(),
            vec!["Please complete the following required fields: PO Number"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_field_edit_not_blocked_by_hanging_upload() {
        let (shared, transport) = shared(vec![Scripted::Hang, Scripted::Hang, Scripted::Hang]);
        select_builder(&shared).await;
        let start = Instant::now();
        let mut upload_sink = CollectingSink::new();

        let (outcome, edited_after) = tokio::join!(
            shared.upload_pdf("order.pdf", b"%PDF".to_vec(), false, &mut upload_sink),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                shared
                    .lock()
                    .await
                    .update_field(SHIP_TO_NAME, "Typed while uploading", &mut CollectingSink::new());
                (start.elapsed(), transport.call_count())
            }
        );

        let (elapsed, calls_so_far) = edited_after;
        assert!(elapsed < fast_policy().timeout);
        assert_eq!(calls_so_far, 1);
        assert_eq!(outcome, UploadOutcome::Failed);
        assert_eq!(transport.call_count(), 3);
        assert_eq!(
            shared.lock().await.fields().get(SHIP_TO_NAME),
            "Typed while uploading"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_customer_waits_for_upload_in_flight() {
        let (shared, transport) = shared(vec![
            Scripted::Hang,
            Scripted::Respond(200, extraction_body()),
            Scripted::Respond(200, json!({"id": "C-7"})),
        ]);
        select_builder(&shared).await;
        let mut upload_sink = CollectingSink::new();
        let mut customer_sink = CollectingSink::new();

        let (outcome, ()) = tokio::join!(
            shared.upload_pdf("order.pdf", b"%PDF".to_vec(), false, &mut upload_sink),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                shared.submit_customer(&mut customer_sink).await;
            }
        );

        assert_eq!(outcome, UploadOutcome::Populated);
        assert_eq!(
            transport.paths(),
            vec!["/upload-pdf", "/upload-pdf", "/api/create_customer"]
        );
        assert_eq!(
            shared.lock().await.workflow_state(),
            &WorkflowState::CustomerCreated("C-7".to_string())
        );
    }

    #[tokio::test]
    async fn test_search_results_carry_labels() {
        let (shared, _) = shared(vec![Scripted::Respond(
            200,
            json!([{"id": 12, "name": "Acme Homes"}, {"customer_source_id": "77", "business_name": "Beta Build"}]),
        )]);
        let mut sink = CollectingSink::new();

        let results = shared.search_builders("ac", &mut sink).await;

        let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Acme Homes", "Beta Build"]);
        assert_eq!(results[1].customer.identifier(), "77");
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn test_search_rejection_message() {
        let (shared, _) = shared(vec![Scripted::Respond(200, json!({"error": "Search offline"}))]);
        let mut sink = CollectingSink::new();

        let results = shared.search_builders("ac", &mut sink).await;

        assert!(results.is_empty());
        assert_eq!(sink.messages(), vec!["Error: Search offline"]);
        assert!(shared.lock().await.fields().get(SOLD_TO_NAME).is_empty());
    }
}
