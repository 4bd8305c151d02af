//! Typed calls against the extraction / customer / job backend

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{
    BackendStatus, CustomerRecord, CustomerSearchRequest, ExtractionResult, JobCreatedResponse,
    JobSubmissionPayload, NewCustomerRequest,
};
use thiserror::Error;

use super::customer_response::{self, CustomerCreation};
use super::http_client::{BackendRequest, Method, NetworkError, RequestBody, ResilientClient};

pub const UPLOAD_PATH: &str = "/upload-pdf";
pub const CUSTOMER_SEARCH_PATH: &str = "/api/customers/search";
pub const CREATE_CUSTOMER_PATH: &str = "/api/create_customer";
pub const CREATE_JOB_PATH: &str = "/api/export-to-rfms";
pub const STATUS_PATH: &str = "/api/check_status";
pub const SALESPERSON_PATH: &str = "/api/salesperson_values";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// 2xx response whose body carries an `error` field
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn user_message(&self, operation: &str) -> String {
        match self {
            BackendError::Network(err) => err.user_message(operation),
            other => other.to_string(),
        }
    }
}

pub struct BackendClient {
    http: ResilientClient,
}

impl BackendClient {
    pub fn new(http: ResilientClient) -> Self {
        Self { http }
    }

    /// Send a PDF to the extraction service. An `error` field in a 2xx body
    /// is returned as [`BackendError::Rejected`].
    pub async fn extract_pdf(
        &self,
        file_name: &str,
        pdf: Vec<u8>,
        builder_name: &str,
    ) -> Result<ExtractionResult, BackendError> {
        let request = BackendRequest {
            method: Method::Post,
            path: UPLOAD_PATH.to_string(),
            body: RequestBody::Multipart {
                file_field: "pdf_file".to_string(),
                file_name: file_name.to_string(),
                file_bytes: pdf,
                text_fields: vec![("builder_name".to_string(), builder_name.to_string())],
            },
        };

        let response = self.http.call(&request).await?;
        let extraction: ExtractionResult = decode(&response.body)?;

        if let Some(error) = extraction.error.clone() {
            return Err(BackendError::Rejected(error));
        }

        tracing::info!(
            contacts = extraction.alternate_contacts.len(),
            extra_phones = extraction.extra_phones.len(),
            mismatch = extraction.builder_mismatch_warning.is_some(),
            "Extraction completed"
        );

        Ok(extraction)
    }

    pub async fn search_customers(&self, term: &str) -> Result<Vec<CustomerRecord>, BackendError> {
        let request = BackendRequest::post_json(
            CUSTOMER_SEARCH_PATH,
            &CustomerSearchRequest {
                term: term.to_string(),
            },
        )?;

        let response = self.http.call(&request).await?;
        let body: Value = decode(&response.body)?;

        if let Some(error) = error_field(&body) {
            return Err(BackendError::Rejected(error));
        }

        serde_json::from_value(body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Create the ship-to customer. Any 2xx body is classified, never rejected.
    pub async fn create_customer(
        &self,
        customer: &NewCustomerRequest,
    ) -> Result<CustomerCreation, BackendError> {
        let request = BackendRequest::post_json(CREATE_CUSTOMER_PATH, customer)?;
        let response = self.http.call(&request).await?;
        Ok(customer_response::classify(&response.body))
    }

    /// Create the job. A missing or non-JSON body still counts as created.
    pub async fn create_job(
        &self,
        payload: &JobSubmissionPayload,
    ) -> Result<JobCreatedResponse, BackendError> {
        let request = BackendRequest::post_json(CREATE_JOB_PATH, payload)?;
        let response = self.http.call(&request).await?;
        Ok(serde_json::from_slice(&response.body).unwrap_or_default())
    }

    pub async fn check_status(&self) -> Result<BackendStatus, BackendError> {
        let response = self.http.call(&BackendRequest::get(STATUS_PATH)).await?;
        let body: Value = decode(&response.body)?;

        match body.get("status").and_then(Value::as_str) {
            Some("online") => Ok(BackendStatus::Online),
            _ => Ok(BackendStatus::Offline),
        }
    }

    pub async fn salesperson_values(&self) -> Result<Vec<String>, BackendError> {
        let response = self.http.call(&BackendRequest::get(SALESPERSON_PATH)).await?;
        decode(&response.body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|e| BackendError::Decode(e.to_string()))
}

fn error_field(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(shared_types::loose::scalar_to_string)
}
