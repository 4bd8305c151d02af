pub mod contact;
pub mod customer;
pub mod extraction;
pub mod job;
pub mod loose;
pub mod reconciled;
pub mod session;

pub use contact::Contact;
pub use customer::{
    CustomerRecord, CustomerSearchRequest, CustomerSearchResult, NewCustomerRequest,
};
pub use extraction::ExtractionResult;
pub use job::{
    AlternateContact, BillingGroup, JobCreatedResponse, JobDetails, JobShipTo,
    JobSubmissionPayload, SoldTo,
};
pub use reconciled::{ReconciledFields, WorkOrderFields};
pub use session::{
    BackendStatus, CustomerSearchResponse, FieldUpdateRequest, Notification, SessionResponse,
    SessionSnapshot, Severity, StatusResponse, WorkflowState, DEFAULT_NOTIFICATION_MS,
};
