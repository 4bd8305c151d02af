pub mod commands;
pub mod payload;
pub mod session;
pub mod submission;

pub use commands::SharedSession;
pub use session::{FormSession, UploadOutcome};
pub use submission::{JobRequirements, Workflow, WorkflowError};
