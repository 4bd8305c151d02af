pub mod backend;
pub mod customer_response;
pub mod http_client;
pub mod reqwest_transport;

pub use backend::{BackendClient, BackendError};
pub use customer_response::{CustomerCreation, CREATED_SENTINEL};
pub use http_client::{
    BackendRequest, BackendResponse, NetworkError, ResilientClient, RetryPolicy, Transport,
};
pub use reqwest_transport::ReqwestTransport;
