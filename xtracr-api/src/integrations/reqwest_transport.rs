use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::http_client::{
    BackendRequest, BackendResponse, Method, NetworkError, RequestBody, Transport,
};

/// [`Transport`] backed by a shared reqwest client
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(concat!("xtracr-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NetworkError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> NetworkError {
    if err.is_timeout() {
        NetworkError::Timeout
    } else {
        NetworkError::Transport(err.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, NetworkError> {
        let url = self.url(&request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart {
                file_field,
                file_name,
                file_bytes,
                text_fields,
            } => {
                let file_part = Part::bytes(file_bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str("application/pdf")
                    .map_err(map_reqwest_error)?;
                let mut form = Form::new().part(file_field.clone(), file_part);
                for (name, value) in text_fields {
                    form = form.text(name.clone(), value.clone());
                }
                builder.multipart(form)
            }
        };

        tracing::debug!(url = %url, "Sending backend request");

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        Ok(BackendResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body: body.to_vec(),
        })
    }
}
