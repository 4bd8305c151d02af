use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use shared_types::{
    CustomerRecord, CustomerSearchRequest, CustomerSearchResponse, FieldUpdateRequest,
    SessionResponse,
};

use super::AppState;
use crate::helpers::notifications::CollectingSink;
use crate::jobs::FormSession;

fn session_response(session: &FormSession, mut sink: CollectingSink) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        session: session.snapshot(),
        notifications: sink.drain(),
    })
}

pub async fn get_session(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let session = state.session.lock().await;

    Ok(session_response(&session, CollectingSink::new()))
}

/// First evaluation of the builder gate, sent once by the UI when it loads
pub async fn init_session(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut session = state.session.lock().await;
    let mut sink = CollectingSink::new();

    session.refresh_builder_gate(&mut sink);

    Ok(session_response(&session, sink))
}

pub async fn update_field(
    state: web::Data<AppState>,
    request: web::Json<FieldUpdateRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    let mut session = state.session.lock().await;
    let mut sink = CollectingSink::new();

    session.update_field(&request.field_id, &request.value, &mut sink);

    Ok(session_response(&session, sink))
}

pub async fn search_builders(
    state: web::Data<AppState>,
    request: web::Json<CustomerSearchRequest>,
) -> ActixResult<HttpResponse> {
    let mut sink = CollectingSink::new();

    let customers = state.session.search_builders(&request.term, &mut sink).await;

    Ok(HttpResponse::Ok().json(CustomerSearchResponse {
        customers,
        notifications: sink.drain(),
    }))
}

pub async fn select_builder(
    state: web::Data<AppState>,
    customer: web::Json<CustomerRecord>,
) -> ActixResult<HttpResponse> {
    let mut session = state.session.lock().await;
    let mut sink = CollectingSink::new();

    session.select_builder(&customer, &mut sink);

    Ok(session_response(&session, sink))
}

pub async fn clear_builder(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut session = state.session.lock().await;
    let mut sink = CollectingSink::new();

    session.clear_builder(&mut sink);

    Ok(session_response(&session, sink))
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
    #[serde(default)]
    pub confirm_mismatch: bool,
}

pub async fn upload_pdf(
    state: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    if body.is_empty() {
        return Err(actix_web::error::ErrorBadRequest("No PDF file in request body"));
    }

    let query = query.into_inner();
    let file_name = query.filename.unwrap_or_else(|| "upload.pdf".to_string());

    let mut sink = CollectingSink::new();

    state
        .session
        .upload_pdf(&file_name, body.to_vec(), query.confirm_mismatch, &mut sink)
        .await;

    let session = state.session.lock().await;
    Ok(session_response(&session, sink))
}

pub async fn clear_extracted(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut session = state.session.lock().await;
    let mut sink = CollectingSink::new();

    session.clear_extracted(&mut sink);

    Ok(session_response(&session, sink))
}

pub async fn submit_customer(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut sink = CollectingSink::new();

    state.session.submit_customer(&mut sink).await;

    let session = state.session.lock().await;
    Ok(session_response(&session, sink))
}

pub async fn submit_job(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let mut sink = CollectingSink::new();

    state.session.submit_job(&mut sink).await;

    let session = state.session.lock().await;
    Ok(session_response(&session, sink))
}
