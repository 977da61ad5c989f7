//! HTTP handlers for the registration journey

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use beacon_registration::registration::USE_INDEX_KEY;
use beacon_registration::{FormSubmission, Registration, RegistrationState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::{
    cache::RegistrationCache,
    error::ApiError,
    gateway::BeaconsApi,
    page::{self, PageOutcome, PAGE_PREFIX},
    pages::{self, APPLICATION_COMPLETE, FIRST_PAGE},
    session::{self, NoSession, SessionProvider, SubmissionId},
    submission::{self, SubmissionOutcome},
};

/// Shared application state
pub struct AppState {
    pub cache: Arc<dyn RegistrationCache>,
    pub beacons_api: Arc<dyn BeaconsApi>,
    pub sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    /// State with nobody signed in
    pub fn new(cache: Arc<dyn RegistrationCache>, beacons_api: Arc<dyn BeaconsApi>) -> Self {
        Self {
            cache,
            beacons_api,
            sessions: Arc::new(NoSession),
        }
    }

    pub fn with_sessions(mut self, sessions: Arc<dyn SessionProvider>) -> Self {
        self.sessions = sessions;
        self
    }
}

/// Summary shown before submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckYourAnswersResponse {
    pub state: RegistrationState,
    pub registration: Registration,
    /// The registration flattened once per use
    pub uses: Vec<FormSubmission>,
}

/// Body returned when the backend did not accept the registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFailedResponse {
    pub beacon_registered: bool,
    pub reference_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCompleteQuery {
    #[serde(default)]
    pub reference_number: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCompleteResponse {
    pub state: RegistrationState,
    pub reference_number: String,
}

fn page_location(page: &str) -> String {
    format!("{}/{}", PAGE_PREFIX, page)
}

fn find_page(slug: &str) -> Result<&'static page::PageDefinition, ApiError> {
    pages::find(slug).ok_or_else(|| ApiError::not_found(format!("Unknown page: {}", slug)))
}

fn requested_use_index(query: &HashMap<String, String>) -> usize {
    query
        .get(USE_INDEX_KEY)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "registration-service"
    }))
}

/// Start page: make sure the browser has a submission cookie, then begin the journey
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let redirect = Redirect::to(&page_location(FIRST_PAGE));

    if let Some(submission_id) = session::submission_id_from(&headers) {
        state.cache.get(&submission_id).await?;
        return Ok(redirect.into_response());
    }

    let submission_id = session::new_submission_id();
    state.cache.get(&submission_id).await?;
    info!("Started registration for submission: {}", submission_id);

    Ok((
        [(header::SET_COOKIE, session::submission_cookie(&submission_id))],
        redirect,
    )
        .into_response())
}

pub async fn page_get_handler(
    State(state): State<Arc<AppState>>,
    SubmissionId(submission_id): SubmissionId,
    Path(slug): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let page = find_page(&slug)?;

    let view = page::handle_get(
        state.cache.as_ref(),
        page,
        &submission_id,
        requested_use_index(&query),
    )
    .await?;

    Ok(Json(view).into_response())
}

pub async fn page_post_handler(
    State(state): State<Arc<AppState>>,
    SubmissionId(submission_id): SubmissionId,
    Path(slug): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Form(mut form_data): Form<FormSubmission>,
) -> Result<Response, ApiError> {
    let page = find_page(&slug)?;

    if let Some(use_index) = query.get(USE_INDEX_KEY) {
        form_data
            .entry(USE_INDEX_KEY.to_string())
            .or_insert_with(|| use_index.clone());
    }

    let outcome =
        page::handle_post(state.cache.as_ref(), page, &submission_id, form_data).await?;

    Ok(match outcome {
        PageOutcome::Render(view) => Json(view).into_response(),
        PageOutcome::Redirect(location) => Redirect::to(&location).into_response(),
    })
}

pub async fn check_your_answers_handler(
    State(state): State<Arc<AppState>>,
    SubmissionId(submission_id): SubmissionId,
) -> Result<Json<CheckYourAnswersResponse>, ApiError> {
    let registration = state.cache.get(&submission_id).await?;
    let uses = (0..registration.uses().len())
        .map(|use_index| registration.flattened(use_index))
        .collect();

    Ok(Json(CheckYourAnswersResponse {
        state: RegistrationState::ReadyForSubmission,
        registration,
        uses,
    }))
}

pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    SubmissionId(submission_id): SubmissionId,
) -> Result<Response, ApiError> {
    let outcome = submission::submit_registration(
        state.cache.as_ref(),
        state.beacons_api.as_ref(),
        state.sessions.as_ref(),
        &submission_id,
    )
    .await?;

    Ok(match outcome {
        SubmissionOutcome::Registered { reference_number } => Redirect::to(&format!(
            "{}?referenceNumber={}",
            page_location(APPLICATION_COMPLETE),
            reference_number
        ))
        .into_response(),
        SubmissionOutcome::Failed => (
            StatusCode::OK,
            Json(SubmissionFailedResponse {
                beacon_registered: false,
                reference_number: String::new(),
            }),
        )
            .into_response(),
    })
}

pub async fn application_complete_handler(
    Query(query): Query<ApplicationCompleteQuery>,
) -> Json<ApplicationCompleteResponse> {
    Json(ApplicationCompleteResponse {
        state: RegistrationState::Submitted,
        reference_number: query.reference_number,
    })
}
