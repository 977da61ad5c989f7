//! Submission cookie and the account session seen at submission time

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, Method},
    response::Redirect,
};
use uuid::Uuid;

/// Cookie carrying the registration cache key
pub const SUBMISSION_COOKIE: &str = "submissionId";

/// Page that issues the cookie
pub const START_PAGE: &str = "/";

pub fn new_submission_id() -> String {
    Uuid::new_v4().to_string()
}

/// `Set-Cookie` value for a freshly issued submission id
pub fn submission_cookie(submission_id: &str) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Strict",
        SUBMISSION_COOKIE, submission_id
    )
}

/// Read the submission id from the request's `Cookie` headers.
pub fn submission_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, value)| *name == SUBMISSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Extractor for routes that need a registration in progress.
///
/// Without the cookie the request is sent back to the start page, which
/// issues one. Form posts are redirected with `303 See Other` so the browser
/// follows up with a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionId(pub String);

impl<S> FromRequestParts<S> for SubmissionId
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        submission_id_from(&parts.headers)
            .map(SubmissionId)
            .ok_or_else(|| {
                tracing::debug!("No submission cookie, redirecting to start page");
                if parts.method == Method::GET {
                    Redirect::temporary(START_PAGE)
                } else {
                    Redirect::to(START_PAGE)
                }
            })
    }
}

/// A signed-in account holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub account_holder_id: String,
}

/// Source of the signed-in account, if any
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self, submission_id: &str) -> Option<UserSession>;
}

/// Nobody is ever signed in
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSession;

#[async_trait]
impl SessionProvider for NoSession {
    async fn current_session(&self, _submission_id: &str) -> Option<UserSession> {
        None
    }
}
