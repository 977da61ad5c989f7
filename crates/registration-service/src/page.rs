//! Page request handling
//!
//! Every form page goes through the same cycle. A GET loads the cached
//! registration, flattens the use being edited and shows a pristine form. A
//! POST merges the submission into the cache, validates the submitted values
//! with a dirty form, then either re-renders the page with errors or redirects
//! to the next page.

use beacon_registration::registration::{use_index_of, USE_INDEX_KEY};
use beacon_registration::{FormJson, FormManager, FormSubmission, Registration};
use serde::Serialize;
use tracing::debug;

use crate::cache::RegistrationCache;
use crate::error::Result;

/// Path prefix shared by the registration pages
pub const PAGE_PREFIX: &str = "/register-a-beacon";

pub type FormBuilder = fn(&FormSubmission) -> FormManager;
pub type Transform = fn(FormSubmission) -> FormSubmission;
pub type NextPage = fn(&mut Registration, usize) -> Destination;

/// Where a valid submission goes next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub page: &'static str,
    pub use_index: usize,
}

impl Destination {
    pub fn new(page: &'static str, use_index: usize) -> Self {
        Self { page, use_index }
    }

    pub fn location(&self) -> String {
        format!("{}/{}?{}={}", PAGE_PREFIX, self.page, USE_INDEX_KEY, self.use_index)
    }
}

/// One form page of the registration journey
pub struct PageDefinition {
    pub slug: &'static str,
    /// Builds the page's form from field values
    pub form: FormBuilder,
    /// Normalises a submission before it is stored and validated
    pub transform: Option<Transform>,
    /// Picks the next page once a submission is valid. It may modify the
    /// registration, which is then written back to the cache.
    pub next: NextPage,
}

/// Everything needed to render a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub form: FormJson,
    pub flattened_registration: FormSubmission,
    pub use_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Render(PageView),
    Redirect(String),
}

pub async fn handle_get(
    cache: &dyn RegistrationCache,
    page: &PageDefinition,
    submission_id: &str,
    requested_use_index: usize,
) -> Result<PageView> {
    let registration = cache.get(submission_id).await?;
    let use_index = registration.resolve_use_index(requested_use_index);
    let flattened_registration = registration.flattened(use_index);

    Ok(PageView {
        form: (page.form)(&flattened_registration).serialise(),
        flattened_registration,
        use_index,
    })
}

/// Handle a page submission. `form_data` carries `useIndex` when the page
/// edits a particular use, otherwise the first use is edited.
pub async fn handle_post(
    cache: &dyn RegistrationCache,
    page: &PageDefinition,
    submission_id: &str,
    mut form_data: FormSubmission,
) -> Result<PageOutcome> {
    form_data
        .entry(USE_INDEX_KEY.to_string())
        .or_insert_with(|| "0".to_string());

    // Unticked checkboxes are not submitted at all.
    for name in (page.form)(&FormSubmission::new()).field_names() {
        form_data.entry(name.to_string()).or_default();
    }

    if let Some(transform) = page.transform {
        form_data = transform(form_data);
    }

    cache.update(submission_id, &form_data).await?;
    let mut registration = cache.get(submission_id).await?;
    let use_index = registration.resolve_use_index(use_index_of(&form_data));

    let form = (page.form)(&form_data).mark_as_dirty();
    if form.has_errors() {
        debug!("Invalid submission of {} page", page.slug);
        return Ok(PageOutcome::Render(PageView {
            form: form.serialise(),
            flattened_registration: registration.flattened(use_index),
            use_index,
        }));
    }

    let before = registration.clone();
    let destination = (page.next)(&mut registration, use_index);
    if registration != before {
        cache.set(submission_id, &registration).await?;
    }

    let location = destination.location();
    debug!("Valid submission of {} page, redirecting to {}", page.slug, location);
    Ok(PageOutcome::Redirect(location))
}
