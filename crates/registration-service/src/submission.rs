//! Final submission of a cached registration

use rand::Rng;
use tracing::{info, warn};

use crate::cache::RegistrationCache;
use crate::error::Result;
use crate::gateway::BeaconsApi;
use crate::session::SessionProvider;

const REFERENCE_NUMBER_LENGTH: usize = 7;
const REFERENCE_NUMBER_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Result of trying to register a beacon with the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Registered { reference_number: String },
    Failed,
}

pub fn generate_reference_number() -> String {
    let mut rng = rand::thread_rng();
    (0..REFERENCE_NUMBER_LENGTH)
        .map(|_| {
            let index = rng.gen_range(0..REFERENCE_NUMBER_CHARSET.len());
            REFERENCE_NUMBER_CHARSET[index] as char
        })
        .collect()
}

/// Send the registration cached under `submission_id` to the backend.
///
/// A rejected or failed request leaves the cache untouched so the user can
/// try again; only cache errors are returned as `Err`.
pub async fn submit_registration(
    cache: &dyn RegistrationCache,
    beacons_api: &dyn BeaconsApi,
    sessions: &dyn SessionProvider,
    submission_id: &str,
) -> Result<SubmissionOutcome> {
    let mut registration = cache.get(submission_id).await?;

    let reference_number = generate_reference_number();
    registration.set_reference_number(reference_number.clone());

    let account_holder_id = sessions
        .current_session(submission_id)
        .await
        .map(|session| session.account_holder_id);
    registration.set_account_holder_id(account_holder_id);

    match beacons_api
        .send_registration(&registration.serialise_to_api())
        .await
    {
        Ok(()) => {
            cache.clear(submission_id).await?;
            info!("Registered beacon with reference number: {}", reference_number);
            Ok(SubmissionOutcome::Registered { reference_number })
        }
        Err(err) => {
            warn!("Failed to register beacon: {}", err);
            Ok(SubmissionOutcome::Failed)
        }
    }
}
