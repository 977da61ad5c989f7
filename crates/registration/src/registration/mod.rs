//! The registration being built up across page submissions

mod beacon_use;
mod records;

pub use beacon_use::{Activity, BeaconUse, Environment};
pub use records::{
    Aircraft, BeaconDetails, Communications, EmergencyContact, LandActivities, OwnerDetails,
    UseDetails, Vessel,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// Name/value pairs from a submitted page, or a flattened registration
pub type FormSubmission = BTreeMap<String, String>;

/// Form key that selects which use a page edits
pub const USE_INDEX_KEY: &str = "useIndex";

const EMERGENCY_CONTACT_COUNT: usize = 3;

/// Lifecycle of a registration.
///
/// Only `Empty` and `InProgress` are derived from the registration itself;
/// the other two are reported by whoever drives the check-your-answers and
/// submission steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationState {
    Empty,
    InProgress,
    ReadyForSubmission,
    Submitted,
}

/// One in-progress beacon registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    beacon: BeaconDetails,
    #[serde(default)]
    owner: OwnerDetails,
    #[serde(default)]
    emergency_contacts: [EmergencyContact; EMERGENCY_CONTACT_COUNT],
    #[serde(default = "default_uses")]
    uses: Vec<BeaconUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_holder_id: Option<String>,
}

fn default_uses() -> Vec<BeaconUse> {
    vec![BeaconUse::main()]
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            beacon: BeaconDetails::default(),
            owner: OwnerDetails::default(),
            emergency_contacts: Default::default(),
            uses: default_uses(),
            account_holder_id: None,
        }
    }
}

/// The use index a submission asks for; absent or unparseable reads as 0.
pub fn use_index_of(form_data: &FormSubmission) -> usize {
    form_data
        .get(USE_INDEX_KEY)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

impl Registration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn beacon(&self) -> &BeaconDetails {
        &self.beacon
    }

    pub fn owner(&self) -> &OwnerDetails {
        &self.owner
    }

    pub fn emergency_contacts(&self) -> &[EmergencyContact] {
        &self.emergency_contacts
    }

    pub fn uses(&self) -> &[BeaconUse] {
        &self.uses
    }

    pub fn account_holder_id(&self) -> Option<&str> {
        self.account_holder_id.as_deref()
    }

    pub fn state(&self) -> RegistrationState {
        if *self == Self::default() {
            RegistrationState::Empty
        } else {
            RegistrationState::InProgress
        }
    }

    /// Merge a page submission into the registration.
    ///
    /// Known beacon, owner and emergency contact keys overwrite their fields;
    /// known use keys overwrite fields of the use selected by `useIndex`.
    /// Use keys are ignored when `useIndex` is absent. Unknown keys are
    /// dropped and fields missing from `form_data` are left alone.
    pub fn update(&mut self, form_data: &FormSubmission) {
        for (key, value) in form_data {
            self.set_scalar(key, value);
        }

        if !form_data.contains_key(USE_INDEX_KEY) {
            return;
        }

        let index = self.resolve_use_index(use_index_of(form_data));
        let beacon_use = &mut self.uses[index];
        for (key, value) in form_data {
            beacon_use.set(key, value);
        }
    }

    fn set_scalar(&mut self, key: &str, value: &str) -> bool {
        if self.beacon.set(key, value) || self.owner.set(key, value) {
            return true;
        }
        match EmergencyContact::parse_key(key) {
            Some((index, suffix)) => self.emergency_contacts[index].set(suffix, value),
            None => false,
        }
    }

    /// Clamp a requested use index to the uses that exist.
    pub fn resolve_use_index(&self, requested: usize) -> usize {
        requested.min(self.uses.len() - 1)
    }

    /// Append an empty, non-main use and return its index.
    pub fn create_use(&mut self) -> usize {
        self.uses.push(BeaconUse::default());
        self.uses.len() - 1
    }

    /// Scalar fields plus the fields of one use, keyed by form field name.
    pub fn flattened(&self, use_index: usize) -> FormSubmission {
        let beacon_use = &self.uses[self.resolve_use_index(use_index)];

        let mut flattened: FormSubmission = self
            .beacon
            .entries()
            .chain(self.owner.entries())
            .chain(beacon_use.entries())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        for (index, contact) in self.emergency_contacts.iter().enumerate() {
            for suffix in EmergencyContact::SUFFIXES {
                let value = contact.get(suffix).unwrap_or_default();
                flattened.insert(EmergencyContact::key(index, suffix), value.to_string());
            }
        }

        flattened
    }

    pub fn set_reference_number(&mut self, reference_number: impl Into<String>) {
        self.beacon.reference_number = reference_number.into();
    }

    pub fn set_account_holder_id(&mut self, account_holder_id: Option<String>) {
        self.account_holder_id = account_holder_id;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild a registration from [`to_json`](Self::to_json) output.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut registration: Self = serde_json::from_str(json)?;
        if registration.uses.is_empty() {
            registration.uses = default_uses();
        }
        Ok(registration)
    }
}
