//! Beacon registration core
//!
//! The state that a multi-page beacon registration form accumulates between
//! page submissions, and the rules that decide whether a page may move on.
//!
//! ## Layers
//!
//! - [`validators`] - data-driven field rules (`required`, `maxLength`, ...)
//! - [`hex_id`] - Cospas-Sarsat hex id decoding used by the UK-encoding rule
//! - [`form`] - conditional field managers aggregated into a page form
//! - [`registration`] - the session-scoped `Registration` aggregate
//! - [`api`] - the wire shape sent to the backend registration API

pub mod api;
pub mod error;
pub mod form;
pub mod hex_id;
pub mod registration;
pub mod validators;

pub use api::{
    AircraftRequest, BeaconRequest, EmergencyContactRequest, LandRequest, OwnerRequest,
    RegistrationRequest, UsePayloadRequest, UseRequest, VesselRequest,
};
pub use error::{Error, Result};
pub use form::{Condition, Dirty, FieldJson, FieldManager, FormJson, FormManager, SummaryItem};
pub use registration::{
    Activity, BeaconUse, EmergencyContact, Environment, FormSubmission, Registration,
    RegistrationState,
};
pub use validators::{RuleKind, ValidationRule};
