//! Session orchestration for the Med Alliance client.
//!
//! The pure state lives in `medalliance-core`; this crate adds the parts that
//! talk to the backend:
//!
//! - [`ProfileEditController`] - the one-field-at-a-time inline edit state machine
//! - [`LookupLoader`] - fetch-if-absent loading of lookup collections
//! - [`App`] - a whole session wiring the two to the filter, form and notification stores

mod app;
mod lookups;
mod profile_edit;

pub use app::{App, AppOptions};
pub use lookups::LookupLoader;
pub use profile_edit::{CommitOutcome, EditContext, EditState, ProfileEditController};

pub use medalliance_backend::{BackendError, LookupSource, ProfileBackend};
pub use medalliance_core::{
    CategoryOptions, ErrorChannel, FilterAction, FilterSelection, FilterState, LookupCache,
    LookupState, ProfileForm, ProfileStore, RuleSet, ValidationError,
};
pub use medalliance_types::{FieldKey, FilterCategory, LookupKind, ProfileData};
