//! Synchronous client state for Med Alliance.
//!
//! This crate holds everything that can change without awaiting the backend:
//! the filter store and its selection controller, the lookup cache, the
//! validation rule set, the global error channel, the success notice timer
//! and the profile form. The async edit controller lives in `medalliance-engine`.

mod filter;
mod form;
mod lookup;
pub mod notifications;
mod notice;
mod selection;
pub mod validation;

pub use filter::{FilterAction, FilterState, RowExpansion};
pub use form::{ProfileForm, ProfileStore};
pub use lookup::{LookupCache, LookupState};
pub use notice::{SUCCESS_MESSAGE, SUCCESS_NOTICE_DURATION, SuccessNotice};
pub use notifications::ErrorChannel;
pub use selection::{CategoryOptions, FilterSelection};
pub use validation::{Check, FieldRule, RuleSet, ValidationError};
