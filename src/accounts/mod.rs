mod dto;
pub mod password;
mod repo;
mod repo_types;
pub mod store;
pub mod validation;

pub use dto::{Ack, NewUser, RegistrationForm, UserPatch};
pub use repo_types::{PublicUser, UserSummary};
pub use store::AccountStore;
pub use validation::{validate_patch, validate_registration, ValidationError};
