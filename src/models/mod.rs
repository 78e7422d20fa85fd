pub mod envelope;
pub mod github;
pub mod user;

pub use envelope::ResultEnvelope;
pub use github::{ApiProfile, ApiUser};
pub use user::{Direction, IdentityKey, RelationshipSet, UserIdentity, UserProfile};
