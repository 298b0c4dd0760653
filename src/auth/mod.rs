/*
* Access control surfaces invoked on every request. Both are deliberate
* placeholders: authorization permits everything and authentication never
* resolves a user, so every endpoint is public until a real system is
* plugged in here.
*/

pub mod authz;
pub mod security;

pub use authz::AuthzEngine;
pub use security::{current_user, verify_access, AuthenticatedUser};
