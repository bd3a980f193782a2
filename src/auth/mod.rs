pub mod claims;
pub mod error;
pub mod guard;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

pub use claims::{check_permissions, Audience, Claims};
pub use error::AuthError;
pub use guard::AuthGuard;
pub use jwks::{InMemoryKeySource, KeySource, RemoteJwks, SigningKey};
pub use middleware::{AuthenticatedUser, RequirePermission};
pub use verifier::{bearer_token, TokenVerifier};
