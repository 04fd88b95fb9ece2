pub mod claims;
pub mod extractor;
pub mod jwt;
pub mod password;
pub mod utils;

pub use claims::Claims;
pub use extractor::AuthenticatedUser;
pub use jwt::JwtService;
pub use utils::{claims_from_context, require_quiz_owner, require_claims_from_context};
