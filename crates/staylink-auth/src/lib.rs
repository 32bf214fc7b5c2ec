//! Authentication for StayLink — credential hashing, session tokens, and
//! the identity & access resolver that gates every authenticated request.

pub mod jwt;
pub mod password;
pub mod resolver;

pub use jwt::{Claims, IssuedToken, TokenError, TokenIssuer};
pub use password::PasswordHasher;
pub use resolver::{AccessResolver, MarketplaceActor};
