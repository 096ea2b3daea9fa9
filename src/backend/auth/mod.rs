//! Authentication Module
//!
//! Registration, login, identity tokens and role-based access control.
//!
//! # Architecture
//!
//! - **`users`** - account model and its outward views
//! - **`credentials`** - bcrypt hashing and identifier lookup
//! - **`sessions`** - JWT issuance and verification
//! - **`identity`** - the verified caller and role gates
//! - **`service`** - registration and login flows
//! - **`handlers`** - HTTP handlers for `/api/auth`
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password and role → account stored with a
//!    bcrypt hash
//! 2. **Login**: identifier (email, then name) and password → JWT returned
//! 3. **Protected request**: bearer token verified → `Identity` attached to
//!    the request → role gate (if any) → handler
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt; the cost is configurable
//! - Tokens are HS256 JWTs carrying `sub`, `role`, `iat` and `exp`
//! - Tokens expire 24 hours after issuance, with no leeway
//! - Failed logins and bad tokens return uniform 401 bodies

/// User data model
pub mod users;

/// Password hashing and identifier lookup
pub mod credentials;

/// JWT token generation and validation
pub mod sessions;

/// Verified identity and role gates
pub mod identity;

/// Registration and login
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use credentials::PasswordHasher;
pub use identity::{require_any_role, require_role, require_self_or_admin, Identity};
pub use service::AuthService;
pub use sessions::{Claims, TokenService, TOKEN_TTL_HOURS};
pub use users::{User, UserFilter, UserId, UserSummary};
