//! Authentication Handlers Module
//!
//! HTTP handlers for the `/api/auth` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── me.rs        - Get current user handler
//! └── accounts.rs  - Listing, lookup and deletion
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`get_me`** - GET /api/auth/me
//! - **`list_users`**, **`list_active_users`**, **`list_inactive_users`**
//! - **`get_user`**, **`get_active_user`**, **`get_inactive_user`**
//! - **`soft_delete_user`**, **`hard_delete_user`**

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Account listing, lookup and deletion
pub mod accounts;

pub use types::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, Registration};

pub use accounts::{
    get_active_user, get_inactive_user, get_user, hard_delete_user, list_active_users,
    list_inactive_users, list_users, soft_delete_user,
};
pub use login::login;
pub use me::get_me;
pub use register::register;
