/**
 * API Routes
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/register`
 * - `POST /api/auth/login`
 *
 * ## Authenticated (bearer token)
 * - `GET /api/auth/me`
 * - `GET /api/auth/users`, `/api/auth/users/active`, `/api/auth/users/inactive`
 * - `GET /api/auth/user/{id}`, `/api/auth/user/active/{id}`, `/api/auth/user/inactive/{id}`
 * - `DELETE /api/auth/user/soft/{id}`
 * - `GET /api/users/profile`
 * - `PUT|DELETE /api/users/profile-picture`
 * - `POST|GET|PUT /api/users/employer/details`
 * - `POST|GET|PUT /api/users/jobseeker/details`
 *
 * ## Admin
 * - `DELETE /api/auth/user/hard/{id}`
 *
 * Middleware is attached with `route_layer`, so unknown paths still fall
 * through to the 404 handler instead of answering 401.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::handlers::{
    get_active_user, get_inactive_user, get_me, get_user, hard_delete_user, list_active_users,
    list_inactive_users, list_users, login, register, soft_delete_user,
};
use crate::backend::middleware::{auth_middleware, require_admin};
use crate::backend::profiles::handlers::{
    create_employer_details, create_jobseeker_details, delete_profile_picture,
    get_employer_details, get_jobseeker_details, get_profile, update_employer_details,
    update_jobseeker_details, upload_profile_picture, UPLOAD_BODY_LIMIT,
};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Needs the state up front because the auth middleware reads the token
/// service and role source from it.
pub fn configure_api_routes(router: Router<AppState>, state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let admin = Router::new()
        .route("/api/auth/user/hard/{id}", delete(hard_delete_user))
        .route_layer(middleware::from_fn(require_admin));

    let protected = Router::new()
        // Accounts
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/users", get(list_users))
        .route("/api/auth/users/active", get(list_active_users))
        .route("/api/auth/users/inactive", get(list_inactive_users))
        .route("/api/auth/user/{id}", get(get_user))
        .route("/api/auth/user/active/{id}", get(get_active_user))
        .route("/api/auth/user/inactive/{id}", get(get_inactive_user))
        .route("/api/auth/user/soft/{id}", delete(soft_delete_user))
        // Profiles
        .route("/api/users/profile", get(get_profile))
        .route(
            "/api/users/profile-picture",
            put(upload_profile_picture)
                .delete(delete_profile_picture)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/users/employer/details",
            post(create_employer_details)
                .get(get_employer_details)
                .put(update_employer_details),
        )
        .route(
            "/api/users/jobseeker/details",
            post(create_jobseeker_details)
                .get(get_jobseeker_details)
                .put(update_jobseeker_details),
        )
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    router.merge(public).merge(protected)
}
