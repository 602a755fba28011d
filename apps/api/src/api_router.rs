mod cors;


use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use jitaccess_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

use self::cors::build_cors_layer;

pub fn build_router(app_state: AppState, identity_header: &str) -> Result<Router, AppError> {
    let user_routes = Router::new()
        .route("/api/me", get(handlers::user::me_handler))
        .route("/api/user/grants", get(handlers::user::list_grants_handler))
        .route(
            "/api/user/requests",
            get(handlers::user::list_own_requests_handler),
        )
        .route(
            "/api/roles/requestable",
            get(handlers::user::list_requestable_roles_handler),
        )
        .route(
            "/api/requests",
            post(handlers::requests::create_request_handler),
        )
        .route(
            "/api/requests/{request_id}/cancel",
            post(handlers::requests::cancel_request_handler),
        )
        .route(
            "/api/requests/{request_id}/approve",
            post(handlers::requests::approve_request_handler),
        )
        .route(
            "/api/requests/{request_id}/deny",
            post(handlers::requests::deny_request_handler),
        );

    let approver_routes = Router::new()
        .route(
            "/api/approver/pending",
            get(handlers::approver::list_pending_handler),
        )
        .route(
            "/api/approver/requests/{request_id}",
            get(handlers::approver::request_detail_handler),
        )
        .route_layer(from_fn(middleware::require_approver));

    let admin_routes = Router::new()
        .route(
            "/api/admin/stats",
            get(handlers::admin::dashboard_stats_handler),
        )
        .route(
            "/api/admin/lookups",
            get(handlers::admin::lookup_values_handler),
        )
        .route(
            "/api/admin/roles",
            get(handlers::admin::list_roles_handler).post(handlers::admin::create_role_handler),
        )
        .route(
            "/api/admin/roles/{role_id}",
            put(handlers::admin::update_role_handler).delete(handlers::admin::delete_role_handler),
        )
        .route(
            "/api/admin/roles/{role_id}/toggle",
            post(handlers::admin::toggle_role_handler),
        )
        .route(
            "/api/admin/roles/{role_id}/users",
            get(handlers::admin::list_role_users_handler),
        )
        .route(
            "/api/admin/roles/{role_id}/db-roles",
            get(handlers::admin::list_role_db_roles_handler)
                .put(handlers::admin::replace_role_db_roles_handler),
        )
        .route(
            "/api/admin/roles/{role_id}/eligibility-rules",
            get(handlers::admin::list_role_eligibility_rules_handler)
                .put(handlers::admin::replace_role_eligibility_rules_handler),
        )
        .route(
            "/api/admin/db-roles",
            get(handlers::admin::list_available_db_roles_handler),
        )
        .route(
            "/api/admin/teams",
            get(handlers::admin::list_teams_handler).post(handlers::admin::create_team_handler),
        )
        .route(
            "/api/admin/teams/{team_id}",
            put(handlers::admin::update_team_handler).delete(handlers::admin::delete_team_handler),
        )
        .route(
            "/api/admin/teams/{team_id}/members",
            get(handlers::admin::list_team_members_handler)
                .put(handlers::admin::replace_team_members_handler),
        )
        .route("/api/admin/users", get(handlers::admin::list_users_handler))
        .route(
            "/api/admin/users/{user_id}/system-roles",
            put(handlers::admin::update_system_roles_handler),
        )
        .route(
            "/api/admin/audit-logs",
            get(handlers::admin::list_audit_log_handler),
        )
        .route_layer(from_fn(middleware::require_manager));

    let protected_routes = user_routes
        .merge(approver_routes)
        .merge(admin_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_user,
        ));

    let mut public_routes = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/health/ready", get(handlers::health::readiness_handler));
    if app_state.development_mode {
        public_routes = public_routes.route(
            "/api/debug/identity",
            get(handlers::debug::identity_debug_handler),
        );
    }

    let cors_layer = build_cors_layer(&app_state.allowed_origins, identity_header)?;

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::open_request_session,
        ))
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::reject_cross_site_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
