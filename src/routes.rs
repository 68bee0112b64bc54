use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(team_routes())
        .merge(group_routes())
        .merge(stadium_routes())
        .merge(stage_routes())
        .merge(match_routes())
        .merge(ticket_routes())
        .merge(quiz_routes())
        .merge(extra_routes())
        .merge(user_routes(state.clone()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(30)))
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth", post(auth::request_code))
        .route("/api/auth/verify-otp", post(auth::verify_otp))
}

fn team_routes() -> Router<AppState> {
    use handlers::{favorites, players, teams};

    Router::new()
        // favorites, addressed from the team side
        .route("/api/teams/fav", post(favorites::follow).delete(favorites::unfollow))
        .route("/api/teams/fav/:user_id", get(favorites::list_followed_teams))
        // teams
        .route("/api/teams", post(teams::create_team).get(teams::list_teams))
        .route("/api/teams/add-to-group", post(teams::add_to_group))
        .route("/api/teams/remove-from-group", post(teams::remove_from_group))
        .route(
            "/api/teams/:team_id",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        // squad, nested under the team
        .route(
            "/api/teams/:team_id/players",
            post(players::create_player).get(players::list_players),
        )
        .route(
            "/api/teams/:team_id/players/:player_id",
            get(players::get_player)
                .put(players::update_player)
                .delete(players::delete_player),
        )
}

fn group_routes() -> Router<AppState> {
    use handlers::groups;

    Router::new()
        .route("/api/groups", post(groups::create_group).get(groups::list_groups))
        .route(
            "/api/groups/:group_id",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
}

fn stadium_routes() -> Router<AppState> {
    use handlers::stadiums;

    Router::new()
        .route(
            "/api/stadiums",
            post(stadiums::create_stadium).get(stadiums::list_stadiums),
        )
        .route(
            "/api/stadiums/:stadium_id",
            get(stadiums::get_stadium)
                .put(stadiums::update_stadium)
                .delete(stadiums::delete_stadium),
        )
}

fn stage_routes() -> Router<AppState> {
    use handlers::stages;

    Router::new()
        .route("/api/stages", post(stages::create_stage).get(stages::list_stages))
        .route(
            "/api/stages/:stage_id",
            get(stages::get_stage)
                .put(stages::update_stage)
                .delete(stages::delete_stage),
        )
}

fn match_routes() -> Router<AppState> {
    use handlers::matches;

    Router::new()
        .route(
            "/api/matches",
            post(matches::create_match).get(matches::list_matches),
        )
        .route(
            "/api/matches/:match_id",
            get(matches::get_match)
                .put(matches::update_match)
                .delete(matches::delete_match),
        )
}

fn ticket_routes() -> Router<AppState> {
    use handlers::{ticket_categories, tickets};

    Router::new()
        .route(
            "/api/tickets",
            post(tickets::create_ticket).get(tickets::list_tickets),
        )
        .route(
            "/api/tickets/:ticket_id",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route(
            "/api/ticket-categories",
            post(ticket_categories::create_category).get(ticket_categories::list_categories),
        )
        .route(
            "/api/ticket-categories/:category_id",
            get(ticket_categories::get_category)
                .put(ticket_categories::update_category)
                .delete(ticket_categories::delete_category),
        )
}

fn quiz_routes() -> Router<AppState> {
    use handlers::{answers, questions, quizzes};

    Router::new()
        .route("/api/quiz", post(quizzes::create_quiz).get(quizzes::list_quizzes))
        .route("/api/quiz/points", post(quizzes::award_points))
        .route("/api/quiz/questions", post(questions::create_question))
        .route(
            "/api/quiz/questions/:question_id",
            put(questions::update_question).delete(questions::delete_question),
        )
        .route("/api/quiz/answers", post(answers::create_answer))
        .route(
            "/api/quiz/answers/:answer_id",
            put(answers::update_answer).delete(answers::delete_answer),
        )
        .route("/api/quiz/:quiz_id/leaderboard", get(quizzes::leaderboard))
        .route(
            "/api/quiz/:quiz_id",
            get(quizzes::get_quiz)
                .put(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
}

fn extra_routes() -> Router<AppState> {
    use handlers::{deals, spot_categories, spots};

    Router::new()
        .route(
            "/api/extra/spots",
            post(spots::create_spot).get(spots::list_spots),
        )
        .route(
            "/api/extra/spots/:spot_id",
            get(spots::get_spot)
                .put(spots::update_spot)
                .delete(spots::delete_spot),
        )
        .route(
            "/api/extra/spot-categories",
            post(spot_categories::create_category).get(spot_categories::list_categories),
        )
        .route(
            "/api/extra/spot-categories/:category_id",
            get(spot_categories::get_category)
                .put(spot_categories::update_category)
                .delete(spot_categories::delete_category),
        )
        .route(
            "/api/extra/good-deals",
            post(deals::create_deal).get(deals::list_deals),
        )
        .route(
            "/api/extra/good-deals/:deal_id",
            get(deals::get_deal)
                .put(deals::update_deal)
                .delete(deals::delete_deal),
        )
}

/// User-scoped routes require a verified access token.
fn user_routes(state: AppState) -> Router<AppState> {
    use handlers::favorites;

    Router::new()
        .route("/api/user/fav-teams/follow", post(favorites::follow))
        .route("/api/user/fav-teams/unfollow", post(favorites::unfollow))
        .route("/api/user/fav-teams", post(favorites::list_followed))
        .route("/api/user/fav-teams/:team_id", post(favorites::get_followed))
        .route_layer(from_fn_with_state(state, require_auth))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "FanXp API",
        "version": version,
        "endpoints": {
            "auth": "/api/auth, /api/auth/verify-otp (public)",
            "teams": "/api/teams[/:team_id], /api/teams/:team_id/players[/:player_id]",
            "groups": "/api/groups[/:group_id]",
            "stadiums": "/api/stadiums[/:stadium_id]",
            "stages": "/api/stages[/:stage_id]",
            "matches": "/api/matches[/:match_id]",
            "tickets": "/api/tickets[/:ticket_id], /api/ticket-categories[/:category_id]",
            "quiz": "/api/quiz[/:quiz_id], /api/quiz/questions, /api/quiz/answers, /api/quiz/points",
            "extra": "/api/extra/spots, /api/extra/spot-categories, /api/extra/good-deals",
            "user": "/api/user/fav-teams (protected)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
