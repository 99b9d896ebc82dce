use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Router,
    response::Html,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::golf::adapters::inbound::http as golf_http;
use crate::shell::graphql::{AppSchema, schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/players", post(golf_http::add_player).get(golf_http::list_players))
        .route("/players/{player_id}", delete(golf_http::remove_player))
        .route(
            "/players/{player_id}/scorecards",
            get(golf_http::player_scorecards),
        )
        .route(
            "/seasons",
            post(golf_http::create_season).get(golf_http::list_seasons),
        )
        .route(
            "/seasons/{season_id}/locations",
            post(golf_http::add_location).get(golf_http::list_locations),
        )
        .route(
            "/seasons/{season_id}/standings",
            get(golf_http::season_standings),
        )
        .route(
            "/seasons/{season_id}/export",
            get(golf_http::export_season_stats),
        )
        .route("/games", post(golf_http::start_game))
        .route("/games/{game_id}/holes", post(golf_http::record_hole_result))
        .route("/games/{game_id}/finish", post(golf_http::finish_game))
        .route(
            "/courses/{course_id}/rankings",
            get(golf_http::course_rankings),
        )
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema(state.clone())))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
