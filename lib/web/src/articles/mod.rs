use crate::AppState;
use axum::routing::get;
use axum::Router;

mod crud;
mod record;
mod representations;
mod search;

pub fn create_article_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(crud::handle_list_articles).post(crud::handle_create_article),
        )
        .route(
            "/articles/{id}",
            get(crud::handle_get_article)
                .put(crud::handle_update_article)
                .delete(crud::handle_delete_article),
        )
        .route(
            "/articles/{id}/metadata",
            get(representations::handle_metadata),
        )
        .route("/articles/{id}/rdf", get(representations::handle_turtle))
        .route("/articles/{id}/jsonld", get(representations::handle_json_ld))
        .route("/articles/{id}/rdfa", get(representations::handle_rdfa))
        .route("/articles/{id}/qrcode", get(representations::handle_qr_code))
        .route(
            "/articles/{id}/recommendations",
            get(search::handle_recommendations),
        )
        .route(
            "/search",
            get(search::handle_search_articles).post(crate::provenance::handle_search),
        )
        .route("/statistics", get(search::handle_statistics))
}
