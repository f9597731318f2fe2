use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use recipe_store::catalog::memory::PartitionCatalog;
use recipe_store::category::directory::CategoryDirectory;
use recipe_store::recipe::handlers::*;
use recipe_store::recipe::store::RecipeStore;
use recipe_store::recipe::types::Recipe;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "127.0.0.1:8080".parse()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = args[i + 1].parse()?;
                i += 2;
            }
            _ => {
                eprintln!("Usage: {} [--bind <addr:port>]", args[0]);
                eprintln!("Example: {} --bind 0.0.0.0:8080", args[0]);
                std::process::exit(1);
            }
        }
    }

    // 1. Storage substrate:
    let catalog = Arc::new(PartitionCatalog::<Recipe>::new());

    // 2. Partition directory + store:
    let directory = CategoryDirectory::new(catalog.clone());
    let store = Arc::new(RecipeStore::new(catalog.clone(), directory.clone()));

    // 3. HTTP Router:
    let app = Router::new()
        .route(
            "/api/recipes",
            post(handle_create_recipe).get(handle_get_all_recipes),
        )
        .route("/api/recipes/categories", get(handle_list_categories))
        .route("/api/recipes/my-recipes", get(handle_my_recipes))
        .route("/api/recipes/search/advanced", get(handle_advanced_search))
        .route(
            "/api/recipes/search/title/:title",
            get(handle_search_by_title),
        )
        .route(
            "/api/recipes/search/category/:category",
            get(handle_search_by_category),
        )
        .route(
            "/api/recipes/search/cookingTime/:minutes",
            get(handle_search_by_cooking_time),
        )
        .route(
            "/api/recipes/search/ingredient/:ingredient",
            get(handle_search_by_ingredient),
        )
        .route(
            "/api/recipes/category/:category/id/:id",
            get(handle_get_recipe_in_category).delete(handle_delete_recipe_in_category),
        )
        .route(
            "/api/recipes/:id",
            get(handle_get_recipe)
                .put(handle_update_recipe)
                .delete(handle_delete_recipe),
        )
        .layer(Extension(store))
        .layer(Extension(directory));

    // 4. Start HTTP server:
    tracing::info!("Recipe store listening on {}", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
