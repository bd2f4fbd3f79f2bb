use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use pricetrack_core::{
    categories::{CategoryService, CategoryServiceTrait},
    listings::{ListingService, ListingServiceTrait},
    marketplaces::{MarketplaceService, MarketplaceServiceTrait},
    products::{ProductService, ProductServiceTrait},
    users::{NewUser, Role, UserService, UserServiceTrait},
};
use pricetrack_storage_sqlite::{
    categories::CategoryRepository, db, listings::ListingRepository,
    marketplaces::MarketplaceRepository, products::ProductRepository, users::UserRepository,
};

pub struct AppState {
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub product_service: Arc<dyn ProductServiceTrait>,
    pub marketplace_service: Arc<dyn MarketplaceServiceTrait>,
    pub listing_service: Arc<dyn ListingServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    let writer = db::spawn_writer((*pool).clone());

    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let product_repository = Arc::new(ProductRepository::new(pool.clone(), writer.clone()));
    let marketplace_repository = Arc::new(MarketplaceRepository::new(pool.clone(), writer.clone()));
    let listing_repository = Arc::new(ListingRepository::new(pool.clone(), writer.clone()));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));

    let category_service: Arc<dyn CategoryServiceTrait> =
        Arc::new(CategoryService::new(category_repository.clone()));
    let product_service: Arc<dyn ProductServiceTrait> = Arc::new(ProductService::new(
        product_repository.clone(),
        category_repository.clone(),
    ));
    let marketplace_service: Arc<dyn MarketplaceServiceTrait> =
        Arc::new(MarketplaceService::new(marketplace_repository.clone()));
    let listing_service: Arc<dyn ListingServiceTrait> = Arc::new(ListingService::new(
        listing_repository,
        product_repository,
        marketplace_repository,
    ));
    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));

    let jwt_secret = crate::auth::decode_secret_key(&config.jwt_secret)?;
    let auth = Arc::new(AuthManager::new(&jwt_secret, config.token_ttl));

    bootstrap_admin(config, &auth, user_service.as_ref()).await?;

    Ok(Arc::new(AppState {
        category_service,
        product_service,
        marketplace_service,
        listing_service,
        user_service,
        auth,
    }))
}

/// Creates the initial admin account on an empty user table so the first
/// deployment has a way to log in. Existing users are never touched.
async fn bootstrap_admin(
    config: &Config,
    auth: &AuthManager,
    user_service: &dyn UserServiceTrait,
) -> anyhow::Result<()> {
    if !user_service.get_users()?.is_empty() {
        return Ok(());
    }
    let Some(password) = config.admin_password.as_deref() else {
        tracing::warn!("User table is empty and PT_ADMIN_PASSWORD is not set; no login possible");
        return Ok(());
    };
    let password_hash = auth
        .hash_password(password)
        .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e:?}"))?;
    let admin = user_service
        .create_user(NewUser {
            id: None,
            username: config.admin_username.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await?;
    tracing::info!("Bootstrapped admin user '{}'", admin.username);
    Ok(())
}
