// Application state shared across handlers
use std::sync::Arc;

use crate::{
    app_config::AppConfig,
    services::{AuthService, JwtService},
    store::CredentialStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn CredentialStore>,
    pub jwt_service: Arc<JwtService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wire the services around an already opened store
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
        jwt_service: JwtService,
    ) -> Self {
        let jwt_service = Arc::new(jwt_service);
        let auth_service = Arc::new(AuthService::new(
            store.clone(),
            jwt_service.clone(),
            config.security.bcrypt_cost,
        ));

        Self {
            config: Arc::new(config),
            store,
            jwt_service,
            auth_service,
        }
    }
}
