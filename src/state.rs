//! Process-wide application state shared with every handler.

use crate::{
    auth::{AdminDomain, ClientDomain, PasswordHasher, TokenService},
    config::Config,
    db::DbPool,
    services::code_allocator::{CodeAllocator, CodeFormat},
};
use std::time::Duration;

/// Built once at startup from [`Config`] and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub client_tokens: TokenService<ClientDomain>,
    pub admin_tokens: TokenService<AdminDomain>,
    pub hasher: PasswordHasher,
    pub client_codes: CodeAllocator,
    pub access_key_codes: CodeAllocator,
    pub unit_of_work_timeout: Duration,
}

impl AppState {
    pub fn new(pool: DbPool, config: &Config) -> Self {
        let ttl = chrono::Duration::hours(config.token_ttl_hours);
        let allocator = |format: CodeFormat| {
            CodeAllocator::new(
                format,
                config.code_allocation_attempts,
                config.code_insert_retries,
            )
        };

        Self {
            pool,
            client_tokens: TokenService::new(&config.jwt_secret, ttl),
            admin_tokens: TokenService::new(&config.admin_jwt_secret, ttl),
            hasher: PasswordHasher::new(config.bcrypt_cost),
            client_codes: allocator(CodeFormat::CLIENT_CODE),
            access_key_codes: allocator(CodeFormat::ACCESS_KEY),
            unit_of_work_timeout: config.unit_of_work_timeout(),
        }
    }
}
