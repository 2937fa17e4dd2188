//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use accounts::domain::ports::AccountService;

/// Everything `create_server` needs beyond the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) accounts: Arc<dyn AccountService>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, accounts: Arc<dyn AccountService>) -> Self {
        Self {
            bind_addr,
            accounts,
        }
    }
}
