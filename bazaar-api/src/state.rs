use std::sync::Arc;

use bazaar_checkout::CheckoutEngine;
use bazaar_domain::repository::OrderStore;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CheckoutEngine>,
    pub store: Arc<dyn OrderStore>,
}
