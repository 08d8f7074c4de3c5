use std::sync::Arc;

use oms_auth::SessionVerifier;
use oms_config::OmsConfig;
use oms_core::costing::BarcodeSettings;
use oms_db::service::OmsService;

/// Shared, immutable handles every page receives.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OmsService>,
    pub config: Arc<OmsConfig>,
    pub verifier: Arc<dyn SessionVerifier>,
}

impl AppState {
    pub fn new(
        service: OmsService,
        config: OmsConfig,
        verifier: Arc<dyn SessionVerifier>,
    ) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
            verifier,
        }
    }

    pub fn barcode_settings(&self) -> BarcodeSettings {
        BarcodeSettings {
            app_url: self.config.server.app_url.clone(),
            barcode_service_url: self.config.server.barcode_service_url.clone(),
            default_brand: self.config.general.default_brand.clone(),
        }
    }
}
