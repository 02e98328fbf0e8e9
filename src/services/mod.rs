//! Business logic services

pub mod catalog;

/// Container for all services
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with a freshly seeded catalog
    pub fn new() -> Self {
        Self {
            catalog: catalog::CatalogService::new(),
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new()
    }
}
