//! The main Dokan API client.
//!
//! [`DokanClient`] wires the resource services over one shared
//! [`HttpClient`], so every call — regardless of resource — flows through
//! the same authentication, retry, and error-classification pipeline.

use std::sync::Arc;

use crate::clients::HttpClient;
use crate::config::{DokanConfig, DokanConfigBuilder};
use crate::resources::orders::OrdersService;
use crate::resources::products::ProductsService;
use crate::resources::stores::StoresService;

/// An authenticated client for a Dokan marketplace.
///
/// Cheap to share: the client holds no per-call state, so any number of
/// concurrent calls may run against the same instance (clone it or wrap it
/// in an `Arc` to move across tasks).
///
/// # Example
///
/// ```rust,ignore
/// use dokan_api::{BaseUrl, Credentials, DokanClient};
/// use dokan_api::resources::{Product, ProductStatus, ProductType};
///
/// let client = DokanClient::new(
///     DokanClient::builder()
///         .base_url(BaseUrl::new("https://marketplace.example.com")?)
///         .credentials(Credentials::basic("shop-manager", "app-password"))
///         .build()?,
/// );
///
/// let product = Product {
///     name: "Example Product".to_string(),
///     product_type: ProductType::Simple,
///     regular_price: "29.99".to_string(),
///     status: ProductStatus::Publish,
///     ..Product::default()
/// };
///
/// let created = client.products().create(&product).await?;
/// println!("Created product with ID: {}", created.id.unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct DokanClient {
    http: Arc<HttpClient>,
    products: ProductsService,
    orders: OrdersService,
    stores: StoresService,
}

// Verify DokanClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DokanClient>();
};

impl DokanClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created (see
    /// [`HttpClient::new`]).
    #[must_use]
    pub fn new(config: DokanConfig) -> Self {
        let http = Arc::new(HttpClient::new(config));
        Self {
            products: ProductsService::new(Arc::clone(&http)),
            orders: OrdersService::new(Arc::clone(&http)),
            stores: StoresService::new(Arc::clone(&http)),
            http,
        }
    }

    /// Returns a configuration builder; pass the result to [`Self::new`].
    #[must_use]
    pub fn builder() -> DokanConfigBuilder {
        DokanConfig::builder()
    }

    /// The products service.
    #[must_use]
    pub const fn products(&self) -> &ProductsService {
        &self.products
    }

    /// The orders service.
    #[must_use]
    pub const fn orders(&self) -> &OrdersService {
        &self.orders
    }

    /// The stores service.
    #[must_use]
    pub const fn stores(&self) -> &StoresService {
        &self.stores
    }

    /// The underlying HTTP client, for endpoints without a typed wrapper.
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::config::BaseUrl;

    fn create_test_client() -> DokanClient {
        DokanClient::new(
            DokanClient::builder()
                .base_url(BaseUrl::new("https://shop.test").unwrap())
                .credentials(Credentials::basic("user", "pass"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_services_share_one_http_client() {
        let client = create_test_client();
        assert_eq!(client.http().base_url(), "https://shop.test");

        // Cloning the client keeps pointing at the same transport.
        let cloned = client.clone();
        assert_eq!(cloned.http().base_url(), client.http().base_url());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DokanClient>();
    }
}
