//! The Store resource and its service.
//!
//! Stores are vendor profiles. They are read-only through this API; the
//! service also exposes a store's products and reviews as nested
//! collections.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clients::{Error, HttpClient, HttpMethod, HttpRequest};
use crate::resources::common::{Address, ListParams, Rating};
use crate::resources::products::{Product, ProductListParams};
use crate::resources::ListPage;

pub(crate) const STORES_PATH: &str = "/wp-json/dokan/v1/stores/";

/// A vendor store in the marketplace.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub banner: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gravatar: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shop_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub products_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tocs_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub registered: String,
    #[serde(
        default,
        rename = "payment",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub payment_methods: HashMap<String, HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub social: HashMap<String, String>,
}

/// Filters accepted by the store list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// A customer review of a store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub product_id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub reviewer_email: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub rating: u32,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub date_created_gmt: String,
}

/// Filters accepted by the store reviews endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReviewListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
}

/// Service for the `/wp-json/dokan/v1/stores` endpoints.
///
/// Obtained from [`DokanClient::stores`](crate::DokanClient::stores).
#[derive(Clone, Debug)]
pub struct StoresService {
    http: Arc<HttpClient>,
}

impl StoresService {
    pub(crate) const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Retrieves a single store by vendor ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the store does not exist.
    pub async fn get(&self, vendor_id: u64) -> Result<Store, Error> {
        let request =
            HttpRequest::builder(HttpMethod::Get, format!("{STORES_PATH}{vendor_id}")).build();

        let response = self.http.request(request).await?;
        response.json()
    }

    /// Lists stores, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] if the parameters cannot be encoded (before
    /// any network I/O), or the classified [`Error`] on failure.
    pub async fn list(&self, params: Option<&StoreListParams>) -> Result<ListPage<Store>, Error> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, STORES_PATH);
        if let Some(params) = params {
            builder = builder.query(params)?;
        }

        let response = self.http.request(builder.build()).await?;
        let items: Vec<Store> = response.json()?;
        Ok(ListPage::new(
            items,
            &response,
            params.and_then(|p| p.list.page),
            params.and_then(|p| p.list.per_page),
        ))
    }

    /// Lists the products of a specific store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the store does not exist.
    pub async fn products(
        &self,
        vendor_id: u64,
        params: Option<&ProductListParams>,
    ) -> Result<ListPage<Product>, Error> {
        let mut builder =
            HttpRequest::builder(HttpMethod::Get, format!("{STORES_PATH}{vendor_id}/products"));
        if let Some(params) = params {
            builder = builder.query(params)?;
        }

        let response = self.http.request(builder.build()).await?;
        let items: Vec<Product> = response.json()?;
        Ok(ListPage::new(
            items,
            &response,
            params.and_then(|p| p.list.page),
            params.and_then(|p| p.list.per_page),
        ))
    }

    /// Lists the reviews of a specific store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the store does not exist.
    pub async fn reviews(
        &self,
        vendor_id: u64,
        params: Option<&ReviewListParams>,
    ) -> Result<ListPage<Review>, Error> {
        let mut builder =
            HttpRequest::builder(HttpMethod::Get, format!("{STORES_PATH}{vendor_id}/reviews"));
        if let Some(params) = params {
            builder = builder.query(params)?;
        }

        let response = self.http.request(builder.build()).await?;
        let items: Vec<Review> = response.json()?;
        Ok(ListPage::new(
            items,
            &response,
            params.and_then(|p| p.list.page),
            params.and_then(|p| p.list.per_page),
        ))
    }
}
