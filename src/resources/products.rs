//! The Product resource and its service.
//!
//! Products follow the WooCommerce conventions: prices travel as strings,
//! timestamps as RFC 3339, and enumerated fields as fixed lowercase wire
//! constants.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Error, HttpClient, HttpMethod, HttpRequest};
use crate::resources::common::{ListParams, MetaData};
use crate::resources::ListPage;

pub(crate) const PRODUCTS_PATH: &str = "/wp-json/dokan/v1/products/";

/// The type of a product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Grouped,
    External,
    Variable,
}

/// The publication status of a product.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Pending,
    Publish,
}

/// Where a product is visible in the catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogVisibility {
    #[default]
    Visible,
    Catalog,
    Search,
    Hidden,
}

/// A category a product belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A tag attached to a product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTag {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// An image attached to a product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub src: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// A product attribute such as size or color.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub variation: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A product in the marketplace.
///
/// Server-populated fields (`id`, `permalink`, timestamps, `price`) are
/// `None` until the product has been created. Construct new products with
/// struct-update syntax over [`Product::default`]:
///
/// ```rust
/// use dokan_api::resources::{Product, ProductStatus, ProductType};
///
/// let product = Product {
///     name: "Example Product".to_string(),
///     product_type: ProductType::Simple,
///     regular_price: "29.99".to_string(),
///     status: ProductStatus::Publish,
///     ..Product::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created_gmt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified_gmt: Option<DateTime<Utc>>,
    #[serde(default, rename = "type")]
    pub product_type: ProductType,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub catalog_visibility: CatalogVisibility,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_on_sale_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_on_sale_from_gmt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_on_sale_to: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_on_sale_to_gmt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_sale: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchasable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sales: Option<u64>,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    #[serde(default)]
    pub downloadable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<ProductCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ProductTag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ProductImage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ProductAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_attributes: Vec<ProductAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grouped_products: Vec<u64>,
    #[serde(default)]
    pub menu_order: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// Filters accepted by the product list endpoint.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<ProductStatus>,
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty")]
    pub product_type: Vec<ProductType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

/// Counts returned by the product summary endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProductSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub published: u64,
    #[serde(default)]
    pub draft: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub featured: u64,
}

/// Service for the `/wp-json/dokan/v1/products` endpoints.
///
/// Obtained from [`DokanClient::products`](crate::DokanClient::products);
/// every operation runs through the shared retry pipeline.
#[derive(Clone, Debug)]
pub struct ProductsService {
    http: Arc<HttpClient>,
}

impl ProductsService {
    pub(crate) const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Creates a new product in the marketplace.
    ///
    /// # Errors
    ///
    /// Returns the classified [`Error`] on failure; a 400 with a structured
    /// payload surfaces as [`Error::Api`] with the server's code.
    pub async fn create(&self, product: &Product) -> Result<Product, Error> {
        let request = HttpRequest::builder(HttpMethod::Post, PRODUCTS_PATH)
            .json_body(product)?
            .build();

        let response = self.http.request(request).await?;
        response.json()
    }

    /// Retrieves a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the product does not exist.
    pub async fn get(&self, id: u64) -> Result<Product, Error> {
        let request =
            HttpRequest::builder(HttpMethod::Get, format!("{PRODUCTS_PATH}{id}")).build();

        let response = self.http.request(request).await?;
        response.json()
    }

    /// Lists products, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] if the parameters cannot be encoded (before
    /// any network I/O), or the classified [`Error`] on failure.
    pub async fn list(
        &self,
        params: Option<&ProductListParams>,
    ) -> Result<ListPage<Product>, Error> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, PRODUCTS_PATH);
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

    /// Updates an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the product does not exist.
    pub async fn update(&self, id: u64, product: &Product) -> Result<Product, Error> {
        let request = HttpRequest::builder(HttpMethod::Put, format!("{PRODUCTS_PATH}{id}"))
            .json_body(product)?
            .build();

        let response = self.http.request(request).await?;
        response.json()
    }

    /// Deletes a product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the product does not exist.
    pub async fn delete(&self, id: u64) -> Result<(), Error> {
        let request =
            HttpRequest::builder(HttpMethod::Delete, format!("{PRODUCTS_PATH}{id}")).build();

        self.http.request(request).await?;
        Ok(())
    }

    /// Retrieves the seller's product counts.
    ///
    /// # Errors
    ///
    /// Returns the classified [`Error`] on failure.
    pub async fn summary(&self) -> Result<ProductSummary, Error> {
        let request =
            HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/products/summary").build();

        let response = self.http.request(request).await?;
        response.json()
    }
}
