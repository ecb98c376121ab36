//! Typed resources and services for the Dokan REST API.
//!
//! Each service is a thin wrapper over the request pipeline: it builds one
//! [`HttpRequest`](crate::clients::HttpRequest) per operation, sends it
//! through [`HttpClient::request`](crate::clients::HttpClient::request),
//! and decodes the response into the typed resource. Services hold no
//! state of their own.
//!
//! - [`products::ProductsService`]: create/get/list/update/delete products
//! - [`orders::OrdersService`]: get/list/update orders
//! - [`stores::StoresService`]: stores, their products, and their reviews

pub mod common;
pub mod orders;
pub mod products;
pub mod stores;

pub use common::{Address, ListParams, MetaData, Rating};
pub use orders::{
    CouponLine, FeeLine, LineItem, Order, OrderListParams, OrderStatus, OrderSummary, OrderUpdate,
    OrdersService, Refund, ShippingLine, TaxLine,
};
pub use products::{
    CatalogVisibility, Product, ProductAttribute, ProductCategory, ProductImage,
    ProductListParams, ProductStatus, ProductSummary, ProductTag, ProductType, ProductsService,
};
pub use stores::{Review, ReviewListParams, Store, StoreListParams, StoresService};

use crate::clients::HttpResponse;

/// One page of a listed collection.
///
/// Collection endpoints return the page's items in the body and the
/// collection totals in the `X-WP-Total` / `X-WP-TotalPages` headers
/// (absent headers read as 0). The requested page and page size are echoed
/// back when they were part of the query.
///
/// # Example
///
/// ```rust,ignore
/// let page = client.products().list(None).await?;
/// println!("{} of {} products", page.items.len(), page.total_items);
/// for product in &page.items {
///     println!("- {}", product.name);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct ListPage<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total items in the collection, from `X-WP-Total`.
    pub total_items: u64,
    /// Total pages in the collection, from `X-WP-TotalPages`.
    pub total_pages: u64,
    /// The page that was requested, if any.
    pub page: Option<u32>,
    /// The page size that was requested, if any.
    pub per_page: Option<u32>,
}

impl<T> ListPage<T> {
    pub(crate) fn new(
        items: Vec<T>,
        response: &HttpResponse,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Self {
        Self {
            items,
            total_items: response.total_items(),
            total_pages: response.total_pages(),
            page,
            per_page,
        }
    }

    /// Returns `true` when pages remain after the one that was requested.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        u64::from(self.page.unwrap_or(1)) < self.total_pages
    }

    /// Iterates over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for ListPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListPage<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
