//! The Order resource and its service.
//!
//! Orders are created by the storefront, so the service only reads and
//! updates them. Monetary amounts travel as strings, matching the
//! WooCommerce wire format.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{Error, HttpClient, HttpMethod, HttpRequest};
use crate::resources::common::{Address, ListParams, MetaData};
use crate::resources::ListPage;

pub(crate) const ORDERS_PATH: &str = "/wp-json/dokan/v1/orders/";

/// The status of an order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

/// A tax line on an order or line item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub rate_code: String,
    #[serde(default)]
    pub rate_id: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub compound: bool,
    #[serde(default)]
    pub tax_total: String,
    #[serde(default)]
    pub shipping_tax_total: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// A purchased item on an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub product_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<u64>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tax_class: String,
    #[serde(default)]
    pub subtotal: String,
    #[serde(default)]
    pub subtotal_tax: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub total_tax: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxes: Vec<TaxLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A shipping charge on an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub method_title: String,
    #[serde(default)]
    pub method_id: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub total_tax: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxes: Vec<TaxLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// An additional fee on an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tax_class: String,
    #[serde(default)]
    pub tax_status: String,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub total_tax: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxes: Vec<TaxLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// A coupon applied to an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CouponLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub discount: String,
    #[serde(default)]
    pub discount_tax: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// A refund issued against an order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(default)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(default)]
    pub total: String,
}

/// An order placed with a seller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub number: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub order_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_via: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created_gmt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified_gmt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub discount_total: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub discount_tax: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shipping_total: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shipping_tax: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cart_tax: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub total: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub total_tax: String,
    #[serde(default)]
    pub prices_include_tax: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub customer_ip_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub customer_user_agent: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub customer_note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payment_method_title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transaction_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_paid: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_paid_gmt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_completed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_completed_gmt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cart_hash: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_lines: Vec<TaxLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fee_lines: Vec<FeeLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coupon_lines: Vec<CouponLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refunds: Vec<Refund>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// Filters accepted by the order list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderListParams {
    #[serde(flatten)]
    pub list: ListParams,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_after: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_before: Option<DateTime<Utc>>,
}

/// The fields an order update may change.
///
/// Everything is optional; omitted fields are left untouched by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fee_lines: Vec<FeeLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coupon_lines: Vec<CouponLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub meta_data: Vec<MetaData>,
}

/// Counts returned by the order summary endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OrderSummary {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub totals: HashMap<String, u64>,
    #[serde(default)]
    pub status_counts: HashMap<OrderStatus, u64>,
}

/// Service for the `/wp-json/dokan/v1/orders` endpoints.
///
/// Obtained from [`DokanClient::orders`](crate::DokanClient::orders).
#[derive(Clone, Debug)]
pub struct OrdersService {
    http: Arc<HttpClient>,
}

impl OrdersService {
    pub(crate) const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Retrieves a single order by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the order does not exist.
    pub async fn get(&self, id: u64) -> Result<Order, Error> {
        let request = HttpRequest::builder(HttpMethod::Get, format!("{ORDERS_PATH}{id}")).build();

        let response = self.http.request(request).await?;
        response.json()
    }

    /// Lists orders, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Query`] if the parameters cannot be encoded (before
    /// any network I/O), or the classified [`Error`] on failure.
    pub async fn list(&self, params: Option<&OrderListParams>) -> Result<ListPage<Order>, Error> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, ORDERS_PATH);
        if let Some(params) = params {
            builder = builder.query(params)?;
        }

        let response = self.http.request(builder.build()).await?;
        let items: Vec<Order> = response.json()?;
        Ok(ListPage::new(
            items,
            &response,
            params.and_then(|p| p.list.page),
            params.and_then(|p| p.list.per_page),
        ))
    }

    /// Updates an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the order does not exist.
    pub async fn update(&self, id: u64, update: &OrderUpdate) -> Result<Order, Error> {
        let request = HttpRequest::builder(HttpMethod::Put, format!("{ORDERS_PATH}{id}"))
            .json_body(update)?
            .build();

        let response = self.http.request(request).await?;
        response.json()
    }

    /// Retrieves the seller's order counts grouped by status.
    ///
    /// # Errors
    ///
    /// Returns the classified [`Error`] on failure.
    pub async fn summary(&self) -> Result<OrderSummary, Error> {
        let request =
            HttpRequest::builder(HttpMethod::Get, "/wp-json/dokan/v1/orders/summary").build();

        let response = self.http.request(request).await?;
        response.json()
    }
}
