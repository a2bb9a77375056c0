use serde::{Deserialize, Serialize};

use crate::domain::{OrderKey, ProductKey, Role};

/// Body of a successful POST /token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub role: Role,
    pub name: String,
}

/// JSON body for POST /register. The remote API expects camelCase keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Aggregate sales indicators from GET /kpis. The upstream aggregate
/// omits fields when the filtered window is empty, so all of them
/// default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    #[serde(rename = "TotalVentas", default)]
    pub total_sales: f64,
    #[serde(rename = "TotalPedidos", default)]
    pub total_orders: i64,
    #[serde(rename = "TicketPromedio", default)]
    pub average_ticket: f64,
}

/// One month of the financial series from GET /analisis-financiero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialPeriod {
    #[serde(rename = "Mes")]
    pub month: String,
    #[serde(rename = "Ventas")]
    pub sales: f64,
    #[serde(rename = "Costos")]
    pub costs: f64,
    #[serde(rename = "Ganancia")]
    pub profit: f64,
}

/// One row of GET /admin/rentabilidad-categoria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfit {
    #[serde(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "GananciaNeta")]
    pub net_profit: f64,
}

/// One row of GET /top-clientes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomer {
    #[serde(rename = "Cliente")]
    pub company: String,
    #[serde(rename = "TotalComprado")]
    pub total_purchased: f64,
}

/// One flat geographic record from GET /admin/geo-clientes. Several
/// records may share a country; the drill-down hierarchy is built
/// client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRecord {
    #[serde(rename = "Pais")]
    pub country: String,
    #[serde(rename = "Estado")]
    pub region: String,
    #[serde(rename = "TotalClientes")]
    pub customer_count: u64,
}

/// One row of GET /ultimas-ordenes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "OrderKey")]
    pub order_key: OrderKey,
    #[serde(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "Cliente")]
    pub company: String,
    #[serde(rename = "Total")]
    pub total: f64,
}

/// One catalog entry from GET /productos or GET /destacados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "ProductKey")]
    pub product_key: ProductKey,
    #[serde(rename = "ProductName")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Subcategory", default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,
}

/// One past order from GET /mis-compras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(rename = "OrderKey")]
    pub order_key: OrderKey,
    #[serde(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "CantidadItems")]
    pub item_count: u32,
    #[serde(rename = "Total")]
    pub total: f64,
}
