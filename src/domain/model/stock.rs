use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Stock availability facet. Either supplied by the server or derived from `quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 3] = [
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "instock" => Ok(StockStatus::InStock),
            "lowstock" => Ok(StockStatus::LowStock),
            "outofstock" => Ok(StockStatus::OutOfStock),
            _ => Err(format!("unknown stock status '{}'", s)),
        }
    }
}

/// Quantity thresholds used to derive a status when the server does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    /// Quantities strictly below this (and above zero) are "Low Stock".
    pub low_stock_below: u32,
}

impl StatusPolicy {
    pub fn new(low_stock_below: u32) -> Self {
        Self { low_stock_below }
    }

    pub fn derive(&self, quantity: u32) -> StockStatus {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity < self.low_stock_below {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self { low_stock_below: 10 }
    }
}

/// Which field the multi-select grouping facet reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetField {
    #[default]
    Category,
    Supplier,
}

impl FacetField {
    pub fn label(&self) -> &'static str {
        match self {
            FacetField::Category => "category",
            FacetField::Supplier => "supplier",
        }
    }
}

/// A stock record as served by the inventory backend.
///
/// Both observed backend shapes decode into this type: `name`/`product_name`,
/// `price`/`unit_price` and `lastUpdated`/`updated_at` are accepted interchangeably.
/// Encoding always uses the camelCase shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    #[serde(alias = "product_name", alias = "productName")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "supplierName",
        alias = "supplier",
        alias = "supplier_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub supplier: Option<String>,
    #[serde(default, alias = "supplier_id", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, alias = "unit_price", alias = "unitPrice")]
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
    #[serde(
        default,
        alias = "updated_at",
        alias = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<String>,
}

impl StockItem {
    /// The server-provided status when present, otherwise the status derived by `policy`.
    pub fn effective_status(&self, policy: &StatusPolicy) -> StockStatus {
        self.status.unwrap_or_else(|| policy.derive(self.quantity))
    }

    pub fn facet_value(&self, field: FacetField) -> Option<&str> {
        match field {
            FacetField::Category => self.category.as_deref(),
            FacetField::Supplier => self.supplier.as_deref(),
        }
    }
}

/// Fields a client sends when creating or fully replacing a stock record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockDraft {
    #[serde(default, alias = "product_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "supplierName",
        alias = "supplier",
        skip_serializing_if = "Option::is_none"
    )]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, alias = "unit_price", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: u32,
}

impl StockDraft {
    pub fn facet_value(&self, field: FacetField) -> Option<&str> {
        match field {
            FacetField::Category => self.category.as_deref(),
            FacetField::Supplier => self.supplier.as_deref(),
        }
    }

    /// Materializes the draft as a record with a server-assigned id and timestamp.
    pub fn into_item(self, id: String, last_updated: String, policy: &StatusPolicy) -> StockItem {
        StockItem {
            status: Some(policy.derive(self.quantity)),
            id,
            name: self.name,
            category: self.category,
            supplier: self.supplier,
            supplier_id: self.supplier_id,
            cost: self.cost,
            price: self.price.unwrap_or_default(),
            quantity: self.quantity,
            last_updated: Some(last_updated),
        }
    }
}

impl From<&StockItem> for StockDraft {
    fn from(item: &StockItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            supplier: item.supplier.clone(),
            supplier_id: item.supplier_id.clone(),
            cost: item.cost,
            price: Some(item.price),
            quantity: item.quantity,
        }
    }
}
