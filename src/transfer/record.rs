//! Flat, file-facing shapes of the shop entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    client::{Client, NewClient},
    errors::ValidationResult,
    order::{NewOrder, Order, OrderItem, OrderStatus},
    product::{NewProduct, Product},
};

/// Serde adapter storing minor units as a decimal number of major units.
mod major_units {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::domain::money;

    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money::decimal_from_cents(*cents))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        money::cents_from_decimal(amount)
            .ok_or_else(|| de::Error::custom(format!("invalid amount {amount}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    #[serde(rename = "price", with = "major_units")]
    pub price_cents: i64,
    pub category: String,
    #[serde(default)]
    pub stock: i32,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            price_cents: product.price_cents,
            category: product.category.clone(),
            stock: product.stock,
        }
    }
}

impl ProductRecord {
    pub fn into_new_product(self) -> ValidationResult<NewProduct> {
        let payload = NewProduct::new(self.name, self.price_cents, self.category, self.stock)?;
        Ok(match self.id {
            Some(id) => payload.with_id(id),
            None => payload,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    /// Missing dates are filled with the import day.
    #[serde(default)]
    pub registration_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_premium: bool,
}

impl From<&Client> for ClientRecord {
    fn from(client: &Client) -> Self {
        Self {
            id: Some(client.id),
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            registration_date: Some(client.registration_date),
            is_premium: client.is_premium(),
        }
    }
}

impl ClientRecord {
    pub fn into_new_client(self) -> ValidationResult<NewClient> {
        let mut payload = NewClient::new(self.name, self.email, self.phone, self.address)?;

        if let Some(date) = self.registration_date {
            payload = payload.with_registration_date(date);
        }
        if self.is_premium {
            payload = payload.premium();
        }
        if let Some(id) = self.id {
            payload = payload.with_id(id);
        }

        Ok(payload)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub product_id: i32,
    pub quantity: i32,
    #[serde(rename = "unit_price", with = "major_units")]
    pub unit_price_cents: i64,
}

impl From<&OrderItem> for OrderItemRecord {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
        }
    }
}

impl From<OrderItemRecord> for OrderItem {
    fn from(record: OrderItemRecord) -> Self {
        Self {
            product_id: record.product_id,
            quantity: record.quantity,
            unit_price_cents: record.unit_price_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub client_id: i32,
    pub order_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub items: Vec<OrderItemRecord>,
}

pub(crate) fn default_status() -> String {
    OrderStatus::default().as_str().to_string()
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: Some(order.id),
            client_id: order.client_id,
            order_date: order.order_date,
            status: order.status.as_str().to_string(),
            items: order.items.iter().map(OrderItemRecord::from).collect(),
        }
    }
}

impl OrderRecord {
    /// Rebuild the order with the prices recorded in the file.
    pub fn into_new_order(self) -> ValidationResult<NewOrder> {
        let status = self.status.parse::<OrderStatus>()?;
        let items = self.items.into_iter().map(OrderItem::from).collect();

        let payload = NewOrder::from_items(self.client_id, self.order_date, status, items)?;
        Ok(match self.id {
            Some(id) => payload.with_id(id),
            None => payload,
        })
    }
}
