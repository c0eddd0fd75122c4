//! Comma separated files with a header row.
//!
//! Prices are written as `12.50`, the premium flag as `1`/`0` and order lines
//! as `product_id:quantity:unit_price` triples joined by `;`.

use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::Trim;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::money;
use crate::transfer::record::{self, ClientRecord, OrderItemRecord, OrderRecord, ProductRecord};
use crate::transfer::{Decoded, ImportFailure, TransferResult};

const PRODUCT_HEADERS: [&str; 5] = ["id", "name", "price", "category", "stock"];
const CLIENT_HEADERS: [&str; 7] = [
    "id",
    "name",
    "email",
    "phone",
    "address",
    "registration_date",
    "is_premium",
];
const ORDER_HEADERS: [&str; 5] = ["id", "client_id", "order_date", "status", "items"];

#[derive(Debug, Serialize, Deserialize)]
struct ProductRow {
    #[serde(default)]
    id: Option<i32>,
    name: String,
    price: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    stock: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClientRow {
    #[serde(default)]
    id: Option<i32>,
    name: String,
    email: String,
    phone: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    registration_date: Option<NaiveDate>,
    #[serde(default)]
    is_premium: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OrderRow {
    #[serde(default)]
    id: Option<i32>,
    client_id: i32,
    order_date: NaiveDate,
    #[serde(default)]
    status: String,
    #[serde(default)]
    items: String,
}

impl From<&ProductRecord> for ProductRow {
    fn from(record: &ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            price: money::format_cents(record.price_cents),
            category: record.category.clone(),
            stock: Some(record.stock),
        }
    }
}

impl TryFrom<ProductRow> for ProductRecord {
    type Error = String;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price_cents =
            money::parse_amount(&row.price).ok_or_else(|| format!("invalid price `{}`", row.price))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price_cents,
            category: row.category,
            stock: row.stock.unwrap_or_default(),
        })
    }
}

impl From<&ClientRecord> for ClientRow {
    fn from(record: &ClientRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            registration_date: record.registration_date,
            is_premium: if record.is_premium { "1" } else { "0" }.to_string(),
        }
    }
}

impl TryFrom<ClientRow> for ClientRecord {
    type Error = String;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let is_premium = parse_flag(&row.is_premium)
            .ok_or_else(|| format!("invalid is_premium value `{}`", row.is_premium))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            registration_date: row.registration_date,
            is_premium,
        })
    }
}

impl From<&OrderRecord> for OrderRow {
    fn from(record: &OrderRecord) -> Self {
        let items = record
            .items
            .iter()
            .map(|item| {
                format!(
                    "{}:{}:{}",
                    item.product_id,
                    item.quantity,
                    money::format_cents(item.unit_price_cents)
                )
            })
            .collect::<Vec<_>>()
            .join(";");

        Self {
            id: record.id,
            client_id: record.client_id,
            order_date: record.order_date,
            status: record.status.clone(),
            items,
        }
    }
}

impl TryFrom<OrderRow> for OrderRecord {
    type Error = String;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items = parse_items(&row.items)?;
        let status = if row.status.trim().is_empty() {
            record::default_status()
        } else {
            row.status
        };

        Ok(Self {
            id: row.id,
            client_id: row.client_id,
            order_date: row.order_date,
            status,
            items,
        })
    }
}

/// `1/0/true/false` in any case; an empty field means `false`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" => Some(false),
        "1" | "true" => Some(true),
        _ => None,
    }
}

fn parse_items(value: &str) -> Result<Vec<OrderItemRecord>, String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || format!("invalid order item `{entry}`");
            let mut parts = entry.split(':').map(str::trim);

            let (Some(product_id), Some(quantity), Some(price), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(invalid());
            };

            Ok(OrderItemRecord {
                product_id: product_id.parse().map_err(|_| invalid())?,
                quantity: quantity.parse().map_err(|_| invalid())?,
                unit_price_cents: money::parse_amount(price).ok_or_else(invalid)?,
            })
        })
        .collect()
}

fn write_rows<W, S>(writer: W, headers: &[&str], rows: impl IntoIterator<Item = S>) -> TransferResult<()>
where
    W: Write,
    S: Serialize,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(headers)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

fn read_rows<R, S, T>(reader: R) -> TransferResult<Decoded<T>>
where
    R: Read,
    S: DeserializeOwned,
    T: TryFrom<S, Error = String>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    // An unreadable header aborts the whole file.
    csv_reader.headers()?;

    let decoded = csv_reader
        .deserialize::<S>()
        .enumerate()
        .map(|(index, row)| {
            let record = index + 1;
            row.map_err(|err| ImportFailure::new(record, err.to_string()))
                .and_then(|row| T::try_from(row).map_err(|err| ImportFailure::new(record, err)))
        })
        .collect();

    Ok(decoded)
}

pub fn write_products<W: Write>(writer: W, records: &[ProductRecord]) -> TransferResult<()> {
    write_rows(writer, &PRODUCT_HEADERS, records.iter().map(ProductRow::from))
}

pub fn read_products<R: Read>(reader: R) -> TransferResult<Decoded<ProductRecord>> {
    read_rows::<R, ProductRow, ProductRecord>(reader)
}

pub fn write_clients<W: Write>(writer: W, records: &[ClientRecord]) -> TransferResult<()> {
    write_rows(writer, &CLIENT_HEADERS, records.iter().map(ClientRow::from))
}

pub fn read_clients<R: Read>(reader: R) -> TransferResult<Decoded<ClientRecord>> {
    read_rows::<R, ClientRow, ClientRecord>(reader)
}

pub fn write_orders<W: Write>(writer: W, records: &[OrderRecord]) -> TransferResult<()> {
    write_rows(writer, &ORDER_HEADERS, records.iter().map(OrderRow::from))
}

pub fn read_orders<R: Read>(reader: R) -> TransferResult<Decoded<OrderRecord>> {
    read_rows::<R, OrderRow, OrderRecord>(reader)
}
