use std::io::{Read, Write};

use crate::domain::{
    client::ClientListQuery, errors::ValidationResult, order::OrderListQuery,
    product::ProductListQuery,
};
use crate::repository::{
    ClientReader, ClientWriter, OrderReader, OrderWriter, ProductReader, ProductWriter,
    RepositoryResult,
};
use crate::services::ServiceResult;
use crate::transfer::{
    Decoded, EntityKind, Format, ImportFailure, ImportReport, csv_format, json_format,
    record::{ClientRecord, OrderRecord, ProductRecord},
};

/// Write the whole `kind` collection to `writer`. Returns the number of
/// exported records.
pub fn export_entities<R, W>(
    repo: &R,
    kind: EntityKind,
    format: Format,
    writer: W,
) -> ServiceResult<usize>
where
    R: ClientReader + ProductReader + OrderReader + ?Sized,
    W: Write,
{
    let exported = match kind {
        EntityKind::Products => {
            let (_, products) = repo.list_products(ProductListQuery::new())?;
            let records: Vec<ProductRecord> = products.iter().map(ProductRecord::from).collect();
            match format {
                Format::Csv => csv_format::write_products(writer, &records)?,
                Format::Json => json_format::write_records(writer, &records)?,
            }
            records.len()
        }
        EntityKind::Clients => {
            let (_, clients) = repo.list_clients(ClientListQuery::new())?;
            let records: Vec<ClientRecord> = clients.iter().map(ClientRecord::from).collect();
            match format {
                Format::Csv => csv_format::write_clients(writer, &records)?,
                Format::Json => json_format::write_records(writer, &records)?,
            }
            records.len()
        }
        EntityKind::Orders => {
            let (_, orders) = repo.list_orders(OrderListQuery::new())?;
            let records: Vec<OrderRecord> = orders.iter().map(OrderRecord::from).collect();
            match format {
                Format::Csv => csv_format::write_orders(writer, &records)?,
                Format::Json => json_format::write_records(writer, &records)?,
            }
            records.len()
        }
    };

    log::info!("Exported {exported} {kind}");

    Ok(exported)
}

/// Read `kind` records from `reader` and insert them one by one.
///
/// Records that fail to decode, validate or insert are collected in the
/// report; the rest of the batch still goes through. Order imports apply
/// their stock decrements like any new order.
pub fn import_entities<R, Rd>(
    repo: &R,
    kind: EntityKind,
    format: Format,
    reader: Rd,
) -> ServiceResult<ImportReport>
where
    R: ClientWriter + ProductWriter + OrderWriter + ?Sized,
    Rd: Read,
{
    let report = match kind {
        EntityKind::Products => {
            let decoded = match format {
                Format::Csv => csv_format::read_products(reader)?,
                Format::Json => json_format::read_records(reader)?,
            };
            import_records(decoded, ProductRecord::into_new_product, |payload| {
                repo.create_product(payload).map(|_| ())
            })
        }
        EntityKind::Clients => {
            let decoded = match format {
                Format::Csv => csv_format::read_clients(reader)?,
                Format::Json => json_format::read_records(reader)?,
            };
            import_records(decoded, ClientRecord::into_new_client, |payload| {
                repo.create_client(payload).map(|_| ())
            })
        }
        EntityKind::Orders => {
            let decoded = match format {
                Format::Csv => csv_format::read_orders(reader)?,
                Format::Json => json_format::read_records(reader)?,
            };
            import_records(decoded, OrderRecord::into_new_order, |payload| {
                repo.create_order(payload).map(|_| ())
            })
        }
    };

    for failure in &report.failures {
        log::warn!("Skipped {kind} {failure}");
    }
    log::info!(
        "Imported {} {kind}, skipped {}",
        report.imported,
        report.failures.len()
    );

    Ok(report)
}

fn import_records<T, P, C, S>(decoded: Decoded<T>, convert: C, mut store: S) -> ImportReport
where
    C: Fn(T) -> ValidationResult<P>,
    S: FnMut(&P) -> RepositoryResult<()>,
{
    let mut report = ImportReport::default();

    for (index, entry) in decoded.into_iter().enumerate() {
        let position = index + 1;
        let outcome = entry.and_then(|record| {
            let payload =
                convert(record).map_err(|err| ImportFailure::new(position, err.to_string()))?;
            store(&payload).map_err(|err| ImportFailure::new(position, err.to_string()))
        });

        match outcome {
            Ok(()) => report.imported += 1,
            Err(failure) => report.failures.push(failure),
        }
    }

    report
}
