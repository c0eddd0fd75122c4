//! Command line grammar of the `shop-manager` binary.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::transfer::{EntityKind, Format, TransferError};

pub const USAGE: &str = "\
usage: shop-manager <command>

commands:
  clients [term]                 list clients, optionally filtered
  products [term]                list products, optionally filtered
  orders                         list every order
  order <id>                     show one order with its payable total
  status <id> <status>           set an order status (pending, processing, completed, cancelled)
  report top-clients [limit]     clients ranked by order count
  report sales-by-date           order count and revenue per day
  report product-sales           units and revenue per product
  report categories              units and revenue per category
  report top-products [limit]    best sellers by units sold
  report links                   units bought per client and product
  report range <start> <end>     sales summary between two YYYY-MM-DD dates
  export <entity> <format> <path>
  import <entity> <format> <path>
                                 entity: clients, products or orders; format: csv or json";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("missing command")]
    MissingCommand,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("invalid {name} `{value}`")]
    InvalidArgument { name: &'static str, value: String },
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCommand {
    TopClients { limit: Option<usize> },
    SalesByDate,
    ProductSales,
    Categories,
    TopProducts { limit: Option<usize> },
    Links,
    Range { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Clients { term: Option<String> },
    Products { term: Option<String> },
    Orders,
    Order { id: i32 },
    Status { id: i32, status: String },
    Report(ReportCommand),
    Export { kind: EntityKind, format: Format, path: PathBuf },
    Import { kind: EntityKind, format: Format, path: PathBuf },
}

struct Args<I: Iterator<Item = String>> {
    inner: I,
}

impl<I: Iterator<Item = String>> Args<I> {
    fn required(&mut self, name: &'static str) -> Result<String, CliError> {
        self.inner.next().ok_or(CliError::MissingArgument(name))
    }

    fn optional(&mut self) -> Option<String> {
        self.inner.next()
    }

    fn parsed<T: FromStr>(&mut self, name: &'static str) -> Result<T, CliError> {
        let value = self.required(name)?;
        parse_value(name, value)
    }

    fn optional_parsed<T: FromStr>(&mut self, name: &'static str) -> Result<Option<T>, CliError> {
        self.optional()
            .map(|value| parse_value(name, value))
            .transpose()
    }

    fn finish(mut self) -> Result<(), CliError> {
        match self.inner.next() {
            Some(extra) => Err(CliError::UnexpectedArgument(extra)),
            None => Ok(()),
        }
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: String) -> Result<T, CliError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| CliError::InvalidArgument { name, value })
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args {
        inner: args.into_iter(),
    };

    let command = args.optional().ok_or(CliError::MissingCommand)?;
    let parsed = match command.as_str() {
        "clients" => Command::Clients {
            term: args.optional(),
        },
        "products" => Command::Products {
            term: args.optional(),
        },
        "orders" => Command::Orders,
        "order" => Command::Order {
            id: args.parsed("id")?,
        },
        "status" => Command::Status {
            id: args.parsed("id")?,
            status: args.required("status")?,
        },
        "report" => Command::Report(parse_report(&mut args)?),
        "export" | "import" => {
            let kind = args.required("entity")?.parse::<EntityKind>()?;
            let format = args.required("format")?.parse::<Format>()?;
            let path = PathBuf::from(args.required("path")?);

            if command == "export" {
                Command::Export { kind, format, path }
            } else {
                Command::Import { kind, format, path }
            }
        }
        _ => return Err(CliError::UnknownCommand(command)),
    };

    args.finish()?;
    Ok(parsed)
}

fn parse_report<I: Iterator<Item = String>>(
    args: &mut Args<I>,
) -> Result<ReportCommand, CliError> {
    let report = args.required("report")?;

    let parsed = match report.as_str() {
        "top-clients" => ReportCommand::TopClients {
            limit: args.optional_parsed("limit")?,
        },
        "sales-by-date" => ReportCommand::SalesByDate,
        "product-sales" => ReportCommand::ProductSales,
        "categories" => ReportCommand::Categories,
        "top-products" => ReportCommand::TopProducts {
            limit: args.optional_parsed("limit")?,
        },
        "links" => ReportCommand::Links,
        "range" => ReportCommand::Range {
            start: args.parsed("start")?,
            end: args.parsed("end")?,
        },
        _ => return Err(CliError::UnknownCommand(format!("report {report}"))),
    };

    Ok(parsed)
}
