use std::fs::File;
use std::io::{BufReader, BufWriter};

use serde::Serialize;

use shop_manager::cli::{self, Command, ReportCommand, USAGE};
use shop_manager::config::AppConfig;
use shop_manager::db::{establish_connection_pool, run_migrations};
use shop_manager::domain::order::OrderListQuery;
use shop_manager::repository::DieselRepository;
use shop_manager::services::{ServiceResult, catalog, orders, reports, transfer};
use shop_manager::transfer::TransferError;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let config = AppConfig::from_env();

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let pool = match establish_connection_pool(&config.database_url, config.pool_size) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to prepare the database schema: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    if let Err(e) = run(&repo, &config, command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(repo: &DieselRepository, config: &AppConfig, command: Command) -> ServiceResult<()> {
    match command {
        Command::Clients { term } => print_json(&catalog::search_clients(repo, term.as_deref())?),
        Command::Products { term } => {
            print_json(&catalog::search_products(repo, term.as_deref())?)
        }
        Command::Orders => print_json(&orders::list_orders(repo, OrderListQuery::new())?),
        Command::Order { id } => print_json(&orders::order_summary(repo, id)?),
        Command::Status { id, status } => print_json(&orders::change_status(repo, id, &status)?),
        Command::Report(report) => run_report(repo, config, report),
        Command::Export { kind, format, path } => {
            let file = File::create(&path).map_err(TransferError::from)?;
            let exported = transfer::export_entities(repo, kind, format, BufWriter::new(file))?;
            print_json(&serde_json::json!({
                "entity": kind.as_str(),
                "path": path.display().to_string(),
                "exported": exported,
            }))
        }
        Command::Import { kind, format, path } => {
            let file = File::open(&path).map_err(TransferError::from)?;
            let report = transfer::import_entities(repo, kind, format, BufReader::new(file))?;
            print_json(&report)
        }
    }
}

fn run_report(
    repo: &DieselRepository,
    config: &AppConfig,
    report: ReportCommand,
) -> ServiceResult<()> {
    match report {
        ReportCommand::TopClients { limit } => print_json(&reports::top_clients(
            repo,
            limit.unwrap_or(config.report_limit),
        )?),
        ReportCommand::SalesByDate => print_json(&reports::sales_by_date(repo)?),
        ReportCommand::ProductSales => print_json(&reports::product_sales(repo)?),
        ReportCommand::Categories => print_json(&reports::category_sales(repo)?),
        ReportCommand::TopProducts { limit } => print_json(&reports::top_products_by_quantity(
            repo,
            limit.unwrap_or(config.report_limit),
        )?),
        ReportCommand::Links => print_json(&reports::purchase_links(repo)?),
        ReportCommand::Range { start, end } => {
            print_json(&reports::sales_report(repo, start, end)?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> ServiceResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(TransferError::from)?;
    println!("{rendered}");
    Ok(())
}
