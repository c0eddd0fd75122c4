use std::fs::File;
use std::io::BufReader;

use shop_manager::domain::client::{ClientListQuery, NewClient};
use shop_manager::domain::order::{NewOrder, OrderListQuery, OrderStatus};
use shop_manager::domain::product::ProductListQuery;
use shop_manager::repository::{ClientReader, ClientWriter, OrderReader, OrderWriter, ProductReader};
use shop_manager::services::transfer::{export_entities, import_entities};
use shop_manager::transfer::{EntityKind, Format};

mod common;

use common::{add_client, add_product, date};

#[test]
fn test_products_json_round_trip_into_empty_store() {
    let source = common::TestDb::new("test_products_json_round_trip_source.db");
    let source_repo = source.repo();

    add_product(&source_repo, "Green tea", 350, "Drinks", 10);
    add_product(&source_repo, "Kettle", 4599, "Kitchen", 2);
    add_product(&source_repo, "Mug", 1, "Kitchen", 0);

    let path = source.path("products.json");
    let exported = export_entities(
        &source_repo,
        EntityKind::Products,
        Format::Json,
        File::create(&path).unwrap(),
    )
    .unwrap();
    assert_eq!(exported, 3);

    let target = common::TestDb::new("test_products_json_round_trip_target.db");
    let target_repo = target.repo();
    let report = import_entities(
        &target_repo,
        EntityKind::Products,
        Format::Json,
        BufReader::new(File::open(&path).unwrap()),
    )
    .unwrap();
    assert_eq!(report.imported, 3);
    assert!(report.failures.is_empty());

    let (_, original) = source_repo.list_products(ProductListQuery::new()).unwrap();
    let (_, copied) = target_repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(original, copied);
}

#[test]
fn test_clients_csv_round_trip_keeps_tier_and_dates() {
    let source = common::TestDb::new("test_clients_csv_round_trip_source.db");
    let source_repo = source.repo();

    let premium = NewClient::new(
        "Ann Lee",
        "ann@example.com",
        "+15550101",
        "1 Main St, Springfield",
    )
    .unwrap()
    .premium()
    .with_registration_date(date(2022, 12, 24));
    source_repo.create_client(&premium).unwrap();
    add_client(&source_repo, "Bob", "bob@example.com");

    let mut buffer = Vec::new();
    export_entities(&source_repo, EntityKind::Clients, Format::Csv, &mut buffer).unwrap();

    let target = common::TestDb::new("test_clients_csv_round_trip_target.db");
    let target_repo = target.repo();
    let report =
        import_entities(&target_repo, EntityKind::Clients, Format::Csv, buffer.as_slice()).unwrap();
    assert_eq!(report.imported, 2);

    let (_, original) = source_repo.list_clients(ClientListQuery::new()).unwrap();
    let (_, copied) = target_repo.list_clients(ClientListQuery::new()).unwrap();
    assert_eq!(original, copied);
    assert!(copied[0].is_premium());
    assert_eq!(copied[0].registration_date, date(2022, 12, 24));
}

#[test]
fn test_order_import_reapplies_stock_and_keeps_prices() {
    let test_db = common::TestDb::new("test_order_import_reapplies_stock.db");
    let repo = test_db.repo();

    let alice = add_client(&repo, "Alice", "alice@example.com");
    let tea = add_product(&repo, "Green tea", 350, "Drinks", 10);

    let input = format!(
        "id,client_id,order_date,status,items\n\
         7,{client},2023-01-05,completed,{tea}:3:3.00\n\
         8,{client},2023-01-06,pending,{tea}:20:3.50\n\
         9,999,2023-01-07,pending,{tea}:1:3.50\n",
        client = alice.id,
        tea = tea.id,
    );

    let report =
        import_entities(&repo, EntityKind::Orders, Format::Csv, input.as_bytes()).unwrap();
    assert_eq!(report.imported, 1);
    let failed: Vec<usize> = report.failures.iter().map(|failure| failure.record).collect();
    assert_eq!(failed, vec![2, 3]);

    let order = repo.get_order_by_id(7).unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.items[0].unit_price_cents, 300);
    assert_eq!(repo.get_product_by_id(tea.id).unwrap().unwrap().stock, 7);

    let (total, _) = repo.list_orders(OrderListQuery::new()).unwrap();
    assert_eq!(total, 1);
}

#[test]
fn test_order_export_lists_items() {
    let test_db = common::TestDb::new("test_order_export_lists_items.db");
    let repo = test_db.repo();

    let alice = add_client(&repo, "Alice", "alice@example.com");
    let tea = add_product(&repo, "Green tea", 350, "Drinks", 10);
    let kettle = add_product(&repo, "Kettle", 4500, "Kitchen", 2);

    let mut new_order = NewOrder::new(alice.id).with_order_date(date(2023, 1, 5));
    new_order.add_item(&tea, 2).unwrap();
    new_order.add_item(&kettle, 1).unwrap();
    let order = repo.create_order(&new_order).unwrap();

    let mut buffer = Vec::new();
    export_entities(&repo, EntityKind::Orders, Format::Csv, &mut buffer).unwrap();

    let expected = format!(
        "id,client_id,order_date,status,items\n{},{},2023-01-05,pending,{}:2:3.50;{}:1:45.00\n",
        order.id, alice.id, tea.id, kettle.id
    );
    assert_eq!(String::from_utf8(buffer).unwrap(), expected);
}

#[test]
fn test_import_reports_duplicates_and_keeps_good_rows() {
    let test_db = common::TestDb::new("test_import_reports_duplicates.db");
    let repo = test_db.repo();

    add_client(&repo, "Alice", "alice@example.com");

    let input = r#"[
        {"name": "Alicia", "email": "alice@example.com", "phone": "+15550102"},
        {"name": "Bob", "email": "bob@example", "phone": "+15550103"},
        {"name": "Carol", "email": "carol@example.com", "phone": "+15550104", "is_premium": true}
    ]"#;

    let report =
        import_entities(&repo, EntityKind::Clients, Format::Json, input.as_bytes()).unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures[0].message.contains("constraint"));
    assert!(report.failures[1].message.contains("bob@example"));

    let carol = repo.get_client_by_email("carol@example.com").unwrap().unwrap();
    assert!(carol.is_premium());
    assert_eq!(carol.registration_date, chrono::Local::now().date_naive());
}
