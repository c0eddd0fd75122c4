use chrono::NaiveDate;
use shop_manager::domain::order::NewOrder;
use shop_manager::domain::product::Product;
use shop_manager::repository::{
    DieselRepository, OrderWriter, ProductReader, ProductWriter, ReportReader,
};
use shop_manager::services::reports;

mod common;

use common::{add_client, add_product, date};

fn place(repo: &DieselRepository, client_id: i32, day: NaiveDate, lines: &[(&Product, i32)]) {
    let mut new_order = NewOrder::new(client_id).with_order_date(day);
    for (product, quantity) in lines {
        let current = repo.get_product_by_id(product.id).unwrap().unwrap();
        new_order.add_item(&current, *quantity).unwrap();
    }
    repo.create_order(&new_order).unwrap();
}

#[test]
fn test_top_clients_ranked_by_order_count() {
    let test_db = common::TestDb::new("test_top_clients_ranked_by_order_count.db");
    let repo = test_db.repo();

    let once = add_client(&repo, "Once", "once@example.com");
    let never = add_client(&repo, "Never", "never@example.com");
    let thrice = add_client(&repo, "Thrice", "thrice@example.com");
    let pen = add_product(&repo, "Pen", 100, "Office", 100);
    let desk = add_product(&repo, "Desk", 10000, "Office", 10);

    place(&repo, once.id, date(2023, 1, 1), &[(&desk, 1)]);
    for day in 1..=3 {
        // Two lines per order must still count as one order.
        place(&repo, thrice.id, date(2023, 1, day), &[(&pen, 1), (&desk, 1)]);
    }

    let top = repo.top_clients(10).unwrap();
    let ids: Vec<i32> = top.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![thrice.id, once.id, never.id]);

    assert_eq!(top[0].order_count, 3);
    assert_eq!(top[0].total_spent, 3 * (100 + 10000));
    assert_eq!(top[1].order_count, 1);
    assert_eq!(top[2].order_count, 0);
    assert_eq!(top[2].total_spent, 0);

    let limited = repo.top_clients(2).unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn test_top_clients_ties_broken_by_spend() {
    let test_db = common::TestDb::new("test_top_clients_ties_broken_by_spend.db");
    let repo = test_db.repo();

    let small = add_client(&repo, "Small", "small@example.com");
    let big = add_client(&repo, "Big", "big@example.com");
    let pen = add_product(&repo, "Pen", 100, "Office", 100);

    place(&repo, small.id, date(2023, 1, 1), &[(&pen, 1)]);
    place(&repo, big.id, date(2023, 1, 1), &[(&pen, 5)]);

    let top = repo.top_clients(5).unwrap();
    assert_eq!(top[0].id, big.id);
    assert_eq!(top[1].id, small.id);
}

#[test]
fn test_aggregates_report_zero_instead_of_null() {
    let test_db = common::TestDb::new("test_aggregates_report_zero_instead_of_null.db");
    let repo = test_db.repo();

    let alice = add_client(&repo, "Alice", "alice@example.com");
    let pen = add_product(&repo, "Pen", 100, "Office", 100);
    let lamp = add_product(&repo, "Lamp", 2500, "Home", 5);

    // An order without lines still shows up on its day.
    repo.create_order(&NewOrder::new(alice.id).with_order_date(date(2023, 2, 1)))
        .unwrap();
    place(&repo, alice.id, date(2023, 2, 2), &[(&pen, 2)]);

    let daily = repo.sales_by_date().unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].date, date(2023, 2, 1));
    assert_eq!(daily[0].order_count, 1);
    assert_eq!(daily[0].total_amount, 0);
    assert_eq!(daily[1].total_amount, 200);

    let products = repo.product_sales().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, pen.id);
    assert_eq!(products[0].total_quantity, 2);
    assert_eq!(products[1].id, lamp.id);
    assert_eq!(products[1].total_quantity, 0);
    assert_eq!(products[1].total_revenue, 0);

    let categories = repo.category_sales().unwrap();
    assert_eq!(categories[0].category, "Office");
    assert_eq!(categories[0].total_revenue, 200);
    assert_eq!(categories[1].category, "Home");
    assert_eq!(categories[1].total_revenue, 0);

    let links = repo.purchase_links().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].client_id, alice.id);
    assert_eq!(links[0].product_id, pen.id);
    assert_eq!(links[0].quantity, 2);
}

#[test]
fn test_report_aggregates_on_empty_store() {
    let test_db = common::TestDb::new("test_report_aggregates_on_empty_store.db");
    let repo = test_db.repo();

    assert!(repo.top_clients(5).unwrap().is_empty());
    assert!(repo.sales_by_date().unwrap().is_empty());
    assert!(repo.product_sales().unwrap().is_empty());
    assert!(repo.purchase_links().unwrap().is_empty());
}

#[test]
fn test_sales_report_for_january() {
    let test_db = common::TestDb::new("test_sales_report_for_january.db");
    let repo = test_db.repo();

    let alice = add_client(&repo, "Alice", "alice@example.com");
    let kettle = add_product(&repo, "Kettle", 15000, "Kitchen", 10);
    let mug = add_product(&repo, "Mug", 5000, "Kitchen", 10);

    place(&repo, alice.id, date(2023, 1, 10), &[(&kettle, 1)]);
    place(&repo, alice.id, date(2023, 1, 31), &[(&mug, 1)]);
    place(&repo, alice.id, date(2023, 2, 1), &[(&kettle, 3)]);

    let report = reports::sales_report(&repo, date(2023, 1, 1), date(2023, 1, 31)).unwrap();

    assert_eq!(report.total_orders, 2);
    assert_eq!(report.total_revenue, 20000);
    assert_eq!(report.avg_order_value, 10000);
    assert_eq!(report.top_products.len(), 2);
    assert_eq!(report.top_products[0].product_id, kettle.id);
    assert_eq!(report.top_products[0].name.as_deref(), Some("Kettle"));
    assert_eq!(report.top_products[0].revenue, 15000);
    assert_eq!(report.top_products[1].product_id, mug.id);
}

#[test]
fn test_sales_report_drops_lines_of_deleted_products() {
    let test_db = common::TestDb::new("test_sales_report_drops_lines_of_deleted_products.db");
    let repo = test_db.repo();

    let alice = add_client(&repo, "Alice", "alice@example.com");
    let kettle = add_product(&repo, "Kettle", 15000, "Kitchen", 10);
    place(&repo, alice.id, date(2023, 1, 10), &[(&kettle, 1)]);

    assert!(repo.delete_product(kettle.id).unwrap());

    let report = reports::sales_report(&repo, date(2023, 1, 1), date(2023, 1, 31)).unwrap();
    assert_eq!(report.total_orders, 1);
    assert_eq!(report.total_revenue, 0);
    assert_eq!(report.avg_order_value, 0);
    assert!(report.top_products.is_empty());
}
