// fixtures/listings/orders.rs - Sample order queues

use rust_decimal::Decimal;

use super::SampleListing;
use crate::web_app::model::{Order, OrderLine, OrderStatus};

/// Orders in every sample queue
pub const QUEUE_SIZE: usize = 13;

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        products: vec![OrderLine {
            product_id: format!("{id}-item"),
            product_name: "Notebook".to_string(),
            quantity: 2,
            price: Decimal::new(45, 0),
        }],
        status,
        total_cost: Decimal::new(90, 0),
        location: Some("Hostel 4".to_string()),
        student_username: Some("asha".to_string()),
        mode_of_payment: Some("Cash on Delivery".to_string()),
        created_at: None,
    }
}

/// Orders of one seller still being worked on
pub struct CurrentQueue;

impl SampleListing for CurrentQueue {
    type Item = Order;

    fn all(scope: &str) -> Vec<Order> {
        const CYCLE: [OrderStatus; 3] = [OrderStatus::Pending, OrderStatus::Processing, OrderStatus::Shipped];
        (1..=QUEUE_SIZE)
            .map(|n| order(&format!("{scope}-o{n}"), CYCLE[n % CYCLE.len()].clone()))
            .collect()
    }
}

/// Orders of one seller that reached the student
pub struct CompletedQueue;

impl SampleListing for CompletedQueue {
    type Item = Order;

    fn all(scope: &str) -> Vec<Order> {
        (1..=QUEUE_SIZE)
            .map(|n| order(&format!("{scope}-done{n}"), OrderStatus::Delivered))
            .collect()
    }
}
