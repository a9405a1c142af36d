//! Builders for test records.

use contracts::domain::a001_order::{Customer, Order, OrderItem, OrderStatus};
use contracts::domain::a002_form_submission::{FormSubmission, SubmissionStatus};
use std::collections::BTreeMap;

pub fn order(id: &str, date: &str, status: OrderStatus, total: f64) -> Order {
    Order {
        id: id.to_string(),
        customer: Customer {
            name: format!("Customer {}", id),
            email: format!("customer{}@example.com", id),
        },
        date: date.to_string(),
        status,
        total,
        currency: "USD".to_string(),
        payment_method: "Credit Card".to_string(),
        items: Vec::new(),
        billing_address: Default::default(),
        shipping_address: Default::default(),
        notes: String::new(),
        attached_files: Vec::new(),
    }
}

pub fn with_customer(mut order: Order, name: &str, email: &str) -> Order {
    order.customer = Customer {
        name: name.to_string(),
        email: email.to_string(),
    };
    order
}

pub fn with_item(mut order: Order, product_id: &str, category: &str, quantity: u32, price: f64) -> Order {
    order.items.push(OrderItem {
        product_id: product_id.to_string(),
        name: format!("Product {}", product_id),
        category: category.to_string(),
        quantity,
        price,
    });
    order
}

pub fn submission(
    id: &str,
    submitted_at: &str,
    status: SubmissionStatus,
    fields: &[(&str, &str)],
) -> FormSubmission {
    FormSubmission {
        id: id.to_string(),
        form_id: "f-1".to_string(),
        form_name: "Contact Us".to_string(),
        submitted_at: submitted_at.to_string(),
        status,
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub fn with_form(mut submission: FormSubmission, form_name: &str) -> FormSubmission {
    submission.form_name = form_name.to_string();
    submission
}
