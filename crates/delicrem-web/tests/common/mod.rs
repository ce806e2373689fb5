//! Shared fixtures for dashboard flow tests

#![allow(dead_code, unreachable_pub)]

use delicrem_core::{Customer, Order, OrderStatus, Role, Sale, User};
use delicrem_web::mock::{MockDashboardApi, RecordingNotifier};
use std::sync::Once;

static INIT: Once = Once::new();

/// Route controller logs to the test writer once per process
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("delicrem_web=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Order for `customer` delivered on 2024-05-01
pub fn order(id: i64, customer: &str) -> Order {
    Order {
        id: Some(id),
        customer_id: Some(id),
        delivery_date: "2024-05-01T00:00:00.000Z".to_string(),
        status: OrderStatus::Pending,
        customer: Customer {
            name: customer.to_string(),
            ..Customer::default()
        },
        ..Order::default()
    }
}

/// Pending sale for `customer`
pub fn sale(id: i64, customer: &str) -> Sale {
    Sale {
        id: Some(id),
        customer_id: Some(id),
        sale_date: "2024-06-10".to_string(),
        status: OrderStatus::Pending,
        customer: Customer {
            name: customer.to_string(),
            ..Customer::default()
        },
        ..Sale::default()
    }
}

/// User with an address derived from the name
pub fn user(id: i64, name: &str, role_id: i64) -> User {
    User {
        id: Some(id),
        name: name.to_string(),
        email: format!("{}@delicrem.co", name.to_lowercase()),
        role_id: Some(role_id),
    }
}

/// The two roles the backend ships with
pub fn roles() -> Vec<Role> {
    vec![
        Role {
            id: 1,
            name: "Administrador".to_string(),
        },
        Role {
            id: 2,
            name: "Empleado".to_string(),
        },
    ]
}

/// Fresh backend and notifier pair
pub fn services(api: MockDashboardApi) -> (MockDashboardApi, RecordingNotifier) {
    init_test_logging();
    (api, RecordingNotifier::new())
}
