//! Read-only detail views for the "view details" dialogs

use delicrem_core::utils::{format_date, format_datetime, yes_no};
use delicrem_core::{Customer, Order, Product, Sale, User};

/// Labelled rows under a heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailSection {
    /// Section heading
    pub title: String,
    /// `(label, value)` pairs
    pub rows: Vec<(String, String)>,
}

/// Tabular section, used for line items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailTable {
    /// Table heading
    pub title: String,
    /// Column headers
    pub headers: Vec<String>,
    /// Cell text per row
    pub rows: Vec<Vec<String>>,
}

/// Everything a detail dialog renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailView {
    /// Dialog title
    pub heading: String,
    /// Labelled sections, in order
    pub sections: Vec<DetailSection>,
    /// Line item tables, after the sections
    pub tables: Vec<DetailTable>,
}

/// Record that can be shown in a detail dialog
pub trait Describe {
    /// Build the dialog contents
    fn describe(&self) -> DetailView;
}

fn row(label: &str, value: impl Into<String>) -> (String, String) {
    (label.to_string(), value.into())
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn customer_section(customer: &Customer) -> DetailSection {
    DetailSection {
        title: "Información del Cliente".to_string(),
        rows: vec![
            row("ID Cliente", id_cell(customer.id)),
            row("Nombre", customer.name.as_str()),
            row("Contacto", customer.contact.as_str()),
            row("Creado", format_datetime(customer.created_at.as_deref())),
            row("Actualizado", format_datetime(customer.updated_at.as_deref())),
        ],
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

impl Describe for Order {
    fn describe(&self) -> DetailView {
        DetailView {
            heading: "Detalles del Pedido".to_string(),
            sections: vec![
                customer_section(&self.customer),
                DetailSection {
                    title: "Detalles del Pedido".to_string(),
                    rows: vec![
                        row("ID Pedido", id_cell(self.id)),
                        row("Fecha de Entrega", format_date(&self.delivery_date)),
                        row("Estado", self.status.as_str()),
                        row("Pagado", yes_no(self.paid)),
                        row("Creado", format_datetime(self.created_at.as_deref())),
                        row("Actualizado", format_datetime(self.updated_at.as_deref())),
                    ],
                },
            ],
            tables: vec![DetailTable {
                title: "Detalles de Productos".to_string(),
                headers: headers(&["ID Detalle", "ID Producto", "Cantidad"]),
                rows: self
                    .lines
                    .iter()
                    .map(|line| {
                        vec![
                            id_cell(line.id),
                            id_cell(line.product_id),
                            line.quantity.to_string(),
                        ]
                    })
                    .collect(),
            }],
        }
    }
}

impl Describe for Sale {
    fn describe(&self) -> DetailView {
        DetailView {
            heading: "Detalles de la Venta".to_string(),
            sections: vec![
                customer_section(&self.customer),
                DetailSection {
                    title: "Detalles de la Venta".to_string(),
                    rows: vec![
                        row("ID Venta", id_cell(self.id)),
                        row("Fecha de Venta", format_date(&self.sale_date)),
                        row("Estado", self.status.as_str()),
                        row("Pagado", yes_no(self.paid)),
                        row("Creado", format_datetime(self.created_at.as_deref())),
                        row("Actualizado", format_datetime(self.updated_at.as_deref())),
                    ],
                },
            ],
            tables: vec![DetailTable {
                title: "Detalles de Productos".to_string(),
                headers: headers(&["ID Detalle", "ID Producto", "Cantidad", "Precio Unitario"]),
                rows: self
                    .lines
                    .iter()
                    .map(|line| {
                        vec![
                            id_cell(line.id),
                            id_cell(line.product_id),
                            line.quantity.to_string(),
                            line.unit_price.to_string(),
                        ]
                    })
                    .collect(),
            }],
        }
    }
}

impl Describe for Product {
    fn describe(&self) -> DetailView {
        DetailView {
            heading: "Detalles del Producto".to_string(),
            sections: vec![DetailSection {
                title: self.name.clone(),
                rows: vec![
                    row("Nombre", self.name.as_str()),
                    row("Descripción", self.description.as_str()),
                    row("Precio", self.price.to_string()),
                    row("Stock", self.stock.to_string()),
                    row("Creado", format_datetime(self.created_at.as_deref())),
                    row("Actualizado", format_datetime(self.updated_at.as_deref())),
                ],
            }],
            tables: Vec::new(),
        }
    }
}

/// User details need the role name resolved by the caller
pub fn describe_user(user: &User, role: &str) -> DetailView {
    DetailView {
        heading: "Detalles del Usuario".to_string(),
        sections: vec![DetailSection {
            title: user.name.clone(),
            rows: vec![
                row("Nombre", user.name.as_str()),
                row("Correo Electrónico", user.email.as_str()),
                row("Rol", role),
            ],
        }],
        tables: Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use delicrem_core::{OrderLine, OrderStatus, SaleLine};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_order_details() {
        let order = Order {
            id: Some(12),
            delivery_date: "2024-05-01T00:00:00.000Z".to_string(),
            status: OrderStatus::InPreparation,
            paid: true,
            lines: vec![OrderLine {
                id: Some(1),
                product_id: Some(4),
                quantity: 2,
            }],
            customer: Customer {
                name: "Ana".to_string(),
                ..Customer::default()
            },
            ..Order::default()
        };
        let view = order.describe();

        assert_eq!(view.sections[0].rows[1], row("Nombre", "Ana"));
        assert_eq!(view.sections[0].rows[3], row("Creado", "N/A"));
        assert_eq!(view.sections[1].rows[1], row("Fecha de Entrega", "01/05/2024"));
        assert_eq!(view.sections[1].rows[2], row("Estado", "en preparación"));
        assert_eq!(view.sections[1].rows[3], row("Pagado", "Sí"));
        assert_eq!(view.tables[0].rows, vec![vec!["1", "4", "2"]]);
    }

    #[test]
    fn test_sale_details_include_price_column() {
        let sale = Sale {
            lines: vec![SaleLine {
                id: None,
                product_id: Some(3),
                quantity: 1,
                unit_price: 2500.5,
            }],
            ..Sale::default()
        };
        let view = sale.describe();

        assert_eq!(view.tables[0].headers.len(), 4);
        assert_eq!(view.tables[0].rows[0], vec!["", "3", "1", "2500.5"]);
        assert_eq!(view.sections[1].rows[3], row("Pagado", "No"));
    }

    #[test]
    fn test_product_details_missing_timestamps() {
        let product = Product {
            name: "Kumis".to_string(),
            stock: 4,
            updated_at: Some("2024-02-03T04:05:06Z".to_string()),
            ..Product::default()
        };
        let view = product.describe();

        assert!(view.tables.is_empty());
        assert_eq!(view.sections[0].rows[4], row("Creado", "N/A"));
        assert_eq!(view.sections[0].rows[5], row("Actualizado", "03/02/2024, 04:05:06"));
    }

    #[test]
    fn test_user_details() {
        let user = User {
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            ..User::default()
        };
        let view = describe_user(&user, "Desconocido");
        assert_eq!(view.sections[0].rows[2], row("Rol", "Desconocido"));
    }
}
