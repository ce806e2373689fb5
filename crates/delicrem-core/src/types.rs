//! Entity shapes exchanged with the REST backend
//!
//! Every `*Record` mirrors the JSON the API returns, with every field optional.
//! Each record has exactly one `normalize()` producing the entity the pages work
//! with, so defaults for missing nested data are decided in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state shared by orders and sales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Not started
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    /// Being prepared
    #[serde(rename = "en preparación")]
    InPreparation,
    /// Delivered or closed
    #[serde(rename = "completado")]
    Completed,
}

impl OrderStatus {
    /// Every status in display order
    pub const ALL: [Self; 3] = [Self::Pending, Self::InPreparation, Self::Completed];

    /// Wire value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::InPreparation => "en preparación",
            Self::Completed => "completado",
        }
    }

    /// Human label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InPreparation => "En preparación",
            Self::Completed => "Completado",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| crate::Error::validation("estado", format!("Estado desconocido: {s}")))
    }
}

fn normalize_status(raw: Option<&str>) -> OrderStatus {
    raw.map_or_else(OrderStatus::default, |raw| {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(estado = raw, "unknown status from API, showing as pendiente");
            OrderStatus::default()
        })
    })
}

/// Customer snapshot as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Customer identifier
    #[serde(default)]
    pub id_cliente: Option<i64>,
    /// Customer name
    #[serde(default)]
    pub nombre: Option<String>,
    /// Phone or email
    #[serde(default)]
    pub contacto: Option<String>,
    /// Creation timestamp
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Customer embedded in orders and sales
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    /// Customer identifier
    pub id: Option<i64>,
    /// Customer name, empty when unknown
    pub name: String,
    /// Contact, empty when unknown
    pub contact: String,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

impl CustomerRecord {
    /// Fill missing fields with blanks
    #[must_use]
    pub fn normalize(self) -> Customer {
        Customer {
            id: self.id_cliente,
            name: self.nombre.unwrap_or_default(),
            contact: self.contacto.unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Order line as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    /// Line identifier
    #[serde(default)]
    pub id_detalle_pedido: Option<i64>,
    /// Product identifier
    #[serde(default)]
    pub id_producto: Option<i64>,
    /// Units ordered
    #[serde(default)]
    pub cantidad: Option<i64>,
}

/// Line of an order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLine {
    /// Line identifier
    pub id: Option<i64>,
    /// Product identifier
    pub product_id: Option<i64>,
    /// Units ordered
    pub quantity: i64,
}

impl OrderLineRecord {
    /// Convert to an [`OrderLine`]
    #[must_use]
    pub fn normalize(self) -> OrderLine {
        OrderLine {
            id: self.id_detalle_pedido,
            product_id: self.id_producto,
            quantity: self.cantidad.unwrap_or_default(),
        }
    }
}

/// Order as returned by `GET /api/pedidos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier
    #[serde(default)]
    pub id_pedido: Option<i64>,
    /// Customer identifier
    #[serde(default)]
    pub id_cliente: Option<i64>,
    /// Delivery date, ISO-8601
    #[serde(default)]
    pub fecha_entrega: Option<String>,
    /// Status
    #[serde(default)]
    pub estado: Option<String>,
    /// Whether the order is paid
    #[serde(default)]
    pub pagado: Option<bool>,
    /// Line items
    #[serde(default, rename = "detallesPedido")]
    pub detalles_pedido: Option<Vec<OrderLineRecord>>,
    /// Embedded customer
    #[serde(default)]
    pub clientesh: Option<CustomerRecord>,
    /// Creation timestamp
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Customer order for delivery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    /// Order identifier
    pub id: Option<i64>,
    /// Customer identifier
    pub customer_id: Option<i64>,
    /// Delivery date as sent by the API
    pub delivery_date: String,
    /// Status
    pub status: OrderStatus,
    /// Whether the order is paid
    pub paid: bool,
    /// Line items, empty when the API omitted them
    pub lines: Vec<OrderLine>,
    /// Embedded customer, blank when the API omitted it
    pub customer: Customer,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

impl OrderRecord {
    /// Convert to an [`Order`], defaulting absent nested data
    #[must_use]
    pub fn normalize(self) -> Order {
        Order {
            id: self.id_pedido,
            customer_id: self.id_cliente,
            delivery_date: self.fecha_entrega.unwrap_or_default(),
            status: normalize_status(self.estado.as_deref()),
            paid: self.pagado.unwrap_or_default(),
            lines: self
                .detalles_pedido
                .unwrap_or_default()
                .into_iter()
                .map(OrderLineRecord::normalize)
                .collect(),
            customer: self.clientesh.unwrap_or_default().normalize(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Sale line as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleLineRecord {
    /// Line identifier
    #[serde(default)]
    pub id_detalle_venta: Option<i64>,
    /// Product identifier
    #[serde(default)]
    pub id_producto: Option<i64>,
    /// Units sold
    #[serde(default)]
    pub cantidad: Option<i64>,
    /// Price per unit
    #[serde(default, deserialize_with = "crate::utils::lenient_f64")]
    pub precio_unitario: Option<f64>,
}

/// Line of a sale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleLine {
    /// Line identifier
    pub id: Option<i64>,
    /// Product identifier
    pub product_id: Option<i64>,
    /// Units sold
    pub quantity: i64,
    /// Price per unit
    pub unit_price: f64,
}

impl SaleLineRecord {
    /// Convert to a [`SaleLine`]
    #[must_use]
    pub fn normalize(self) -> SaleLine {
        SaleLine {
            id: self.id_detalle_venta,
            product_id: self.id_producto,
            quantity: self.cantidad.unwrap_or_default(),
            unit_price: self.precio_unitario.unwrap_or_default(),
        }
    }
}

/// Sale as returned by `GET /api/ventas`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Sale identifier
    #[serde(default)]
    pub id_venta: Option<i64>,
    /// Customer identifier
    #[serde(default)]
    pub id_cliente: Option<i64>,
    /// Sale date
    #[serde(default)]
    pub fecha_venta: Option<String>,
    /// Status
    #[serde(default)]
    pub estado: Option<String>,
    /// Whether the sale is paid
    #[serde(default)]
    pub pagado: Option<bool>,
    /// Line items
    #[serde(default, rename = "detalleVentas")]
    pub detalle_ventas: Option<Vec<SaleLineRecord>>,
    /// Line items under the name some endpoints use
    #[serde(default)]
    pub detalles: Option<Vec<SaleLineRecord>>,
    /// Embedded customer
    #[serde(default)]
    pub cliente: Option<CustomerRecord>,
    /// Creation timestamp
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Point-of-sale transaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sale {
    /// Sale identifier
    pub id: Option<i64>,
    /// Customer identifier
    pub customer_id: Option<i64>,
    /// Sale date as sent by the API
    pub sale_date: String,
    /// Status
    pub status: OrderStatus,
    /// Whether the sale is paid
    pub paid: bool,
    /// Line items
    pub lines: Vec<SaleLine>,
    /// Embedded customer
    pub customer: Customer,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

impl SaleRecord {
    /// Convert to a [`Sale`], defaulting absent nested data
    #[must_use]
    pub fn normalize(self) -> Sale {
        Sale {
            id: self.id_venta,
            customer_id: self.id_cliente,
            sale_date: self.fecha_venta.unwrap_or_default(),
            status: normalize_status(self.estado.as_deref()),
            paid: self.pagado.unwrap_or_default(),
            lines: self
                .detalle_ventas
                .or(self.detalles)
                .unwrap_or_default()
                .into_iter()
                .map(SaleLineRecord::normalize)
                .collect(),
            customer: self.cliente.unwrap_or_default().normalize(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Finished product as returned by `GET /api/productos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identifier
    #[serde(default)]
    pub id_producto: Option<i64>,
    /// Name
    #[serde(default)]
    pub nombre: Option<String>,
    /// Description
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Unit price; the backend may send a decimal string
    #[serde(default, deserialize_with = "crate::utils::lenient_f64")]
    pub precio: Option<f64>,
    /// Units in stock
    #[serde(default)]
    pub stock: Option<i64>,
    /// Creation timestamp
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Finished product in inventory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: Option<i64>,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Units in stock, never negative
    pub stock: u32,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

impl ProductRecord {
    /// Convert to a [`Product`]; negative stock is shown as zero
    #[must_use]
    pub fn normalize(self) -> Product {
        Product {
            id: self.id_producto,
            name: self.nombre.unwrap_or_default(),
            description: self.descripcion.unwrap_or_default(),
            price: self.precio.unwrap_or_default(),
            stock: self
                .stock
                .and_then(|stock| u32::try_from(stock).ok())
                .unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User account as returned by `GET /api/usuarios`; the password never comes back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier
    #[serde(default)]
    pub id_usuario: Option<i64>,
    /// Display name
    #[serde(default)]
    pub nombre: Option<String>,
    /// Email
    #[serde(default)]
    pub email: Option<String>,
    /// Role identifier
    #[serde(default)]
    pub id_rol: Option<i64>,
}

/// Dashboard user account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// User identifier
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Role identifier
    pub role_id: Option<i64>,
}

impl UserRecord {
    /// Convert to a [`User`]
    #[must_use]
    pub fn normalize(self) -> User {
        User {
            id: self.id_usuario,
            name: self.nombre.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role_id: self.id_rol,
        }
    }
}

/// Role as returned by `GET /api/roles`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Role identifier
    #[serde(default)]
    pub id_rol: Option<i64>,
    /// Role name
    #[serde(default)]
    pub nombre: Option<String>,
}

/// Role assigned to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Role identifier
    pub id: i64,
    /// Role name
    pub name: String,
}

impl RoleRecord {
    /// Convert to a [`Role`]; roles without id cannot be selected and are dropped
    #[must_use]
    pub fn normalize(self) -> Option<Role> {
        Some(Role {
            id: self.id_rol?,
            name: self.nombre.unwrap_or_default(),
        })
    }
}

/// Name of the role with `role_id`, `Desconocido` when not found
#[must_use]
pub fn role_name(roles: &[Role], role_id: Option<i64>) -> &str {
    role_id
        .and_then(|id| roles.iter().find(|role| role.id == id))
        .map_or("Desconocido", |role| role.name.as_str())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InPreparation).unwrap(),
            "\"en preparación\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"completado\"").unwrap();
        assert_eq!(parsed, OrderStatus::Completed);
        assert_eq!("Pendiente".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert!("enviado".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_normalization_defaults_nested_data() {
        let record: OrderRecord =
            serde_json::from_str(r#"{"id_pedido": 3, "fecha_entrega": "2024-05-01T00:00:00.000Z"}"#)
                .unwrap();
        let order = record.normalize();

        assert_eq!(order.id, Some(3));
        assert!(order.lines.is_empty());
        assert_eq!(order.customer, Customer::default());
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.paid);
    }

    #[test]
    fn test_order_normalization_full_record() {
        let json = r#"{
            "id_pedido": 1,
            "id_cliente": 9,
            "fecha_entrega": "2024-05-01T00:00:00.000Z",
            "estado": "en preparación",
            "pagado": true,
            "detallesPedido": [{"id_detalle_pedido": 10, "id_producto": 4, "cantidad": 2}],
            "clientesh": {"id_cliente": 9, "nombre": "Ana", "contacto": "555-1234"}
        }"#;
        let order = serde_json::from_str::<OrderRecord>(json).unwrap().normalize();

        assert_eq!(order.status, OrderStatus::InPreparation);
        assert!(order.paid);
        assert_eq!(
            order.lines,
            vec![OrderLine {
                id: Some(10),
                product_id: Some(4),
                quantity: 2
            }]
        );
        assert_eq!(order.customer.name, "Ana");
        assert_eq!(order.customer.contact, "555-1234");
    }

    #[test]
    fn test_unknown_status_falls_back_to_pending() {
        let record = OrderRecord {
            estado: Some("perdido".to_string()),
            ..OrderRecord::default()
        };
        assert_eq!(record.normalize().status, OrderStatus::Pending);
    }

    #[test]
    fn test_sale_lines_accept_both_names() {
        let primary: SaleRecord = serde_json::from_str(
            r#"{"detalleVentas": [{"id_producto": 1, "cantidad": 2, "precio_unitario": "3.5"}]}"#,
        )
        .unwrap();
        let alias: SaleRecord = serde_json::from_str(
            r#"{"detalles": [{"id_producto": 1, "cantidad": 2, "precio_unitario": 3.5}]}"#,
        )
        .unwrap();

        assert_eq!(primary.normalize().lines, alias.normalize().lines);
    }

    #[test]
    fn test_sale_with_both_line_keys_prefers_detalle_ventas() {
        let record: SaleRecord = serde_json::from_str(
            r#"{
                "id_venta": 3,
                "detalleVentas": [{"id_producto": 1, "cantidad": 2, "precio_unitario": 3.5}],
                "detalles": [{"id_producto": 8, "cantidad": 1, "precio_unitario": 1.0}]
            }"#,
        )
        .unwrap();

        let lines = record.normalize().lines;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, Some(1));
    }

    #[test]
    fn test_product_normalization() {
        let product = serde_json::from_str::<ProductRecord>(
            r#"{"id_producto": 2, "nombre": "Yogurt", "precio": "4500.00", "stock": -3}"#,
        )
        .unwrap()
        .normalize();

        assert_eq!(product.name, "Yogurt");
        assert!((product.price - 4500.0).abs() < f64::EPSILON);
        assert_eq!(product.stock, 0);
        assert_eq!(product.description, "");
    }

    #[test]
    fn test_user_record_ignores_password() {
        let user = serde_json::from_str::<UserRecord>(
            r#"{"id_usuario": 1, "nombre": "Ana", "email": "a@b.com", "password": "hash", "id_rol": 2}"#,
        )
        .unwrap()
        .normalize();

        assert_eq!(
            user,
            User {
                id: Some(1),
                name: "Ana".to_string(),
                email: "a@b.com".to_string(),
                role_id: Some(2),
            }
        );
    }

    #[test]
    fn test_role_lookup() {
        let roles: Vec<Role> = vec![
            RoleRecord {
                id_rol: Some(1),
                nombre: Some("Administrador".to_string()),
            },
            RoleRecord {
                id_rol: None,
                nombre: Some("Huérfano".to_string()),
            },
        ]
        .into_iter()
        .filter_map(RoleRecord::normalize)
        .collect();

        assert_eq!(roles.len(), 1);
        assert_eq!(role_name(&roles, Some(1)), "Administrador");
        assert_eq!(role_name(&roles, Some(7)), "Desconocido");
        assert_eq!(role_name(&roles, None), "Desconocido");
    }
}
