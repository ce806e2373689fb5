//! Form drafts held by the edit dialogs and the payloads they submit
//!
//! Drafts keep raw form strings; `to_payload` runs the client-side checks and
//! numeric normalization, and is the only way to obtain a request body.

use crate::types::{Customer, Order, OrderStatus, Product, Sale, User};
use crate::utils::{
    EMAIL_REGEX, date_input_value, decimal_only, digits_only, parse_decimal_field,
    parse_int_field, to_iso_timestamp,
};
use crate::{Error, Result};
use serde::Serialize;
use validator::Validate;

/// Editable column of a line item row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineField {
    /// Product identifier, digits only
    ProductId,
    /// Units, digits only
    Quantity,
    /// Price per unit, digits and one decimal point
    UnitPrice,
}

impl LineField {
    /// Drop characters this column does not accept
    #[must_use]
    pub fn sanitize(self, raw: &str) -> String {
        match self {
            Self::ProductId | Self::Quantity => digits_only(raw),
            Self::UnitPrice => decimal_only(raw),
        }
    }

    /// Wire name of the column
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::ProductId => "id_producto",
            Self::Quantity => "cantidad",
            Self::UnitPrice => "precio_unitario",
        }
    }
}

/// A row of the line item sub-editor
pub trait LineDraft: Clone + Default {
    /// Current text of `field`, `None` when the row has no such column
    fn field(&self, field: LineField) -> Option<&str>;

    /// Store `raw` in `field` after sanitizing it; unknown columns are ignored
    fn set_field(&mut self, field: LineField, raw: &str);
}

/// Editable order line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLineDraft {
    /// Product identifier text
    pub product_id: String,
    /// Quantity text
    pub quantity: String,
}

impl LineDraft for OrderLineDraft {
    fn field(&self, field: LineField) -> Option<&str> {
        match field {
            LineField::ProductId => Some(&self.product_id),
            LineField::Quantity => Some(&self.quantity),
            LineField::UnitPrice => None,
        }
    }

    fn set_field(&mut self, field: LineField, raw: &str) {
        match field {
            LineField::ProductId => self.product_id = field.sanitize(raw),
            LineField::Quantity => self.quantity = field.sanitize(raw),
            LineField::UnitPrice => {}
        }
    }
}

/// Editable sale line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleLineDraft {
    /// Product identifier text
    pub product_id: String,
    /// Quantity text
    pub quantity: String,
    /// Unit price text
    pub unit_price: String,
}

impl LineDraft for SaleLineDraft {
    fn field(&self, field: LineField) -> Option<&str> {
        Some(match field {
            LineField::ProductId => &self.product_id,
            LineField::Quantity => &self.quantity,
            LineField::UnitPrice => &self.unit_price,
        })
    }

    fn set_field(&mut self, field: LineField, raw: &str) {
        let value = field.sanitize(raw);
        match field {
            LineField::ProductId => self.product_id = value,
            LineField::Quantity => self.quantity = value,
            LineField::UnitPrice => self.unit_price = value,
        }
    }
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "Campo requerido"));
    }
    Ok(())
}

fn require_lines<L>(lines: &[L], field: &str) -> Result<()> {
    if lines.is_empty() {
        return Err(Error::validation(field, "Agregue al menos un detalle"));
    }
    Ok(())
}

fn id_text(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// Order line in a create/update body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLinePayload {
    /// Product identifier
    pub id_producto: i64,
    /// Units ordered
    pub cantidad: i64,
}

/// Body of `POST /api/pedidos` and `PUT /api/pedidos/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPayload {
    /// Customer identifier
    pub id_cliente: i64,
    /// Delivery date, ISO-8601 UTC
    pub fecha_entrega: String,
    /// Status
    pub estado: OrderStatus,
    /// Whether the order is paid
    pub pagado: bool,
    /// Line items
    #[serde(rename = "detallesPedido")]
    pub detalles_pedido: Vec<OrderLinePayload>,
}

/// Order being created or edited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Identifier of the edited order, `None` while creating
    pub id: Option<i64>,
    /// Customer identifier text
    pub customer_id: String,
    /// Delivery date as `YYYY-MM-DD`
    pub delivery_date: String,
    /// Status
    pub status: OrderStatus,
    /// Whether the order is paid
    pub paid: bool,
    /// Line items
    pub lines: Vec<OrderLineDraft>,
    /// Embedded customer, display only
    pub customer: Customer,
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer_id: id_text(order.customer_id),
            delivery_date: date_input_value(&order.delivery_date),
            status: order.status,
            paid: order.paid,
            lines: order
                .lines
                .iter()
                .map(|line| OrderLineDraft {
                    product_id: id_text(line.product_id),
                    quantity: line.quantity.to_string(),
                })
                .collect(),
            customer: order.customer.clone(),
        }
    }
}

impl OrderDraft {
    /// Check required fields and build the request body
    ///
    /// # Errors
    ///
    /// Returns a validation error when the customer, the date or every line is
    /// missing, or when a numeric field does not parse.
    pub fn to_payload(&self) -> Result<OrderPayload> {
        require(&self.customer_id, "id_cliente")?;
        require(&self.delivery_date, "fecha_entrega")?;
        require_lines(&self.lines, "detallesPedido")?;

        let detalles_pedido = self
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                Ok(OrderLinePayload {
                    id_producto: parse_int_field(
                        &line.product_id,
                        &format!("detallesPedido[{index}].id_producto"),
                    )?,
                    cantidad: parse_int_field(
                        &line.quantity,
                        &format!("detallesPedido[{index}].cantidad"),
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(OrderPayload {
            id_cliente: parse_int_field(&self.customer_id, "id_cliente")?,
            fecha_entrega: to_iso_timestamp(&self.delivery_date, "fecha_entrega")?,
            estado: self.status,
            pagado: self.paid,
            detalles_pedido,
        })
    }
}

/// Sale line in a create body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleLinePayload {
    /// Product identifier
    pub id_producto: i64,
    /// Units sold
    pub cantidad: i64,
    /// Price per unit
    pub precio_unitario: f64,
}

/// Body of `POST /api/ventas`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePayload {
    /// Customer identifier
    pub id_cliente: i64,
    /// Sale date exactly as typed
    pub fecha_venta: String,
    /// Status
    pub estado: OrderStatus,
    /// Whether the sale is paid
    pub pagado: bool,
    /// Line items
    #[serde(rename = "detalleVentas")]
    pub detalle_ventas: Vec<SaleLinePayload>,
}

/// Sale being created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleDraft {
    /// Customer identifier text
    pub customer_id: String,
    /// Sale date as `YYYY-MM-DD`
    pub sale_date: String,
    /// Status
    pub status: OrderStatus,
    /// Whether the sale is paid
    pub paid: bool,
    /// Line items
    pub lines: Vec<SaleLineDraft>,
    /// Embedded customer, display only
    pub customer: Customer,
}

impl From<&Sale> for SaleDraft {
    fn from(sale: &Sale) -> Self {
        Self {
            customer_id: id_text(sale.customer_id),
            sale_date: date_input_value(&sale.sale_date),
            status: sale.status,
            paid: sale.paid,
            lines: sale
                .lines
                .iter()
                .map(|line| SaleLineDraft {
                    product_id: id_text(line.product_id),
                    quantity: line.quantity.to_string(),
                    unit_price: line.unit_price.to_string(),
                })
                .collect(),
            customer: sale.customer.clone(),
        }
    }
}

impl SaleDraft {
    /// Check required fields and build the request body
    ///
    /// The sale date is forwarded untouched, unlike order dates.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the customer, the date or every line is
    /// missing, or when a numeric field does not parse.
    pub fn to_payload(&self) -> Result<SalePayload> {
        require(&self.customer_id, "id_cliente")?;
        require(&self.sale_date, "fecha_venta")?;
        require_lines(&self.lines, "detalleVentas")?;

        let detalle_ventas = self
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                Ok(SaleLinePayload {
                    id_producto: parse_int_field(
                        &line.product_id,
                        &format!("detalleVentas[{index}].id_producto"),
                    )?,
                    cantidad: parse_int_field(
                        &line.quantity,
                        &format!("detalleVentas[{index}].cantidad"),
                    )?,
                    precio_unitario: parse_decimal_field(
                        &line.unit_price,
                        &format!("detalleVentas[{index}].precio_unitario"),
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SalePayload {
            id_cliente: parse_int_field(&self.customer_id, "id_cliente")?,
            fecha_venta: self.sale_date.clone(),
            estado: self.status,
            pagado: self.paid,
            detalle_ventas,
        })
    }
}

/// Body of `PUT /api/ventas/:id/estado`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPayload {
    /// New status
    pub estado: OrderStatus,
}

/// Body of `POST /api/productos` and `PUT /api/productos/:id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    /// Name
    pub nombre: String,
    /// Description
    pub descripcion: String,
    /// Unit price
    pub precio: f64,
    /// Units in stock
    pub stock: u32,
}

/// Product being created or edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Identifier of the edited product, `None` while creating
    pub id: Option<i64>,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Price text
    pub price: String,
    /// Stock text
    pub stock: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: String::new(),
            stock: "0".to_string(),
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
        }
    }
}

impl ProductDraft {
    /// Check required fields and build the request body
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank, the price is not a
    /// number or the stock is not a non-negative integer.
    pub fn to_payload(&self) -> Result<ProductPayload> {
        require(&self.name, "nombre")?;

        let stock = self
            .stock
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::validation("stock", "Debe ser un entero mayor o igual a 0"))?;

        Ok(ProductPayload {
            nombre: self.name.trim().to_string(),
            descripcion: self.description.clone(),
            precio: parse_decimal_field(&self.price, "precio")?,
            stock,
        })
    }
}

/// Body of `POST /api/usuarios/registro` and `PUT /api/usuarios/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct UserPayload {
    /// Display name
    #[validate(length(
        min = 3,
        message = "El nombre debe contener al menos 3 letras y no debe incluir números ni caracteres especiales."
    ))]
    pub nombre: String,

    /// Email
    #[validate(regex(
        path = *EMAIL_REGEX,
        message = "Ingrese un formato de correo electrónico válido."
    ))]
    pub email: String,

    /// Password; omitted on update to keep the current one
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, message = "La contraseña debe tener al menos 5 cáracteres."))]
    pub password: Option<String>,

    /// Role identifier
    pub id_rol: Option<i64>,
}

/// User being created or edited; the password is never seeded from the API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Identifier of the edited user, `None` while creating
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// New password
    pub password: String,
    /// Selected role
    pub role_id: Option<i64>,
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role_id: user.role_id,
        }
    }
}

impl UserDraft {
    /// Build the request body; validation is left to [`Validate::validate`]
    ///
    /// A blank password while editing keeps the stored one.
    #[must_use]
    pub fn to_payload(&self) -> UserPayload {
        let keep_password = self.id.is_some() && self.password.is_empty();
        UserPayload {
            nombre: self.name.clone(),
            email: self.email.trim().to_string(),
            password: (!keep_password).then(|| self.password.clone()),
            id_rol: self.role_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{OrderLine, SaleLine};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn complete_order_draft() -> OrderDraft {
        OrderDraft {
            customer_id: "9".to_string(),
            delivery_date: "2024-05-01".to_string(),
            lines: vec![OrderLineDraft {
                product_id: "4".to_string(),
                quantity: "2".to_string(),
            }],
            ..OrderDraft::default()
        }
    }

    fn field_of(err: &Error) -> &str {
        match err {
            Error::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_line_field_sanitizing() {
        let mut line = SaleLineDraft::default();
        line.set_field(LineField::Quantity, "12a3");
        line.set_field(LineField::ProductId, "x7");
        line.set_field(LineField::UnitPrice, "3.5.0€");

        assert_eq!(line.quantity, "123");
        assert_eq!(line.product_id, "7");
        assert_eq!(line.unit_price, "3.50");
        assert_eq!(line.field(LineField::UnitPrice), Some("3.50"));
    }

    #[test]
    fn test_order_line_has_no_price_column() {
        let mut line = OrderLineDraft::default();
        line.set_field(LineField::UnitPrice, "9");
        assert_eq!(line, OrderLineDraft::default());
        assert_eq!(line.field(LineField::UnitPrice), None);
    }

    #[test]
    fn test_order_payload() {
        let payload = complete_order_draft().to_payload().unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "id_cliente": 9,
                "fecha_entrega": "2024-05-01T00:00:00.000Z",
                "estado": "pendiente",
                "pagado": false,
                "detallesPedido": [{"id_producto": 4, "cantidad": 2}]
            })
        );
    }

    #[test]
    fn test_order_required_fields_checked_independently() {
        let mut missing_customer = complete_order_draft();
        missing_customer.customer_id.clear();
        let mut missing_date = complete_order_draft();
        missing_date.delivery_date.clear();
        let mut missing_lines = complete_order_draft();
        missing_lines.lines.clear();

        assert_eq!(field_of(&missing_customer.to_payload().unwrap_err()), "id_cliente");
        assert_eq!(field_of(&missing_date.to_payload().unwrap_err()), "fecha_entrega");
        assert_eq!(field_of(&missing_lines.to_payload().unwrap_err()), "detallesPedido");
    }

    #[test]
    fn test_order_blank_line_rejected() {
        let mut draft = complete_order_draft();
        draft.lines.push(OrderLineDraft::default());

        let err = draft.to_payload().unwrap_err();
        assert_eq!(field_of(&err), "detallesPedido[1].id_producto");
    }

    #[test]
    fn test_order_draft_seeded_from_order() {
        let order = Order {
            id: Some(5),
            customer_id: Some(9),
            delivery_date: "2024-05-01T00:00:00.000Z".to_string(),
            lines: vec![OrderLine {
                id: Some(1),
                product_id: Some(4),
                quantity: 3,
            }],
            customer: Customer {
                id: Some(9),
                name: "Ana".to_string(),
                contact: "3001234567".to_string(),
                ..Customer::default()
            },
            ..Order::default()
        };
        let draft = OrderDraft::from(&order);

        assert_eq!(draft.id, Some(5));
        assert_eq!(draft.customer_id, "9");
        assert_eq!(draft.delivery_date, "2024-05-01");
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].quantity, "3");
        assert_eq!(draft.customer, order.customer);

        let bare = OrderDraft::from(&Order::default());
        assert!(bare.lines.is_empty());
        assert_eq!(bare.customer, Customer::default());
    }

    #[test]
    fn test_sale_payload_keeps_raw_date() {
        let draft = SaleDraft {
            customer_id: "2".to_string(),
            sale_date: "2024-06-15".to_string(),
            status: OrderStatus::Completed,
            paid: true,
            lines: vec![SaleLineDraft {
                product_id: "1".to_string(),
                quantity: "3".to_string(),
                unit_price: "2500.5".to_string(),
            }],
            customer: Customer::default(),
        };

        assert_eq!(
            serde_json::to_value(draft.to_payload().unwrap()).unwrap(),
            json!({
                "id_cliente": 2,
                "fecha_venta": "2024-06-15",
                "estado": "completado",
                "pagado": true,
                "detalleVentas": [{"id_producto": 1, "cantidad": 3, "precio_unitario": 2500.5}]
            })
        );
    }

    #[test]
    fn test_sale_draft_seeded_from_sale() {
        let sale = Sale {
            customer_id: Some(2),
            sale_date: "2024-06-15T00:00:00.000Z".to_string(),
            lines: vec![SaleLine {
                id: None,
                product_id: Some(1),
                quantity: 3,
                unit_price: 2.5,
            }],
            ..Sale::default()
        };
        let draft = SaleDraft::from(&sale);

        assert_eq!(draft.sale_date, "2024-06-15");
        assert_eq!(draft.lines[0].unit_price, "2.5");
    }

    #[test]
    fn test_product_payload() {
        let draft = ProductDraft {
            name: "Kumis".to_string(),
            description: "Bebida láctea".to_string(),
            price: "3200".to_string(),
            stock: "12".to_string(),
            ..ProductDraft::default()
        };
        let payload = draft.to_payload().unwrap();

        assert_eq!(payload.stock, 12);
        assert!((payload.precio - 3200.0).abs() < f64::EPSILON);

        let negative = ProductDraft {
            stock: "-1".to_string(),
            ..draft.clone()
        };
        assert_eq!(field_of(&negative.to_payload().unwrap_err()), "stock");

        let unnamed = ProductDraft {
            name: "  ".to_string(),
            ..draft
        };
        assert_eq!(field_of(&unnamed.to_payload().unwrap_err()), "nombre");
    }

    #[test]
    fn test_product_draft_defaults() {
        let draft = ProductDraft::default();
        assert_eq!(draft.stock, "0");
        assert!(draft.price.is_empty());
    }

    #[test]
    fn test_user_payload_validation() {
        let draft = UserDraft {
            name: "Ana".to_string(),
            email: "not-an-email".to_string(),
            password: "abcde".to_string(),
            ..UserDraft::default()
        };
        let errors = draft.to_payload().validate().unwrap_err();
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(ToString::to_string)
            .collect();
        assert_eq!(fields, vec!["email".to_string()]);

        let valid = UserDraft {
            email: "a@b.com".to_string(),
            ..draft
        };
        assert!(valid.to_payload().validate().is_ok());
    }

    #[test]
    fn test_user_update_keeps_password_when_blank() {
        let user = User {
            id: Some(4),
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            role_id: Some(1),
        };
        let draft = UserDraft::from(&user);
        assert!(draft.password.is_empty());

        let payload = draft.to_payload();
        assert_eq!(payload.password, None);
        assert!(payload.validate().is_ok());
        assert!(serde_json::to_value(&payload).unwrap().get("password").is_none());
    }

    #[test]
    fn test_user_create_requires_password() {
        let draft = UserDraft {
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            ..UserDraft::default()
        };
        let errors = draft.to_payload().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
