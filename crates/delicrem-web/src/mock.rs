//! In-memory backend and notifier for exercising the page controllers

use crate::api_client::{DashboardApi, endpoints};
use crate::notify::{Notice, Notifier};
use async_trait::async_trait;
use delicrem_core::drafts::{OrderLinePayload, SaleLinePayload};
use delicrem_core::{
    Customer, Error, Order, OrderLine, OrderPayload, OrderStatus, Product, ProductPayload, Result,
    Role, Sale, SaleLine, SalePayload, StatusPayload, User, UserPayload,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Request seen by [`MockDashboardApi`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: &'static str,
    /// Request path
    pub path: String,
    /// JSON body, if any
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    orders: Vec<Order>,
    products: Vec<Product>,
    users: Vec<User>,
    roles: Vec<Role>,
    sales: Vec<Sale>,
    requests: Vec<RecordedRequest>,
    fail_reads: bool,
    fail_writes: bool,
    next_id: i64,
}

impl MockState {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        1000 + self.next_id
    }
}

/// Backend double serving seeded collections and recording every request
#[derive(Debug, Clone, Default)]
pub struct MockDashboardApi {
    state: Arc<Mutex<MockState>>,
}

impl MockDashboardApi {
    /// Empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed orders
    #[must_use]
    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.lock().orders = orders;
        self
    }

    /// Seed products
    #[must_use]
    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.lock().products = products;
        self
    }

    /// Seed users
    #[must_use]
    pub fn with_users(self, users: Vec<User>) -> Self {
        self.lock().users = users;
        self
    }

    /// Seed roles
    #[must_use]
    pub fn with_roles(self, roles: Vec<Role>) -> Self {
        self.lock().roles = roles;
        self
    }

    /// Seed sales
    #[must_use]
    pub fn with_sales(self, sales: Vec<Sale>) -> Self {
        self.lock().sales = sales;
        self
    }

    /// Make every `GET` fail with a 500
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make every write fail with a 500
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Every request in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests other than `GET`
    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.method != "GET")
            .cloned()
            .collect()
    }

    /// Number of `GET`s issued for `path`
    pub fn fetch_count(&self, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.method == "GET" && request.path == path)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self, path: &str) -> Result<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            body: None,
        });
        if state.fail_reads {
            return Err(simulated_failure());
        }
        Ok(state)
    }

    fn write<B: Serialize>(
        &self,
        method: &'static str,
        path: String,
        body: Option<&B>,
    ) -> Result<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            method,
            path,
            body: body.map(serde_json::to_value).transpose()?,
        });
        if state.fail_writes {
            return Err(simulated_failure());
        }
        Ok(state)
    }
}

fn simulated_failure() -> Error {
    Error::Api {
        status: 500,
        message: "simulated failure".to_string(),
    }
}

fn not_found(resource: &str, id: i64) -> Error {
    Error::NotFound {
        resource: format!("{resource} {id}"),
    }
}

fn order_lines(lines: &[OrderLinePayload]) -> Vec<OrderLine> {
    lines
        .iter()
        .map(|line| OrderLine {
            id: None,
            product_id: Some(line.id_producto),
            quantity: line.cantidad,
        })
        .collect()
}

fn sale_lines(lines: &[SaleLinePayload]) -> Vec<SaleLine> {
    lines
        .iter()
        .map(|line| SaleLine {
            id: None,
            product_id: Some(line.id_producto),
            quantity: line.cantidad,
            unit_price: line.precio_unitario,
        })
        .collect()
}

fn apply_order(order: &mut Order, payload: &OrderPayload) {
    order.customer_id = Some(payload.id_cliente);
    order.delivery_date.clone_from(&payload.fecha_entrega);
    order.status = payload.estado;
    order.paid = payload.pagado;
    order.lines = order_lines(&payload.detalles_pedido);
}

fn apply_product(product: &mut Product, payload: &ProductPayload) {
    product.name.clone_from(&payload.nombre);
    product.description.clone_from(&payload.descripcion);
    product.price = payload.precio;
    product.stock = payload.stock;
}

fn apply_user(user: &mut User, payload: &UserPayload) {
    user.name.clone_from(&payload.nombre);
    user.email.clone_from(&payload.email);
    user.role_id = payload.id_rol;
}

#[async_trait(?Send)]
impl DashboardApi for MockDashboardApi {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(self.read(endpoints::ORDERS)?.orders.clone())
    }

    async fn create_order(&self, order: &OrderPayload) -> Result<()> {
        let mut state = self.write("POST", endpoints::ORDERS.to_string(), Some(order))?;
        let mut created = Order {
            id: Some(state.allocate_id()),
            customer: Customer {
                id: Some(order.id_cliente),
                ..Customer::default()
            },
            ..Order::default()
        };
        apply_order(&mut created, order);
        state.orders.push(created);
        Ok(())
    }

    async fn update_order(&self, id: i64, order: &OrderPayload) -> Result<()> {
        let path = format!("{}/{id}", endpoints::ORDERS);
        let mut state = self.write("PUT", path, Some(order))?;
        let existing = state
            .orders
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or_else(|| not_found("pedido", id))?;
        apply_order(existing, order);
        Ok(())
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        let path = format!("{}/{id}", endpoints::ORDERS);
        let mut state = self.write::<()>("DELETE", path, None)?;
        let before = state.orders.len();
        state.orders.retain(|order| order.id != Some(id));
        if state.orders.len() == before {
            return Err(not_found("pedido", id));
        }
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.read(endpoints::PRODUCTS)?.products.clone())
    }

    async fn create_product(&self, product: &ProductPayload) -> Result<()> {
        let mut state = self.write("POST", endpoints::PRODUCTS.to_string(), Some(product))?;
        let mut created = Product {
            id: Some(state.allocate_id()),
            ..Product::default()
        };
        apply_product(&mut created, product);
        state.products.push(created);
        Ok(())
    }

    async fn update_product(&self, id: i64, product: &ProductPayload) -> Result<()> {
        let path = format!("{}/{id}", endpoints::PRODUCTS);
        let mut state = self.write("PUT", path, Some(product))?;
        let existing = state
            .products
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or_else(|| not_found("producto", id))?;
        apply_product(existing, product);
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        let path = format!("{}/{id}", endpoints::PRODUCTS);
        let mut state = self.write::<()>("DELETE", path, None)?;
        let before = state.products.len();
        state.products.retain(|product| product.id != Some(id));
        if state.products.len() == before {
            return Err(not_found("producto", id));
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.read(endpoints::USERS)?.users.clone())
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.read(endpoints::ROLES)?.roles.clone())
    }

    async fn register_user(&self, user: &UserPayload) -> Result<()> {
        let mut state = self.write(
            "POST",
            endpoints::USER_REGISTRATION.to_string(),
            Some(user),
        )?;
        let mut created = User {
            id: Some(state.allocate_id()),
            ..User::default()
        };
        apply_user(&mut created, user);
        state.users.push(created);
        Ok(())
    }

    async fn update_user(&self, id: i64, user: &UserPayload) -> Result<()> {
        let path = format!("{}/{id}", endpoints::USERS);
        let mut state = self.write("PUT", path, Some(user))?;
        let existing = state
            .users
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or_else(|| not_found("usuario", id))?;
        apply_user(existing, user);
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let path = format!("{}/{id}", endpoints::USERS);
        let mut state = self.write::<()>("DELETE", path, None)?;
        let before = state.users.len();
        state.users.retain(|user| user.id != Some(id));
        if state.users.len() == before {
            return Err(not_found("usuario", id));
        }
        Ok(())
    }

    async fn list_sales(&self) -> Result<Vec<Sale>> {
        Ok(self.read(endpoints::SALES)?.sales.clone())
    }

    async fn create_sale(&self, sale: &SalePayload) -> Result<()> {
        let mut state = self.write("POST", endpoints::SALES.to_string(), Some(sale))?;
        let created = Sale {
            id: Some(state.allocate_id()),
            customer_id: Some(sale.id_cliente),
            sale_date: sale.fecha_venta.clone(),
            status: sale.estado,
            paid: sale.pagado,
            lines: sale_lines(&sale.detalle_ventas),
            customer: Customer {
                id: Some(sale.id_cliente),
                ..Customer::default()
            },
            ..Sale::default()
        };
        state.sales.push(created);
        Ok(())
    }

    async fn update_sale_status(&self, id: i64, status: &StatusPayload) -> Result<()> {
        let path = format!("{}/{id}/estado", endpoints::SALES);
        let mut state = self.write("PUT", path, Some(status))?;
        let existing = state
            .sales
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or_else(|| not_found("venta", id))?;
        existing.status = status.estado;
        Ok(())
    }
}

#[derive(Debug)]
struct NotifierState {
    notices: Vec<Notice>,
    confirmations: Vec<String>,
    confirm_answer: bool,
    status_answer: Option<OrderStatus>,
}

impl Default for NotifierState {
    fn default() -> Self {
        Self {
            notices: Vec::new(),
            confirmations: Vec::new(),
            confirm_answer: true,
            status_answer: None,
        }
    }
}

/// Notifier that records notices and answers prompts with preset values
///
/// Confirms by default and cancels status prompts unless told otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    state: Arc<Mutex<NotifierState>>,
}

impl RecordingNotifier {
    /// Confirming notifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer confirmations with `answer`
    pub fn set_confirm_answer(&self, answer: bool) {
        self.lock().confirm_answer = answer;
    }

    /// Answer status prompts with `status`
    pub fn set_status_answer(&self, status: Option<OrderStatus>) {
        self.lock().status_answer = status;
    }

    /// Notices shown so far
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().notices.clone()
    }

    /// Most recent notice
    pub fn last_notice(&self) -> Option<Notice> {
        self.lock().notices.last().cloned()
    }

    /// Texts of the confirmations asked so far
    pub fn confirmations(&self) -> Vec<String> {
        self.lock().confirmations.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NotifierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.lock().notices.push(notice);
    }

    fn confirm(&self, _title: &str, text: &str) -> bool {
        let mut state = self.lock();
        state.confirmations.push(text.to_string());
        state.confirm_answer
    }

    fn select_status(&self, _title: &str) -> Option<OrderStatus> {
        self.lock().status_answer
    }
}
