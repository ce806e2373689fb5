//! HTTP client for communicating with the Delicrem REST backend

use async_trait::async_trait;
use delicrem_core::config::ApiConfig;
use delicrem_core::{
    Error, Order, OrderPayload, OrderRecord, Product, ProductPayload, ProductRecord, Result, Role,
    RoleRecord, Sale, SalePayload, SaleRecord, StatusPayload, User, UserPayload, UserRecord,
};
use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

/// Backend resource paths
pub mod endpoints {
    /// Orders collection
    pub const ORDERS: &str = "/api/pedidos";
    /// Products collection
    pub const PRODUCTS: &str = "/api/productos";
    /// Users collection
    pub const USERS: &str = "/api/usuarios";
    /// User registration
    pub const USER_REGISTRATION: &str = "/api/usuarios/registro";
    /// Roles collection
    pub const ROLES: &str = "/api/roles";
    /// Sales collection
    pub const SALES: &str = "/api/ventas";
}

/// Every backend operation the dashboard pages use
///
/// Lists come back normalized; writes only report success or failure.
#[async_trait(?Send)]
pub trait DashboardApi {
    /// `GET /api/pedidos`
    async fn list_orders(&self) -> Result<Vec<Order>>;
    /// `POST /api/pedidos`
    async fn create_order(&self, order: &OrderPayload) -> Result<()>;
    /// `PUT /api/pedidos/:id`
    async fn update_order(&self, id: i64, order: &OrderPayload) -> Result<()>;
    /// `DELETE /api/pedidos/:id`
    async fn delete_order(&self, id: i64) -> Result<()>;

    /// `GET /api/productos`
    async fn list_products(&self) -> Result<Vec<Product>>;
    /// `POST /api/productos`
    async fn create_product(&self, product: &ProductPayload) -> Result<()>;
    /// `PUT /api/productos/:id`
    async fn update_product(&self, id: i64, product: &ProductPayload) -> Result<()>;
    /// `DELETE /api/productos/:id`
    async fn delete_product(&self, id: i64) -> Result<()>;

    /// `GET /api/usuarios`
    async fn list_users(&self) -> Result<Vec<User>>;
    /// `GET /api/roles`
    async fn list_roles(&self) -> Result<Vec<Role>>;
    /// `POST /api/usuarios/registro`
    async fn register_user(&self, user: &UserPayload) -> Result<()>;
    /// `PUT /api/usuarios/:id`
    async fn update_user(&self, id: i64, user: &UserPayload) -> Result<()>;
    /// `DELETE /api/usuarios/:id`
    async fn delete_user(&self, id: i64) -> Result<()>;

    /// `GET /api/ventas`
    async fn list_sales(&self) -> Result<Vec<Sale>>;
    /// `POST /api/ventas`
    async fn create_sale(&self, sale: &SalePayload) -> Result<()>;
    /// `PUT /api/ventas/:id/estado`
    async fn update_sale_status(&self, id: i64, status: &StatusPayload) -> Result<()>;
}

/// API client for making HTTP requests to the Delicrem backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client; a trailing slash on `base_url` is dropped
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client for the configured backend
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Backend origin requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| Error::Request {
                message: format!("Failed to fetch {path}: {e}"),
            })?;
        let response = Self::check_status(response).await?;

        let body = response.json::<T>().await.map_err(|e| Error::Request {
            message: format!("Failed to parse response from {path}: {e}"),
        })?;
        debug!(path, "fetched collection");
        Ok(body)
    }

    async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .request(method.clone(), self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Request {
                message: format!("Failed to send {method} {path}: {e}"),
            })?;
        Self::check_status(response).await?;
        info!(%method, path, "request accepted");
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| Error::Request {
                message: format!("Failed to send DELETE {path}: {e}"),
            })?;
        Self::check_status(response).await?;
        info!(path, "resource deleted");
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            body
        };
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait(?Send)]
impl DashboardApi for ApiClient {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let records: Vec<OrderRecord> = self.get_json(endpoints::ORDERS).await?;
        Ok(records.into_iter().map(OrderRecord::normalize).collect())
    }

    async fn create_order(&self, order: &OrderPayload) -> Result<()> {
        self.send_json(Method::POST, endpoints::ORDERS, order).await
    }

    async fn update_order(&self, id: i64, order: &OrderPayload) -> Result<()> {
        let path = format!("{}/{id}", endpoints::ORDERS);
        self.send_json(Method::PUT, &path, order).await
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}/{id}", endpoints::ORDERS)).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let records: Vec<ProductRecord> = self.get_json(endpoints::PRODUCTS).await?;
        Ok(records.into_iter().map(ProductRecord::normalize).collect())
    }

    async fn create_product(&self, product: &ProductPayload) -> Result<()> {
        self.send_json(Method::POST, endpoints::PRODUCTS, product).await
    }

    async fn update_product(&self, id: i64, product: &ProductPayload) -> Result<()> {
        let path = format!("{}/{id}", endpoints::PRODUCTS);
        self.send_json(Method::PUT, &path, product).await
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}/{id}", endpoints::PRODUCTS)).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let records: Vec<UserRecord> = self.get_json(endpoints::USERS).await?;
        Ok(records.into_iter().map(UserRecord::normalize).collect())
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        let records: Vec<RoleRecord> = self.get_json(endpoints::ROLES).await?;
        Ok(records.into_iter().filter_map(RoleRecord::normalize).collect())
    }

    async fn register_user(&self, user: &UserPayload) -> Result<()> {
        self.send_json(Method::POST, endpoints::USER_REGISTRATION, user)
            .await
    }

    async fn update_user(&self, id: i64, user: &UserPayload) -> Result<()> {
        let path = format!("{}/{id}", endpoints::USERS);
        self.send_json(Method::PUT, &path, user).await
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.delete(&format!("{}/{id}", endpoints::USERS)).await
    }

    async fn list_sales(&self) -> Result<Vec<Sale>> {
        let records: Vec<SaleRecord> = self.get_json(endpoints::SALES).await?;
        Ok(records.into_iter().map(SaleRecord::normalize).collect())
    }

    async fn create_sale(&self, sale: &SalePayload) -> Result<()> {
        self.send_json(Method::POST, endpoints::SALES, sale).await
    }

    async fn update_sale_status(&self, id: i64, status: &StatusPayload) -> Result<()> {
        let path = format!("{}/{id}/estado", endpoints::SALES);
        self.send_json(Method::PUT, &path, status).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use delicrem_core::OrderStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_base_url_trailing_slash_dropped() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url(endpoints::ROLES), "http://localhost:3000/api/roles");
    }

    #[tokio::test]
    async fn test_list_orders_normalizes_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/pedidos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id_pedido": 1,
                    "id_cliente": 9,
                    "fecha_entrega": "2024-05-01T00:00:00.000Z",
                    "estado": "completado",
                    "pagado": true,
                    "clientesh": {"nombre": "Ana"}
                },
                {"id_pedido": 2}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let orders = ApiClient::new(server.uri()).list_orders().await.unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].customer.name, "Ana");
        assert_eq!(orders[0].status, OrderStatus::Completed);
        assert!(orders[1].lines.is_empty());
        assert_eq!(orders[1].customer.name, "");
    }

    #[tokio::test]
    async fn test_register_user_posts_to_registration_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/usuarios/registro"))
            .and(body_json(json!({
                "nombre": "Ana",
                "email": "a@b.com",
                "password": "abcde",
                "id_rol": 2
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let payload = UserPayload {
            nombre: "Ana".to_string(),
            email: "a@b.com".to_string(),
            password: Some("abcde".to_string()),
            id_rol: Some(2),
        };
        ApiClient::new(server.uri())
            .register_user(&payload)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_sale_status_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/ventas/7/estado"))
            .and(body_json(json!({"estado": "completado"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        ApiClient::new(server.uri())
            .update_sale_status(
                7,
                &StatusPayload {
                    estado: OrderStatus::Completed,
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_product() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/productos/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        ApiClient::new(server.uri()).delete_product(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/roles"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = ApiClient::new(server.uri()).list_roles().await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, ref message } if message == "boom"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_maps_to_request_error() {
        // Nothing listens on port 9 (discard) in the test environment
        let err = ApiClient::new("http://127.0.0.1:9")
            .list_sales()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Request { .. }));
    }
}
