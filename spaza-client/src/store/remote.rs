//! HTTP Entity Store
//!
//! Speaks the platform backend's `ApiResponse` envelope. All failure mapping
//! happens in one place: envelope error codes take precedence, HTTP status
//! is the fallback for responses without a decodable envelope.

use crate::config::ClientConfig;
use crate::context::CallerContext;
use crate::error::{ClientError, ClientResult};
use crate::store::EntityStore;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ApiResponse;
use shared::models::{
    ApplicationDetails, ApplicationRole, Order, OrderStatus, PickupOrderCreate, ReviewDecision,
    RoleApplication,
};

/// Network-backed Entity Store
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    /// Build a store from configuration
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn auth_header(ctx: &CallerContext) -> String {
        // the opaque identity doubles as the bearer capability
        format!("Bearer {}", ctx.identity)
    }

    async fn get<T: DeserializeOwned>(&self, ctx: &CallerContext, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, Self::auth_header(ctx))
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    async fn get_optional<T: DeserializeOwned>(
        &self,
        ctx: &CallerContext,
        path: &str,
    ) -> ClientResult<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, Self::auth_header(ctx))
            .send()
            .await?;
        Self::handle_envelope(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        ctx: &CallerContext,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, Self::auth_header(ctx))
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// Decode a response whose envelope must carry data
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        Self::handle_envelope(resp)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("missing response data".into()))
    }

    /// Decode a response; `Ok(None)` when the envelope legitimately carries
    /// no data (e.g. no application on file)
    async fn handle_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> ClientResult<Option<T>> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.is_success() {
            let envelope: ApiResponse<T> = serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
            if let Some(code) = envelope.error_code() {
                return Err(ClientError::from_wire(code, envelope.message));
            }
            if !envelope.is_success() {
                return Err(ClientError::InvalidResponse(format!(
                    "unrecognized error code {:?}: {}",
                    envelope.code, envelope.message
                )));
            }
            return Ok(envelope.data);
        }

        // error path: prefer the envelope's code over the bare HTTP status
        if let Ok(envelope) = serde_json::from_slice::<ApiResponse<()>>(&bytes)
            && let Some(code) = envelope.error_code()
        {
            return Err(ClientError::from_wire(code, envelope.message));
        }

        let text = String::from_utf8_lossy(&bytes).to_string();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Forbidden(text),
            StatusCode::NOT_FOUND => ClientError::NotFound(text),
            StatusCode::BAD_REQUEST => ClientError::Validation(text),
            StatusCode::CONFLICT => ClientError::Conflict(text),
            StatusCode::UNPROCESSABLE_ENTITY => ClientError::InvalidState(text),
            _ => ClientError::Transport(text),
        })
    }
}

#[async_trait]
impl EntityStore for RemoteStore {
    async fn list_all_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        self.get(ctx, "/api/orders").await
    }

    async fn list_eligible_driver_orders(&self, ctx: &CallerContext) -> ClientResult<Vec<Order>> {
        self.get(ctx, "/api/orders/driver-eligible").await
    }

    async fn retailer_orders(
        &self,
        ctx: &CallerContext,
        retailer_id: &str,
    ) -> ClientResult<Vec<Order>> {
        self.get(ctx, &format!("/api/retailers/{}/orders", retailer_id))
            .await
    }

    async fn pickup_point_orders(
        &self,
        ctx: &CallerContext,
        pickup_point_id: &str,
    ) -> ClientResult<Vec<Order>> {
        self.get(ctx, &format!("/api/pickup-points/{}/orders", pickup_point_id))
            .await
    }

    async fn get_order(&self, ctx: &CallerContext, order_id: &str) -> ClientResult<Order> {
        self.get(ctx, &format!("/api/orders/{}", order_id)).await
    }

    async fn update_order_status(
        &self,
        ctx: &CallerContext,
        order_id: &str,
        status: OrderStatus,
    ) -> ClientResult<Order> {
        #[derive(Serialize)]
        struct UpdateStatusRequest {
            status: OrderStatus,
        }

        self.post(
            ctx,
            &format!("/api/orders/{}/status", order_id),
            &UpdateStatusRequest { status },
        )
        .await
    }

    async fn create_pickup_order(
        &self,
        ctx: &CallerContext,
        input: &PickupOrderCreate,
    ) -> ClientResult<Order> {
        self.post(ctx, "/api/orders/pickup", input).await
    }

    async fn submit_application(
        &self,
        ctx: &CallerContext,
        details: &ApplicationDetails,
        document_refs: &[String],
    ) -> ClientResult<RoleApplication> {
        #[derive(Serialize)]
        struct SubmitRequest<'a> {
            details: &'a ApplicationDetails,
            document_refs: &'a [String],
        }

        self.post(
            ctx,
            "/api/applications",
            &SubmitRequest {
                details,
                document_refs,
            },
        )
        .await
    }

    async fn my_application(
        &self,
        ctx: &CallerContext,
        role: ApplicationRole,
    ) -> ClientResult<Option<RoleApplication>> {
        self.get_optional(ctx, &format!("/api/applications/me?role={}", role))
            .await
    }

    async fn list_pending_applications(
        &self,
        ctx: &CallerContext,
    ) -> ClientResult<Vec<RoleApplication>> {
        self.get(ctx, "/api/applications/pending").await
    }

    async fn review_application(
        &self,
        ctx: &CallerContext,
        application_id: &str,
        decision: ReviewDecision,
        reason: Option<&str>,
    ) -> ClientResult<RoleApplication> {
        #[derive(Serialize)]
        struct ReviewRequest<'a> {
            decision: ReviewDecision,
            #[serde(skip_serializing_if = "Option::is_none")]
            reason: Option<&'a str>,
        }

        self.post(
            ctx,
            &format!("/api/applications/{}/review", application_id),
            &ReviewRequest { decision, reason },
        )
        .await
    }

    async fn is_caller_admin(&self, ctx: &CallerContext) -> ClientResult<bool> {
        self.get(ctx, "/api/auth/is-admin").await
    }
}
