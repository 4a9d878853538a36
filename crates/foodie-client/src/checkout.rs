//! # Checkout Flow
//!
//! Drives order submission over the shared cart:
//!
//! ```text
//!   Form ──submit──▶ Sending ──2xx──▶ Success ──acknowledge──▶ Form
//!     ▲                 │                                (cart cleared)
//!     │                 └──error──▶ Failed ──submit──▶ Sending
//!     └──────────── close (cart kept) ──────────────┘
//! ```
//!
//! One tracked request per submission, and at most one in flight: a submit
//! while `Sending` reports `Sending` and posts nothing. The cart survives a
//! failure and is only emptied when a successful order is acknowledged.

use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::progress::UserProgress;
use crate::request::{RequestConfig, RequestHook, RequestState};
use foodie_core::{Customer, OrderRequest, Price, StoreResult};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, instrument, warn};

/// What the checkout view should render
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    /// Editable form
    Form,
    /// Order in flight, inputs disabled
    Sending,
    /// Order accepted, with the server's response body
    Success(Value),
    /// Order rejected or not delivered, with the message to show
    Failed(String),
}

impl From<RequestState<Value>> for CheckoutPhase {
    fn from(state: RequestState<Value>) -> Self {
        match state {
            RequestState::Idle => CheckoutPhase::Form,
            RequestState::Loading => CheckoutPhase::Sending,
            RequestState::Succeeded(body) => CheckoutPhase::Success(body),
            RequestState::Failed(message) => CheckoutPhase::Failed(message),
        }
    }
}

/// Checkout over a shared cart and progress store
#[derive(Clone)]
pub struct CheckoutFlow {
    cart: CartStore,
    progress: UserProgress,
    request: RequestHook<Value>,
}

impl CheckoutFlow {
    pub fn new(cart: CartStore, progress: UserProgress, request: RequestHook<Value>) -> Self {
        Self {
            cart,
            progress,
            request,
        }
    }

    /// Checkout posting to `{base}/orders`
    pub fn from_config(
        client: Client,
        config: &ClientConfig,
        cart: CartStore,
        progress: UserProgress,
    ) -> Self {
        let request = RequestHook::new(client, config.orders_url(), RequestConfig::post(), None);
        Self::new(cart, progress, request)
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.request.state().into()
    }

    /// Amount shown on the form
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    pub fn request(&self) -> &RequestHook<Value> {
        &self.request
    }

    /// Validate and submit the current cart for `customer`.
    ///
    /// Validation failures come back as `Err` and send nothing. Everything
    /// after that, including server rejections, is reported as the
    /// returned phase. While an earlier order is still in flight this
    /// returns `Sending` without posting again.
    #[instrument(skip(self, customer))]
    pub async fn submit(&self, customer: Customer) -> StoreResult<CheckoutPhase> {
        let order = OrderRequest::new(&self.cart.snapshot(), customer);

        if let Err(e) = order.validate() {
            warn!(error = %e, "order not submitted");
            return Err(e);
        }

        info!(
            items = order.item_count(),
            total = %self.cart.total(),
            "submitting order"
        );

        let Some(state) = self.request.try_send_request(&order).await else {
            warn!("order already in flight, not resubmitting");
            return Ok(CheckoutPhase::Sending);
        };

        let phase: CheckoutPhase = state.into();
        if let CheckoutPhase::Failed(message) = &phase {
            warn!(%message, "order failed, cart kept for retry");
        }
        Ok(phase)
    }

    /// Confirm a successful order: clear the cart and the response, close
    /// the checkout overlay.
    ///
    /// Returns false, changing nothing, unless the last order succeeded.
    pub fn acknowledge(&self) -> bool {
        if self.request.state().succeeded().is_none() {
            return false;
        }

        self.cart.clear();
        self.request.clear_data();
        self.progress.hide_checkout();
        info!("order acknowledged");
        true
    }

    /// Close the checkout overlay, keeping the cart
    pub fn close(&self) {
        self.progress.hide_checkout();
    }
}
