//! Order listing across `next`-linked pages.

use std::collections::{HashSet, VecDeque};

use futures_util::stream::{self, BoxStream, StreamExt};
use orbital_core::{Order, OrderState};
use reqwest::Method;
use tracing::debug;
use url::Url;

use super::OrdersClient;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpBackend;
use crate::models::OrderPage;
use crate::url::build_list_url;

/// Orders yielded when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 100;

/// Resolve the caller's limit: `None` is [`DEFAULT_LIMIT`], zero is unbounded.
const fn effective_limit(limit: Option<usize>) -> Option<usize> {
    match limit {
        None => Some(DEFAULT_LIMIT),
        Some(0) => None,
        Some(n) => Some(n),
    }
}

/// Forward-only cursor over the listing.
struct Walker<'a, B> {
    backend: &'a B,
    pending: VecDeque<Order>,
    next: Option<Url>,
    visited: HashSet<String>,
    yielded: usize,
    cap: Option<usize>,
}

impl<'a, B: HttpBackend> Walker<'a, B> {
    fn new(backend: &'a B, start: Url, cap: Option<usize>) -> Self {
        Self {
            backend,
            pending: VecDeque::new(),
            next: Some(start),
            visited: HashSet::new(),
            yielded: 0,
            cap,
        }
    }

    /// Yield the next order, fetching a page only when the buffer is empty
    /// and the cap has not been reached.
    async fn next_order(mut self) -> ClientResult<Option<(Order, Self)>> {
        loop {
            if self.cap.is_some_and(|cap| self.yielded >= cap) {
                return Ok(None);
            }
            if let Some(order) = self.pending.pop_front() {
                self.yielded += 1;
                return Ok(Some((order, self)));
            }
            let Some(url) = self.next.take() else {
                return Ok(None);
            };
            self.fetch_page(url).await?;
        }
    }

    async fn fetch_page(&mut self, url: Url) -> ClientResult<()> {
        if !self.visited.insert(url.to_string()) {
            return Err(ClientError::PageCycle {
                url: url.to_string(),
            });
        }

        debug!(url = %url, yielded = self.yielded, "Fetching orders page");
        let page: OrderPage = self.backend.request_json(Method::GET, &url, None).await?;

        self.pending.extend(page.orders);
        self.next = page.links.next.map(|next| url.join(&next)).transpose()?;
        Ok(())
    }
}

impl<B: HttpBackend> OrdersClient<B> {
    /// List orders lazily, following `next` links until the limit is met or
    /// the last page is reached.
    ///
    /// A failed page fetch is yielded as an error after the orders already
    /// produced, and ends the stream.
    pub(crate) fn list_orders(
        &self,
        state: Option<OrderState>,
        limit: Option<usize>,
    ) -> ClientResult<BoxStream<'_, ClientResult<Order>>> {
        let start = build_list_url(&self.config, state)?;
        let walker = Walker::new(&self.backend, start, effective_limit(limit));
        Ok(stream::try_unfold(walker, Walker::next_order).boxed())
    }
}
