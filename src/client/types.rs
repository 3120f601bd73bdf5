use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Per-call cancellation and timeout.
///
/// Every suspension point of a call (sending, reading the body, backoff sleeps,
/// stream reads) races against the token and the deadline. Cancelling yields
/// [`Error::Cancelled`]; an expired deadline yields a timeout error.
///
/// ```rust
/// use std::time::Duration;
/// use zai_sdk::RequestContext;
///
/// let ctx = RequestContext::new().with_timeout(Duration::from_secs(30));
/// let token = ctx.cancel_token().clone();
/// // hand `token` to another task; `token.cancel()` aborts the call
/// # drop(token);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the call to an existing token, e.g. a child of an application-wide one.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Bound the whole call, retries and backoff included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fix the deadline for one call. Called once when the call starts.
    pub(crate) fn scope(&self) -> CallScope {
        CallScope {
            cancel: self.cancel.clone(),
            deadline: self.timeout.map(|t| Instant::now() + t),
        }
    }
}

/// A started call: the caller's token plus an absolute deadline.
#[derive(Debug, Clone)]
pub(crate) struct CallScope {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl CallScope {
    /// Drive `fut` unless the call is cancelled or its deadline passes first.
    pub(crate) async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            _ = deadline => Err(Error::timeout("context deadline exceeded", None)),
            out = fut => Ok(out),
        }
    }

    pub(crate) async fn sleep(&self, delay: Duration) -> Result<()> {
        self.run(tokio::time::sleep(delay)).await
    }
}
