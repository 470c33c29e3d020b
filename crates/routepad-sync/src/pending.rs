//! Network calls that outlive the borrow of whoever issued them.

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::ClientError;

/// An issued request plus the context needed to apply its outcome.
///
/// The future owns its client and arguments, so the issuer stays free for
/// other calls while the request is outstanding. Overlapping requests are
/// not ordered against each other; the caller applies each [`Resolved`] as
/// it lands.
#[must_use = "a pending request does nothing until resolved"]
pub struct Pending<T, C = ()> {
    context: C,
    future: BoxFuture<'static, Result<T, ClientError>>,
}

/// Outcome of a [`Pending`] request, handed back to its issuer.
#[derive(Debug)]
pub struct Resolved<T, C = ()> {
    pub context: C,
    pub result: Result<T, ClientError>,
}

impl<T, C> Pending<T, C> {
    pub fn new<F>(context: C, future: F) -> Self
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self {
            context,
            future: future.boxed(),
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub async fn resolve(self) -> Resolved<T, C> {
        Resolved {
            result: self.future.await,
            context: self.context,
        }
    }
}
