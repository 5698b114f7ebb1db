//! Async row stream
//!
//! [`RowStream`] consumes the same producer channel as the polling reader but
//! waits with `poll_recv`, so it can be driven from a tokio task without
//! blocking a runtime thread.

use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use super::engine::{Engine, EngineState};
use super::stats::ParseStats;
use crate::Result;
use crate::app::models::{Columns, Row};

/// Stream of parsed rows in source order
///
/// A production error is yielded once as `Some(Err(..))`, after which the
/// stream ends. Dropping the stream cancels the producer.
#[derive(Debug)]
pub struct RowStream {
    engine: Option<Engine>,
}

impl RowStream {
    pub(crate) fn new(engine: Option<Engine>) -> Self {
        Self { engine }
    }

    /// Column list, once the producer has reported it
    pub fn columns(&self) -> Option<&Arc<Columns>> {
        self.engine.as_ref().and_then(Engine::columns)
    }

    /// Statistics, once the stream has ended successfully
    pub fn stats(&self) -> Option<&ParseStats> {
        self.engine.as_ref().and_then(Engine::stats)
    }
}

impl Stream for RowStream {
    type Item = Result<Row>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let Some(engine) = self.get_mut().engine.as_mut() else {
            return Poll::Ready(None);
        };

        if let Some(row) = engine.take_pending() {
            return Poll::Ready(Some(Ok(row)));
        }

        loop {
            if !matches!(engine.state(), EngineState::Running) {
                return Poll::Ready(None);
            }

            let message = ready!(engine.poll_recv(cx));
            match engine.accept(message) {
                Ok(Some(row)) => return Poll::Ready(Some(Ok(row))),
                Ok(None) => continue,
                Err(e) => return Poll::Ready(Some(Err(e))),
            }
        }
    }
}
