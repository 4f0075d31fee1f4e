//! Fixed-cadence resampling of a stream

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Extension trait to add resampling to any Stream
pub trait ResampleExt: Stream {
    /// Emit the most recent item once per interval
    ///
    /// Unlike throttling, an item is repeated on every tick until a newer one arrives,
    /// which is what a render loop redrawing the last known result needs. Nothing is
    /// emitted before the first item; the stream ends when the source ends.
    fn resample(self, period: Duration) -> Resample<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Resample::new(self, period)
    }
}

impl<T: Stream> ResampleExt for T {}

pin_project! {
    /// A stream combinator that holds the latest item and re-emits it on a fixed cadence
    pub struct Resample<S: Stream> {
        #[pin]
        stream: S,
        interval: Interval,
        latest: Option<S::Item>,
        source_done: bool,
    }
}

impl<S: Stream> Resample<S> {
    /// Create a new resampled stream
    pub fn new(stream: S, period: Duration) -> Self {
        let mut interval = interval(period);
        // A slow consumer gets the next tick late rather than a burst of repeats
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { stream, interval, latest: None, source_done: false }
    }
}

impl<S> Stream for Resample<S>
where
    S: Stream,
    S::Item: Clone,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // Drain everything available, keeping only the latest
        while !*this.source_done {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => *this.latest = Some(item),
                Poll::Ready(None) => *this.source_done = true,
                Poll::Pending => break,
            }
        }

        if *this.source_done {
            return Poll::Ready(None);
        }

        ready!(this.interval.poll_tick(cx));

        match this.latest.as_ref() {
            Some(item) => Poll::Ready(Some(item.clone())),
            // The source registered our waker when it returned Pending
            None => Poll::Pending,
        }
    }
}
