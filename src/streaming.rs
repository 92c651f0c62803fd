use futures_util::{pin_mut, Stream, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

/// Spaces the items of `stream` at least `period` apart. The first item is
/// released immediately.
pub fn paced<S>(stream: S, period: Duration) -> impl Stream<Item = S::Item>
where
    S: Stream,
{
    tokio_stream::StreamExt::throttle(stream, period)
}

/// Outbound half of a client stream driven by its own task.
///
/// The task pushes `items` into a bounded channel, paced by `period`, and
/// drops the sender when done; the receiving side then observes end of
/// stream. The handle resolves to the number of items handed over.
pub struct RequestFeed<T> {
    stream: ReceiverStream<T>,
    task: JoinHandle<usize>,
}

impl<T> RequestFeed<T>
where
    T: Send + 'static,
{
    pub fn spawn<I>(buffer: usize, items: I, period: Duration) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<T>(buffer.max(1));
        let items = paced(futures_util::stream::iter(items), period);

        let task = tokio::spawn(async move {
            pin_mut!(items);
            let mut sent = 0;
            while let Some(item) = items.next().await {
                if tx.send(item).await.is_err() {
                    tracing::debug!(sent, "request stream closed by the transport");
                    break;
                }
                sent += 1;
            }
            sent
        });

        Self {
            stream: ReceiverStream::new(rx),
            task,
        }
    }

    pub fn into_parts(self) -> (ReceiverStream<T>, JoinHandle<usize>) {
        (self.stream, self.task)
    }
}
