//! Adapters from `watch` channels to snapshot streams.

use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::watch;

/// Stream the projected value of `rx`: once immediately, then after every
/// change. Changes that land between two polls collapse into one item. Ends
/// when the sender is dropped.
pub(crate) fn watch_stream<T, U, F>(rx: watch::Receiver<T>, project: F) -> BoxStream<'static, U>
where
    T: Send + Sync + 'static,
    U: Send + 'static,
    F: FnMut(&T) -> U + Send + 'static,
{
    futures::stream::unfold((rx, project, true), |(mut rx, mut project, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let item = project(&rx.borrow_and_update());
        Some((item, (rx, project, false)))
    })
    .boxed()
}

/// Drop items equal to the one emitted just before.
pub(crate) fn dedup<T>(stream: BoxStream<'static, T>) -> BoxStream<'static, T>
where
    T: Clone + PartialEq + Send + 'static,
{
    let mut last: Option<T> = None;
    stream
        .filter_map(move |item| {
            let fresh = last.as_ref() != Some(&item);
            if fresh {
                last = Some(item.clone());
            }
            futures::future::ready(fresh.then_some(item))
        })
        .boxed()
}
