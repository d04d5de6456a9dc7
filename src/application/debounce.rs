use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 連続呼び出しをまとめ、最後の呼び出しから `delay` 静止した時点で1回だけ `f` を起動する。
///
/// ワーカータスクが1つだけタイマーを保持する。新しい呼び出しは保留中の値を置き換え、
/// タイマーを張り直す。起動した `f` の Future は切り離して spawn されるため、
/// 実行中も次の入力を受け付ける。ハンドルを drop すると保留中の値は捨てられる。
///
/// tokio ランタイム内で生成すること。
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    worker: JoinHandle<()>,
    delay: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, f: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(rx, delay, f));
        Self { tx, worker, delay }
    }

    /// 値を渡して静止期間を開始し直す。戻り値はない。
    pub fn call(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("debounce worker has stopped; dropping call");
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run_worker<T, F, Fut>(mut rx: mpsc::UnboundedReceiver<T>, delay: Duration, f: F)
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    while let Some(mut latest) = rx.recv().await {
        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(value) => latest = value,
                    None => return,
                },
                _ = tokio::time::sleep(delay) => break,
            }
        }
        tokio::spawn(f(latest));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording(delay_ms: u64) -> (Debouncer<u32>, Arc<Mutex<Vec<u32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let debouncer = Debouncer::new(Duration::from_millis(delay_ms), move |v: u32| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(v);
            }
        });
        (debouncer, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_fires_once_with_last_value() {
        let (debouncer, seen) = recording(300);

        for i in 0..5 {
            debouncer.call(i);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(*seen.lock().unwrap(), vec![4]);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_calls_each_fire() {
        let (debouncer, seen) = recording(300);

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_discards_pending_call() {
        let (debouncer, seen) = recording(300);

        debouncer.call(7);
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert!(seen.lock().unwrap().is_empty());
    }
}
