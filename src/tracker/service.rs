use super::{
    metrics::TrackerMetrics,
    pending::{should_check, PendingTransaction},
};
use crate::{
    config::TrackerConfig, notify::TransactionNotification, transport::ReceiptLookup,
    types::Receipt,
};
use alloy::primitives::{ChainId, TxHash};
use chrono::Utc;
use futures_util::{stream::FuturesUnordered, StreamExt};
use std::{
    collections::HashMap,
    future::{Future, IntoFuture},
    pin::Pin,
    sync::Arc,
};
use tokio::{
    sync::{mpsc, oneshot},
    time::timeout,
};
use tracing::{debug, error, warn};

/// Messages accepted by the [`ConfirmationTracker`].
#[derive(Debug)]
pub enum TrackerMessage {
    /// Start tracking a submitted transaction.
    Track {
        /// Chain the transaction was submitted on.
        chain_id: ChainId,
        /// Hash of the transaction.
        hash: TxHash,
    },
    /// Stop tracking a transaction. This is the only way a transaction leaves
    /// the pending set.
    Untrack {
        /// Chain the transaction was submitted on.
        chain_id: ChainId,
        /// Hash of the transaction.
        hash: TxHash,
    },
    /// A new confirmed block was observed. The sole trigger for a tracking
    /// cycle.
    NewBlock {
        /// Chain the block belongs to.
        chain_id: ChainId,
        /// The new block number.
        number: u64,
    },
    /// Read access to a chain's pending set.
    PendingTransactions {
        /// Chain to read.
        chain_id: ChainId,
        /// Channel for the snapshot.
        tx: oneshot::Sender<Vec<PendingTransaction>>,
    },
}

/// Handle to communicate with the [`ConfirmationTracker`].
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    command_tx: mpsc::UnboundedSender<TrackerMessage>,
}

impl TrackerHandle {
    /// Starts tracking a transaction.
    pub fn track(&self, chain_id: ChainId, hash: TxHash) {
        let _ = self.command_tx.send(TrackerMessage::Track { chain_id, hash });
    }

    /// Stops tracking a transaction.
    pub fn untrack(&self, chain_id: ChainId, hash: TxHash) {
        let _ = self.command_tx.send(TrackerMessage::Untrack { chain_id, hash });
    }

    /// Feeds a new block number into the tracker.
    pub fn on_block(&self, chain_id: ChainId, number: u64) {
        let _ = self.command_tx.send(TrackerMessage::NewBlock { chain_id, number });
    }

    /// Returns a snapshot of a chain's pending transactions.
    pub async fn pending_transactions(&self, chain_id: ChainId) -> Vec<PendingTransaction> {
        let (tx, rx) = oneshot::channel();
        let _ = self.command_tx.send(TrackerMessage::PendingTransactions { chain_id, tx });
        rx.await.unwrap_or_default()
    }
}

/// Service tracking submitted transactions through confirmation.
///
/// Owns the per-chain pending set; all mutation funnels through this service.
/// On each new block it evaluates [`should_check`] for every pending
/// transaction of that chain and issues one receipt lookup per qualifying
/// transaction. Lookups within a cycle run concurrently with no ordering
/// guarantee, but the cycle is drained before the next message is handled, so
/// no hash ever has two checks in flight and a chain switch cannot write into
/// another chain's set.
pub struct ConfirmationTracker<L> {
    /// Receipt transport.
    lookup: Arc<L>,
    /// Tracker configuration.
    config: TrackerConfig,
    /// Pending transactions per chain, keyed by hash.
    pending: HashMap<ChainId, HashMap<TxHash, PendingTransaction>>,
    /// Incoming messages for the service.
    command_rx: mpsc::UnboundedReceiver<TrackerMessage>,
    /// Sink for finality notifications.
    notifications_tx: mpsc::UnboundedSender<TransactionNotification>,
    /// Metrics for the tracker.
    metrics: TrackerMetrics,
}

impl<L: ReceiptLookup> ConfirmationTracker<L> {
    /// Creates a new [`ConfirmationTracker`].
    ///
    /// Returns the service itself, a handle for feeding it, and the stream of
    /// finality notifications for a collaborator to render.
    pub fn new(
        lookup: L,
        config: TrackerConfig,
    ) -> (Self, TrackerHandle, mpsc::UnboundedReceiver<TransactionNotification>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (notifications_tx, notifications_rx) = mpsc::unbounded_channel();

        let this = Self {
            lookup: Arc::new(lookup),
            config,
            pending: Default::default(),
            command_rx,
            notifications_tx,
            metrics: TrackerMetrics::default(),
        };

        (this, TrackerHandle { command_tx }, notifications_rx)
    }

    /// Creates a new [`ConfirmationTracker`] and spawns it.
    pub fn spawn(
        lookup: L,
        config: TrackerConfig,
    ) -> (TrackerHandle, mpsc::UnboundedReceiver<TransactionNotification>) {
        let (this, handle, notifications_rx) = Self::new(lookup, config);
        tokio::spawn(this.into_future());
        (handle, notifications_rx)
    }

    fn track(&mut self, chain_id: ChainId, hash: TxHash) {
        self.pending
            .entry(chain_id)
            .or_default()
            .entry(hash)
            .or_insert_with(|| PendingTransaction::new(hash));
        self.update_pending_gauge();
        debug!(%hash, chain_id, "tracking transaction");
    }

    fn untrack(&mut self, chain_id: ChainId, hash: TxHash) {
        if let Some(txs) = self.pending.get_mut(&chain_id) {
            txs.remove(&hash);
        }
        self.update_pending_gauge();
        debug!(%hash, chain_id, "untracked transaction");
    }

    /// Runs one tracking cycle for a new block.
    ///
    /// All qualifying lookups run concurrently and are joined here before the
    /// service handles anything else. A per-transaction failure is logged and
    /// mutates nothing; it never aborts the other lookups of the cycle.
    async fn run_cycle(&mut self, chain_id: ChainId, number: u64) {
        let now = Utc::now();
        let due: Vec<TxHash> = self
            .pending
            .get(&chain_id)
            .map(|txs| {
                txs.values().filter(|tx| should_check(number, tx, now)).map(|tx| tx.hash).collect()
            })
            .unwrap_or_default();

        if due.is_empty() {
            return;
        }
        debug!(chain_id, block = number, count = due.len(), "checking pending transactions");

        let mut lookups = due
            .into_iter()
            .map(|hash| {
                let lookup = Arc::clone(&self.lookup);
                let lookup_timeout = self.config.lookup_timeout;
                async move { (hash, timeout(lookup_timeout, lookup.transaction_receipt(hash)).await) }
            })
            .collect::<FuturesUnordered<_>>();

        while let Some((hash, result)) = lookups.next().await {
            self.metrics.checks.increment(1);
            match result {
                Ok(Ok(Some(receipt))) => self.finalize(chain_id, hash, receipt),
                Ok(Ok(None)) => self.mark_checked(chain_id, hash, number),
                Ok(Err(err)) => {
                    error!(%hash, chain_id, %err, "failed to check transaction");
                    self.metrics.lookup_errors.increment(1);
                }
                Err(_) => {
                    warn!(%hash, chain_id, "receipt lookup timed out");
                    self.metrics.lookup_errors.increment(1);
                }
            }
        }
    }

    /// Attaches a receipt to a tracked transaction and emits a notification.
    ///
    /// The receipt is set exactly once; a transaction that was untracked while
    /// its lookup was in flight is dropped without effect.
    fn finalize(&mut self, chain_id: ChainId, hash: TxHash, receipt: Receipt) {
        let Some(tx) = self.pending.get_mut(&chain_id).and_then(|txs| txs.get_mut(&hash)) else {
            debug!(%hash, chain_id, "transaction no longer tracked, dropping receipt");
            return;
        };
        if tx.receipt.is_some() {
            return;
        }

        let notification = TransactionNotification::new(
            &receipt,
            self.config.explorer_urls.get(&chain_id),
            Utc::now(),
        );
        debug!(%hash, chain_id, succeeded = receipt.status, "transaction finalized");
        tx.receipt = Some(receipt);
        self.metrics.finalized.increment(1);
        let _ = self.notifications_tx.send(notification);
    }

    /// Records a receipt-less check, advancing the checkpoint monotonically.
    fn mark_checked(&mut self, chain_id: ChainId, hash: TxHash, number: u64) {
        let Some(tx) = self.pending.get_mut(&chain_id).and_then(|txs| txs.get_mut(&hash)) else {
            return;
        };
        if tx.receipt.is_some() {
            return;
        }
        tx.last_checked_block = Some(tx.last_checked_block.map_or(number, |last| last.max(number)));
    }

    fn update_pending_gauge(&self) {
        let total: usize =
            self.pending.values().map(|txs| txs.values().filter(|tx| !tx.is_finalized()).count()).sum();
        self.metrics.pending.set(total as f64);
    }
}

impl<L: ReceiptLookup> IntoFuture for ConfirmationTracker<L> {
    type Output = ();
    type IntoFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn into_future(mut self) -> Self::IntoFuture {
        Box::pin(async move {
            while let Some(message) = self.command_rx.recv().await {
                match message {
                    TrackerMessage::Track { chain_id, hash } => self.track(chain_id, hash),
                    TrackerMessage::Untrack { chain_id, hash } => self.untrack(chain_id, hash),
                    TrackerMessage::NewBlock { chain_id, number } => {
                        self.run_cycle(chain_id, number).await;
                        self.update_pending_gauge();
                    }
                    TrackerMessage::PendingTransactions { chain_id, tx } => {
                        let snapshot = self
                            .pending
                            .get(&chain_id)
                            .map(|txs| txs.values().cloned().collect())
                            .unwrap_or_default();
                        let _ = tx.send(snapshot);
                    }
                }
            }
            // All handles dropped; nothing can feed the tracker anymore.
        })
    }
}
