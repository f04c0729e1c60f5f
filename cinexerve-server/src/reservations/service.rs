//! Reservation Service
//!
//! The submission facade handed to the HTTP layer. Submitting never
//! blocks on other callers: it runs the optimistic pre-check, hands the
//! request to the processor through the channel and returns an
//! [`OutcomeHandle`] the caller awaits on its own.

use std::sync::Arc;

use shared::models::{ReservationRequest, SeatStatus};
use tokio::sync::{mpsc, oneshot};

use super::error::{ReservationError, ReservationOutcome};
use super::processor::ReservationProcessor;
use super::queue::QueueItem;
use super::seat_map::SeatStatusIndex;
use crate::db::Database;

/// 预订服务
///
/// 持有提交通道的发送端和座位状态索引。
/// 处理器持有接收端，是队列的唯一所有者。
pub struct ReservationService {
    tx: mpsc::Sender<QueueItem>,
    index: Arc<SeatStatusIndex>,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService").finish_non_exhaustive()
    }
}

impl ReservationService {
    /// 创建服务和配套的处理器
    ///
    /// `buffer` — 提交通道容量。通道满时 `submit` 会等待处理器腾出
    /// 空间，而不是丢弃请求。
    pub fn new(db: Arc<Database>, buffer: usize) -> (Arc<Self>, ReservationProcessor) {
        let (tx, rx) = mpsc::channel(buffer);
        let index = Arc::new(SeatStatusIndex::new());
        let service = Arc::new(Self {
            tx,
            index: index.clone(),
        });
        let processor = ReservationProcessor::new(db, index, rx);
        (service, processor)
    }

    /// 座位状态索引（座位图渲染、取消流程、场次管理共用）
    pub fn index(&self) -> &SeatStatusIndex {
        &self.index
    }

    /// Submit a reservation request
    ///
    /// The index pre-check rejects requests for seats already known to be
    /// reserved before they are queued. Everything else goes to the
    /// processor, which re-validates against the store; the pre-check is
    /// an optimization, never the authority.
    pub async fn submit(
        &self,
        request: ReservationRequest,
    ) -> Result<OutcomeHandle, ReservationError> {
        if let Some(SeatStatus::Reserved) =
            self.index.get(request.showtime_id, &request.seat_number)
        {
            return Err(ReservationError::seat_not_available(
                request.showtime_id,
                &request.seat_number,
            ));
        }

        let (outcome_tx, outcome_rx) = oneshot::channel();
        self.tx
            .send(QueueItem {
                request,
                outcome: outcome_tx,
            })
            .await
            .map_err(|_| ReservationError::Unavailable)?;

        Ok(OutcomeHandle { rx: outcome_rx })
    }
}

/// The submitter's end of one reservation
///
/// Settled exactly once by the processor: success or failure, never
/// both. Enforced by the oneshot channel, not by convention.
#[derive(Debug)]
pub struct OutcomeHandle {
    rx: oneshot::Receiver<ReservationOutcome>,
}

impl OutcomeHandle {
    /// Wait for the reservation to be serviced
    ///
    /// A processor that died before settling surfaces as
    /// [`ReservationError::Unavailable`].
    pub async fn wait(self) -> ReservationOutcome {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(ReservationError::Unavailable),
        }
    }
}
