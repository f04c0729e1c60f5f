//! Reservation Processor
//!
//! The single worker that drains the reservation queue. It exclusively
//! owns the queue and the receiving half of the submission channel, so at
//! most one drain pass can ever be active; the mutual exclusion is
//! structural, not a shared flag. Requests that arrive while a drain is
//! running are pulled into the same pass before it decides to stop, so
//! nothing is lost in the stop window.
//!
//! Only this worker mutates seats and bookings on the booking path; it
//! re-reads the seat from the store immediately before committing because
//! the status index may be stale by the time a request is serviced.

use std::sync::Arc;

use shared::models::{BookingConfirmation, SeatStatus};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::error::{ReservationError, ReservationOutcome};
use super::queue::{QueueItem, ReservationQueue};
use super::seat_map::SeatStatusIndex;
use crate::db::Database;

/// 预订处理器
///
/// 由 [`super::ReservationService::new`] 创建，随后交给运行时 spawn。
pub struct ReservationProcessor {
    db: Arc<Database>,
    index: Arc<SeatStatusIndex>,
    queue: ReservationQueue,
    rx: mpsc::Receiver<QueueItem>,
}

impl ReservationProcessor {
    pub(super) fn new(
        db: Arc<Database>,
        index: Arc<SeatStatusIndex>,
        rx: mpsc::Receiver<QueueItem>,
    ) -> Self {
        Self {
            db,
            index,
            queue: ReservationQueue::new(),
            rx,
        }
    }

    /// 运行处理器（阻塞直到通道关闭或收到停机信号）
    pub async fn run(mut self, shutdown: CancellationToken) {
        tracing::info!("Reservation processor started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Reservation processor received shutdown signal");
                    break;
                }
                item = self.rx.recv() => {
                    let Some(item) = item else {
                        tracing::info!("Reservation channel closed, processor stopping");
                        break;
                    };
                    self.queue.enqueue(item);
                    self.drain();
                }
            }
        }

        // 停机前清空已到达的请求，不让任何提交者无限等待
        self.pull_submitted();
        self.drain();
    }

    /// 把已经提交到通道里的请求搬进队列（不等待）
    fn pull_submitted(&mut self) {
        while let Ok(item) = self.rx.try_recv() {
            self.queue.enqueue(item);
        }
    }

    /// One drain pass: service the queue in arrival order until it is
    /// observed empty
    ///
    /// After each item the channel is re-polled, so a request submitted
    /// while this pass runs joins it instead of waiting for the next
    /// `recv` wakeup.
    fn drain(&mut self) {
        while let Some(item) = self.queue.dequeue() {
            self.process(item);
            self.pull_submitted();
        }
    }

    /// Service one request and settle its outcome handle
    fn process(&self, item: QueueItem) {
        let request = item.request;
        let result = self.try_reserve(&request.user_name, request.showtime_id, &request.seat_number);

        match &result {
            Ok(confirmation) => {
                tracing::info!(
                    booking_id = confirmation.booking_id,
                    showtime_id = request.showtime_id,
                    seat = %request.seat_number,
                    user = %request.user_name,
                    "Seat booked"
                );
            }
            Err(e) => {
                tracing::debug!(
                    showtime_id = request.showtime_id,
                    seat = %request.seat_number,
                    user = %request.user_name,
                    error = %e,
                    "Reservation rejected"
                );
            }
        }

        if item.outcome.send(result).is_err() {
            tracing::debug!(
                showtime_id = request.showtime_id,
                seat = %request.seat_number,
                "Submitter went away before the outcome was delivered"
            );
        }
    }

    /// The serialized read-check-mutate sequence
    ///
    /// Always validates against the authoritative store; the index is
    /// only ever a hint. The check and the status flip happen under one
    /// write lock (`with_seat_mut`); the index is updated after the store
    /// so it converges to the committed value.
    fn try_reserve(
        &self,
        user_name: &str,
        showtime_id: i64,
        seat_number: &str,
    ) -> ReservationOutcome {
        let reserved = self
            .db
            .with_seat_mut(showtime_id, seat_number, |seat| {
                if seat.status != SeatStatus::Available {
                    return false;
                }
                seat.status = SeatStatus::Reserved;
                true
            })
            .ok_or_else(|| ReservationError::seat_not_found(showtime_id, seat_number))?;

        if !reserved {
            return Err(ReservationError::seat_not_available(showtime_id, seat_number));
        }

        let booking = self.db.append_booking(user_name, showtime_id, seat_number);
        self.index.set(showtime_id, seat_number, SeatStatus::Reserved);

        Ok(BookingConfirmation {
            booking_id: booking.id,
        })
    }
}
