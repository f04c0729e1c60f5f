//! Reservation core tests
//!
//! Exercises the real service + processor task end to end: ordering,
//! mutual exclusion, index convergence and the failure taxonomy.

use std::sync::Arc;

use futures::future::join_all;
use shared::models::{MovieCreate, ReservationRequest, SeatStatus, ShowtimeCreate};
use tokio_util::sync::CancellationToken;

use super::*;
use crate::db::Database;

struct Fixture {
    db: Arc<Database>,
    service: Arc<ReservationService>,
    showtime_id: i64,
    _shutdown: CancellationToken,
}

fn setup() -> Fixture {
    let db = Arc::new(Database::new());
    let movie = db.create_movie(MovieCreate {
        title: "Interstellar".to_string(),
        genre: Some("Sci-Fi".to_string()),
        duration: Some(169),
        description: None,
        rating: None,
        formats: None,
    });
    let showtime = db.create_showtime(ShowtimeCreate {
        movie_id: movie.id,
        datetime: chrono::Utc::now(),
        cinema: "Hall 1".to_string(),
    });

    let (service, processor) = ReservationService::new(db.clone(), 256);
    for seat in db.create_seats_for_showtime(showtime.id) {
        service
            .index()
            .set(showtime.id, &seat.seat_number, SeatStatus::Available);
    }

    let shutdown = CancellationToken::new();
    tokio::spawn(processor.run(shutdown.clone()));

    Fixture {
        db,
        service,
        showtime_id: showtime.id,
        _shutdown: shutdown,
    }
}

fn request(fx: &Fixture, user: &str, seat: &str) -> ReservationRequest {
    ReservationRequest {
        user_name: user.to_string(),
        showtime_id: fx.showtime_id,
        seat_number: seat.to_string(),
    }
}

/// Submit and await the outcome, folding pre-check rejections into the
/// same result type the processor produces
async fn book(fx: &Fixture, user: &str, seat: &str) -> ReservationOutcome {
    match fx.service.submit(request(fx, user, seat)).await {
        Ok(handle) => handle.wait().await,
        Err(e) => Err(e),
    }
}

#[tokio::test]
async fn test_two_concurrent_submissions_one_seat() {
    let fx = setup();

    let results = join_all([
        book(&fx, "userA@example.com", "A1"),
        book(&fx, "userB@example.com", "A1"),
    ])
    .await;

    let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].as_ref().unwrap().booking_id, 1);

    let loser = results.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        loser,
        Err(ReservationError::SeatNotAvailable { .. })
    ));

    let seat = fx.db.find_seat(fx.showtime_id, "A1").unwrap();
    assert_eq!(seat.status, SeatStatus::Reserved);
    assert_eq!(fx.db.bookings_count(), 1);
}

#[tokio::test]
async fn test_mutual_exclusivity_under_contention() {
    let fx = setup();

    let results = join_all((0..8).map(|i| {
        let fx = &fx;
        let user = format!("user{}@example.com", i);
        async move { book(fx, &user, "B3").await }
    }))
    .await;

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for r in results.iter().filter(|r| r.is_err()) {
        assert!(matches!(
            r,
            Err(ReservationError::SeatNotAvailable { .. })
        ));
    }
    assert_eq!(fx.db.bookings_count(), 1);
}

#[tokio::test]
async fn test_fifo_determinism() {
    let fx = setup();

    // Submission order fixes the channel order; the processor must assign
    // booking ids in exactly that order.
    let seats = ["A1", "A2", "A3", "A4", "A5"];
    let mut handles = Vec::new();
    for seat in seats {
        let handle = fx
            .service
            .submit(request(&fx, "alice@example.com", seat))
            .await
            .expect("submit should queue");
        handles.push(handle);
    }

    let mut expected_id = 1;
    for handle in handles {
        let confirmation = handle.wait().await.expect("booking should succeed");
        assert_eq!(confirmation.booking_id, expected_id);
        expected_id += 1;
    }
}

#[tokio::test]
async fn test_referential_integrity_after_success() {
    let fx = setup();

    book(&fx, "alice@example.com", "C7").await.unwrap();

    assert_eq!(
        fx.service.index().get(fx.showtime_id, "C7"),
        Some(SeatStatus::Reserved)
    );
    assert_eq!(
        fx.db.find_seat(fx.showtime_id, "C7").unwrap().status,
        SeatStatus::Reserved
    );
}

#[tokio::test]
async fn test_unknown_seat_rejection() {
    let fx = setup();

    let result = book(&fx, "alice@example.com", "Z9").await;
    assert!(matches!(
        result,
        Err(ReservationError::SeatNotFound { .. })
    ));
    assert_eq!(fx.db.bookings_count(), 0);
    assert_eq!(fx.service.index().get(fx.showtime_id, "Z9"), None);
}

#[tokio::test]
async fn test_drain_convergence() {
    let fx = setup();

    // 100 distinct seats beyond the default layout
    let seats: Vec<String> = (1..=100).map(|n| format!("R{}", n)).collect();
    for seat in &seats {
        fx.db.insert_seat(fx.showtime_id, seat.clone());
        fx.service
            .index()
            .set(fx.showtime_id, seat, SeatStatus::Available);
    }

    let results = join_all(seats.iter().enumerate().map(|(i, seat)| {
        let fx = &fx;
        let user = format!("user{}@example.com", i);
        async move { book(fx, &user, seat).await }
    }))
    .await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(fx.db.bookings_count(), 100);

    // No residual drain state: the processor keeps accepting work
    let extra = book(&fx, "late@example.com", "A1").await;
    assert!(extra.is_ok());
    assert_eq!(fx.db.bookings_count(), 101);
}

#[tokio::test]
async fn test_stale_index_tolerance() {
    let fx = setup();

    // Store already reserved while the index still claims available; the
    // stale cache must not let the request commit.
    fx.db
        .set_seat_status(fx.showtime_id, "D2", SeatStatus::Reserved);
    assert_eq!(
        fx.service.index().get(fx.showtime_id, "D2"),
        Some(SeatStatus::Available)
    );

    let result = book(&fx, "alice@example.com", "D2").await;
    assert!(matches!(
        result,
        Err(ReservationError::SeatNotAvailable { .. })
    ));
    assert_eq!(fx.db.bookings_count(), 0);
}

#[tokio::test]
async fn test_precheck_short_circuits_known_reserved() {
    let fx = setup();

    // Index already knows the seat is gone; submit rejects without queueing
    fx.service
        .index()
        .set(fx.showtime_id, "A9", SeatStatus::Reserved);

    let result = fx
        .service
        .submit(request(&fx, "alice@example.com", "A9"))
        .await;
    assert!(matches!(
        result,
        Err(ReservationError::SeatNotAvailable { .. })
    ));
}

#[tokio::test]
async fn test_failures_do_not_abort_the_drain() {
    let fx = setup();

    // A doomed request sandwiched between two good ones
    let outcomes = join_all([
        book(&fx, "a@example.com", "A1"),
        book(&fx, "b@example.com", "NOPE"),
        book(&fx, "c@example.com", "A2"),
    ])
    .await;

    assert!(outcomes[0].is_ok());
    assert!(matches!(
        outcomes[1],
        Err(ReservationError::SeatNotFound { .. })
    ));
    assert!(outcomes[2].is_ok());
    assert_eq!(fx.db.bookings_count(), 2);
}
