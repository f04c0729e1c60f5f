//! Seat Status Index
//!
//! Fast lookup of the last known seat status, keyed by
//! `(showtime_id, seat_number)`. Used for the reject-early pre-check
//! before a request pays the cost of queueing, and for rendering seat
//! maps. It is a cache, not the source of truth: it can be briefly stale
//! relative to the store, so the processor always re-validates against
//! the store before committing.

use dashmap::DashMap;
use shared::models::SeatStatus;

/// 座位状态索引
///
/// 使用 DashMap 实现无锁并发读写。预订成功后由处理器写入；
/// 取消路径和场次管理也会更新它。
#[derive(Debug, Default)]
pub struct SeatStatusIndex {
    map: DashMap<(i64, String), SeatStatus>,
}

impl SeatStatusIndex {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    pub fn set(&self, showtime_id: i64, seat_number: &str, status: SeatStatus) {
        self.map
            .insert((showtime_id, seat_number.to_string()), status);
    }

    pub fn get(&self, showtime_id: i64, seat_number: &str) -> Option<SeatStatus> {
        self.map
            .get(&(showtime_id, seat_number.to_string()))
            .map(|s| *s)
    }

    pub fn has(&self, showtime_id: i64, seat_number: &str) -> bool {
        self.map
            .contains_key(&(showtime_id, seat_number.to_string()))
    }

    pub fn delete(&self, showtime_id: i64, seat_number: &str) {
        self.map.remove(&(showtime_id, seat_number.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_ops() {
        let index = SeatStatusIndex::new();
        assert_eq!(index.get(1, "A1"), None);
        assert!(!index.has(1, "A1"));

        index.set(1, "A1", SeatStatus::Available);
        assert_eq!(index.get(1, "A1"), Some(SeatStatus::Available));
        assert!(index.has(1, "A1"));

        index.set(1, "A1", SeatStatus::Reserved);
        assert_eq!(index.get(1, "A1"), Some(SeatStatus::Reserved));

        // Same seat number on another showtime is a distinct key
        assert_eq!(index.get(2, "A1"), None);

        index.delete(1, "A1");
        assert!(!index.has(1, "A1"));
    }
}
