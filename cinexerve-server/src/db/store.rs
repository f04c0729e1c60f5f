//! In-memory authoritative store
//!
//! 每个实体一张 `RwLock<Vec<_>>` 表，ID 用原子计数器顺序分配。
//! 预订 ID 在提交时分配 (由预订处理器独占调用 [`Database::append_booking`])，
//! 因此预订 ID 的顺序即提交顺序。

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use shared::models::{
    Booking, Movie, MovieCreate, MovieUpdate, Seat, SeatStatus, Showtime, ShowtimeCreate,
    ShowtimeUpdate, User,
};

/// 座位行号 (每行 1-10 号座位)
pub const SEAT_ROWS: [&str; 4] = ["A", "B", "C", "D"];

/// 每行座位数
pub const SEATS_PER_ROW: i64 = 10;

/// 按实体分配的自增 ID
struct NextIds {
    movie: AtomicI64,
    showtime: AtomicI64,
    seat: AtomicI64,
    booking: AtomicI64,
    user: AtomicI64,
}

impl NextIds {
    fn new() -> Self {
        Self {
            movie: AtomicI64::new(1),
            showtime: AtomicI64::new(1),
            seat: AtomicI64::new(1),
            booking: AtomicI64::new(1),
            user: AtomicI64::new(1),
        }
    }
}

/// 内存权威数据存储
///
/// 读操作随处可用；座位状态与预订表的写入在预订路径上
/// 只允许预订处理器执行 (单写者)，取消路径是已知的例外。
pub struct Database {
    movies: RwLock<Vec<Movie>>,
    showtimes: RwLock<Vec<Showtime>>,
    seats: RwLock<Vec<Seat>>,
    bookings: RwLock<Vec<Booking>>,
    users: RwLock<Vec<User>>,
    next_id: NextIds,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("movies", &self.movies.read().len())
            .field("showtimes", &self.showtimes.read().len())
            .field("seats", &self.seats.read().len())
            .field("bookings", &self.bookings.read().len())
            .field("users", &self.users.read().len())
            .finish()
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        Self {
            movies: RwLock::new(Vec::new()),
            showtimes: RwLock::new(Vec::new()),
            seats: RwLock::new(Vec::new()),
            bookings: RwLock::new(Vec::new()),
            users: RwLock::new(Vec::new()),
            next_id: NextIds::new(),
        }
    }

    // ========== Movies ==========

    /// 影片列表，可按类型精确过滤
    pub fn movies(&self, genre: Option<&str>) -> Vec<Movie> {
        let movies = self.movies.read();
        match genre {
            Some(g) => movies
                .iter()
                .filter(|m| m.genre.as_deref() == Some(g))
                .cloned()
                .collect(),
            None => movies.clone(),
        }
    }

    pub fn movie(&self, id: i64) -> Option<Movie> {
        self.movies.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn create_movie(&self, payload: MovieCreate) -> Movie {
        let movie = Movie {
            id: self.next_id.movie.fetch_add(1, Ordering::Relaxed),
            title: payload.title,
            genre: payload.genre,
            duration: payload.duration,
            description: payload.description,
            rating: payload.rating,
            formats: payload.formats,
        };
        self.movies.write().push(movie.clone());
        movie
    }

    pub fn update_movie(&self, id: i64, payload: MovieUpdate) -> Option<Movie> {
        let mut movies = self.movies.write();
        let movie = movies.iter_mut().find(|m| m.id == id)?;
        if let Some(title) = payload.title {
            movie.title = title;
        }
        if let Some(genre) = payload.genre {
            movie.genre = Some(genre);
        }
        if let Some(duration) = payload.duration {
            movie.duration = Some(duration);
        }
        if let Some(description) = payload.description {
            movie.description = Some(description);
        }
        if let Some(rating) = payload.rating {
            movie.rating = Some(rating);
        }
        if let Some(formats) = payload.formats {
            movie.formats = Some(formats);
        }
        Some(movie.clone())
    }

    /// 是否存在指向该影片任一场次的预订
    pub fn movie_has_bookings(&self, movie_id: i64) -> bool {
        let showtime_ids: Vec<i64> = self
            .showtimes
            .read()
            .iter()
            .filter(|s| s.movie_id == movie_id)
            .map(|s| s.id)
            .collect();
        self.bookings
            .read()
            .iter()
            .any(|b| showtime_ids.contains(&b.showtime_id))
    }

    /// 级联删除影片及其场次和座位
    ///
    /// 返回被删除座位的 `(showtime_id, seat_number)` 键，供调用方清理索引。
    /// 调用方负责先行检查预订存在性。
    pub fn delete_movie(&self, id: i64) -> Vec<(i64, String)> {
        let showtime_ids: Vec<i64> = {
            let mut showtimes = self.showtimes.write();
            let ids = showtimes
                .iter()
                .filter(|s| s.movie_id == id)
                .map(|s| s.id)
                .collect();
            showtimes.retain(|s| s.movie_id != id);
            ids
        };

        let removed_keys = {
            let mut seats = self.seats.write();
            let keys = seats
                .iter()
                .filter(|s| showtime_ids.contains(&s.showtime_id))
                .map(|s| (s.showtime_id, s.seat_number.clone()))
                .collect();
            seats.retain(|s| !showtime_ids.contains(&s.showtime_id));
            keys
        };

        self.movies.write().retain(|m| m.id != id);
        removed_keys
    }

    // ========== Showtimes ==========

    /// 影片的场次，按放映时间升序
    pub fn showtimes_for_movie(&self, movie_id: i64) -> Vec<Showtime> {
        let mut showtimes: Vec<Showtime> = self
            .showtimes
            .read()
            .iter()
            .filter(|s| s.movie_id == movie_id)
            .cloned()
            .collect();
        showtimes.sort_by_key(|s| s.datetime);
        showtimes
    }

    pub fn showtime(&self, id: i64) -> Option<Showtime> {
        self.showtimes.read().iter().find(|s| s.id == id).cloned()
    }

    pub fn create_showtime(&self, payload: ShowtimeCreate) -> Showtime {
        let showtime = Showtime {
            id: self.next_id.showtime.fetch_add(1, Ordering::Relaxed),
            movie_id: payload.movie_id,
            datetime: payload.datetime,
            cinema: payload.cinema,
        };
        self.showtimes.write().push(showtime.clone());
        showtime
    }

    pub fn update_showtime(&self, id: i64, payload: ShowtimeUpdate) -> Option<Showtime> {
        let mut showtimes = self.showtimes.write();
        let showtime = showtimes.iter_mut().find(|s| s.id == id)?;
        if let Some(datetime) = payload.datetime {
            showtime.datetime = datetime;
        }
        if let Some(cinema) = payload.cinema {
            showtime.cinema = cinema;
        }
        Some(showtime.clone())
    }

    pub fn showtime_has_bookings(&self, id: i64) -> bool {
        self.bookings.read().iter().any(|b| b.showtime_id == id)
    }

    /// 删除场次及其座位，返回被删除座位的索引键
    pub fn delete_showtime(&self, id: i64) -> Vec<(i64, String)> {
        let removed_keys = {
            let mut seats = self.seats.write();
            let keys = seats
                .iter()
                .filter(|s| s.showtime_id == id)
                .map(|s| (s.showtime_id, s.seat_number.clone()))
                .collect();
            seats.retain(|s| s.showtime_id != id);
            keys
        };
        self.showtimes.write().retain(|s| s.id != id);
        removed_keys
    }

    // ========== Seats ==========

    /// 插入单个座位 (状态 available)
    pub fn insert_seat(&self, showtime_id: i64, seat_number: impl Into<String>) -> Seat {
        let seat = Seat {
            id: self.next_id.seat.fetch_add(1, Ordering::Relaxed),
            showtime_id,
            seat_number: seat_number.into(),
            status: SeatStatus::Available,
        };
        self.seats.write().push(seat.clone());
        seat
    }

    /// 为场次批量创建座位：A-D 行 × 1-10 号
    pub fn create_seats_for_showtime(&self, showtime_id: i64) -> Vec<Seat> {
        let mut created = Vec::new();
        for row in SEAT_ROWS {
            for n in 1..=SEATS_PER_ROW {
                created.push(self.insert_seat(showtime_id, format!("{}{}", row, n)));
            }
        }
        created
    }

    /// 场次的座位，按座位号排序
    pub fn seats_for_showtime(&self, showtime_id: i64) -> Vec<Seat> {
        let mut seats: Vec<Seat> = self
            .seats
            .read()
            .iter()
            .filter(|s| s.showtime_id == showtime_id)
            .cloned()
            .collect();
        seats.sort_by(|a, b| a.seat_number.cmp(&b.seat_number));
        seats
    }

    pub fn find_seat(&self, showtime_id: i64, seat_number: &str) -> Option<Seat> {
        self.seats
            .read()
            .iter()
            .find(|s| s.showtime_id == showtime_id && s.seat_number == seat_number)
            .cloned()
    }

    /// 在写锁内对座位执行检查-变更
    ///
    /// 座位不存在返回 `None`。读取状态和写入状态之间不会有其他写者插入。
    pub fn with_seat_mut<R>(
        &self,
        showtime_id: i64,
        seat_number: &str,
        f: impl FnOnce(&mut Seat) -> R,
    ) -> Option<R> {
        let mut seats = self.seats.write();
        let seat = seats
            .iter_mut()
            .find(|s| s.showtime_id == showtime_id && s.seat_number == seat_number)?;
        Some(f(seat))
    }

    /// 直接设置座位状态，座位不存在返回 `false`
    pub fn set_seat_status(&self, showtime_id: i64, seat_number: &str, status: SeatStatus) -> bool {
        self.with_seat_mut(showtime_id, seat_number, |seat| seat.status = status)
            .is_some()
    }

    // ========== Bookings ==========

    /// 追加预订记录，提交时分配单调递增 ID
    pub fn append_booking(&self, user_name: &str, showtime_id: i64, seat_number: &str) -> Booking {
        let booking = Booking {
            id: self.next_id.booking.fetch_add(1, Ordering::Relaxed),
            user_name: user_name.to_string(),
            showtime_id,
            seat_number: seat_number.to_string(),
            created_at: Utc::now(),
        };
        self.bookings.write().push(booking.clone());
        booking
    }

    pub fn booking(&self, id: i64) -> Option<Booking> {
        self.bookings.read().iter().find(|b| b.id == id).cloned()
    }

    pub fn remove_booking(&self, id: i64) -> Option<Booking> {
        let mut bookings = self.bookings.write();
        let pos = bookings.iter().position(|b| b.id == id)?;
        Some(bookings.remove(pos))
    }

    /// 用户的预订记录，最新在前
    pub fn bookings_for_user(&self, user_name: &str) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .read()
            .iter()
            .filter(|b| b.user_name == user_name)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    /// 全部预订记录，最新在前
    pub fn all_bookings(&self) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self.bookings.read().clone();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    pub fn bookings_count(&self) -> usize {
        self.bookings.read().len()
    }

    // ========== Users ==========

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        self.users.read().iter().find(|u| u.email == email).cloned()
    }

    pub fn create_user(
        &self,
        email: impl Into<String>,
        name: Option<String>,
        password_hash: impl Into<String>,
    ) -> User {
        let user = User {
            id: self.next_id.user.fetch_add(1, Ordering::Relaxed),
            email: email.into(),
            name,
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        };
        self.users.write().push(user.clone());
        user
    }

    /// 合并外部来源的用户 (users.json)；邮箱已存在则跳过
    pub fn merge_user(
        &self,
        email: &str,
        name: Option<String>,
        password_hash: String,
        created_at: chrono::DateTime<Utc>,
    ) -> bool {
        let mut users = self.users.write();
        if users.iter().any(|u| u.email == email) {
            return false;
        }
        users.push(User {
            id: self.next_id.user.fetch_add(1, Ordering::Relaxed),
            email: email.to_string(),
            name,
            password_hash,
            created_at,
        });
        true
    }

    /// 更新用户资料 (姓名/密码哈希)，返回更新后的用户
    pub fn update_user_profile(
        &self,
        email: &str,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Option<User> {
        let mut users = self.users.write();
        let user = users.iter_mut().find(|u| u.email == email)?;
        if let Some(name) = name {
            user.name = Some(name);
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }
        Some(user.clone())
    }

    /// 用户快照 (按 ID 排序)，用于持久化
    pub fn users_snapshot(&self) -> Vec<User> {
        let mut users = self.users.read().clone();
        users.sort_by_key(|u| u.id);
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showtime_payload(movie_id: i64) -> ShowtimeCreate {
        ShowtimeCreate {
            movie_id,
            datetime: Utc::now(),
            cinema: "Hall 1".to_string(),
        }
    }

    #[test]
    fn test_seat_layout() {
        let db = Database::new();
        let showtime = db.create_showtime(showtime_payload(1));
        let seats = db.create_seats_for_showtime(showtime.id);

        assert_eq!(seats.len(), 40);
        assert!(db.find_seat(showtime.id, "A1").is_some());
        assert!(db.find_seat(showtime.id, "D10").is_some());
        assert!(db.find_seat(showtime.id, "E1").is_none());
    }

    #[test]
    fn test_booking_ids_are_monotonic() {
        let db = Database::new();
        let first = db.append_booking("alice@example.com", 1, "A1");
        let second = db.append_booking("bob@example.com", 1, "A2");
        assert!(second.id > first.id);
    }

    #[test]
    fn test_delete_showtime_cascades_seats() {
        let db = Database::new();
        let showtime = db.create_showtime(showtime_payload(1));
        db.create_seats_for_showtime(showtime.id);

        let removed = db.delete_showtime(showtime.id);
        assert_eq!(removed.len(), 40);
        assert!(db.showtime(showtime.id).is_none());
        assert!(db.seats_for_showtime(showtime.id).is_empty());
    }

    #[test]
    fn test_delete_movie_cascades() {
        let db = Database::new();
        let movie = db.create_movie(MovieCreate {
            title: "Inception".to_string(),
            genre: Some("Sci-Fi".to_string()),
            duration: Some(148),
            description: None,
            rating: None,
            formats: None,
        });
        let showtime = db.create_showtime(showtime_payload(movie.id));
        db.create_seats_for_showtime(showtime.id);

        let removed = db.delete_movie(movie.id);
        assert_eq!(removed.len(), 40);
        assert!(db.movie(movie.id).is_none());
        assert!(db.showtimes_for_movie(movie.id).is_empty());
    }

    #[test]
    fn test_genre_filter() {
        let db = Database::new();
        for (title, genre) in [("A", "Action"), ("B", "Drama"), ("C", "Action")] {
            db.create_movie(MovieCreate {
                title: title.to_string(),
                genre: Some(genre.to_string()),
                duration: None,
                description: None,
                rating: None,
                formats: None,
            });
        }
        assert_eq!(db.movies(Some("Action")).len(), 2);
        assert_eq!(db.movies(None).len(), 3);
        assert!(db.movies(Some("Horror")).is_empty());
    }

    #[test]
    fn test_merge_user_skips_existing() {
        let db = Database::new();
        db.create_user("alice@example.com", None, "hash-a");
        assert!(!db.merge_user("alice@example.com", None, "hash-b".to_string(), Utc::now()));
        assert!(db.merge_user("bob@example.com", None, "hash-c".to_string(), Utc::now()));
        assert_eq!(db.users_snapshot().len(), 2);
    }
}
