//! 启动种子数据
//!
//! 进程内存即数据库，每次启动重建演示目录：
//! 影片列表、每部影片一个次日场次、每场次 A-D × 1-10 共 40 个座位，
//! 以及预置管理员账号。座位状态同步写入座位状态索引。

use chrono::{Duration, Utc};
use shared::models::{MovieCreate, SeatStatus, ShowtimeCreate};

use super::Database;
use crate::auth::hash_password;
use crate::reservations::SeatStatusIndex;

/// 预置管理员邮箱
pub const ADMIN_EMAIL: &str = "admin@cinexerve.local";

/// 预置管理员初始密码
const ADMIN_PASSWORD: &str = "admin123";

/// (title, genre, duration, description, rating, formats)
type MovieRow = (&'static str, &'static str, i32, &'static str, &'static str, &'static [&'static str]);

const CATALOG: &[MovieRow] = &[
    ("Moana 2", "Animation", 105, "Animated adventure", "PG", &["2D"]),
    ("Deadpool and Wolverine", "Action", 125, "Superhero action", "R-16", &["2D", "IMAX"]),
    ("Freakier  Friday", "Comedy", 110, "Body-swap comedy", "PG-13", &["2D"]),
    ("Thunderbolts", "Action", 122, "Marvel ensemble", "PG-13", &["2D", "IMAX"]),
    ("The Little Mermaid", "Fantasy", 120, "Underwater tale", "PG", &["2D"]),
    ("Elemental", "Animation", 102, "Elements collide", "PG", &["2D"]),
    ("Haunted Mansion", "Horror", 100, "Spooky fun", "PG-13", &["2D"]),
    ("Snow White", "Fantasy", 95, "Classic fairy tale", "PG", &["2D"]),
    ("The Fantastic Four First Steps", "Sci-Fi", 118, "Heroic origins", "PG-13", &["2D", "IMAX"]),
    ("Elio", "Animation", 98, "Out-of-this-world kid", "PG", &["2D"]),
    ("Lilo and Stitch", "Animation", 92, "Ohana means family", "PG", &["2D"]),
    ("Tron Ares", "Sci-Fi", 130, "Digital frontier", "PG-13", &["2D", "IMAX"]),
    ("A Goofy Movie", "Animation", 90, "Father-son road trip", "G", &["2D"]),
    ("Hoppers", "Animation", 88, "Adventurous critters", "PG", &["2D"]),
    ("Snowwhite", "Fantasy", 95, "Classic fairy tale", "PG", &["2D"]),
    ("Wish", "Animation", 100, "Magical wish", "PG", &["2D"]),
    ("Spider Man Homecoming", "Action", 133, "Friendly neighborhood hero", "PG-13", &["2D", "IMAX"]),
    ("The Notebook", "Romance", 123, "Timeless love story", "PG-13", &["2D"]),
    ("How to Train Your Dragon", "Animation", 98, "Dragon friendship", "PG", &["2D"]),
    ("Inception", "Sci-Fi", 148, "Mind-bending heist", "PG-13", &["2D", "IMAX"]),
    ("Jumanji", "Adventure", 119, "Game world adventure", "PG-13", &["2D"]),
    ("John Wick", "Action", 101, "Relentless hitman", "R-16", &["2D"]),
    ("Interstellar", "Sci-Fi", 169, "Space epic", "PG-13", &["2D", "IMAX"]),
    ("Train to Busan", "Horror", 118, "Zombie thriller", "R-16", &["2D"]),
    ("Goblin", "Fantasy", 120, "Mystical tale", "PG-13", &["2D"]),
    ("The First Omen", "Horror", 140, "Mysterious supernatural horror", "R-16", &["2D"]),
    ("Zootopia 2", "Animation", 168, "Zootopia adventures", "PG-13", &["2D"]),
];

/// 填充演示数据
///
/// 每个座位同时写入权威存储和状态索引，两者起始一致。
pub fn seed(db: &Database, index: &SeatStatusIndex) {
    for (title, genre, duration, description, rating, formats) in CATALOG {
        let movie = db.create_movie(MovieCreate {
            title: (*title).to_string(),
            genre: Some((*genre).to_string()),
            duration: Some(*duration),
            description: Some((*description).to_string()),
            rating: Some((*rating).to_string()),
            formats: Some(formats.iter().map(|f| (*f).to_string()).collect()),
        });

        let showtime = db.create_showtime(ShowtimeCreate {
            movie_id: movie.id,
            datetime: Utc::now() + Duration::hours(24),
            cinema: "Hall 1".to_string(),
        });

        for seat in db.create_seats_for_showtime(showtime.id) {
            index.set(showtime.id, &seat.seat_number, SeatStatus::Available);
        }
    }

    match hash_password(ADMIN_PASSWORD) {
        Ok(hash) => {
            db.create_user(ADMIN_EMAIL, Some("Admin".to_string()), hash);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to hash admin password, admin account skipped");
        }
    }

    tracing::info!(
        movies = CATALOG.len(),
        showtimes = CATALOG.len(),
        seats = CATALOG.len() * 40,
        "Seeded demo catalog"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let db = Database::new();
        let index = SeatStatusIndex::new();
        seed(&db, &index);

        assert_eq!(db.movies(None).len(), 27);
        let first = db.movies(None).into_iter().next().unwrap();
        let showtimes = db.showtimes_for_movie(first.id);
        assert_eq!(showtimes.len(), 1);
        assert_eq!(db.seats_for_showtime(showtimes[0].id).len(), 40);
        assert_eq!(
            index.get(showtimes[0].id, "A1"),
            Some(SeatStatus::Available)
        );
        assert!(db.user_by_email(ADMIN_EMAIL).is_some());
    }
}
