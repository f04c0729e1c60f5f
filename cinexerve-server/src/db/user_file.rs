//! users.json 持久化
//!
//! 用户账号是唯一跨重启保留的数据：注册和资料修改后整体写回文件，
//! 启动时加载并按邮箱去重合并到内存存储。
//! 文件不存在时用当前用户快照 (即种子管理员) 初始化。

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Database;

/// users.json 中的一条记录
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    email: String,
    name: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

/// 用户文件句柄
#[derive(Debug)]
pub struct UserFile {
    path: PathBuf,
}

impl UserFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// 启动时加载：文件存在则合并进存储，否则写出初始快照
    ///
    /// 读取失败只记录日志，不阻断启动。
    pub fn load_into(&self, db: &Database) {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<Vec<UserRecord>>(&raw) {
                Ok(records) => {
                    let mut merged = 0usize;
                    for r in records {
                        if db.merge_user(&r.email, r.name, r.password_hash, r.created_at) {
                            merged += 1;
                        }
                    }
                    tracing::info!(merged, path = %self.path.display(), "Loaded users file");
                }
                Err(e) => {
                    tracing::error!(error = %e, path = %self.path.display(), "Failed to parse users file");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Err(e) = self.persist(db) {
                    tracing::error!(error = %e, "Failed to write initial users file");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, path = %self.path.display(), "Failed to read users file");
            }
        }
    }

    /// 写回全部用户
    pub fn persist(&self, db: &Database) -> std::io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let records: Vec<UserRecord> = db
            .users_snapshot()
            .into_iter()
            .map(|u| UserRecord {
                email: u.email,
                name: u.name,
                password_hash: u.password_hash,
                created_at: u.created_at,
            })
            .collect();
        let payload = serde_json::to_string_pretty(&records)?;
        std::fs::write(&self.path, payload)
    }

    /// 写回并记录失败 (注册/改密路径使用，失败不影响响应)
    pub fn persist_logged(&self, db: &Database) {
        if let Err(e) = self.persist(db) {
            tracing::error!(error = %e, path = %self.path.display(), "Failed to persist users");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_and_reload() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("users.json");

        let db = Database::new();
        db.create_user("alice@example.com", Some("Alice".to_string()), "hash-a");
        db.create_user("bob@example.com", None, "hash-b");

        let file = UserFile::new(path.clone());
        file.persist(&db).expect("Failed to persist users");

        let restored = Database::new();
        restored.create_user("alice@example.com", None, "pre-existing");
        UserFile::new(path).load_into(&restored);

        // alice 已存在被跳过，bob 被合并
        assert_eq!(restored.users_snapshot().len(), 2);
        let bob = restored.user_by_email("bob@example.com").unwrap();
        assert_eq!(bob.password_hash, "hash-b");
    }

    #[test]
    fn test_missing_file_is_initialized() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("users.json");

        let db = Database::new();
        db.create_user("admin@cinexerve.local", Some("Admin".to_string()), "hash");

        UserFile::new(path.clone()).load_into(&db);
        assert!(path.exists());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("admin@cinexerve.local"));
        assert!(raw.contains("passwordHash"));
    }
}
