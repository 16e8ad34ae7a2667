//! # UserRepository
//!
//! ユーザーを保持するインメモリストア。
//!
//! ## 排他制御
//!
//! ユーザー列と次 ID カウンターは単一の [`Mutex`] で保護する。
//! 追加（ID 採番 + 末尾への追加）と一覧（読み取り + 絞り込み）は
//! どちらもロックを保持したまま実行するため、ID の重複や更新の消失は起こらない。
//!
//! 一覧の並び順はロック下で追加が完了した順序そのもの。

use std::sync::Mutex;

use usersvc_domain::user::{MinAge, NewUser, User, UserId};

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
pub trait UserRepository: Send + Sync {
    /// ユーザーを追加する
    ///
    /// 次の ID を割り当てて末尾に追加し、作成したユーザーを返す。
    fn insert(&self, new_user: NewUser) -> Result<User, InfraError>;

    /// 年齢が `min_age` 以上のユーザーを追加順に返す
    ///
    /// 該当なしの場合は空の `Vec` を返す。
    fn find_all(&self, min_age: MinAge) -> Result<Vec<User>, InfraError>;
}

/// ロックで保護されるストアの状態
///
/// 不変条件: `next_id` は `users` 内のどの ID よりも大きい。
#[derive(Debug)]
struct UserStore {
    users:   Vec<User>,
    next_id: UserId,
}

/// インメモリ実装のユーザーリポジトリ
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: Mutex<UserStore>,
}

impl InMemoryUserRepository {
    /// 空のストアを作成する
    pub fn new() -> Self {
        Self {
            store: Mutex::new(UserStore {
                users:   Vec::new(),
                next_id: UserId::first(),
            }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, new_user: NewUser) -> Result<User, InfraError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| InfraError::LockPoisoned("users"))?;

        let user = User::new(store.next_id, new_user);
        store.next_id = store.next_id.next();
        store.users.push(user.clone());

        tracing::debug!(user_id = %user.id(), "ユーザーを追加しました");
        Ok(user)
    }

    fn find_all(&self, min_age: MinAge) -> Result<Vec<User>, InfraError> {
        let store = self
            .store
            .lock()
            .map_err(|_| InfraError::LockPoisoned("users"))?;

        // MinAge::NONE は年齢 1 以上のユーザーをすべて通す
        let users: Vec<User> = store
            .users
            .iter()
            .filter(|user| min_age.admits(user.age()))
            .cloned()
            .collect();

        tracing::debug!(
            min_age = min_age.as_i64(),
            count = users.len(),
            "ユーザー一覧を取得しました"
        );
        Ok(users)
    }
}
