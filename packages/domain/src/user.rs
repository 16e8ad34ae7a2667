//! # ユーザー
//!
//! API で公開する唯一のリソース。作成後は変更・削除されない。
//!
//! ## 値オブジェクト
//!
//! | 型 | 制約 |
//! |----|------|
//! | [`UserId`] | 1 から始まる連番。再利用しない |
//! | [`UserName`] | 前後の空白を除いて空でない |
//! | [`Age`] | 正の整数 |
//! | [`MinAge`] | 0 以上の整数。0 は「絞り込みなし」 |
//!
//! ## 使用例
//!
//! ```rust
//! use usersvc_domain::user::{NewUser, User, UserId};
//!
//! let new_user = NewUser::new("Ann", 30).unwrap();
//! let user = User::new(UserId::first(), new_user);
//!
//! assert_eq!(user.id().as_i64(), 1);
//! assert_eq!(user.name().as_str(), "Ann");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// `NewUser` の検証エラーメッセージ
///
/// 名前と年齢のどちらが不正でも同じメッセージを返す。
pub const USER_REQUIRED_FIELDS_MESSAGE: &str = "name and age are required";

/// `MinAge` のパースエラーメッセージ
pub const INVALID_MIN_AGE_MESSAGE: &str = "invalid min_age";

/// ユーザー ID
///
/// ストアが払い出す連番。払い出し済みの値より常に大きい値が次に使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// 最初に払い出す ID（1）
    pub const fn first() -> Self {
        Self(1)
    }

    /// 次の ID を返す
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザー名
///
/// 空白のみの名前は拒否するが、受け入れた値はトリミングせずそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                USER_REQUIRED_FIELDS_MESSAGE.to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 年齢（正の整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Age(i64);

impl Age {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::Validation(
                USER_REQUIRED_FIELDS_MESSAGE.to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

/// 一覧取得時の年齢下限
///
/// 省略時と `0` は区別しない。どちらも全件を返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinAge(i64);

impl MinAge {
    /// 絞り込みなし
    pub const NONE: Self = Self(0);

    /// クエリパラメータの値からパースする
    ///
    /// `None` と空文字列は [`MinAge::NONE`] として扱う。
    /// 整数として解釈できない値と負数はエラー。
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return Ok(Self::NONE);
        };

        match raw.parse::<i64>() {
            Ok(value) if value >= 0 => Ok(Self(value)),
            _ => Err(DomainError::Validation(INVALID_MIN_AGE_MESSAGE.to_string())),
        }
    }

    /// 指定した年齢がこの下限を満たすか
    pub fn admits(self, age: Age) -> bool {
        age.as_i64() >= self.0
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

/// 検証済みの作成入力
///
/// ID はまだ持たない。ストアが ID を割り当てて [`User`] にする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    age:  Age,
}

impl NewUser {
    /// 生の入力値を検証する
    ///
    /// 名前が空白のみ、または年齢が 0 以下ならエラー。
    pub fn new(name: impl Into<String>, age: i64) -> Result<Self, DomainError> {
        Ok(Self {
            name: UserName::new(name)?,
            age:  Age::new(age)?,
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }
}

/// ユーザーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:   UserId,
    name: UserName,
    age:  Age,
}

impl User {
    /// 割り当て済み ID と検証済み入力からユーザーを作る
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            name: new_user.name,
            age: new_user.age,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }
}
