//! 어댑터 에러 타입
//!
//! 저장 계층의 실패는 여기서 분류만 하고, 삼키거나 재시도하지 않고
//! 호출자에게 그대로 전달합니다.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 저장 어댑터 에러
#[derive(Debug, Error)]
pub enum Error {
    #[error("store connection failed: {message}")]
    Connection { message: String },

    #[error("schema initialization failed: {message}")]
    Schema { message: String },

    #[error("rule has {count} fields but a row holds at most 6")]
    TooManyFields { count: usize },

    #[error("field offset {offset} is out of range (0..=5)")]
    InvalidOffset { offset: usize },

    #[error("duplicate rule: {message}")]
    Duplicate { message: String },

    #[error("storage rejected operation: {message}")]
    Storage { message: String },

    #[error(transparent)]
    Model(#[from] gk_core::Error),
}

/// SeaORM 에러를 어댑터 에러로 분류
///
/// 접속 단절은 `Connection`, 유니크 제약 위반은 `Duplicate`,
/// 나머지는 엔진 메시지를 그대로 담아 `Storage`가 됩니다.
pub(crate) fn storage_error(err: DbErr) -> Error {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        return Error::Duplicate { message };
    }
    match err {
        DbErr::Conn(e) => Error::Connection {
            message: e.to_string(),
        },
        DbErr::ConnectionAcquire(e) => Error::Connection {
            message: e.to_string(),
        },
        e => Error::Storage {
            message: e.to_string(),
        },
    }
}
