//! gk-sql: 정책 규칙 SQL 저장 어댑터
//!
//! 접근 제어 엔진의 정책 모델을 관계형 테이블 하나에 저장하고
//! 복원합니다. SeaORM을 사용하며, 방언(MySQL/Postgres/SQLite)은
//! 접속 설정으로 선택합니다.
//!
//! # 모듈 구조
//!
//! - `config`: 접속 설정(호스트/포트/방언/자격증명)
//! - `entity`: `policy_rules` 테이블 정의
//! - `codec`: 규칙 튜플 ↔ 행 인코딩 및 매칭 조건 생성
//! - `adapter`: 저장 오퍼레이션 (load/save/add/remove/remove_filtered)
//! - `error`: 어댑터 에러 타입

pub mod adapter;
pub mod codec;
pub mod config;
pub mod entity;
pub mod error;

pub use adapter::SqlAdapter;
pub use config::{Dialect, StoreConfig};
pub use error::{Error, Result};
