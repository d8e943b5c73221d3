//! gk-core: Gatekit 공통 정책 모델 라이브러리
//!
//! 이 크레이트는 접근 제어 엔진과 저장 어댑터가 공유하는
//! 인메모리 정책 모델과 규칙 라인 포맷을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `model`: 정책 모델(섹션/규칙 타입/규칙 튜플) 및 규칙 라인 파싱
//! - `error`: 공통 에러 타입

pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{PolicyModel, Section};
