//! 공통 에러 타입
//!
//! 정책 모델 계층에서 발생하는 에러를 정의합니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// 정책 모델 에러
#[derive(Debug, Error)]
pub enum Error {
    /// 규칙 타입 태그가 "p" 또는 "g" 네임스페이스 밖에 있는 경우.
    /// 모델은 두 섹션만 가지므로 해당 규칙을 담을 자리가 없습니다.
    #[error("unknown rule type tag: '{rule_type}' (expected a tag starting with 'p' or 'g')")]
    UnknownRuleType { rule_type: String },

    /// 규칙 라인이 `type[, field0[, field1...]]` 형식이 아닌 경우
    #[error("invalid rule line: '{line}'")]
    InvalidRuleLine { line: String },
}
