//! 규칙 튜플 ↔ 행 인코딩
//!
//! I/O 없는 순수 계층입니다. 규칙을 행으로, 행을 규칙으로 변환하고
//! 삭제 오퍼레이션이 쓰는 매칭 조건을 만듭니다.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, Condition};

use crate::entity::{ActiveModel, Column, Model};
use crate::error::{Error, Result};

/// 행 하나가 담을 수 있는 최대 필드 수
pub const MAX_FIELDS: usize = 6;

/// 필드 슬롯 컬럼 (슬롯 인덱스 순)
const FIELD_COLUMNS: [Column; MAX_FIELDS] = [
    Column::Field0,
    Column::Field1,
    Column::Field2,
    Column::Field3,
    Column::Field4,
    Column::Field5,
];

/// 규칙을 행으로 인코딩
///
/// 튜플의 i번째 필드가 i번 슬롯에 들어가고, 길이를 넘는 슬롯은 비워
/// 둡니다. 필드가 6개를 넘으면 저장 전에 거부합니다.
pub fn encode_rule(rule_type: &str, rule: &[String]) -> Result<ActiveModel> {
    if rule.len() > MAX_FIELDS {
        return Err(Error::TooManyFields { count: rule.len() });
    }
    Ok(ActiveModel {
        id: NotSet,
        rule_type: Set(rule_type.to_string()),
        field0: Set(rule.first().cloned()),
        field1: Set(rule.get(1).cloned()),
        field2: Set(rule.get(2).cloned()),
        field3: Set(rule.get(3).cloned()),
        field4: Set(rule.get(4).cloned()),
        field5: Set(rule.get(5).cloned()),
    })
}

/// 행을 규칙으로 디코딩
///
/// 슬롯을 순서대로 읽되 비어 있는(NULL 또는 빈 문자열) 슬롯은
/// 건너뜁니다. 중간에 빈 슬롯이 낀 행은 그래서 더 짧은 튜플로
/// 복원됩니다. 호출자는 비어 있지 않은 두 필드 사이에 빈 문자열을
/// 끼워 저장하면 안 됩니다.
pub fn decode_rule(row: &Model) -> (String, Vec<String>) {
    let slots = [
        &row.field0,
        &row.field1,
        &row.field2,
        &row.field3,
        &row.field4,
        &row.field5,
    ];

    let mut rule = Vec::new();
    for slot in slots {
        if let Some(value) = slot {
            if !value.is_empty() {
                rule.push(value.clone());
            }
        }
    }
    (row.rule_type.clone(), rule)
}

/// 부분 일치 조건 생성
///
/// `rule_type`은 항상 고정하고, `field_offset`부터 값 목록 길이만큼의
/// 슬롯 구간에만 동등 조건을 겁니다. 구간 밖 슬롯은 제약하지 않으며,
/// 마지막 슬롯(5)을 넘어가는 값은 조건에 들어가지 않습니다.
pub fn match_condition(
    rule_type: &str,
    field_offset: usize,
    field_values: &[String],
) -> Result<Condition> {
    if field_offset >= MAX_FIELDS {
        return Err(Error::InvalidOffset {
            offset: field_offset,
        });
    }

    let mut condition = Condition::all().add(Column::RuleType.eq(rule_type));
    let window_end = field_offset + field_values.len();
    for (slot, column) in FIELD_COLUMNS.iter().enumerate() {
        if field_offset <= slot && slot < window_end {
            condition = condition.add(column.eq(field_values[slot - field_offset].as_str()));
        }
    }
    Ok(condition)
}

/// 완전 일치 조건 생성
///
/// 규칙을 행으로 인코딩했을 때와 모든 컬럼이 같은 행만 매칭합니다.
/// 튜플에 없는 슬롯은 `IS NULL`로 고정하므로 접두사만 같은 더 긴
/// 규칙은 매칭되지 않습니다.
pub fn exact_condition(rule_type: &str, rule: &[String]) -> Result<Condition> {
    if rule.len() > MAX_FIELDS {
        return Err(Error::TooManyFields { count: rule.len() });
    }

    let mut condition = Condition::all().add(Column::RuleType.eq(rule_type));
    for (slot, column) in FIELD_COLUMNS.iter().enumerate() {
        condition = condition.add(match rule.get(slot) {
            Some(value) => column.eq(value.as_str()),
            None => column.is_null(),
        });
    }
    Ok(condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn delete_sql(condition: Condition) -> String {
        Entity::delete_many()
            .filter(condition)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    fn stored(encoded: ActiveModel) -> Model {
        Model {
            id: 1,
            rule_type: encoded.rule_type.unwrap(),
            field0: encoded.field0.unwrap(),
            field1: encoded.field1.unwrap(),
            field2: encoded.field2.unwrap(),
            field3: encoded.field3.unwrap(),
            field4: encoded.field4.unwrap(),
            field5: encoded.field5.unwrap(),
        }
    }

    #[test]
    fn test_encode_fills_slots_in_order() {
        let rule = vec!["alice".to_string(), "data1".to_string(), "read".to_string()];
        let row = encode_rule("p", &rule).unwrap();

        assert_eq!(row.rule_type.clone().unwrap(), "p");
        assert_eq!(row.field0.clone().unwrap(), Some("alice".to_string()));
        assert_eq!(row.field1.clone().unwrap(), Some("data1".to_string()));
        assert_eq!(row.field2.clone().unwrap(), Some("read".to_string()));
        assert_eq!(row.field3.clone().unwrap(), None);
        assert_eq!(row.field5.clone().unwrap(), None);
    }

    #[test]
    fn test_encode_six_fields_ok_seven_rejected() {
        let six: Vec<String> = (0..6).map(|i| format!("f{}", i)).collect();
        assert!(encode_rule("p", &six).is_ok());

        let seven: Vec<String> = (0..7).map(|i| format!("f{}", i)).collect();
        let err = encode_rule("p", &seven).unwrap_err();
        assert!(matches!(err, Error::TooManyFields { count: 7 }));
    }

    #[test]
    fn test_encode_empty_rule() {
        let row = encode_rule("p", &[]).unwrap();
        assert_eq!(row.field0.clone().unwrap(), None);
    }

    #[test]
    fn test_decode_skips_unset_and_empty_slots() {
        let row = Model {
            id: 1,
            rule_type: "p".to_string(),
            field0: Some("alice".to_string()),
            field1: Some(String::new()),
            field2: Some("read".to_string()),
            field3: None,
            field4: None,
            field5: None,
        };

        // 빈 슬롯이 낀 행은 더 짧은 튜플로 복원된다
        let (rule_type, rule) = decode_rule(&row);
        assert_eq!(rule_type, "p");
        assert_eq!(rule, vec!["alice", "read"]);
    }

    #[test]
    fn test_round_trip() {
        let rule = vec!["alice".to_string(), "data1".to_string(), "read".to_string()];
        let row = stored(encode_rule("p", &rule).unwrap());
        assert_eq!(decode_rule(&row), ("p".to_string(), rule));
    }

    #[test]
    fn test_round_trip_boundary_lengths() {
        let row = stored(encode_rule("p", &[]).unwrap());
        assert_eq!(decode_rule(&row), ("p".to_string(), vec![]));

        let six: Vec<String> = (0..6).map(|i| format!("f{}", i)).collect();
        let row = stored(encode_rule("g", &six).unwrap());
        assert_eq!(decode_rule(&row), ("g".to_string(), six));
    }

    #[test]
    fn test_match_condition_constrains_window_only() {
        let values = vec!["x".to_string(), "y".to_string()];
        let sql = delete_sql(match_condition("p", 1, &values).unwrap());

        assert!(sql.contains(r#""rule_type" = 'p'"#));
        assert!(sql.contains(r#""field1" = 'x'"#));
        assert!(sql.contains(r#""field2" = 'y'"#));
        assert!(!sql.contains("field0"));
        assert!(!sql.contains("field3"));
        assert!(!sql.contains("field4"));
        assert!(!sql.contains("field5"));
    }

    #[test]
    fn test_match_condition_offset_bounds() {
        assert!(matches!(
            match_condition("p", 6, &[]).unwrap_err(),
            Error::InvalidOffset { offset: 6 }
        ));

        // 오프셋 5는 유효하고, 마지막 슬롯을 넘는 값은 무시된다
        let values = vec!["x".to_string(), "y".to_string()];
        let sql = delete_sql(match_condition("p", 5, &values).unwrap());
        assert!(sql.contains(r#""field5" = 'x'"#));
        assert!(!sql.contains("'y'"));
    }

    #[test]
    fn test_match_condition_empty_values_matches_type_only() {
        let sql = delete_sql(match_condition("g", 0, &[]).unwrap());
        assert!(sql.contains(r#""rule_type" = 'g'"#));
        assert!(!sql.contains("field"));
    }

    #[test]
    fn test_exact_condition_pins_unset_slots_to_null() {
        let rule = vec!["alice".to_string(), "data1".to_string()];
        let sql = delete_sql(exact_condition("p", &rule).unwrap());

        assert!(sql.contains(r#""rule_type" = 'p'"#));
        assert!(sql.contains(r#""field0" = 'alice'"#));
        assert!(sql.contains(r#""field1" = 'data1'"#));
        assert!(sql.contains(r#""field2" IS NULL"#));
        assert!(sql.contains(r#""field5" IS NULL"#));
    }

    #[test]
    fn test_exact_condition_rejects_oversized_rule() {
        let seven: Vec<String> = (0..7).map(|i| format!("f{}", i)).collect();
        assert!(matches!(
            exact_condition("p", &seven).unwrap_err(),
            Error::TooManyFields { count: 7 }
        ));
    }
}
