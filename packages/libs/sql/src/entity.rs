//! `policy_rules` 테이블 정의
//!
//! 규칙 하나가 행 하나입니다. `id`는 엔진이 부여하는 불투명 키로
//! 적재 순서 정렬에만 쓰이고, 규칙의 동일성 비교에는 쓰지 않습니다.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "policy_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub rule_type: String,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub field0: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub field1: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub field2: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub field3: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub field4: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(100))", nullable)]
    pub field5: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
