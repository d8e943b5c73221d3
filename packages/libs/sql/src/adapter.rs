//! 저장 오퍼레이션
//!
//! 각 오퍼레이션은 코덱으로 만든 행/조건에 저장 엔진 요청 하나를
//! 결합한 것입니다. 어댑터는 접속 핸들 외에 상태를 갖지 않고,
//! 트랜잭션 경계도 요청 단위를 넘지 않습니다.

use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Schema,
};

use gk_core::{PolicyModel, Section};

use crate::codec;
use crate::config::StoreConfig;
use crate::entity::{Column, Entity};
use crate::error::{storage_error, Error, Result};

/// 정책 규칙 저장 어댑터
#[derive(Debug)]
pub struct SqlAdapter {
    db: DatabaseConnection,
}

impl SqlAdapter {
    /// 저장소에 접속하고 테이블을 준비
    ///
    /// 풀 구성 후 ping으로 접속을 확인한 다음, 테이블이 없으면
    /// 생성합니다. 이미 있는 테이블은 검사하거나 변경하지 않습니다.
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        tracing::debug!("connecting to {} policy store", config.dialect.as_str());

        let mut options = ConnectOptions::new(config.url());
        options
            .max_connections(5)
            .min_connections(0)
            .idle_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let db = Database::connect(options).await.map_err(|e| Error::Connection {
            message: e.to_string(),
        })?;
        db.ping().await.map_err(|e| Error::Connection {
            message: e.to_string(),
        })?;

        let adapter = Self { db };
        adapter.init_schema().await?;
        Ok(adapter)
    }

    async fn init_schema(&self) -> Result<()> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(Entity);
        table.if_not_exists();
        self.db
            .execute(backend.build(&table))
            .await
            .map_err(|e| Error::Schema {
                message: e.to_string(),
            })?;

        // MySQL에는 CREATE INDEX IF NOT EXISTS가 없어 재접속 시 실패할
        // 수 있다. 인덱스는 필수가 아니므로 실패해도 계속한다.
        let index = Index::create()
            .name("idx_policy_rules_rule_type")
            .table(Entity)
            .col(Column::RuleType)
            .if_not_exists()
            .to_owned();
        let _ = self.db.execute(backend.build(&index)).await;

        tracing::debug!("policy store schema ready");
        Ok(())
    }

    /// 저장된 규칙 전체를 적재해 모델로 복원
    ///
    /// 행은 id 오름차순(생성 순서)으로 읽습니다. 태그는 첫 글자로
    /// 섹션에 배치되므로 "p2" 같은 확장 태그도 그대로 보존됩니다.
    pub async fn load_all(&self) -> Result<PolicyModel> {
        let rows = Entity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        let mut model = PolicyModel::new();
        for row in &rows {
            let (rule_type, rule) = codec::decode_rule(row);
            model.add_rule(&rule_type, rule)?;
        }
        Ok(model)
    }

    /// 모델 전체를 평탄화해 한 번의 벌크 insert로 저장
    ///
    /// 권한 섹션을 먼저, 그 다음 그룹핑 섹션을 저장합니다. 기존 행은
    /// 지우지 않습니다. 완전 교체가 필요하면 호출자가 먼저 `clear`를
    /// 호출해야 합니다.
    pub async fn save_all(&self, model: &PolicyModel) -> Result<()> {
        let mut rows = Vec::new();
        for section in [Section::Permission, Section::Grouping] {
            for (rule_type, rules) in model.section(section) {
                for rule in rules {
                    rows.push(codec::encode_rule(rule_type, rule)?);
                }
            }
        }

        if rows.is_empty() {
            return Ok(());
        }
        Entity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// 규칙 하나를 추가
    ///
    /// `_sec`은 호출 규약상 받지만 두 섹션이 한 테이블을 공유하므로
    /// 라우팅에는 쓰지 않습니다.
    pub async fn add_rule(&self, _sec: &str, rule_type: &str, rule: &[String]) -> Result<()> {
        let row = codec::encode_rule(rule_type, rule)?;
        Entity::insert(row)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// 인코딩 결과와 완전히 일치하는 행을 모두 삭제
    ///
    /// 같은 내용의 중복 행은 구분할 수 없으므로 함께 삭제됩니다.
    pub async fn remove_rule(&self, _sec: &str, rule_type: &str, rule: &[String]) -> Result<()> {
        let condition = codec::exact_condition(rule_type, rule)?;
        Entity::delete_many()
            .filter(condition)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// 오프셋 구간 조건과 일치하는 행을 모두 삭제
    ///
    /// 일치하는 행이 없어도 성공입니다.
    pub async fn remove_filtered(
        &self,
        _sec: &str,
        rule_type: &str,
        field_offset: usize,
        field_values: &[String],
    ) -> Result<()> {
        let condition = codec::match_condition(rule_type, field_offset, field_values)?;
        Entity::delete_many()
            .filter(condition)
            .exec(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// 저장된 규칙을 모두 삭제
    ///
    /// `save_all` 전에 호출하면 완전 교체가 됩니다.
    pub async fn clear(&self) -> Result<()> {
        Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// 접속을 닫고 어댑터를 소멸
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(|e| Error::Connection {
            message: e.to_string(),
        })
    }
}
