//! 정책 모델
//!
//! 접근 제어 엔진이 소유하는 인메모리 규칙 집합입니다.
//! 모델은 권한("p")과 그룹핑("g") 두 개의 고정 섹션을 가지며,
//! 각 섹션은 규칙 타입 태그 → 규칙 튜플 목록의 정렬된 맵입니다.
//!
//! # 규칙 라인 포맷
//!
//! 한 규칙은 `type[, field0[, field1...]]` 형식의 한 줄 텍스트로
//! 표현됩니다 (예: `p, alice, data1, read`). 말미의 빈 필드는
//! 생략합니다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 정책 섹션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// 권한 규칙 ("p" 계열 태그)
    Permission,

    /// 역할 그룹핑 규칙 ("g" 계열 태그)
    Grouping,
}

impl Section {
    /// 섹션의 기본 태그
    pub fn as_tag(&self) -> &'static str {
        match self {
            Section::Permission => "p",
            Section::Grouping => "g",
        }
    }

    /// 규칙 타입 태그가 속하는 섹션
    ///
    /// 첫 글자로 라우팅하므로 "p2", "g3" 같은 확장 태그도 그대로
    /// 보존됩니다. 두 네임스페이스 밖의 태그는 에러입니다.
    pub fn of(rule_type: &str) -> Result<Self> {
        match rule_type.chars().next() {
            Some('p') => Ok(Section::Permission),
            Some('g') => Ok(Section::Grouping),
            _ => Err(Error::UnknownRuleType {
                rule_type: rule_type.to_string(),
            }),
        }
    }
}

/// 인메모리 정책 모델
///
/// 태그 순서는 사전순으로 결정적이며, 한 태그 안의 규칙 순서는
/// 추가된 순서를 유지합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyModel {
    /// "p" 섹션
    pub permission: BTreeMap<String, Vec<Vec<String>>>,

    /// "g" 섹션
    pub grouping: BTreeMap<String, Vec<Vec<String>>>,
}

impl PolicyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// 섹션의 규칙 맵
    pub fn section(&self, section: Section) -> &BTreeMap<String, Vec<Vec<String>>> {
        match section {
            Section::Permission => &self.permission,
            Section::Grouping => &self.grouping,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut BTreeMap<String, Vec<Vec<String>>> {
        match section {
            Section::Permission => &mut self.permission,
            Section::Grouping => &mut self.grouping,
        }
    }

    /// 규칙 하나를 해당 태그의 목록 끝에 추가
    pub fn add_rule(&mut self, rule_type: &str, rule: Vec<String>) -> Result<()> {
        let section = Section::of(rule_type)?;
        self.section_mut(section)
            .entry(rule_type.to_string())
            .or_default()
            .push(rule);
        Ok(())
    }

    /// 태그의 규칙 목록. 태그가 없으면 빈 슬라이스를 돌려줍니다.
    pub fn rules(&self, rule_type: &str) -> &[Vec<String>] {
        Section::of(rule_type)
            .ok()
            .and_then(|section| self.section(section).get(rule_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 두 섹션을 모두 비움
    pub fn clear(&mut self) {
        self.permission.clear();
        self.grouping.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.permission.is_empty() && self.grouping.is_empty()
    }

    /// 전체 규칙 수
    pub fn rule_count(&self) -> usize {
        self.permission
            .values()
            .chain(self.grouping.values())
            .map(Vec::len)
            .sum()
    }

    /// 규칙 라인 한 줄을 파싱해 추가
    pub fn add_rule_line(&mut self, line: &str) -> Result<()> {
        let (rule_type, rule) = parse_rule_line(line)?;
        self.add_rule(&rule_type, rule)
    }

    /// 줄 단위 규칙 텍스트를 읽어 모델에 추가
    ///
    /// 빈 줄과 `#` 주석 줄은 건너뜁니다.
    pub fn load_from_text(&mut self, text: &str) -> Result<()> {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.add_rule_line(line)?;
        }
        Ok(())
    }

    /// 모델 전체를 규칙 라인 텍스트로 직렬화
    ///
    /// 권한 섹션을 먼저, 그 다음 그룹핑 섹션을 출력합니다.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for section in [Section::Permission, Section::Grouping] {
            for (rule_type, rules) in self.section(section) {
                for rule in rules {
                    out.push_str(&format_rule_line(rule_type, rule));
                    out.push('\n');
                }
            }
        }
        out
    }
}

/// 규칙 라인 파싱
///
/// `"p, alice, data1, read"` → `("p", ["alice", "data1", "read"])`.
/// 각 토큰 양끝의 공백은 제거하고 빈 필드는 버립니다.
pub fn parse_rule_line(line: &str) -> Result<(String, Vec<String>)> {
    let mut tokens = line.split(',').map(str::trim);
    let rule_type = match tokens.next() {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ => {
            return Err(Error::InvalidRuleLine {
                line: line.to_string(),
            })
        }
    };
    let rule = tokens
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();
    Ok((rule_type, rule))
}

/// 규칙을 한 줄 텍스트로 포맷
pub fn format_rule_line(rule_type: &str, rule: &[String]) -> String {
    let mut line = rule_type.to_string();
    for field in rule {
        line.push_str(", ");
        line.push_str(field);
    }
    line
}
