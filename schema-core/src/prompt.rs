//! 提示词组装
//!
//! 模板中的两个占位符在一次扫描中被替换。替换只发生在模板原文上，
//! 插入的业务需求或表结构文本中即使含有占位符也保持原样。

use crate::constants::prompt::{REQUIREMENT_PLACEHOLDER, TABLE_STRUCTURE_PLACEHOLDER};
use tracing::warn;

/// 提示词模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    template: String,
}

/// 模板中各占位符出现的次数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderReport {
    pub requirement: usize,
    pub table_structure: usize,
}

impl PlaceholderReport {
    /// 两个占位符各出现一次
    pub fn is_well_formed(&self) -> bool {
        self.requirement == 1 && self.table_structure == 1
    }
}

impl PromptDocument {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn placeholder_report(&self) -> PlaceholderReport {
        PlaceholderReport {
            requirement: self.template.matches(REQUIREMENT_PLACEHOLDER).count(),
            table_structure: self.template.matches(TABLE_STRUCTURE_PLACEHOLDER).count(),
        }
    }

    /// 代入业务需求和表结构，模板本身不做校验
    pub fn assemble(&self, requirement: &str, schema: &str) -> String {
        let report = self.placeholder_report();
        if !report.is_well_formed() {
            warn!(
                "模板占位符数量异常: {} 出现 {} 次, {} 出现 {} 次",
                REQUIREMENT_PLACEHOLDER,
                report.requirement,
                TABLE_STRUCTURE_PLACEHOLDER,
                report.table_structure
            );
        }
        assemble(&self.template, requirement, schema)
    }
}

/// 单次扫描替换模板中的占位符
pub fn assemble(template: &str, requirement: &str, schema: &str) -> String {
    let replacements = [
        (REQUIREMENT_PLACEHOLDER, requirement),
        (TABLE_STRUCTURE_PLACEHOLDER, schema),
    ];

    let mut output = String::with_capacity(template.len() + requirement.len() + schema.len());
    let mut rest = template;

    loop {
        // 取最靠前的占位符，相同位置时按声明顺序
        let next = replacements
            .iter()
            .filter_map(|(token, value)| rest.find(token).map(|pos| (pos, *token, *value)))
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, token, value)) => {
                output.push_str(&rest[..pos]);
                output.push_str(value);
                rest = &rest[pos + token.len()..];
            }
            None => {
                output.push_str(rest);
                break;
            }
        }
    }

    output
}
