//! Activity-type classification.
//!
//! A fixed, ordered keyword table. The first category with any keyword
//! present in the lowercased `title + " " + summary` wins.

use crate::domain::ActivityCategory;

use super::combined_text;

/// Keyword buckets in precedence order.
///
/// Keywords must already be lowercase; the haystack is lowercased before
/// matching.
const ACTIVITY_RULES: &[(ActivityCategory, &[&str])] = &[
    (
        ActivityCategory::Networking,
        &["年会", "春茗", "返校", "聚会", "reunion", "班级", "迎新", "团建", "联谊"],
    ),
    (
        ActivityCategory::CorporateVisit,
        &["走进", "参访", "走访", "考察", "调研", "园区", "企业", "工厂", "政府"],
    ),
    (
        ActivityCategory::Forum,
        &["论坛", "讲座", "沙龙", "研讨会", "峰会", "分享会", "对话", "公开课"],
    ),
    (
        ActivityCategory::Charity,
        &["公益", "捐赠", "支教", "环保", "慈善", "志愿服务", "社区服务", "助学"],
    ),
    (
        ActivityCategory::Partnership,
        &["联合", "合作", "共建", "携手", "联盟", "商会", "高校", "兄弟校友会"],
    ),
    (
        ActivityCategory::Governance,
        &["换届", "理事会", "章程", "选举", "工作会议", "制度", "组织架构"],
    ),
    (
        ActivityCategory::Research,
        &["研究", "课题", "白皮书", "报告发布", "学术", "智库"],
    ),
    (
        ActivityCategory::SportsArts,
        &["比赛", "运动会", "文艺", "演出", "摄影", "书画", "体育"],
    ),
];

/// Classify an article into an activity category.
///
/// Never fails; unmatched text yields `ActivityCategory::Uncategorized`.
pub fn classify_activity(title: Option<&str>, summary: Option<&str>) -> ActivityCategory {
    let text = combined_text(&[title, summary]);
    classify_text(&text)
}

fn classify_text(text: &str) -> ActivityCategory {
    ACTIVITY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(ActivityCategory::Uncategorized)
}
