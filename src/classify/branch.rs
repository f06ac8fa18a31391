//! Branch attribution.
//!
//! Rules are checked in order against the lowercased
//! `title + summary + source_account` text:
//!
//! 1. Guangdong markers
//! 2. South-China markers, unless Guangdong also appears
//! 3. Hong Kong markers
//! 4. East-China markers, or Shanghai together with East-China/alumni-association
//! 5. headquarters-account re-check (see [`headquarters_recheck`])
//! 6. default: headquarters

use crate::domain::Branch;

use super::combined_text;

/// Umbrella publishing account. Compared after `trim()` only.
pub const HEADQUARTERS_ACCOUNT: &str = "北大光华校友会";

const GUANGDONG: &str = "广东";
const GUANGDONG_EMBA: &str = "emba广东";
const SOUTH_CHINA: &str = "华南";
const HONG_KONG: &str = "香港";
const EAST_CHINA: &str = "华东";
const SHANGHAI: &str = "上海";
const ALUMNI_ASSOCIATION: &str = "校友会";
const SHANGHAI_ALUMNI: &str = "上海校友";

/// Attribute an article to a branch. Never fails.
pub fn assign_branch(title: Option<&str>, summary: Option<&str>, source_account: Option<&str>) -> Branch {
    let text = combined_text(&[title, summary, source_account]);

    primary_rules(&text)
        .or_else(|| headquarters_recheck(&text, source_account))
        .unwrap_or(Branch::Headquarters)
}

fn primary_rules(text: &str) -> Option<Branch> {
    let has = |kw: &str| text.contains(kw);

    if has(GUANGDONG) || has(GUANGDONG_EMBA) {
        return Some(Branch::Guangdong);
    }
    // 广东 overlaps with 华南; only claim South China when Guangdong is absent.
    if has(SOUTH_CHINA) && !has(GUANGDONG) {
        return Some(Branch::SouthChina);
    }
    if has(HONG_KONG) {
        return Some(Branch::HongKong);
    }
    if has(EAST_CHINA) || (has(SHANGHAI) && (has(EAST_CHINA) || has(ALUMNI_ASSOCIATION))) {
        return Some(Branch::EastChina);
    }
    None
}

/// Headquarters account reporting on a branch event.
///
/// Only applies when the source account is exactly the headquarters account
/// (case-sensitive, surrounding whitespace ignored). The gate tests
/// `上海校友` rather than the compound Shanghai condition of the primary rules.
fn headquarters_recheck(text: &str, source_account: Option<&str>) -> Option<Branch> {
    if source_account.map(str::trim) != Some(HEADQUARTERS_ACCOUNT) {
        return None;
    }

    let has = |kw: &str| text.contains(kw);
    let gate = [GUANGDONG, SOUTH_CHINA, HONG_KONG, EAST_CHINA, SHANGHAI_ALUMNI];
    if !gate.iter().any(|kw| has(*kw)) {
        return None;
    }

    if has(GUANGDONG) {
        Some(Branch::Guangdong)
    } else if has(SOUTH_CHINA) {
        Some(Branch::SouthChina)
    } else if has(HONG_KONG) {
        Some(Branch::HongKong)
    } else if has(EAST_CHINA) || has(SHANGHAI) {
        Some(Branch::EastChina)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(title: &str, summary: &str, account: &str) -> Branch {
        assign_branch(Some(title), Some(summary), Some(account))
    }

    #[test]
    fn guangdong_beats_south_china() {
        assert_eq!(branch("广东华南校友春茗", "", "某公众号"), Branch::Guangdong);
        assert_eq!(branch("EMBA广东 年会", "", ""), Branch::Guangdong);
    }

    #[test]
    fn south_china_without_guangdong() {
        assert_eq!(branch("华南区校友走访", "", "某公众号"), Branch::SouthChina);
    }

    #[test]
    fn hong_kong_marker() {
        assert_eq!(branch("香港校友聚会", "", ""), Branch::HongKong);
    }

    #[test]
    fn east_china_markers() {
        assert_eq!(branch("华东校友论坛", "", ""), Branch::EastChina);
        // 上海 + 校友会 (via the account name).
        assert_eq!(branch("上海站活动", "", "北大光华华东校友会"), Branch::EastChina);
        assert_eq!(branch("上海站活动", "", "上海光华校友会"), Branch::EastChina);
        // 上海 alone is not enough.
        assert_eq!(branch("上海站活动", "", "某公众号"), Branch::Headquarters);
    }

    #[test]
    fn account_name_contributes_to_matching() {
        assert_eq!(branch("春茗晚宴", "", "光华EMBA广东校友会"), Branch::Guangdong);
    }

    #[test]
    fn default_is_headquarters() {
        assert_eq!(branch("新年贺词", "祝福", "某公众号"), Branch::Headquarters);
        assert_eq!(assign_branch(None, None, None), Branch::Headquarters);
    }

    #[test]
    fn headquarters_recheck_requires_exact_trimmed_account() {
        let text = combined_text(&[Some("上海校友徒步"), Some(""), Some(" 北大光华校友会 ")]);
        assert_eq!(
            headquarters_recheck(&text, Some(" 北大光华校友会 ")),
            Some(Branch::EastChina)
        );
        assert_eq!(headquarters_recheck(&text, Some("北大光华校友会总部")), None);
        assert_eq!(headquarters_recheck(&text, None), None);
    }

    #[test]
    fn headquarters_recheck_gate_uses_shanghai_alumni_literal() {
        // 上海 without 上海校友 does not pass the gate.
        let text = "上海 活动 none";
        assert_eq!(headquarters_recheck(text, Some(HEADQUARTERS_ACCOUNT)), None);

        let text = "上海校友 徒步";
        assert_eq!(
            headquarters_recheck(text, Some(HEADQUARTERS_ACCOUNT)),
            Some(Branch::EastChina)
        );
    }

    #[test]
    fn headquarters_account_posting_shanghai_alumni_event() {
        // The account name itself contains 校友会, so 上海 + 校友会 already matches
        // in the primary rules.
        assert_eq!(
            branch("上海校友徒步", "", "北大光华校友会"),
            Branch::EastChina
        );
    }
}
