//! Shared domain types.
//!
//! These types are intentionally kept small and serializable so they can be:
//!
//! - produced by the classifiers and the pipeline
//! - written to the XLSX report
//! - exported to JSON for downstream scripts

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Column headers the input table must carry.
///
/// Order matches the order used in error messages.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_TITLE, COL_SUMMARY, COL_PUBLISH_TIME, COL_AUTHOR, COL_LINK];

pub const COL_TITLE: &str = "标题";
pub const COL_SUMMARY: &str = "摘要";
pub const COL_PUBLISH_TIME: &str = "发布时间";
pub const COL_AUTHOR: &str = "作者";
pub const COL_LINK: &str = "文章链接";

/// Derived columns appended to the cleaned-data sheet.
pub const COL_ACTIVITY: &str = "活动类型";
pub const COL_EFFECTIVE_DATE: &str = "有效日期";
pub const COL_BRANCH: &str = "分支机构";

/// Suffix appended to the input file stem for the report file.
pub const OUTPUT_SUFFIX: &str = "_分析结果";

/// Coarse activity type of an article.
///
/// Declaration order is the classifier's precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ActivityCategory {
    #[serde(rename = "联谊交流类")]
    Networking,
    #[serde(rename = "企业参访类")]
    CorporateVisit,
    #[serde(rename = "论坛讲座类")]
    Forum,
    #[serde(rename = "公益服务类")]
    Charity,
    #[serde(rename = "跨界合作类")]
    Partnership,
    #[serde(rename = "内部治理类")]
    Governance,
    #[serde(rename = "学术研究类")]
    Research,
    #[serde(rename = "文体赛事类")]
    SportsArts,
    #[serde(rename = "其他未分类")]
    Uncategorized,
}

impl ActivityCategory {
    /// Every category, default last.
    pub const ALL: [ActivityCategory; 9] = [
        ActivityCategory::Networking,
        ActivityCategory::CorporateVisit,
        ActivityCategory::Forum,
        ActivityCategory::Charity,
        ActivityCategory::Partnership,
        ActivityCategory::Governance,
        ActivityCategory::Research,
        ActivityCategory::SportsArts,
        ActivityCategory::Uncategorized,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityCategory::Networking => "联谊交流类",
            ActivityCategory::CorporateVisit => "企业参访类",
            ActivityCategory::Forum => "论坛讲座类",
            ActivityCategory::Charity => "公益服务类",
            ActivityCategory::Partnership => "跨界合作类",
            ActivityCategory::Governance => "内部治理类",
            ActivityCategory::Research => "学术研究类",
            ActivityCategory::SportsArts => "文体赛事类",
            ActivityCategory::Uncategorized => "其他未分类",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Regional chapter an article is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Branch {
    #[serde(rename = "光华EMBA广东校友会")]
    Guangdong,
    #[serde(rename = "光华EMBA华南校友会")]
    SouthChina,
    #[serde(rename = "北京大學光華管理學院香港校友會")]
    HongKong,
    #[serde(rename = "北大光华华东校友会")]
    EastChina,
    #[serde(rename = "北大光华校友会总部")]
    Headquarters,
}

impl Branch {
    pub const ALL: [Branch; 5] = [
        Branch::Guangdong,
        Branch::SouthChina,
        Branch::HongKong,
        Branch::EastChina,
        Branch::Headquarters,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Branch::Guangdong => "光华EMBA广东校友会",
            Branch::SouthChina => "光华EMBA华南校友会",
            Branch::HongKong => "北京大學光華管理學院香港校友會",
            Branch::EastChina => "北大光华华东校友会",
            Branch::Headquarters => "北大光华校友会总部",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One input row.
///
/// `raw` holds every cell of the source row (aligned with the table headers)
/// so extra columns can be written back out untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub summary: Option<String>,
    pub publish_time: Option<String>,
    pub source_account: Option<String>,
    pub link: Option<String>,
    pub raw: Vec<String>,
}

/// An article plus the three derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub article: ArticleRecord,
    /// `publish_time` parsed as a timestamp (`None` when unparseable).
    pub published_at: Option<NaiveDateTime>,
    pub activity: ActivityCategory,
    pub effective_date: Option<NaiveDateTime>,
    pub branch: Branch,
}

/// Calendar month bucket used by the trend view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Inclusive calendar-date window applied to effective dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Whether the calendar day of `dt` lies within the window.
    pub fn contains(&self, dt: &NaiveDateTime) -> bool {
        let day = dt.date();
        self.start <= day && day <= self.end
    }
}

impl Default for DateWindow {
    /// 2023-01-01 through 2025-10-31.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2025, 10, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

/// Branch × category count matrix.
///
/// `columns` is always the full category list; `rows` only holds branches
/// that appear in the filtered data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchMatrix {
    pub columns: Vec<ActivityCategory>,
    pub rows: Vec<BranchRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRow {
    pub branch: Branch,
    pub counts: Vec<usize>,
}

/// Row bookkeeping for a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub rows_read: usize,
    pub rows_without_title: usize,
    pub rows_without_date: usize,
    pub rows_outside_window: usize,
    pub rows_used: usize,
}

/// Everything the report writer needs.
#[derive(Debug, Clone)]
pub struct ReportBundle {
    /// Header row of the source table (aligned with `ArticleRecord::raw`).
    pub headers: Vec<String>,
    pub records: Vec<EnrichedRecord>,
    pub branch_matrix: BranchMatrix,
    pub category_counts: Vec<(ActivityCategory, usize)>,
    pub monthly_trend: Vec<(YearMonth, usize)>,
    pub window: DateWindow,
    pub stats: RunStats,
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub window: DateWindow,
    pub export_json: Option<PathBuf>,
    pub quiet: bool,
}

/// `<dir>/<stem>_分析结果.xlsx` next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.xlsx"))
}
