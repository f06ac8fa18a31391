use std::fs;
use std::path::PathBuf;

use wechat_analyzer::app::pipeline::analyze_file;
use wechat_analyzer::domain::{ActivityCategory, AnalyzeConfig, Branch, DateWindow, default_output_path};

const CSV: &str = "\u{feff}标题,摘要,发布时间,作者,文章链接,阅读数
广东校友春茗晚宴,2024年2月于深圳举行,2024-03-01 20:00:00,光华EMBA广东校友会,https://mp.example/1,120
华东校友论坛,,2024-06-15T10:00:00,北大光华华东校友会,https://mp.example/2,80
,没有标题的行,2024-06-16,北大光华校友会,https://mp.example/3,5
新年贺词,回顾2019年3月,2025-11-02,北大光华校友会,https://mp.example/4,300
香港校友公益行,2023年1月,not a date,北京大學光華管理學院香港校友會,https://mp.example/5,42
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wechat_analyzer_it_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(input: PathBuf, export_json: Option<PathBuf>) -> AnalyzeConfig {
    AnalyzeConfig {
        output: default_output_path(&input),
        input,
        window: DateWindow::default(),
        export_json,
        quiet: true,
    }
}

#[test]
fn csv_to_xlsx_end_to_end() {
    let dir = scratch_dir("e2e");
    let input = dir.join("articles.csv");
    fs::write(&input, CSV).unwrap();
    let json = dir.join("summary.json");

    let run = analyze_file(&config(input, Some(json.clone()))).unwrap();

    assert_eq!(run.output_path, dir.join("articles_分析结果.xlsx"));
    assert!(run.output_path.exists());

    let bundle = &run.bundle;
    assert_eq!(bundle.stats.rows_read, 5);
    assert_eq!(bundle.stats.rows_without_title, 1);
    // 新年贺词: summary year 2019 is discarded, publish time 2025-11-02 is past the window.
    assert_eq!(bundle.stats.rows_outside_window, 1);
    assert_eq!(bundle.stats.rows_used, 3);

    let got: Vec<_> = bundle
        .records
        .iter()
        .map(|r| (r.activity, r.branch, r.effective_date.map(|d| d.format("%Y-%m-%d").to_string())))
        .collect();
    assert_eq!(
        got,
        vec![
            (ActivityCategory::Networking, Branch::Guangdong, Some("2024-02-01".to_string())),
            (ActivityCategory::Forum, Branch::EastChina, Some("2024-06-15".to_string())),
            (ActivityCategory::Charity, Branch::HongKong, Some("2023-01-01".to_string())),
        ]
    );

    let trend: Vec<_> = bundle.monthly_trend.iter().map(|(m, n)| (m.to_string(), *n)).collect();
    assert_eq!(
        trend,
        vec![
            ("2023-01".to_string(), 1),
            ("2024-02".to_string(), 1),
            ("2024-06".to_string(), 1),
        ]
    );

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["stats"]["rows_used"], 3);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_column_writes_nothing() {
    let dir = scratch_dir("schema");
    let input = dir.join("broken.csv");
    fs::write(&input, "标题,摘要,发布时间,作者\n春茗,,2024-01-01,x\n").unwrap();

    let cfg = config(input, None);
    let err = analyze_file(&cfg).unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("文章链接"));
    assert!(!cfg.output.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failed_json_export_leaves_no_report() {
    let dir = scratch_dir("json_fail");
    let input = dir.join("articles.csv");
    fs::write(&input, CSV).unwrap();

    let cfg = config(input, Some(dir.join("missing").join("summary.json")));
    let err = analyze_file(&cfg).unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("summary.json"));
    assert!(!cfg.output.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn failed_report_removes_json_export() {
    let dir = scratch_dir("xlsx_fail");
    let input = dir.join("articles.csv");
    fs::write(&input, CSV).unwrap();
    let json = dir.join("summary.json");

    let mut cfg = config(input, Some(json.clone()));
    cfg.output = dir.join("missing").join("report.xlsx");
    let err = analyze_file(&cfg).unwrap_err();

    assert_eq!(err.exit_code(), 3);
    assert!(!json.exists());
    assert!(!cfg.output.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn undecodable_row_fails_without_output() {
    let dir = scratch_dir("gbk");
    let input = dir.join("articles.csv");
    let mut bytes = "标题,摘要,发布时间,作者,文章链接\n春茗,,2024-01-01,x,l\n".as_bytes().to_vec();
    // "春茗" in GBK.
    bytes.extend_from_slice(b"\xb4\xba\xdc\xf8,,2024-01-02,x,l\n");
    fs::write(&input, bytes).unwrap();

    let cfg = config(input, None);
    let err = analyze_file(&cfg).unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("line 3"));
    assert!(!cfg.output.exists());

    let _ = fs::remove_dir_all(&dir);
}
