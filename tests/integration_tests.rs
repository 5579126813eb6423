use chrono::{Local, TimeZone};
use mockito::Matcher;
use std::path::PathBuf;

use zabbix_problem_report::{
    load_config_from_path, render_problem_table, run_report, Config, ProblemStatus, ReportDocument,
    ReportError,
};

const EXPORT_CSV: &str = ",2024-01-01T00:00,,PROBLEM,host1,disk full,1h\n\
    ,2024-01-01T01:00,,RESOLVED,host2,cpu high,2h\n";

fn config_for(base_url: String, report_dir: PathBuf) -> Config {
    Config {
        username: "alice".to_string(),
        password: "p@ss word".to_string(),
        base_url,
        report_dir,
        timeout_secs: 5,
    }
}

fn body_rows(table: &str) -> Vec<&str> {
    table.lines().filter(|l| l.starts_with("<tr><td>")).collect()
}

#[tokio::test]
async fn test_end_to_end_report() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/index.php")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "alice".into()),
            Matcher::UrlEncoded("password".into(), "p@ss word".into()),
            Matcher::UrlEncoded("enter".into(), "Sign in".into()),
        ]))
        .with_status(302)
        .with_header("location", "zabbix.php?action=dashboard.view")
        .with_header("set-cookie", "zbx_session=abc123; path=/")
        .create_async()
        .await;
    let export = server
        .mock("GET", "/zabbix.php")
        .match_query(Matcher::UrlEncoded("action".into(), "problem.view.csv".into()))
        .match_header("cookie", "zbx_session=abc123")
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(EXPORT_CSV)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let report_dir = tmp.path().join("report");
    let cfg = config_for(server.url(), report_dir.clone());
    let now = Local.with_ymd_and_hms(2024, 1, 2, 8, 30, 15).unwrap();

    let path = run_report(&cfg, now).await.unwrap();

    login.assert_async().await;
    export.assert_async().await;
    assert_eq!(path, report_dir.join("report-2024-01-02-08-30-15.html"));

    let html = std::fs::read_to_string(&path).unwrap();
    let resolved_at = html.find("Resolved Problems").unwrap();
    let (active_part, resolved_part) = html.split_at(resolved_at);

    assert_eq!(
        body_rows(active_part),
        vec!["<tr><td>host1</td><td>disk full</td><td>2024-01-01T00:00</td><td>1h</td></tr>"]
    );
    assert_eq!(
        body_rows(resolved_part),
        vec!["<tr><td>host2</td><td>cpu high</td><td>2024-01-01T01:00</td><td>2h</td></tr>"]
    );
}

#[tokio::test]
async fn test_wrong_credentials_stops_before_export() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/index.php")
        .with_status(200)
        .with_body("Incorrect user name or password or account is temporarily blocked.")
        .create_async()
        .await;
    let export = server
        .mock("GET", "/zabbix.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let report_dir = tmp.path().join("report");
    let cfg = config_for(server.url(), report_dir.clone());

    let err = run_report(&cfg, Local::now()).await.unwrap_err();

    assert!(matches!(err, ReportError::WrongCredentials { status: 200 }));
    assert_eq!(err.exit_code(), 5);
    export.assert_async().await;
    assert!(!report_dir.exists());
}

#[tokio::test]
async fn test_expired_session_on_export() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/index.php")
        .with_status(302)
        .with_header("set-cookie", "zbx_session=abc123")
        .create_async()
        .await;
    server
        .mock("GET", "/zabbix.php")
        .match_query(Matcher::Any)
        .with_status(302)
        .with_header("location", "index.php")
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let cfg = config_for(server.url(), tmp.path().join("report"));

    let err = run_report(&cfg, Local::now()).await.unwrap_err();
    assert!(matches!(err, ReportError::ExportStatus { status: 302 }));
    assert_eq!(err.exit_code(), 9);
}

#[test]
fn test_both_views_over_same_export() {
    let csv = "Severity,Time,Recovery time,Status,Host,Problem,Duration,Ack,Actions,Tags\n\
        High,10:00,,PROBLEM,db-1,Replication lag,10m,No,,\n\
        Info,09:00,09:30,RESOLVED,web-1,HTTP 500s,30m,Yes,,\n\
        Average,08:00,,UNKNOWN,web-2,Ignored,1h,No,,\n\
        Disaster,07:00,,PROBLEM,db-2,Disk full,3h,No,,\n";

    let active = render_problem_table(csv, ProblemStatus::Active);
    let resolved = render_problem_table(csv, ProblemStatus::Resolved);

    let active_rows = body_rows(&active);
    assert_eq!(active_rows.len(), 2);
    assert!(active_rows[0].contains("db-1"));
    assert!(active_rows[1].contains("db-2"));

    let resolved_rows = body_rows(&resolved);
    assert_eq!(resolved_rows.len(), 1);
    assert!(resolved_rows[0].contains("web-1"));

    // neither the header row nor the unknown status leaks into a table
    for table in [&active, &resolved] {
        assert!(!table.contains("web-2"));
        assert!(!table.contains("<td>Host</td>"));
    }

    let doc = ReportDocument::new(&active, &resolved);
    assert!(doc.html().contains("Active Problems"));
    assert!(doc.html().contains("Resolved Problems"));
}

#[test]
fn test_config_file_to_report_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let config_path = tmp.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "zabbix_username: alice\nzabbix_password: \"p@ss word\"\nzabbix_url: http://zbx.example\nreport_dir: out\n",
    )
    .unwrap();

    let cfg = load_config_from_path(&config_path).unwrap();
    assert_eq!(cfg.base_url, "http://zbx.example");
    assert_eq!(cfg.report_dir, PathBuf::from("out"));
    assert_eq!(cfg.masked_password(), "*********");
}
