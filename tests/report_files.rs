use std::io::Write;

use pretty_assertions::assert_eq;
use serde_json::json;

use report_treemap::{Error, ReportInput, TreemapConfig, TreemapRequest};

fn write_report(json: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

#[test]
fn url_report_with_evolution_end_to_end() {
    let file = write_report(&json!([
        {
            "period": "Oct 15, 2026",
            "rows": [
                {"label": "blog", "columns": {"nb_hits": 50}},
                {"label": "index", "columns": {"nb_hits": 40}}
            ]
        },
        {
            "period": "Oct 16, 2026",
            "rows": [
                {"label": "blog", "columns": {"nb_hits": 60}, "idSubtable": 4,
                 "metadata": {"url": "https://example.org/blog", "segment": "x"}},
                {"label": "index", "columns": {"nb_hits": 30}},
                {"label": "about", "columns": {"nb_hits": 10}},
                {"label": "empty", "columns": {"nb_hits": 0}}
            ]
        }
    ]));

    let input = ReportInput::load(file.path()).unwrap();
    let request = TreemapRequest {
        api_method: "Actions.getPageUrls".to_string(),
        column: "nb_hits,nb_visits".to_string(),
        period: "day".to_string(),
        show_evolution_values: true,
        root_name: "Pages".to_string(),
        ..TreemapRequest::default()
    };

    let root = request.generate(&TreemapConfig::default(), input).unwrap();

    assert_eq!(
        serde_json::to_value(&root).unwrap(),
        json!({
            "id": "treemap-root",
            "name": "Pages",
            "data": {},
            "children": [
                {
                    "id": "_0",
                    "name": "blog/",
                    "data": {
                        "$area": 60.0,
                        "evolution": 20,
                        "metadata": {
                            "url": "https://example.org/blog",
                            "tooltip": "\n60 Pageviews\n+20% compared to Oct 15, 2026"
                        },
                        "idSubtable": 4
                    },
                    "children": []
                },
                {
                    "id": "_1",
                    "name": "index",
                    "data": {
                        "$area": 30.0,
                        "evolution": -25,
                        "metadata": {"tooltip": "\n30 Pageviews\n-25% compared to Oct 15, 2026"}
                    },
                    "children": []
                },
                {
                    "id": "_2",
                    "name": "about",
                    "data": {
                        "$area": 10.0,
                        "evolution": 100,
                        "metadata": {"tooltip": "\n10 Pageviews\n+100% compared to Oct 15, 2026"}
                    },
                    "children": []
                }
            ]
        })
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReportInput::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn three_periods_are_rejected() {
    let file = write_report(&json!([{"rows": []}, {"rows": []}, {"rows": []}]));
    let err = ReportInput::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::TooManyPeriods(3)));
}

#[test]
fn config_file_overrides_translation() {
    let file = write_report(&json!({"translations": {"nb_visits": "Sessions"}}));
    let config = TreemapConfig::load(file.path()).unwrap();

    let input = ReportInput::from_json_str(
        r#"{"rows":[{"label":"fr","columns":{"nb_visits":2}}]}"#,
    )
    .unwrap();
    let root = TreemapRequest::default().generate(&config, input).unwrap();

    assert_eq!(root.children[0].tooltip(), Some("\n2 Sessions"));
}
