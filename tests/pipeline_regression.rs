//! Pipeline Regression Test
//!
//! Exercises the full analysis path the CLI wires together: raw job rows
//! (with data-entry noise) -> validated events -> MTBF + yearly summary +
//! forecast. Also checks the job-log column contract survives a CSV round
//! trip.

use sparecast::{
    component_activity, compute_reliability, parse_events, Config, ForecastFailure, Forecaster,
    RawJobRow, Trend,
};

fn row(asset: &str, comp: &str, date: &str) -> RawJobRow {
    RawJobRow {
        asset_id: asset.to_string(),
        component_name: comp.to_string(),
        report_date: date.to_string(),
    }
}

/// Two years (2023-2024) of pump jobs with an irregular monthly cadence,
/// plus a sparse second component and two unusable rows. Month `i`
/// (0-based from January 2023) gets `1 + ((i * 5) % 7) % 3` jobs, on
/// distinct days, so no month is empty and no simple cycle repeats.
fn fleet_rows() -> Vec<RawJobRow> {
    let mut rows = Vec::new();
    for i in 0u32..24 {
        let year = 2023 + i / 12;
        let month = i % 12 + 1;
        let jobs = 1 + ((i * 5) % 7) % 3;
        for k in 0..jobs {
            let day = 3 + 9 * k;
            rows.push(row(
                "KM-01",
                "Seawater Pump",
                &format!("{day:02}/{month:02}/{year}"),
            ));
        }
    }
    rows.push(row("KM-02", "Radar", "10/06/2023"));
    rows.push(row("KM-02", "Radar", "not reported"));
    rows.push(row("KM-01", "Seawater Pump", ""));
    rows
}

#[test]
fn noisy_rows_are_excluded_but_never_abort() {
    let parsed = parse_events(&fleet_rows());
    assert_eq!(parsed.rejected, 2);
    // 44 pump jobs across 24 months, plus one valid Radar job
    assert_eq!(parsed.events.len(), 45);
}

#[test]
fn mtbf_reports_every_component_but_only_averages_real_gaps() {
    let parsed = parse_events(&fleet_rows());
    let records = compute_reliability(&parsed.events);

    let pump = &records["Seawater Pump"];
    assert!(pump.mean_interval_days.is_some());
    assert_eq!(pump.sample_count, 43);

    // a single valid Radar event: listed, but with an undefined mean
    let radar = &records["Radar"];
    assert_eq!(radar.mean_interval_days, None);
    assert_eq!(radar.sample_count, 0);
}

#[test]
fn summary_ranks_pump_first_and_detects_rising_activity() {
    let parsed = parse_events(&fleet_rows());
    let activities = component_activity(&parsed.events);

    assert_eq!(activities.len(), 2);
    let pump = &activities[0];
    assert_eq!(pump.component_name, "Seawater Pump");
    assert_eq!(pump.total, 44);
    assert_eq!(pump.yearly_counts, vec![(2023, 21), (2024, 23)]);
    assert_eq!(pump.trend_delta, 2);
    assert_eq!(pump.trend, Trend::Rising);

    let radar = &activities[1];
    assert_eq!(radar.yearly_counts, vec![(2023, 1), (2024, 0)]);
    assert_eq!(radar.trend, Trend::Falling);
}

#[test]
fn forecast_runs_for_busy_component_and_refuses_sparse_one() {
    let parsed = parse_events(&fleet_rows());
    let forecaster = Forecaster::from_config(&Config::default());

    let pump = forecaster
        .forecast_component("Seawater Pump", &parsed.events, 3)
        .expect("24 observed months should forecast");
    assert_eq!(pump.history.len(), 24);
    assert_eq!(pump.predicted_counts.len(), 3);
    for i in 0..3 {
        assert!(pump.predicted_counts[i] >= 0.0);
        assert!(pump.lower_bound[i] <= pump.predicted_counts[i]);
        assert!(pump.predicted_counts[i] <= pump.upper_bound[i]);
    }

    let radar = forecaster
        .forecast_component("Radar", &parsed.events, 3)
        .unwrap_err();
    assert!(matches!(radar, ForecastFailure::InsufficientHistory { .. }));
}

#[test]
fn json_report_exposes_forecast_and_summary_fields() {
    let parsed = parse_events(&fleet_rows());
    let forecaster = Forecaster::from_config(&Config::default());
    let series = forecaster
        .forecast_component("Seawater Pump", &parsed.events, 3)
        .expect("forecast");

    let report = serde_json::to_value(&series).expect("forecast serializes");
    assert_eq!(report["component_name"], "Seawater Pump");
    assert_eq!(report["predicted_counts"].as_array().unwrap().len(), 3);
    assert!(report["backtest"]["mean_absolute_error"].is_number());

    let activities = component_activity(&parsed.events);
    let report = serde_json::to_value(&activities).expect("summary serializes");
    assert_eq!(report[0]["component_name"], "Seawater Pump");
    assert_eq!(report[0]["total"], 44);
    assert_eq!(report[0]["trend"], "Rising");
}

#[test]
fn job_log_column_contract_round_trips_through_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("jobs.csv");

    let mut writer = csv::Writer::from_path(&path).expect("create csv");
    writer
        .write_record(["VESSELID", "COMPNAME", "JOBREPORT_DATE"])
        .unwrap();
    writer.write_record(["KM-01", "Main Engine", "05/03/2024"]).unwrap();
    writer.write_record(["KM-01", "Main Engine", "15/03/2024"]).unwrap();
    writer.flush().unwrap();

    let mut reader = csv::Reader::from_path(&path).expect("open csv");
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["VESSELID", "COMPNAME", "JOBREPORT_DATE"]
    );

    let rows: Vec<RawJobRow> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            row(&r[0], &r[1], &r[2])
        })
        .collect();
    let parsed = parse_events(&rows);
    assert_eq!(parsed.rejected, 0);

    // day-first: 5 March and 15 March, a single 10-day gap
    let records = compute_reliability(&parsed.events);
    assert_eq!(records["Main Engine"].mean_interval_days, Some(10.0));
    assert_eq!(records["Main Engine"].sample_count, 1);
}
