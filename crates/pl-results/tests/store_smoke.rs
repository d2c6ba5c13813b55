use pl_results::*;

/// Run ids in the store are SHA-256 hex digests.
fn id(n: u8) -> String {
    format!("{n:064x}")
}

fn manifest(run_id: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        scenario_name: "heater".to_string(),
        timestamp: timestamp.to_string(),
        engine_version: "v1".to_string(),
        sample_period_s: 0.1,
        t_end_s: 0.1,
        samples: 2,
        plant: DiscretePlantSnapshot {
            b1: 0.03996,
            a1: -0.998,
        },
        actuator: ActuatorLimits {
            min: 0.0,
            max: 100.0,
        },
    }
}

#[test]
fn save_and_load_run() {
    let temp_dir = std::env::temp_dir().join("pl_results_test");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();

    let manifest = manifest(&id(1), "2026-02-25T12:00:00Z");
    let records = vec![
        TimeseriesRecord {
            time_s: 0.0,
            reference: 400.0,
            output: 0.0,
            control: 100.0,
        },
        TimeseriesRecord {
            time_s: 0.1,
            reference: 400.0,
            output: 3.996,
            control: 100.0,
        },
    ];

    store.save_run(&manifest, &records).unwrap();
    assert!(store.has_run(&id(1)));

    let loaded_manifest = store.load_manifest(&id(1)).unwrap();
    assert_eq!(loaded_manifest, manifest);

    let loaded_records = store.load_timeseries(&id(1)).unwrap();
    assert_eq!(loaded_records, records);
}

#[test]
fn list_runs_sorted_by_timestamp() {
    let temp_dir = std::env::temp_dir().join("pl_results_test_list");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();

    store
        .save_run(&manifest(&id(2), "2026-02-25T13:00:00Z"), &[])
        .unwrap();
    store
        .save_run(&manifest(&id(1), "2026-02-25T12:00:00Z"), &[])
        .unwrap();

    let runs = store.list_runs().unwrap();
    let ids: Vec<&str> = runs.iter().map(|m| m.run_id.as_str()).collect();
    assert_eq!(ids, vec![id(1).as_str(), id(2).as_str()]);
}

#[test]
fn missing_run_is_reported() {
    let temp_dir = std::env::temp_dir().join("pl_results_test_missing");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    assert!(!store.has_run(&id(9)));
    assert!(matches!(
        store.load_manifest(&id(9)),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(matches!(
        store.load_timeseries(&id(9)),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn delete_run_removes_directory() {
    let temp_dir = std::env::temp_dir().join("pl_results_test_delete");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir).unwrap();
    store
        .save_run(&manifest(&id(3), "2026-02-25T12:00:00Z"), &[])
        .unwrap();
    assert!(store.delete_run(&id(3)).unwrap());
    assert!(!store.has_run(&id(3)));
    assert!(!store.delete_run(&id(3)).unwrap());
}

#[test]
fn store_for_scenario_uses_hidden_dir() {
    let dir = std::env::temp_dir().join("pl_results_for_scenario");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let store = RunStore::for_scenario(&dir.join("heater.yaml")).unwrap();
    assert_eq!(store.root_dir(), dir.join(".piloop").join("runs").as_path());
    assert!(store.root_dir().exists());
}

#[test]
fn corrupt_timeseries_line_is_located() {
    let temp_dir = std::env::temp_dir().join("pl_results_test_corrupt");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();
    store
        .save_run(&manifest(&id(4), "2026-02-25T12:00:00Z"), &[])
        .unwrap();
    std::fs::write(
        temp_dir.join(id(4)).join("timeseries.jsonl"),
        "{\"time_s\":0.0,\"reference\":1.0,\"output\":0.0,\"control\":1.0}\nnot json\n",
    )
    .unwrap();

    assert!(matches!(
        store.load_timeseries(&id(4)),
        Err(ResultsError::BadRecord { line: 2, .. })
    ));
}

#[test]
fn list_skips_directories_without_manifest() {
    let temp_dir = std::env::temp_dir().join("pl_results_test_partial");
    let _ = std::fs::remove_dir_all(&temp_dir);

    let store = RunStore::new(temp_dir.clone()).unwrap();
    std::fs::create_dir_all(temp_dir.join("half_written")).unwrap();
    store
        .save_run(&manifest(&id(5), "2026-02-25T12:00:00Z"), &[])
        .unwrap();

    let runs = store.list_runs().unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].run_id, id(5));
}

#[test]
fn ids_outside_the_digest_format_are_rejected() {
    let base = std::env::temp_dir().join("pl_results_test_escape");
    let _ = std::fs::remove_dir_all(&base);
    let outside = base.join("outside");
    std::fs::create_dir_all(&outside).unwrap();

    let store = RunStore::for_scenario(&base.join("proj").join("heater.yaml")).unwrap();

    for bad in ["../../../outside", "..", "", "ABCDEF", &id(1)[..63], id(1).to_uppercase().as_str()] {
        assert!(!store.has_run(bad));
        assert!(matches!(
            store.delete_run(bad),
            Err(ResultsError::InvalidRunId { .. })
        ));
        assert!(matches!(
            store.load_manifest(bad),
            Err(ResultsError::InvalidRunId { .. })
        ));
        assert!(matches!(
            store.load_timeseries(bad),
            Err(ResultsError::InvalidRunId { .. })
        ));
    }
    assert!(outside.exists());

    let mut forged = manifest("../../../outside", "2026-02-25T12:00:00Z");
    assert!(store.save_run(&forged, &[]).is_err());
    forged.run_id = id(6);
    store.save_run(&forged, &[]).unwrap();
    assert!(store.has_run(&id(6)));
}
