//! Restart coalescing across a configuration pass.

use fpm_pools::{ConfigRenderer, RestartAction, Restartable};

mod common;
use common::{gateway, site, RecordingService, KIND};

#[test]
fn test_three_schedules_one_action() {
    let dir = tempfile::tempdir().unwrap();
    let service = RecordingService::running();
    let gw = gateway(dir.path(), service.clone());

    gw.apply_configuration();
    gw.apply_configuration();
    gw.apply_configuration();

    assert_eq!(gw.restarts().apply().unwrap(), Some(RestartAction::Restarted));
    assert_eq!(service.actions(), vec!["restart"]);
}

#[test]
fn test_apply_without_schedule_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let service = RecordingService::stopped();
    let gw = gateway(dir.path(), service.clone());

    assert_eq!(gw.restarts().apply().unwrap(), None);
    assert!(service.actions().is_empty());
}

#[test]
fn test_pass_over_many_sites_starts_stopped_service_once() {
    let dir = tempfile::tempdir().unwrap();
    let service = RecordingService::stopped();
    let gw = gateway(dir.path(), service.clone());

    let websites: Vec<_> = (0..5)
        .map(|i| site(&format!("site{i}"), true, &format!("pool{i}"), KIND))
        .collect();
    let report = gw.create_configuration(&websites).unwrap();
    assert_eq!(report.pools_written, 5);

    for _ in 0..report.pools_written {
        gw.apply_configuration();
    }
    assert_eq!(gw.restarts().apply().unwrap(), Some(RestartAction::Started));
    assert_eq!(gw.restarts().apply().unwrap(), None);
    assert_eq!(service.actions(), vec!["start"]);

    // A later pass restarts the now-running service.
    gw.apply_configuration();
    assert_eq!(gw.restarts().apply().unwrap(), Some(RestartAction::Restarted));
    assert_eq!(service.actions(), vec!["start", "restart"]);
}

#[test]
fn test_gateway_health_check_reports_service_state() {
    let dir = tempfile::tempdir().unwrap();
    let service = RecordingService::stopped();
    let gw = gateway(dir.path(), service.clone());

    let checks = gw.checks();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].title(), "php7.1-fpm service");
    assert!(!checks[0].check().unwrap());

    gw.apply_configuration();
    gw.restarts().apply().unwrap();
    assert!(checks[0].check().unwrap());
}
