//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use fpm_pools::config::{BackendDescriptor, FpmConfig, WebsiteDescriptor};
use fpm_pools::{FpmGateway, ManagedService, RestartCoalescer, Result};

pub const KIND: &str = "php7.1-fcgi";

/// A service that records the actions issued against it.
#[derive(Default)]
pub struct RecordingService {
    pub running: AtomicBool,
    pub actions: Mutex<Vec<&'static str>>,
}

impl RecordingService {
    pub fn running() -> Arc<Self> {
        let service = Self::default();
        service.running.store(true, Ordering::SeqCst);
        Arc::new(service)
    }

    pub fn stopped() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn actions(&self) -> Vec<&'static str> {
        self.actions.lock().unwrap().clone()
    }
}

impl ManagedService for RecordingService {
    fn name(&self) -> &str {
        "php7.1-fpm"
    }

    fn running(&self) -> Result<bool> {
        Ok(self.running.load(Ordering::SeqCst))
    }

    fn start(&self) -> Result<()> {
        self.actions.lock().unwrap().push("start");
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn restart(&self) -> Result<()> {
        self.actions.lock().unwrap().push("restart");
        Ok(())
    }
}

/// A gateway writing into `config_path`, wired to `service`.
pub fn gateway(config_path: &std::path::Path, service: Arc<RecordingService>) -> FpmGateway {
    let fpm = FpmConfig {
        config_path: config_path.display().to_string(),
        socket_namespace: "it".into(),
        ..FpmConfig::default()
    };
    let restarts = Arc::new(RestartCoalescer::new(service.clone()));
    FpmGateway::new(fpm, service, restarts)
}

/// A website with a single location bound to a `kind` backend named `id`.
pub fn site(name: &str, enabled: bool, id: &str, kind: &str) -> WebsiteDescriptor {
    WebsiteDescriptor::new(name, enabled).with_location("/", BackendDescriptor::new(id, kind))
}

/// Sorted file names in `dir`.
#[allow(dead_code)]
pub fn files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
