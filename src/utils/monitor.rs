#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage_elapsed: Duration,
    pub total_elapsed: Duration,
    pub memory_usage_mb: u64,
}

/// 記錄每個處理階段的耗時與記憶體用量
#[cfg(feature = "cli")]
pub struct StageMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    last_mark: Mutex<Instant>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid()
                .map_err(|e| tracing::warn!("Stage monitoring has no PID, memory disabled: {}", e))
                .ok()
        } else {
            None
        };

        let now = Instant::now();
        Self {
            system: Mutex::new(System::new_with_specifics(RefreshKind::nothing())),
            pid,
            start_time: now,
            last_mark: Mutex::new(now),
            enabled,
        }
    }

    /// 結束一個階段並回傳統計；未啟用時回傳 None
    pub fn mark(&self, stage: &str) -> Option<StageStats> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let stage_elapsed = {
            let mut last = self.last_mark.lock().ok()?;
            let elapsed = now.duration_since(*last);
            *last = now;
            elapsed
        };

        let memory_usage_mb = self
            .pid
            .and_then(|pid| {
                let mut system = self.system.lock().ok()?;
                system.refresh_all();
                system.process(pid).map(|process| process.memory() / 1024 / 1024)
            })
            .unwrap_or(0);

        let stats = StageStats {
            stage_elapsed,
            total_elapsed: now.duration_since(self.start_time),
            memory_usage_mb,
        };

        tracing::info!(
            "📊 {} - took {:?}, Memory: {}MB, Elapsed: {:?}",
            stage,
            stats.stage_elapsed,
            stats.memory_usage_mb,
            stats.total_elapsed
        );
        Some(stats)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境的空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct StageMonitor;

#[cfg(not(feature = "cli"))]
impl StageMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn mark(&self, _stage: &str) -> Option<()> {
        None
    }

    pub fn is_enabled(&self) -> bool {
        false
    }
}
