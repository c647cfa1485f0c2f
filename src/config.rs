use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::{DEFAULT_STABLE_FRAMES, DEFAULT_THRESHOLD};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub camera: CameraDefaults,
    pub session: SessionConfig,
    pub worker: WorkerConfig,
}

/// 新会话未显式提供设置时使用的相机默认值
#[derive(Debug, Clone)]
pub struct CameraDefaults {
    pub threshold: u8,
    pub stable_frames: u32,
    pub language: String,
    pub auto_shutter: bool,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 空闲超过该秒数的会话由后台 worker 回收
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub is_leader: bool,
    pub enable_store_flush: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/pose-coach.sled"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            camera: CameraDefaults {
                threshold: env_or_parse("CAMERA_THRESHOLD", DEFAULT_THRESHOLD),
                stable_frames: env_or_parse("CAMERA_STABLE_FRAMES", DEFAULT_STABLE_FRAMES),
                language: env_or("CAMERA_LANGUAGE", "zh"),
                auto_shutter: env_or_bool("CAMERA_AUTO_SHUTTER", true),
            },
            session: SessionConfig {
                idle_timeout_secs: env_or_parse("SESSION_IDLE_TIMEOUT_SECS", 300_u64),
            },
            worker: WorkerConfig {
                is_leader: env_or_bool("WORKER_LEADER", true),
                enable_store_flush: env_or_bool("ENABLE_STORE_FLUSH_WORKER", true),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "HOST",
            "PORT",
            "RUST_LOG",
            "CAMERA_THRESHOLD",
            "CAMERA_STABLE_FRAMES",
            "CAMERA_LANGUAGE",
            "CAMERA_AUTO_SHUTTER",
            "SESSION_IDLE_TIMEOUT_SECS",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.camera.threshold, 80);
        assert_eq!(cfg.camera.stable_frames, 10);
        assert_eq!(cfg.camera.language, "zh");
        assert!(cfg.camera.auto_shutter);
    }

    #[test]
    fn parses_numeric_values() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "4000");
        env::set_var("CAMERA_THRESHOLD", "90");
        env::set_var("SESSION_IDLE_TIMEOUT_SECS", "42");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.camera.threshold, 90);
        assert_eq!(cfg.session.idle_timeout_secs, 42);
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "bad");
        env::set_var("CAMERA_STABLE_FRAMES", "x");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.camera.stable_frames, 10);
    }

    #[test]
    fn bool_flags_accept_common_spellings() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("CAMERA_AUTO_SHUTTER", "off");
        let cfg = Config::from_env();
        assert!(!cfg.camera.auto_shutter);

        env::set_var("CAMERA_AUTO_SHUTTER", "YES");
        let cfg = Config::from_env();
        assert!(cfg.camera.auto_shutter);
    }
}
