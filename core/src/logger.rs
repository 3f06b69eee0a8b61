use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

/// Appends timestamped log lines to a file. Until `set_file_path` runs,
/// logging is a no-op; the application must keep working without a
/// writable data directory.
pub struct FileLogger {
    file_path: Option<PathBuf>,
}

static LOGGER: OnceLock<Arc<Mutex<FileLogger>>> = OnceLock::new();

fn get_logger() -> &'static Arc<Mutex<FileLogger>> {
    LOGGER.get_or_init(|| Arc::new(Mutex::new(FileLogger::new())))
}

impl FileLogger {
    pub fn new() -> Self {
        Self { file_path: None }
    }

    pub fn set_file_path(&mut self, path: PathBuf) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        self.file_path = Some(path);
    }

    pub fn log(&mut self, level: &str, module: &str, message: &str) {
        let Some(path) = &self.file_path else {
            return;
        };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp, level, module, message);
        }
    }
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Point the global logger at `<data_dir>/aitutor.log`.
pub fn init(data_dir: PathBuf) {
    let logger = get_logger();
    let mut logger = logger.lock().unwrap();
    logger.set_file_path(data_dir.join("aitutor.log"));
}

pub fn log(level: &str, module: &str, message: impl Into<String>) {
    let logger = get_logger();
    let mut logger = logger.lock().unwrap();
    logger.log(level, module, &message.into());
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::logger::log("DEBUG", module_path!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::logger::log("INFO", module_path!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::logger::log("WARN", module_path!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::logger::log("ERROR", module_path!(), format!($($arg)*));
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let mut logger = FileLogger::new();
        logger.set_file_path(path.clone());
        logger.log("ERROR", "test_module", "something failed");
        logger.log("INFO", "test_module", "second entry");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[ERROR]"));
        assert!(content.contains("[test_module]"));
        assert!(content.contains("something failed"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_noop_without_file_path() {
        let mut logger = FileLogger::new();
        // Must not panic or create anything
        logger.log("INFO", "test_module", "dropped");
    }
}
