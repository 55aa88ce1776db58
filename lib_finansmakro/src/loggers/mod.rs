//! Console and file logging for the dashboard binaries, with pruning of
//! stale log files on startup.

use anyhow::Result;
use std::fs;
use std::path::Path;

/// How many historic log files to keep next to the active one.
const KEEP_LOGS: usize = 3;

/// Initializes logging to stdout and a timestamped file in `log_dir`.
///
/// Unknown level strings fall back to `info`. Old log files beyond
/// [`KEEP_LOGS`] are removed before the new file is opened.
pub fn setup_logging(log_dir: &Path, log_level: &str) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)?;
    }

    prune_old_logs(log_dir)?;

    let file_name = format!(
        "finansmakro_{}.log",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let log_path = log_dir.join(file_name);

    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_path)?)
        .apply()?;

    Ok(())
}

/// Deletes all but the newest [`KEEP_LOGS`] log files in the directory.
fn prune_old_logs(log_dir: &Path) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(log_dir)?
        .filter_map(|res| res.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
        .collect();

    entries.sort_by_key(|e| {
        std::cmp::Reverse(
            e.metadata()
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH),
        )
    });

    for entry in entries.iter().skip(KEEP_LOGS) {
        if let Err(e) = fs::remove_file(entry.path()) {
            eprintln!("Failed to delete old log file {:?}: {}", entry.path(), e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_keeps_the_newest_files() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..6 {
            let path = dir.path().join(format!("finansmakro_{}.log", i));
            fs::write(&path, "x").unwrap();
        }
        // A non-log file must survive pruning.
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        prune_old_logs(dir.path()).unwrap();

        let remaining: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
            .collect();
        assert_eq!(remaining.len(), KEEP_LOGS);
        assert!(dir.path().join("notes.txt").exists());
    }
}
