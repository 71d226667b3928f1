// Shell scripts that stand in for the ffmpeg binary

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

// Writing an executable while another test thread forks can leave the file
// busy (ETXTBSY); every test that writes or runs a fake binary holds this.
static PROCESS_LOCK: Mutex<()> = Mutex::new(());

pub fn lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Write `body` as an executable `/bin/sh` script named `name` in `dir`
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Script that logs its argv to `calls.log`, then runs `tail`
#[cfg(unix)]
pub fn logging_script(dir: &Path, name: &str, tail: &str) -> PathBuf {
    let log = dir.join("calls.log");
    let body = format!(
        "echo \"$@\" >> '{}'\nfor last; do :; done\n{}",
        log.display(),
        tail
    );
    write_script(dir, name, &body)
}

pub fn read_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}
