// SPDX-License-Identifier: MIT

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

fn not_found(what: &str) -> io::Error {
    io::Error::new(ErrorKind::NotFound, format!("Can't detect {what} folder"))
}

pub fn state_folder(app_name: &str) -> io::Result<PathBuf> {
    let p = if cfg!(target_os = "macos") {
        dirs::home_dir().ok_or_else(|| not_found("home"))?.join("Library/Logs")
    } else {
        dirs::state_dir().ok_or_else(|| not_found("state"))?
    }
    .join(app_name);
    create_dir(&p)?;
    Ok(p)
}

pub fn log_folder(app_name: &str) -> io::Result<PathBuf> {
    state_folder(app_name)
}

pub fn config_folder(app_name: &str) -> io::Result<PathBuf> {
    let p = dirs::config_dir().ok_or_else(|| not_found("config"))?.join(app_name);
    create_dir(&p)?;
    Ok(p)
}

pub fn create_dir(p: &Path) -> io::Result<()> {
    if let Err(e) = std::fs::create_dir_all(p)
        && e.kind() != ErrorKind::AlreadyExists
    {
        return Err(e);
    }

    Ok(())
}
