// Tele Clipper platform paths
// Linux:   $XDG_CONFIG_HOME/teleclipper, $XDG_DATA_HOME/teleclipper
// macOS:   ~/Library/Application Support/TeleClipper (config and data)
// Windows: %APPDATA%/TeleClipper (config and data)

use std::env;
use std::path::PathBuf;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join("teleclipper"),
        _ => {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            fallback
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part))
                .join("teleclipper")
        }
    }
}

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        app_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        roaming_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
}

/// Directory holding the session database.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        app_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        roaming_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
}

#[cfg(target_os = "macos")]
fn app_support_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("TeleClipper")
}

#[cfg(target_os = "windows")]
fn roaming_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("TeleClipper")
}
