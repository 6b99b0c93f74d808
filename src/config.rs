//! Saved command-line defaults.
//!
//! A config file holds whitespace separated flag tokens, as they would be
//! typed on the command line. A flag's value takes every following word up to
//! the next `--` flag on the same line, so theme names with spaces
//! (`--syntax-theme Solarized (dark)`) survive a save and load.
//! Blank lines and `#` comments are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "mrkdwn";
const LOCAL_FILE: &str = ".mrkdwnrc";

/// Flags that take a value.
const VALUE_FLAGS: [&str; 3] = ["--syntax-theme", "--directory", "--styles"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub plain: bool,
    pub perf: bool,
    pub syntax_theme: Option<String>,
    pub directory: Option<PathBuf>,
    pub styles: Option<PathBuf>,
}

impl ConfigFlags {
    /// Booleans are OR'd; options from `other` win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            plain: self.plain || other.plain,
            perf: self.perf || other.perf,
            syntax_theme: other
                .syntax_theme
                .clone()
                .or_else(|| self.syntax_theme.clone()),
            directory: other.directory.clone().or_else(|| self.directory.clone()),
            styles: other.styles.clone().or_else(|| self.styles.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read saved flags. A missing file means no saved flags.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a line into flag tokens. Words after a value flag are joined into
/// one value until the next `--` word.
fn line_tokens(line: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut awaiting_value = false;
    let mut extending_value = false;
    for word in line.split_whitespace() {
        if word.starts_with("--") {
            awaiting_value = VALUE_FLAGS.contains(&word);
            extending_value = word.contains('=');
            tokens.push(word.to_string());
        } else if awaiting_value {
            awaiting_value = false;
            extending_value = true;
            tokens.push(word.to_string());
        } else if extending_value
            && let Some(value) = tokens.last_mut()
        {
            value.push(' ');
            value.push_str(word);
        } else {
            tokens.push(word.to_string());
        }
    }
    tokens
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# mrkdwn defaults (saved with --save)".to_string());
    if flags.plain {
        lines.push("--plain".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(theme) = &flags.syntax_theme {
        lines.push(format!("--syntax-theme {theme}"));
    }
    if let Some(path) = &flags.directory {
        lines.push(format!("--directory {}", path.display()));
    }
    if let Some(path) = &flags.styles {
        lines.push(format!("--styles {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the saved-flag subset out of command-line style tokens.
///
/// Unknown tokens (the program name, the input file, `--save`) are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--plain" => flags.plain = true,
            "--perf" => flags.perf = true,
            "--syntax-theme" | "--directory" | "--styles" => {
                if let Some(next) = tokens.get(i + 1) {
                    set_value(&mut flags, token, next);
                    i += 1;
                }
            }
            _ => {
                if let Some((flag, value)) = token.split_once('=') {
                    set_value(&mut flags, flag, value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn set_value(flags: &mut ConfigFlags, flag: &str, value: &str) {
    match flag {
        "--syntax-theme" => flags.syntax_theme = Some(value.to_string()),
        "--directory" => flags.directory = Some(PathBuf::from(value)),
        "--styles" => flags.styles = Some(PathBuf::from(value)),
        _ => {}
    }
}
