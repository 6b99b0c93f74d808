//! mrkdwn - render chat mrkdwn as tagged terminal text.
//!
//! # Usage
//!
//! ```bash
//! mrkdwn message.txt
//! echo '*hi* <@U1|alice> :wave:' | mrkdwn
//! mrkdwn --directory people.json --syntax-theme InspiredGitHub message.txt
//! ```

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use mrkdwn_term::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use mrkdwn_term::directory::Directory;
use mrkdwn_term::highlight::{self, DEFAULT_THEME};
use mrkdwn_term::style::Styles;
use mrkdwn_term::{emoji, mrkdwn, perf};

/// Render chat mrkdwn as tagged terminal text
#[derive(Parser, Debug)]
#[command(name = "mrkdwn", version, about, long_about = None)]
struct Cli {
    /// Message file to render (stdin when absent or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Resolve mentions and escape, without any markup styling
    #[arg(long)]
    plain: bool,

    /// Syntax highlighting theme for code fences
    #[arg(long, value_name = "NAME")]
    syntax_theme: Option<String>,

    /// JSON file with `users` and `channels` id-to-name maps
    #[arg(long, value_name = "PATH")]
    directory: Option<PathBuf>,

    /// JSON file mapping style roles to `fg:bg:attrs` specs
    #[arg(long, value_name = "PATH")]
    styles: Option<PathBuf>,

    /// Print every emoji shortcode and exit
    #[arg(long)]
    list_emoji: bool,

    /// Print the bundled syntax themes and exit
    #[arg(long)]
    list_themes: bool,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Initialize logging; stdout carries the rendered text.
    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if effective.perf {
        filter = filter.add_directive("perf=info".parse().context("perf log directive")?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    perf::set_enabled(effective.perf);

    let mut stdout = io::stdout().lock();

    if cli.list_emoji {
        for (name, glyph) in emoji::all() {
            writeln!(stdout, ":{name}: {glyph}")?;
        }
        return Ok(());
    }
    if cli.list_themes {
        for name in highlight::theme_names() {
            writeln!(stdout, "{name}")?;
        }
        return Ok(());
    }

    let styles = match &effective.styles {
        Some(path) => Styles::load(path)?,
        None => Styles::default(),
    };
    let directory = match &effective.directory {
        Some(path) => Directory::load(path)?,
        None => Directory::default(),
    };
    let syntax_theme = effective.syntax_theme.as_deref().unwrap_or(DEFAULT_THEME);

    let input = read_input(cli.file.as_deref())?;
    let rendered = {
        let _scope = perf::scope("main.render");
        mrkdwn::render(
            &input,
            &directory.users,
            &directory.channels,
            !effective.plain,
            syntax_theme,
            &styles,
        )
    };

    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush().context("Failed to write output")
}
