use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use check::check;
use error::{ConfigError, Result};
use file::{StartTime, TextPolicy};
use record::ConfigurationRecord;

mod check;
mod error;
mod file;
mod image;
mod record;
mod text;

#[derive(Debug, Clone, clap::Parser)]
#[command(about = "Edit, check and pack the clock's configuration record")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum Command {
    /// Write a config file holding the factory defaults.
    Init {
        path: PathBuf,
        #[arg(long)]
        force: bool,
    },
    /// Print the record a config file loads to.
    Show {
        path: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        text_policy: TextPolicy,
        /// Print the Wi-Fi key instead of masking it.
        #[arg(long)]
        reveal: bool,
    },
    /// Report suspicious values; exits with 1 if there are any.
    Check {
        path: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        text_policy: TextPolicy,
    },
    /// Encode a config file into the device image.
    Pack {
        path: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t)]
        text_policy: TextPolicy,
    },
    /// Decode a device image back into a config file.
    Unpack {
        image: PathBuf,
        /// Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("🛑 {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Init { path, force } => {
            if path.exists() && !force {
                return Err(ConfigError::AlreadyExists(path));
            }
            fs::write(&path, file::default_document()?).map_err(|e| ConfigError::io(&path, e))?;
            info!(path = %path.display(), "wrote defaults");
        }
        Command::Show {
            path,
            text_policy,
            reveal,
        } => {
            let record = file::load(&path, text_policy)?;
            print!("{}", describe(&record, reveal));
        }
        Command::Check { path, text_policy } => {
            let record = file::load(&path, text_policy)?;
            let issues = check(&record);
            if issues.is_empty() {
                println!("✅ no issues");
                return Ok(ExitCode::SUCCESS);
            }

            for issue in &issues {
                println!("⚠️ {issue}");
            }
            return Ok(ExitCode::FAILURE);
        }
        Command::Pack {
            path,
            output,
            text_policy,
        } => {
            let record = file::load(&path, text_policy)?;
            for issue in check(&record) {
                tracing::warn!(%issue, "packing anyway");
            }
            image::write(&output, &record)?;
            info!(output = %output.display(), "packed {} bytes", image::IMAGE_LEN);
        }
        Command::Unpack { image, output } => {
            let record = image::read(&image)?;
            match output {
                Some(path) => file::save(&path, &record)?,
                None => print!("{}", file::to_string(&record)?),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn describe(record: &ConfigurationRecord, reveal: bool) -> String {
    let start = |minutes: u16| match StartTime::from_minutes(minutes) {
        StartTime::Clock(clock) => format!("{clock} ({minutes} min)"),
        StartTime::Minutes(_) => format!("{minutes} min"),
    };
    let key = if reveal {
        record.wifi_key.to_string()
    } else {
        "*".repeat(record.wifi_key.len())
    };

    format!(
        "night mode: {} brightness {}\n\
         day mode:   {} brightness {}\n\
         wifi ssid:  {:?}\n\
         wifi key:   {:?}\n\
         ntp server: {:?} every {} s\n",
        start(record.night_mode_start),
        record.night_mode_bright,
        start(record.day_mode_start),
        record.day_mode_bright,
        record.wifi_ssid.as_str(),
        key,
        record.ntp_server.as_str(),
        record.ntp_interval,
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    fn record() -> ConfigurationRecord {
        file::parse(
            "[wifi]\nssid = \"home\"\nkey = \"hunter2\"\n",
            TextPolicy::Reject,
        )
        .unwrap()
    }

    #[test]
    fn describe_masks_key() {
        let text = describe(&record(), false);
        assert!(text.contains("night mode: 22:00 (1320 min) brightness 16"));
        assert!(text.contains("\"*******\""));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn describe_reveals_key_on_request() {
        assert!(describe(&record(), true).contains("\"hunter2\""));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.toml");
        fs::write(&path, "keep me").unwrap();

        let err = run(Command::Init {
            path: path.clone(),
            force: false,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");

        run(Command::Init {
            path: path.clone(),
            force: true,
        })
        .unwrap();
        assert_eq!(
            file::load(&path, TextPolicy::Reject).unwrap(),
            file::parse("", TextPolicy::Reject).unwrap()
        );
    }

    #[test]
    fn pack_then_unpack() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("clock.toml");
        let packed = dir.path().join("clock.bin");
        let unpacked = dir.path().join("unpacked.toml");
        file::save(&config, &record()).unwrap();

        run(Command::Pack {
            path: config,
            output: packed.clone(),
            text_policy: TextPolicy::Reject,
        })
        .unwrap();
        run(Command::Unpack {
            image: packed,
            output: Some(unpacked.clone()),
        })
        .unwrap();

        assert_eq!(
            file::load(&unpacked, TextPolicy::Reject).unwrap(),
            record()
        );
    }

    #[test]
    fn cli_parses_policy() {
        let cli = Cli::try_parse_from(["clock-config", "show", "a.toml", "--text-policy", "truncate"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Show {
                text_policy: TextPolicy::Truncate,
                reveal: false,
                ..
            }
        ));
    }
}
