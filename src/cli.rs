use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::ServerConfig;
use commands::serve;

#[derive(Parser)]
#[command(name = "expense_forecast")]
#[command(about = "Expense forecast service: projects monthly expenses and savings from a CSV history")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Directory with the built frontend (index.html, wasm bundle)
        ///
        /// When set, files from this directory are served for every path that
        /// is not an API route.
        #[arg(short, long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,

        /// Maximum accepted request body size in bytes
        #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = crate::config::DEFAULT_MAX_UPLOAD_BYTES)]
        max_upload_bytes: usize,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                static_dir,
                max_upload_bytes,
            } => {
                let config = ServerConfig {
                    bind_address,
                    static_dir,
                    max_upload_bytes,
                };
                serve(config).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["expense_forecast", "serve"]).unwrap();
        let Commands::Serve {
            bind_address,
            static_dir,
            max_upload_bytes,
        } = cli.command;

        // Environment variables may override defaults on a developer machine.
        if std::env::var("BIND_ADDRESS").is_err() {
            assert_eq!(bind_address, "0.0.0.0:3000");
        }
        if std::env::var("STATIC_DIR").is_err() {
            assert_eq!(static_dir, None);
        }
        if std::env::var("MAX_UPLOAD_BYTES").is_err() {
            assert_eq!(max_upload_bytes, 16 * 1024 * 1024);
        }
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "expense_forecast",
            "serve",
            "--bind-address",
            "127.0.0.1:8080",
            "--static-dir",
            "dist",
            "--max-upload-bytes",
            "1024",
        ])
        .unwrap();
        let Commands::Serve {
            bind_address,
            static_dir,
            max_upload_bytes,
        } = cli.command;

        assert_eq!(bind_address, "127.0.0.1:8080");
        assert_eq!(static_dir, Some(PathBuf::from("dist")));
        assert_eq!(max_upload_bytes, 1024);
    }
}
