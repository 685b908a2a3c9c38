//! # envbind demo application
//!
//! A small service-style config loaded from the environment with an optional
//! `.env` fallback. This is **not** a real app; it exists to demonstrate and
//! manually verify envbind's behaviour.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example envbind_demo
//! DEMO_HOST=0.0.0.0 cargo run --example envbind_demo
//! DEMO_HOST=0.0.0.0 DEMO_ENV_FILE=demo.env cargo run --example envbind_demo
//! RUST_LOG=envbind=debug DEMO_HOST=x cargo run --example envbind_demo
//! ```
//!
//! | Feature | How to exercise it |
//! |---------|--------------------|
//! | Defaults | run with only `DEMO_HOST` set |
//! | Fallback file | put `DEMO_PORT=9000` in a file and set `DEMO_ENV_FILE` |
//! | Env beats file | set `DEMO_PORT` in both places |
//! | Required field | unset `DEMO_HOST` |
//! | Bad value | `DEMO_TIMEOUT=soon` |
//! | Template | `DEMO_TEMPLATE=1` prints a `.env` example |

mod config;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use config::{DemoConfig, loader};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let loader = loader(std::env::var_os("DEMO_ENV_FILE").map(Into::into));

    if std::env::var_os("DEMO_TEMPLATE").is_some() {
        print!("{}", loader.template());
        return ExitCode::SUCCESS;
    }

    let mut config = DemoConfig::default();
    match loader.load_with_sources(&mut config) {
        Ok(sources) => {
            println!("{config:#?}");
            println!();
            println!("{sources}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
