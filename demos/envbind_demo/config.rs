use std::path::PathBuf;
use std::time::Duration;

use envbind::{Envbind, EnvbindBuilder, Field};

#[derive(Debug, Default)]
pub struct DemoConfig {
    pub host: String,
    pub port: i32,
    pub debug: bool,
    pub timeout: Duration,
    pub allowed_origins: Vec<String>,
    pub api_token: Option<String>,
}

pub fn loader(env_file: Option<PathBuf>) -> EnvbindBuilder<DemoConfig> {
    let builder = Envbind::builder()
        .field(
            Field::new("DEMO_HOST", |c: &mut DemoConfig, v: String| c.host = v)
                .required()
                .doc("Interface to bind."),
        )
        .field(
            Field::new("DEMO_PORT", |c: &mut DemoConfig, v: i32| c.port = v)
                .default("8080")
                .doc("Listen port."),
        )
        .field(Field::new("DEMO_DEBUG", |c: &mut DemoConfig, v: bool| c.debug = v).default("false"))
        .field(
            Field::new("DEMO_TIMEOUT", |c: &mut DemoConfig, v: Duration| c.timeout = v)
                .default("30s")
                .doc("Request timeout, e.g. 500ms or 1m30s."),
        )
        .field(
            Field::new("DEMO_ALLOWED_ORIGINS", |c: &mut DemoConfig, v: Vec<String>| {
                c.allowed_origins = v
            })
            .default("http://localhost:3000"),
        )
        .field(
            Field::new("DEMO_API_TOKEN", |c: &mut DemoConfig, v: Option<String>| {
                c.api_token = v
            })
            .doc("Optional upstream token."),
        );

    match env_file {
        Some(path) => builder.fallback_path(path),
        None => builder,
    }
}
