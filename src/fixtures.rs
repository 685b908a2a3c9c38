#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::field::Field;

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct TestConfig {
        pub host: String,
        pub port: i32,
        pub debug: bool,
        pub timeout: Duration,
        pub hosts: Vec<String>,
        pub token: Option<String>,
    }

    /// The usual field set: a required host, defaults for the rest, an
    /// optional token.
    pub fn test_fields() -> Vec<Field<TestConfig>> {
        vec![
            Field::new("HOST", |c: &mut TestConfig, v: String| c.host = v)
                .required()
                .doc("The application host."),
            Field::new("PORT", |c: &mut TestConfig, v: i32| c.port = v)
                .default("8080")
                .doc("The port number."),
            Field::new("DEBUG", |c: &mut TestConfig, v: bool| c.debug = v).default("false"),
            Field::new("TIMEOUT", |c: &mut TestConfig, v: Duration| c.timeout = v)
                .default("5s"),
            Field::new("HOSTS", |c: &mut TestConfig, v: Vec<String>| c.hosts = v)
                .default("a.com,b.com"),
            Field::new("TOKEN", |c: &mut TestConfig, v: Option<String>| c.token = v),
        ]
    }

    /// `(name, value)` pairs for a synthetic environment.
    pub fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // -- Fixture for explicit-kind descriptors ----------------------------------

    #[derive(Debug, Default, PartialEq)]
    pub struct RawConfig {
        pub retries: i64,
        pub label: Option<String>,
    }

    #[test]
    fn test_fields_are_declared_in_order() {
        let keys: Vec<_> = test_fields().iter().map(|f| f.key().to_string()).collect();
        assert_eq!(keys, ["HOST", "PORT", "DEBUG", "TIMEOUT", "HOSTS", "TOKEN"]);
    }
}
