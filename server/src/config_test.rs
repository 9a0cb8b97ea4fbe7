use super::*;

#[test]
fn parse_port_defaults_when_unset() {
    assert_eq!(parse_port(None).unwrap(), DEFAULT_PORT);
}

#[test]
fn parse_port_accepts_number_with_whitespace() {
    assert_eq!(parse_port(Some(" 8080 ")).unwrap(), 8080);
}

#[test]
fn parse_port_rejects_garbage_and_overflow() {
    assert!(matches!(parse_port(Some("http")), Err(ConfigError::InvalidPort(v)) if v == "http"));
    assert!(parse_port(Some("70000")).is_err());
}

#[test]
fn bind_addr_joins_host_and_port() {
    let config = ServerConfig { host: "127.0.0.1".into(), port: 4000 };
    assert_eq!(config.bind_addr(), "127.0.0.1:4000");
}
