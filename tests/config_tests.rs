/// Configuration tests that touch the process environment.
///
/// Everything that sets `INFERENCIA_*` variables lives in one test so the
/// mutations never race with each other.
use inferencia::api::types::Tamanho;
use inferencia::config::{self, ConsoleConfig};

#[test]
fn env_overrides_win_over_files() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(
        &file,
        "[api]\nbase_url = \"http://arquivo/api\"\ntimeout_ms = 100\n\n[logging]\nenabled = true\n",
    )
    .unwrap();

    // SAFETY: no other test in this binary reads or writes these variables.
    unsafe {
        std::env::set_var("INFERENCIA_API_URL", "http://env/api");
        std::env::set_var("INFERENCIA_TIMEOUT_MS", "2500");
        std::env::set_var("INFERENCIA_WEB_ADDR", "0.0.0.0:9999");
        std::env::set_var("INFERENCIA_LOG", "off");
        std::env::set_var("INFERENCIA_TAMANHO", "longo");
    }

    let config = config::load_from(&[Some(file.clone())]);
    assert_eq!(config.api.base_url, "http://env/api");
    assert_eq!(config.api.timeout_ms, 2500);
    assert_eq!(config.web.addr, "0.0.0.0:9999");
    assert!(!config.logging.enabled);
    assert_eq!(config.form.tamanho_texto, Tamanho::Longo);
    assert_eq!(config.form.tamanho_resumo, Tamanho::Longo);

    // Unparseable or empty values are ignored.
    unsafe {
        std::env::set_var("INFERENCIA_API_URL", "");
        std::env::set_var("INFERENCIA_TIMEOUT_MS", "logo");
        std::env::set_var("INFERENCIA_TAMANHO", "enorme");
        std::env::remove_var("INFERENCIA_WEB_ADDR");
        std::env::remove_var("INFERENCIA_LOG");
    }

    let config = config::load_from(&[Some(file)]);
    assert_eq!(config.api.base_url, "http://arquivo/api");
    assert_eq!(config.api.timeout_ms, 100);
    assert_eq!(config.web.addr, ConsoleConfig::default().web.addr);
    assert!(config.logging.enabled);
    assert_eq!(config.form.tamanho_texto, Tamanho::Medio);

    unsafe {
        std::env::remove_var("INFERENCIA_API_URL");
        std::env::remove_var("INFERENCIA_TIMEOUT_MS");
        std::env::remove_var("INFERENCIA_TAMANHO");
    }
}
