//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una sola vez y expone `AppConfig`.
use std::env;
use std::time::Duration;

use alert_core::Timing;
use once_cell::sync::Lazy;

use crate::errors::AppError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

pub const PROCESSING_MS_VAR: &str = "ALERTFLOW_PROCESSING_MS";
pub const REVEAL_MS_VAR: &str = "ALERTFLOW_REVEAL_MS";
pub const INITIAL_REVEAL_MS_VAR: &str = "ALERTFLOW_INITIAL_REVEAL_MS";
pub const NO_COLOR_VAR: &str = "NO_COLOR";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Retardos de las transiciones.
    pub timing: Timing,
    /// Estilos ANSI en la salida.
    pub color: bool,
    /// Filtro de logs (sintaxis `EnvFilter`).
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { timing: Timing::default(),
               color: true,
               log_filter: DEFAULT_LOG_FILTER.to_string() }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno (previa carga de `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Timing::default();
        let timing = Timing { processing: millis(&lookup, PROCESSING_MS_VAR, defaults.processing)?,
                              reveal: millis(&lookup, REVEAL_MS_VAR, defaults.reveal)?,
                              initial_reveal: millis(&lookup, INITIAL_REVEAL_MS_VAR, defaults.initial_reveal)? };
        // https://no-color.org: cualquier valor no vacío desactiva el color
        let color = lookup(NO_COLOR_VAR).map_or(true, |v| v.is_empty());
        let log_filter = lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty())
                                               .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self { timing, color, log_filter })
    }
}

fn millis<F>(lookup: &F, var: &'static str, default: Duration) -> Result<Duration, AppError>
    where F: Fn(&str) -> Option<String>
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim()
                        .parse::<u64>()
                        .map(Duration::from_millis)
                        .map_err(|_| AppError::Config { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_scripted_pacing() {
        let cfg = AppConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.timing.processing, Duration::from_millis(1000));
        assert_eq!(cfg.timing.reveal, Duration::from_millis(300));
        assert_eq!(cfg.timing.initial_reveal, Duration::from_millis(500));
    }

    #[test]
    fn overrides_and_no_color() {
        let cfg = AppConfig::from_lookup(lookup(&[(PROCESSING_MS_VAR, "10"), (NO_COLOR_VAR, "1"), (LOG_FILTER_VAR, "debug")]))
                           .expect("config");
        assert_eq!(cfg.timing.processing, Duration::from_millis(10));
        assert!(!cfg.color);
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn invalid_number_is_a_config_error() {
        let err = AppConfig::from_lookup(lookup(&[(REVEAL_MS_VAR, "rápido")])).unwrap_err();
        assert_eq!(err.to_string(), "Configuración inválida: ALERTFLOW_REVEAL_MS=rápido");
    }
}
