// Archivo: config.rs
// Propósito: configuración del roster leída desde variables de entorno
// (con soporte de `.env` vía dotenvy).
use std::path::PathBuf;
use thiserror::Error;

pub const DATA_FILE_VAR: &str = "ROSTER_DATA_FILE";
pub const STARTING_MEMBER_ID_VAR: &str = "ROSTER_STARTING_MEMBER_ID";
pub const DEFAULT_VISITS_VAR: &str = "ROSTER_DEFAULT_VISITS";

pub const DEFAULT_DATA_FILE: &str = "member_data.csv";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Valor inválido para {name}: {value:?}")]
  InvalidNumber { name: &'static str, value: String },
}

/// Parámetros del roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
  /// Ruta del archivo CSV de socios.
  pub data_file: PathBuf,
  /// Último id que se considera emitido cuando el almacén está vacío.
  pub starting_member_id: u32,
  /// Visitas con las que empieza cada alta.
  pub default_visit_count: u32,
}

impl Default for RosterConfig {
  fn default() -> Self {
    Self { data_file: PathBuf::from(DEFAULT_DATA_FILE),
           starting_member_id: 0,
           default_visit_count: 0 }
  }
}

impl RosterConfig {
  /// Lee la configuración del entorno, cargando antes `.env` si existe.
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Construye la configuración con una función de búsqueda arbitraria.
  /// Las variables ausentes toman el valor por defecto.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where F: Fn(&str) -> Option<String>
  {
    let defaults = Self::default();
    let data_file = lookup(DATA_FILE_VAR).filter(|v| !v.trim().is_empty())
                                         .map(PathBuf::from)
                                         .unwrap_or(defaults.data_file);
    let starting_member_id = parse_number(&lookup, STARTING_MEMBER_ID_VAR)?.unwrap_or(defaults.starting_member_id);
    let default_visit_count = parse_number(&lookup, DEFAULT_VISITS_VAR)?.unwrap_or(defaults.default_visit_count);
    Ok(Self { data_file,
              starting_member_id,
              default_visit_count })
  }
}

fn parse_number<F>(lookup: &F, name: &'static str) -> Result<Option<u32>, ConfigError>
  where F: Fn(&str) -> Option<String>
{
  match lookup(name) {
    None => Ok(None),
    Some(raw) => raw.trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key: &str| map.get(key).cloned()
  }

  #[test]
  fn missing_variables_use_defaults() {
    let cfg = RosterConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, RosterConfig::default());
  }

  #[test]
  fn reads_all_variables() {
    let cfg = RosterConfig::from_lookup(lookup_from(&[(DATA_FILE_VAR, "/tmp/club.csv"),
                                                      (STARTING_MEMBER_ID_VAR, "1000"),
                                                      (DEFAULT_VISITS_VAR, " 1 ")])).unwrap();
    assert_eq!(cfg.data_file, PathBuf::from("/tmp/club.csv"));
    assert_eq!(cfg.starting_member_id, 1000);
    assert_eq!(cfg.default_visit_count, 1);
  }

  #[test]
  fn malformed_number_is_an_error() {
    let err = RosterConfig::from_lookup(lookup_from(&[(DEFAULT_VISITS_VAR, "many")])).unwrap_err();
    assert_eq!(err,
               ConfigError::InvalidNumber { name: DEFAULT_VISITS_VAR,
                                            value: "many".into() });
  }
}
