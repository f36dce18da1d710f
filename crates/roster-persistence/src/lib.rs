//! Persistencia en archivo plano para el roster de socios.
//! Este crate expone `CsvRecordStore`, la implementación durable de
//! `records::RecordStore`, y la configuración `RosterConfig` leída del
//! entorno.

mod config;
mod csv_store;

pub use config::{ConfigError, RosterConfig, DATA_FILE_VAR, DEFAULT_DATA_FILE, DEFAULT_VISITS_VAR, STARTING_MEMBER_ID_VAR};
pub use csv_store::CsvRecordStore;

/// Crea el almacén y la configuración desde las variables de entorno (o
/// `.env`).
pub fn new_from_env() -> Result<(CsvRecordStore, RosterConfig), ConfigError> {
  let config = RosterConfig::from_env()?;
  log::debug!("roster: archivo de datos {}", config.data_file.display());
  Ok((CsvRecordStore::new(config.data_file.clone()), config))
}
