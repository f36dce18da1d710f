// Archivo: errors.rs
// Propósito: definir los errores del almacén de registros y el alias
// Result<T> usado por las APIs del crate.
use thiserror::Error;

/// Errores comunes del almacén de registros delimitados.
///
/// - `Io`: el medio subyacente no se pudo leer o escribir.
/// - `Encoding`: un campo no se puede representar en una fila delimitada.
/// - `Storage`: fallo interno del almacén (por ejemplo un mutex envenenado).
#[derive(Error, Debug)]
pub enum StoreError {
  /// Error de lectura/escritura sobre el archivo del almacén.
  #[error("Error de E/S en {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
  /// El campo contiene el delimitador o un salto de línea.
  #[error("Campo no codificable: {0:?}")]
  Encoding(String),
  /// Error genérico de almacenamiento.
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
}

impl StoreError {
  /// Construye un `StoreError::Io` asociando la ruta afectada.
  pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, StoreError>;
