use roster_domain::{DomainError, MemberId, ValidationFailure};
use thiserror::Error;

// Errores comunes de las operaciones sobre el roster.
//
// Centraliza los errores del almacén (`StoreError`), del dominio
// (`DomainError`) y los propios de los flujos de alta y actualización.
// Las situaciones de negocio esperadas (móvil duplicado, membresía ya
// cancelada) no son errores: se devuelven como resultados.
#[derive(Error, Debug)]
pub enum WorkflowError {
  /// Errores originados por el almacén de registros.
  #[error("Error de almacenamiento: {0}")]
  Store(#[from] records::StoreError),

  /// Errores de dominio: datos mal formados, validaciones, ids inválidos.
  #[error("Error de dominio: {0}")]
  Domain(#[from] DomainError),

  /// El almacén no existe o tiene longitud cero.
  #[error("El archivo de socios no existe o está vacío")]
  EmptyStore,

  /// Ninguna fila tiene el identificador pedido.
  #[error("Socio no encontrado: {0}")]
  NotFound(MemberId),

  /// El contador superó el ancho fijo de ocho dígitos.
  #[error("No quedan identificadores de socio disponibles")]
  IdSpaceExhausted,
}

impl From<ValidationFailure> for WorkflowError {
  fn from(e: ValidationFailure) -> Self {
    Self::Domain(DomainError::Validation(e))
  }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, WorkflowError>;
