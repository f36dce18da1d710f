// errors.rs
use crate::validation::ValidationFailure;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
  #[error("Error de validación: {0}")]
  Validation(#[from] ValidationFailure),
  #[error("Identificador de socio inválido: {0:?}")]
  InvalidMemberId(String),
  #[error("Estado de membresía desconocido: {0:?}")]
  InvalidStatus(String),
  #[error("Registro mal formado: {0}")]
  MalformedRecord(String),
}
