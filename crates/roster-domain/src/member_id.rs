// member_id.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ancho fijo (en dígitos) del identificador de socio.
pub const MEMBER_ID_WIDTH: usize = 8;

/// Mayor valor representable con `MEMBER_ID_WIDTH` dígitos.
pub const MAX_MEMBER_ID: u32 = 99_999_999;

/// Identificador de socio: entero no negativo que se muestra siempre con
/// ocho dígitos y ceros a la izquierda (`00000042`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MemberId(u32);

impl MemberId {
  pub fn new(value: u32) -> Result<Self, DomainError> {
    if value > MAX_MEMBER_ID {
      return Err(DomainError::InvalidMemberId(value.to_string()));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> u32 {
    self.0
  }
}

impl fmt::Display for MemberId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:0width$}", self.0, width = MEMBER_ID_WIDTH)
  }
}

impl FromStr for MemberId {
  type Err = DomainError;

  /// Acepta exactamente ocho dígitos ASCII.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.len() != MEMBER_ID_WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
      return Err(DomainError::InvalidMemberId(s.to_string()));
    }
    s.parse::<u32>()
     .map(Self)
     .map_err(|_| DomainError::InvalidMemberId(s.to_string()))
  }
}

impl From<MemberId> for String {
  fn from(id: MemberId) -> Self {
    id.to_string()
  }
}

impl TryFrom<String> for MemberId {
  type Error = DomainError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn displays_zero_padded() -> Result<(), DomainError> {
    assert_eq!(MemberId::new(42)?.to_string(), "00000042");
    assert_eq!(MemberId::new(MAX_MEMBER_ID)?.to_string(), "99999999");
    Ok(())
  }

  #[test]
  fn parse_requires_eight_digits() {
    assert_eq!("00000042".parse::<MemberId>().map(|id| id.value()), Ok(42));
    assert!("42".parse::<MemberId>().is_err());
    assert!("0000004x".parse::<MemberId>().is_err());
    assert!("+0000042".parse::<MemberId>().is_err());
  }

  #[test]
  fn rejects_values_wider_than_eight_digits() {
    assert!(MemberId::new(MAX_MEMBER_ID + 1).is_err());
  }
}
