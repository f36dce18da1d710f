// member.rs
use crate::validation::DATE_FORMAT;
use crate::{DomainError, MemberId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cabecera del archivo de socios. Define el orden fijo de las diez columnas.
pub const MEMBER_CSV_HEADER: &str =
  "memberID,firstName,lastName,dateOfBirth,age,email,mobileNumber,membershipLevel,membershipStatus,numberOfVisits";

/// Columnas del registro de socio, en el orden en que se persisten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  MemberId,
  FirstName,
  LastName,
  DateOfBirth,
  Age,
  Email,
  MobileNumber,
  MembershipLevel,
  MembershipStatus,
  VisitCount,
}

impl Field {
  pub const COUNT: usize = 10;

  pub const ALL: [Field; Field::COUNT] = [Field::MemberId,
                                          Field::FirstName,
                                          Field::LastName,
                                          Field::DateOfBirth,
                                          Field::Age,
                                          Field::Email,
                                          Field::MobileNumber,
                                          Field::MembershipLevel,
                                          Field::MembershipStatus,
                                          Field::VisitCount];

  /// Posición de la columna dentro de la fila.
  pub const fn index(self) -> usize {
    self as usize
  }
}

/// Estado de la membresía. La única transición válida es
/// `Activated -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipStatus {
  Activated,
  Cancelled,
}

impl MembershipStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      MembershipStatus::Activated => "Activated",
      MembershipStatus::Cancelled => "Cancelled",
    }
  }

  pub fn is_cancelled(&self) -> bool {
    matches!(self, MembershipStatus::Cancelled)
  }
}

impl fmt::Display for MembershipStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for MembershipStatus {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Activated" => Ok(MembershipStatus::Activated),
      "Cancelled" => Ok(MembershipStatus::Cancelled),
      other => Err(DomainError::InvalidStatus(other.to_string())),
    }
  }
}

/// Contador de visitas tal como se guarda: vacío equivale a cero.
pub fn parse_visit_count(raw: &str) -> Result<u32, DomainError> {
  if raw.is_empty() {
    return Ok(0);
  }
  raw.parse()
     .map_err(|_| DomainError::MalformedRecord(format!("contador de visitas inválido: {:?}", raw)))
}

/// Registro completo de un socio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
  pub member_id: MemberId,
  pub first_name: String,
  pub last_name: String,
  pub date_of_birth: NaiveDate,
  pub age: i64,
  pub email: String,
  pub mobile_number: String,
  pub membership_level: String,
  pub membership_status: MembershipStatus,
  pub visit_count: u32,
}

impl MemberRecord {
  /// Campos en el orden persistido; la fecha va en formato canónico.
  pub fn to_fields(&self) -> Vec<String> {
    vec![self.member_id.to_string(),
         self.first_name.clone(),
         self.last_name.clone(),
         self.date_of_birth.format(DATE_FORMAT).to_string(),
         self.age.to_string(),
         self.email.clone(),
         self.mobile_number.clone(),
         self.membership_level.clone(),
         self.membership_status.as_str().to_string(),
         self.visit_count.to_string()]
  }

  /// Reconstruye un registro desde una fila cruda de diez campos.
  pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, DomainError> {
    if fields.len() != Field::COUNT {
      return Err(DomainError::MalformedRecord(format!("se esperaban {} campos, hay {}",
                                                      Field::COUNT,
                                                      fields.len())));
    }
    let get = |field: Field| fields[field.index()].as_ref();
    let date_of_birth = NaiveDate::parse_from_str(get(Field::DateOfBirth), DATE_FORMAT)
      .map_err(|e| DomainError::MalformedRecord(format!("fecha de nacimiento: {}", e)))?;
    let age = get(Field::Age).parse::<i64>()
                             .map_err(|e| DomainError::MalformedRecord(format!("edad: {}", e)))?;
    Ok(Self { member_id: get(Field::MemberId).parse()?,
              first_name: get(Field::FirstName).to_string(),
              last_name: get(Field::LastName).to_string(),
              date_of_birth,
              age,
              email: get(Field::Email).to_string(),
              mobile_number: get(Field::MobileNumber).to_string(),
              membership_level: get(Field::MembershipLevel).to_string(),
              membership_status: get(Field::MembershipStatus).parse()?,
              visit_count: parse_visit_count(get(Field::VisitCount))? })
  }
}

impl fmt::Display for MemberRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "Member({} {} {}, {}, visitas: {})",
           self.member_id, self.first_name, self.last_name, self.membership_status, self.visit_count)
  }
}
