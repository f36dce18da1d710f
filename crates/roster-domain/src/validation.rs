// validation.rs
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Formato canónico de la fecha de nacimiento.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Edad mínima (en años aproximados de 365 días) para registrarse.
pub const MINIMUM_AGE: i64 = 18;

/// Longitud mínima exclusiva de nombre y apellido.
const MIN_NAME_LEN: usize = 3;

const MOBILE_DIGITS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("patrón de email válido"));

/// Regla de registro incumplida. Sólo se informa la primera que falla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
  #[error("Introduzca un nombre completo de más de 3 caracteres.")]
  FirstNameTooShort,
  #[error("Introduzca un apellido completo de más de 3 caracteres.")]
  LastNameTooShort,
  #[error("Introduzca una fecha de nacimiento válida en formato AAAA-MM-DD.")]
  InvalidDateFormat,
  #[error("Debe tener al menos 18 años para registrarse.")]
  Underage,
  #[error("Introduzca una dirección de email válida.")]
  InvalidEmail,
  #[error("Introduzca un número de móvil de 10 dígitos.")]
  InvalidMobile,
}

/// `Ok(())` si el formulario es válido, o la primera regla incumplida.
pub type ValidationResult = Result<(), ValidationFailure>;

/// Parseo estricto de la fecha de nacimiento (rechaza mes 13, día 32, etc.).
pub fn parse_date_of_birth(dob: &str) -> Result<NaiveDate, ValidationFailure> {
  NaiveDate::parse_from_str(dob, DATE_FORMAT).map_err(|_| ValidationFailure::InvalidDateFormat)
}

/// Edad en años completos usando un año fijo de 365 días. Es una
/// aproximación: ignora años bisiestos, así que la edad cambia unos días
/// antes del cumpleaños real.
pub fn approximate_age(dob: NaiveDate, today: NaiveDate) -> i64 {
  (today - dob).num_days() / 365
}

/// Valida los datos de registro contra la fecha local actual.
pub fn validate_registration(first_name: &str,
                             last_name: &str,
                             dob: &str,
                             email: &str,
                             mobile: &str)
                             -> ValidationResult {
  validate_registration_at(first_name, last_name, dob, email, mobile, Local::now().date_naive())
}

/// Igual que `validate_registration` pero con la fecha de referencia
/// explícita. Las reglas se evalúan en orden y la primera que falla gana.
pub fn validate_registration_at(first_name: &str,
                                last_name: &str,
                                dob: &str,
                                email: &str,
                                mobile: &str,
                                today: NaiveDate)
                                -> ValidationResult {
  if first_name.chars().count() <= MIN_NAME_LEN {
    return Err(ValidationFailure::FirstNameTooShort);
  }
  if last_name.chars().count() <= MIN_NAME_LEN {
    return Err(ValidationFailure::LastNameTooShort);
  }
  let dob = parse_date_of_birth(dob)?;
  if approximate_age(dob, today) < MINIMUM_AGE {
    return Err(ValidationFailure::Underage);
  }
  if !EMAIL_PATTERN.is_match(email) {
    return Err(ValidationFailure::InvalidEmail);
  }
  if mobile.len() != MOBILE_DIGITS || !mobile.bytes().all(|b| b.is_ascii_digit()) {
    return Err(ValidationFailure::InvalidMobile);
  }
  Ok(())
}

/// Datos crudos del formulario de alta, tal como los recoge la consola.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
  pub first_name: String,
  pub last_name: String,
  pub date_of_birth: String,
  pub email: String,
  pub mobile_number: String,
  pub membership_level: String,
}

impl RegistrationForm {
  pub fn validate(&self) -> ValidationResult {
    self.validate_at(Local::now().date_naive())
  }

  pub fn validate_at(&self, today: NaiveDate) -> ValidationResult {
    validate_registration_at(&self.first_name,
                             &self.last_name,
                             &self.date_of_birth,
                             &self.email,
                             &self.mobile_number,
                             today)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Months;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
  }

  fn check(first: &str, last: &str, dob: &str, email: &str, mobile: &str) -> ValidationResult {
    validate_registration_at(first, last, dob, email, mobile, today())
  }

  #[test]
  fn accepts_a_complete_form() {
    assert_eq!(check("Alice", "Smith", "2000-01-01", "a@b.com", "1234567890"), Ok(()));
  }

  #[test]
  fn short_first_name_wins_over_everything_else() {
    assert_eq!(check("Al", "Smith", "2000-01-01", "a@b.com", "1234567890"),
               Err(ValidationFailure::FirstNameTooShort));
    assert_eq!(check("Ann", "X", "bad", "bad", "bad"), Err(ValidationFailure::FirstNameTooShort));
  }

  #[test]
  fn short_last_name() {
    assert_eq!(check("Alice", "Lee", "2000-01-01", "a@b.com", "1234567890"),
               Err(ValidationFailure::LastNameTooShort));
  }

  #[test]
  fn rejects_impossible_dates() {
    for dob in ["2000-13-01", "2000-01-32", "2001-02-29", "01/01/2000", "2000-01-01x", ""] {
      assert_eq!(check("Alice", "Smith", dob, "a@b.com", "1234567890"),
                 Err(ValidationFailure::InvalidDateFormat),
                 "dob {dob:?}");
    }
  }

  #[test]
  fn ten_year_old_is_underage() {
    let dob = today().checked_sub_months(Months::new(120)).unwrap();
    let dob = dob.format(DATE_FORMAT).to_string();
    assert_eq!(check("Alice", "Smith", &dob, "a@b.com", "1234567890"),
               Err(ValidationFailure::Underage));
  }

  #[test]
  fn age_cutoff_uses_365_day_years() {
    // 18 * 365 días exactos antes de hoy ya cuenta como mayor de edad,
    // aunque el calendario todavía no haya llegado al cumpleaños.
    let cutoff = today() - chrono::Duration::days(18 * 365);
    assert_eq!(approximate_age(cutoff, today()), 18);
    assert_eq!(approximate_age(cutoff.succ_opt().unwrap(), today()), 17);
    assert!(cutoff > NaiveDate::from_ymd_opt(2006, 6, 15).unwrap());
  }

  #[test]
  fn email_shape() {
    for bad in ["a@b", "a@b.c", "@b.com", "a b@c.com", "a@b.c0m"] {
      assert_eq!(check("Alice", "Smith", "2000-01-01", bad, "1234567890"),
                 Err(ValidationFailure::InvalidEmail),
                 "email {bad:?}");
    }
    assert_eq!(check("Alice", "Smith", "2000-01-01", "first.last+tag@mail.example.org", "1234567890"),
               Ok(()));
  }

  #[test]
  fn mobile_must_be_ten_ascii_digits() {
    for bad in ["123456789", "12345678901", "12345abcde", "١٢٣٤٥٦٧٨٩٠"] {
      assert_eq!(check("Alice", "Smith", "2000-01-01", "a@b.com", bad),
                 Err(ValidationFailure::InvalidMobile),
                 "mobile {bad:?}");
    }
  }

  #[test]
  fn name_length_counts_characters() {
    assert_eq!(check("Zoë", "Smith", "2000-01-01", "a@b.com", "1234567890"),
               Err(ValidationFailure::FirstNameTooShort));
    assert_eq!(check("Zoëy", "Smith", "2000-01-01", "a@b.com", "1234567890"), Ok(()));
  }
}
