mod errors;
mod member;
mod member_id;
mod validation;

pub use errors::DomainError;
pub use member::{parse_visit_count, Field, MemberRecord, MembershipStatus, MEMBER_CSV_HEADER};
pub use member_id::{MemberId, MAX_MEMBER_ID, MEMBER_ID_WIDTH};
pub use validation::{approximate_age, parse_date_of_birth, validate_registration, validate_registration_at,
                     RegistrationForm, ValidationFailure, ValidationResult, DATE_FORMAT, MINIMUM_AGE};
