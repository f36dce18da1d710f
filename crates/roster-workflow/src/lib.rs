//! roster-workflow: operaciones sobre el roster de socios
//!
//! Crate que compone el almacén de registros (`records::RecordStore`) y el
//! dominio (`roster_domain`) en los flujos del club: asignación de ids,
//! alta con control de móvil duplicado, actualización de campos,
//! cancelación y check-in.

pub mod allocator;
pub mod errors;
pub mod registration;
pub mod service;
pub mod updater;

pub use allocator::IdAllocator;
pub use errors::WorkflowError;
pub use registration::{RegistrationOutcome, RegistrationWorkflow};
pub use service::{MembershipService, UpdateOutcome};
pub use updater::FieldUpdater;
