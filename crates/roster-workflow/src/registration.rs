// Archivo: registration.rs
// Propósito: flujo de alta de socios. Compone el asignador de ids, la
// comprobación de móvil duplicado y el append al almacén.
use crate::allocator::IdAllocator;
use crate::errors::Result;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use records::RecordStore;
use roster_domain::{approximate_age, parse_date_of_birth, Field, MemberId, MemberRecord, MembershipStatus,
                    RegistrationForm};
use std::sync::Arc;

/// Resultado de un alta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Se añadió una fila nueva con este id.
    Registered(MemberId),
    /// El móvil ya estaba registrado; no se añadió nada.
    ExistingCustomer,
}

/// Flujo de registro de socios.
///
/// La validación del formulario es responsabilidad del llamador (ver
/// `RegistrationForm::validate`); aquí sólo se exige que la fecha de
/// nacimiento se pueda parsear para calcular la edad.
pub struct RegistrationWorkflow<S>
    where S: RecordStore
{
    store: Arc<S>,
    allocator: IdAllocator,
    default_visit_count: u32,
}

impl<S> RegistrationWorkflow<S> where S: RecordStore
{
    pub fn new(store: Arc<S>, allocator: IdAllocator, default_visit_count: u32) -> Self {
        Self { store,
               allocator,
               default_visit_count }
    }

    /// Construye el flujo inicializando el asignador con un escaneo del
    /// almacén.
    pub fn from_store(store: Arc<S>, starting_member_id: u32, default_visit_count: u32) -> Result<Self> {
        let allocator = IdAllocator::initialize(&*store, starting_member_id)?;
        Ok(Self::new(store, allocator, default_visit_count))
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// Recorre el almacén completo buscando el móvil en su columna.
    pub fn mobile_exists(&self, mobile: &str) -> Result<bool> {
        let index = Field::MobileNumber.index();
        Ok(self.store
               .read_all()?
               .iter()
               .any(|row| row.field(index) == Some(mobile)))
    }

    /// Registra un socio usando la fecha local actual para la edad.
    pub fn register(&mut self, form: &RegistrationForm) -> Result<RegistrationOutcome> {
        self.register_at(form, Local::now().date_naive())
    }

    /// Registra un socio con una fecha de referencia explícita.
    ///
    /// El id se reserva antes que nada y no se devuelve al asignador si el
    /// alta termina en duplicado o en error.
    pub fn register_at(&mut self, form: &RegistrationForm, today: NaiveDate) -> Result<RegistrationOutcome> {
        let member_id = self.allocator.next()?;
        let date_of_birth = parse_date_of_birth(&form.date_of_birth)?;

        if self.mobile_exists(&form.mobile_number)? {
            warn!("alta rechazada: el móvil {} ya está registrado (id {} descartado)",
                  form.mobile_number, member_id);
            return Ok(RegistrationOutcome::ExistingCustomer);
        }

        let record = MemberRecord { member_id,
                                    first_name: form.first_name.clone(),
                                    last_name: form.last_name.clone(),
                                    date_of_birth,
                                    age: approximate_age(date_of_birth, today),
                                    email: form.email.clone(),
                                    mobile_number: form.mobile_number.clone(),
                                    membership_level: form.membership_level.clone(),
                                    membership_status: MembershipStatus::Activated,
                                    visit_count: self.default_visit_count };
        self.store.append_record(&record.to_fields())?;
        info!("socio {} registrado", member_id);
        Ok(RegistrationOutcome::Registered(member_id))
    }
}
