// Archivo: service.rs
// Propósito: implementar `MembershipService`, la capa que expone
// cancelación, check-in y consultas de socios sobre el almacén.
use crate::errors::Result;
use crate::updater::FieldUpdater;
use log::{info, warn};
use records::{RecordStore, Row};
use roster_domain::{parse_visit_count, DomainError, Field, MemberId, MemberRecord, MembershipStatus};
use std::sync::Arc;

/// Resultado de una cancelación o un check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// La fila se actualizó.
    Updated(MemberId),
    /// La membresía ya estaba cancelada; no se reescribió nada.
    AlreadyCancelled,
}

/// Servicio de alto nivel sobre socios ya registrados.
pub struct MembershipService<S>
    where S: RecordStore
{
    store: Arc<S>,
    updater: FieldUpdater<S>,
}

impl<S> MembershipService<S> where S: RecordStore
{
    pub fn new(store: Arc<S>) -> Self {
        let updater = FieldUpdater::new(store.clone());
        Self { store, updater }
    }

    /// Primera fila (en orden del almacén) con ese id que llega hasta la
    /// columna `field`. Es la misma fila que tocaría `FieldUpdater`.
    fn find_row(&self, member_id: &MemberId, field: Field) -> Result<Option<Row>> {
        let key = member_id.to_string();
        let index = field.index();
        Ok(self.store
               .read_all()?
               .into_iter()
               .find(|row| row.len() > index && row.field(Field::MemberId.index()) == Some(key.as_str())))
    }

    fn is_cancelled(row: &Row) -> bool {
        row.field(Field::MembershipStatus.index()) == Some(MembershipStatus::Cancelled.as_str())
    }

    /// Cancela la membresía. Si ya estaba cancelada no toca el almacén.
    pub fn cancel(&self, member_id: &MemberId) -> Result<UpdateOutcome> {
        if self.find_row(member_id, Field::MembershipStatus)?
               .as_ref()
               .is_some_and(Self::is_cancelled)
        {
            return Ok(UpdateOutcome::AlreadyCancelled);
        }
        let id = self.updater
                     .set(member_id, Field::MembershipStatus, MembershipStatus::Cancelled.as_str())?;
        info!("socio {} cancelado", id);
        Ok(UpdateOutcome::Updated(id))
    }

    /// Registra una visita. Las membresías canceladas no suman visitas.
    pub fn check_in(&self, member_id: &MemberId) -> Result<UpdateOutcome> {
        if self.find_row(member_id, Field::VisitCount)?
               .as_ref()
               .is_some_and(Self::is_cancelled)
        {
            return Ok(UpdateOutcome::AlreadyCancelled);
        }
        let id = self.updater.update(member_id, Field::VisitCount, |old| {
                                 let count = parse_visit_count(old)?;
                                 count.checked_add(1)
                                      .map(|n| n.to_string())
                                      .ok_or_else(|| DomainError::MalformedRecord(format!("contador de visitas desbordado: {}", count)))
                             })?;
        info!("check-in del socio {}", id);
        Ok(UpdateOutcome::Updated(id))
    }

    /// Busca un socio por id y lo decodifica.
    pub fn find(&self, member_id: &MemberId) -> Result<Option<MemberRecord>> {
        match self.find_row(member_id, Field::VisitCount)? {
            Some(row) => Ok(Some(MemberRecord::from_fields(row.fields())?)),
            None => Ok(None),
        }
    }

    /// Todos los socios decodificables, en orden del almacén. Las filas mal
    /// formadas se omiten.
    pub fn list(&self) -> Result<Vec<MemberRecord>> {
        let rows = self.store.read_all()?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            match MemberRecord::from_fields(row.fields()) {
                Ok(record) => out.push(record),
                Err(e) => warn!("fila omitida: {}", e),
            }
        }
        Ok(out)
    }
}
