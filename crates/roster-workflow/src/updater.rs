// Archivo: updater.rs
// Propósito: localizar una fila por id de socio, aplicar una transformación
// pura a uno de sus campos y reescribir el almacén completo.
use crate::errors::{Result, WorkflowError};
use log::debug;
use records::RecordStore;
use roster_domain::{DomainError, Field, MemberId};
use std::sync::Arc;

/// Actualizador de campos sobre un `RecordStore`.
///
/// Cada actualización lee todas las filas, modifica una en memoria y
/// reescribe el conjunto. La fila se reemplaza entera o no se toca.
pub struct FieldUpdater<S>
    where S: RecordStore
{
    store: Arc<S>,
}

impl<S> FieldUpdater<S> where S: RecordStore
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Aplica `transform` al valor actual de `field` en la primera fila (en
    /// orden del almacén) cuyo id es `member_id` y que tiene esa columna.
    ///
    /// Errores:
    /// - `EmptyStore` si el almacén no existe o está vacío.
    /// - `NotFound` si ninguna fila coincide.
    /// - `Store` si falla la lectura o la reescritura.
    /// - `Domain` si la transformación rechaza el valor actual.
    pub fn update<F>(&self, member_id: &MemberId, field: Field, transform: F) -> Result<MemberId>
        where F: FnOnce(&str) -> std::result::Result<String, DomainError>
    {
        if self.store.is_empty()? {
            return Err(WorkflowError::EmptyStore);
        }
        let mut rows = self.store.read_all()?;
        let key = member_id.to_string();
        let index = field.index();
        let row = rows.iter_mut()
                      .find(|r| r.len() > index && r.field(Field::MemberId.index()) == Some(key.as_str()))
                      .ok_or(WorkflowError::NotFound(*member_id))?;
        let new_value = transform(row.field(index).unwrap_or_default())?;
        row.set_field(index, new_value);
        self.store.write_all(&rows)?;
        debug!("socio {}: campo {:?} actualizado", member_id, field);
        Ok(*member_id)
    }

    /// Reemplaza el campo por un valor fijo.
    pub fn set(&self, member_id: &MemberId, field: Field, value: impl Into<String>) -> Result<MemberId> {
        let value = value.into();
        self.update(member_id, field, move |_| Ok(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::InMemoryRecordStore;

    const HEADER: &str = "memberID,firstName,lastName,dateOfBirth,age,email,mobileNumber,membershipLevel,membershipStatus,numberOfVisits";

    fn seeded() -> Arc<InMemoryRecordStore> {
        Arc::new(InMemoryRecordStore::from_text(
            Some(HEADER),
            format!("{HEADER}\r\n\
                     00000001,Alice,Smith,1990-01-01,34,a@b.com,1111111111,Gold,Activated,3\r\n\
                     00000002,Brian,Jones,1985-05-05,39,b@c.com,2222222222,Basic,Activated,\r\n"),
        ))
    }

    fn id(n: u32) -> MemberId {
        MemberId::new(n).unwrap()
    }

    #[test]
    fn transforms_only_the_target_field() -> Result<()> {
        let store = seeded();
        let updater = FieldUpdater::new(store.clone());
        updater.update(&id(2), Field::MembershipLevel, |old| Ok(format!("{old}-Plus")))?;

        let rows = store.read_all()?;
        assert_eq!(rows[1].field(Field::MembershipLevel.index()), Some("Basic-Plus"));
        assert_eq!(rows[0].field(Field::MembershipLevel.index()), Some("Gold"));
        assert!(store.raw_text()?.unwrap().starts_with(HEADER));
        Ok(())
    }

    #[test]
    fn unknown_id_is_not_found_and_nothing_changes() -> Result<()> {
        let store = seeded();
        let before = store.raw_text()?;
        let updater = FieldUpdater::new(store.clone());
        let err = updater.set(&id(9), Field::MembershipStatus, "Cancelled").unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(m) if m == id(9)));
        assert_eq!(store.raw_text()?, before);
        Ok(())
    }

    #[test]
    fn empty_store_is_reported_before_scanning() {
        let updater = FieldUpdater::new(Arc::new(InMemoryRecordStore::new()));
        assert!(matches!(updater.set(&id(1), Field::VisitCount, "1"), Err(WorkflowError::EmptyStore)));

        let updater = FieldUpdater::new(Arc::new(InMemoryRecordStore::from_text(None, "")));
        assert!(matches!(updater.set(&id(1), Field::VisitCount, "1"), Err(WorkflowError::EmptyStore)));
    }

    #[test]
    fn rejected_transform_leaves_store_untouched() -> Result<()> {
        let store = seeded();
        let before = store.raw_text()?;
        let updater = FieldUpdater::new(store.clone());
        let res = updater.update(&id(1), Field::VisitCount, |_| Err(DomainError::MalformedRecord("x".into())));
        assert!(matches!(res, Err(WorkflowError::Domain(_))));
        assert_eq!(store.raw_text()?, before);
        Ok(())
    }
}
