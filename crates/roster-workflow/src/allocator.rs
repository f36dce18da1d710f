// Archivo: allocator.rs
// Propósito: emitir identificadores de socio únicos y crecientes a partir
// del máximo existente en el almacén.
use crate::errors::{Result, WorkflowError};
use log::{debug, warn};
use records::RecordStore;
use roster_domain::{Field, MemberId, MAX_MEMBER_ID};

/// Asignador de identificadores.
///
/// Se inicializa una única vez escaneando el almacén y después sólo
/// incrementa su contador en memoria; nunca vuelve a leer el disco. Dos
/// procesos con su propio asignador sobre el mismo archivo emitirán ids
/// duplicados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    last: u32,
}

impl IdAllocator {
    /// Asignador cuyo último id emitido es `last`.
    pub fn starting_at(last: u32) -> Self {
        Self { last }
    }

    /// Escanea el almacén y toma el mayor id numérico encontrado. Las filas
    /// con id vacío, no numérico o fuera del rango de ocho dígitos se ignoran. Si no hay ninguno (almacén vacío
    /// o inexistente) se usa `default`.
    pub fn initialize<S>(store: &S, default: u32) -> Result<Self>
        where S: RecordStore + ?Sized
    {
        let rows = store.read_all()?;
        let mut max: Option<u32> = None;
        for row in &rows {
            let raw = row.field(Field::MemberId.index()).unwrap_or_default();
            if raw.is_empty() {
                continue;
            }
            match legacy_id(raw) {
                Some(id) => max = Some(max.map_or(id, |m| m.max(id))),
                None => warn!("id de socio ilegible ignorado: {:?}", raw),
            }
        }
        let last = max.unwrap_or(default);
        debug!("asignador inicializado: {} filas, último id {}", rows.len(), last);
        Ok(Self { last })
    }

    /// Incrementa el contador y devuelve el nuevo id. El valor queda
    /// consumido aunque el llamador no llegue a usarlo.
    pub fn next(&mut self) -> Result<MemberId> {
        let candidate = self.last
                            .checked_add(1)
                            .filter(|v| *v <= MAX_MEMBER_ID)
                            .ok_or(WorkflowError::IdSpaceExhausted)?;
        self.last = candidate;
        Ok(MemberId::new(candidate)?)
    }

    /// Último id emitido (o el valor inicial si aún no se emitió ninguno).
    pub fn last_allocated(&self) -> u32 {
        self.last
    }
}

/// Id de una fila existente. Admite ids cortos de datos antiguos, pero sólo
/// dígitos ASCII y nunca por encima de `MAX_MEMBER_ID`.
fn legacy_id(raw: &str) -> Option<u32> {
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().filter(|id| *id <= MAX_MEMBER_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::InMemoryRecordStore;

    fn store(text: &str) -> InMemoryRecordStore {
        InMemoryRecordStore::from_text(Some("memberID,firstName"), text)
    }

    #[test]
    fn continues_after_the_highest_id() -> Result<()> {
        let s = store("memberID,firstName\r\n00000007,Ann\r\n00000042,Bob\r\n00000010,Cid\r\n");
        let mut alloc = IdAllocator::initialize(&s, 0)?;
        assert_eq!(alloc.next()?.to_string(), "00000043");
        assert_eq!(alloc.next()?.to_string(), "00000044");
        Ok(())
    }

    #[test]
    fn empty_or_missing_store_uses_default() -> Result<()> {
        let mut alloc = IdAllocator::initialize(&InMemoryRecordStore::new(), 500)?;
        assert_eq!(alloc.last_allocated(), 500);
        assert_eq!(alloc.next()?.to_string(), "00000501");
        Ok(())
    }

    #[test]
    fn skips_blank_and_garbled_ids() -> Result<()> {
        let s = store("memberID,firstName\r\n,Ghost\r\nabc,Typo\r\n00000003,Ann\r\n");
        let alloc = IdAllocator::initialize(&s, 0)?;
        assert_eq!(alloc.last_allocated(), 3);
        Ok(())
    }

    #[test]
    fn out_of_range_and_signed_ids_do_not_count() -> Result<()> {
        let s = store("memberID,firstName\r\n100000000,Old\r\n+00000050,Plus\r\n-1,Neg\r\n\
                       99999999999,Huge\r\n00000012,Ann\r\n7,Legacy\r\n");
        let mut alloc = IdAllocator::initialize(&s, 0)?;
        assert_eq!(alloc.last_allocated(), 12);
        assert_eq!(alloc.next()?.to_string(), "00000013");
        Ok(())
    }

    #[test]
    fn refuses_ids_wider_than_eight_digits() {
        let mut alloc = IdAllocator::starting_at(MAX_MEMBER_ID);
        assert!(matches!(alloc.next(), Err(WorkflowError::IdSpaceExhausted)));
        assert_eq!(alloc.last_allocated(), MAX_MEMBER_ID);
    }
}
