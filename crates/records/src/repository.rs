// Archivo: repository.rs
// Propósito: definir el trait `RecordStore`, el contrato que deben cumplir
// los almacenes de registros delimitados (archivo plano, memoria, etc.).
use crate::errors::Result;
use crate::row::Row;
use std::sync::Arc;

/// Contrato mínimo de un almacén de filas delimitadas.
///
/// El almacén es una secuencia ordenada de filas con una cabecera opcional.
/// Toda mutación es "leer todo, transformar en memoria, reescribir todo":
/// no hay bloqueo ni control de concurrencia entre procesos.
pub trait RecordStore: Send + Sync {
    /// Lee todas las filas en orden, sin la cabecera y sin líneas vacías.
    /// Un almacén inexistente se lee como cero filas.
    fn read_all(&self) -> Result<Vec<Row>>;

    /// Añade una fila al final. Si el destino está vacío (o no existe) escribe
    /// antes la cabecera del esquema.
    fn append_record(&self, fields: &[String]) -> Result<()>;

    /// Reemplaza el contenido completo por `rows`, conservando la cabecera si
    /// el almacén la tenía. Una lectura posterior nunca ve filas a medias.
    fn write_all(&self, rows: &[Row]) -> Result<()>;

    /// `true` si el almacén no existe o tiene longitud cero.
    fn is_empty(&self) -> Result<bool>;
}

impl<S> RecordStore for Arc<S> where S: RecordStore + ?Sized
{
    fn read_all(&self) -> Result<Vec<Row>> {
        (**self).read_all()
    }

    fn append_record(&self, fields: &[String]) -> Result<()> {
        (**self).append_record(fields)
    }

    fn write_all(&self, rows: &[Row]) -> Result<()> {
        (**self).write_all(rows)
    }

    fn is_empty(&self) -> Result<bool> {
        (**self).is_empty()
    }
}
