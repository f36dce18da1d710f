//! Crate `records`: almacén de filas delimitadas
//!
//! Este crate define la codificación de filas (`Row`, `Document`), el
//! contrato de persistencia `RecordStore` y una implementación en memoria
//! útil para pruebas (`InMemoryRecordStore`). Las implementaciones durables
//! (archivo plano) viven en otros crates.
//!
//! Diseño resumido:
//! - Filas separadas por comas, terminador CRLF al escribir.
//! - Cabecera opcional que se conserva en cada reescritura.
//! - Mutaciones por reescritura completa: leer todo, transformar, escribir.
//!
//! Ejemplo rápido:
//! ```rust
//! use records::{InMemoryRecordStore, RecordStore};
//! let store = InMemoryRecordStore::with_header("id,name");
//! store.append_record(&["1".to_string(), "Ann".to_string()]).unwrap();
//! assert_eq!(store.read_all().unwrap().len(), 1);
//! ```
pub mod errors;
pub mod repository;
pub mod row;
pub mod stubs;

pub use errors::*;
pub use repository::*;
pub use row::*;
pub use stubs::*;
