// Archivo: stubs.rs
// Propósito: implementación en memoria de `RecordStore` para pruebas y
// wiring rápido. Guarda el texto crudo del almacén, así que comparte la
// misma codificación que el almacén en archivo. No es durable.
use crate::errors::{Result, StoreError};
use crate::repository::RecordStore;
use crate::row::{Document, Row, LINE_TERMINATOR};
use std::sync::{Mutex, MutexGuard};

/// Almacén en memoria. `None` representa un almacén inexistente.
pub struct InMemoryRecordStore {
    header: Option<String>,
    content: Mutex<Option<String>>,
}

impl InMemoryRecordStore {
    /// Crea un almacén inexistente sin cabecera de esquema.
    pub fn new() -> Self {
        Self { header: None,
               content: Mutex::new(None) }
    }

    /// Crea un almacén inexistente que escribirá `header` al recibir la
    /// primera fila.
    pub fn with_header(header: impl Into<String>) -> Self {
        Self { header: Some(header.into()),
               content: Mutex::new(None) }
    }

    /// Crea un almacén con un contenido crudo inicial (útil para simular
    /// archivos editados a mano).
    pub fn from_text(header: Option<&str>, text: impl Into<String>) -> Self {
        Self { header: header.map(str::to_string),
               content: Mutex::new(Some(text.into())) }
    }

    /// Devuelve una copia del texto crudo almacenado.
    pub fn raw_text(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `StoreError::Storage`.
    fn lock(&self) -> Result<MutexGuard<'_, Option<String>>> {
        self.content
            .lock()
            .map_err(|e| StoreError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn read_all(&self) -> Result<Vec<Row>> {
        let content = self.lock()?;
        Ok(content.as_deref()
                  .map(|text| Document::parse(text, self.header.as_deref()).rows)
                  .unwrap_or_default())
    }

    fn append_record(&self, fields: &[String]) -> Result<()> {
        let line = Row::new(fields.to_vec()).encode()?;
        let mut content = self.lock()?;
        let text = content.get_or_insert_with(String::new);
        if text.is_empty() {
            if let Some(h) = &self.header {
                text.push_str(h);
                text.push_str(LINE_TERMINATOR);
            }
        } else if !text.ends_with('\n') {
            text.push_str(LINE_TERMINATOR);
        }
        text.push_str(&line);
        text.push_str(LINE_TERMINATOR);
        Ok(())
    }

    fn write_all(&self, rows: &[Row]) -> Result<()> {
        let mut content = self.lock()?;
        let header = content.as_deref()
                            .and_then(|text| Document::parse(text, self.header.as_deref()).header);
        let rendered = Document { header,
                                  rows: rows.to_vec() }.render()?;
        *content = Some(rendered);
        Ok(())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.as_deref().map_or(true, str::is_empty))
    }
}
