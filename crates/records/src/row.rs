// Archivo: row.rs
// Propósito: codificación de filas delimitadas por comas y del documento
// completo (cabecera opcional + filas). Lo comparten todas las
// implementaciones de `RecordStore` para que lean y escriban igual.
use crate::errors::{Result, StoreError};

/// Separador de campos dentro de una fila.
pub const DELIMITER: char = ',';

/// Terminador de línea emitido al escribir. Al leer se acepta también `\n`.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Fila cruda del almacén: secuencia ordenada de campos de texto.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Decodifica una línea (sin terminador). Los campos vacíos se conservan,
    /// incluidos los finales: `"a,,"` produce tres campos.
    pub fn parse(line: &str) -> Self {
        Self { fields: line.split(DELIMITER).map(str::to_string).collect() }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Reemplaza el campo en `index`. Devuelve `false` si la fila no tiene
    /// esa columna.
    pub fn set_field(&mut self, index: usize, value: String) -> bool {
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Codifica la fila sin terminador. Falla con `StoreError::Encoding` si
    /// algún campo contiene el delimitador o un salto de línea, porque
    /// desalinearía las columnas al volver a leer.
    pub fn encode(&self) -> Result<String> {
        if let Some(bad) = self.fields
                               .iter()
                               .find(|f| f.contains(DELIMITER) || f.contains('\n') || f.contains('\r'))
        {
            return Err(StoreError::Encoding(bad.clone()));
        }
        Ok(self.fields.join(&DELIMITER.to_string()))
    }
}

impl From<Vec<String>> for Row {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

/// Contenido completo del almacén ya decodificado.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Línea de cabecera tal cual estaba en el almacén, si existía.
    pub header: Option<String>,
    pub rows: Vec<Row>,
}

impl Document {
    /// Decodifica el texto del almacén. La primera línea se considera cabecera
    /// sólo si coincide con `header`. Las líneas en blanco se ignoran.
    pub fn parse(text: &str, header: Option<&str>) -> Self {
        let mut lines = text.lines().peekable();
        let mut found_header = None;
        if let (Some(expected), Some(first)) = (header, lines.peek()) {
            if first.trim() == expected {
                found_header = Some(expected.to_string());
                lines.next();
            }
        }
        let rows = lines.filter(|l| !l.trim().is_empty()).map(Row::parse).collect();
        Self { header: found_header, rows }
    }

    /// Serializa cabecera (si existe) y filas, cada línea terminada en CRLF.
    /// Codifica todo antes de devolver nada, así un error no deja una
    /// escritura a medias.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        if let Some(h) = &self.header {
            out.push_str(h);
            out.push_str(LINE_TERMINATOR);
        }
        for row in &self.rows {
            out.push_str(&row.encode()?);
            out.push_str(LINE_TERMINATOR);
        }
        Ok(out)
    }
}
