// Archivo: csv_store.rs
// Propósito: implementación durable de `RecordStore` sobre un archivo de
// texto plano con filas separadas por comas.
use log::debug;
use records::{Document, RecordStore, Result, Row, StoreError, LINE_TERMINATOR};
use roster_domain::MEMBER_CSV_HEADER;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Almacén de socios respaldado por un archivo CSV.
///
/// No hay bloqueo entre procesos: dos instancias escribiendo el mismo
/// archivo pueden perder cambios (gana la última reescritura completa).
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
  path: PathBuf,
  header: Option<String>,
}

impl CsvRecordStore {
  /// Almacén con la cabecera estándar del esquema de socios.
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self::with_header(path, Some(MEMBER_CSV_HEADER.to_string()))
  }

  /// Almacén con una cabecera arbitraria (o ninguna).
  pub fn with_header(path: impl Into<PathBuf>, header: Option<String>) -> Self {
    Self { path: path.into(), header }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn io_err(&self, e: io::Error) -> StoreError {
    StoreError::io(self.path.display().to_string(), e)
  }

  /// Lee el archivo completo. `None` si no existe.
  fn read_text(&self) -> Result<Option<String>> {
    match fs::read_to_string(&self.path) {
      Ok(text) => Ok(Some(text)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(self.io_err(e)),
    }
  }

  /// Ruta real del archivo, siguiendo enlaces simbólicos. Si aún no existe
  /// se usa la ruta configurada.
  fn resolve_target(&self) -> Result<PathBuf> {
    match fs::canonicalize(&self.path) {
      Ok(real) => Ok(real),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
      Err(e) => Err(self.io_err(e)),
    }
  }

  fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
  }
}

impl RecordStore for CsvRecordStore {
  fn read_all(&self) -> Result<Vec<Row>> {
    let rows = self.read_text()?
                   .map(|text| Document::parse(&text, self.header.as_deref()).rows)
                   .unwrap_or_default();
    debug!("{}: {} filas leídas", self.path.display(), rows.len());
    Ok(rows)
  }

  fn append_record(&self, fields: &[String]) -> Result<()> {
    let line = Row::new(fields.to_vec()).encode()?;
    let mut file = OpenOptions::new().create(true)
                                     .read(true)
                                     .append(true)
                                     .open(&self.path)
                                     .map_err(|e| self.io_err(e))?;
    let len = file.metadata().map_err(|e| self.io_err(e))?.len();
    let mut buf = String::new();
    if len == 0 {
      if let Some(h) = &self.header {
        buf.push_str(h);
        buf.push_str(LINE_TERMINATOR);
      }
    } else if !Self::ends_with_newline(&mut file).map_err(|e| self.io_err(e))? {
      buf.push_str(LINE_TERMINATOR);
    }
    buf.push_str(&line);
    buf.push_str(LINE_TERMINATOR);

    let mut writer = BufWriter::new(file);
    writer.write_all(buf.as_bytes()).map_err(|e| self.io_err(e))?;
    writer.flush().map_err(|e| self.io_err(e))?;
    debug!("{}: fila añadida", self.path.display());
    Ok(())
  }

  fn write_all(&self, rows: &[Row]) -> Result<()> {
    let header = self.read_text()?
                     .and_then(|text| Document::parse(&text, self.header.as_deref()).header);
    let rendered = Document { header,
                              rows: rows.to_vec() }.render()?;

    // Si la ruta es un enlace simbólico se reescribe el archivo real.
    let target = self.resolve_target()?;
    // El temporal vive junto al destino para que el rename sea atómico.
    let dir = match target.parent() {
      Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
      _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_err(e))?;
    tmp.write_all(rendered.as_bytes()).map_err(|e| self.io_err(e))?;
    match fs::metadata(&target) {
      Ok(meta) => tmp.as_file()
                     .set_permissions(meta.permissions())
                     .map_err(|e| self.io_err(e))?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(self.io_err(e)),
    }
    tmp.as_file().sync_all().map_err(|e| self.io_err(e))?;
    tmp.persist(&target).map_err(|e| self.io_err(e.error))?;
    debug!("{}: reescritas {} filas", self.path.display(), rows.len());
    Ok(())
  }

  fn is_empty(&self) -> Result<bool> {
    match fs::metadata(&self.path) {
      Ok(meta) => Ok(meta.len() == 0),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
      Err(e) => Err(self.io_err(e)),
    }
  }
}
