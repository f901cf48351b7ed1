//! Reading the registry table and compiling it into a tag list.

use std::{io::Read, path::Path};

use crate::{classify_and_expand, ConcreteTag, RegistryError, RegistryRow};

/// Read the rows of a comma separated registry table.
///
/// The header row is returned like any other row; it is the classifier that
/// decides which rows to skip. Rows may have any number of columns.
pub fn read_rows<R: Read>(reader: R) -> impl Iterator<Item = Result<RegistryRow, RegistryError>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .map(|record| -> Result<RegistryRow, RegistryError> {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            Ok(RegistryRow::from_fields(line, record.iter()))
        })
}

/// Compile registry rows into the ordered list of default feature tags.
///
/// Tags appear in row order, and in ascending order within a range row.
/// Duplicates are kept. The first malformed row aborts compilation.
pub fn compile<I>(rows: I) -> Result<Vec<ConcreteTag>, RegistryError>
where
    I: IntoIterator<Item = RegistryRow>,
{
    compile_rows(rows.into_iter().map(Ok))
}

/// Read and compile a registry table from `reader`.
pub fn compile_reader<R: Read>(reader: R) -> Result<Vec<ConcreteTag>, RegistryError> {
    compile_rows(read_rows(reader))
}

/// Read the registry table at `path` into memory.
///
/// A missing file, an I/O failure and text that is not UTF-8 are all reported
/// as [`RegistryError::InputUnreadable`].
pub fn read_table(path: impl AsRef<Path>) -> Result<String, RegistryError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| RegistryError::InputUnreadable {
        path: path.to_owned(),
        source,
    })
}

/// Read and compile the registry table at `path`.
///
/// The file is closed before compilation starts.
pub fn compile_path(path: impl AsRef<Path>) -> Result<Vec<ConcreteTag>, RegistryError> {
    let path = path.as_ref();
    let contents = read_table(path)?;
    let tags = compile_reader(contents.as_bytes())?;
    log::info!(
        "compiled {} default feature tags from {}",
        tags.len(),
        path.display()
    );
    Ok(tags)
}

fn compile_rows(
    rows: impl Iterator<Item = Result<RegistryRow, RegistryError>>,
) -> Result<Vec<ConcreteTag>, RegistryError> {
    let mut tags = Vec::new();
    for row in rows {
        let row = row?;
        tags.extend(classify_and_expand(&row)?);
    }
    Ok(tags)
}
