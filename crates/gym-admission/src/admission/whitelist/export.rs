use std::collections::HashSet;

use super::super::domain::WhitelistEntry;

const HEADER: [&str; 3] = ["NO", "계열사명", "성명"];

#[derive(Debug, thiserror::Error)]
pub enum WhitelistExportError {
    #[error("failed to write whitelist CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush whitelist CSV: {0}")]
    Flush(#[from] std::io::Error),
    #[error("whitelist CSV is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render the downstream download layout.
///
/// Row one is the fixed header, row two lists each distinct company name between empty
/// leading and trailing fields, then one `NO, company, name` row per entry numbered from 1.
pub fn export_csv(entries: &[WhitelistEntry]) -> Result<String, WhitelistExportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;

    let mut seen = HashSet::new();
    let mut companies = vec![""];
    companies.extend(
        entries
            .iter()
            .map(|entry| entry.company_name.as_str())
            .filter(|name| seen.insert(*name)),
    );
    companies.push("");
    writer.write_record(&companies)?;

    for (index, entry) in entries.iter().enumerate() {
        let number = (index + 1).to_string();
        writer.write_record([
            number.as_str(),
            entry.company_name.as_str(),
            entry.name.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| WhitelistExportError::Flush(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
