use crate::domain::model::{DeadlineRequest, DeadlineResponse};
use crate::utils::error::{Result, SlaError};
use crate::utils::validation::validate_non_empty_string;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Reads `id,start,hours` rows. An empty `hours` cell means the default duration.
pub fn read_requests<R: Read>(reader: R) -> Result<Vec<DeadlineRequest>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut requests = Vec::new();
    for (line, row) in csv_reader.deserialize::<DeadlineRequest>().enumerate() {
        let request = row?;
        validate_non_empty_string(&format!("row {} id", line + 1), &request.id)?;
        if let Some(hours) = request.hours {
            if !hours.is_finite() {
                return Err(SlaError::ValidationError {
                    message: format!("Row {} has a non-numeric duration", line + 1),
                });
            }
        }
        requests.push(request);
    }

    tracing::debug!("Read {} deadline requests", requests.len());
    Ok(requests)
}

pub fn write_responses<W: Write>(writer: W, responses: &[DeadlineResponse]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for response in responses {
        csv_writer.serialize(response)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_requests_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DeadlineRequest>> {
    let file = File::open(path)?;
    read_requests(file)
}

pub fn write_responses_to_path<P: AsRef<Path>>(path: P, responses: &[DeadlineResponse]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write_responses(File::create(path)?, responses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_requests_with_optional_hours() {
        let input = "id,start,hours\n\
                     doc-1, 2025-03-10T08:00:00-05:00 ,12\n\
                     doc-2,2025-03-07T17:00:00-05:00,\n";
        let requests = read_requests(input.as_bytes()).unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].id, "doc-1");
        assert_eq!(requests[0].hours, Some(12.0));
        assert_eq!(requests[1].hours, None);
    }

    #[test]
    fn test_read_requests_rejects_bad_timestamp() {
        let input = "id,start,hours\ndoc-1,yesterday,2\n";
        assert!(matches!(read_requests(input.as_bytes()), Err(SlaError::CsvError(_))));
    }

    #[test]
    fn test_write_responses() {
        let response = DeadlineResponse {
            id: "doc-1".to_string(),
            start: chrono::DateTime::parse_from_rfc3339("2025-03-07T17:00:00-05:00").unwrap(),
            hours: 2.0,
            deadline: chrono::DateTime::parse_from_rfc3339("2025-03-10T09:00:00-05:00").unwrap(),
        };

        let mut buffer = Vec::new();
        write_responses(&mut buffer, &[response]).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("id,start,hours,deadline\n"));
        assert!(output.contains("doc-1,2025-03-07T17:00:00-05:00,2.0,2025-03-10T09:00:00-05:00"));
    }
}
