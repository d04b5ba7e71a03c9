//! 学生 CSV 导入
//!
//! 文件列依次为 name、email、phone，第一行是表头。
//! 表格软件导出的 CSV 常为 latin-1 编码，不是合法 UTF-8 时按 Windows-1252 解码。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use std::borrow::Cow;
use std::io::Cursor;
use tracing::info;

use super::StudentService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        requests::ImportStudentRow,
        responses::{ImportRowError, StudentImportResponse},
    },
};
use crate::services::{bad_request, class_not_found, database_error};
use crate::utils::phone::validate_phone_number;
use crate::utils::validate::{require_field, validate_email};

/// 上传表单内容
#[derive(Debug)]
struct ImportUpload {
    class_id: i64,
    file: Vec<u8>,
}

/// 解析后的文件内容
#[derive(Debug, Default)]
struct ParsedImport {
    total: usize,
    rows: Vec<ImportStudentRow>,
    errors: Vec<ImportRowError>,
}

pub async fn import_students(
    service: &StudentService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let upload = match read_upload(&mut payload, config.import.max_size).await {
        Ok(upload) => upload,
        Err(e) => return Ok(bad_request(ErrorCode::FileUploadFailed, e)),
    };

    let parsed = match parse_student_csv(&upload.file, config.import.max_rows) {
        Ok(parsed) => parsed,
        Err((code, msg)) => return Ok(bad_request(code, msg)),
    };

    let storage = service.get_storage(request);
    let ParsedImport {
        total,
        rows,
        mut errors,
    } = parsed;
    let failed = errors.len();

    match storage.import_students(upload.class_id, rows).await {
        Ok(outcome) => {
            for row in &outcome.skipped_rows {
                errors.push(ImportRowError {
                    row: *row,
                    field: "email".to_string(),
                    message: "Email already exists".to_string(),
                });
            }
            errors.sort_by_key(|e| e.row);

            info!(
                "Imported {} student(s) into class {} ({} skipped, {} failed)",
                outcome.inserted,
                upload.class_id,
                outcome.skipped_rows.len(),
                failed
            );

            let response = StudentImportResponse {
                class_id: upload.class_id,
                total,
                success: outcome.inserted,
                skipped: outcome.skipped_rows.len(),
                failed,
                errors,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Import completed")))
        }
        Err(e) if e.is_not_found() => Ok(class_not_found()),
        Err(e) => Ok(database_error(ErrorCode::DatabaseError, &e)),
    }
}

async fn read_upload(payload: &mut Multipart, max_size: usize) -> Result<ImportUpload, String> {
    let mut file: Option<Vec<u8>> = None;
    let mut class_id: Option<i64> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("Failed to read form field: {e}"))?;
        let name = field.name().unwrap_or_default().to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| format!("Failed to read upload: {e}"))?;
            if data.len() + chunk.len() > max_size {
                return Err(format!("File exceeds the {max_size} byte limit"));
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "file" => file = Some(data),
            "class_id" => {
                let value = String::from_utf8_lossy(&data);
                class_id = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| format!("Invalid class_id: {value}"))?,
                );
            }
            _ => {}
        }
    }

    let class_id = class_id.ok_or_else(|| "Missing class_id".to_string())?;
    let file = file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| "No file uploaded".to_string())?;

    Ok(ImportUpload { class_id, file })
}

/// UTF-8 优先，否则按 Windows-1252（latin-1 的超集）解码
fn decode_text(data: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(data) {
        Ok(text) => Cow::Borrowed(text.trim_start_matches('\u{feff}')),
        Err(_) => encoding_rs::WINDOWS_1252.decode_without_bom_handling(data).0,
    }
}

fn parse_student_csv(
    data: &[u8],
    max_rows: usize,
) -> Result<ParsedImport, (ErrorCode, String)> {
    let text = decode_text(data);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(text.as_bytes()));

    let mut parsed = ParsedImport::default();

    for (index, result) in rdr.records().enumerate() {
        // 行号从 1 开始，第 1 行是表头
        let row = index + 2;
        let record = result.map_err(|e| {
            (
                ErrorCode::ImportFileParseFailed,
                format!("Failed to parse row {row}: {e}"),
            )
        })?;

        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        parsed.total += 1;
        if parsed.total > max_rows {
            return Err((
                ErrorCode::ImportFileDataInvalid,
                format!("At most {max_rows} rows can be imported at once"),
            ));
        }

        if record.len() < 3 {
            parsed.errors.push(ImportRowError {
                row,
                field: String::new(),
                message: "Expected columns: name, email, phone".to_string(),
            });
            continue;
        }

        match validate_row(row, &record[0], &record[1], &record[2]) {
            Ok(student) => parsed.rows.push(student),
            Err(error) => parsed.errors.push(error),
        }
    }

    if parsed.total == 0 {
        return Err((
            ErrorCode::ImportFileDataInvalid,
            "The file contains no data rows".to_string(),
        ));
    }

    Ok(parsed)
}

fn validate_row(
    row: usize,
    name: &str,
    email: &str,
    phone: &str,
) -> Result<ImportStudentRow, ImportRowError> {
    let error = |field: &str, message: String| ImportRowError {
        row,
        field: field.to_string(),
        message,
    };

    let name = require_field(name, "name").map_err(|m| error("name", m))?;
    let email = require_field(email, "email").map_err(|m| error("email", m))?;
    validate_email(email).map_err(|m| error("email", m.to_string()))?;
    let phone = validate_phone_number(phone)
        .ok_or_else(|| error("phone", format!("Invalid phone number: {phone}")))?;

    Ok(ImportStudentRow {
        row,
        name: name.to_string(),
        email: email.to_string(),
        phone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_header_and_validates_rows() {
        let csv = "name,email,phone\n\
                   Ana Silva,ana@x.com,912345678\n\
                   Rui,not-an-email,912345678\n\
                   Marta,marta@x.com,abc\n";
        let parsed = parse_student_csv(csv.as_bytes(), 1000).unwrap();

        assert_eq!(parsed.total, 3);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].row, 2);
        assert_eq!(parsed.rows[0].phone, "912 345 678");

        let fields: Vec<(usize, &str)> = parsed
            .errors
            .iter()
            .map(|e| (e.row, e.field.as_str()))
            .collect();
        assert_eq!(fields, vec![(3, "email"), (4, "phone")]);
    }

    #[test]
    fn test_latin1_names_are_decoded() {
        let mut data = b"name,email,phone\n".to_vec();
        // "Jo\xe3o" 为 latin-1 编码的 "João"
        data.extend_from_slice(b"Jo\xe3o,joao@x.com,912345678\n");

        let parsed = parse_student_csv(&data, 1000).unwrap();
        assert_eq!(parsed.rows[0].name, "João");
    }

    #[test]
    fn test_utf8_with_bom() {
        let data = "\u{feff}name,email,phone\nJoão,joao@x.com,912345678\n";
        let parsed = parse_student_csv(data.as_bytes(), 1000).unwrap();
        assert_eq!(parsed.rows[0].name, "João");
    }

    #[test]
    fn test_short_rows_are_reported() {
        let csv = "name,email,phone\nAna,ana@x.com\n";
        let parsed = parse_student_csv(csv.as_bytes(), 1000).unwrap();
        assert!(parsed.rows.is_empty());
        assert_eq!(parsed.errors.len(), 1);
    }

    #[test]
    fn test_row_limit_and_empty_file() {
        let csv = "name,email,phone\nA,a@x.com,912345678\nB,b@x.com,912345679\n";
        let (code, _) = parse_student_csv(csv.as_bytes(), 1).unwrap_err();
        assert_eq!(code, ErrorCode::ImportFileDataInvalid);

        let (code, _) = parse_student_csv(b"name,email,phone\n", 10).unwrap_err();
        assert_eq!(code, ErrorCode::ImportFileDataInvalid);
    }

    fn upload_payload(body: &'static str) -> Multipart {
        use actix_web::http::header::{self, HeaderMap, HeaderValue};
        use actix_web::web::Bytes;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=xyz"),
        );
        let stream = futures_util::stream::once(async move {
            Ok::<_, actix_web::error::PayloadError>(Bytes::from_static(body.as_bytes()))
        });
        Multipart::new(&headers, stream)
    }

    #[actix_web::test]
    async fn test_read_upload_fields() {
        let body = "--xyz\r\nContent-Disposition: form-data; name=\"class_id\"\r\n\r\n 7 \r\n\
                    --xyz\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.csv\"\r\n\r\n\
                    name,email,phone\r\n--xyz--\r\n";
        let upload = read_upload(&mut upload_payload(body), 1024).await.unwrap();
        assert_eq!(upload.class_id, 7);
        assert_eq!(upload.file, b"name,email,phone");
    }

    #[actix_web::test]
    async fn test_read_upload_rejects_bad_forms() {
        let no_class = "--xyz\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.csv\"\r\n\r\n\
                        name,email,phone\r\n--xyz--\r\n";
        let err = read_upload(&mut upload_payload(no_class), 1024).await.unwrap_err();
        assert_eq!(err, "Missing class_id");

        let empty_file = "--xyz\r\nContent-Disposition: form-data; name=\"class_id\"\r\n\r\n1\r\n\
                          --xyz\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.csv\"\r\n\r\n\
                          \r\n--xyz--\r\n";
        let err = read_upload(&mut upload_payload(empty_file), 1024).await.unwrap_err();
        assert_eq!(err, "No file uploaded");

        let bad_class = "--xyz\r\nContent-Disposition: form-data; name=\"class_id\"\r\n\r\nabc\r\n--xyz--\r\n";
        let err = read_upload(&mut upload_payload(bad_class), 1024).await.unwrap_err();
        assert!(err.starts_with("Invalid class_id"));
    }

    #[actix_web::test]
    async fn test_read_upload_enforces_size_limit() {
        let body = "--xyz\r\nContent-Disposition: form-data; name=\"class_id\"\r\n\r\n1\r\n\
                    --xyz\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.csv\"\r\n\r\n\
                    name,email,phone\nAna Silva,ana@x.com,912345678\r\n--xyz--\r\n";
        let err = read_upload(&mut upload_payload(body), 16).await.unwrap_err();
        assert_eq!(err, "File exceeds the 16 byte limit");
    }
}
