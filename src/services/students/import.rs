//! 学生 CSV 导入服务

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::{error, info};

use super::StudentService;
use super::create::build_student;
use crate::config::AppConfig;
use crate::models::common::BatchError;
use crate::models::students::{CreateStudentRequest, ImportedStudentAccount, StudentImportResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_email;

/// 导入解析错误
#[derive(Debug)]
enum ImportParseError {
    MissingColumn(&'static str),
    ParseFailed(String),
}

impl ImportParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("Missing required column: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
        }
    }
}

/// 文件中的一行，`row_num` 从 2 开始（跳过表头）
#[derive(Debug)]
struct ImportRow {
    row_num: usize,
    request: CreateStudentRequest,
}

pub async fn import_students(
    service: &StudentService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let max_rows = AppConfig::get().accounts.import_max_rows;

    let file_bytes = match read_file_from_multipart(&mut payload).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("Failed to read uploaded file: {e}"),
            )));
        }
    };

    let rows = match parse_csv(&file_bytes) {
        Ok(rows) => rows,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(e.error_code(), e.message())));
        }
    };

    if rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "The file contains no data rows",
        )));
    }

    if rows.len() > max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("At most {max_rows} rows can be imported at once"),
        )));
    }

    let total = rows.len();
    let mut users = Vec::new();
    let mut errors = Vec::new();

    for row in rows {
        if let Err(message) = check_row(&row.request) {
            errors.push(BatchError {
                index: row.row_num,
                message,
            });
            continue;
        }

        // 哈希放到阻塞线程池
        let built = tokio::task::spawn_blocking(move || build_student(row.request)).await;
        let (user, profile, password) = match built {
            Ok(Ok(parts)) => parts,
            Ok(Err(e)) => {
                errors.push(BatchError {
                    index: row.row_num,
                    message: e.message().to_string(),
                });
                continue;
            }
            Err(e) => {
                errors.push(BatchError {
                    index: row.row_num,
                    message: format!("Password processing failed: {e}"),
                });
                continue;
            }
        };

        match storage.create_student(user, profile).await {
            Ok(student) => users.push(ImportedStudentAccount {
                username: student.username,
                password,
                student_id: student.student_id.unwrap_or_default(),
            }),
            Err(e) => {
                error!("Import row {} failed: {}", row.row_num, e);
                errors.push(BatchError {
                    index: row.row_num,
                    message: e.message().to_string(),
                });
            }
        }
    }

    info!(
        "Student import finished: {} of {} rows created",
        users.len(),
        total
    );

    let response = StudentImportResponse {
        message: format!("Imported {} of {} students", users.len(), total),
        created: users.len(),
        users,
        errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Import completed")))
}

/// 缺少学籍号或班级的行跳过
fn check_row(req: &CreateStudentRequest) -> Result<(), String> {
    if req.admission_no.trim().is_empty() {
        return Err("admission_no is required".to_string());
    }
    if req.class_section.trim().is_empty() {
        return Err("class_section is required".to_string());
    }
    if let Some(email) = req.email.as_deref() {
        validate_email(email).map_err(str::to_string)?;
    }
    Ok(())
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<Vec<u8>, String> {
    let mut file_bytes = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("failed to read field: {e}"))?;

        if field.name() == Some("file") {
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("failed to read data: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("no file field found".to_string());
    }

    Ok(file_bytes)
}

fn parse_csv(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to read header: {e}")))?;
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase(), i))
        .collect();

    for required in ["admission_no", "class_section"] {
        if !header_map.contains_key(required) {
            return Err(ImportParseError::MissingColumn(required));
        }
    }

    let mut rows = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let row_num = idx + 2;
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("Failed to parse row {row_num}: {e}"))
        })?;

        let cell = |name: &str| -> Option<String> {
            header_map
                .get(name)
                .and_then(|i| record.get(*i))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let request = CreateStudentRequest {
            admission_no: cell("admission_no").unwrap_or_default(),
            class_section: cell("class_section").unwrap_or_default(),
            first_name: cell("first_name").unwrap_or_default(),
            last_name: cell("last_name").unwrap_or_default(),
            email: cell("email"),
            national_id: cell("national_id"),
            student_id: cell("student_id"),
            department: cell("department"),
            year: cell("year").and_then(|v| v.parse().ok()),
            academic_status: cell("academic_status"),
            enrollment_date: cell("enrollment_date"),
            gender: cell("gender"),
            dob: cell("dob"),
            phone: cell("phone"),
            address: cell("address"),
            blood_group: cell("blood_group"),
            medical_condition: cell("medical_condition"),
            extra_activities: cell("extra_activities"),
            remarks: cell("remarks"),
            father_name: cell("father_name"),
            mother_name: cell("mother_name"),
            guardian_contact: cell("guardian_contact"),
            guardian_email: cell("guardian_email"),
            guardian_relation: cell("guardian_relation"),
        };

        rows.push(ImportRow { row_num, request });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_reads_named_columns() {
        let data = b"Admission_No,first_name,last_name,class_section,year,dob\n\
                     ADM-1, Sara ,Tesfaye,Grade 10 - B,10,05/09/2009\n\
                     ,Hana,Girma,Grade 10 - B,,\n";
        let rows = parse_csv(data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_num, 2);
        assert_eq!(rows[0].request.admission_no, "ADM-1");
        assert_eq!(rows[0].request.first_name, "Sara");
        assert_eq!(rows[0].request.year, Some(10));
        assert_eq!(rows[0].request.email, None);
        assert!(check_row(&rows[0].request).is_ok());
        assert_eq!(
            check_row(&rows[1].request).unwrap_err(),
            "admission_no is required"
        );
    }

    #[test]
    fn test_missing_required_column() {
        let err = parse_csv(b"admission_no,first_name\nADM-1,Sara\n").unwrap_err();
        assert!(matches!(err, ImportParseError::MissingColumn("class_section")));
        assert_eq!(err.error_code(), ErrorCode::ImportFileMissingColumn);
    }
}
