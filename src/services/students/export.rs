//! 学生导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode, students::Student};

const HEADERS: [&str; 25] = [
    "id",
    "student_id",
    "username",
    "first_name",
    "last_name",
    "email",
    "national_id",
    "admission_no",
    "class_section",
    "department",
    "year",
    "academic_status",
    "enrollment_date",
    "gender",
    "dob",
    "phone",
    "address",
    "blood_group",
    "medical_condition",
    "father_name",
    "mother_name",
    "guardian_contact",
    "guardian_email",
    "guardian_relation",
    "created_at",
];

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn row(student: &Student) -> [String; 25] {
    [
        student.id.to_string(),
        text(&student.student_id),
        student.username.clone(),
        student.first_name.clone(),
        student.last_name.clone(),
        text(&student.email),
        text(&student.national_id),
        student.admission_no.clone(),
        student.class_section.clone(),
        text(&student.department),
        student.year.map(|y| y.to_string()).unwrap_or_default(),
        student.academic_status.clone(),
        student
            .enrollment_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        text(&student.gender),
        student.dob.map(|d| d.to_string()).unwrap_or_default(),
        text(&student.phone),
        text(&student.address),
        text(&student.blood_group),
        text(&student.medical_condition),
        text(&student.father_name),
        text(&student.mother_name),
        text(&student.guardian_contact),
        text(&student.guardian_email),
        text(&student.guardian_relation),
        student.created_at.to_rfc3339(),
    ]
}

/// 全部学生写成 CSV
pub(crate) fn students_to_csv(students: &[Student]) -> Result<Vec<u8>, SchoolError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(HEADERS)?;
    for student in students {
        wtr.write_record(row(student))?;
    }
    wtr.into_inner()
        .map_err(|e| SchoolError::file_operation(format!("CSV generation failed: {e}")))
}

pub async fn export_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let students = match storage.list_all_students().await {
        Ok(students) => students,
        Err(e) => {
            error!("Student export failed: {}", e);
            return Ok(e.to_response());
        }
    };

    match students_to_csv(&students) {
        Ok(data) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"students.csv\""))
            .body(data)),
        Err(e) => {
            error!("Student export failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::ExportFailed, e.message())))
        }
    }
}
