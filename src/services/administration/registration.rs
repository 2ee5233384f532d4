//! 区教育官员、学校管理员与督导的账号注册
//!
//! 账号、职员档案与分配关系由存储层在同一事务内写入，任一步失败均不留下账号。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AdministrationService, bad_request};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    administration::{
        RegisterSchoolManagerRequest, RegisterSupervisorRequest, RegisterWeredaOfficerRequest,
        RegistrationResponse,
    },
    staff::NewStaffProfile,
    users::{NewUser, User, UserRole},
};
use crate::storage::Storage;
use crate::utils::accounts::{default_password, manager_password, manager_username};
use crate::utils::password::hash_password;
use crate::utils::validate::{require_non_blank, validate_email, validate_national_id};

/// 注册申请中的个人信息
struct Applicant<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: Option<&'a str>,
    national_id: Option<&'a str>,
}

impl Applicant<'_> {
    fn validate(&self) -> Result<(), (ErrorCode, String)> {
        require_non_blank(self.first_name, "first_name")
            .and_then(|_| require_non_blank(self.last_name, "last_name"))
            .map_err(|msg| (ErrorCode::ValidationFailed, msg))?;
        if let Some(email) = self.email {
            validate_email(email).map_err(|msg| (ErrorCode::UserEmailInvalid, msg.to_string()))?;
        }
        if let Some(national_id) = self.national_id {
            validate_national_id(national_id)
                .map_err(|msg| (ErrorCode::ValidationFailed, msg.to_string()))?;
        }
        Ok(())
    }

    fn into_new_user(
        self,
        role: UserRole,
        username: String,
        password: &str,
    ) -> Result<NewUser, crate::errors::SchoolError> {
        Ok(NewUser {
            username,
            email: self.email.map(str::to_string),
            password_hash: hash_password(password)?,
            role,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            national_id: self.national_id.map(str::to_string),
        })
    }
}

/// 校验申请人并检查身份证号占用
async fn check_applicant(
    storage: &dyn Storage,
    applicant: &Applicant<'_>,
) -> Result<(), HttpResponse> {
    if let Err((code, msg)) = applicant.validate() {
        return Err(bad_request(code, msg));
    }
    if let Some(national_id) = applicant.national_id {
        match storage.national_id_exists(national_id, None).await {
            Ok(true) => {
                return Err(bad_request(
                    ErrorCode::NationalIdAlreadyExists,
                    "National ID is already registered",
                ));
            }
            Ok(false) => {}
            Err(e) => return Err(e.to_response()),
        }
    }
    Ok(())
}

fn registered(user: User, password: String, assigned_ids: Vec<i64>, message: &str) -> HttpResponse {
    tracing::info!(
        "Registered {} account {} ({} assignment(s))",
        user.role.as_str(),
        user.username,
        assigned_ids.len()
    );
    HttpResponse::Created().json(ApiResponse::success(
        RegistrationResponse {
            username: user.username.clone(),
            user,
            password,
            assigned_ids,
        },
        message,
    ))
}

impl AdministrationService {
    /// 区教育官员：角色 wereda_office，并成为该区负责人
    pub async fn register_wereda_officer(
        &self,
        req: RegisterWeredaOfficerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let applicant = Applicant {
            first_name: &req.first_name,
            last_name: &req.last_name,
            email: req.email.as_deref(),
            national_id: req.national_id.as_deref(),
        };
        if let Err(response) = check_applicant(storage.as_ref(), &applicant).await {
            return Ok(response);
        }

        let suffix = &AppConfig::get().accounts.default_password_suffix;
        let password = default_password(&req.last_name, "Manager", suffix);
        // 用户名依赖事务内新分配的职员编号，由存储层生成
        let user = match applicant.into_new_user(UserRole::WeredaOffice, String::new(), &password)
        {
            Ok(user) => user,
            Err(e) => return Ok(e.to_response()),
        };
        let profile = NewStaffProfile::for_department("Wereda Office", req.phone.clone());

        match storage
            .register_wereda_officer(user, profile, req.wereda_id)
            .await
        {
            Ok(user) => Ok(registered(
                user,
                password,
                vec![req.wereda_id],
                "Wereda officer registered successfully",
            )),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 学校管理员：角色 school，学校不存在时整体失败
    pub async fn register_school_manager(
        &self,
        req: RegisterSchoolManagerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let applicant = Applicant {
            first_name: &req.first_name,
            last_name: &req.last_name,
            email: req.email.as_deref(),
            national_id: req.national_id.as_deref(),
        };
        if let Err(response) = check_applicant(storage.as_ref(), &applicant).await {
            return Ok(response);
        }

        let suffix = &AppConfig::get().accounts.default_password_suffix;
        let password = manager_password(&req.last_name, suffix);
        let username = manager_username(&req.first_name, &req.last_name);
        let user = match applicant.into_new_user(UserRole::School, username, &password) {
            Ok(user) => user,
            Err(e) => return Ok(e.to_response()),
        };
        let profile = NewStaffProfile::for_department("Administration", req.phone.clone());

        match storage
            .register_school_manager(user, profile, req.school_id)
            .await
        {
            Ok(user) => Ok(registered(
                user,
                password,
                vec![req.school_id],
                "School manager registered successfully",
            )),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 督导：角色 senate，分配到所列学校中实际存在的那些
    pub async fn register_supervisor(
        &self,
        req: RegisterSupervisorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if req.school_ids.is_empty() {
            return Ok(bad_request(
                ErrorCode::ValidationFailed,
                "At least one school must be assigned",
            ));
        }
        let storage = self.get_storage(request);
        let applicant = Applicant {
            first_name: &req.first_name,
            last_name: &req.last_name,
            email: req.email.as_deref(),
            national_id: req.national_id.as_deref(),
        };
        if let Err(response) = check_applicant(storage.as_ref(), &applicant).await {
            return Ok(response);
        }

        let suffix = &AppConfig::get().accounts.default_password_suffix;
        let password = manager_password(&req.last_name, suffix);
        let username = manager_username(&req.first_name, &req.last_name);
        let user = match applicant.into_new_user(UserRole::Senate, username, &password) {
            Ok(user) => user,
            Err(e) => return Ok(e.to_response()),
        };
        let profile = NewStaffProfile::for_department("Supervision", req.phone.clone());

        match storage
            .register_supervisor(user, profile, &req.school_ids)
            .await
        {
            Ok((user, assigned)) => Ok(registered(
                user,
                password,
                assigned,
                "Supervisor registered successfully",
            )),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicant_validation() {
        let applicant = Applicant {
            first_name: "Abebe",
            last_name: " ",
            email: None,
            national_id: None,
        };
        let (code, msg) = applicant.validate().unwrap_err();
        assert_eq!(code, ErrorCode::ValidationFailed);
        assert_eq!(msg, "last_name is required");

        let applicant = Applicant {
            first_name: "Abebe",
            last_name: "Bikila",
            email: Some("not-an-email"),
            national_id: None,
        };
        assert_eq!(applicant.validate().unwrap_err().0, ErrorCode::UserEmailInvalid);
    }
}
