pub mod create;
pub mod delete;
pub mod form;
pub mod import;
pub mod roster;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::requests::{AddStudentForm, EditStudentForm, StudentRefForm};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 班级花名册
    pub async fn roster(
        &self,
        request: &HttpRequest,
        class_id: i64,
        page: i64,
    ) -> ActixResult<HttpResponse> {
        roster::roster(self, request, class_id, page, "Students retrieved successfully").await
    }

    // 添加学生表单的上下文
    pub async fn add_form(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        form::add_form(self, request, class_id).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        form: AddStudentForm,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, form).await
    }

    // 编辑学生表单的上下文
    pub async fn edit_form(
        &self,
        request: &HttpRequest,
        form: StudentRefForm,
    ) -> ActixResult<HttpResponse> {
        form::edit_form(self, request, form).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        form: EditStudentForm,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, form).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        form: StudentRefForm,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, form).await
    }

    // 从 CSV 导入学生
    pub async fn import_students(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        import::import_students(self, request, payload).await
    }
}
