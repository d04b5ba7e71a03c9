pub mod advance;
pub mod archive;
pub mod create;
pub mod delete;
pub mod list;
pub mod search;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::classes::requests::{
    ClassSearchQuery, ConfirmAdvanceRequest, CreateClassRequest,
};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    pub(crate) fn page_size(&self) -> usize {
        AppConfig::get().pagination.class_page_size
    }

    // 进行中 / 已归档的班级列表
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        archived: bool,
        page: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, archived, page, "Classes retrieved successfully").await
    }

    // 归档或取消归档
    pub async fn set_archived(
        &self,
        request: &HttpRequest,
        class_id: i64,
        archived: bool,
    ) -> ActixResult<HttpResponse> {
        archive::set_archived(self, request, class_id, archived).await
    }

    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    pub async fn search_classes(
        &self,
        request: &HttpRequest,
        query: ClassSearchQuery,
    ) -> ActixResult<HttpResponse> {
        search::search_classes(self, request, query).await
    }

    // 晋级预览（目标班级 + 可勾选学生）
    pub async fn advance_preview(
        &self,
        request: &HttpRequest,
        class_id: i64,
        page: i64,
    ) -> ActixResult<HttpResponse> {
        advance::advance_preview(self, request, class_id, page).await
    }

    pub async fn confirm_advance(
        &self,
        request: &HttpRequest,
        advance: ConfirmAdvanceRequest,
    ) -> ActixResult<HttpResponse> {
        advance::confirm_advance(self, request, advance).await
    }
}
