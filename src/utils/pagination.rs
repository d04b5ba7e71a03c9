//! 列表分页
//!
//! 班级、归档班级和学生花名册共用同一个分页函数。

use crate::models::{PaginatedResponse, PaginationInfo};

/// 计算总页数：`ceil(len / size)`
pub fn total_pages(len: usize, size: usize) -> usize {
    let size = size.max(1);
    len.div_ceil(size)
}

/// 对有序列表分页
///
/// - 页码从 1 开始，小于 1 时按第 1 页处理
/// - 超出总页数时返回空页，不报错
/// - `size` 至少为 1
pub fn paginate<T>(items: Vec<T>, page: i64, size: usize) -> PaginatedResponse<T> {
    let size = size.max(1);
    let total = items.len();
    let pages = total_pages(total, size);
    let page = page.max(1);

    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(size))
        .unwrap_or(usize::MAX);

    let items: Vec<T> = if start >= total {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(size).collect()
    };

    PaginatedResponse {
        items,
        pagination: PaginationInfo {
            page,
            page_size: size as i64,
            total: total as i64,
            total_pages: pages as i64,
        },
    }
}
