use serde::{Deserialize, Serialize};

// 分页查询参数（页大小由配置决定）
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
}

impl PaginationQuery {
    /// 将请求页码收敛到 `[1, max(total_pages, 1)]`
    pub fn clamp_to(&self, total_pages: usize) -> i64 {
        let last = total_pages.max(1) as i64;
        self.page.clamp(1, last)
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

// 自定义反序列化函数，支持字符串到i64的转换
pub fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_bounds() {
        let query = PaginationQuery { page: 0 };
        assert_eq!(query.clamp_to(3), 1);

        let query = PaginationQuery { page: -4 };
        assert_eq!(query.clamp_to(3), 1);

        let query = PaginationQuery { page: 9 };
        assert_eq!(query.clamp_to(3), 3);

        // 空列表仍然停留在第一页
        let query = PaginationQuery { page: 2 };
        assert_eq!(query.clamp_to(0), 1);
    }

    #[test]
    fn test_page_from_query_string() {
        let query: PaginationQuery = parse_query("page=2");
        assert_eq!(query.page, 2);

        let query: PaginationQuery = parse_query("");
        assert_eq!(query.page, 1);
    }

    fn parse_query(raw: &str) -> PaginationQuery {
        actix_web::web::Query::<PaginationQuery>::from_query(raw)
            .expect("valid query")
            .into_inner()
    }
}
