use crate::models::common::deserialize_string_to_i64;
use serde::Deserialize;

// 指定班级的表单（归档/取消归档/删除/晋级预览）
#[derive(Debug, Deserialize)]
pub struct ClassIdForm {
    #[serde(deserialize_with = "deserialize_string_to_i64")]
    pub class_id: i64,
}

// 创建班级请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub course: String,
    pub class_type: String,
    pub time_slot: String,
    pub location: String,
    #[serde(deserialize_with = "deserialize_string_to_i32")]
    pub year: i32,
}

// 班级搜索参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassSearchQuery {
    #[serde(default)]
    pub q: String,
    pub archived: Option<bool>,
}

/// 确认晋级表单
///
/// `checked` 在表单里重复出现，因此从原始键值对中收集。
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmAdvanceRequest {
    pub class_id: i64,
    pub checked: Vec<i64>,
}

impl ConfirmAdvanceRequest {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, String> {
        let mut class_id = None;
        let mut checked = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "class_id" => {
                    class_id = Some(
                        value
                            .trim()
                            .parse::<i64>()
                            .map_err(|_| format!("Invalid class_id: {value}"))?,
                    );
                }
                "checked" | "checked[]" => {
                    let id = value
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| format!("Invalid student id: {value}"))?;
                    if !checked.contains(&id) {
                        checked.push(id);
                    }
                }
                _ => {}
            }
        }

        let class_id = class_id.ok_or_else(|| "Missing class_id".to_string())?;
        Ok(Self { class_id, checked })
    }
}

fn deserialize_string_to_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let value = deserialize_string_to_i64(deserializer)?;
    i32::try_from(value).map_err(|_| D::Error::custom(format!("year out of range: {value}")))
}
