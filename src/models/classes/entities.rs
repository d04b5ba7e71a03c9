use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    pub id: i64,
    // 课程名称
    pub course: String,
    // 班级类型（PowerUp / Bootcamp / Advanced）
    pub class_type: String,
    // 上课时段
    pub time_slot: String,
    // 校区
    pub location: String,
    pub year: i32,
    pub archived: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 晋级后的目标班级时段
pub const ADVANCED_TIME_SLOT: &str = "All Day";

// 班级类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ClassType {
    PowerUp,
    Bootcamp,
    Advanced,
}

impl ClassType {
    pub const POWER_UP: &'static str = "PowerUp";
    pub const BOOTCAMP: &'static str = "Bootcamp";
    pub const ADVANCED: &'static str = "Advanced";

    pub fn all() -> &'static [&'static str] {
        &[Self::POWER_UP, Self::BOOTCAMP, Self::ADVANCED]
    }
}

impl std::fmt::Display for ClassType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassType::PowerUp => write!(f, "{}", ClassType::POWER_UP),
            ClassType::Bootcamp => write!(f, "{}", ClassType::BOOTCAMP),
            ClassType::Advanced => write!(f, "{}", ClassType::ADVANCED),
        }
    }
}

impl std::str::FromStr for ClassType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ClassType::POWER_UP => Ok(ClassType::PowerUp),
            ClassType::BOOTCAMP => Ok(ClassType::Bootcamp),
            ClassType::ADVANCED => Ok(ClassType::Advanced),
            _ => Err(format!("Invalid class type: {s}")),
        }
    }
}

// 校区
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Location {
    Lisbon,
    Sintra,
    Porto,
}

impl Location {
    pub const LISBON: &'static str = "Lisbon";
    pub const SINTRA: &'static str = "Sintra";
    pub const PORTO: &'static str = "Porto";

    pub fn all() -> &'static [&'static str] {
        &[Self::LISBON, Self::SINTRA, Self::PORTO]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Lisbon => write!(f, "{}", Location::LISBON),
            Location::Sintra => write!(f, "{}", Location::SINTRA),
            Location::Porto => write!(f, "{}", Location::PORTO),
        }
    }
}

impl std::str::FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Location::LISBON => Ok(Location::Lisbon),
            Location::SINTRA => Ok(Location::Sintra),
            Location::PORTO => Ok(Location::Porto),
            _ => Err(format!("Invalid location: {s}")),
        }
    }
}

// 晋级结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdvanceOutcome {
    pub source_class_id: i64,
    pub destination_class_id: i64,
    // 目标班级是否为本次新建
    pub created: bool,
    // 新增的班级学生关联数
    pub linked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_type_roundtrip_names() {
        for name in ClassType::all() {
            let parsed: ClassType = name.parse().expect("known class type");
            assert_eq!(&parsed.to_string(), name);
        }
        assert!("Advance".parse::<ClassType>().is_err());
    }

    #[test]
    fn test_location_is_case_sensitive() {
        assert_eq!("Porto".parse::<Location>(), Ok(Location::Porto));
        assert!("porto".parse::<Location>().is_err());
    }
}
