use serde::Serialize;

/// 业务错误码
///
/// 0 为成功，其余按模块分段：1xxx 通用/认证，2xxx 班级，3xxx 学生，4xxx 导入，5xxx 服务端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    AuthFailed = 1002,
    IncorrectPassword = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1005,

    ClassNotFound = 2000,
    ClassCreationFailed = 2001,
    ClassUpdateFailed = 2002,
    ClassDeleteFailed = 2003,
    ClassAdvanceFailed = 2004,
    ClassInvalid = 2005,

    StudentNotFound = 3000,
    StudentCreationFailed = 3001,
    StudentUpdateFailed = 3002,
    StudentDeleteFailed = 3003,
    StudentEmailAlreadyExists = 3004,
    StudentEmailInvalid = 3005,
    StudentPhoneInvalid = 3006,
    StudentFieldMissing = 3007,

    ImportFileParseFailed = 4000,
    ImportFileMissingColumn = 4001,
    ImportFileDataInvalid = 4002,
    FileUploadFailed = 4003,

    InternalServerError = 5000,
    DatabaseError = 5001,
}
