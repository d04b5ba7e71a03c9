//! 预导入模块，方便使用

pub use super::class::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::class_student::{
    ActiveModel as ClassStudentActiveModel, Entity as ClassStudents, Model as ClassStudentModel,
};
pub use super::class_teacher::{
    ActiveModel as ClassTeacherActiveModel, Entity as ClassTeachers, Model as ClassTeacherModel,
};
pub use super::student::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teacher::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
