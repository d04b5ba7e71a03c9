use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Class::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Class::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Class::Course).string().not_null())
                    .col(ColumnDef::new(Class::ClassType).string().not_null())
                    .col(ColumnDef::new(Class::TimeSlot).string().not_null())
                    .col(ColumnDef::new(Class::Location).string().not_null())
                    .col(ColumnDef::new(Class::Year).integer().not_null())
                    .col(
                        ColumnDef::new(Class::Archived)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Class::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Class::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建教师表
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teacher::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teacher::Name).string().not_null())
                    .col(
                        ColumnDef::new(Teacher::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teacher::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Teacher::ClassId).big_integer().null())
                    .col(ColumnDef::new(Teacher::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teacher::Table, Teacher::ClassId)
                            .to(Class::Table, Class::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Student::Name).string().not_null())
                    .col(
                        ColumnDef::new(Student::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Student::Phone).string().not_null())
                    .col(ColumnDef::new(Student::Location).string().not_null())
                    .col(ColumnDef::new(Student::Course).string().not_null())
                    .col(ColumnDef::new(Student::ClassType).string().not_null())
                    .col(ColumnDef::new(Student::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Student::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级学生关联表
        manager
            .create_table(
                Table::create()
                    .table(ClassStudent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassStudent::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassStudent::ClassId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClassStudent::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassStudent::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassStudent::Table, ClassStudent::ClassId)
                            .to(Class::Table, Class::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassStudent::Table, ClassStudent::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班级教师关联表
        manager
            .create_table(
                Table::create()
                    .table(ClassTeacher::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassTeacher::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassTeacher::ClassId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClassTeacher::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassTeacher::Table, ClassTeacher::ClassId)
                            .to(Class::Table, Class::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassTeacher::Table, ClassTeacher::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 班级表索引（晋级时按课程/地点/年份/类型查找目标班级）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_cohort")
                    .table(Class::Table)
                    .col(Class::Course)
                    .col(Class::Location)
                    .col(Class::Year)
                    .col(Class::ClassType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_archived")
                    .table(Class::Table)
                    .col(Class::Archived)
                    .to_owned(),
            )
            .await?;

        // 关联表唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_class_student_unique")
                    .table(ClassStudent::Table)
                    .col(ClassStudent::ClassId)
                    .col(ClassStudent::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_student_student_id")
                    .table(ClassStudent::Table)
                    .col(ClassStudent::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_class_teacher_unique")
                    .table(ClassTeacher::Table)
                    .col(ClassTeacher::ClassId)
                    .col(ClassTeacher::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ClassTeacher::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassStudent::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Class::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Teacher {
    #[sea_orm(iden = "teacher")]
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    ClassId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Class {
    #[sea_orm(iden = "class")]
    Table,
    Id,
    Course,
    ClassType,
    TimeSlot,
    Location,
    Year,
    Archived,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Student {
    #[sea_orm(iden = "student")]
    Table,
    Id,
    Name,
    Email,
    Phone,
    Location,
    Course,
    ClassType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassStudent {
    #[sea_orm(iden = "class_student")]
    Table,
    Id,
    ClassId,
    StudentId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum ClassTeacher {
    #[sea_orm(iden = "class_teacher")]
    Table,
    Id,
    ClassId,
    TeacherId,
}
