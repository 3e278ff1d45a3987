//! 预导入模块，方便使用

pub use super::classroom_subjects::{
    ActiveModel as ClassroomSubjectActiveModel, Entity as ClassroomSubjects,
    Model as ClassroomSubjectModel,
};
pub use super::classroom_teachers::{
    ActiveModel as ClassroomTeacherActiveModel, Entity as ClassroomTeachers,
    Model as ClassroomTeacherModel,
};
pub use super::classrooms::{
    ActiveModel as ClassroomActiveModel, Entity as Classrooms, Model as ClassroomModel,
};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
