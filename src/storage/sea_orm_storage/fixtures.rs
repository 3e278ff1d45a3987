//! 演示数据
//!
//! 固定的种子数据集，空库启动时写入。默认的内存库每次启动都会重新生成。

use super::SeaOrmStorage;
use crate::entity::prelude::{Classrooms, Enrollments, Students, Subjects, Teachers};
use crate::errors::{Result, SchoolAdminError};
use crate::models::classrooms::requests::CreateClassroomRequest;
use crate::models::enrollments::{entities::EnrollmentStatus, requests::CreateEnrollmentRequest};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::info;

// (name, description, workload_hours)
const SUBJECTS: &[(&str, &str, Option<i32>)] = &[
    (
        "Mathematics",
        "Algebra, geometry and introductory statistics",
        Some(160),
    ),
    (
        "Portuguese",
        "Grammar, reading comprehension and writing",
        Some(160),
    ),
    ("History", "World and national history", Some(80)),
    ("Biology", "Cells, ecosystems and human body", Some(80)),
    ("Physical Education", "Sports and health practices", None),
];

// (name, email, phone, subject, date_of_birth, address, specialization)
const TEACHERS: &[(&str, &str, &str, &str, &str, &str, Option<&str>)] = &[
    (
        "Helena Duarte",
        "helena.duarte@school.edu",
        "+55 11 3456-7001",
        "Mathematics",
        "1979-04-12",
        "Rua Augusta, 1500, Sao Paulo",
        Some("Statistics"),
    ),
    (
        "Marcos Tavares",
        "marcos.tavares@school.edu",
        "+55 11 3456-7002",
        "Portuguese",
        "1983-09-30",
        "Rua Oscar Freire, 210, Sao Paulo",
        Some("Literature"),
    ),
    (
        "Beatriz Lima",
        "beatriz.lima@school.edu",
        "+55 11 3456-7003",
        "History",
        "1975-01-22",
        "Av. Brigadeiro Faria Lima, 3000, Sao Paulo",
        None,
    ),
    (
        "Rafael Moreira",
        "rafael.moreira@school.edu",
        "+55 11 3456-7004",
        "Biology",
        "1988-07-08",
        "Rua Haddock Lobo, 595, Sao Paulo",
        Some("Ecology"),
    ),
];

// (name, email, date_of_birth, enrollment_number, phone, address)
const STUDENTS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "Ana Souza",
        "ana.souza@student.school.edu",
        "2010-02-14",
        "STU-2024-001",
        "+55 11 98888-1001",
        "Rua Vergueiro, 100",
    ),
    (
        "Bruno Costa",
        "bruno.costa@student.school.edu",
        "2010-06-03",
        "STU-2024-002",
        "+55 11 98888-1002",
        "Rua Domingos de Morais, 45",
    ),
    (
        "Carla Mendes",
        "carla.mendes@student.school.edu",
        "2009-11-21",
        "STU-2024-003",
        "+55 11 98888-1003",
        "Av. Paulista, 900",
    ),
    (
        "Diego Alves",
        "diego.alves@student.school.edu",
        "2011-01-09",
        "STU-2024-004",
        "+55 11 98888-1004",
        "Rua da Consolacao, 250",
    ),
    (
        "Elisa Rocha",
        "elisa.rocha@student.school.edu",
        "2010-08-27",
        "STU-2024-005",
        "+55 11 98888-1005",
        "Rua Teodoro Sampaio, 77",
    ),
    (
        "Felipe Nunes",
        "felipe.nunes@student.school.edu",
        "2009-05-16",
        "STU-2024-006",
        "+55 11 98888-1006",
        "Rua Cardeal Arcoverde, 310",
    ),
    (
        "Gabriela Pinto",
        "gabriela.pinto@student.school.edu",
        "2011-03-30",
        "STU-2024-007",
        "+55 11 98888-1007",
        "Rua Harmonia, 18",
    ),
    (
        "Henrique Dias",
        "henrique.dias@student.school.edu",
        "2010-12-01",
        "STU-2024-008",
        "+55 11 98888-1008",
        "Rua Mourato Coelho, 640",
    ),
];

// (name, capacity, schedule, subject indexes, teacher indexes, class teacher index)
const CLASSROOMS: &[(&str, i32, &str, &[usize], &[usize], Option<usize>)] = &[
    (
        "6th Grade A",
        30,
        "Mon-Fri 07:30-12:00",
        &[0, 1, 2],
        &[0, 1, 2],
        Some(0),
    ),
    (
        "7th Grade B",
        25,
        "Mon-Fri 13:00-17:30",
        &[0, 1, 3],
        &[0, 1, 3],
        Some(1),
    ),
    (
        "Science Lab",
        12,
        "Tue/Thu 14:00-16:00",
        &[3, 4],
        &[3],
        None,
    ),
];

// (student index, classroom index, enrollment_date, status)
const ENROLLMENTS: &[(usize, usize, &str, EnrollmentStatus)] = &[
    (0, 0, "2024-02-05", EnrollmentStatus::Active),
    (1, 0, "2024-02-05", EnrollmentStatus::Active),
    (2, 0, "2024-02-06", EnrollmentStatus::Active),
    (3, 1, "2024-02-05", EnrollmentStatus::Active),
    (4, 1, "2024-02-07", EnrollmentStatus::Pending),
    (5, 1, "2024-02-08", EnrollmentStatus::Cancelled),
    (6, 2, "2024-03-01", EnrollmentStatus::Active),
    (7, 2, "2024-03-04", EnrollmentStatus::Pending),
];

impl SeaOrmStorage {
    /// 业务表全部为空时才写入
    async fn business_tables_empty(&self) -> Result<bool> {
        let db_err = |e: sea_orm::DbErr| {
            SchoolAdminError::database_operation(format!("检查演示数据失败: {e}"))
        };

        Ok(Students::find().count(&self.db).await.map_err(db_err)? == 0
            && Teachers::find().count(&self.db).await.map_err(db_err)? == 0
            && Subjects::find().count(&self.db).await.map_err(db_err)? == 0
            && Classrooms::find().count(&self.db).await.map_err(db_err)? == 0
            && Enrollments::find().count(&self.db).await.map_err(db_err)? == 0)
    }

    /// 写入演示数据
    pub async fn seed_fixtures_impl(&self) -> Result<bool> {
        if !self.business_tables_empty().await? {
            return Ok(false);
        }

        let mut subject_ids = Vec::with_capacity(SUBJECTS.len());
        for (name, description, workload_hours) in SUBJECTS {
            let subject = self
                .create_subject_impl(CreateSubjectRequest {
                    name: name.to_string(),
                    description: description.to_string(),
                    workload_hours: *workload_hours,
                })
                .await?;
            subject_ids.push(subject.id);
        }

        let mut teacher_ids = Vec::with_capacity(TEACHERS.len());
        for (name, email, phone, subject, date_of_birth, address, specialization) in TEACHERS {
            let teacher = self
                .create_teacher_impl(CreateTeacherRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    subject: subject.to_string(),
                    date_of_birth: date_of_birth.to_string(),
                    address: address.to_string(),
                    specialization: specialization.map(str::to_string),
                })
                .await?;
            teacher_ids.push(teacher.id);
        }

        let mut student_ids = Vec::with_capacity(STUDENTS.len());
        for (name, email, date_of_birth, enrollment_number, phone, address) in STUDENTS {
            let student = self
                .create_student_impl(CreateStudentRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    date_of_birth: date_of_birth.to_string(),
                    enrollment_number: enrollment_number.to_string(),
                    phone: phone.to_string(),
                    address: address.to_string(),
                })
                .await?;
            student_ids.push(student.id);
        }

        let mut classroom_ids = Vec::with_capacity(CLASSROOMS.len());
        for (name, capacity, schedule, subjects, teachers, class_teacher) in CLASSROOMS {
            let classroom = self
                .create_classroom_impl(CreateClassroomRequest {
                    name: name.to_string(),
                    capacity: *capacity,
                    schedule: schedule.to_string(),
                    subjects: subjects.iter().map(|&i| subject_ids[i]).collect(),
                    teachers: teachers.iter().map(|&i| teacher_ids[i]).collect(),
                    class_teacher_id: class_teacher.map(|i| teacher_ids[i]),
                })
                .await?;
            classroom_ids.push(classroom.id);
        }

        for (student, classroom, enrollment_date, status) in ENROLLMENTS {
            self.create_enrollment_impl(CreateEnrollmentRequest {
                student_id: student_ids[*student],
                classroom_id: classroom_ids[*classroom],
                enrollment_date: enrollment_date.to_string(),
                status: *status,
            })
            .await?;
        }

        info!(
            "演示数据写入完成: {} 个科目, {} 名教师, {} 名学生, {} 间教室, {} 条选课记录",
            SUBJECTS.len(),
            TEACHERS.len(),
            STUDENTS.len(),
            CLASSROOMS.len(),
            ENROLLMENTS.len()
        );

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classrooms::requests::{MAX_CAPACITY, MIN_CAPACITY};

    #[test]
    fn test_fixture_references_are_in_bounds() {
        for (_, capacity, _, subjects, teachers, class_teacher) in CLASSROOMS {
            assert!((MIN_CAPACITY..=MAX_CAPACITY).contains(capacity));
            assert!(subjects.iter().all(|&i| i < SUBJECTS.len()));
            assert!(teachers.iter().all(|&i| i < TEACHERS.len()));
            assert!(class_teacher.is_none_or(|i| i < TEACHERS.len()));
        }
        for (student, classroom, _, _) in ENROLLMENTS {
            assert!(*student < STUDENTS.len());
            assert!(*classroom < CLASSROOMS.len());
        }
    }

    #[test]
    fn test_fixture_active_enrollments_fit_capacity() {
        for (index, (_, capacity, ..)) in CLASSROOMS.iter().enumerate() {
            let active = ENROLLMENTS
                .iter()
                .filter(|(_, c, _, s)| *c == index && *s == EnrollmentStatus::Active)
                .count();
            assert!(active as i32 <= *capacity);
        }
    }

    #[tokio::test]
    async fn test_seed_once() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        assert!(storage.seed_fixtures_impl().await.unwrap());
        assert!(!storage.seed_fixtures_impl().await.unwrap());

        let stats = storage.dashboard_stats_impl().await.unwrap();
        assert_eq!(stats.subjects, 5);
        assert_eq!(stats.teachers, 4);
        assert_eq!(stats.students, 8);
        assert_eq!(stats.classrooms, 3);
        assert_eq!(stats.enrollments.total, 8);
        assert_eq!(stats.enrollments.active, 5);
        assert_eq!(stats.enrollments.pending, 2);
        assert_eq!(stats.enrollments.cancelled, 1);
    }
}
