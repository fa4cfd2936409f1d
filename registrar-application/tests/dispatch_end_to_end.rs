use registrar_application::audit::MemoryAuditSink;
use registrar_application::config::RetryConfig;
use registrar_application::context::AppContext;
use registrar_application::dispatcher::Dispatcher;
use registrar_application::students::{
    DisenrollCommand, EditPersonalInfoCommand, EnrollCommand, GetListQuery, RegisterCommand,
    TransferCommand, UnregisterCommand, register_student_operations,
};
use registrar_domain::course::{Course, CourseId};
use registrar_domain::error::DomainError;
use registrar_domain::persist::InMemorySessionFactory;
use registrar_domain::student::{Student, StudentId};
use std::sync::Arc;

fn setup() -> (Arc<InMemorySessionFactory>, Arc<MemoryAuditSink>, Dispatcher) {
    let factory = Arc::new(InMemorySessionFactory::new());
    let sink = Arc::new(MemoryAuditSink::new());
    let dispatcher = Dispatcher::new(RetryConfig::new(3), sink.clone());
    register_student_operations(&dispatcher, factory.clone()).unwrap();
    (factory, sink, dispatcher)
}

async fn seed_bob(factory: &InMemorySessionFactory, id: i64) {
    factory
        .seed_student(Student::new(StudentId::new(id), "Bob", "bob@example.com").unwrap())
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn edit_personal_info_persists_on_commit() {
    let (factory, sink, dispatcher) = setup();
    seed_bob(&factory, 1).await;

    let ctx = AppContext::default();
    dispatcher
        .dispatch_command(
            &ctx,
            EditPersonalInfoCommand {
                id: StudentId::new(1),
                name: "A".into(),
                email: "a@x.com".into(),
            },
        )
        .await
        .unwrap();

    let stored = factory.student(StudentId::new(1)).await.unwrap();
    assert_eq!(stored.name(), "A");
    assert_eq!(stored.email(), "a@x.com");

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].operation, "student.edit_personal_info");
    assert!(records[0].outcome.is_success());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn edit_personal_info_for_missing_student_fails_without_retry() {
    let (factory, sink, dispatcher) = setup();

    let ctx = AppContext::default();
    let err = dispatcher
        .dispatch_command(
            &ctx,
            EditPersonalInfoCommand {
                id: StudentId::new(999),
                name: "A".into(),
                email: "a@x.com".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No student found for Id 999");
    // 普通业务失败不消耗额外尝试
    assert_eq!(factory.sessions_opened(), 1);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert!(!records[0].outcome.is_success());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unregister_succeeds_on_the_third_attempt() {
    let (factory, sink, dispatcher) = setup();
    seed_bob(&factory, 5).await;
    for _ in 0..2 {
        factory
            .push_commit_fault(DomainError::Timeout {
                reason: "commit exceeded deadline".into(),
            })
            .await;
    }

    let ctx = AppContext::default();
    dispatcher
        .dispatch_command(
            &ctx,
            UnregisterCommand {
                id: StudentId::new(5),
            },
        )
        .await
        .unwrap();

    // 每次尝试一个全新会话,共三次
    assert_eq!(factory.sessions_opened(), 3);
    assert!(factory.student(StudentId::new(5)).await.is_none());

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert!(records[0].outcome.is_success());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn exhausted_transient_faults_report_the_attempt_count() {
    let (factory, sink, dispatcher) = setup();
    seed_bob(&factory, 5).await;
    for _ in 0..3 {
        factory
            .push_commit_fault(DomainError::ConnectionLost {
                reason: "socket closed".into(),
            })
            .await;
    }

    let ctx = AppContext::default();
    let err = dispatcher
        .dispatch_command(
            &ctx,
            UnregisterCommand {
                id: StudentId::new(5),
            },
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("3 attempts"));
    assert_eq!(factory.sessions_opened(), 3);
    // 未提交成功,学生仍在
    assert!(factory.student(StudentId::new(5)).await.is_some());
    assert_eq!(sink.records().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn register_duplicate_id_is_a_permanent_failure() {
    let (factory, sink, dispatcher) = setup();
    seed_bob(&factory, 1).await;

    let ctx = AppContext::default();
    let err = dispatcher
        .dispatch_command(
            &ctx,
            RegisterCommand {
                id: StudentId::new(1),
                name: "Eve".into(),
                email: "eve@example.com".into(),
            },
        )
        .await
        .unwrap_err();

    // 约束冲突不重试
    assert!(err.to_string().contains("already exists"));
    assert_eq!(factory.sessions_opened(), 1);
    assert_eq!(sink.records().len(), 1);
    // 原有记录不受影响
    assert_eq!(
        factory.student(StudentId::new(1)).await.unwrap().name(),
        "Bob"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn enrollment_lifecycle_end_to_end() {
    let (factory, _sink, dispatcher) = setup();
    factory
        .seed_course(Course::new(CourseId::new(1), "Calculus", 4))
        .await;
    factory
        .seed_course(Course::new(CourseId::new(2), "History", 3))
        .await;
    factory
        .seed_course(Course::new(CourseId::new(3), "Chemistry", 3))
        .await;

    let ctx = AppContext::default();
    dispatcher
        .dispatch_command(
            &ctx,
            RegisterCommand {
                id: StudentId::new(1),
                name: "Alice".into(),
                email: "alice@example.com".into(),
            },
        )
        .await
        .unwrap();

    for (course, grade) in [("Calculus", "A"), ("History", "B")] {
        dispatcher
            .dispatch_command(
                &ctx,
                EnrollCommand {
                    id: StudentId::new(1),
                    course: course.into(),
                    grade: grade.into(),
                },
            )
            .await
            .unwrap();
    }

    // 转课:第二门从 History 换到 Chemistry
    dispatcher
        .dispatch_command(
            &ctx,
            TransferCommand {
                id: StudentId::new(1),
                enrollment_number: 2,
                course: "Chemistry".into(),
                grade: "C".into(),
            },
        )
        .await
        .unwrap();

    let dtos = dispatcher
        .dispatch_query(&ctx, GetListQuery::default())
        .await
        .unwrap();
    assert_eq!(dtos.len(), 1);
    assert_eq!(dtos[0].course1.as_deref(), Some("Calculus"));
    assert_eq!(dtos[0].course2.as_deref(), Some("Chemistry"));
    assert_eq!(dtos[0].course2_grade.as_deref(), Some("C"));
    assert_eq!(dtos[0].course2_credits, Some(3));

    // 退课后第一槽位顺延
    dispatcher
        .dispatch_command(
            &ctx,
            DisenrollCommand {
                id: StudentId::new(1),
                enrollment_number: 1,
                comment: "dropped by advisor".into(),
            },
        )
        .await
        .unwrap();

    let stored = factory.student(StudentId::new(1)).await.unwrap();
    assert_eq!(stored.enrollments().len(), 1);
    assert_eq!(stored.enrollment(1).unwrap().course().name(), "Chemistry");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn enroll_rejects_unknown_course_and_grade() {
    let (factory, _sink, dispatcher) = setup();
    seed_bob(&factory, 1).await;

    let ctx = AppContext::default();
    let err = dispatcher
        .dispatch_command(
            &ctx,
            EnrollCommand {
                id: StudentId::new(1),
                course: "Alchemy".into(),
                grade: "A".into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Course is incorrect: 'Alchemy'");

    let err = dispatcher
        .dispatch_command(
            &ctx,
            EnrollCommand {
                id: StudentId::new(1),
                course: "Calculus".into(),
                grade: "E".into(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Grade is incorrect: 'E'");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn disenroll_requires_a_comment() {
    let (factory, sink, dispatcher) = setup();
    seed_bob(&factory, 1).await;

    let ctx = AppContext::default();
    let err = dispatcher
        .dispatch_command(
            &ctx,
            DisenrollCommand {
                id: StudentId::new(1),
                enrollment_number: 1,
                comment: "  ".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Disenrollment comment is required");
    // 校验先行,未触达存储
    assert_eq!(factory.sessions_opened(), 0);
    assert_eq!(sink.records().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn get_list_filters_by_course_and_enrollment_count() {
    let (factory, _sink, dispatcher) = setup();
    factory
        .seed_course(Course::new(CourseId::new(1), "Calculus", 4))
        .await;
    factory
        .seed_course(Course::new(CourseId::new(2), "History", 3))
        .await;

    let ctx = AppContext::default();
    for (id, name) in [(1, "Alice"), (2, "Bob"), (3, "Carol")] {
        dispatcher
            .dispatch_command(
                &ctx,
                RegisterCommand {
                    id: StudentId::new(id),
                    name: name.into(),
                    email: format!("{}@example.com", name.to_lowercase()),
                },
            )
            .await
            .unwrap();
    }
    // Alice: 两门;Bob: 一门;Carol: 零门
    for (id, course) in [(1, "Calculus"), (1, "History"), (2, "Calculus")] {
        dispatcher
            .dispatch_command(
                &ctx,
                EnrollCommand {
                    id: StudentId::new(id),
                    course: course.into(),
                    grade: "A".into(),
                },
            )
            .await
            .unwrap();
    }

    let calculus = dispatcher
        .dispatch_query(
            &ctx,
            GetListQuery {
                enrolled_in: Some("Calculus".into()),
                number_of_courses: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(
        calculus.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![1, 2]
    );

    let two_courses = dispatcher
        .dispatch_query(
            &ctx,
            GetListQuery {
                enrolled_in: None,
                number_of_courses: Some(2),
            },
        )
        .await
        .unwrap();
    assert_eq!(two_courses.len(), 1);
    assert_eq!(two_courses[0].name, "Alice");

    let all = dispatcher
        .dispatch_query(&ctx, GetListQuery::default())
        .await
        .unwrap();
    assert_eq!(all.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}
