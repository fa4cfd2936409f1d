use registrar_application::audit::TracingAuditSink;
use registrar_application::config::RetryConfig;
use registrar_application::context::AppContext;
use registrar_application::dispatcher::Dispatcher;
use registrar_application::students::{
    EditPersonalInfoCommand, EnrollCommand, GetListQuery, RegisterCommand,
    register_student_operations,
};
use registrar_domain::course::{Course, CourseId};
use registrar_domain::persist::InMemorySessionFactory;
use registrar_domain::student::StudentId;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let factory = Arc::new(InMemorySessionFactory::new());
    factory
        .seed_course(Course::new(CourseId::new(1), "Calculus", 4))
        .await;
    factory
        .seed_course(Course::new(CourseId::new(2), "History", 3))
        .await;

    let dispatcher = Dispatcher::new(RetryConfig::new(3), Arc::new(TracingAuditSink));
    register_student_operations(&dispatcher, factory.clone())?;

    let ctx = AppContext::builder()
        .maybe_correlation_id(Some("cor-1".into()))
        .maybe_actor(Some("registrar-office".into()))
        .build();

    dispatcher
        .dispatch_command(
            &ctx,
            RegisterCommand {
                id: StudentId::new(1),
                name: "Alice".into(),
                email: "alice@example.com".into(),
            },
        )
        .await?;

    dispatcher
        .dispatch_command(
            &ctx,
            EnrollCommand {
                id: StudentId::new(1),
                course: "Calculus".into(),
                grade: "A".into(),
            },
        )
        .await?;

    dispatcher
        .dispatch_command(
            &ctx,
            EditPersonalInfoCommand {
                id: StudentId::new(1),
                name: "Alice Cooper".into(),
                email: "alice.cooper@example.com".into(),
            },
        )
        .await?;

    // 未注册的学生 -> 普通业务失败,不触发重试
    if let Err(err) = dispatcher
        .dispatch_command(
            &ctx,
            EditPersonalInfoCommand {
                id: StudentId::new(999),
                name: "Nobody".into(),
                email: "nobody@example.com".into(),
            },
        )
        .await
    {
        eprintln!("expected failure: {err}");
    }

    let students = dispatcher
        .dispatch_query(&ctx, GetListQuery::default())
        .await?;
    println!("{}", serde_json::to_string_pretty(&students)?);

    Ok(())
}
