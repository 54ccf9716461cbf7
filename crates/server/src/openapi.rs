use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub message: String }

#[derive(ToSchema)]
pub struct StudentInputDoc {
    /// 1-100 characters after trimming
    pub name: String,
    /// 1-20 characters after trimming
    pub class: String,
    /// 0-100
    pub marks: i64,
}

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: String,
    pub name: String,
    pub class: String,
    pub marks: i64,
}

#[derive(ToSchema)]
pub struct OutcomeDoc {
    pub success: bool,
    pub message: String,
    pub data: Option<StudentDoc>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Management Backend API", description = "CRUD over in-memory student records."),
    paths(
        crate::routes::health,
        crate::routes::students::list_students,
        crate::routes::students::create_student,
        crate::routes::students::get_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            StudentInputDoc,
            StudentDoc,
            OutcomeDoc,
        )
    ),
    tags(
        (name = "Health"),
        (name = "Students", description = "Operations related to students")
    )
)]
pub struct ApiDoc;
