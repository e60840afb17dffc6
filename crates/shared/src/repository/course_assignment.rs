use crate::{
    abstract_trait::CourseAssignmentRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::CourseAssignment,
};
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct CourseAssignmentRepository {
    db: ConnectionPool,
}

impl CourseAssignmentRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseAssignmentRepositoryTrait for CourseAssignmentRepository {
    async fn find_by_supervisor(
        &self,
        supervisor_id: i32,
        limit: i64,
    ) -> Result<Vec<CourseAssignment>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, CourseAssignment>(
            r#"
            SELECT a.id, a.supervisor_id, a.course_id, c.name AS course_name, a.assigned_at
            FROM course_assignments a
            JOIN courses c ON c.id = a.course_id
            WHERE a.supervisor_id = $1
            ORDER BY a.assigned_at DESC, a.id DESC
            LIMIT $2
            "#,
        )
        .bind(supervisor_id)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch course assignments for {supervisor_id}: {:?}", e);
            RepositoryError::from(e)
        })
    }
}
