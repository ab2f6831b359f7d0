//! Server Repository Implementation
//!
//! PostgreSQL implementation of the ServerRepository trait, including the
//! SQL rendition of the server listing filters.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::{Server, ServerQuery, ServerRecord, ServerRepository};
use crate::infrastructure::database::map_write_error;
use crate::shared::error::AppError;

/// Columns selected for a server row; `s` aliases `servers`.
const SERVER_COLUMNS: &str = "s.id, s.name, s.owner_id, s.category_id, s.description, \
     ARRAY(SELECT sm.user_id FROM server_members sm WHERE sm.server_id = s.id ORDER BY sm.user_id) AS members";

/// Database row representation of a server with its members.
#[derive(Debug, sqlx::FromRow)]
struct ServerRow {
    id: i64,
    name: Option<String>,
    owner_id: i64,
    category_id: i64,
    description: Option<String>,
    members: Vec<i64>,
    num_members: Option<i64>,
}

impl ServerRow {
    fn into_record(self) -> ServerRecord {
        ServerRecord {
            server: Server {
                id: self.id,
                name: self.name,
                owner_id: self.owner_id,
                category_id: self.category_id,
                description: self.description,
                members: self.members,
            },
            member_count: self.num_members,
        }
    }

    fn into_server(self) -> Server {
        self.into_record().server
    }
}

/// Build the listing statement for `query`.
///
/// The inner select annotates, filters by id and category, orders by id and
/// truncates; the membership filter is applied by the outer select so that it
/// narrows the already-truncated set.
fn build_list_query(query: &ServerQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT listed.* FROM (SELECT ");
    qb.push(SERVER_COLUMNS);

    if query.with_member_count {
        qb.push(", (SELECT COUNT(*) FROM server_members sm WHERE sm.server_id = s.id) AS num_members");
    } else {
        qb.push(", NULL::BIGINT AS num_members");
    }

    qb.push(" FROM servers s INNER JOIN categories c ON c.id = s.category_id WHERE TRUE");

    if let Some(server_id) = query.server_id {
        qb.push(" AND s.id = ").push_bind(server_id);
    }

    if let Some(category) = &query.category {
        qb.push(" AND (c.name = ").push_bind(category.clone());
        if let Ok(category_id) = category.parse::<i64>() {
            qb.push(" OR c.id = ").push_bind(category_id);
        }
        qb.push(")");
    }

    qb.push(" ORDER BY s.id");

    if let Some(limit) = query.limit {
        qb.push(" LIMIT ").push_bind(limit);
    }

    qb.push(") AS listed");

    if let Some(member_id) = query.member_id {
        qb.push(
            " WHERE EXISTS (SELECT 1 FROM server_members m \
             WHERE m.server_id = listed.id AND m.user_id = ",
        )
        .push_bind(member_id)
        .push(")");
    }

    qb.push(" ORDER BY listed.id");
    qb
}

/// PostgreSQL server repository implementation.
#[derive(Clone)]
pub struct PgServerRepository {
    pool: PgPool,
}

impl PgServerRepository {
    /// Create a new PgServerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServerRepository for PgServerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Server>, AppError> {
        let query = ServerQuery {
            server_id: Some(id),
            ..Default::default()
        };

        let row = build_list_query(&query)
            .build_query_as::<ServerRow>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ServerRow::into_server))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM servers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn list(&self, query: &ServerQuery) -> Result<Vec<ServerRecord>, AppError> {
        let rows = build_list_query(query)
            .build_query_as::<ServerRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = rows.len(), ?query, "Server listing executed");

        Ok(rows.into_iter().map(ServerRow::into_record).collect())
    }

    async fn create(&self, server: &Server) -> Result<Server, AppError> {
        let row = sqlx::query_as::<_, ServerRow>(
            r#"
            INSERT INTO servers (id, name, owner_id, category_id, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, owner_id, category_id, description,
                      ARRAY[]::BIGINT[] AS members, NULL::BIGINT AS num_members
            "#,
        )
        .bind(server.id)
        .bind(&server.name)
        .bind(server.owner_id)
        .bind(server.category_id)
        .bind(&server.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_server())
    }

    async fn update(&self, server: &Server) -> Result<Server, AppError> {
        let row = sqlx::query_as::<_, ServerRow>(
            r#"
            UPDATE servers AS s
            SET name = $2,
                description = $3,
                category_id = $4
            WHERE s.id = $1
            RETURNING s.id, s.name, s.owner_id, s.category_id, s.description,
                      ARRAY(SELECT sm.user_id FROM server_members sm
                            WHERE sm.server_id = s.id ORDER BY sm.user_id) AS members,
                      NULL::BIGINT AS num_members
            "#,
        )
        .bind(server.id)
        .bind(&server.name)
        .bind(&server.description)
        .bind(server.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| AppError::NotFound(format!("Server with id {} not found", server.id)))?;

        Ok(row.into_server())
    }

    async fn delete(&self, id: i64) -> Result<Option<Vec<String>>, AppError> {
        let mut tx = self.pool.begin().await?;

        let orphans = sqlx::query_scalar::<_, String>(
            r#"
            SELECT f.path
            FROM channels ch
            CROSS JOIN LATERAL (VALUES (ch.icon), (ch.banner)) AS f(path)
            WHERE ch.server_id = $1 AND f.path IS NOT NULL
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM servers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(orphans))
    }

    async fn add_member(&self, server_id: i64, user_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO server_members (server_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (server_id, user_id) DO NOTHING
            "#,
        )
        .bind(server_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn remove_member(&self, server_id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM server_members WHERE server_id = $1 AND user_id = $2")
            .bind(server_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
