use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::rental::errors::RentalError;
use crate::domain::rental::models::Price;
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::RentalName;
use crate::domain::rental::models::RentalPicture;
use crate::domain::rental::models::Surface;
use crate::domain::rental::ports::RentalRepository;
use crate::domain::user::models::UserId;

pub struct PostgresRentalRepository {
    pool: PgPool,
}

impl PostgresRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Picture bytes never travel with this row; the delivery endpoint loads
// them through `find_picture`.
#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    surface: f64,
    price: f64,
    description: String,
    has_picture: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const RENTAL_COLUMNS: &str = r#"
    id, owner_id, name, surface, price, description,
    (picture IS NOT NULL) AS has_picture, created_at, updated_at
"#;

impl RentalRow {
    fn try_into_rental(self) -> Result<Rental, RentalError> {
        Ok(Rental {
            id: RentalId(self.id),
            owner_id: UserId(self.owner_id),
            name: RentalName::new(self.name)?,
            surface: Surface::new(self.surface)?,
            price: Price::new(self.price)?,
            description: self.description,
            has_picture: self.has_picture,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PictureRow {
    picture: Vec<u8>,
    picture_content_type: String,
    picture_filename: String,
}

#[async_trait]
impl RentalRepository for PostgresRentalRepository {
    async fn create(
        &self,
        rental: Rental,
        picture: Option<RentalPicture>,
    ) -> Result<Rental, RentalError> {
        let (bytes, content_type, filename, size) = match &picture {
            Some(picture) => (
                Some(picture.bytes.as_slice()),
                Some(picture.content_type.as_str()),
                Some(picture.filename.as_str()),
                Some(picture.size() as i64),
            ),
            None => (None, None, None, None),
        };

        sqlx::query(
            r#"
            INSERT INTO rentals (
                id, owner_id, name, surface, price, description,
                picture, picture_content_type, picture_filename, picture_size,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(rental.id.0)
        .bind(rental.owner_id.0)
        .bind(rental.name.as_str())
        .bind(rental.surface.value())
        .bind(rental.price.value())
        .bind(&rental.description)
        .bind(bytes)
        .bind(content_type)
        .bind(filename)
        .bind(size)
        .bind(rental.created_at)
        .bind(rental.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RentalError::DatabaseError(e.to_string()))?;

        Ok(rental)
    }

    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalError> {
        let row: Option<RentalRow> = sqlx::query_as(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RentalError::DatabaseError(e.to_string()))?;

        row.map(RentalRow::try_into_rental).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Rental>, RentalError> {
        let rows: Vec<RentalRow> = sqlx::query_as(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RentalError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(RentalRow::try_into_rental).collect()
    }

    async fn update(&self, rental: Rental) -> Result<Rental, RentalError> {
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET name = $2, surface = $3, price = $4, description = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(rental.id.0)
        .bind(rental.name.as_str())
        .bind(rental.surface.value())
        .bind(rental.price.value())
        .bind(&rental.description)
        .bind(rental.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RentalError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RentalError::NotFound(rental.id.to_string()));
        }

        Ok(rental)
    }

    async fn find_picture(&self, id: &RentalId) -> Result<Option<RentalPicture>, RentalError> {
        let row: Option<PictureRow> = sqlx::query_as(
            r#"
            SELECT picture, picture_content_type, picture_filename
            FROM rentals
            WHERE id = $1 AND picture IS NOT NULL
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RentalError::DatabaseError(e.to_string()))?;

        Ok(row.map(|r| RentalPicture {
            content_type: r.picture_content_type,
            filename: r.picture_filename,
            bytes: r.picture,
        }))
    }
}
