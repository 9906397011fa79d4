use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::rental::errors::RentalError;
use crate::domain::rental::models::CreateRentalCommand;
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::RentalPicture;
use crate::domain::rental::models::UpdateRentalCommand;
use crate::domain::rental::ports::RentalRepository;
use crate::domain::rental::ports::RentalServicePort;
use crate::domain::user::models::UserId;

/// Domain service for rental CRUD.
pub struct RentalService<RR>
where
    RR: RentalRepository,
{
    repository: Arc<RR>,
}

impl<RR> RentalService<RR>
where
    RR: RentalRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> RentalServicePort for RentalService<RR>
where
    RR: RentalRepository,
{
    async fn create_rental(
        &self,
        owner_id: UserId,
        command: CreateRentalCommand,
    ) -> Result<Rental, RentalError> {
        let now = Utc::now();
        let rental = Rental {
            id: RentalId::new(),
            owner_id,
            name: command.name,
            surface: command.surface,
            price: command.price,
            description: command.description,
            has_picture: command.picture.is_some(),
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(rental, command.picture).await?;

        tracing::info!(rental_id = %created.id, owner_id = %owner_id, "Rental created");

        Ok(created)
    }

    async fn get_rental(&self, id: &RentalId) -> Result<Rental, RentalError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RentalError::NotFound(id.to_string()))
    }

    async fn list_rentals(&self) -> Result<Vec<Rental>, RentalError> {
        self.repository.list_all().await
    }

    async fn update_rental(
        &self,
        id: &RentalId,
        requester: UserId,
        command: UpdateRentalCommand,
    ) -> Result<Rental, RentalError> {
        let mut rental = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(RentalError::NotFound(id.to_string()))?;

        if rental.owner_id != requester {
            return Err(RentalError::NotOwner(id.to_string()));
        }

        rental.name = command.name;
        rental.surface = command.surface;
        rental.price = command.price;
        rental.description = command.description;
        rental.updated_at = Utc::now();

        self.repository.update(rental).await
    }

    async fn get_rental_picture(&self, id: &RentalId) -> Result<RentalPicture, RentalError> {
        // Confirm the rental exists first so a missing rental and a rental
        // without a picture surface as different errors.
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RentalError::NotFound(id.to_string()))?;

        self.repository
            .find_picture(id)
            .await?
            .ok_or(RentalError::PictureNotFound(id.to_string()))
    }
}
