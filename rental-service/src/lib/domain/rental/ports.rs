use async_trait::async_trait;

use crate::domain::rental::errors::RentalError;
use crate::domain::rental::models::CreateRentalCommand;
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::RentalPicture;
use crate::domain::rental::models::UpdateRentalCommand;
use crate::domain::user::models::UserId;

/// Port for rental domain service operations.
#[async_trait]
pub trait RentalServicePort: Send + Sync + 'static {
    /// Create a new rental owned by `owner_id`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_rental(
        &self,
        owner_id: UserId,
        command: CreateRentalCommand,
    ) -> Result<Rental, RentalError>;

    /// Retrieve rental by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Rental does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_rental(&self, id: &RentalId) -> Result<Rental, RentalError>;

    /// Retrieve all rentals, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_rentals(&self) -> Result<Vec<Rental>, RentalError>;

    /// Replace the updatable fields of a rental. Only the owner may update.
    ///
    /// # Errors
    /// * `NotFound` - Rental does not exist
    /// * `NotOwner` - Requester is not the rental's owner
    /// * `DatabaseError` - Database operation failed
    async fn update_rental(
        &self,
        id: &RentalId,
        requester: UserId,
        command: UpdateRentalCommand,
    ) -> Result<Rental, RentalError>;

    /// Fetch the stored picture of a rental for delivery.
    ///
    /// # Errors
    /// * `NotFound` - Rental does not exist
    /// * `PictureNotFound` - Rental exists but carries no picture
    /// * `DatabaseError` - Database operation failed
    async fn get_rental_picture(&self, id: &RentalId) -> Result<RentalPicture, RentalError>;
}

/// Persistence operations for the rental aggregate.
#[async_trait]
pub trait RentalRepository: Send + Sync + 'static {
    /// Persist a new rental, with its picture when one was uploaded.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        rental: Rental,
        picture: Option<RentalPicture>,
    ) -> Result<Rental, RentalError>;

    /// Retrieve rental by identifier (None if not found). Picture bytes are
    /// not loaded.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalError>;

    /// Retrieve all rentals, newest first. Picture bytes are not loaded.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Rental>, RentalError>;

    /// Update an existing rental's fields (picture untouched).
    ///
    /// # Errors
    /// * `NotFound` - Rental does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, rental: Rental) -> Result<Rental, RentalError>;

    /// Load the stored picture of a rental (None when the rental is missing
    /// or has no picture).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_picture(&self, id: &RentalId) -> Result<Option<RentalPicture>, RentalError>;
}
