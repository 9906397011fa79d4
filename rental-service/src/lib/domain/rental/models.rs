use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::rental::errors::PictureError;
use crate::domain::rental::errors::PriceError;
use crate::domain::rental::errors::RentalIdError;
use crate::domain::rental::errors::RentalNameError;
use crate::domain::rental::errors::SurfaceError;
use crate::domain::user::models::UserId;

/// Rental aggregate entity.
///
/// Picture bytes are not part of the aggregate: they are fetched lazily
/// through the repository when the delivery endpoint asks for them, so list
/// and detail queries stay light. `has_picture` records whether a stored
/// picture exists.
#[derive(Debug, Clone)]
pub struct Rental {
    pub id: RentalId,
    pub owner_id: UserId,
    pub name: RentalName,
    pub surface: Surface,
    pub price: Price,
    pub description: String,
    pub has_picture: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rental unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RentalId(pub Uuid);

impl RentalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a rental ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, RentalIdError> {
        Uuid::parse_str(s)
            .map(RentalId)
            .map_err(|e| RentalIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for RentalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Rental name value type (non-blank, at most 255 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalName(String);

impl RentalName {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Blank` - Name is empty or whitespace only
    /// * `TooLong` - Name is longer than 255 characters
    pub fn new(name: String) -> Result<Self, RentalNameError> {
        if name.trim().is_empty() {
            return Err(RentalNameError::Blank);
        }
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(RentalNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RentalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Surface in square meters. Strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface(f64);

impl Surface {
    /// # Errors
    /// * `NotPositive` - Zero, negative, or not a finite number
    pub fn new(value: f64) -> Result<Self, SurfaceError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SurfaceError::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Rental price. Strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// # Errors
    /// * `NotPositive` - Zero, negative, or not a finite number
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(PriceError::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Stored rental picture: raw bytes plus delivery metadata.
#[derive(Debug, Clone)]
pub struct RentalPicture {
    pub content_type: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RentalPicture {
    /// Maximum accepted upload size (5 MiB).
    pub const MAX_BYTES: usize = 5 * 1024 * 1024;

    /// Validate an uploaded file and assign it a storage filename.
    ///
    /// The stored filename is a random UUID keeping the upload's extension,
    /// so client-supplied names never reach storage or response headers
    /// verbatim.
    ///
    /// # Errors
    /// * `NotAnImage` - Content type is not `image/*`
    /// * `TooLarge` - More than 5 MiB
    pub fn from_upload(
        content_type: String,
        original_filename: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, PictureError> {
        if !content_type.starts_with("image/") {
            return Err(PictureError::NotAnImage(content_type));
        }
        if bytes.len() > Self::MAX_BYTES {
            return Err(PictureError::TooLarge {
                max: Self::MAX_BYTES,
                actual: bytes.len(),
            });
        }

        let extension = original_filename
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext))
            .unwrap_or_default();

        Ok(Self {
            content_type,
            filename: format!("{}{}", Uuid::new_v4(), extension),
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Command to create a new rental with validated fields.
#[derive(Debug)]
pub struct CreateRentalCommand {
    pub name: RentalName,
    pub surface: Surface,
    pub price: Price,
    pub description: String,
    pub picture: Option<RentalPicture>,
}

/// Command to update an existing rental. All fields are replaced; the
/// picture is not updatable through this path.
#[derive(Debug)]
pub struct UpdateRentalCommand {
    pub name: RentalName,
    pub surface: Surface,
    pub price: Price,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_and_price_must_be_positive() {
        assert!(Surface::new(120.5).is_ok());
        assert!(Surface::new(0.0).is_err());
        assert!(Surface::new(-3.0).is_err());
        assert!(Surface::new(f64::NAN).is_err());

        assert!(Price::new(2500.0).is_ok());
        assert!(Price::new(0.0).is_err());
    }

    #[test]
    fn test_rental_name_rejects_blank() {
        assert!(matches!(
            RentalName::new("  ".to_string()),
            Err(RentalNameError::Blank)
        ));
    }

    #[test]
    fn test_picture_rejects_non_image() {
        let result =
            RentalPicture::from_upload("text/plain".to_string(), "notes.txt", vec![1, 2, 3]);
        assert!(matches!(result, Err(PictureError::NotAnImage(_))));
    }

    #[test]
    fn test_picture_rejects_oversized_upload() {
        let bytes = vec![0u8; RentalPicture::MAX_BYTES + 1];
        let result = RentalPicture::from_upload("image/png".to_string(), "big.png", bytes);
        assert!(matches!(result, Err(PictureError::TooLarge { .. })));
    }

    #[test]
    fn test_picture_filename_keeps_extension_only() {
        let picture =
            RentalPicture::from_upload("image/png".to_string(), "villa.png", vec![0u8; 16])
                .unwrap();

        assert!(picture.filename.ends_with(".png"));
        assert!(!picture.filename.contains("villa"));
    }
}
