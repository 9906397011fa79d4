use thiserror::Error;

/// Error for RentalId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RentalIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for RentalName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RentalNameError {
    #[error("Name must not be blank")]
    Blank,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Surface validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SurfaceError {
    #[error("Surface must be a positive number, got {0}")]
    NotPositive(f64),
}

/// Error for Price validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("Price must be a positive number, got {0}")]
    NotPositive(f64),
}

/// Error for picture upload validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PictureError {
    #[error("File must be an image, got content type: {0}")]
    NotAnImage(String),

    #[error("File too large: maximum {max} bytes, got {actual}")]
    TooLarge { max: usize, actual: usize },
}

/// Top-level error for rental operations
#[derive(Debug, Clone, Error)]
pub enum RentalError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid rental ID: {0}")]
    InvalidRentalId(#[from] RentalIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] RentalNameError),

    #[error("Invalid surface: {0}")]
    InvalidSurface(#[from] SurfaceError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Invalid picture: {0}")]
    InvalidPicture(#[from] PictureError),

    // Domain-level errors
    #[error("Rental not found: {0}")]
    NotFound(String),

    #[error("Rental has no picture: {0}")]
    PictureNotFound(String),

    #[error("Rental {0} does not belong to the requesting user")]
    NotOwner(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
