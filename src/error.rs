use thiserror::Error;

/// Shape problems with a submitted order. Detected before any stock math runs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("order id must not be empty")]
    EmptyOrderId,
    #[error("order id must not contain whitespace: {0:?}")]
    OrderIdHasWhitespace(String),
    #[error("customer name must not be empty")]
    EmptyCustomerName,
    #[error("order must contain at least one item")]
    NoLineItems,
    #[error("invalid product id: {0:?}")]
    InvalidProductId(String),
    #[error("duplicate line item for product {0}")]
    DuplicateLineItem(String),
    #[error("invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: i32 },
    #[error("status is assigned by the server")]
    StatusNotAllowed,
    #[error("created_at is assigned by the server")]
    CreatedAtNotAllowed,
    #[error("order id {found} does not match {expected}")]
    IdMismatch { expected: String, found: String },
}

/// Failures reported by the menu, inventory and order stores.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("record already exists: {0}")]
    DuplicateId(String),
    #[error("storage I/O error: {0}")]
    Io(String),
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Errors that can occur during order admission and lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Recipe for {product_id} has invalid quantity {quantity} of {ingredient_id}")]
    InvalidRecipe {
        product_id: String,
        ingredient_id: String,
        quantity: f64,
    },
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Order already exists: {0}")]
    DuplicateOrderId(String),
    #[error("Order already closed: {0}")]
    AlreadyClosed(String),
    #[error("Insufficient stock of {ingredient_id}: required {required}, available {available}")]
    InsufficientStock {
        ingredient_id: String,
        required: f64,
        available: f64,
    },
    #[error("Order storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Coarse category of an [`OrderError`], for callers that map failures onto a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    InsufficientStock,
    Storage,
    Unavailable,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_) | OrderError::InvalidRecipe { .. } => ErrorKind::Validation,
            OrderError::ProductNotFound(_)
            | OrderError::IngredientNotFound(_)
            | OrderError::OrderNotFound(_) => ErrorKind::NotFound,
            OrderError::DuplicateOrderId(_) | OrderError::AlreadyClosed(_) => ErrorKind::Conflict,
            OrderError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            OrderError::Storage(_) => ErrorKind::Storage,
            OrderError::ActorCommunicationError(_) => ErrorKind::Unavailable,
        }
    }

    /// Ingredient that blocked an admission or close, if that is why it failed.
    pub fn short_ingredient(&self) -> Option<&str> {
        match self {
            OrderError::InsufficientStock { ingredient_id, .. } => Some(ingredient_id),
            _ => None,
        }
    }
}
