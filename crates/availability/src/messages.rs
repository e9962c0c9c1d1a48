//! User-facing message vocabulary.
//!
//! Every message the check can produce is a variant here; `Display` renders
//! the English template and `code()` gives the stable wire key.

use thiserror::Error;

/// Why a request was rejected or could not be answered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReasonCode {
    #[error("Invalid request.")]
    InvalidRequest,

    #[error("Invalid product ID or requested quantity.")]
    InvalidParams,

    #[error("Product not found.")]
    ProductNotFound,

    #[error("Please enter a valid quantity greater than 0.")]
    EnterValidNumber,

    #[error("Please ensure at least one product quantity is greater than 0.")]
    GroupProductNotValid,

    #[error("Product ID is missing or invalid.")]
    ProductIdInvalid,

    #[error("Please select the variable option.")]
    VariableNotFound,

    #[error("An unexpected error occurred. Please try again later.")]
    UnexpectedError,

    /// Named fields were not supplied at all.
    #[error("{}", required_fields(.0))]
    RequiredData(Vec<String>),

    /// Named fields were supplied but empty.
    #[error("{}", empty_fields(.0))]
    EmptyData(Vec<String>),

    /// Neither a quantity nor a child list was supplied.
    #[error("{}", empty_fields(&[MISSING_QUANTITY_FIELD.to_string()]))]
    MissingQuantity,
}

const MISSING_QUANTITY_FIELD: &str = "Requested products";
const SOME_PARAMETERS_MISSING: &str = "Some required parameters are missing.";

fn required_fields(fields: &[String]) -> String {
    if fields.is_empty() {
        SOME_PARAMETERS_MISSING.to_string()
    } else {
        format!("The following fields are required: {}.", fields.join(", "))
    }
}

fn empty_fields(fields: &[String]) -> String {
    if fields.is_empty() {
        SOME_PARAMETERS_MISSING.to_string()
    } else {
        format!("{} field are empty. Please fill the value", fields.join(", "))
    }
}

impl ReasonCode {
    pub fn code(&self) -> &'static str {
        match self {
            ReasonCode::InvalidRequest => "invalid_request",
            ReasonCode::InvalidParams => "invalid_params",
            ReasonCode::ProductNotFound => "product_not_found",
            ReasonCode::EnterValidNumber => "enter_valid_number",
            ReasonCode::GroupProductNotValid => "group_product_not_valid",
            ReasonCode::ProductIdInvalid => "product_id_invalid",
            ReasonCode::VariableNotFound => "variable_not_found",
            ReasonCode::UnexpectedError => "unexpected_error",
            ReasonCode::RequiredData(_) => "required_data",
            ReasonCode::EmptyData(_) => "empty_data",
            ReasonCode::MissingQuantity => "missing_quantity",
        }
    }

    pub fn required_data<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RequiredData(fields.into_iter().map(Into::into).collect())
    }

    pub fn empty_data<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::EmptyData(fields.into_iter().map(Into::into).collect())
    }
}

/// Answers to a well-formed availability question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockMessage {
    StockAvailable,
    LimitedStockAvailable(u64),
    OutOfStock,
}

impl StockMessage {
    pub fn code(&self) -> &'static str {
        match self {
            StockMessage::StockAvailable => "stock_available",
            StockMessage::LimitedStockAvailable(_) => "limited_stock_available",
            StockMessage::OutOfStock => "out_of_stock",
        }
    }
}

impl core::fmt::Display for StockMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockMessage::StockAvailable => f.write_str("Great! We have enough stock."),
            StockMessage::LimitedStockAvailable(qty) => {
                write!(f, "Sorry, we only have {qty} units in stock.")
            }
            StockMessage::OutOfStock => f.write_str("This product is currently out of stock."),
        }
    }
}
